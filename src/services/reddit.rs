// src/services/reddit.rs

//! Forum post source.
//!
//! Fetches a community's top-ranked posts through the OAuth listing API,
//! following the continuation cursor until the requested count is reached
//! or the listing runs out.

use serde::Deserialize;

use crate::config::TimeRange;
use crate::error::{AppError, Result};
use crate::models::Post;
use crate::utils::http::create_client;

const API_URL: &str = "https://oauth.reddit.com";
const TOKEN_URL: &str = "https://www.reddit.com/api/v1/access_token";
const PERMALINK_BASE: &str = "https://www.reddit.com";

/// Listing page size cap imposed by the API.
pub const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Deserialize)]
struct TokenResponse {
    #[serde(default)]
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct ListingResponse {
    data: ListingData,
}

#[derive(Debug, Deserialize)]
struct ListingData {
    children: Vec<ListingChild>,
    after: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListingChild {
    data: ListingPost,
}

#[derive(Debug, Deserialize)]
struct ListingPost {
    title: String,
    permalink: String,
    #[serde(default)]
    selftext: String,
    #[serde(default)]
    score: i64,
}

impl ListingPost {
    fn into_post(self) -> Post {
        let url = if self.permalink.starts_with('/') {
            format!("{PERMALINK_BASE}{}", self.permalink)
        } else {
            self.permalink
        };
        Post {
            title: self.title,
            body: self.selftext,
            url,
            upvotes: self.score,
        }
    }
}

/// Client for the community's top-post listing.
///
/// Holds the bearer token for the life of the process; there is no
/// refresh-on-expiry handling.
pub struct RedditClient {
    http: reqwest::Client,
    client_id: String,
    client_secret: String,
    api_url: String,
    token_url: String,
    token: Option<String>,
}

impl RedditClient {
    /// Create a client against the production endpoints.
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Result<Self> {
        Self::with_endpoints(client_id, client_secret, API_URL, TOKEN_URL)
    }

    /// Create a client against custom endpoints.
    pub fn with_endpoints(
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
        api_url: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Result<Self> {
        Ok(Self {
            http: create_client(30)?,
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            api_url: api_url.into(),
            token_url: token_url.into(),
            token: None,
        })
    }

    /// Fetch up to `count` top posts for the window, in listing order.
    ///
    /// Returns fewer than `count` without error when the listing's cursor
    /// runs out first. Any failed page request aborts the whole fetch.
    pub async fn fetch_top(
        &mut self,
        community: &str,
        count: usize,
        time_range: TimeRange,
    ) -> Result<Vec<Post>> {
        let token = self.ensure_token().await?;

        let mut posts: Vec<Post> = Vec::with_capacity(count);
        let mut after: Option<String> = None;

        while posts.len() < count {
            let page_size = MAX_PAGE_SIZE.min(count - posts.len());
            let (page, next) = self
                .fetch_page(
                    &token,
                    community,
                    page_size,
                    time_range,
                    after.as_deref(),
                    posts.len(),
                )
                .await?;

            if page.is_empty() {
                break;
            }
            posts.extend(page);

            match next {
                Some(cursor) => after = Some(cursor),
                None => break,
            }
        }

        Ok(posts)
    }

    /// Exchange client credentials for a bearer token, once per process.
    async fn ensure_token(&mut self) -> Result<String> {
        if let Some(token) = &self.token {
            return Ok(token.clone());
        }

        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials")])
            .send()
            .await
            .map_err(AppError::auth)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::auth(format!("token exchange returned {status}")));
        }

        let body: TokenResponse = response.json().await.map_err(AppError::auth)?;
        if body.access_token.is_empty() {
            return Err(AppError::auth("token exchange returned an empty token"));
        }

        self.token = Some(body.access_token.clone());
        Ok(body.access_token)
    }

    /// Fetch one listing page.
    async fn fetch_page(
        &self,
        token: &str,
        community: &str,
        limit: usize,
        time_range: TimeRange,
        after: Option<&str>,
        seen: usize,
    ) -> Result<(Vec<Post>, Option<String>)> {
        let url = format!("{}/r/{}/top", self.api_url, community);

        let mut query: Vec<(&str, String)> = vec![
            ("limit", limit.to_string()),
            ("t", time_range.as_str().to_string()),
        ];
        if let Some(cursor) = after {
            query.push(("after", cursor.to_string()));
            query.push(("count", seen.to_string()));
        }

        let response = self
            .http
            .get(&url)
            .query(&query)
            .bearer_auth(token)
            .send()
            .await
            .map_err(AppError::fetch)?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::fetch(format!(
                "listing page for r/{community} returned {status}"
            )));
        }

        let listing: ListingResponse = response.json().await.map_err(AppError::fetch)?;

        let posts = listing
            .data
            .children
            .into_iter()
            .map(|child| child.data.into_post())
            .collect();
        let next = listing.data.after.filter(|cursor| !cursor.is_empty());

        Ok((posts, next))
    }
}
