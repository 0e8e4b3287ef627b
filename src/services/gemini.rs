// src/services/gemini.rs

//! Restaurant extraction via the Gemini API.
//!
//! One `generateContent` call per batch of posts. The response is pinned to
//! JSON with a schema, so the classification policy (what counts as a
//! single-restaurant review) lives entirely in the prompt and model.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{AppError, Result};
use crate::models::{CandidateRestaurant, Post};
use crate::utils::http::create_client;

const API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const MODEL: &str = "gemini-2.0-flash-lite";

// --- Request and response structures ---

#[derive(Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_k: i32,
    top_p: f32,
    max_output_tokens: i32,
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Deserialize, Debug)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize, Debug)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize, Debug)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize, Debug)]
struct CandidatePart {
    text: String,
}

/// Schema-constrained payload the model is asked to emit.
#[derive(Deserialize, Debug)]
struct RestaurantList {
    restaurants: Vec<CandidateRestaurant>,
}

/// Client for the restaurant extraction call.
#[derive(Clone, Debug)]
pub struct RestaurantExtractor {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl RestaurantExtractor {
    /// Create an extractor against the production endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_api_url(API_URL, api_key)
    }

    /// Create an extractor against a custom endpoint.
    pub fn with_api_url(api_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: create_client(120)?,
            api_url: api_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Extract restaurant mentions from one batch of posts.
    ///
    /// Posts that review several restaurants, or whose restaurant
    /// association is unclear, yield no candidate. Order follows the model's
    /// output, which tracks input order.
    pub async fn extract(&self, posts: &[Post]) -> Result<Vec<CandidateRestaurant>> {
        let posts_json = serde_json::to_string(posts).map_err(AppError::extraction)?;

        let request = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: build_prompt(&posts_json),
                }],
            }],
            generation_config: GenerationConfig {
                temperature: 0.0,
                top_k: 40,
                top_p: 0.95,
                max_output_tokens: 8192,
                response_mime_type: "application/json".to_string(),
                response_schema: response_schema(),
            },
        };

        let url = format!("{}/models/{}:generateContent", self.api_url, MODEL);
        let response = self
            .http
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(&request)
            .send()
            .await
            .map_err(AppError::extraction)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::extraction(format!(
                "generateContent returned {status}: {body}"
            )));
        }

        let generated: GenerateResponse = response.json().await.map_err(AppError::extraction)?;

        let text = generated
            .candidates
            .first()
            .and_then(|c| c.content.parts.first())
            .map(|p| p.text.as_str())
            .ok_or_else(|| AppError::extraction("no response generated"))?;

        let list: RestaurantList = serde_json::from_str(text).map_err(|e| {
            AppError::extraction(format!("response did not match the expected schema: {e}"))
        })?;

        Ok(list.restaurants)
    }
}

/// Prompt describing the classification policy.
fn build_prompt(posts_json: &str) -> String {
    format!(
        "Each input object is a post from a food community, with a title, body \
text, permalink URL, and upvote score. For each post that reviews a single \
specific restaurant, emit one entry in the output.\n\n\
A post is a restaurant review when the title names a specific restaurant and \
the body describes the dining experience (dishes, prices, impressions). If \
the title contains the word 'review', 'recommendation', or 'ate at', treat it \
as a restaurant review.\n\n\
Skip posts that do not correspond to a restaurant review, posts that mention \
a list of restaurants, and posts whose restaurant association is unclear.\n\n\
For each emitted entry, copy the post's upvote score into `upvotes` and its \
permalink into `source_url`. Include `neighborhood` when the post names one.\n\n\
Input posts:\n{posts_json}"
    )
}

/// Response schema matching [`CandidateRestaurant`]'s serde field names.
fn response_schema() -> serde_json::Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "restaurants": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "required": ["name", "upvotes", "source_url"],
                    "properties": {
                        "name": { "type": "STRING" },
                        "upvotes": { "type": "INTEGER" },
                        "source_url": { "type": "STRING" },
                        "neighborhood": { "type": "STRING" },
                        "map_link": { "type": "STRING" },
                    },
                },
            },
        },
    })
}
