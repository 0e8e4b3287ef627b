// src/services/places.rs

//! Place resolution via the Places text-search API.
//!
//! One search per candidate, first match wins. Results without a user
//! rating count are treated as placeholder listings and dropped.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::{CandidateRestaurant, ResolvedRestaurant};
use crate::utils::http::create_client;

const API_URL: &str = "https://places.googleapis.com/v1";
const MAP_LINK_BASE: &str = "https://www.google.com/maps/place/?q=place_id:";

/// Fields requested from the search; everything else stays on the wire.
const FIELD_MASK: &str = "places.id,places.displayName,places.location,\
places.rating,places.userRatingCount,places.primaryTypeDisplayName";

#[derive(Serialize)]
struct SearchRequest<'a> {
    #[serde(rename = "textQuery")]
    text_query: &'a str,
}

#[derive(Deserialize, Debug, Default)]
struct SearchResponse {
    #[serde(default)]
    places: Vec<Place>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct Place {
    id: String,
    display_name: Option<LocalizedText>,
    location: Option<LatLng>,
    rating: Option<f64>,
    user_rating_count: Option<i64>,
    primary_type_display_name: Option<LocalizedText>,
}

#[derive(Deserialize, Debug)]
struct LocalizedText {
    text: String,
}

#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
struct LatLng {
    latitude: f64,
    longitude: f64,
}

/// Client for canonical place lookup.
#[derive(Clone, Debug)]
pub struct PlacesClient {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl PlacesClient {
    /// Create a client against the production endpoint.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_api_url(API_URL, api_key)
    }

    /// Create a client against a custom endpoint.
    pub fn with_api_url(api_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self> {
        Ok(Self {
            http: create_client(30)?,
            api_url: api_url.into(),
            api_key: api_key.into(),
        })
    }

    /// Resolve one candidate to a canonical place record.
    ///
    /// Returns `Ok(None)` when the search has no usable match (zero results
    /// or a placeholder listing without a rating count); both cases log a
    /// warning. Network and auth failures are returned as `Resolution`
    /// errors for the caller to log and skip.
    pub async fn resolve(
        &self,
        candidate: &CandidateRestaurant,
        location_hint: Option<&str>,
    ) -> Result<Option<ResolvedRestaurant>> {
        let query = build_query(candidate, location_hint);
        log::info!("Searching place record for {}", candidate.name);

        let response = self
            .http
            .post(format!("{}/places:searchText", self.api_url))
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .json(&SearchRequest { text_query: &query })
            .send()
            .await
            .map_err(|e| AppError::resolution(&candidate.name, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::resolution(
                &candidate.name,
                format!("search returned {status}"),
            ));
        }

        let result: SearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::resolution(&candidate.name, e))?;

        let Some(place) = result.places.into_iter().next() else {
            log::warn!("No results for '{}' (query: {query})", candidate.name);
            return Ok(None);
        };

        let Some(rating_count) = place.user_rating_count else {
            log::warn!(
                "Skipping '{}': match has no user rating count",
                candidate.name
            );
            return Ok(None);
        };

        Ok(Some(ResolvedRestaurant {
            name: place
                .display_name
                .map(|n| n.text)
                .unwrap_or_else(|| candidate.name.clone()),
            upvotes: candidate.upvotes,
            source_url: candidate.source_url.clone(),
            neighborhood: candidate.neighborhood.clone(),
            map_url: format!("{MAP_LINK_BASE}{}", place.id),
            place_id: place.id,
            latitude: place.location.as_ref().map_or(0.0, |l| l.latitude),
            longitude: place.location.as_ref().map_or(0.0, |l| l.longitude),
            rating: place.rating.unwrap_or(0.0),
            rating_count,
            category: place
                .primary_type_display_name
                .map(|t| t.text)
                .unwrap_or_default(),
        }))
    }
}

/// Free-text search query: name, then neighborhood, then the location hint.
fn build_query(candidate: &CandidateRestaurant, location_hint: Option<&str>) -> String {
    let mut parts = vec![candidate.name.as_str()];
    if let Some(neighborhood) = candidate.neighborhood.as_deref() {
        parts.push(neighborhood);
    }
    if let Some(hint) = location_hint {
        parts.push(hint);
    }
    parts.join(" ")
}
