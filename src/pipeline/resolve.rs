// src/pipeline/resolve.rs

//! Resolution stage: candidates → canonical place records.

use std::time::Duration;

use crate::config::{Credentials, RunOptions};
use crate::error::Result;
use crate::models::{CandidateRestaurant, ResolvedRestaurant};
use crate::services::PlacesClient;
use crate::storage::SnapshotStore;

use super::cache::get_or_fetch;

/// Pause between successive place searches. Rate pacing, not retry backoff.
const SEARCH_DELAY: Duration = Duration::from_secs(2);

/// Resolve the community's candidates against the place-search API, or
/// reload them from the snapshot.
pub async fn run_resolve(
    credentials: &Credentials,
    options: &RunOptions,
    store: &SnapshotStore,
) -> Result<Vec<ResolvedRestaurant>> {
    let key = format!("{}_full_restaurants", options.community);

    get_or_fetch(store, &key, options.use_cache, || async move {
        let candidates = super::run_extract(credentials, options, store).await?;

        let client = PlacesClient::new(credentials.maps_api_key.as_str())?;
        let resolved = resolve_all(
            &client,
            &candidates,
            options.location_hint.as_deref(),
            SEARCH_DELAY,
        )
        .await;

        log::info!(
            "Resolved {} of {} restaurants from r/{}",
            resolved.len(),
            candidates.len(),
            options.community
        );
        Ok(resolved)
    })
    .await
}

/// Resolve candidates one at a time with a fixed pause between calls.
///
/// A failed or fruitless search drops that one candidate; it never aborts
/// the batch.
async fn resolve_all(
    client: &PlacesClient,
    candidates: &[CandidateRestaurant],
    location_hint: Option<&str>,
    delay: Duration,
) -> Vec<ResolvedRestaurant> {
    let mut resolved = Vec::new();

    for (i, candidate) in candidates.iter().enumerate() {
        match client.resolve(candidate, location_hint).await {
            Ok(Some(restaurant)) => resolved.push(restaurant),
            Ok(None) => {}
            Err(e) => log::warn!("Skipping candidate: {e}"),
        }

        if i + 1 < candidates.len() && !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn candidate(name: &str, upvotes: i64) -> CandidateRestaurant {
        CandidateRestaurant {
            name: name.to_string(),
            upvotes,
            source_url: format!("https://www.reddit.com/r/FoodNYC/{upvotes}/"),
            neighborhood: None,
            map_link: None,
        }
    }

    fn place_body(id: &str, name: &str) -> serde_json::Value {
        json!({
            "places": [{
                "id": id,
                "displayName": { "text": name },
                "location": { "latitude": 40.7, "longitude": -74.0 },
                "rating": 4.2,
                "userRatingCount": 55,
                "primaryTypeDisplayName": { "text": "Restaurant" },
            }]
        })
    }

    #[tokio::test]
    async fn failed_search_skips_candidate_and_continues() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/places:searchText"))
            .and(body_partial_json(json!({ "textQuery": "Menya Jiro" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(place_body("p1", "Menya Jiro")))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/places:searchText"))
            .and(body_partial_json(json!({ "textQuery": "Ghost Kitchen" })))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/places:searchText"))
            .and(body_partial_json(json!({ "textQuery": "Han Dynasty" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(place_body("p3", "Han Dynasty")))
            .mount(&server)
            .await;

        let client = PlacesClient::with_api_url(server.uri(), "k").unwrap();
        let candidates = vec![
            candidate("Menya Jiro", 900),
            candidate("Ghost Kitchen", 500),
            candidate("Han Dynasty", 100),
        ];

        let resolved = resolve_all(&client, &candidates, None, Duration::ZERO).await;

        let names: Vec<&str> = resolved.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Menya Jiro", "Han Dynasty"]);
    }

    #[tokio::test]
    async fn unresolvable_candidates_yield_empty_batch() {
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/places:searchText"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let client = PlacesClient::with_api_url(server.uri(), "k").unwrap();
        let candidates = vec![candidate("Menya Jiro", 900)];

        let resolved = resolve_all(&client, &candidates, Some("NYC"), Duration::ZERO).await;
        assert!(resolved.is_empty());
    }
}
