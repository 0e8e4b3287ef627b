// src/pipeline/extract.rs

//! Extraction stage: posts → deduped restaurant candidates.

use std::collections::HashSet;

use crate::config::{Credentials, RunOptions};
use crate::error::Result;
use crate::models::CandidateRestaurant;
use crate::services::RestaurantExtractor;
use crate::storage::SnapshotStore;

use super::cache::get_or_fetch;

/// Upper bound on posts per extraction call.
const CHUNK_SIZE: usize = 100;

/// Extract restaurant candidates from the community's posts, or reload them
/// from the snapshot.
///
/// Candidates come back sorted by upvotes descending with duplicate names
/// removed (first occurrence wins).
pub async fn run_extract(
    credentials: &Credentials,
    options: &RunOptions,
    store: &SnapshotStore,
) -> Result<Vec<CandidateRestaurant>> {
    let key = format!("{}_restaurants", options.community);

    get_or_fetch(store, &key, options.use_cache, || async move {
        let posts = super::run_posts(credentials, options, store).await?;
        log::info!("Extracting restaurant mentions from {} posts", posts.len());

        let extractor = RestaurantExtractor::new(credentials.gemini_api_key.as_str())?;

        let mut candidates = Vec::new();
        let mut processed = 0;
        for chunk in posts.chunks(CHUNK_SIZE) {
            let mut batch = extractor.extract(chunk).await?;
            processed += chunk.len();
            candidates.append(&mut batch);
            log::info!("Processed {processed}/{} posts", posts.len());
        }

        candidates.sort_by(|a, b| b.upvotes.cmp(&a.upvotes));
        let unique = dedupe_by_name(candidates);

        log::info!(
            "Extracted {} unique restaurants from r/{}",
            unique.len(),
            options.community
        );
        Ok(unique)
    })
    .await
}

/// Keep the first occurrence of each restaurant name, preserving order.
pub fn dedupe_by_name(candidates: Vec<CandidateRestaurant>) -> Vec<CandidateRestaurant> {
    let mut seen = HashSet::new();
    candidates
        .into_iter()
        .filter(|c| seen.insert(c.name.clone()))
        .collect()
}
