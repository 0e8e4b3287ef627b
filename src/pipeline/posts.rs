// src/pipeline/posts.rs

//! Post-fetch stage.

use crate::config::{Credentials, RunOptions};
use crate::error::Result;
use crate::models::Post;
use crate::services::RedditClient;
use crate::storage::SnapshotStore;

use super::cache::get_or_fetch;

/// Fetch a community's top posts, or reload them from the snapshot.
pub async fn run_posts(
    credentials: &Credentials,
    options: &RunOptions,
    store: &SnapshotStore,
) -> Result<Vec<Post>> {
    get_or_fetch(store, &options.community, options.use_cache, || async move {
        let mut client = RedditClient::new(
            credentials.reddit_client_id.as_str(),
            credentials.reddit_client_secret.as_str(),
        )?;

        let posts = client
            .fetch_top(&options.community, options.post_count, options.time_range)
            .await?;

        log::info!(
            "Fetched {} posts from r/{} (time range: {})",
            posts.len(),
            options.community,
            options.time_range
        );
        Ok(posts)
    })
    .await
}
