//! Forum post data structure.

use serde::{Deserialize, Serialize};

/// A post fetched from a community's top listing.
///
/// Immutable once fetched; the permalink URL doubles as its identity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Post body text (selftext)
    pub body: String,

    /// Full permalink URL
    pub url: String,

    /// Upvote score at fetch time
    pub upvotes: i64,
}
