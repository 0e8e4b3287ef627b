//! Restaurant data structures for the extraction and resolution stages.

use serde::{Deserialize, Serialize};

/// A restaurant mention extracted from post text, not yet resolved.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateRestaurant {
    /// Restaurant name as it appeared in the post
    pub name: String,

    /// Upvote score copied from the source post
    pub upvotes: i64,

    /// Permalink of the post the mention came from
    pub source_url: String,

    /// Neighborhood hint, when the post named one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,

    /// Map link guessed by the extractor; replaced wholesale on resolution
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub map_link: Option<String>,
}

/// A candidate enriched with canonical place data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResolvedRestaurant {
    /// Restaurant name from the place record
    pub name: String,

    /// Upvote score carried from the source post
    pub upvotes: i64,

    /// Permalink of the post the mention came from
    pub source_url: String,

    /// Neighborhood hint carried from extraction
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,

    /// Canonical place identifier
    pub place_id: String,

    /// Canonical map link built from the place id
    pub map_url: String,

    /// Latitude in degrees
    pub latitude: f64,

    /// Longitude in degrees
    pub longitude: f64,

    /// Aggregate user rating
    pub rating: f64,

    /// Number of user ratings behind the aggregate
    pub rating_count: i64,

    /// Category label (e.g. "Ramen restaurant")
    pub category: String,
}
