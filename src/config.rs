// src/config.rs

//! Run configuration and credential loading.
//!
//! Credentials come from the process environment (a `.env` file is honored
//! when present). Everything else is collected from CLI flags into an
//! immutable [`RunOptions`] that pipeline functions borrow.

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// API credentials, all required before any stage runs.
#[derive(Debug, Clone)]
pub struct Credentials {
    /// Reddit OAuth application id
    pub reddit_client_id: String,

    /// Reddit OAuth application secret
    pub reddit_client_secret: String,

    /// Gemini API key for restaurant extraction
    pub gemini_api_key: String,

    /// Google Maps Platform key for place search
    pub maps_api_key: String,
}

impl Credentials {
    /// Load credentials from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load credentials through an arbitrary lookup function.
    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| AppError::config(format!("{key} must be set")))
        };

        Ok(Self {
            reddit_client_id: required("REDDIT_CLIENT_ID")?,
            reddit_client_secret: required("REDDIT_CLIENT_SECRET")?,
            gemini_api_key: required("GOOGLE_GEMINI_API_KEY")?,
            maps_api_key: required("GOOGLE_MAPS_API_KEY")?,
        })
    }
}

/// Ranking window accepted by the forum's "top" listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeRange {
    Hour,
    Day,
    Week,
    Month,
    Year,
    All,
}

impl TimeRange {
    /// Wire value for the listing's `t` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Hour => "hour",
            TimeRange::Day => "day",
            TimeRange::Week => "week",
            TimeRange::Month => "month",
            TimeRange::Year => "year",
            TimeRange::All => "all",
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Immutable per-run options, built once from CLI flags.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Community (subreddit) to pull posts from
    pub community: String,

    /// Number of posts to request from the listing
    pub post_count: usize,

    /// Ranking window for the listing
    pub time_range: TimeRange,

    /// Location context appended to place-search queries
    pub location_hint: Option<String>,

    /// Whether cached stage snapshots may be reused
    pub use_cache: bool,

    /// Maximum number of CSV rows (None = unlimited)
    pub output_limit: Option<usize>,

    /// Directory holding stage snapshots
    pub cache_dir: PathBuf,

    /// Directory the CSV is written under
    pub out_dir: PathBuf,
}

impl RunOptions {
    /// Validate option values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.community.trim().is_empty() {
            return Err(AppError::config("community must not be empty"));
        }
        if self.post_count == 0 {
            return Err(AppError::config("post count must be > 0"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn full_env() -> HashMap<String, String> {
        env(&[
            ("REDDIT_CLIENT_ID", "id"),
            ("REDDIT_CLIENT_SECRET", "secret"),
            ("GOOGLE_GEMINI_API_KEY", "gemini"),
            ("GOOGLE_MAPS_API_KEY", "maps"),
        ])
    }

    #[test]
    fn credentials_load_when_all_present() {
        let vars = full_env();
        let creds = Credentials::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(creds.reddit_client_id, "id");
        assert_eq!(creds.maps_api_key, "maps");
    }

    #[test]
    fn credentials_reject_missing_variable() {
        let mut vars = full_env();
        vars.remove("GOOGLE_MAPS_API_KEY");
        let err = Credentials::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert!(err.to_string().contains("GOOGLE_MAPS_API_KEY"));
    }

    #[test]
    fn credentials_reject_blank_variable() {
        let mut vars = full_env();
        vars.insert("REDDIT_CLIENT_ID".into(), "   ".into());
        assert!(Credentials::from_lookup(|k| vars.get(k).cloned()).is_err());
    }

    #[test]
    fn time_range_wire_values() {
        assert_eq!(TimeRange::Month.as_str(), "month");
        assert_eq!(TimeRange::All.to_string(), "all");
    }

    fn sample_options() -> RunOptions {
        RunOptions {
            community: "FoodNYC".into(),
            post_count: 10,
            time_range: TimeRange::Month,
            location_hint: None,
            use_cache: true,
            output_limit: None,
            cache_dir: PathBuf::from(".cache"),
            out_dir: PathBuf::from("out"),
        }
    }

    #[test]
    fn validate_accepts_sane_options() {
        assert!(sample_options().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_community() {
        let mut opts = sample_options();
        opts.community = "  ".into();
        assert!(opts.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_post_count() {
        let mut opts = sample_options();
        opts.post_count = 0;
        assert!(opts.validate().is_err());
    }
}
