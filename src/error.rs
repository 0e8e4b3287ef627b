// src/error.rs

//! Unified error handling for the pipeline.

use std::fmt;

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Missing or invalid configuration (checked before any stage runs)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Token exchange with the forum API failed
    #[error("Authentication error: {0}")]
    Auth(String),

    /// A post-listing page request failed
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// An extraction chunk failed or its response did not match the schema
    #[error("Extraction error: {0}")]
    Extraction(String),

    /// A single place search failed (non-fatal, caller skips the candidate)
    #[error("Resolution error for '{name}': {message}")]
    Resolution { name: String, message: String },

    /// A cached snapshot could not be read or decoded
    #[error("Cache read error for '{key}': {message}")]
    CacheRead { key: String, message: String },

    /// A snapshot could not be written
    #[error("Cache write error for '{key}': {message}")]
    CacheWrite { key: String, message: String },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV writing failed
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create an authentication error.
    pub fn auth(message: impl fmt::Display) -> Self {
        Self::Auth(message.to_string())
    }

    /// Create a fetch error.
    pub fn fetch(message: impl fmt::Display) -> Self {
        Self::Fetch(message.to_string())
    }

    /// Create an extraction error.
    pub fn extraction(message: impl fmt::Display) -> Self {
        Self::Extraction(message.to_string())
    }

    /// Create a resolution error for a single candidate.
    pub fn resolution(name: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::Resolution {
            name: name.into(),
            message: message.to_string(),
        }
    }

    /// Create a cache read error.
    pub fn cache_read(key: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::CacheRead {
            key: key.into(),
            message: message.to_string(),
        }
    }

    /// Create a cache write error.
    pub fn cache_write(key: impl Into<String>, message: impl fmt::Display) -> Self {
        Self::CacheWrite {
            key: key.into(),
            message: message.to_string(),
        }
    }
}
