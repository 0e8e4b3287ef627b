//! Snapshot persistence for pipeline stages.
//!
//! Each stage's output is memoized as one pretty-printed JSON file under the
//! cache directory:
//!
//! ```text
//! {cache_dir}/
//! ├── {community}.json                  # fetched posts
//! ├── {community}_restaurants.json      # extracted candidates
//! └── {community}_full_restaurants.json # resolved restaurants
//! ```
//!
//! Single-process, single-writer. Concurrent pipeline instances sharing a
//! cache directory are not supported.

pub mod snapshot;

// Re-export for convenience
pub use snapshot::SnapshotStore;
