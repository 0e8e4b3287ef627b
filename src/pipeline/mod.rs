//! Pipeline stages and the shared snapshot policy.
//!
//! Stages chain backwards: each stage's fetch closure invokes the stage
//! before it, so a run with caching enabled resumes at the first stage
//! without a snapshot.
//!
//! - `run_posts`: fetch a community's top posts
//! - `run_extract`: posts → deduped restaurant candidates
//! - `run_resolve`: candidates → canonical place records
//! - `run_export`: rank, truncate, and write the CSV

pub mod cache;
pub mod export;
pub mod extract;
pub mod posts;
pub mod resolve;

pub use cache::get_or_fetch;
pub use export::run_export;
pub use extract::run_extract;
pub use posts::run_posts;
pub use resolve::run_resolve;
