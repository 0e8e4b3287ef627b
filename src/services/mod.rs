//! Service layer: one client per external API.
//!
//! - Post listing (`RedditClient`)
//! - Restaurant extraction (`RestaurantExtractor`)
//! - Place search (`PlacesClient`)

mod gemini;
mod places;
mod reddit;

pub use gemini::RestaurantExtractor;
pub use places::PlacesClient;
pub use reddit::{MAX_PAGE_SIZE, RedditClient};
