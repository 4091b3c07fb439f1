//! Data models for Pintprice

pub mod daily_pick;
pub mod venue;

// Re-export commonly used types
pub use daily_pick::{DailyPick, DailyPickResponse};
pub use venue::{Venue, VenueView};
