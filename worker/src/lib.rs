//! Host side of the puzzle: persists the post's level and leaderboard and answers the view.

pub use host::*;
pub use store::*;

mod host;
mod store;
