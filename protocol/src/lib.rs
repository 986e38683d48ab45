//! Message boundary between the embedded puzzle view and the host that stores levels and scores.

pub use error::*;
pub use message::*;
pub use record::*;
pub use tiles::*;

mod error;
mod message;
mod record;
mod tiles;

/// Username used when the host cannot resolve the player.
pub const ANONYMOUS_USERNAME: &str = "anon";

/// Store key of the leaderboard belonging to `post_id`; the level itself is stored under the
/// post id directly.
pub fn leaderboard_key(post_id: &str) -> String {
    format!("{}_customLevelLeaderboard", post_id)
}
