#![no_std]

extern crate alloc;

pub use board::*;
pub use builder::*;
pub use countdown::*;
pub use engine::*;
pub use error::*;
pub use leaderboard::*;
pub use level::*;
pub use push::*;
pub use scoring::*;
pub use tile::*;
pub use types::*;

mod board;
mod builder;
mod countdown;
mod engine;
mod error;
mod leaderboard;
mod level;
mod push;
mod scoring;
mod tile;
mod types;
