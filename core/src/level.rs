use alloc::format;
use alloc::string::String;

use crate::*;

pub const DEFAULT_MAX_MOVES: Count = 10;
pub const DEFAULT_TIMER_SECONDS: Count = 30;
pub const ANONYMOUS_AUTHOR: &str = "Anonymous";

/// A published puzzle. Immutable once built; play works on copies of its board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Level {
    title: String,
    board: Board,
    max_moves: Count,
    timer_seconds: Count,
    author_name: String,
}

impl Level {
    pub fn new(
        title: impl Into<String>,
        board: Board,
        max_moves: Count,
        timer_seconds: Count,
        author_name: impl Into<String>,
    ) -> Result<Self> {
        if max_moves == 0 || timer_seconds == 0 {
            return Err(GameError::InvalidLevel);
        }

        Ok(Self {
            title: title.into(),
            board,
            max_moves,
            timer_seconds,
            author_name: author_name.into(),
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn max_moves(&self) -> Count {
        self.max_moves
    }

    pub fn timer_seconds(&self) -> Count {
        self.timer_seconds
    }

    pub fn author_name(&self) -> &str {
        &self.author_name
    }

    /// Author as shown to players, `Anonymous` when none was recorded.
    pub fn display_author(&self) -> &str {
        if self.author_name.trim().is_empty() {
            ANONYMOUS_AUTHOR
        } else {
            &self.author_name
        }
    }

    /// Title as shown to players, derived from the author when empty.
    pub fn display_title(&self) -> String {
        if self.title.trim().is_empty() {
            format!("Level by {}", self.display_author())
        } else {
            self.title.clone()
        }
    }
}
