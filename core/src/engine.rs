use serde::{Deserialize, Serialize};

use crate::*;

/// Lifecycle of a play or playtest session.
///
/// Valid transitions:
/// - Idle -> Playing (level loaded)
/// - Playing -> Won | LostMoves | LostTime
/// - any -> Playing (reset)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Idle,
    Playing,
    Won,
    LostMoves,
    LostTime,
}

impl Phase {
    pub const fn is_playing(self) -> bool {
        matches!(self, Self::Playing)
    }
}

impl Default for Phase {
    fn default() -> Self {
        Self::Idle
    }
}

/// Outcome of a tap on the board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    NoChange,
    Moved,
    Won,
    OutOfMoves,
}

impl ActionOutcome {
    /// Whether the action consumed a move and changed the board
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    NoChange,
    Ticked,
    TimeUp,
}

/// Live state of one attempt at a level.
///
/// Every move-consuming action leaves the session in flight: further taps are ignored until
/// [`Session::settle`] is called, which the front end does once its animation has finished.
#[derive(Clone, Debug, PartialEq)]
pub struct Session {
    level: Option<Level>,
    board: Board,
    moves_used: Count,
    moves_remaining: Count,
    countdown: Countdown,
    score: u32,
    phase: Phase,
    in_flight: bool,
}

impl Session {
    pub fn new() -> Self {
        Self {
            level: None,
            board: Board::new(),
            moves_used: 0,
            moves_remaining: 0,
            countdown: Countdown::new(0),
            score: 0,
            phase: Phase::Idle,
            in_flight: false,
        }
    }

    pub fn with_level(level: Level) -> Self {
        let mut session = Self::new();
        session.load_level(level);
        session
    }

    /// Copies the level's board, refills the budgets and starts the countdown.
    pub fn load_level(&mut self, level: Level) {
        self.countdown.stop();
        self.board = level.board().clone();
        self.moves_used = 0;
        self.moves_remaining = level.max_moves();
        self.countdown = Countdown::new(level.timer_seconds());
        self.score = 0;
        self.in_flight = false;
        self.phase = Phase::Playing;
        self.countdown.start();
        log::debug!(
            "loaded {:?}: {} moves, {}s",
            level.title(),
            level.max_moves(),
            level.timer_seconds()
        );
        self.level = Some(level);
    }

    /// Restarts the stored level from scratch. Does nothing while idle.
    pub fn reset(&mut self) {
        if let Some(level) = self.level.take() {
            log::debug!("reset");
            self.load_level(level);
        }
    }

    /// Stops the countdown without changing the phase, used when leaving the board.
    pub fn stop(&mut self) {
        self.countdown.stop();
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn max_moves(&self) -> Count {
        self.level.as_ref().map_or(0, Level::max_moves)
    }

    pub fn moves_used(&self) -> Count {
        self.moves_used
    }

    pub fn moves_remaining(&self) -> Count {
        self.moves_remaining
    }

    pub fn time_remaining(&self) -> Count {
        self.countdown.remaining()
    }

    pub fn is_clock_running(&self) -> bool {
        self.countdown.is_running()
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    /// Whether a tap on `coords` could currently do anything.
    pub fn can_interact_at(&self, coords: Coord2) -> bool {
        if !self.accepts_input() {
            return false;
        }

        self.board
            .tile_at(coords)
            .is_some_and(|tile| tile.is_arrow() || tile.is_breakable())
    }

    /// Routes a tap to [`Session::activate`] or [`Session::strike`] depending on the tile.
    pub fn interact(&mut self, coords: Coord2) -> Result<ActionOutcome> {
        let coords = self.board.validate_coords(coords)?;

        match self.board[coords] {
            tile if tile.is_arrow() => self.activate(coords),
            tile if tile.is_breakable() => self.strike(coords),
            _ => Ok(ActionOutcome::NoChange),
        }
    }

    /// Fires the arrow at `coords`. Costs a move only when something moved.
    pub fn activate(&mut self, coords: Coord2) -> Result<ActionOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if !self.accepts_input() {
            log::debug!("ignored activation at {:?} ({:?})", coords, self.phase);
            return Ok(ActionOutcome::NoChange);
        }

        let Some(dir) = self.board[coords].direction() else {
            return Ok(ActionOutcome::NoChange);
        };

        let push = resolve_push(&self.board, coords, dir);
        if !push.moved {
            log::debug!("activation at {:?} moved nothing", coords);
            return Ok(ActionOutcome::NoChange);
        }

        self.board = push.board;
        Ok(self.consume_move())
    }

    /// Breaks the cracked tile or drill at `coords`; a drill leaves a hole behind.
    pub fn strike(&mut self, coords: Coord2) -> Result<ActionOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if !self.accepts_input() {
            return Ok(ActionOutcome::NoChange);
        }

        let remains = match self.board[coords] {
            Tile::Cracked => Tile::Blank,
            Tile::Drill => Tile::Hole,
            _ => return Ok(ActionOutcome::NoChange),
        };

        log::debug!("struck {:?} at {:?}", self.board[coords], coords);
        self.board[coords] = remains;
        Ok(self.consume_move())
    }

    /// Marks the last action as fully played out, re-enabling input.
    pub fn settle(&mut self) -> bool {
        core::mem::replace(&mut self.in_flight, false)
    }

    /// Applies one elapsed second.
    pub fn tick(&mut self) -> TickOutcome {
        if !self.phase.is_playing() || !self.countdown.is_running() {
            return TickOutcome::NoChange;
        }

        if self.countdown.tick() {
            log::debug!("time up with {} moves left", self.moves_remaining);
            self.phase = Phase::LostTime;
            TickOutcome::TimeUp
        } else {
            TickOutcome::Ticked
        }
    }

    /// Builds the ledger entry for a won session.
    pub fn submission(&self, player_name: &str) -> Result<LeaderboardEntry> {
        if self.phase != Phase::Won {
            return Err(GameError::NotWon);
        }

        let player_name = player_name.trim();
        if player_name.is_empty() {
            return Err(GameError::EmptyPlayerName);
        }

        Ok(LeaderboardEntry::new(player_name, self.score, 1))
    }

    fn accepts_input(&self) -> bool {
        self.phase.is_playing() && !self.in_flight
    }

    fn consume_move(&mut self) -> ActionOutcome {
        self.moves_used += 1;
        self.moves_remaining = self.moves_remaining.saturating_sub(1);
        self.in_flight = true;

        // win is checked first so clearing the board with the last move still counts
        if self.board.is_cleared() {
            self.countdown.stop();
            self.score = compute_score(
                self.max_moves(),
                self.moves_used,
                self.moves_remaining,
                self.countdown.remaining(),
            );
            self.phase = Phase::Won;
            log::debug!("won after {} moves, score {}", self.moves_used, self.score);
            ActionOutcome::Won
        } else if self.moves_remaining == 0 {
            self.countdown.stop();
            self.phase = Phase::LostMoves;
            log::debug!("out of moves");
            ActionOutcome::OutOfMoves
        } else {
            ActionOutcome::Moved
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
