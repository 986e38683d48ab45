use alloc::format;
use alloc::string::String;
use core::fmt;

use crate::*;

/// Problem found by the structural check of the editor board.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BuildIssue {
    NoArrows,
    /// No hole and no drill that could leave one behind.
    NoHoles,
    /// Blocks and cracked tiles outnumber or undershoot the holes. Holes never fill, so this
    /// is only a hint and does not stop a playtest.
    ObstacleHoleMismatch { obstacles: Count, holes: Count },
}

impl fmt::Display for BuildIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoArrows => write!(f, "add at least one arrow tile"),
            Self::NoHoles => write!(f, "add at least one hole or drill"),
            Self::ObstacleHoleMismatch { obstacles, holes } => write!(
                f,
                "{} pushable tiles, {} holes - check the level is still solvable",
                obstacles, holes
            ),
        }
    }
}

/// Tile counts of the board in the editor, the first blocking issue and an optional hint.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BuildReport {
    pub arrows: Count,
    pub holes: Count,
    pub drills: Count,
    pub obstacles: Count,
    pub issue: Option<BuildIssue>,
    pub hint: Option<BuildIssue>,
}

impl BuildReport {
    pub fn of(board: &Board) -> Self {
        let arrows = board.count(Tile::is_arrow);
        let holes = board.count(|tile| tile == Tile::Hole);
        let drills = board.count(|tile| tile == Tile::Drill);
        let obstacles = board.count(|tile| matches!(tile, Tile::Block | Tile::Cracked));

        // a struck drill leaves a hole behind
        let issue = if arrows == 0 {
            Some(BuildIssue::NoArrows)
        } else if holes + drills == 0 {
            Some(BuildIssue::NoHoles)
        } else {
            None
        };

        let hint = (obstacles > 0 && obstacles != holes)
            .then_some(BuildIssue::ObstacleHoleMismatch { obstacles, holes });

        Self {
            arrows,
            holes,
            drills,
            obstacles,
            issue,
            hint,
        }
    }

    pub fn is_playable(&self) -> bool {
        self.issue.is_none()
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    NoChange,
    Changed,
}

impl EditOutcome {
    /// Whether the board or budget actually changed
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

/// Level editor with its playtest harness.
///
/// A board counts as verified only after it has been won in a playtest since its last
/// edit, and only a verified board can be published.
#[derive(Clone, Debug, PartialEq)]
pub struct BuilderSession {
    board: Board,
    selected: Tile,
    verified: bool,
    title: String,
    max_moves: Count,
    timer_seconds: Count,
    playtest: Option<Session>,
}

impl BuilderSession {
    pub fn new(max_moves: Count, timer_seconds: Count) -> Result<Self> {
        if max_moves == 0 || timer_seconds == 0 {
            return Err(GameError::InvalidLevel);
        }

        Ok(Self {
            board: Board::new(),
            selected: Tile::Blank,
            verified: false,
            title: String::new(),
            max_moves,
            timer_seconds,
            playtest: None,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn selected(&self) -> Tile {
        self.selected
    }

    pub fn is_verified(&self) -> bool {
        self.verified
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn max_moves(&self) -> Count {
        self.max_moves
    }

    pub fn timer_seconds(&self) -> Count {
        self.timer_seconds
    }

    pub fn is_testing(&self) -> bool {
        self.playtest.is_some()
    }

    pub fn playtest(&self) -> Option<&Session> {
        self.playtest.as_ref()
    }

    pub fn check(&self) -> BuildReport {
        BuildReport::of(&self.board)
    }

    pub fn select_tile(&mut self, tile: Tile) {
        self.selected = tile;
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Places the selected tile. Any edit invalidates a previous verification.
    pub fn paint(&mut self, coords: Coord2) -> Result<EditOutcome> {
        let coords = self.board.validate_coords(coords)?;
        self.check_editable()?;

        self.unverify();
        if self.board[coords] == self.selected {
            return Ok(EditOutcome::NoChange);
        }

        self.board[coords] = self.selected;
        Ok(EditOutcome::Changed)
    }

    pub fn clear(&mut self) -> Result<()> {
        self.check_editable()?;
        self.board = Board::new();
        self.unverify();
        Ok(())
    }

    /// Changes the move and time budget; verification only holds for the budget it was won with.
    pub fn set_limits(&mut self, max_moves: Count, timer_seconds: Count) -> Result<EditOutcome> {
        if max_moves == 0 || timer_seconds == 0 {
            return Err(GameError::InvalidLevel);
        }
        self.check_editable()?;

        if (max_moves, timer_seconds) == (self.max_moves, self.timer_seconds) {
            return Ok(EditOutcome::NoChange);
        }

        self.max_moves = max_moves;
        self.timer_seconds = timer_seconds;
        self.unverify();
        Ok(EditOutcome::Changed)
    }

    /// Starts playing a copy of the editor board with the builder's budget.
    pub fn start_playtest(&mut self) -> Result<()> {
        self.check_editable()?;
        let report = self.check();
        if let Some(issue) = report.issue {
            return Err(GameError::NotPlayable(issue));
        }
        if let Some(hint) = report.hint {
            log::debug!("playtest despite hint: {}", hint);
        }

        let draft = Level::new(
            self.title.clone(),
            self.board.clone(),
            self.max_moves,
            self.timer_seconds,
            "",
        )?;
        log::debug!("playtest started");
        self.playtest = Some(Session::with_level(draft));
        Ok(())
    }

    /// Abandons the running playtest. Verification is left as it was.
    pub fn stop_playtest(&mut self) {
        if let Some(mut session) = self.playtest.take() {
            session.stop();
            log::debug!("playtest stopped in {:?}", session.phase());
        }
    }

    /// Taps a cell of the playtest board. The harness does not animate, so the action is
    /// settled immediately.
    pub fn playtest_interact(&mut self, coords: Coord2) -> Result<ActionOutcome> {
        let Some(session) = self.playtest.as_mut() else {
            return Ok(ActionOutcome::NoChange);
        };

        let outcome = session.interact(coords)?;
        session.settle();
        self.finish_if_over();
        Ok(outcome)
    }

    pub fn playtest_tick(&mut self) -> TickOutcome {
        let Some(session) = self.playtest.as_mut() else {
            return TickOutcome::NoChange;
        };

        let outcome = session.tick();
        self.finish_if_over();
        outcome
    }

    /// Plays `taps` in order on a fresh playtest without any clock and reports where it ended.
    /// A script that neither wins nor loses ends in `Playing` and the playtest is stopped.
    pub fn playtest_script(&mut self, taps: &[Coord2]) -> Result<Phase> {
        self.start_playtest()?;

        for &coords in taps {
            match self.playtest_interact(coords)? {
                ActionOutcome::Won => return Ok(Phase::Won),
                ActionOutcome::OutOfMoves => return Ok(Phase::LostMoves),
                ActionOutcome::Moved | ActionOutcome::NoChange => {}
            }
        }

        self.stop_playtest();
        Ok(Phase::Playing)
    }

    /// Produces the level to hand to the host. Refused unless verified.
    pub fn publish(&mut self, author_name: &str) -> Result<Level> {
        self.stop_playtest();
        if !self.verified {
            return Err(GameError::NotVerified);
        }

        let title = match self.title.trim() {
            "" => format!("Puzzle by {}", author_name),
            title => String::from(title),
        };
        log::debug!("publishing {:?} by {}", title, author_name);
        Level::new(
            title,
            self.board.clone(),
            self.max_moves,
            self.timer_seconds,
            author_name,
        )
    }

    fn finish_if_over(&mut self) {
        let Some(phase) = self.playtest.as_ref().map(Session::phase) else {
            return;
        };

        match phase {
            Phase::Won => {
                log::debug!("playtest won, level verified");
                self.verified = true;
                self.stop_playtest();
            }
            Phase::LostMoves | Phase::LostTime => self.stop_playtest(),
            Phase::Idle | Phase::Playing => {}
        }
    }

    fn unverify(&mut self) {
        if self.verified {
            log::debug!("level changed, verification cleared");
            self.verified = false;
        }
    }

    fn check_editable(&self) -> Result<()> {
        if self.is_testing() {
            Err(GameError::Testing)
        } else {
            Ok(())
        }
    }
}

impl Default for BuilderSession {
    fn default() -> Self {
        Self {
            board: Board::new(),
            selected: Tile::Blank,
            verified: false,
            title: String::new(),
            max_moves: DEFAULT_MAX_MOVES,
            timer_seconds: DEFAULT_TIMER_SECONDS,
            playtest: None,
        }
    }
}
