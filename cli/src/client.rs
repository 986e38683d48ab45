use anyhow::bail;
use tileslide_core::{
    ActionOutcome, BuilderSession, Coord2, Leaderboard, Level, Session, TickOutcome,
};
use tileslide_protocol::{
    HostMessage, LevelRecord, Message, ProtocolError, ScoreRecord, ViewMessage,
    decode_leaderboard, decode_level,
};

use crate::settings::BuilderDefaults;

/// What the player is looking at. Playing and building never run at the same time.
#[derive(Clone, Debug)]
pub(crate) enum Screen {
    Menu,
    Play(Session),
    Build(BuilderSession),
}

/// Main menu contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct MenuView {
    /// Title and creator of the published level, if there is one
    pub level: Option<(String, String)>,
    /// Best score on the leaderboard, `--` when nobody has finished yet
    pub best_score: String,
}

impl MenuView {
    pub fn can_play(&self) -> bool {
        self.level.is_some()
    }
}

/// The view's mirror of the host data plus the active screen.
#[derive(Clone, Debug)]
pub(crate) struct Client {
    username: String,
    level: Option<Level>,
    leaderboard: Leaderboard,
    screen: Screen,
    builder_defaults: BuilderDefaults,
}

impl Client {
    pub fn new(builder_defaults: BuilderDefaults) -> Self {
        Self {
            username: tileslide_protocol::ANONYMOUS_USERNAME.to_string(),
            level: None,
            leaderboard: Leaderboard::new(),
            screen: Screen::Menu,
            builder_defaults,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn menu(&self) -> MenuView {
        MenuView {
            level: self
                .level
                .as_ref()
                .map(|level| (level.display_title(), level.display_author().to_string())),
            best_score: self
                .leaderboard
                .best_score()
                .map_or_else(|| "--".to_string(), |score| score.to_string()),
        }
    }

    /// Decodes and applies a raw host message.
    pub fn apply_json(&mut self, json: &str) -> Result<(), ProtocolError> {
        match HostMessage::decode(json) {
            Ok(message) => self.apply(message),
            Err(ProtocolError::UnknownMessage(kind)) => {
                tileslide_protocol::report_unknown(&kind);
                Err(ProtocolError::UnknownMessage(kind))
            }
            Err(err) => Err(err),
        }
    }

    pub fn apply(&mut self, message: HostMessage) -> Result<(), ProtocolError> {
        use HostMessage::*;

        match message {
            SetInitialData {
                username,
                leaderboard: _,
                custom_level_data,
                custom_level_leaderboard,
            } => {
                self.username = username;
                self.level = decode_level(&custom_level_data)?;
                self.leaderboard = decode_leaderboard(&custom_level_leaderboard)?;
                log::debug!(
                    "initial data for {}: level {}, {} scores",
                    self.username,
                    self.level.is_some(),
                    self.leaderboard.len()
                );
            }
            UpdateCustomLevelLeaderboard {
                custom_level_leaderboard,
            } => self.leaderboard = decode_leaderboard(&custom_level_leaderboard)?,
            UpdateCustomLevel { custom_level_data } => {
                self.level = decode_level(&custom_level_data)?;
            }
            UpdateUsername { username } => self.username = username,
            UpdateLeaderboard { .. } => log::debug!("campaign leaderboard ignored"),
        }
        Ok(())
    }

    pub fn go_to_menu(&mut self) {
        if let Screen::Build(builder) = &mut self.screen {
            builder.stop_playtest();
        }
        self.screen = Screen::Menu;
    }

    pub fn play(&mut self) -> anyhow::Result<()> {
        let Some(level) = self.level.clone() else {
            bail!("No level has been published yet, build one first");
        };

        log::debug!("playing {:?}", level.display_title());
        self.screen = Screen::Play(Session::with_level(level));
        Ok(())
    }

    pub fn build(&mut self) -> anyhow::Result<&mut BuilderSession> {
        if !matches!(self.screen, Screen::Build(_)) {
            let BuilderDefaults {
                max_moves,
                timer_seconds,
            } = self.builder_defaults;
            self.screen = Screen::Build(BuilderSession::new(max_moves, timer_seconds)?);
        }
        self.builder()
    }

    pub fn builder(&mut self) -> anyhow::Result<&mut BuilderSession> {
        match &mut self.screen {
            Screen::Build(builder) => Ok(builder),
            _ => bail!("Not in the builder"),
        }
    }

    /// The session the clock drives: the played level or the running playtest.
    pub fn session(&self) -> Option<&Session> {
        match &self.screen {
            Screen::Play(session) => Some(session),
            Screen::Build(builder) => builder.playtest(),
            Screen::Menu => None,
        }
    }

    pub fn reset(&mut self) -> anyhow::Result<()> {
        match &mut self.screen {
            Screen::Play(session) => session.reset(),
            Screen::Build(builder) if builder.is_testing() => builder.start_playtest()?,
            _ => bail!("Nothing to reset"),
        }
        Ok(())
    }

    pub fn tap(&mut self, coords: Coord2) -> anyhow::Result<ActionOutcome> {
        match &mut self.screen {
            Screen::Play(session) => Ok(session.interact(coords)?),
            Screen::Build(builder) if builder.is_testing() => {
                Ok(builder.playtest_interact(coords)?)
            }
            Screen::Build(_) => bail!("Start a test run first, or use paint to edit"),
            Screen::Menu => bail!("Nothing to tap on the menu"),
        }
    }

    pub fn settle(&mut self) -> bool {
        match &mut self.screen {
            Screen::Play(session) => session.settle(),
            // the playtest settles every move itself
            _ => false,
        }
    }

    /// Applies `seconds` of elapsed time, stopping early once the clock runs out.
    pub fn tick(&mut self, seconds: u32) -> TickOutcome {
        let mut last = TickOutcome::NoChange;
        for _ in 0..seconds {
            let outcome = match &mut self.screen {
                Screen::Play(session) => session.tick(),
                Screen::Build(builder) => builder.playtest_tick(),
                Screen::Menu => TickOutcome::NoChange,
            };
            match outcome {
                TickOutcome::NoChange => break,
                TickOutcome::TimeUp => return outcome,
                TickOutcome::Ticked => last = outcome,
            }
        }
        last
    }

    /// Score submission for the won session; an omitted name falls back to the username.
    pub fn submit(&self, player_name: Option<&str>) -> anyhow::Result<ViewMessage> {
        let Screen::Play(session) = &self.screen else {
            bail!("Nothing to submit");
        };

        let entry = session.submission(player_name.unwrap_or(&self.username))?;
        Ok(ViewMessage::AddCustomLevelScore(ScoreRecord::from(entry)))
    }

    pub fn publish(&mut self) -> anyhow::Result<ViewMessage> {
        let username = self.username.clone();
        let level = self.builder()?.publish(&username)?;
        Ok(ViewMessage::AddCustomLevel {
            level_data: LevelRecord::from_level(&level),
        })
    }
}
