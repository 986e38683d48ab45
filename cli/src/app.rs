use std::io::Write;
use tileslide_core::{ActionOutcome, EditOutcome, TickOutcome};
use tileslide_protocol::{Message, ViewMessage};
use tileslide_worker::{Host, KvStore};
use web_time::Instant;

use crate::client::{Client, Screen};
use crate::clock::{Clock, Pacer};
use crate::command::{self, Command};
use crate::render;
use crate::settings::Settings;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Flow {
    Continue,
    Quit,
}

/// Terminal front end wired to an in-process host.
pub(crate) struct App<S> {
    client: Client,
    host: Host<S>,
    clock: Clock,
    pacer: Pacer,
}

impl<S: KvStore> App<S> {
    pub fn new(host: Host<S>, settings: &Settings, now: Instant) -> anyhow::Result<Self> {
        let mut app = Self {
            client: Client::new(settings.builder),
            host,
            clock: Clock::new(now),
            pacer: Pacer::new(settings.settle_ms),
        };
        app.send(ViewMessage::InitialData)?;
        Ok(app)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Sends a message over the JSON boundary and applies the reply, if any.
    fn send(&mut self, message: ViewMessage) -> anyhow::Result<()> {
        let json = message.encode()?;
        log::trace!("view -> host {}", json);
        if let Some(reply) = self.host.handle_json(&json)? {
            log::trace!("host -> view {}", reply);
            self.client.apply_json(&reply)?;
        }
        Ok(())
    }

    /// Catches up with the wall clock: due settles first, then elapsed seconds.
    fn advance(&mut self, now: Instant, out: &mut impl Write) -> anyhow::Result<()> {
        if self.pacer.is_due(now) {
            self.client.settle();
        }

        let ticks = self.clock.elapsed_ticks(now);
        if self.client.tick(ticks) == TickOutcome::TimeUp {
            self.pacer.cancel();
            writeln!(out, "Time's up!")?;
        }
        Ok(())
    }

    pub fn execute(
        &mut self,
        command: Command,
        now: Instant,
        out: &mut impl Write,
    ) -> anyhow::Result<Flow> {
        self.advance(now, out)?;

        match command {
            Command::Menu => {
                self.client.go_to_menu();
                self.send(ViewMessage::GetCustomLevel)?;
                write!(out, "{}", render::menu(&self.client.menu()))?;
            }
            Command::Play => {
                self.client.play()?;
                self.restart_clock(now);
                self.show(out)?;
            }
            Command::Build => {
                self.client.build()?;
                self.show(out)?;
            }
            Command::Tap { row, col } => {
                let outcome = self.client.tap((row, col))?;
                self.after_action(outcome, now, out)?;
            }
            Command::Settle => {
                self.pacer.cancel();
                if !self.client.settle() {
                    writeln!(out, "Nothing in flight")?;
                }
            }
            Command::Reset => {
                self.client.reset()?;
                self.restart_clock(now);
                self.show(out)?;
            }
            Command::Board => self.show(out)?,
            Command::Leaders => {
                self.send(ViewMessage::FetchScores)?;
                write!(out, "{}", render::leaderboard(self.client.leaderboard()))?;
            }
            Command::Submit { name } => {
                let name = command::join_words(&name);
                let message = self.client.submit(name.as_deref())?;
                self.send(message)?;
                writeln!(out, "Score submitted")?;
                write!(out, "{}", render::leaderboard(self.client.leaderboard()))?;
                self.client.go_to_menu();
            }
            Command::Paint { row, col } => {
                let outcome = self.client.builder()?.paint((row, col))?;
                self.show_edit(outcome, out)?;
            }
            Command::Select { tile } => self.client.builder()?.select_tile(tile),
            Command::Limits {
                max_moves,
                timer_seconds,
            } => {
                let outcome = self.client.builder()?.set_limits(max_moves, timer_seconds)?;
                self.show_edit(outcome, out)?;
            }
            Command::Title { text } => self
                .client
                .builder()?
                .set_title(command::join_words(&text).unwrap_or_default()),
            Command::Clear => {
                self.client.builder()?.clear()?;
                self.show(out)?;
            }
            Command::Test => {
                self.client.builder()?.start_playtest()?;
                self.restart_clock(now);
                self.show(out)?;
            }
            Command::Stop => {
                self.client.builder()?.stop_playtest();
                self.show(out)?;
            }
            Command::Publish => {
                let message = self.client.publish()?;
                self.send(message)?;
                writeln!(out, "Level published")?;
                self.client.go_to_menu();
                write!(out, "{}", render::menu(&self.client.menu()))?;
            }
            Command::Help => write!(out, "{}", command::help())?,
            Command::Quit => {
                self.client.go_to_menu();
                return Ok(Flow::Quit);
            }
        }
        Ok(Flow::Continue)
    }

    fn restart_clock(&mut self, now: Instant) {
        self.clock.restart(now);
        self.pacer.cancel();
    }

    fn after_action(
        &mut self,
        outcome: ActionOutcome,
        now: Instant,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        if !outcome.has_update() {
            writeln!(out, "Nothing happens")?;
            return Ok(());
        }

        self.pacer.moved(now);
        // a zero delay settles right away
        if self.pacer.is_due(now) {
            self.client.settle();
        }
        self.show(out)?;

        match (outcome, self.client.screen()) {
            (ActionOutcome::Won, Screen::Play(session)) => writeln!(
                out,
                "Solved with score {}! Use submit [NAME] to record it.",
                session.score()
            )?,
            (ActionOutcome::Won, _) => writeln!(out, "Test run solved, level verified")?,
            (ActionOutcome::OutOfMoves, _) => writeln!(out, "Out of moves")?,
            (ActionOutcome::Moved | ActionOutcome::NoChange, _) => {}
        }
        Ok(())
    }

    fn show_edit(&self, outcome: EditOutcome, out: &mut impl Write) -> anyhow::Result<()> {
        if outcome.has_update() {
            self.show(out)
        } else {
            writeln!(out, "Nothing changes")?;
            Ok(())
        }
    }

    fn show(&self, out: &mut impl Write) -> anyhow::Result<()> {
        let text = match self.client.screen() {
            Screen::Menu => render::menu(&self.client.menu()),
            Screen::Play(session) => render::session(session),
            Screen::Build(builder) => render::builder(builder),
        };
        write!(out, "{}", text)?;
        Ok(())
    }
}
