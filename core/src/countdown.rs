use serde::{Deserialize, Serialize};

use crate::Count;

/// Whole-second countdown driven by explicit ticks.
///
/// The owner decides where ticks come from: a wall clock in play, nothing at all in a
/// scripted playtest. Starting and stopping are idempotent.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Countdown {
    remaining: Count,
    running: bool,
}

impl Countdown {
    pub const fn new(seconds: Count) -> Self {
        Self {
            remaining: seconds,
            running: false,
        }
    }

    pub const fn remaining(&self) -> Count {
        self.remaining
    }

    pub const fn is_running(&self) -> bool {
        self.running
    }

    pub fn start(&mut self) {
        if !self.running && self.remaining > 0 {
            self.running = true;
        }
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Consumes one second. Returns `true` exactly once, on the tick that reaches zero.
    pub fn tick(&mut self) -> bool {
        if !self.running {
            return false;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_once_and_stops() {
        let mut countdown = Countdown::new(2);
        countdown.start();

        assert!(!countdown.tick());
        assert!(countdown.tick());
        assert!(!countdown.is_running());
        assert!(!countdown.tick());
        assert_eq!(countdown.remaining(), 0);
    }

    #[test]
    fn stopped_countdown_ignores_ticks() {
        let mut countdown = Countdown::new(5);
        assert!(!countdown.tick());
        assert_eq!(countdown.remaining(), 5);

        countdown.start();
        countdown.stop();
        countdown.stop();
        assert!(!countdown.tick());
        assert_eq!(countdown.remaining(), 5);
    }
}
