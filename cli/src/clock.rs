use std::time::Duration;
use web_time::Instant;

/// Turns wall-clock time into whole countdown ticks, carrying the leftover fraction.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Clock {
    last: Instant,
    carry: Duration,
}

impl Clock {
    pub fn new(now: Instant) -> Self {
        Self {
            last: now,
            carry: Duration::ZERO,
        }
    }

    pub fn restart(&mut self, now: Instant) {
        *self = Self::new(now);
    }

    /// Seconds that fully elapsed since the previous call.
    pub fn elapsed_ticks(&mut self, now: Instant) -> u32 {
        let pending = self.carry + now.saturating_duration_since(self.last);
        self.last = now;

        let ticks = pending.as_secs();
        self.carry = pending - Duration::from_secs(ticks);
        u32::try_from(ticks).unwrap_or(u32::MAX)
    }
}

/// Keeps the last move in flight for a fixed delay before input is accepted again.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Pacer {
    delay: Duration,
    since: Option<Instant>,
}

impl Pacer {
    pub fn new(settle_ms: u64) -> Self {
        Self {
            delay: Duration::from_millis(settle_ms),
            since: None,
        }
    }

    pub fn moved(&mut self, now: Instant) {
        self.since = Some(now);
    }

    pub fn cancel(&mut self) {
        self.since = None;
    }

    /// Whether the move started at [`Pacer::moved`] has played out by `now`.
    pub fn is_due(&mut self, now: Instant) -> bool {
        match self.since {
            Some(since) if now.saturating_duration_since(since) >= self.delay => {
                self.since = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractions_carry_over() {
        let start = Instant::now();
        let mut clock = Clock::new(start);

        assert_eq!(clock.elapsed_ticks(start + Duration::from_millis(700)), 0);
        assert_eq!(clock.elapsed_ticks(start + Duration::from_millis(1400)), 1);
        assert_eq!(clock.elapsed_ticks(start + Duration::from_millis(3500)), 2);
    }

    #[test]
    fn long_gaps_become_many_ticks() {
        let start = Instant::now();
        let mut clock = Clock::new(start);

        assert_eq!(clock.elapsed_ticks(start + Duration::from_millis(86_400_250)), 86_400);
        assert_eq!(clock.elapsed_ticks(start + Duration::from_millis(86_400_900)), 0);
        assert_eq!(clock.elapsed_ticks(start + Duration::from_millis(86_401_300)), 1);
    }

    #[test]
    fn restart_drops_the_carry() {
        let start = Instant::now();
        let mut clock = Clock::new(start);
        clock.elapsed_ticks(start + Duration::from_millis(900));

        clock.restart(start + Duration::from_millis(900));
        assert_eq!(clock.elapsed_ticks(start + Duration::from_millis(1500)), 0);
    }

    #[test]
    fn pacer_waits_for_the_delay() {
        let start = Instant::now();
        let mut pacer = Pacer::new(300);
        assert!(!pacer.is_due(start));

        pacer.moved(start);
        assert!(!pacer.is_due(start + Duration::from_millis(100)));
        assert!(pacer.is_due(start + Duration::from_millis(300)));
        assert!(!pacer.is_due(start + Duration::from_millis(400)));
    }

    #[test]
    fn zero_delay_is_due_at_once() {
        let start = Instant::now();
        let mut pacer = Pacer::new(0);
        pacer.moved(start);
        assert!(pacer.is_due(start));
    }
}
