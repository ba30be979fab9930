//! Step clock for timer-driven execution.
//!
//! The datapath never sleeps. A driver (the terminal stepper, the CLI, a
//! browser `setInterval`) owns a [`Clock`], polls it, and calls
//! [`crate::cpu::Datapath::tick`] whenever it fires.

use std::time::{Duration, Instant};

/// A periodic timer that can be started and stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Clock {
    interval: Duration,
    next_tick: Option<Instant>,
}

impl Clock {
    /// A stopped clock firing every `interval` once started.
    pub fn new(interval: Duration) -> Self {
        Self { interval, next_tick: None }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Start ticking; the first tick is one interval after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_tick = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_tick = None;
    }

    pub fn is_running(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Returns true, and schedules the following tick, if a tick is due.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_tick {
            Some(next) if now >= next => {
                self.next_tick = Some(now + self.interval);
                true
            }
            _ => false,
        }
    }

    /// Time left before the next tick, `None` while stopped.
    pub fn until_next_tick(&self, now: Instant) -> Option<Duration> {
        self.next_tick.map(|next| next.saturating_duration_since(now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_clock_never_fires() {
        let mut clock = Clock::new(Duration::from_millis(10));
        let now = Instant::now();
        assert!(!clock.poll(now + Duration::from_secs(5)));
        assert_eq!(clock.until_next_tick(now), None);
    }

    #[test]
    fn test_fires_after_interval() {
        let mut clock = Clock::new(Duration::from_millis(100));
        let t0 = Instant::now();
        clock.start(t0);

        assert!(!clock.poll(t0 + Duration::from_millis(50)));
        assert!(clock.poll(t0 + Duration::from_millis(100)));
        // rescheduled relative to the poll
        assert!(!clock.poll(t0 + Duration::from_millis(150)));
        assert!(clock.poll(t0 + Duration::from_millis(200)));
    }

    #[test]
    fn test_stop() {
        let mut clock = Clock::new(Duration::from_millis(1));
        let t0 = Instant::now();
        clock.start(t0);
        assert!(clock.is_running());
        clock.stop();
        assert!(!clock.is_running());
        assert!(!clock.poll(t0 + Duration::from_secs(1)));
    }

    #[test]
    fn test_until_next_tick() {
        let mut clock = Clock::new(Duration::from_millis(100));
        let t0 = Instant::now();
        clock.start(t0);
        assert_eq!(clock.until_next_tick(t0 + Duration::from_millis(30)), Some(Duration::from_millis(70)));
        assert_eq!(clock.until_next_tick(t0 + Duration::from_millis(300)), Some(Duration::ZERO));
    }
}
