use std::time::{Duration, Instant};

/// Fixed-interval timer driven by polling.
///
/// A paused ticker never fires. Missed intervals are not replayed.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_tick: Option<Instant>,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_tick: None,
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn is_running(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Returns false if the ticker was already running.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.next_tick.is_some() {
            return false;
        }
        self.next_tick = Some(now + self.interval);
        true
    }

    /// Returns false if the ticker was already paused.
    pub fn pause(&mut self) -> bool {
        self.next_tick.take().is_some()
    }

    /// Returns true at most once per call when a deadline has passed.
    ///
    /// Deadlines stay on the interval grid while polls are merely late; once
    /// a whole interval is missed the grid restarts from `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_tick {
            Some(deadline) if now >= deadline => {
                let next = deadline + self.interval;
                self.next_tick = Some(if now < next { next } else { now + self.interval });
                true
            }
            _ => false,
        }
    }

    /// Time left until the next deadline, if running.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.next_tick
            .map(|deadline| deadline.saturating_duration_since(now))
    }
}
