use std::time::{Duration, Instant};

/// A tick event. `seq` counts from 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    pub seq: u64,
}

/// Cancellable repeating timer driven by the UI loop.
///
/// The ticker never sleeps or spawns anything: the owner calls [`Ticker::poll`]
/// once per frame and asks the event loop to wake it up after
/// [`Ticker::time_until_next`]. The first poll fires immediately; after that
/// each tick schedules the next one `interval` later.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
    seq: u64,
    cancelled: bool,
}

impl Ticker {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
            seq: 0,
            cancelled: false,
        }
    }

    /// Fire at most one tick if one is due. Missed ticks are not replayed.
    pub fn poll(&mut self, now: Instant) -> Option<Tick> {
        if self.cancelled {
            return None;
        }
        if let Some(due) = self.next_due {
            if now < due {
                return None;
            }
        }
        let tick = Tick { seq: self.seq };
        self.seq += 1;
        self.next_due = Some(now + self.interval);
        Some(tick)
    }

    /// How long the caller may idle before the next poll is useful.
    /// `None` once cancelled.
    pub fn time_until_next(&self, now: Instant) -> Option<Duration> {
        if self.cancelled {
            return None;
        }
        Some(
            self.next_due
                .map(|due| due.saturating_duration_since(now))
                .unwrap_or(Duration::ZERO),
        )
    }

    pub fn cancel(&mut self) {
        self.cancelled = true;
        self.next_due = None;
    }
}
