//! Polled periodic trigger.

use crate::time::{TimeDuration, TimeInstant};

/// Fires once per period when polled; never blocks.
///
/// Deadlines advance by exactly one period per firing so the average rate
/// does not drift with loop jitter. If the loop falls a whole period or more
/// behind, the missed ticks are dropped and the trigger resynchronizes to
/// the polling instant.
#[derive(Debug, Clone, Copy)]
pub struct Trigger<I: TimeInstant> {
    period: I::Duration,
    last: I,
}

impl<I: TimeInstant> Trigger<I> {
    /// Creates a trigger whose first tick is due one period after `now`.
    pub fn new(period: I::Duration, now: I) -> Self {
        Self { period, last: now }
    }

    /// Returns true and schedules the next tick if a tick is due at `now`.
    pub fn poll(&mut self, now: I) -> bool {
        let period = self.period.as_millis();
        if now.duration_since(self.last).as_millis() < period {
            return false;
        }

        self.last = match self.last.checked_add(self.period) {
            Some(deadline) if now.duration_since(deadline).as_millis() < period => deadline,
            _ => {
                debug!("trigger overrun, resync after {} ms", now.duration_since(self.last).as_millis());
                now
            }
        };
        true
    }

    /// Time left until the next tick, zero if one is already due.
    ///
    /// Rounded up to whole milliseconds, the resolution `poll` compares at,
    /// so waiting this long always makes the tick due.
    pub fn remaining(&self, now: I) -> I::Duration {
        self.period
            .saturating_sub(now.duration_since(self.last))
            .ceil_millis()
    }
}
