//! Clock abstraction so the scheduler runs on any monotonic timer.
//!
//! Implement these for your platform's time types (embassy, fugit, an RTIC
//! monotonic, a SysTick counter) or for a simulated clock in tests.
//!
//! Triggers compare elapsed time in whole milliseconds. Finer clocks are
//! fine; anything below a millisecond is simply not observed.

/// The monotonic clock, read once per scheduler iteration.
pub trait TimeSource<I: TimeInstant> {
    fn now(&self) -> I;
}

/// A span of time with millisecond resolution or better.
pub trait TimeDuration: Copy + PartialEq {
    /// The empty span.
    const ZERO: Self;

    /// Whole milliseconds, rounded down.
    fn as_millis(&self) -> u64;

    fn from_millis(millis: u64) -> Self;

    /// `self - other`, clamped at [`ZERO`](Self::ZERO).
    fn saturating_sub(self, other: Self) -> Self;

    /// Rounds up to the next whole millisecond.
    ///
    /// A sub-millisecond wait would end before any trigger can observe the
    /// elapsed time, so idle requests are rounded with this.
    fn ceil_millis(self) -> Self {
        let millis = self.as_millis();
        let floor = Self::from_millis(millis);
        if floor == self {
            self
        } else {
            Self::from_millis(millis + 1)
        }
    }
}

/// A reading of the clock.
///
/// Counters that wrap (a `u32` of milliseconds wraps after about 49.7 days)
/// must implement both methods with wrapping arithmetic so that elapsed
/// times stay correct across the wrap. Counters that cannot wrap in
/// practice may saturate instead.
pub trait TimeInstant: Copy {
    type Duration: TimeDuration;

    /// Time elapsed since `earlier`.
    fn duration_since(&self, earlier: Self) -> Self::Duration;

    /// The instant `duration` later, or `None` if it cannot be represented.
    /// A `None` makes triggers resynchronize to the current reading.
    fn checked_add(self, duration: Self::Duration) -> Option<Self>;
}
