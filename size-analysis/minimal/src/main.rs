#![no_std]
#![no_main]

use cortex_m_rt::entry;
use panic_halt as _;
use rainbow_heartbeat::{
    Config, HeartbeatSink, Idle, PinState, PixelSink, Rainbow, RainbowScheduler, Rgba8,
    TimeDuration, TimeInstant, TimeSource,
};

// ============================================================================
// Minimal Time Types
// ============================================================================

/// Minimal 32-bit millisecond duration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Duration32(u32);

impl TimeDuration for Duration32 {
    const ZERO: Self = Duration32(0);

    fn as_millis(&self) -> u64 {
        self.0 as u64
    }

    fn from_millis(millis: u64) -> Self {
        Duration32(millis as u32)
    }

    fn saturating_sub(self, other: Self) -> Self {
        Duration32(self.0.saturating_sub(other.0))
    }
}

/// Minimal 32-bit millisecond instant; the counter wraps after ~49.7 days
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Instant32(u32);

impl TimeInstant for Instant32 {
    type Duration = Duration32;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        Duration32(self.0.wrapping_sub(earlier.0))
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        Some(Instant32(self.0.wrapping_add(duration.0)))
    }
}

// ============================================================================
// Minimal Outputs
// ============================================================================

/// Strip that discards every frame, for measuring library overhead
pub struct MinimalStrip;

impl PixelSink for MinimalStrip {
    type Error = ();

    fn write(&mut self, pixels: &[Rgba8]) -> Result<(), Self::Error> {
        core::hint::black_box(pixels);
        Ok(())
    }
}

pub struct MinimalHeartbeat;

impl HeartbeatSink for MinimalHeartbeat {
    fn set_level(&mut self, level: PinState) {
        core::hint::black_box(level);
    }
}

/// Idle hook that advances the fake clock instead of sleeping
pub struct MinimalIdle<'a>(&'a MinimalTimeSource);

impl Idle<Duration32> for MinimalIdle<'_> {
    fn idle(&mut self, max: Duration32) {
        self.0.now.set(Instant32(self.0.now.get().0.wrapping_add(max.0)));
    }
}

// ============================================================================
// Minimal TimeSource Implementation
// ============================================================================

pub struct MinimalTimeSource {
    now: core::cell::Cell<Instant32>,
}

impl TimeSource<Instant32> for MinimalTimeSource {
    fn now(&self) -> Instant32 {
        self.now.get()
    }
}

// ============================================================================
// Scheduler
// ============================================================================

const CONFIG: Config = Config::DEFAULT;

// This function uses the library to prevent optimizer from removing code
#[inline(never)]
fn run_scheduler() -> ! {
    let time_source = MinimalTimeSource {
        now: core::cell::Cell::new(Instant32(0)),
    };
    let mut idle = MinimalIdle(&time_source);

    let scheduler: Result<RainbowScheduler<Instant32, _, _, _, Rainbow, 10>, _> =
        RainbowScheduler::new(CONFIG, MinimalStrip, MinimalHeartbeat, &time_source);

    match scheduler {
        Ok(mut scheduler) => scheduler.run(&mut idle),
        Err(_) => loop {
            cortex_m::asm::nop();
        },
    }
}

#[entry]
fn main() -> ! {
    // Halt inside the loop - this is a size analysis binary, not meant to run
    run_scheduler()
}
