//! Shared test infrastructure for rainbow-heartbeat integration tests

#![allow(dead_code)] // Items used across multiple test files; Rust analyzes per-file

use rainbow_heartbeat::{
    HeartbeatSink, Idle, PinState, PixelSink, Rgba8, TimeDuration, TimeInstant, TimeSource,
};

// ============================================================================
// Mock Time Types
// ============================================================================

/// Mock duration type for testing (wraps milliseconds)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestDuration(pub u64);

impl TimeDuration for TestDuration {
    const ZERO: Self = TestDuration(0);

    fn as_millis(&self) -> u64 {
        self.0
    }

    fn from_millis(millis: u64) -> Self {
        TestDuration(millis)
    }

    fn saturating_sub(self, other: Self) -> Self {
        TestDuration(self.0.saturating_sub(other.0))
    }
}

/// Mock instant type for testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct TestInstant(pub u64);

impl TimeInstant for TestInstant {
    type Duration = TestDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        TestDuration(self.0.saturating_sub(earlier.0))
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(TestInstant)
    }
}

// ============================================================================
// Mock Time Source
// ============================================================================

/// Mock time source with controllable time advancement
pub struct MockTimeSource {
    current_time: core::cell::Cell<TestInstant>,
}

impl MockTimeSource {
    pub fn new() -> Self {
        Self {
            current_time: core::cell::Cell::new(TestInstant(0)),
        }
    }

    /// Advance time by the given duration
    pub fn advance(&self, duration: TestDuration) {
        let current = self.current_time.get();
        self.current_time.set(TestInstant(current.0 + duration.0));
    }

    pub fn set_time(&self, time: TestInstant) {
        self.current_time.set(time);
    }

    pub fn millis(&self) -> u64 {
        self.current_time.get().0
    }
}

impl TimeSource<TestInstant> for MockTimeSource {
    fn now(&self) -> TestInstant {
        self.current_time.get()
    }
}

// ============================================================================
// Mock Microsecond Time
// ============================================================================

/// Microsecond duration, finer than the resolution triggers compare at
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MicroDuration(pub u64);

impl TimeDuration for MicroDuration {
    const ZERO: Self = MicroDuration(0);

    fn as_millis(&self) -> u64 {
        self.0 / 1000
    }

    fn from_millis(millis: u64) -> Self {
        MicroDuration(millis * 1000)
    }

    fn saturating_sub(self, other: Self) -> Self {
        MicroDuration(self.0.saturating_sub(other.0))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct MicroInstant(pub u64);

impl TimeInstant for MicroInstant {
    type Duration = MicroDuration;

    fn duration_since(&self, earlier: Self) -> Self::Duration {
        MicroDuration(self.0.saturating_sub(earlier.0))
    }

    fn checked_add(self, duration: Self::Duration) -> Option<Self> {
        self.0.checked_add(duration.0).map(MicroInstant)
    }
}

/// Microsecond clock, e.g. an RP2040 timer
pub struct MicroTimeSource {
    current_time: core::cell::Cell<MicroInstant>,
}

impl MicroTimeSource {
    pub fn starting_at(micros: u64) -> Self {
        Self {
            current_time: core::cell::Cell::new(MicroInstant(micros)),
        }
    }

    pub fn advance(&self, duration: MicroDuration) {
        let current = self.current_time.get();
        self.current_time.set(MicroInstant(current.0 + duration.0));
    }

    pub fn micros(&self) -> u64 {
        self.current_time.get().0
    }
}

impl TimeSource<MicroInstant> for MicroTimeSource {
    fn now(&self) -> MicroInstant {
        self.current_time.get()
    }
}

/// Idle hook for the microsecond clock that counts zero-length requests
pub struct MicroIdle<'a> {
    clock: &'a MicroTimeSource,
    calls: usize,
    zero_requests: usize,
}

impl<'a> MicroIdle<'a> {
    pub fn new(clock: &'a MicroTimeSource) -> Self {
        Self {
            clock,
            calls: 0,
            zero_requests: 0,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Requests that would not have slept at millisecond resolution
    pub fn zero_requests(&self) -> usize {
        self.zero_requests
    }
}

impl Idle<MicroDuration> for MicroIdle<'_> {
    fn idle(&mut self, max: MicroDuration) {
        self.calls += 1;
        if max.as_millis() == 0 {
            self.zero_requests += 1;
        }
        self.clock.advance(max);
    }
}

// ============================================================================
// Mock Strip
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripError;

/// Mock strip that keeps the last accepted frame and can be told to fail
pub struct MockStrip {
    last_frame: heapless::Vec<Rgba8, 32>,
    writes: usize,
    failures_left: usize,
}

impl MockStrip {
    pub fn new() -> Self {
        Self {
            last_frame: heapless::Vec::new(),
            writes: 0,
            failures_left: 0,
        }
    }

    /// Reject the next `count` writes
    pub fn fail_next(&mut self, count: usize) {
        self.failures_left = count;
    }

    pub fn last_frame(&self) -> &[Rgba8] {
        &self.last_frame
    }

    /// Number of write attempts, failed ones included
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl PixelSink for MockStrip {
    type Error = StripError;

    fn write(&mut self, pixels: &[Rgba8]) -> Result<(), Self::Error> {
        self.writes += 1;
        if self.failures_left > 0 {
            self.failures_left -= 1;
            return Err(StripError);
        }
        self.last_frame.clear();
        let _ = self.last_frame.extend_from_slice(pixels);
        Ok(())
    }
}

// ============================================================================
// Mock Heartbeat
// ============================================================================

/// Mock heartbeat output that records every level it is driven to
pub struct MockHeartbeat {
    levels: heapless::Vec<PinState, 64>,
}

impl MockHeartbeat {
    pub fn new() -> Self {
        Self {
            levels: heapless::Vec::new(),
        }
    }

    pub fn levels(&self) -> &[PinState] {
        &self.levels
    }

    pub fn level(&self) -> Option<PinState> {
        self.levels.last().copied()
    }
}

impl HeartbeatSink for MockHeartbeat {
    fn set_level(&mut self, level: PinState) {
        let _ = self.levels.push(level);
    }
}

// ============================================================================
// Mock Idle
// ============================================================================

/// Idle hook that advances the simulated clock by the requested slice
pub struct MockIdle<'a> {
    clock: &'a MockTimeSource,
    calls: usize,
    longest: u64,
}

impl<'a> MockIdle<'a> {
    pub fn new(clock: &'a MockTimeSource) -> Self {
        Self {
            clock,
            calls: 0,
            longest: 0,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls
    }

    /// Longest idle request seen, in milliseconds
    pub fn longest(&self) -> u64 {
        self.longest
    }
}

impl Idle<TestDuration> for MockIdle<'_> {
    fn idle(&mut self, max: TestDuration) {
        self.calls += 1;
        self.longest = self.longest.max(max.0);
        self.clock.advance(max);
    }
}

// ============================================================================
// Test Helper Functions
// ============================================================================

/// Channels of a pixel as a tuple, alpha dropped
pub fn channels(pixel: Rgba8) -> (u8, u8, u8) {
    (pixel.color.red, pixel.color.green, pixel.color.blue)
}

/// Largest per-channel distance between two pixels
pub fn channel_distance(a: Rgba8, b: Rgba8) -> u8 {
    let (ar, ag, ab) = channels(a);
    let (br, bg, bb) = channels(b);
    ar.abs_diff(br).max(ag.abs_diff(bg)).max(ab.abs_diff(bb))
}

/// Compare two pixels with a per-channel tolerance
pub fn colors_close(a: Rgba8, b: Rgba8, tolerance: u8) -> bool {
    channel_distance(a, b) <= tolerance
}
