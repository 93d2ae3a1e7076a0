//! Cooperative rainbow and heartbeat scheduler.
//!
//! Provides [`RainbowScheduler`], which multiplexes three periodic ticks
//! (hue advance, heartbeat toggle, frame render) onto a single polling loop.
//! Every iteration checks all three ticks without blocking, runs whatever is
//! due, and only hands the execution context back through [`Idle`] when
//! nothing was.

use core::marker::PhantomData;

use embedded_hal::digital::PinState;
use heapless::Vec;

use crate::color::{self, Rgba8};
use crate::config::{Config, ConfigError};
use crate::frame;
use crate::sink::{HeartbeatSink, Idle, PixelSink};
use crate::time::{TimeDuration, TimeInstant, TimeSource};
use crate::trigger::Trigger;
use crate::wheel::HueWheel;

/// One of the three periodic ticks, listed in service order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Tick {
    /// Advance the hue offset by one.
    Hue,
    /// Flip the heartbeat output.
    Heartbeat,
    /// Render and transmit a frame.
    Frame,
}

impl Tick {
    /// All ticks in the order a single iteration services them.
    pub const ALL: [Tick; 3] = [Tick::Hue, Tick::Heartbeat, Tick::Frame];
}

/// Mutable animation state owned by the scheduler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AnimationState {
    /// Hue of the first pixel, always inside the wheel's domain.
    pub hue_offset: u16,
    /// Whether the heartbeat output is currently high.
    pub heartbeat_on: bool,
}

/// Running counters, wrapping on overflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Stats {
    pub hue_ticks: u32,
    pub heartbeat_ticks: u32,
    pub frames_rendered: u32,
    /// Frames the strip refused to take.
    pub dropped_frames: u32,
}

/// Outcome of one loop iteration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Service<D> {
    /// Ticks that fired, in service order.
    pub fired: Vec<Tick, 3>,
    /// How long the loop may idle before something is due, capped at the
    /// configured idle slice and rounded up to whole milliseconds. Zero when
    /// anything fired.
    pub idle_for: D,
}

impl<D> Service<D> {
    /// True if nothing was due this iteration.
    pub fn is_idle(&self) -> bool {
        self.fired.is_empty()
    }

    /// True if `tick` fired this iteration.
    pub fn fired(&self, tick: Tick) -> bool {
        self.fired.contains(&tick)
    }
}

fn shorter<D: TimeDuration>(a: D, b: D) -> D {
    if b.as_millis() < a.as_millis() { b } else { a }
}

/// Advances the hue offset by one, wrapping at the wheel's domain.
pub fn advance_hue<W: HueWheel>(state: &mut AnimationState) {
    state.hue_offset = W::wrap(state.hue_offset as u32 + 1);
}

/// Flips the heartbeat flag and drives the output to match.
pub fn toggle_heartbeat<H: HeartbeatSink>(state: &mut AnimationState, output: &mut H) {
    state.heartbeat_on = !state.heartbeat_on;
    let level = PinState::from(state.heartbeat_on);
    trace!("heartbeat {}", state.heartbeat_on);
    output.set_level(level);
}

/// Fills `pixels` from the current hue offset and hands them to the strip.
pub fn render_frame<W: HueWheel, P: PixelSink>(
    state: &AnimationState,
    config: &Config,
    pixels: &mut [Rgba8],
    strip: &mut P,
) -> Result<(), P::Error> {
    frame::fill_rainbow::<W>(
        pixels,
        state.hue_offset,
        config.hue_step,
        config.saturation,
        config.value,
    );
    strip.write(pixels)
}

/// Drives an LED strip and a heartbeat output from one cooperative loop.
///
/// The scheduler exclusively owns the animation state, the pixel buffer and
/// both outputs, so nothing needs locking. Call [`service`](Self::service)
/// from your own loop, or hand control to [`run`](Self::run).
///
/// # Type Parameters
/// * `'t` - Lifetime of the time source reference
/// * `I` - Time instant type
/// * `T` - Time source implementation type
/// * `P` - Strip implementation type
/// * `H` - Heartbeat output type
/// * `W` - Hue wheel (domain and conversion strategy)
/// * `N` - Number of pixels on the strip
pub struct RainbowScheduler<'t, I, T, P, H, W, const N: usize>
where
    I: TimeInstant,
    T: TimeSource<I>,
    P: PixelSink,
    H: HeartbeatSink,
    W: HueWheel,
{
    strip: P,
    heartbeat: H,
    time_source: &'t T,
    config: Config,
    state: AnimationState,
    pixels: [Rgba8; N],
    triggers: [Trigger<I>; 3],
    stats: Stats,
    _wheel: PhantomData<W>,
}

impl<'t, I, T, P, H, W, const N: usize> RainbowScheduler<'t, I, T, P, H, W, N>
where
    I: TimeInstant,
    T: TimeSource<I>,
    P: PixelSink,
    H: HeartbeatSink,
    W: HueWheel,
{
    /// Validates `config`, blanks the strip and drives the heartbeat low.
    ///
    /// All three ticks are first due one period after construction.
    ///
    /// # Errors
    /// Any [`ConfigError`] from [`Config::validate`]. Nothing is written to
    /// the hardware in that case.
    pub fn new(
        config: Config,
        mut strip: P,
        mut heartbeat: H,
        time_source: &'t T,
    ) -> Result<Self, ConfigError> {
        config.validate(N)?;

        let pixels = [color::rgba(0, 0, 0); N];
        if strip.write(&pixels).is_err() {
            warn!("initial blank frame was not accepted");
        }
        heartbeat.set_level(PinState::Low);

        let now = time_source.now();
        let triggers = Tick::ALL.map(|tick| {
            Trigger::new(I::Duration::from_millis(config.period_ms(tick) as u64), now)
        });

        info!(
            "rainbow scheduler: {} pixels, hue {} ms, heartbeat {} ms, frame {} ms",
            N,
            config.hue_period_ms,
            config.heartbeat_period_ms,
            config.frame_period_ms
        );

        Ok(Self {
            strip,
            heartbeat,
            time_source,
            config,
            state: AnimationState::default(),
            pixels,
            triggers,
            stats: Stats::default(),
            _wheel: PhantomData,
        })
    }

    /// Runs one non-blocking iteration.
    ///
    /// Polls the hue, heartbeat and frame ticks in that order against a
    /// single clock reading and performs every action that is due. A strip
    /// write failure is counted and otherwise ignored.
    pub fn service(&mut self) -> Service<I::Duration> {
        let now = self.time_source.now();
        let mut fired = Vec::new();

        for (tick, trigger) in Tick::ALL.into_iter().zip(self.triggers.iter_mut()) {
            if !trigger.poll(now) {
                continue;
            }

            match tick {
                Tick::Hue => {
                    advance_hue::<W>(&mut self.state);
                    self.stats.hue_ticks = self.stats.hue_ticks.wrapping_add(1);
                }
                Tick::Heartbeat => {
                    toggle_heartbeat(&mut self.state, &mut self.heartbeat);
                    self.stats.heartbeat_ticks = self.stats.heartbeat_ticks.wrapping_add(1);
                }
                Tick::Frame => {
                    let result = render_frame::<W, P>(
                        &self.state,
                        &self.config,
                        &mut self.pixels,
                        &mut self.strip,
                    );
                    self.stats.frames_rendered = self.stats.frames_rendered.wrapping_add(1);
                    if result.is_err() {
                        self.stats.dropped_frames = self.stats.dropped_frames.wrapping_add(1);
                        warn!("strip write failed, {} frames dropped", self.stats.dropped_frames);
                    }
                }
            }

            // Capacity equals the number of ticks.
            let _ = fired.push(tick);
        }

        // Something ran; poll again right away.
        if !fired.is_empty() {
            return Service {
                fired,
                idle_for: I::Duration::ZERO,
            };
        }

        let idle_for = self
            .triggers
            .iter()
            .map(|trigger| trigger.remaining(now))
            .fold(
                I::Duration::from_millis(self.config.idle_slice_ms as u64),
                shorter,
            );

        Service { fired, idle_for }
    }

    /// Runs one iteration and idles if nothing was due.
    pub fn poll<Y: Idle<I::Duration>>(&mut self, idle: &mut Y) -> Service<I::Duration> {
        let service = self.service();
        if service.is_idle() {
            idle.idle(service.idle_for);
        }
        service
    }

    /// Runs the loop forever.
    pub fn run<Y: Idle<I::Duration>>(&mut self, idle: &mut Y) -> ! {
        loop {
            self.poll(idle);
        }
    }

    /// Returns the current animation state.
    pub fn state(&self) -> AnimationState {
        self.state
    }

    /// Returns the hue of the first pixel.
    pub fn hue_offset(&self) -> u16 {
        self.state.hue_offset
    }

    /// Returns true if the heartbeat output is high.
    pub fn heartbeat_on(&self) -> bool {
        self.state.heartbeat_on
    }

    /// Returns the most recently rendered frame.
    pub fn pixels(&self) -> &[Rgba8; N] {
        &self.pixels
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the running counters.
    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Returns a reference to the strip.
    pub fn strip(&self) -> &P {
        &self.strip
    }

    /// Returns a reference to the heartbeat output.
    pub fn heartbeat(&self) -> &H {
        &self.heartbeat
    }

    /// Consumes the scheduler, returning the strip and heartbeat output.
    pub fn release(self) -> (P, H) {
        (self.strip, self.heartbeat)
    }
}
