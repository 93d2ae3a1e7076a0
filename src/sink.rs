//! Hardware seams: the strip, the heartbeat output and the idle hook.
//!
//! The scheduler only talks to these traits. Ready-made adapters cover the
//! common ecosystem drivers: any `smart-leds` strip driver, any
//! `embedded-hal` output pin, and any `embedded-hal` delay.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{OutputPin, PinState};
use rgb::RGB8;
use smart_leds_trait::SmartLedsWrite;

use crate::color::Rgba8;
use crate::time::TimeDuration;

/// Write-only LED strip.
///
/// Implement this for your strip driver. The scheduler hands over the whole
/// buffer once per frame tick and does not retry a failed write; the next
/// frame replaces it anyway.
pub trait PixelSink {
    /// Error reported by the transport.
    type Error;

    /// Transmits `pixels` to the strip, first pixel first.
    fn write(&mut self, pixels: &[Rgba8]) -> Result<(), Self::Error>;
}

/// Two-state digital output driving the heartbeat indicator.
pub trait HeartbeatSink {
    /// Drives the output to `level`. Hardware errors are handled (or
    /// ignored) by the implementation; this method cannot fail.
    fn set_level(&mut self, level: PinState);
}

/// Hands the execution context back while nothing is due.
pub trait Idle<D: TimeDuration> {
    /// Yields for at most `max`. Returning early is fine.
    fn idle(&mut self, max: D);
}

/// [`PixelSink`] over a `smart-leds` driver such as `ws2812-pio` or
/// `ws2812-spi`.
pub struct SmartLedsSink<W> {
    strip: W,
}

impl<W> SmartLedsSink<W>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    pub fn new(strip: W) -> Self {
        Self { strip }
    }

    /// Releases the wrapped driver.
    pub fn release(self) -> W {
        self.strip
    }
}

impl<W> PixelSink for SmartLedsSink<W>
where
    W: SmartLedsWrite<Color = RGB8>,
{
    type Error = W::Error;

    fn write(&mut self, pixels: &[Rgba8]) -> Result<(), Self::Error> {
        self.strip.write(
            pixels
                .iter()
                .map(|p| RGB8::new(p.color.red, p.color.green, p.color.blue)),
        )
    }
}

/// [`HeartbeatSink`] over an `embedded-hal` output pin.
pub struct PinHeartbeat<P> {
    pin: P,
}

impl<P: OutputPin> PinHeartbeat<P> {
    pub fn new(pin: P) -> Self {
        Self { pin }
    }

    /// Releases the wrapped pin.
    pub fn release(self) -> P {
        self.pin
    }
}

impl<P: OutputPin> HeartbeatSink for PinHeartbeat<P> {
    fn set_level(&mut self, level: PinState) {
        // A missed toggle is corrected on the next heartbeat tick.
        let _ = self.pin.set_state(level);
    }
}

/// [`Idle`] that sleeps on an `embedded-hal` delay provider for the
/// requested slice, in whole milliseconds and at least one. Suited to
/// bare-metal loops without an executor.
pub struct DelayIdle<T> {
    delay: T,
}

impl<T: DelayNs> DelayIdle<T> {
    pub fn new(delay: T) -> Self {
        Self { delay }
    }

    /// Releases the wrapped delay provider.
    pub fn release(self) -> T {
        self.delay
    }
}

impl<T: DelayNs, D: TimeDuration> Idle<D> for DelayIdle<T> {
    fn idle(&mut self, max: D) {
        // Never less than a millisecond, or the loop would spin until the
        // next trigger can observe the elapsed time.
        let ms = max.ceil_millis().as_millis().clamp(1, u32::MAX as u64) as u32;
        self.delay.delay_ms(ms);
    }
}
