//! Compile-time animation configuration.

use crate::scheduler::Tick;

/// Timing and color settings for a [`RainbowScheduler`](crate::RainbowScheduler).
///
/// The pixel count is the scheduler's const generic and the hue domain is its
/// [`HueWheel`](crate::HueWheel) parameter; everything else lives here. Build
/// one as a `const` from [`Config::DEFAULT`] and the `with_*` setters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Milliseconds between hue offset advances.
    pub hue_period_ms: u32,
    /// Milliseconds between heartbeat toggles.
    pub heartbeat_period_ms: u32,
    /// Milliseconds between rendered frames.
    pub frame_period_ms: u32,
    /// Longest the loop idles when nothing is due.
    pub idle_slice_ms: u32,
    /// Hue distance between neighbouring pixels.
    pub hue_step: u16,
    /// Saturation for every pixel, 255 is fully saturated.
    pub saturation: u8,
    /// Brightness for every pixel, 0 is off.
    pub value: u8,
}

impl Config {
    /// Reference configuration: hue every 40 ms, heartbeat every 512 ms,
    /// a frame every 8 ms, 25 hue steps between pixels, dim output.
    pub const DEFAULT: Config = Config {
        hue_period_ms: 40,
        heartbeat_period_ms: 512,
        frame_period_ms: 8,
        idle_slice_ms: 1,
        hue_step: 25,
        saturation: 255,
        value: 10,
    };

    pub const fn with_hue_period_ms(mut self, ms: u32) -> Self {
        self.hue_period_ms = ms;
        self
    }

    pub const fn with_heartbeat_period_ms(mut self, ms: u32) -> Self {
        self.heartbeat_period_ms = ms;
        self
    }

    pub const fn with_frame_period_ms(mut self, ms: u32) -> Self {
        self.frame_period_ms = ms;
        self
    }

    pub const fn with_idle_slice_ms(mut self, ms: u32) -> Self {
        self.idle_slice_ms = ms;
        self
    }

    pub const fn with_hue_step(mut self, step: u16) -> Self {
        self.hue_step = step;
        self
    }

    pub const fn with_saturation(mut self, saturation: u8) -> Self {
        self.saturation = saturation;
        self
    }

    pub const fn with_value(mut self, value: u8) -> Self {
        self.value = value;
        self
    }

    /// Period of the given trigger in milliseconds.
    pub const fn period_ms(&self, tick: Tick) -> u32 {
        match tick {
            Tick::Hue => self.hue_period_ms,
            Tick::Heartbeat => self.heartbeat_period_ms,
            Tick::Frame => self.frame_period_ms,
        }
    }

    /// Checks the configuration for a strip of `pixel_count` LEDs.
    ///
    /// # Errors
    /// * `EmptyStrip` - `pixel_count` is zero
    /// * `ZeroPeriod` - a trigger would fire on every iteration
    /// * `ZeroIdleSlice` - the loop would spin instead of yielding
    pub fn validate(&self, pixel_count: usize) -> Result<(), ConfigError> {
        if pixel_count == 0 {
            return Err(ConfigError::EmptyStrip);
        }

        for tick in Tick::ALL {
            if self.period_ms(tick) == 0 {
                return Err(ConfigError::ZeroPeriod(tick));
            }
        }

        if self.idle_slice_ms == 0 {
            return Err(ConfigError::ZeroIdleSlice);
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Configuration rejected at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The strip has no pixels.
    EmptyStrip,

    /// The named trigger has a zero period.
    ZeroPeriod(Tick),

    /// The idle slice is zero.
    ZeroIdleSlice,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::EmptyStrip => {
                write!(f, "strip must have at least one pixel")
            }
            ConfigError::ZeroPeriod(tick) => {
                write!(f, "{:?} period must be non-zero", tick)
            }
            ConfigError::ZeroIdleSlice => {
                write!(f, "idle slice must be non-zero")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}
