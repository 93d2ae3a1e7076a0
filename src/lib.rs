#![cfg_attr(not(feature = "std"), no_std)]

//! Rainbow animation and heartbeat for addressable LED strips, driven from a
//! single cooperative loop without allocation.
//!
//! # Core Concepts
//!
//! - **`hsv_to_rgb`**: Fixed-point hue/saturation/value to RGB conversion, integer only
//! - **`HueWheel`**: Compile-time choice of hue domain and conversion (`Rainbow` or `Spectrum`)
//! - **`fill_rainbow`**: Fills a pixel buffer with a rainbow starting at a hue offset
//! - **`RainbowScheduler`**: Polls the hue, heartbeat and frame ticks and performs whatever is due
//! - **`Config`**: Periods, hue step, saturation and brightness
//! - **`PixelSink`** / **`HeartbeatSink`**: Traits to implement for your strip and indicator pin
//! - **`Idle`**: Trait for handing the execution context back while nothing is due
//! - **`TimeSource`**: Trait to implement for your timing system
//!
//! ```ignore
//! let mut scheduler: RainbowScheduler<_, _, _, _, Rainbow, 10> =
//!     RainbowScheduler::new(Config::DEFAULT, strip, heartbeat, &clock)?;
//! scheduler.run(&mut DelayIdle::new(delay));
//! ```

mod fmt;

pub mod color;
pub mod config;
pub mod frame;
pub mod scheduler;
pub mod sink;
pub mod time;
pub mod trigger;
pub mod wheel;

pub use color::{OPAQUE, Rgba8, hsv_to_rgb, rgba, scale8, scale8_video};
pub use config::{Config, ConfigError};
pub use frame::{fill_rainbow, hue_at};
pub use scheduler::{AnimationState, RainbowScheduler, Service, Stats, Tick};
pub use sink::{DelayIdle, HeartbeatSink, Idle, PinHeartbeat, PixelSink, SmartLedsSink};
pub use time::{TimeDuration, TimeInstant, TimeSource};
pub use trigger::Trigger;
pub use wheel::{HueWheel, Rainbow, Spectrum};

/// Re-exported so sinks can be implemented without a direct `embedded-hal` dependency.
pub use embedded_hal::digital::PinState;

/// Reference strip length.
pub const DEFAULT_PIXEL_COUNT: usize = 10;

pub const BLACK: Rgba8 = rgba(0, 0, 0);
pub const RED: Rgba8 = rgba(255, 0, 0);
pub const GREEN: Rgba8 = rgba(0, 255, 0);
pub const BLUE: Rgba8 = rgba(0, 0, 255);
