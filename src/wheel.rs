//! Hue domains and conversion strategies.
//!
//! A deployment picks exactly one wheel as a type parameter of the
//! scheduler. Nothing switches wheels at runtime, so the choice costs
//! nothing once compiled.

use palette::{FromColor, Hsv, Srgb};

use crate::color::{self, Rgba8};

/// A cyclic hue domain together with its hue to color conversion.
pub trait HueWheel {
    /// Number of distinct hues; hues are reduced modulo this value.
    const DOMAIN: u16;

    /// Converts a hue (already reduced into `0..DOMAIN`) plus saturation and
    /// value (`0..=255`) into an opaque pixel.
    fn color(hue: u16, saturation: u8, value: u8) -> Rgba8;

    /// Reduces an arbitrary hue into the domain.
    #[inline]
    fn wrap(hue: u32) -> u16 {
        (hue % Self::DOMAIN as u32) as u16
    }
}

/// 256-step wheel using the fixed-point [`color::hsv_to_rgb`].
///
/// This is the default for the scheduler: integer only, no FPU needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rainbow;

impl HueWheel for Rainbow {
    const DOMAIN: u16 = 256;

    #[inline]
    fn color(hue: u16, saturation: u8, value: u8) -> Rgba8 {
        color::hsv_to_rgb(Self::wrap(hue as u32) as u8, saturation, value)
    }
}

/// 360-degree wheel computed in floating point through `palette`.
///
/// Produces the classic six-section HSV spectrum. Only worth it on targets
/// with an FPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Spectrum;

impl HueWheel for Spectrum {
    const DOMAIN: u16 = 360;

    fn color(hue: u16, saturation: u8, value: u8) -> Rgba8 {
        let hsv: Hsv = Hsv::new(
            Self::wrap(hue as u32) as f32,
            saturation as f32 / 255.0,
            value as f32 / 255.0,
        );
        let rgb: Srgb<u8> = Srgb::<f32>::from_color(hsv).into_format();
        color::rgba(rgb.red, rgb.green, rgb.blue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_reduces_into_domain() {
        assert_eq!(Rainbow::wrap(256), 0);
        assert_eq!(Rainbow::wrap(257), 1);
        assert_eq!(Spectrum::wrap(360), 0);
        assert_eq!(Spectrum::wrap(725), 5);
    }

    fn channels(c: Rgba8) -> (u8, u8, u8) {
        (c.color.red, c.color.green, c.color.blue)
    }

    #[test]
    fn rainbow_delegates_to_fixed_point() {
        for hue in 0..256u16 {
            assert_eq!(
                channels(Rainbow::color(hue, 255, 255)),
                channels(color::hsv_to_rgb(hue as u8, 255, 255))
            );
        }
    }

    #[test]
    fn rainbow_wraps_out_of_domain_hues() {
        assert_eq!(
            channels(Rainbow::color(256 + 96, 255, 255)),
            channels(Rainbow::color(96, 255, 255))
        );
    }
}
