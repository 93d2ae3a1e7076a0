//! Fixed-point hue to RGB conversion.
//!
//! [`hsv_to_rgb`] maps a byte-sized hue onto an eight-section "rainbow"
//! wheel using only shifts, multiplies and adds, so it stays cheap on cores
//! without an FPU or hardware divider. Compared to a plain HSV spectrum the
//! wheel gives yellow a full section of its own, which reads as a more even
//! rainbow on LEDs.

use palette::Alpha;
use palette::rgb::Rgb;

/// An 8-bit sRGB pixel with alpha, as stored in the pixel buffer.
pub type Rgba8 = palette::Srgba<u8>;

/// Alpha used for every generated pixel.
pub const OPAQUE: u8 = 255;

const K255: u8 = 255;
const K171: u8 = 171;
const K170: u8 = 170;
const K85: u8 = 85;

/// Builds an opaque pixel from its three channels.
#[inline]
pub const fn rgba(red: u8, green: u8, blue: u8) -> Rgba8 {
    Alpha {
        color: Rgb::new(red, green, blue),
        alpha: OPAQUE,
    }
}

/// Scales `value` by `scale / 256`.
#[inline]
pub const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * scale as u16) >> 8) as u8
}

/// Scales `value` by `scale / 256`, rounding up by one whenever `scale` is
/// neither zero nor full so that a dim but non-zero scale never lands on
/// exact black.
#[inline]
pub const fn scale8_video(value: u8, scale: u8) -> u8 {
    let nonzero = (scale != 0 && scale != 255) as u8;
    scale8(value, scale) + nonzero
}

/// Converts a hue/saturation/value triple into an opaque RGB pixel.
///
/// All three inputs span the full `u8` range. The hue wraps naturally at
/// 256: bits 7..5 select the section of the wheel and bits 4..0 the
/// position inside it.
pub fn hsv_to_rgb(hue: u8, saturation: u8, value: u8) -> Rgba8 {
    let (r, g, b) = wheel(hue);
    let (r, g, b) = desaturate(r, g, b, saturation);
    let (r, g, b) = dim(r, g, b, value);
    rgba(r, g, b)
}

/// Fully saturated, full brightness color for `hue`.
fn wheel(hue: u8) -> (u8, u8, u8) {
    let offset8 = (hue & 0x1F) << 3;
    // max 82, approximating 256/3 over the section
    let third = scale8(offset8, (256 / 3) as u8);

    match hue >> 5 {
        // red -> orange
        0 => (K255 - third, third, 0),
        // orange -> yellow
        1 => (K171, K85 + third, 0),
        // yellow -> green
        2 => {
            let twothirds = scale8(offset8, ((256 * 2) / 3) as u8);
            (K171 - twothirds, K170 + third, 0)
        }
        // green -> aqua
        3 => (0, K255 - third, third),
        // aqua -> blue
        4 => {
            let twothirds = scale8(offset8, ((256 * 2) / 3) as u8);
            (0, K171 - twothirds, K85 + twothirds)
        }
        // blue -> purple
        5 => (third, 0, K255 - third),
        // purple -> pink
        6 => (K85 + third, 0, K171 - third),
        // pink -> red
        _ => (K170 + third, 0, K85 - third),
    }
}

/// Blends toward white as saturation drops.
fn desaturate(r: u8, g: u8, b: u8, saturation: u8) -> (u8, u8, u8) {
    match saturation {
        255 => (r, g, b),
        0 => (K255, K255, K255),
        s => {
            let desat = scale8_video(255 - s, 255 - s);
            let satscale = 255 - desat;
            let scale = |c: u8| if c > 0 { scale8(c, satscale) } else { 0 };
            (scale(r) + desat, scale(g) + desat, scale(b) + desat)
        }
    }
}

/// Scales every lit channel by `value`; unlit channels stay dark.
fn dim(r: u8, g: u8, b: u8, value: u8) -> (u8, u8, u8) {
    match value {
        255 => (r, g, b),
        0 => (0, 0, 0),
        v => {
            let scale = |c: u8| if c > 0 { scale8_video(c, v) } else { 0 };
            (scale(r), scale(g), scale(b))
        }
    }
}
