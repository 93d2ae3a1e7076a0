//! Rainbow frame generation.

use crate::color::Rgba8;
use crate::wheel::HueWheel;

/// Hue of pixel `index` for a frame starting at `offset` and advancing by
/// `step` per pixel, reduced into `W`'s domain.
#[inline]
pub fn hue_at<W: HueWheel>(offset: u16, step: u16, index: usize) -> u16 {
    let hue = (offset as u32).wrapping_add((step as u32).wrapping_mul(index as u32));
    W::wrap(hue)
}

/// Overwrites every pixel with a rainbow sampled along `W`.
///
/// Pixels are written in index order. The result depends only on the
/// arguments, so filling twice with the same inputs yields the same frame.
pub fn fill_rainbow<W: HueWheel>(
    pixels: &mut [Rgba8],
    offset: u16,
    step: u16,
    saturation: u8,
    value: u8,
) {
    for (i, pixel) in pixels.iter_mut().enumerate() {
        *pixel = W::color(hue_at::<W>(offset, step, i), saturation, value);
    }

    if let Some(first) = pixels.first() {
        trace!(
            "frame offset={} first=({}, {}, {})",
            offset,
            first.color.red,
            first.color.green,
            first.color.blue
        );
    }
}
