//! Five-point median filter.
//!
//! Each output channel value is the median of five samples taken from the
//! same channel of the source: the pixel itself and its left, right, up and
//! down neighbours.
//!
//! ```text
//!          up
//!    left  self  right
//!         down
//! ```
//!
//! ## Edge policy
//!
//! A neighbour that falls outside the image contributes the literal value
//! `0`. It is not mirrored, clamped or dropped from the sample set, so border
//! pixels are pulled toward darker medians. A 1×1 image has four zero
//! neighbours and therefore always filters to black (for non-negative input).
//!
//! The source buffer is only borrowed; the result is a new buffer of the same
//! dimensions.

use super::calculations::median_of_five;
use crate::types::{AllocationError, Pixel, PixelBuffer};

/// Noise-reduction stage of the pipeline.
#[derive(Debug, Clone, Copy, Default)]
pub struct MedianFilter;

impl MedianFilter {
    pub fn new() -> Self {
        Self
    }

    /// Filter `source` into a freshly allocated buffer.
    ///
    /// Fails only when the output buffer cannot be allocated, in which case
    /// nothing is returned.
    pub fn apply(&self, source: &PixelBuffer) -> Result<PixelBuffer, AllocationError> {
        let mut result = PixelBuffer::zeroed(source.width(), source.height())?;

        for y in 0..source.height() {
            for x in 0..source.width() {
                let samples = neighbourhood(source, x, y);
                let filtered =
                    Pixel::from_fn(|channel| median_of_five(samples.map(|p| p.channel(channel))));
                let idx = result.index(x, y);
                result.pixels_mut()[idx] = filtered;
            }
        }

        log::debug!(
            "median filter applied to {}x{} buffer",
            source.width(),
            source.height()
        );
        Ok(result)
    }
}

/// Self, left, right, up, down; out-of-bounds positions are [`Pixel::ZERO`].
fn neighbourhood(source: &PixelBuffer, x: u32, y: u32) -> [Pixel; 5] {
    let at = |nx: Option<u32>, ny: Option<u32>| match (nx, ny) {
        (Some(nx), Some(ny)) => source.get(nx, ny).unwrap_or(Pixel::ZERO),
        _ => Pixel::ZERO,
    };

    [
        at(Some(x), Some(y)),
        at(x.checked_sub(1), Some(y)),
        at(x.checked_add(1), Some(y)),
        at(Some(x), y.checked_sub(1)),
        at(Some(x), y.checked_add(1)),
    ]
}
