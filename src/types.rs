//! Pixel data model shared by the codec and both transforms.
//!
//! A [`PixelBuffer`] owns a `width × height` grid of [`Pixel`]s stored
//! row-major (`index = y * width + x`). Channel values are plain `i32`s:
//! they are conceptually 0–255 but nothing here clamps them, so a file with
//! out-of-range values survives decode → encode unchanged.
//!
//! Storage is reserved with [`Vec::try_reserve_exact`] so that an image too
//! large for the machine surfaces as an [`AllocationError`] instead of an
//! abort.

use serde::Serialize;
use thiserror::Error;

/// Pixel storage could not be obtained.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Memory allocation failed for {pixels} pixels")]
pub struct AllocationError {
    /// Number of pixels that were requested.
    pub pixels: usize,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("Invalid dimensions {width}x{height}: width and height must be at least 1")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("Expected {expected} pixels for the given dimensions, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },
    #[error(transparent)]
    Allocation(#[from] AllocationError),
}

/// One of the three independent colour components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    /// All channels in storage order.
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub fn name(self) -> &'static str {
        match self {
            Channel::Red => "red",
            Channel::Green => "green",
            Channel::Blue => "blue",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// RGB value of a single pixel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Pixel {
    pub red: i32,
    pub green: i32,
    pub blue: i32,
}

impl Pixel {
    /// The value out-of-bounds filter neighbours contribute.
    pub const ZERO: Pixel = Pixel::new(0, 0, 0);

    pub const fn new(red: i32, green: i32, blue: i32) -> Self {
        Self { red, green, blue }
    }

    /// Same value on all three channels.
    pub const fn gray(value: i32) -> Self {
        Self::new(value, value, value)
    }

    /// Build a pixel by computing each channel independently.
    pub fn from_fn(mut f: impl FnMut(Channel) -> i32) -> Self {
        Self {
            red: f(Channel::Red),
            green: f(Channel::Green),
            blue: f(Channel::Blue),
        }
    }

    pub fn channel(self, channel: Channel) -> i32 {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
        }
    }

    pub fn set_channel(&mut self, channel: Channel, value: i32) {
        match channel {
            Channel::Red => self.red = value,
            Channel::Green => self.green = value,
            Channel::Blue => self.blue = value,
        }
    }
}

impl From<(i32, i32, i32)> for Pixel {
    fn from((red, green, blue): (i32, i32, i32)) -> Self {
        Self::new(red, green, blue)
    }
}

/// Number of pixels in a `width × height` grid, or an [`AllocationError`]
/// when the product does not fit in `usize`.
pub fn pixel_count(width: u32, height: u32) -> Result<usize, AllocationError> {
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(AllocationError { pixels: usize::MAX })
}

/// Reserve an empty vector with room for exactly `pixels` entries.
pub(crate) fn reserve_pixels(pixels: usize) -> Result<Vec<Pixel>, AllocationError> {
    let mut storage = Vec::new();
    storage
        .try_reserve_exact(pixels)
        .map_err(|_| AllocationError { pixels })?;
    Ok(storage)
}

/// A `width × height` grid of pixels in row-major order.
///
/// Invariant: `pixels.len() == width * height` and both dimensions are at
/// least 1. Every constructor enforces this; there is no way to resize a
/// buffer after creation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl PixelBuffer {
    /// A zero-filled buffer.
    pub fn new(width: u32, height: u32) -> Result<Self, BufferError> {
        check_dimensions(width, height)?;
        Ok(Self::zeroed(width, height)?)
    }

    /// Wrap existing row-major pixel data.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Pixel>) -> Result<Self, BufferError> {
        check_dimensions(width, height)?;
        let expected = pixel_count(width, height)?;
        if pixels.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Zero-filled buffer for dimensions already known to be valid.
    pub(crate) fn zeroed(width: u32, height: u32) -> Result<Self, AllocationError> {
        let count = pixel_count(width, height)?;
        let mut pixels = reserve_pixels(count)?;
        pixels.resize(count, Pixel::ZERO);
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Deep copy with independent storage, failing instead of aborting when
    /// the copy cannot be allocated.
    pub fn try_clone(&self) -> Result<Self, AllocationError> {
        let mut pixels = reserve_pixels(self.pixels.len())?;
        pixels.extend_from_slice(&self.pixels);
        Ok(Self {
            width: self.width,
            height: self.height,
            pixels,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Total number of pixels (`width * height`).
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Always `false` for a well-formed buffer.
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Row-major index of `(x, y)`. Callers must pass in-bounds coordinates.
    pub fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        if x < self.width && y < self.height {
            Some(self.pixels[self.index(x, y)])
        } else {
            None
        }
    }

    /// Overwrite the pixel at `(x, y)`. Returns `false` when out of bounds.
    pub fn set(&mut self, x: u32, y: u32, pixel: Pixel) -> bool {
        if x < self.width && y < self.height {
            let idx = self.index(x, y);
            self.pixels[idx] = pixel;
            true
        } else {
            false
        }
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }
}

fn check_dimensions(width: u32, height: u32) -> Result<(), BufferError> {
    if width == 0 || height == 0 {
        return Err(BufferError::InvalidDimensions { width, height });
    }
    Ok(())
}
