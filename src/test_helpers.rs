//! Shared test utilities for the hsdec-process test suite.
//!
//! Provides buffer builders and on-disk fixtures so individual tests can
//! state their pixel grids inline.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let buf = buffer_from_rows(&[
//!     &[(0, 0, 0), (255, 255, 255)],
//!     &[(10, 10, 10), (20, 20, 20)],
//! ]);
//! assert_eq!(buf, golden_2x2());
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! let input = write_fixture(tmp.path(), "in.hsdec", GOLDEN_2X2_TEXT);
//! ```

use std::path::{Path, PathBuf};

use crate::types::{Pixel, PixelBuffer};

// =========================================================================
// Buffer builders
// =========================================================================

/// Build a buffer from rows of `(red, green, blue)` triples.
///
/// Panics if the rows are ragged or empty.
pub fn buffer_from_rows(rows: &[&[(i32, i32, i32)]]) -> PixelBuffer {
    let height = rows.len();
    let width = rows.first().map_or(0, |r| r.len());
    assert!(
        rows.iter().all(|r| r.len() == width),
        "ragged rows: {:?}",
        rows.iter().map(|r| r.len()).collect::<Vec<_>>()
    );
    let pixels = rows
        .iter()
        .flat_map(|r| r.iter().copied().map(Pixel::from))
        .collect();
    PixelBuffer::from_pixels(width as u32, height as u32, pixels).unwrap()
}

/// A `width × height` buffer where every pixel is `pixel`.
pub fn uniform(width: u32, height: u32, pixel: Pixel) -> PixelBuffer {
    let count = (width * height) as usize;
    PixelBuffer::from_pixels(width, height, vec![pixel; count]).unwrap()
}

// =========================================================================
// Golden vector
// =========================================================================

/// The 2×2 reference image: `(0,0,0) (255,255,255)` over `(10,10,10) (20,20,20)`.
pub fn golden_2x2() -> PixelBuffer {
    buffer_from_rows(&[
        &[(0, 0, 0), (255, 255, 255)],
        &[(10, 10, 10), (20, 20, 20)],
    ])
}

/// [`golden_2x2`] as written by the encoder.
pub const GOLDEN_2X2_TEXT: &str = "HSDEC 2 2\n0 0 0\n255 255 255\n10 10 10\n20 20 20\n";

/// Expected file after median filtering then normalizing [`golden_2x2`].
pub const GOLDEN_2X2_PROCESSED_TEXT: &str = "HSDEC 2 2\n0 0 0\n0 0 0\n0 0 0\n255 255 255\n";

// =========================================================================
// Filesystem fixtures
// =========================================================================

/// Write `contents` to `dir/name` and return the full path.
pub fn write_fixture(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, contents).unwrap();
    path
}
