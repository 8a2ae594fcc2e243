//! Reader and writer for the HSDEC text image format.
//!
//! ```text
//! HSDEC <width> <height>
//! <red> <green> <blue>
//! ...                      (width * height lines, row-major)
//! ```
//!
//! Tokens are separated by any ASCII whitespace, so the reader does not care
//! how triples are split across lines. Anything after the last declared pixel
//! is ignored. The writer always emits one triple per line.
//!
//! Channel values are read as signed 32-bit integers and are not range
//! checked: clamping is not the codec's job.

use crate::types::{AllocationError, Pixel, PixelBuffer, pixel_count, reserve_pixels};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Header token every file must start with.
pub const MAGIC: &str = "HSDEC";

/// Default ceiling on the declared pixel count of an input image.
pub const DEFAULT_MAX_PIXELS: usize = 100_000_000;

#[derive(Error, Debug)]
pub enum CodecError {
    #[error("File {} could not be opened: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Invalid image format: {0}")]
    Format(String),
    #[error("Error reading pixel data: expected {expected} pixels, read {read}")]
    PixelRead { expected: usize, read: usize },
    #[error(transparent)]
    Allocation(#[from] AllocationError),
}

/// Decodes and encodes [`PixelBuffer`]s in the HSDEC format.
#[derive(Debug, Clone, Copy)]
pub struct ImageCodec {
    max_pixels: usize,
}

impl ImageCodec {
    pub fn new() -> Self {
        Self {
            max_pixels: DEFAULT_MAX_PIXELS,
        }
    }

    /// Reject images declaring more than `max_pixels` pixels with an
    /// [`AllocationError`] before any storage is reserved.
    pub fn with_max_pixels(max_pixels: usize) -> Self {
        Self { max_pixels }
    }

    pub fn max_pixels(&self) -> usize {
        self.max_pixels
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<PixelBuffer, CodecError> {
        let mut tokens = tokens(bytes);

        match tokens.next() {
            Some(magic) if magic == MAGIC.as_bytes() => {}
            Some(other) => {
                return Err(CodecError::Format(format!(
                    "expected {MAGIC} header, found {:?}",
                    String::from_utf8_lossy(other)
                )));
            }
            None => return Err(CodecError::Format("file is empty".into())),
        }
        let width = parse_dimension(tokens.next(), "width")?;
        let height = parse_dimension(tokens.next(), "height")?;

        let expected = pixel_count(width, height)?;
        if expected > self.max_pixels {
            log::warn!(
                "{width}x{height} image exceeds the limit of {} pixels",
                self.max_pixels
            );
            return Err(AllocationError { pixels: expected }.into());
        }

        let mut pixels = reserve_pixels(expected)?;
        while pixels.len() < expected {
            let mut next = || tokens.next().and_then(parse_int);
            match (next(), next(), next()) {
                (Some(red), Some(green), Some(blue)) => pixels.push(Pixel::new(red, green, blue)),
                _ => {
                    return Err(CodecError::PixelRead {
                        expected,
                        read: pixels.len(),
                    });
                }
            }
        }

        PixelBuffer::from_pixels(width, height, pixels)
            .map_err(|e| CodecError::Format(e.to_string()))
    }

    pub fn encode(&self, buffer: &PixelBuffer) -> Vec<u8> {
        let mut out = format!("{MAGIC} {} {}\n", buffer.width(), buffer.height());
        for p in buffer.pixels() {
            out.push_str(&format!("{} {} {}\n", p.red, p.green, p.blue));
        }
        out.into_bytes()
    }

    /// Read and decode the file at `path`.
    pub fn load(&self, path: &Path) -> Result<PixelBuffer, CodecError> {
        let bytes = fs::read(path).map_err(|source| CodecError::FileOpen {
            path: path.to_path_buf(),
            source,
        })?;
        let buffer = self.decode(&bytes)?;
        log::info!(
            "loaded {} ({}x{})",
            path.display(),
            buffer.width(),
            buffer.height()
        );
        Ok(buffer)
    }

    /// Encode `buffer` and write it to `path`.
    ///
    /// The bytes go to a hidden sibling file first and are renamed into
    /// place, so `path` is either untouched or complete.
    pub fn save(&self, buffer: &PixelBuffer, path: &Path) -> Result<(), CodecError> {
        let bytes = self.encode(buffer);
        let open_error = |source: std::io::Error| CodecError::FileOpen {
            path: path.to_path_buf(),
            source,
        };

        let Some(name) = path.file_name() else {
            return fs::write(path, &bytes).map_err(open_error);
        };
        let staging = path.with_file_name(format!(".{}.partial", name.to_string_lossy()));
        fs::write(&staging, &bytes).map_err(open_error)?;
        if let Err(source) = fs::rename(&staging, path) {
            let _ = fs::remove_file(&staging);
            return Err(open_error(source));
        }

        log::info!("saved {} ({} bytes)", path.display(), bytes.len());
        Ok(())
    }
}

impl Default for ImageCodec {
    fn default() -> Self {
        Self::new()
    }
}

fn tokens(bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
    bytes
        .split(|b| b.is_ascii_whitespace())
        .filter(|t| !t.is_empty())
}

fn parse_int(token: &[u8]) -> Option<i32> {
    std::str::from_utf8(token).ok()?.parse().ok()
}

fn parse_dimension(token: Option<&[u8]>, what: &str) -> Result<u32, CodecError> {
    let token = token.ok_or_else(|| CodecError::Format(format!("missing {what}")))?;
    let text = String::from_utf8_lossy(token);
    let value: i64 = text
        .parse()
        .map_err(|_| CodecError::Format(format!("{what} is not an integer: {text:?}")))?;
    if value < 1 {
        return Err(CodecError::Format(format!(
            "{what} must be positive, got {value}"
        )));
    }
    u32::try_from(value).map_err(|_| CodecError::Format(format!("{what} is too large: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{GOLDEN_2X2_TEXT, buffer_from_rows, golden_2x2};
    use tempfile::TempDir;

    fn decode(text: &str) -> Result<PixelBuffer, CodecError> {
        ImageCodec::new().decode(text.as_bytes())
    }

    // =========================================================================
    // decode
    // =========================================================================

    #[test]
    fn decode_golden_file() {
        assert_eq!(decode(GOLDEN_2X2_TEXT).unwrap(), golden_2x2());
    }

    #[test]
    fn decode_ignores_line_layout() {
        let buf = decode("HSDEC 2 1 1 2 3\n\n  4\t5 6").unwrap();
        assert_eq!(buf, buffer_from_rows(&[&[(1, 2, 3), (4, 5, 6)]]));
    }

    #[test]
    fn decode_ignores_trailing_data() {
        let buf = decode("HSDEC 1 1\n7 8 9\n10 11 12\n").unwrap();
        assert_eq!(buf.pixels(), &[Pixel::new(7, 8, 9)]);
    }

    #[test]
    fn decode_keeps_out_of_range_values() {
        let buf = decode("HSDEC 1 1\n-3 300 255\n").unwrap();
        assert_eq!(buf.pixels(), &[Pixel::new(-3, 300, 255)]);
    }

    #[test]
    fn wrong_magic_is_format_error() {
        let result = decode("FOOBAR 4 4\n0 0 0\n");
        assert!(matches!(result, Err(CodecError::Format(msg)) if msg.contains("FOOBAR")));
    }

    #[test]
    fn magic_must_be_exact() {
        assert!(matches!(decode("hsdec 1 1\n0 0 0"), Err(CodecError::Format(_))));
        assert!(matches!(decode("HSDECX 1 1\n0 0 0"), Err(CodecError::Format(_))));
    }

    #[test]
    fn empty_input_is_format_error() {
        assert!(matches!(decode(""), Err(CodecError::Format(_))));
        assert!(matches!(decode("  \n"), Err(CodecError::Format(_))));
    }

    #[test]
    fn missing_or_bad_dimensions_are_format_errors() {
        for text in [
            "HSDEC",
            "HSDEC 4",
            "HSDEC four 4",
            "HSDEC 4 2.5",
            "HSDEC 0 4",
            "HSDEC 4 -1",
            "HSDEC 4294967296 1",
        ] {
            assert!(
                matches!(decode(text), Err(CodecError::Format(_))),
                "expected format error for {text:?}"
            );
        }
    }

    #[test]
    fn too_few_pixels_is_read_error() {
        let result = decode("HSDEC 2 2\n1 2 3\n4 5 6\n7 8\n");
        assert!(matches!(
            result,
            Err(CodecError::PixelRead {
                expected: 4,
                read: 2
            })
        ));
    }

    #[test]
    fn non_integer_pixel_is_read_error() {
        let result = decode("HSDEC 2 1\n1 2 3\n4 x 6\n");
        assert!(matches!(
            result,
            Err(CodecError::PixelRead {
                expected: 2,
                read: 1
            })
        ));
    }

    #[test]
    fn declared_size_over_limit_is_allocation_error() {
        let codec = ImageCodec::with_max_pixels(3);
        let result = codec.decode(b"HSDEC 2 2\n0 0 0\n0 0 0\n0 0 0\n0 0 0\n");
        assert!(matches!(
            result,
            Err(CodecError::Allocation(AllocationError { pixels: 4 }))
        ));
    }

    // =========================================================================
    // encode
    // =========================================================================

    #[test]
    fn encode_exact_bytes() {
        let bytes = ImageCodec::new().encode(&golden_2x2());
        assert_eq!(String::from_utf8(bytes).unwrap(), GOLDEN_2X2_TEXT);
    }

    #[test]
    fn decode_of_encode_is_identity() {
        let codec = ImageCodec::new();
        let buf = buffer_from_rows(&[&[(1, -2, 300)], &[(0, 255, 7)], &[(9, 9, 9)]]);
        assert_eq!(codec.decode(&codec.encode(&buf)).unwrap(), buf);
    }

    // =========================================================================
    // load / save
    // =========================================================================

    #[test]
    fn load_missing_file_is_file_open_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("missing.hsdec");
        let err = ImageCodec::new().load(&path).unwrap_err();
        assert!(matches!(&err, CodecError::FileOpen { path: p, .. } if *p == path));
        assert!(err.to_string().contains("missing.hsdec"));
    }

    #[test]
    fn save_then_load() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("out.hsdec");
        let codec = ImageCodec::new();
        codec.save(&golden_2x2(), &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), GOLDEN_2X2_TEXT);
        assert_eq!(codec.load(&path).unwrap(), golden_2x2());
        // Staging file is renamed away
        assert!(!tmp.path().join(".out.hsdec.partial").exists());
    }

    #[test]
    fn save_into_missing_directory_fails_cleanly() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("no-such-dir").join("out.hsdec");
        let result = ImageCodec::new().save(&golden_2x2(), &path);
        assert!(matches!(result, Err(CodecError::FileOpen { .. })));
        assert!(!path.exists());
    }
}
