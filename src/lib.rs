//! # hsdec-process
//!
//! Noise reduction and contrast stretching for images stored in the HSDEC
//! text format. The `process` binary reads one image, runs it through two
//! transforms, and writes the result in the same format.
//!
//! # Architecture: Two-Stage Pipeline
//!
//! ```text
//! INPUTFILE ─decode─▶ PixelBuffer ─MedianFilter─▶ PixelBuffer ─Normalizer─┐
//!                      (borrowed)                  (new buffer)  (in place)  │
//! OUTPUTFILE ◀─encode────────────────────────────────────────────────────────┘
//! ```
//!
//! The median filter returns a new buffer and leaves its input alone; the
//! normalizer rewrites the filtered buffer in place. Every stage returns a
//! `Result`, and the driver stops at the first failure without writing any
//! output.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | `Pixel` / `PixelBuffer` data model and allocation errors |
//! | [`imaging`] | The two transforms: five-point median filter and per-channel normalization |
//! | [`codec`] | HSDEC text format reader and writer |
//! | [`process`] | Pipeline driver and run report |
//! | [`config`] | Optional TOML config layered over stock defaults |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Zero-Padded Borders
//!
//! The median filter treats every neighbour outside the image as the value
//! `0` and keeps it in the five-sample set. Border pixels therefore lean
//! dark, and a 1×1 image always filters to black. This matches existing
//! HSDEC output bit for bit, so it is kept over mirrored or clamped edges.
//!
//! ## Constant Channels
//!
//! Normalizing a channel whose minimum equals its maximum would divide by
//! zero. The [`imaging::ConstantChannel`] policy makes the outcome explicit:
//! keep the channel (default), zero it, or reject the image.
//!
//! ## Unclamped Integers
//!
//! Channel values are `i32` and never clamped on read. A value outside
//! 0..255 survives decode and encode unchanged and takes part in the
//! normalizer's range like any other.

pub mod codec;
pub mod config;
pub mod imaging;
pub mod output;
pub mod process;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
