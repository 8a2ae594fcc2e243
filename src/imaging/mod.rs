//! Pixel transforms — pure Rust, operating on [`PixelBuffer`](crate::types::PixelBuffer).
//!
//! | Stage | Type | Buffer handling |
//! |---|---|---|
//! | **Noise reduction** | [`MedianFilter`] | borrows the source, returns a new buffer |
//! | **Range stretch** | [`Normalizer`] | mutates the buffer in place |
//!
//! The module is split into:
//! - **Calculations**: Pure per-sample functions (unit testable)
//! - **Parameters**: Policy types configuring the transforms
//! - **Median / Normalize**: The two stages themselves

mod calculations;
pub mod median;
pub mod normalize;
mod params;

pub use calculations::{median_of_five, rescale};
pub use median::MedianFilter;
pub use normalize::{ChannelRange, ChannelRanges, NormalizeError, Normalizer};
pub use params::ConstantChannel;
