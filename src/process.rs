//! Pipeline driver: load → median filter → normalize → save.
//!
//! ## Stages
//!
//! ```text
//! input file ──decode──▶ source buffer ──MedianFilter──▶ filtered buffer
//!                                                             │
//! output file ◀──encode── filtered buffer ◀──Normalizer (in place)
//! ```
//!
//! The source buffer is only borrowed by the filter and dropped once the
//! run finishes; the filtered buffer is handed to the normalizer by mutable
//! borrow. The first failing stage aborts the run, and nothing is written
//! to the output path unless both transforms succeeded.
//!
//! [`Pipeline::transform`] runs the two in-memory stages on their own, for
//! callers that already hold a [`PixelBuffer`].

use crate::codec::{CodecError, ImageCodec};
use crate::config::ProcessConfig;
use crate::imaging::{ChannelRanges, ConstantChannel, MedianFilter, NormalizeError, Normalizer};
use crate::types::{AllocationError, Channel, PixelBuffer};
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error(transparent)]
    Load(CodecError),
    #[error("First process failed: {0}")]
    Filter(#[source] AllocationError),
    #[error("Second process failed: {0}")]
    Normalize(#[source] NormalizeError),
    #[error("Saving image to {} failed: {source}", .path.display())]
    Save {
        path: PathBuf,
        #[source]
        source: CodecError,
    },
    #[error("Writing report to {} failed: {source}", .path.display())]
    Report {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Summary of a successful run, also written as JSON by `--report`.
#[derive(Debug, Clone, Serialize)]
pub struct ProcessReport {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    /// Per-channel ranges of the filtered image, measured before rescaling.
    pub ranges: ChannelRanges,
    pub minimum: i32,
    pub maximum: i32,
    /// Policy that was applied to `constant_channels`.
    pub constant_channel: ConstantChannel,
    pub constant_channels: Vec<Channel>,
}

/// The configured codec and transforms for one run.
#[derive(Debug, Clone, Copy, Default)]
pub struct Pipeline {
    codec: ImageCodec,
    median: MedianFilter,
    normalizer: Normalizer,
}

impl Pipeline {
    pub fn new(config: &ProcessConfig) -> Self {
        Self {
            codec: ImageCodec::with_max_pixels(config.limits.max_pixels),
            median: MedianFilter::new(),
            normalizer: Normalizer::new(config.normalize.constant_channel),
        }
    }

    /// Median-filter `source` into a new buffer and normalize that buffer.
    ///
    /// `source` is left untouched.
    pub fn transform(
        &self,
        source: &PixelBuffer,
    ) -> Result<(PixelBuffer, ChannelRanges), ProcessError> {
        let mut filtered = self.median.apply(source).map_err(ProcessError::Filter)?;
        let ranges = self
            .normalizer
            .apply(&mut filtered)
            .map_err(ProcessError::Normalize)?;
        Ok((filtered, ranges))
    }

    pub fn run(&self, input: &Path, output: &Path) -> Result<ProcessReport, ProcessError> {
        let source = self.codec.load(input).map_err(ProcessError::Load)?;
        let (result, ranges) = self.transform(&source)?;
        self.codec
            .save(&result, output)
            .map_err(|source| ProcessError::Save {
                path: output.to_path_buf(),
                source,
            })?;

        Ok(ProcessReport {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            width: result.width(),
            height: result.height(),
            ranges,
            minimum: ranges.global_min(),
            maximum: ranges.global_max(),
            constant_channel: self.normalizer.constant_channel(),
            constant_channels: ranges.constant_channels(),
        })
    }
}

/// Run the whole pipeline with `config`.
pub fn process(
    input: &Path,
    output: &Path,
    config: &ProcessConfig,
) -> Result<ProcessReport, ProcessError> {
    Pipeline::new(config).run(input, output)
}

/// Write `report` as pretty-printed JSON.
pub fn write_report(report: &ProcessReport, path: &Path) -> Result<(), ProcessError> {
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(path, json).map_err(|source| ProcessError::Report {
        path: path.to_path_buf(),
        source,
    })
}
