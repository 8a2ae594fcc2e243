//! Parameter types for the pixel transforms.
//!
//! - [`ConstantChannel`] — what the normalizer does with a channel whose
//!   observed minimum equals its maximum, where the rescale would otherwise
//!   divide by zero.

use serde::{Deserialize, Serialize};

/// Policy for a channel that holds a single value across the whole image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ConstantChannel {
    /// Leave the channel at its constant value.
    #[default]
    Preserve,
    /// Set every value of the channel to 0.
    Zero,
    /// Fail normalization without touching the buffer.
    Reject,
}

impl ConstantChannel {
    pub fn as_str(self) -> &'static str {
        match self {
            ConstantChannel::Preserve => "preserve",
            ConstantChannel::Zero => "zero",
            ConstantChannel::Reject => "reject",
        }
    }
}
