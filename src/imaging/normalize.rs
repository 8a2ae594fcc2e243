//! Per-channel min–max normalization.
//!
//! Two passes over the buffer:
//!
//! 1. [`ChannelRanges::measure`] reduces every channel to its observed
//!    `[min, max]`. The accumulators start at `min = 255`, `max = 0`, so a
//!    channel whose values all sit above 255 still reports `min = 255`.
//! 2. Each value is mapped onto `[0, 255]` with its own channel's range
//!    (see [`rescale`](super::calculations::rescale)). Channels never share a
//!    range.
//!
//! A channel with `min == max` cannot be rescaled. What happens then is
//! decided by [`ConstantChannel`]; the `Reject` policy is checked before any
//! value is written, so a rejected buffer is left exactly as it was.

use super::calculations::rescale;
use super::params::ConstantChannel;
use crate::types::{Channel, PixelBuffer};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("Channel {channel} is constant ({value}) and cannot be normalized")]
    ConstantChannel { channel: Channel, value: i32 },
}

/// Observed range of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChannelRange {
    pub min: i32,
    pub max: i32,
}

impl ChannelRange {
    const INITIAL: ChannelRange = ChannelRange { min: 255, max: 0 };

    fn include(&mut self, value: i32) {
        self.min = self.min.min(value);
        self.max = self.max.max(value);
    }

    pub fn is_constant(&self) -> bool {
        self.min == self.max
    }
}

/// Observed ranges of all three channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChannelRanges {
    pub red: ChannelRange,
    pub green: ChannelRange,
    pub blue: ChannelRange,
}

impl ChannelRanges {
    /// Single reduction pass over `buffer`.
    pub fn measure(buffer: &PixelBuffer) -> Self {
        let mut ranges = ChannelRanges {
            red: ChannelRange::INITIAL,
            green: ChannelRange::INITIAL,
            blue: ChannelRange::INITIAL,
        };
        for p in buffer.pixels() {
            ranges.red.include(p.red);
            ranges.green.include(p.green);
            ranges.blue.include(p.blue);
        }
        ranges
    }

    pub fn get(&self, channel: Channel) -> ChannelRange {
        match channel {
            Channel::Red => self.red,
            Channel::Green => self.green,
            Channel::Blue => self.blue,
        }
    }

    /// Smallest of the three per-channel minimums.
    pub fn global_min(&self) -> i32 {
        self.red.min.min(self.green.min).min(self.blue.min)
    }

    /// Largest of the three per-channel maximums.
    pub fn global_max(&self) -> i32 {
        self.red.max.max(self.green.max).max(self.blue.max)
    }

    /// Channels whose range is empty, in storage order.
    pub fn constant_channels(&self) -> Vec<Channel> {
        Channel::ALL
            .into_iter()
            .filter(|&c| self.get(c).is_constant())
            .collect()
    }
}

/// Value-range normalization stage of the pipeline. Mutates in place.
#[derive(Debug, Clone, Copy, Default)]
pub struct Normalizer {
    constant_channel: ConstantChannel,
}

impl Normalizer {
    pub fn new(constant_channel: ConstantChannel) -> Self {
        Self { constant_channel }
    }

    pub fn constant_channel(&self) -> ConstantChannel {
        self.constant_channel
    }

    /// Rescale every channel of `buffer` onto `[0, 255]`.
    ///
    /// Returns the ranges measured before rescaling; callers report the
    /// global minimum and maximum from them.
    pub fn apply(&self, buffer: &mut PixelBuffer) -> Result<ChannelRanges, NormalizeError> {
        let ranges = ChannelRanges::measure(buffer);
        log::debug!(
            "channel ranges: red {}..{}, green {}..{}, blue {}..{}",
            ranges.red.min,
            ranges.red.max,
            ranges.green.min,
            ranges.green.max,
            ranges.blue.min,
            ranges.blue.max
        );

        for channel in ranges.constant_channels() {
            let value = ranges.get(channel).min;
            match self.constant_channel {
                ConstantChannel::Reject => {
                    return Err(NormalizeError::ConstantChannel { channel, value });
                }
                ConstantChannel::Preserve => {
                    log::warn!("{channel} channel is constant ({value}); leaving it unchanged");
                }
                ConstantChannel::Zero => {
                    log::warn!("{channel} channel is constant ({value}); setting it to 0");
                }
            }
        }

        for p in buffer.pixels_mut() {
            for channel in Channel::ALL {
                let range = ranges.get(channel);
                let value = p.channel(channel);
                let scaled = if !range.is_constant() {
                    rescale(value, range.min, range.max)
                } else if self.constant_channel == ConstantChannel::Zero {
                    0
                } else {
                    value
                };
                p.set_channel(channel, scaled);
            }
        }

        Ok(ranges)
    }
}
