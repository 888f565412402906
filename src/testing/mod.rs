//! Deterministic signals for exercising a ring buffer
//!
//! Every sample encodes its channel and sample time, so a fetched block can
//! be checked frame by frame against what was stored, and silence (`0.0`)
//! never collides with real data as long as `bias >= 1.0`.


use crate::types::SampleTime;

/// Sample times repeat the pattern after this many frames
pub const PATTERN_PERIOD: SampleTime = 1 << 16;

/// Value stored for `channel` at `time` by [`biased_channels`]
#[allow(clippy::cast_precision_loss)]
#[must_use]
pub fn expected_sample(time: SampleTime, channel: usize, bias: f32) -> f32 {
    bias + time.rem_euclid(PATTERN_PERIOD) as f32 + channel as f32 / 8.0
}

/// `channels` buffers of `frames` samples covering `[start, start + frames)`
#[must_use]
pub fn biased_channels(channels: usize, frames: usize, start: SampleTime, bias: f32) -> Vec<Vec<f32>> {
    (0..channels)
        .map(|channel| {
            (start..)
                .take(frames)
                .map(|time| expected_sample(time, channel, bias))
                .collect()
        })
        .collect()
}

/// `channels` buffers of `frames` zeroed samples
#[must_use]
pub fn silent_channels(channels: usize, frames: usize) -> Vec<Vec<f32>> {
    vec![vec![0.0; frames]; channels]
}

/// Check that `frame` of every channel in `block` holds the biased value for
/// `time`
#[must_use]
pub fn frame_matches(block: &[Vec<f32>], frame: usize, time: SampleTime, bias: f32) -> bool {
    block.iter().enumerate().all(|(channel, samples)| {
        samples
            .get(frame)
            .is_some_and(|&s| s.to_bits() == expected_sample(time, channel, bias).to_bits())
    })
}

/// Check that `frame` of every channel in `block` is silence
#[must_use]
pub fn frame_is_silent(block: &[Vec<f32>], frame: usize) -> bool {
    block
        .iter()
        .all(|samples| samples.get(frame).is_some_and(|&s| s.to_bits() == 0))
}
