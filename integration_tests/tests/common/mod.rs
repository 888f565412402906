//! Common test utilities and fixtures
#![allow(dead_code)]

use std::sync::Once;

use timed_ring::SampleTime;
use timed_ring::testing::expected_sample;
use tracing_subscriber::{EnvFilter, fmt};

static INIT: Once = Once::new();

/// Initialize test logging (call once per test module)
pub fn init_logging() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::from_default_env().add_directive("timed_ring=debug".parse().unwrap());

        fmt().with_env_filter(filter).with_test_writer().init();
    });
}

/// Refill `block` in place with the biased pattern for `[start, start + frames)`
pub fn fill_pattern(block: &mut [Vec<f32>], frames: usize, start: SampleTime, bias: f32) {
    for (channel, samples) in block.iter_mut().enumerate() {
        samples.resize(frames, 0.0);
        for (time, sample) in (start..).zip(samples.iter_mut()) {
            *sample = expected_sample(time, channel, bias);
        }
    }
}
