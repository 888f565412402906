//! Core types module

mod config;
mod sample;
mod time;


pub use config::{DEFAULT_READ_ATTEMPTS, RingBufferConfig, RingBufferConfigBuilder};
pub use sample::Sample;
pub use time::{SampleTime, TimeBounds, frames_to_time};
