//! # timed-ring
//!
//! A fixed-capacity, multi-channel ring buffer addressed by absolute sample
//! time, for handing audio from one real-time thread to others.
//!
//! ## Features
//!
//! - Store and fetch by sample time; wraparound is invisible to callers
//! - Lock-free, allocation-free `store`, `fetch` and `time_bounds`
//! - Readers never block the writer; a reader that keeps losing the race
//!   gets [`RingBufferError::CpuOverload`] instead of spinning
//! - Non-interleaved `Vec<Vec<T>>`, `AudioBufferList` and `BufferList`
//!   adapters for source and destination buffers
//!
//! ## Example
//!
//! ```rust
//! use timed_ring::RingBuffer;
//!
//! # fn example() -> Result<(), timed_ring::RingBufferError> {
//! let (mut producer, consumer) = RingBuffer::<f32>::new(2, 1024).split();
//!
//! let block = vec![vec![0.25f32; 256]; 2];
//! producer.store(&block, 256, 0)?;
//!
//! let mut out = vec![vec![0.0f32; 128]; 2];
//! consumer.fetch(&mut out, 128, 64)?;
//! assert_eq!(out[0][0], 0.25);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! # Architecture
//!
//! - **Surface**: [`RingBuffer`], split into [`Producer`] and [`Consumer`]
//! - **Planning**: [`ring::offset`] maps sample times to physical segments
//! - **Publication**: [`ring::bounds`] shares the resident range without locks
//! - **Adapters**: [`format`] exposes caller buffers channel by channel

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Public modules
/// Error types
pub mod error;
/// Core types
pub mod types;

/// Testing utilities
pub mod testing;

pub mod format;
pub mod ring;

// Re-exports
pub use error::RingBufferError;
pub use format::{
    AudioBuffer, AudioBufferList, AudioBufferListMut, AudioBufferMut, BufferList, BufferListMut,
    ChannelBuffers, ChannelBuffersMut, ChannelSlice, ChannelSliceMut,
};
pub use ring::{Consumer, FetchMode, Producer, RingBuffer};
pub use types::{RingBufferConfig, Sample, SampleTime, TimeBounds};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Prelude for common imports
///
/// Convenient re-exports
pub mod prelude {
    pub use crate::{
        ChannelBuffers, ChannelBuffersMut, Consumer, FetchMode, Producer, RingBuffer,
        RingBufferConfig, RingBufferError, Sample, SampleTime, TimeBounds,
    };
}
