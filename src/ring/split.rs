//! Writer and reader handles for using one ring buffer across threads

use std::sync::Arc;

use crate::error::Result;
use crate::format::{ChannelBuffers, ChannelBuffersMut};
use crate::types::{Sample, SampleTime, TimeBounds};

use super::buffer::RingBuffer;
use super::store::FetchMode;

impl<T: Sample> RingBuffer<T> {
    /// Split into the unique writer handle and a cloneable reader handle
    #[must_use]
    pub fn split(self) -> (Producer<T>, Consumer<T>) {
        tracing::trace!(
            "Splitting ring buffer: {} channels x {} frames",
            self.channels(),
            self.capacity()
        );
        let shared = Arc::new(self);
        (
            Producer {
                ring: Arc::clone(&shared),
            },
            Consumer { ring: shared },
        )
    }
}

/// The single writer of a split ring buffer
///
/// Not `Clone`: there is exactly one per buffer.
#[derive(Debug)]
pub struct Producer<T: Sample = f32> {
    ring: Arc<RingBuffer<T>>,
}

impl<T: Sample> Producer<T> {
    /// See [`RingBuffer::store`]
    ///
    /// # Errors
    ///
    /// `TooMuch` if `frames` exceeds the capacity or the write would end past
    /// `SampleTime::MAX`; nothing is written.
    pub fn store<B>(&mut self, source: &B, frames: usize, start: SampleTime) -> Result<()>
    where
        B: ChannelBuffers<T> + ?Sized,
    {
        self.ring.store_exclusive(source, frames, start)
    }

    /// See [`RingBuffer::time_bounds`]
    ///
    /// # Errors
    ///
    /// `CpuOverload` if no consistent snapshot could be read.
    pub fn time_bounds(&self) -> Result<TimeBounds> {
        self.ring.time_bounds()
    }

    /// Number of channels
    #[must_use]
    pub fn channels(&self) -> usize {
        self.ring.channels()
    }

    /// Frames per channel
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }
}

/// A reader of a split ring buffer; clone one per reading thread
#[derive(Debug)]
pub struct Consumer<T: Sample = f32> {
    ring: Arc<RingBuffer<T>>,
}

impl<T: Sample> Clone for Consumer<T> {
    fn clone(&self) -> Self {
        Self {
            ring: Arc::clone(&self.ring),
        }
    }
}

impl<T: Sample> Consumer<T> {
    /// See [`RingBuffer::fetch`]
    ///
    /// # Errors
    ///
    /// `CpuOverload` if no consistent time bounds could be read.
    pub fn fetch<B>(&self, dest: &mut B, frames: usize, start: SampleTime) -> Result<()>
    where
        B: ChannelBuffersMut<T> + ?Sized,
    {
        self.ring.fetch(dest, frames, start)
    }

    /// See [`RingBuffer::fetch_with_mode`]
    ///
    /// # Errors
    ///
    /// `CpuOverload` if no consistent time bounds could be read.
    pub fn fetch_with_mode<B>(
        &self,
        dest: &mut B,
        frames: usize,
        start: SampleTime,
        mode: FetchMode,
    ) -> Result<()>
    where
        B: ChannelBuffersMut<T> + ?Sized,
    {
        self.ring.fetch_with_mode(dest, frames, start, mode)
    }

    /// See [`RingBuffer::time_bounds`]
    ///
    /// # Errors
    ///
    /// `CpuOverload` if no consistent snapshot could be read.
    pub fn time_bounds(&self) -> Result<TimeBounds> {
        self.ring.time_bounds()
    }

    /// Number of channels
    #[must_use]
    pub fn channels(&self) -> usize {
        self.ring.channels()
    }

    /// Frames per channel
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.ring.capacity()
    }
}
