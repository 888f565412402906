//! Multi-channel ring buffer addressed by sample time

use std::sync::atomic::{Ordering, fence};

use crate::error::Result;
use crate::format::{ChannelBuffers, ChannelBuffersMut, zero_channels};
use crate::types::{RingBufferConfig, Sample, SampleTime, TimeBounds};

use super::bounds::TimeBoundsLog;
use super::offset::{FetchCopy, OffsetMap};
use super::store::{ChannelStore, FetchMode};

/// Fixed-capacity, multi-channel ring buffer indexed by absolute sample time
///
/// One writer stores blocks at increasing sample times; any number of readers
/// fetch arbitrary time ranges. Neither side locks, allocates or waits on the
/// other: a reader that keeps racing the writer gets `CpuOverload` after a
/// bounded number of attempts.
///
/// `store` takes `&mut self`. To store from one thread and fetch from others,
/// [`split`](Self::split) the buffer into a [`Producer`](super::Producer) and
/// cloneable [`Consumer`](super::Consumer)s.
#[derive(Debug)]
pub struct RingBuffer<T: Sample = f32> {
    offsets: OffsetMap,
    store: ChannelStore<T>,
    bounds: TimeBoundsLog,
}

impl<T: Sample> RingBuffer<T> {
    /// Create a buffer of `channels` channels holding at least
    /// `capacity_frames` frames each
    ///
    /// # Panics
    ///
    /// Panics if the rounded capacity or the total element count overflows.
    #[must_use]
    pub fn new(channels: usize, capacity_frames: usize) -> Self {
        Self::with_config(
            &RingBufferConfig::builder()
                .channels(channels)
                .capacity_frames(capacity_frames)
                .build(),
        )
    }

    /// Create a buffer from a configuration
    ///
    /// # Panics
    ///
    /// Panics if the rounded capacity or the total element count overflows.
    #[must_use]
    pub fn with_config(config: &RingBufferConfig) -> Self {
        if config.read_attempts == 0 {
            tracing::warn!("Ring buffer read_attempts of 0 raised to 1");
        }

        if !ChannelStore::<T>::is_lock_free() {
            tracing::warn!(
                "Ring buffer elements of {} bytes are not lock-free on this target",
                std::mem::size_of::<T>()
            );
        }

        let offsets = OffsetMap::new(config.capacity_frames);
        let store = ChannelStore::new(config.channels, offsets.capacity());
        let bounds = TimeBoundsLog::new(config.read_attempts);

        tracing::debug!(
            "Ring buffer: {} channels, {} frames requested, {} frames allocated, {} read attempts",
            config.channels,
            config.capacity_frames,
            offsets.capacity(),
            bounds.read_attempts()
        );

        Self {
            offsets,
            store,
            bounds,
        }
    }

    /// Number of channels
    #[must_use]
    pub fn channels(&self) -> usize {
        self.store.channels()
    }

    /// Frames per channel (a power of two)
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.offsets.capacity()
    }

    /// Retry budget of the time bounds reader
    #[must_use]
    pub fn read_attempts(&self) -> usize {
        self.bounds.read_attempts()
    }

    /// Store `frames` frames from `source` at sample time `start`
    ///
    /// Writing before the current end discards everything held. Writing past
    /// the current end silences the gap. The oldest frames are dropped once
    /// the capacity is exceeded.
    ///
    /// # Errors
    ///
    /// `TooMuch` if `frames` exceeds the capacity or the write would end past
    /// `SampleTime::MAX`; nothing is written.
    pub fn store<B>(&mut self, source: &B, frames: usize, start: SampleTime) -> Result<()>
    where
        B: ChannelBuffers<T> + ?Sized,
    {
        self.store_exclusive(source, frames, start)
    }

    /// Store path shared with `Producer`; callers guarantee a single writer
    pub(crate) fn store_exclusive<B>(
        &self,
        source: &B,
        frames: usize,
        start: SampleTime,
    ) -> Result<()>
    where
        B: ChannelBuffers<T> + ?Sized,
    {
        let Some(plan) = self
            .offsets
            .plan_store(self.bounds.latest(), start, frames)?
        else {
            return Ok(());
        };

        // Readers must stop trusting frames before they are reused
        if let Some(trimmed) = plan.trimmed {
            self.bounds.publish(trimmed);
            fence(Ordering::Release);
        }

        if let Some(gap) = plan.gap {
            for (_, segment) in gap.iter() {
                self.store.zero(segment);
            }
        }

        for (position, segment) in plan.data.iter() {
            self.store.write_from(segment, source, position);
        }

        self.bounds.publish(plan.published);
        Ok(())
    }

    /// Fetch `frames` frames starting at sample time `start` into `dest`
    ///
    /// Frames outside the resident range are silence; that is not an error.
    ///
    /// # Errors
    ///
    /// `CpuOverload` if no consistent time bounds could be read. The
    /// destination has been silenced in that case.
    pub fn fetch<B>(&self, dest: &mut B, frames: usize, start: SampleTime) -> Result<()>
    where
        B: ChannelBuffersMut<T> + ?Sized,
    {
        self.fetch_with_mode(dest, frames, start, FetchMode::Copy)
    }

    /// Fetch with an explicit [`FetchMode`]
    ///
    /// In `Mix` mode nothing is zero-filled: frames without data leave the
    /// destination as it was, and frames overwritten while copying cannot be
    /// taken back out of the mix.
    ///
    /// # Errors
    ///
    /// `CpuOverload` if no consistent time bounds could be read. In `Copy`
    /// mode the destination has been silenced in that case.
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
        self.fetch_then(dest, frames, start, mode, || ())
    }

    /// Fetch, running `after_copy` between the copy and the bounds re-check
    fn fetch_then<B, F>(
        &self,
        dest: &mut B,
        frames: usize,
        start: SampleTime,
        mode: FetchMode,
        after_copy: F,
    ) -> Result<()>
    where
        B: ChannelBuffersMut<T> + ?Sized,
        F: FnOnce(),
    {
        if frames == 0 {
            return Ok(());
        }

        let bounds = match self.bounds.read() {
            Ok(bounds) => bounds,
            Err(err) => {
                if mode == FetchMode::Copy {
                    zero_channels(dest, 0, frames);
                }
                return Err(err);
            }
        };

        let plan = self.offsets.plan_fetch(bounds, start, frames);
        let Some(copy) = plan.copy else {
            if mode == FetchMode::Copy {
                zero_channels(dest, 0, frames);
            }
            return Ok(());
        };

        if mode == FetchMode::Copy {
            zero_channels(dest, 0, plan.leading_zeros);
            zero_channels(
                dest,
                copy.dest_offset + copy.segments.len(),
                plan.trailing_zeros,
            );
        }

        for (position, segment) in copy.segments.iter() {
            self.store
                .read_into(segment, dest, copy.dest_offset + position, mode);
        }

        after_copy();

        if mode == FetchMode::Copy {
            self.discard_overwritten(dest, &copy)?;
        }
        Ok(())
    }

    /// Silence fetched frames the writer invalidated while they were copied
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn discard_overwritten<B>(&self, dest: &mut B, copy: &FetchCopy) -> Result<()>
    where
        B: ChannelBuffersMut<T> + ?Sized,
    {
        let copied = copy.segments.len();
        // Keep the copy's loads ahead of the second bounds read
        fence(Ordering::Acquire);
        let now = match self.bounds.read() {
            Ok(now) => now,
            Err(err) => {
                zero_channels(dest, copy.dest_offset, copied);
                return Err(err);
            }
        };

        match copy.time.intersect(&now) {
            None => zero_channels(dest, copy.dest_offset, copied),
            Some(valid) => {
                let head = (valid.start - copy.time.start) as usize;
                let tail = (copy.time.end - valid.end) as usize;
                zero_channels(dest, copy.dest_offset, head);
                zero_channels(dest, copy.dest_offset + copied - tail, tail);
            }
        }
        Ok(())
    }

    /// Take a consistent snapshot of the resident time range
    ///
    /// # Errors
    ///
    /// `CpuOverload` if every attempt raced a concurrent store.
    pub fn time_bounds(&self) -> Result<TimeBounds> {
        self.bounds.read()
    }

    #[cfg(test)]
    pub(crate) fn bounds_log(&self) -> &TimeBoundsLog {
        &self.bounds
    }

    /// Copy-mode fetch with `published` made visible mid-fetch, as a writer
    /// on another thread would between the copy and the re-check
    #[cfg(test)]
    pub(crate) fn fetch_while_publishing<B>(
        &self,
        dest: &mut B,
        frames: usize,
        start: SampleTime,
        published: TimeBounds,
    ) -> Result<()>
    where
        B: ChannelBuffersMut<T> + ?Sized,
    {
        self.fetch_then(dest, frames, start, FetchMode::Copy, || {
            self.bounds.publish(published);
        })
    }
}
