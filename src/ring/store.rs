//! Per-channel element storage and the copy primitives over it

use std::sync::atomic::Ordering;

use atomic::Atomic;

use crate::format::{ChannelBuffers, ChannelBuffersMut};
use crate::types::Sample;

use super::offset::Segment;

/// How fetched samples land in the destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FetchMode {
    /// Overwrite the destination; frames without data become silence
    #[default]
    Copy,
    /// Mix stored samples into the destination; frames without data are left
    /// untouched
    Mix,
}

/// Fixed `channels × capacity` block of elements, channel-major
///
/// Every element is its own atomic cell, so a reader copying out while the
/// writer copies in never races on plain memory. Cells are accessed with
/// relaxed ordering; the time bounds fences order them against publication.
/// Writes (`write_from`, `zero`) must only come from one thread at a time for
/// the published bounds to describe the contents; the ring buffer guarantees
/// this by requiring `&mut` or a unique `Producer` to store.
pub struct ChannelStore<T> {
    cells: Box<[Atomic<T>]>,
    channels: usize,
    capacity: usize,
}

impl<T: Sample> ChannelStore<T> {
    /// Allocate a silent store
    ///
    /// # Panics
    ///
    /// Panics if `channels * capacity` overflows `usize`.
    #[must_use]
    pub fn new(channels: usize, capacity: usize) -> Self {
        let total = channels
            .checked_mul(capacity)
            .expect("channel store size overflows");
        Self {
            cells: (0..total).map(|_| Atomic::new(T::default())).collect(),
            channels,
            capacity,
        }
    }

    /// Check if elements are copied without the `atomic` crate's lock fallback
    #[must_use]
    pub fn is_lock_free() -> bool {
        Atomic::<T>::is_lock_free()
    }

    /// Number of channels
    #[must_use]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Elements per channel
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Cells of `segment` in `channel`
    fn cells(&self, channel: usize, segment: Segment) -> &[Atomic<T>] {
        assert!(channel < self.channels);
        assert!(segment.offset + segment.len <= self.capacity);
        let first = channel * self.capacity + segment.offset;
        &self.cells[first..first + segment.len]
    }

    /// Copy `segment.len` elements per channel from `source`, starting at
    /// `source_offset` in each source channel
    ///
    /// Store channels with no source channel, or whose source channel runs
    /// out early, are silenced for the rest of the segment. Extra source
    /// channels are ignored.
    pub fn write_from<B>(&self, segment: Segment, source: &B, source_offset: usize)
    where
        B: ChannelBuffers<T> + ?Sized,
    {
        for channel in 0..self.channels {
            let input = source
                .channel(channel)
                .and_then(|samples| samples.get(source_offset..))
                .unwrap_or(&[]);
            let padded = input.iter().copied().chain(std::iter::repeat(T::default()));
            for (cell, sample) in self.cells(channel, segment).iter().zip(padded) {
                cell.store(sample, Ordering::Relaxed);
            }
        }
    }

    /// Copy `segment.len` elements per channel into `dest`, starting at
    /// `dest_offset` in each destination channel
    ///
    /// Each destination channel receives at most what fits in its declared
    /// capacity. Destination channels beyond the store's channel count are
    /// silenced in `Copy` mode and left alone in `Mix` mode.
    pub fn read_into<B>(&self, segment: Segment, dest: &mut B, dest_offset: usize, mode: FetchMode)
    where
        B: ChannelBuffersMut<T> + ?Sized,
    {
        for channel in 0..dest.channel_count() {
            let Some(output) = dest
                .channel_mut(channel)
                .and_then(|samples| samples.get_mut(dest_offset..))
            else {
                continue;
            };
            let count = output.len().min(segment.len);
            let output = &mut output[..count];

            if channel >= self.channels {
                if mode == FetchMode::Copy {
                    output.fill(T::default());
                }
                continue;
            }

            let cells = self.cells(channel, segment);
            match mode {
                FetchMode::Copy => {
                    for (sample, cell) in output.iter_mut().zip(cells) {
                        *sample = cell.load(Ordering::Relaxed);
                    }
                }
                FetchMode::Mix => {
                    for (sample, cell) in output.iter_mut().zip(cells) {
                        *sample = sample.mix(cell.load(Ordering::Relaxed));
                    }
                }
            }
        }
    }

    /// Silence `segment` in every channel
    pub fn zero(&self, segment: Segment) {
        for channel in 0..self.channels {
            for cell in self.cells(channel, segment) {
                cell.store(T::default(), Ordering::Relaxed);
            }
        }
    }
}

impl<T> std::fmt::Debug for ChannelStore<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChannelStore")
            .field("channels", &self.channels)
            .field("capacity", &self.capacity)
            .finish_non_exhaustive()
    }
}
