//! Mapping of absolute sample time onto the circular store
//!
//! Everything here is pure arithmetic: no allocation, no shared state. The
//! ring buffer asks for a plan, then executes it against the channel store.

use crate::error::{Result, RingBufferError};
use crate::types::{SampleTime, TimeBounds, frames_to_time};

/// A contiguous run of elements inside one channel of the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// First physical element
    pub offset: usize,
    /// Number of elements
    pub len: usize,
}

/// A logical run split at the physical end of the store
///
/// `second`, when present, always starts at physical offset 0 and follows
/// `first` in time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segments {
    /// Part up to the physical end of the store
    pub first: Segment,
    /// Part folded back to the start of the store
    pub second: Option<Segment>,
}

impl Segments {
    /// Total elements covered
    #[must_use]
    pub fn len(&self) -> usize {
        self.first.len + self.second.map_or(0, |s| s.len)
    }

    /// Check if no elements are covered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if the run wraps around the physical end
    #[must_use]
    pub fn wraps(&self) -> bool {
        self.second.is_some()
    }

    /// Iterate `(position within the run, segment)` pairs in time order
    pub fn iter(&self) -> impl Iterator<Item = (usize, Segment)> {
        let first = self.first;
        std::iter::once((0, first)).chain(self.second.map(|s| (first.len, s)))
    }
}

/// What a store has to do, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StorePlan {
    /// Bounds to publish before touching the store, when the write discards
    /// or overwrites frames that are currently resident
    pub trimmed: Option<TimeBounds>,
    /// Physical range to silence between the old end and the new start
    pub gap: Option<Segments>,
    /// Where the new frames go
    pub data: Segments,
    /// Bounds to publish once everything is copied
    pub published: TimeBounds,
}

/// The part of a fetch that is served from the store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchCopy {
    /// Destination frame the copy starts at
    pub dest_offset: usize,
    /// Sample times being copied
    pub time: TimeBounds,
    /// Where those times live in the store
    pub segments: Segments,
}

/// How a fetch fills its destination
///
/// `leading_zeros + copy.len + trailing_zeros` always equals the requested
/// frame count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchPlan {
    /// Frames requested
    pub frames: usize,
    /// Frames of silence before the copied region
    pub leading_zeros: usize,
    /// Region served from the store, if any
    pub copy: Option<FetchCopy>,
    /// Frames of silence after the copied region
    pub trailing_zeros: usize,
}

impl FetchPlan {
    fn silent(frames: usize) -> Self {
        Self {
            frames,
            leading_zeros: frames,
            copy: None,
            trailing_zeros: 0,
        }
    }

    /// Frames actually copied from the store
    #[must_use]
    pub fn copied_frames(&self) -> usize {
        self.copy.map_or(0, |c| c.segments.len())
    }
}

/// Power-of-two capacity and the mask derived from it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OffsetMap {
    capacity: usize,
    mask: usize,
}

impl OffsetMap {
    /// Round `requested` up to the next power of two
    ///
    /// # Panics
    ///
    /// Panics if the rounded capacity does not fit in `usize` or exceeds
    /// `i64::MAX`.
    #[must_use]
    pub fn new(requested: usize) -> Self {
        let capacity = requested
            .max(1)
            .checked_next_power_of_two()
            .filter(|&c| SampleTime::try_from(c).is_ok())
            .expect("ring capacity overflows");
        Self {
            capacity,
            mask: capacity - 1,
        }
    }

    /// Frames per channel
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Physical element index holding `time`
    #[inline]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_possible_wrap,
        clippy::cast_sign_loss
    )]
    #[must_use]
    pub fn frame_offset(&self, time: SampleTime) -> usize {
        // mask < 2^63, so the masked value is non-negative for any time
        (time & self.mask as SampleTime) as usize
    }

    /// Physical layout of `frames` frames starting at `start`
    ///
    /// `frames` must not exceed the capacity.
    #[must_use]
    pub fn segments(&self, start: SampleTime, frames: usize) -> Segments {
        debug_assert!(frames <= self.capacity);
        let offset = self.frame_offset(start);
        let until_end = self.capacity - offset;
        if frames <= until_end {
            Segments {
                first: Segment {
                    offset,
                    len: frames,
                },
                second: None,
            }
        } else {
            Segments {
                first: Segment {
                    offset,
                    len: until_end,
                },
                second: Some(Segment {
                    offset: 0,
                    len: frames - until_end,
                }),
            }
        }
    }

    /// Plan writing `frames` frames at `start` into a store holding `current`
    ///
    /// Returns `Ok(None)` for an empty write.
    ///
    /// # Errors
    ///
    /// `TooMuch` if `frames` exceeds the capacity or the write would end past
    /// `SampleTime::MAX`; nothing should be touched.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn plan_store(
        &self,
        current: TimeBounds,
        start: SampleTime,
        frames: usize,
    ) -> Result<Option<StorePlan>> {
        if frames == 0 {
            return Ok(None);
        }
        if frames > self.capacity {
            return Err(RingBufferError::TooMuch {
                requested: frames,
                capacity: self.capacity,
            });
        }

        let capacity = frames_to_time(self.capacity);
        // The last frame must have a representable end time
        let Some(end) = start.checked_add(frames_to_time(frames)) else {
            return Err(RingBufferError::TooMuch {
                requested: frames,
                capacity: self.capacity,
            });
        };

        let (bounds, trimmed) = if start < current.end {
            // Going backwards: nothing held so far can be trusted
            let reset = TimeBounds::empty_at(start);
            (reset, Some(reset))
        } else if end.saturating_sub(current.start) <= capacity {
            (current, None)
        } else {
            let oldest = end - capacity;
            let advanced = TimeBounds::new(oldest, oldest.max(current.end));
            (advanced, Some(advanced))
        };

        // After trimming the gap is always shorter than the capacity
        let gap = (start > bounds.end)
            .then(|| self.segments(bounds.end, (start - bounds.end) as usize));

        Ok(Some(StorePlan {
            trimmed,
            gap,
            data: self.segments(start, frames),
            published: TimeBounds::new(bounds.start, end),
        }))
    }

    /// Plan reading `frames` frames at `start` from a store holding `bounds`
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn plan_fetch(&self, bounds: TimeBounds, start: SampleTime, frames: usize) -> FetchPlan {
        if frames == 0 {
            return FetchPlan::silent(0);
        }

        let end = start.saturating_add(frames_to_time(frames));
        let Some(time) = TimeBounds::new(start, end).intersect(&bounds) else {
            return FetchPlan::silent(frames);
        };

        // The intersection lies inside the request, which is at most `frames` long
        let leading_zeros = (time.start - start) as usize;
        let copied = time.frames().min(self.capacity);
        let time = TimeBounds::new(time.start, time.start + frames_to_time(copied));

        FetchPlan {
            frames,
            leading_zeros,
            copy: Some(FetchCopy {
                dest_offset: leading_zeros,
                time,
                segments: self.segments(time.start, copied),
            }),
            trailing_zeros: frames - leading_zeros - copied,
        }
    }
}
