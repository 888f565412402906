//! Sample time coordinates

/// Absolute frame position shared by producer and consumer.
///
/// Never wrapped; only the storage offset derived from it wraps.
pub type SampleTime = i64;

/// Convert a frame count into a sample time span, saturating at `i64::MAX`
#[must_use]
pub fn frames_to_time(frames: usize) -> SampleTime {
    SampleTime::try_from(frames).unwrap_or(SampleTime::MAX)
}

/// Half-open range `[start, end)` of sample times resident in the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TimeBounds {
    /// First resident frame
    pub start: SampleTime,
    /// One past the last resident frame
    pub end: SampleTime,
}

impl TimeBounds {
    /// Create bounds from a start and end time
    #[must_use]
    pub const fn new(start: SampleTime, end: SampleTime) -> Self {
        Self { start, end }
    }

    /// Empty bounds positioned at `time`
    #[must_use]
    pub const fn empty_at(time: SampleTime) -> Self {
        Self {
            start: time,
            end: time,
        }
    }

    /// Number of frames covered
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    #[must_use]
    pub fn frames(&self) -> usize {
        self.end.saturating_sub(self.start).max(0) as usize
    }

    /// Check if no frames are covered
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// Check if `time` is resident
    #[must_use]
    pub fn contains(&self, time: SampleTime) -> bool {
        self.start <= time && time < self.end
    }

    /// Overlap of two ranges, `None` if they do not intersect
    #[must_use]
    pub fn intersect(&self, other: &TimeBounds) -> Option<TimeBounds> {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        (start < end).then_some(TimeBounds { start, end })
    }
}

impl From<(SampleTime, SampleTime)> for TimeBounds {
    fn from((start, end): (SampleTime, SampleTime)) -> Self {
        Self { start, end }
    }
}

impl From<TimeBounds> for (SampleTime, SampleTime) {
    fn from(bounds: TimeBounds) -> Self {
        (bounds.start, bounds.end)
    }
}
