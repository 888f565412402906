//! Lock-free publication of the resident time range
//!
//! The writer appends `(start, end)` records to a small circular log and then
//! moves a cursor to the new record. Readers load the cursor, read the record
//! it names, and accept it only if the record's version still matches the
//! cursor they loaded. A reader racing the writer retries a bounded number of
//! times and then gives up with `CpuOverload` instead of spinning.

use std::sync::atomic::{AtomicI64, AtomicU64, Ordering, fence};

use crossbeam_utils::CachePadded;

use crate::error::{Result, RingBufferError};
use crate::types::TimeBounds;

/// Number of records in the log; must be a power of two
pub const BOUNDS_SLOTS: usize = 32;

const SLOT_MASK: u64 = BOUNDS_SLOTS as u64 - 1;

/// Version stored while a record is being rewritten
const WRITING: u64 = u64::MAX;

#[derive(Debug)]
struct BoundsSlot {
    start: AtomicI64,
    end: AtomicI64,
    version: AtomicU64,
}

impl BoundsSlot {
    fn new(version: u64) -> Self {
        Self {
            start: AtomicI64::new(0),
            end: AtomicI64::new(0),
            version: AtomicU64::new(version),
        }
    }
}

/// Versioned log of time bounds with a single atomic cursor
#[derive(Debug)]
pub struct TimeBoundsLog {
    slots: [BoundsSlot; BOUNDS_SLOTS],
    /// Polled by every reader; kept off the slots' cache lines
    cursor: CachePadded<AtomicU64>,
    read_attempts: usize,
}

impl TimeBoundsLog {
    /// Create a log holding `[0, 0)` at version 0
    ///
    /// `read_attempts` below 1 is treated as 1.
    #[must_use]
    pub fn new(read_attempts: usize) -> Self {
        Self {
            slots: std::array::from_fn(|i| BoundsSlot::new(if i == 0 { 0 } else { WRITING })),
            cursor: CachePadded::new(AtomicU64::new(0)),
            read_attempts: read_attempts.max(1),
        }
    }

    /// Retry budget for [`read`](Self::read)
    #[must_use]
    pub fn read_attempts(&self) -> usize {
        self.read_attempts
    }

    /// Current cursor value, i.e. the number of publishes so far
    #[must_use]
    pub fn version(&self) -> u64 {
        self.cursor.load(Ordering::Acquire)
    }

    #[allow(clippy::cast_possible_truncation)]
    fn slot(&self, index: u64) -> &BoundsSlot {
        &self.slots[(index & SLOT_MASK) as usize]
    }

    /// Publish new bounds
    ///
    /// Only the single writer may call this; it never runs concurrently
    /// with itself.
    pub fn publish(&self, bounds: TimeBounds) {
        debug_assert!(bounds.start <= bounds.end);

        let current = self.cursor.load(Ordering::Relaxed);
        let next = current.wrapping_add(1);
        let slot = self.slot(next);

        slot.version.store(WRITING, Ordering::Relaxed);
        fence(Ordering::Release);
        slot.start.store(bounds.start, Ordering::Relaxed);
        slot.end.store(bounds.end, Ordering::Relaxed);
        slot.version.store(next, Ordering::Release);

        let advanced =
            self.cursor
                .compare_exchange(current, next, Ordering::Release, Ordering::Relaxed);
        debug_assert!(advanced.is_ok(), "time bounds published concurrently");
    }

    /// Bounds last published by the writer
    ///
    /// Only meaningful on the writer's own thread, where no publish can be
    /// in flight.
    #[must_use]
    pub fn latest(&self) -> TimeBounds {
        let slot = self.slot(self.cursor.load(Ordering::Relaxed));
        TimeBounds::new(
            slot.start.load(Ordering::Relaxed),
            slot.end.load(Ordering::Relaxed),
        )
    }

    /// Take a consistent snapshot of the published bounds
    ///
    /// # Errors
    ///
    /// `CpuOverload` if every attempt raced a publish.
    pub fn read(&self) -> Result<TimeBounds> {
        for _ in 0..self.read_attempts {
            let cursor = self.cursor.load(Ordering::Acquire);
            let slot = self.slot(cursor);

            let before = slot.version.load(Ordering::Acquire);
            let start = slot.start.load(Ordering::Relaxed);
            let end = slot.end.load(Ordering::Relaxed);
            fence(Ordering::Acquire);
            let after = slot.version.load(Ordering::Relaxed);

            if before == cursor && after == cursor {
                return Ok(TimeBounds::new(start, end));
            }
            std::hint::spin_loop();
        }

        Err(RingBufferError::CpuOverload {
            attempts: self.read_attempts,
        })
    }

    /// Leave the current record looking half-written, as if the writer
    /// stalled mid-publish
    #[cfg(test)]
    pub(crate) fn stall_publish(&self) {
        self.slot(self.cursor.load(Ordering::Relaxed))
            .version
            .store(WRITING, Ordering::Release);
    }
}
