use thiserror::Error;

/// Errors returned by ring buffer operations
///
/// Reading outside the resident time range is not an error: those frames are
/// delivered as silence and the call succeeds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RingBufferError {
    /// A single store asked for more frames than one channel can hold, or
    /// for frames ending past the last representable sample time.
    /// Nothing was written and the time bounds are unchanged.
    #[error("requested {requested} frames exceeds ring capacity of {capacity} frames")]
    TooMuch {
        /// Frames passed to the store
        requested: usize,
        /// Realised per-channel capacity
        capacity: usize,
    },

    /// No consistent time bounds snapshot could be taken within the retry budget
    /// because the writer kept publishing mid-read.
    #[error("time bounds unavailable after {attempts} attempts")]
    CpuOverload {
        /// Number of read attempts made
        attempts: usize,
    },
}

impl RingBufferError {
    /// Check if retrying on a later cycle can succeed without changing the request
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::CpuOverload { .. })
    }

    /// Check if the request itself was too large for the buffer
    #[must_use]
    pub fn is_capacity_violation(&self) -> bool {
        matches!(self, Self::TooMuch { .. })
    }
}

/// Result type alias for ring buffer operations
pub type Result<T> = std::result::Result<T, RingBufferError>;
