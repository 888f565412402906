/// Default number of optimistic attempts when reading the time bounds
pub const DEFAULT_READ_ATTEMPTS: usize = 8;

/// Configuration for a [`RingBuffer`](crate::RingBuffer)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RingBufferConfig {
    /// Number of channels held by the store (default: 2)
    pub channels: usize,

    /// Requested per-channel capacity in frames, rounded up to a power of two
    /// (default: 4096)
    pub capacity_frames: usize,

    /// Attempts a reader makes to take a consistent time bounds snapshot
    /// before reporting `CpuOverload` (default: 8, minimum 1)
    pub read_attempts: usize,
}

impl Default for RingBufferConfig {
    fn default() -> Self {
        Self {
            channels: 2,
            capacity_frames: 4096,
            read_attempts: DEFAULT_READ_ATTEMPTS,
        }
    }
}

impl RingBufferConfig {
    /// Create a new config builder
    #[must_use]
    pub fn builder() -> RingBufferConfigBuilder {
        RingBufferConfigBuilder::default()
    }

    /// Per-channel capacity the buffer will actually allocate
    ///
    /// Returns `None` if the next power of two does not fit in `usize`.
    #[must_use]
    pub fn realized_capacity(&self) -> Option<usize> {
        self.capacity_frames.max(1).checked_next_power_of_two()
    }
}

/// Builder for `RingBufferConfig`
#[derive(Debug, Clone, Default)]
pub struct RingBufferConfigBuilder {
    config: RingBufferConfig,
}

impl RingBufferConfigBuilder {
    /// Set channel count
    #[must_use]
    pub fn channels(mut self, channels: usize) -> Self {
        self.config.channels = channels;
        self
    }

    /// Set requested capacity in frames
    #[must_use]
    pub fn capacity_frames(mut self, frames: usize) -> Self {
        self.config.capacity_frames = frames;
        self
    }

    /// Set the time bounds read retry budget
    #[must_use]
    pub fn read_attempts(mut self, attempts: usize) -> Self {
        self.config.read_attempts = attempts;
        self
    }

    /// Build the configuration
    #[must_use]
    pub fn build(self) -> RingBufferConfig {
        self.config
    }
}
