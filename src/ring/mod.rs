//! Sample-time addressed ring buffer
//!
//! - [`offset`]: sample time to physical ranges, store and fetch planning
//! - [`bounds`]: lock-free publication of the resident time range
//! - `store`: channel storage and copy primitives
//! - [`RingBuffer`], [`Producer`], [`Consumer`]: the public surface

pub mod bounds;
mod buffer;
pub mod offset;
mod split;
mod store;

#[cfg(test)]
mod tests;

pub use bounds::{BOUNDS_SLOTS, TimeBoundsLog};
pub use buffer::RingBuffer;
pub use offset::{FetchCopy, FetchPlan, OffsetMap, Segment, Segments, StorePlan};
pub use split::{Consumer, Producer};
pub use store::FetchMode;
