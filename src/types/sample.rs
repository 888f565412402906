//! Element types the ring buffer can hold

use bytemuck::NoUninit;

/// A fixed-size element stored in the ring buffer
///
/// The store only copies elements around, one atomic cell per element;
/// `Default::default()` is used as silence when zero-filling. `mix` combines
/// a stored element into a destination element for
/// [`FetchMode::Mix`](crate::FetchMode::Mix).
///
/// Implement this for a `#[repr(C)]` record deriving `Clone, Copy, Default`
/// and [`bytemuck::NoUninit`] to carry metadata through the buffer. Records
/// wider than the platform's widest atomic fall back to the `atomic` crate's
/// spinlock; keep them at 8 bytes or less for lock-free copies.
pub trait Sample: NoUninit + Default + Send + Sync {
    /// Combine `other` into `self`
    #[must_use]
    fn mix(self, other: Self) -> Self;
}

macro_rules! impl_float_sample {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                #[inline]
                fn mix(self, other: Self) -> Self {
                    self + other
                }
            }
        )*
    };
}

macro_rules! impl_int_sample {
    ($($t:ty),*) => {
        $(
            impl Sample for $t {
                #[inline]
                fn mix(self, other: Self) -> Self {
                    self.saturating_add(other)
                }
            }
        )*
    };
}

impl_float_sample!(f32, f64);
impl_int_sample!(i8, i16, i32, i64, u8, u16, u32, u64);
