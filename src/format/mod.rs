//! Multi-channel buffer descriptors accepted by the ring buffer
//!
//! The ring only ever asks a caller's buffers two things: how many channels
//! there are, and the slice for one channel cut to its declared capacity. Any
//! descriptor answering that through [`ChannelBuffers`] or
//! [`ChannelBuffersMut`] can be stored from or fetched into.
//!
//! Two descriptors are provided:
//!
//! - [`AudioBufferList`]: one buffer per channel, each declaring its size in
//!   bytes, the way system audio callbacks hand out buffer lists.
//! - [`BufferList`]: one `(slice, element_count)` pair per channel.
//!
//! Slices and `Vec`s of anything that is `AsRef<[T]>` work as well.

pub mod audio_buffer_list;
pub mod buffer_list;


pub use audio_buffer_list::{AudioBuffer, AudioBufferList, AudioBufferListMut, AudioBufferMut};
pub use buffer_list::{BufferList, BufferListMut, ChannelSlice, ChannelSliceMut};

/// Read access to a set of per-channel sample buffers
pub trait ChannelBuffers<T> {
    /// Number of channels described
    fn channel_count(&self) -> usize;

    /// Samples of one channel, limited to its declared capacity
    fn channel(&self, index: usize) -> Option<&[T]>;
}

/// Write access to a set of per-channel sample buffers
pub trait ChannelBuffersMut<T> {
    /// Number of channels described
    fn channel_count(&self) -> usize;

    /// Samples of one channel, limited to its declared capacity
    fn channel_mut(&mut self, index: usize) -> Option<&mut [T]>;
}

impl<T, S: AsRef<[T]>> ChannelBuffers<T> for [S] {
    fn channel_count(&self) -> usize {
        self.len()
    }

    fn channel(&self, index: usize) -> Option<&[T]> {
        self.get(index).map(AsRef::as_ref)
    }
}

impl<T, S: AsRef<[T]>> ChannelBuffers<T> for Vec<S> {
    fn channel_count(&self) -> usize {
        self.len()
    }

    fn channel(&self, index: usize) -> Option<&[T]> {
        self.get(index).map(AsRef::as_ref)
    }
}

impl<T, S: AsMut<[T]>> ChannelBuffersMut<T> for [S] {
    fn channel_count(&self) -> usize {
        self.len()
    }

    fn channel_mut(&mut self, index: usize) -> Option<&mut [T]> {
        self.get_mut(index).map(AsMut::as_mut)
    }
}

impl<T, S: AsMut<[T]>> ChannelBuffersMut<T> for Vec<S> {
    fn channel_count(&self) -> usize {
        self.len()
    }

    fn channel_mut(&mut self, index: usize) -> Option<&mut [T]> {
        self.get_mut(index).map(AsMut::as_mut)
    }
}

/// Write silence into `count` frames of every channel starting at `offset`
///
/// Channels shorter than `offset + count` are filled only up to their own end.
pub fn zero_channels<T, B>(dest: &mut B, offset: usize, count: usize)
where
    T: Default + Copy,
    B: ChannelBuffersMut<T> + ?Sized,
{
    if count == 0 {
        return;
    }
    for index in 0..dest.channel_count() {
        if let Some(channel) = dest.channel_mut(index) {
            let end = offset.saturating_add(count).min(channel.len());
            if let Some(region) = channel.get_mut(offset..end) {
                region.fill(T::default());
            }
        }
    }
}
