//! Generic list of typed channel buffers with element counts

use super::{ChannelBuffers, ChannelBuffersMut};

/// Read-only channel: samples plus the number of valid elements
#[derive(Debug, Clone, Copy)]
pub struct ChannelSlice<'a, T> {
    /// Sample storage
    pub data: &'a [T],
    /// Declared number of valid elements
    pub element_count: usize,
}

impl<'a, T> ChannelSlice<'a, T> {
    /// Wrap a slice, every element valid
    #[must_use]
    pub fn new(data: &'a [T]) -> Self {
        Self {
            element_count: data.len(),
            data,
        }
    }

    /// Wrap a slice with an explicit element count
    #[must_use]
    pub fn with_count(data: &'a [T], element_count: usize) -> Self {
        Self {
            data,
            element_count,
        }
    }
}

/// Writable channel: samples plus the number of usable elements
#[derive(Debug)]
pub struct ChannelSliceMut<'a, T> {
    /// Sample storage
    pub data: &'a mut [T],
    /// Declared number of usable elements
    pub element_count: usize,
}

impl<'a, T> ChannelSliceMut<'a, T> {
    /// Wrap a slice, every element usable
    #[must_use]
    pub fn new(data: &'a mut [T]) -> Self {
        Self {
            element_count: data.len(),
            data,
        }
    }

    /// Wrap a slice with an explicit element count
    #[must_use]
    pub fn with_count(data: &'a mut [T], element_count: usize) -> Self {
        Self {
            data,
            element_count,
        }
    }
}

/// Read-only list of typed channel buffers
#[derive(Debug, Clone, Copy)]
pub struct BufferList<'a, T> {
    channels: &'a [ChannelSlice<'a, T>],
}

impl<'a, T> BufferList<'a, T> {
    /// Describe `channels`
    #[must_use]
    pub fn new(channels: &'a [ChannelSlice<'a, T>]) -> Self {
        Self { channels }
    }
}

impl<T> ChannelBuffers<T> for BufferList<'_, T> {
    fn channel_count(&self) -> usize {
        self.channels.len()
    }

    fn channel(&self, index: usize) -> Option<&[T]> {
        self.channels.get(index).map(|channel| {
            let len = channel.element_count.min(channel.data.len());
            &channel.data[..len]
        })
    }
}

/// Writable list of typed channel buffers
#[derive(Debug)]
pub struct BufferListMut<'a, 'b, T> {
    channels: &'b mut [ChannelSliceMut<'a, T>],
}

impl<'a, 'b, T> BufferListMut<'a, 'b, T> {
    /// Describe `channels`
    #[must_use]
    pub fn new(channels: &'b mut [ChannelSliceMut<'a, T>]) -> Self {
        Self { channels }
    }
}

impl<T> ChannelBuffersMut<T> for BufferListMut<'_, '_, T> {
    fn channel_count(&self) -> usize {
        self.channels.len()
    }

    fn channel_mut(&mut self, index: usize) -> Option<&mut [T]> {
        self.channels.get_mut(index).map(|channel| {
            let len = channel.element_count.min(channel.data.len());
            &mut channel.data[..len]
        })
    }
}
