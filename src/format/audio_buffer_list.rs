//! Buffer list descriptor in the style of a system audio callback
//!
//! Each buffer carries its channel's samples and a declared size in bytes.
//! The usable length of a channel is the smaller of the declared byte size
//! (converted to elements) and the slice actually supplied.

use super::{ChannelBuffers, ChannelBuffersMut};

fn declared_len<T>(data_byte_size: usize, available: usize) -> usize {
    match std::mem::size_of::<T>() {
        0 => available,
        size => (data_byte_size / size).min(available),
    }
}

/// One non-interleaved channel of read-only samples
#[derive(Debug, Clone, Copy)]
pub struct AudioBuffer<'a, T> {
    /// Declared size of `data` in bytes
    pub data_byte_size: usize,
    /// Sample storage
    pub data: &'a [T],
}

impl<'a, T> AudioBuffer<'a, T> {
    /// Wrap a slice, declaring its full size
    #[must_use]
    pub fn new(data: &'a [T]) -> Self {
        Self {
            data_byte_size: std::mem::size_of_val(data),
            data,
        }
    }

    /// Wrap a slice with an explicit declared byte size
    #[must_use]
    pub fn with_byte_size(data: &'a [T], data_byte_size: usize) -> Self {
        Self {
            data_byte_size,
            data,
        }
    }

    /// Usable samples for this channel
    #[must_use]
    pub fn samples(&self) -> &'a [T] {
        let data: &'a [T] = self.data;
        &data[..declared_len::<T>(self.data_byte_size, data.len())]
    }
}

/// One non-interleaved channel of writable samples
#[derive(Debug)]
pub struct AudioBufferMut<'a, T> {
    /// Declared size of `data` in bytes
    pub data_byte_size: usize,
    /// Sample storage
    pub data: &'a mut [T],
}

impl<'a, T> AudioBufferMut<'a, T> {
    /// Wrap a slice, declaring its full size
    #[must_use]
    pub fn new(data: &'a mut [T]) -> Self {
        Self {
            data_byte_size: std::mem::size_of_val(data),
            data,
        }
    }

    /// Wrap a slice with an explicit declared byte size
    #[must_use]
    pub fn with_byte_size(data: &'a mut [T], data_byte_size: usize) -> Self {
        Self {
            data_byte_size,
            data,
        }
    }

    /// Usable samples for this channel
    pub fn samples_mut(&mut self) -> &mut [T] {
        let len = declared_len::<T>(self.data_byte_size, self.data.len());
        &mut self.data[..len]
    }
}

/// Read-only list of channel buffers
#[derive(Debug, Clone, Copy)]
pub struct AudioBufferList<'a, T> {
    buffers: &'a [AudioBuffer<'a, T>],
}

impl<'a, T> AudioBufferList<'a, T> {
    /// Describe `buffers`, one per channel
    #[must_use]
    pub fn new(buffers: &'a [AudioBuffer<'a, T>]) -> Self {
        Self { buffers }
    }

    /// Number of buffers in the list
    #[must_use]
    pub fn number_buffers(&self) -> usize {
        self.buffers.len()
    }
}

impl<T> ChannelBuffers<T> for AudioBufferList<'_, T> {
    fn channel_count(&self) -> usize {
        self.buffers.len()
    }

    fn channel(&self, index: usize) -> Option<&[T]> {
        self.buffers.get(index).map(AudioBuffer::samples)
    }
}

/// Writable list of channel buffers
#[derive(Debug)]
pub struct AudioBufferListMut<'a, 'b, T> {
    buffers: &'b mut [AudioBufferMut<'a, T>],
}

impl<'a, 'b, T> AudioBufferListMut<'a, 'b, T> {
    /// Describe `buffers`, one per channel
    #[must_use]
    pub fn new(buffers: &'b mut [AudioBufferMut<'a, T>]) -> Self {
        Self { buffers }
    }

    /// Number of buffers in the list
    #[must_use]
    pub fn number_buffers(&self) -> usize {
        self.buffers.len()
    }
}

impl<T> ChannelBuffersMut<T> for AudioBufferListMut<'_, '_, T> {
    fn channel_count(&self) -> usize {
        self.buffers.len()
    }

    fn channel_mut(&mut self, index: usize) -> Option<&mut [T]> {
        self.buffers.get_mut(index).map(AudioBufferMut::samples_mut)
    }
}
