use crate::errors::ChannelError;
use bytemuck::Pod;
use memmap2::Mmap;
use std::marker::PhantomData;
use std::mem;

/// Read-only window onto a segment, unmapped when dropped.
///
/// The bytes are shared with the publishing process and can change while
/// the view is held; drain the payload promptly after a successful wait.
pub struct PayloadView<T> {
    mmap: Mmap,
    _payload: PhantomData<T>,
}

impl<T: Pod> PayloadView<T> {
    pub(crate) fn new(mmap: Mmap) -> Self {
        Self {
            mmap,
            _payload: PhantomData,
        }
    }

    /// Raw bytes of the mapped range.
    pub fn bytes(&self) -> &[u8] {
        &self.mmap
    }

    /// Reinterpret the mapped range as the payload type.
    ///
    /// Fails if the view length does not equal the payload size, or if the
    /// configured offset landed the mapping on an address unaligned for `T`.
    pub fn payload(&self) -> Result<&T, ChannelError> {
        let bytes = self.bytes();
        if bytes.len() != mem::size_of::<T>() {
            return Err(ChannelError::SizeMismatch {
                expected: mem::size_of::<T>(),
                actual: bytes.len(),
            });
        }
        bytemuck::try_from_bytes(bytes).map_err(|_| ChannelError::Misaligned)
    }

    /// Copy the payload out of shared memory.
    pub fn read(&self) -> Result<T, ChannelError> {
        Ok(*self.payload()?)
    }
}
