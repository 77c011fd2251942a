use crate::config::{SegmentCreateConfig, SegmentOpenConfig, ViewConfig};
use crate::errors::ChannelError;
use memmap2::{Mmap, MmapMut, MmapOptions};
use std::fs::{File, OpenOptions};
use std::io::ErrorKind;
use std::os::fd::AsRawFd;
use std::os::unix::fs::OpenOptionsExt;
use std::path::{Path, PathBuf};

/// Named shared memory segment backed by a file in the namespace directory.
///
/// The creating endpoint owns the backing file and removes it on drop;
/// an opening endpoint only closes its handle. Mapped views are produced
/// per operation and unmap when dropped.
pub struct Segment {
    file: File,
    path: PathBuf,
    capacity: usize,
    writable: bool,
    is_owner: bool,
}

impl Segment {
    /// Create (or reuse) the backing file, grow it to `capacity` if it is
    /// smaller, and zero the region.
    pub(crate) fn create(
        path: &Path,
        capacity: usize,
        config: &SegmentCreateConfig,
    ) -> Result<Self, ChannelError> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .mode(config.mode)
            .open(path)?;

        // Only resize if the file is smaller than needed
        if file.metadata()?.len() < capacity as u64 {
            file.set_len(capacity as u64)?;
        }
        let capacity = file.metadata()?.len() as usize;

        let segment = Self {
            file,
            path: path.to_path_buf(),
            capacity,
            writable: true,
            is_owner: true,
        };

        // A reused file may hold bytes from a previous run.
        let mut region = unsafe { MmapOptions::new().len(capacity).map_mut(&segment.file)? };
        region.fill(0);

        tracing::debug!(path = %segment.path.display(), capacity, "created segment");
        Ok(segment)
    }

    /// Open an existing segment and validate that it can hold `min_len`
    /// bytes. A missing file is the expected state while the publisher is
    /// still starting and is reported as [`ChannelError::SegmentNotFound`].
    pub(crate) fn open(
        path: &Path,
        min_len: usize,
        config: &SegmentOpenConfig,
    ) -> Result<Self, ChannelError> {
        let mut options = OpenOptions::new();
        options.read(true);
        if !config.read_only {
            options.write(true);
        }

        let file = match options.open(path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(ChannelError::SegmentNotFound(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        if config.inheritable {
            // std opens every file close-on-exec; clear the flag when the
            // handle must survive exec into a child process.
            let ret = unsafe { libc::fcntl(file.as_raw_fd(), libc::F_SETFD, 0) };
            if ret != 0 {
                return Err(std::io::Error::last_os_error().into());
            }
        }

        let capacity = file.metadata()?.len() as usize;
        if capacity < min_len {
            return Err(ChannelError::SizeMismatch {
                expected: min_len,
                actual: capacity,
            });
        }

        tracing::debug!(path = %path.display(), capacity, "opened segment");
        Ok(Self {
            file,
            path: path.to_path_buf(),
            capacity,
            writable: !config.read_only,
            is_owner: false,
        })
    }

    /// Map a read-only view of the configured range.
    pub(crate) fn map_view(
        &self,
        view: &ViewConfig,
        payload_size: usize,
    ) -> Result<Mmap, ChannelError> {
        let len = view.resolved_len(payload_size);
        self.check_bounds(view.offset, len)?;
        let mmap = unsafe {
            MmapOptions::new()
                .offset(view.offset)
                .len(len)
                .map(&self.file)?
        };
        Ok(mmap)
    }

    /// Map a writable view of the configured range.
    pub(crate) fn map_view_mut(
        &self,
        view: &ViewConfig,
        payload_size: usize,
    ) -> Result<MmapMut, ChannelError> {
        if !self.writable {
            return Err(ChannelError::ReadOnlySegment);
        }
        let len = view.resolved_len(payload_size);
        self.check_bounds(view.offset, len)?;
        let mmap = unsafe {
            MmapOptions::new()
                .offset(view.offset)
                .len(len)
                .map_mut(&self.file)?
        };
        Ok(mmap)
    }

    fn check_bounds(&self, offset: u64, len: usize) -> Result<(), ChannelError> {
        match offset.checked_add(len as u64) {
            Some(end) if end <= self.capacity as u64 => Ok(()),
            _ => Err(ChannelError::ViewOutOfBounds {
                offset,
                len,
                capacity: self.capacity,
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Give up ownership of the backing file so dropping this handle does
    /// not unlink a name that has been handed to a successor segment.
    pub(crate) fn disown(&mut self) {
        self.is_owner = false;
    }
}

impl Drop for Segment {
    fn drop(&mut self) {
        if self.is_owner {
            if let Err(e) = std::fs::remove_file(&self.path) {
                tracing::debug!(path = %self.path.display(), error = %e, "segment file already gone");
            }
        }
    }
}
