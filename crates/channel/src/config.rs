//! Per-endpoint configuration.
//!
//! Creation and open parameters take effect when the owning endpoint next
//! creates or opens its resources; they never reconfigure resources that
//! already exist. View configuration is consulted on every map, so it can
//! be changed between transfers.

/// Access mode for a mapped view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewAccess {
    Read,
    ReadWrite,
}

/// Byte range and access mode used when mapping a view of a segment.
#[derive(Debug, Clone)]
pub struct ViewConfig {
    pub access: ViewAccess,
    /// Byte offset into the segment.
    pub offset: u64,
    /// Length of the view; `None` maps the full payload size.
    pub len: Option<usize>,
}

impl ViewConfig {
    /// Read-only view over the full payload, from the start of the segment.
    pub fn read() -> Self {
        Self {
            access: ViewAccess::Read,
            offset: 0,
            len: None,
        }
    }

    /// Read-write view over the full payload, from the start of the segment.
    pub fn read_write() -> Self {
        Self {
            access: ViewAccess::ReadWrite,
            offset: 0,
            len: None,
        }
    }

    /// Restrict the view to an explicit byte range.
    pub fn with_range(mut self, offset: u64, len: usize) -> Self {
        self.offset = offset;
        self.len = Some(len);
        self
    }

    pub(crate) fn resolved_len(&self, payload_size: usize) -> usize {
        self.len.unwrap_or(payload_size)
    }
}

/// Parameters for creating a segment.
#[derive(Debug, Clone)]
pub struct SegmentCreateConfig {
    /// Permission bits of the backing file.
    pub mode: u32,
    /// Segment capacity in bytes; `None` sizes it to the payload.
    pub size: Option<usize>,
}

impl Default for SegmentCreateConfig {
    fn default() -> Self {
        Self {
            mode: 0o600,
            size: None,
        }
    }
}

/// Parameters for opening an existing segment.
#[derive(Debug, Clone)]
pub struct SegmentOpenConfig {
    /// Open the backing file without write access.
    pub read_only: bool,
    /// Leave the file handle inheritable across exec.
    pub inheritable: bool,
}

impl Default for SegmentOpenConfig {
    fn default() -> Self {
        Self {
            read_only: true,
            inheritable: false,
        }
    }
}

/// Parameters for creating a signal.
#[derive(Debug, Clone)]
pub struct SignalCreateConfig {
    /// Permission bits of the semaphore.
    pub mode: u32,
    /// A manual-reset signal stays set after a successful wait until it is
    /// explicitly reset; the default auto-reset signal is consumed by the
    /// wait that observes it.
    pub manual_reset: bool,
    /// Create the signal already set.
    pub initially_signaled: bool,
}

impl Default for SignalCreateConfig {
    fn default() -> Self {
        Self {
            mode: 0o600,
            manual_reset: false,
            initially_signaled: false,
        }
    }
}

/// Parameters for opening an existing signal.
///
/// The reset behavior is applied on the waiting side, so the subscriber's
/// flag must agree with the publisher's [`SignalCreateConfig::manual_reset`].
#[derive(Debug, Clone, Default)]
pub struct SignalOpenConfig {
    pub manual_reset: bool,
}

/// Publisher-side defaults: segment and signal creation plus the write view.
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    pub segment: SegmentCreateConfig,
    pub signal: SignalCreateConfig,
    pub write_view: ViewConfig,
}

impl Default for PublisherConfig {
    fn default() -> Self {
        Self {
            segment: SegmentCreateConfig::default(),
            signal: SignalCreateConfig::default(),
            write_view: ViewConfig::read_write(),
        }
    }
}

/// Subscriber-side defaults: segment and signal open plus the read view.
#[derive(Debug, Clone)]
pub struct SubscriberConfig {
    pub segment: SegmentOpenConfig,
    pub signal: SignalOpenConfig,
    pub read_view: ViewConfig,
}

impl Default for SubscriberConfig {
    fn default() -> Self {
        Self {
            segment: SegmentOpenConfig::default(),
            signal: SignalOpenConfig::default(),
            read_view: ViewConfig::read(),
        }
    }
}
