//! Resource name derivation.
//!
//! Both endpoints of a channel must resolve the same two names for the
//! handshake to succeed:
//! - segment: `<segment_dir>/Map<channel-name>`
//! - signal:  `<signal_prefix>Event<channel-name>`
//!
//! The namespace is configurable so tests (and multi-tenant deployments)
//! can scope channels under their own directory.

use crate::errors::ChannelError;
use std::path::PathBuf;

/// Namespace scope under which a channel's resources are created.
#[derive(Debug, Clone)]
pub struct Namespace {
    /// Directory holding segment backing files.
    pub segment_dir: PathBuf,
    /// Prefix for signal names. POSIX semaphore names must start with `/`.
    pub signal_prefix: String,
}

impl Default for Namespace {
    fn default() -> Self {
        Self {
            segment_dir: PathBuf::from("/dev/shm"),
            signal_prefix: "/".to_string(),
        }
    }
}

impl Namespace {
    pub fn new(segment_dir: impl Into<PathBuf>, signal_prefix: impl Into<String>) -> Self {
        Self {
            segment_dir: segment_dir.into(),
            signal_prefix: signal_prefix.into(),
        }
    }

    /// Path of the segment backing file for `channel`.
    pub fn segment_path(&self, channel: &str) -> PathBuf {
        self.segment_dir.join(format!("Map{channel}"))
    }

    /// Name of the signal object for `channel`.
    pub fn signal_name(&self, channel: &str) -> String {
        format!("{}Event{}", self.signal_prefix, channel)
    }
}

/// Channel names become path and semaphore-name components, so they must be
/// non-empty and free of separators.
pub(crate) fn validate_channel_name(name: &str) -> Result<(), ChannelError> {
    if name.is_empty() || name.contains('/') || name.contains('\0') {
        return Err(ChannelError::InvalidName(name.to_string()));
    }
    Ok(())
}
