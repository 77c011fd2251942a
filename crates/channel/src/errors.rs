use nix::errno::Errno;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ChannelError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("invalid channel name: {0:?}")]
    InvalidName(String),

    #[error("segment not found: {0}")]
    SegmentNotFound(PathBuf),

    #[error("signal operation {op} failed: {errno}")]
    SignalError { op: &'static str, errno: Errno },

    #[error("connection timed out after {waited:?}")]
    ConnectTimeout { waited: Duration },

    #[error("subscriber is not connected")]
    NotConnected,

    #[error("size mismatch: need {expected} bytes, have {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    #[error("view range {offset}+{len} exceeds segment capacity {capacity}")]
    ViewOutOfBounds {
        offset: u64,
        len: usize,
        capacity: usize,
    },

    #[error("segment was opened read-only")]
    ReadOnlySegment,

    #[error("write view is configured without write access")]
    ViewNotWritable,

    #[error("mapped bytes are not aligned for the payload type")]
    Misaligned,
}
