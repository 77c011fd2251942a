//! Helpers shared by the unit tests: segments live in a per-test temp
//! directory, while signal names share the global semaphore namespace and
//! therefore get a process-unique suffix.

use crate::names::Namespace;
use std::path::Path;
use std::sync::atomic::{AtomicU32, Ordering};

static CHANNEL_COUNTER: AtomicU32 = AtomicU32::new(0);

pub(crate) fn unique_channel(tag: &str) -> String {
    format!(
        "{}_{}_{}",
        tag,
        std::process::id(),
        CHANNEL_COUNTER.fetch_add(1, Ordering::Relaxed)
    )
}

pub(crate) fn test_namespace(dir: &Path) -> Namespace {
    Namespace::new(dir, "/")
}
