//! Point-to-point cross-process channel over two named OS resources: a
//! shared memory segment carrying one fixed-size payload and a binary
//! signal announcing "new data available".
//!
//! The publisher creates both resources and owns them; a subscriber opens
//! them by name, retrying until the publisher is up, then blocks on the
//! signal and reads the payload through a scoped view. One publisher, one
//! subscriber; payload types must be [`bytemuck::Pod`].

pub mod config;
pub mod errors;
pub mod names;
pub mod publisher;
pub mod segment;
pub mod signal;
pub mod subscriber;
#[cfg(test)]
pub(crate) mod test_support;
pub mod view;

pub use config::{
    PublisherConfig, SegmentCreateConfig, SegmentOpenConfig, SignalCreateConfig, SignalOpenConfig,
    SubscriberConfig, ViewAccess, ViewConfig,
};
pub use errors::ChannelError;
pub use names::Namespace;
pub use publisher::Publisher;
pub use signal::SignalWait;
pub use subscriber::{ConnectionState, Subscriber};
pub use view::PayloadView;
