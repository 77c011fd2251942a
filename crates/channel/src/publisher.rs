use crate::config::{PublisherConfig, SegmentCreateConfig, SignalCreateConfig, ViewAccess, ViewConfig};
use crate::errors::ChannelError;
use crate::names::{self, Namespace};
use crate::segment::Segment;
use crate::signal::Signal;
use bytemuck::Pod;
use std::marker::PhantomData;
use std::mem;

/// Publishing endpoint of a channel.
///
/// Construction allocates the named segment and signal immediately; both
/// are released (and their names unlinked) when the publisher is dropped.
/// Payload delivery is fire-and-forget: `publish` copies the bytes in and
/// sets the signal, with no acknowledgement from the subscriber.
pub struct Publisher<T> {
    namespace: Namespace,
    channel: String,
    config: PublisherConfig,
    segment: Segment,
    signal: Signal,
    _payload: PhantomData<T>,
}

impl<T: Pod> Publisher<T> {
    /// Create a channel under the default namespace.
    pub fn create(channel: &str) -> Result<Self, ChannelError> {
        Self::create_in(Namespace::default(), channel, PublisherConfig::default())
    }

    pub fn create_in(
        namespace: Namespace,
        channel: &str,
        config: PublisherConfig,
    ) -> Result<Self, ChannelError> {
        names::validate_channel_name(channel)?;
        let (segment, signal) = create_resources::<T>(&namespace, channel, &config)?;
        tracing::info!(channel, "publisher ready");
        Ok(Self {
            namespace,
            channel: channel.to_string(),
            config,
            segment,
            signal,
            _payload: PhantomData,
        })
    }

    /// Copy `payload` into the segment through the write view and set the
    /// signal.
    pub fn publish(&mut self, payload: &T) -> Result<(), ChannelError> {
        if self.config.write_view.access != ViewAccess::ReadWrite {
            return Err(ChannelError::ViewNotWritable);
        }

        let bytes = bytemuck::bytes_of(payload);
        let mut view = self
            .segment
            .map_view_mut(&self.config.write_view, mem::size_of::<T>())?;
        if view.len() < bytes.len() {
            return Err(ChannelError::SizeMismatch {
                expected: bytes.len(),
                actual: view.len(),
            });
        }

        view[..bytes.len()].copy_from_slice(bytes);
        self.signal.set()?;
        Ok(())
    }

    /// Re-create the segment and signal under the same names using the
    /// currently stored configuration.
    ///
    /// The old handles are neutralized first so that dropping them cannot
    /// unlink the names handed to the new resources. Subscribers connected
    /// to the previous incarnation keep their mapping of the segment but
    /// will not observe the new signal.
    pub fn recreate(&mut self) -> Result<(), ChannelError> {
        self.segment.disown();
        self.signal.disown();

        let (segment, signal) = create_resources::<T>(&self.namespace, &self.channel, &self.config)?;
        self.segment = segment;
        self.signal = signal;
        tracing::info!(channel = %self.channel, "publisher re-created channel resources");
        Ok(())
    }

    /// Reconfigure the write view; consulted on every `publish`.
    pub fn set_write_view(&mut self, view: ViewConfig) {
        self.config.write_view = view;
    }

    /// Reconfigure segment creation; takes effect at the next `recreate`.
    pub fn set_segment_config(&mut self, config: SegmentCreateConfig) {
        self.config.segment = config;
    }

    /// Reconfigure signal creation; takes effect at the next `recreate`.
    pub fn set_signal_config(&mut self, config: SignalCreateConfig) {
        self.config.signal = config;
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn segment_capacity(&self) -> usize {
        self.segment.capacity()
    }
}

fn create_resources<T: Pod>(
    namespace: &Namespace,
    channel: &str,
    config: &PublisherConfig,
) -> Result<(Segment, Signal), ChannelError> {
    let capacity = config.segment.size.unwrap_or(mem::size_of::<T>());
    let segment = Segment::create(&namespace.segment_path(channel), capacity, &config.segment)?;
    let signal = Signal::create(&namespace.signal_name(channel), &config.signal)?;
    Ok((segment, signal))
}
