use crate::config::{SegmentOpenConfig, SignalOpenConfig, SubscriberConfig, ViewConfig};
use crate::errors::ChannelError;
use crate::names::{self, Namespace};
use crate::segment::Segment;
use crate::signal::{Signal, SignalWait};
use crate::view::PayloadView;
use bytemuck::Pod;
use common::wait_for_resource;
use std::marker::PhantomData;
use std::mem;
use std::time::Duration;

/// Connection lifecycle of a subscriber. `Connected` is terminal: once a
/// subscriber has acquired its resources it never transitions back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
}

/// Subscribing endpoint of a channel.
///
/// Construction touches no OS resources; `connect` opens the publisher's
/// segment and signal by name, retrying until the timeout. One subscriber
/// per channel: the auto-reset signal delivers each publication to a
/// single waiter.
pub struct Subscriber<T> {
    namespace: Namespace,
    channel: String,
    config: SubscriberConfig,
    state: ConnectionState,
    resources: Option<(Segment, Signal)>,
    _payload: PhantomData<T>,
}

impl<T: Pod> Subscriber<T> {
    /// Bind to a channel under the default namespace.
    pub fn new(channel: &str) -> Result<Self, ChannelError> {
        Self::new_in(Namespace::default(), channel, SubscriberConfig::default())
    }

    pub fn new_in(
        namespace: Namespace,
        channel: &str,
        config: SubscriberConfig,
    ) -> Result<Self, ChannelError> {
        names::validate_channel_name(channel)?;
        Ok(Self {
            namespace,
            channel: channel.to_string(),
            config,
            state: ConnectionState::Disconnected,
            resources: None,
            _payload: PhantomData,
        })
    }

    /// Open the channel's segment and signal, retrying every
    /// `poll_interval` until `timeout` elapses.
    ///
    /// Each failed attempt drops whatever partial handle it obtained before
    /// sleeping, so an iteration never leaks a half-open pair. A subscriber
    /// that is already connected returns immediately.
    pub fn connect(&mut self, timeout: Duration, poll_interval: Duration) -> Result<(), ChannelError> {
        if self.state == ConnectionState::Connected {
            return Ok(());
        }
        self.state = ConnectionState::Connecting;

        let segment_path = self.namespace.segment_path(&self.channel);
        let signal_name = self.namespace.signal_name(&self.channel);
        let segment_config = &self.config.segment;
        let signal_config = &self.config.signal;

        let attempt = || -> Result<(Segment, Signal), ChannelError> {
            let segment = Segment::open(&segment_path, mem::size_of::<T>(), segment_config)?;
            let signal = Signal::open(&signal_name, signal_config)?;
            Ok((segment, signal))
        };

        match wait_for_resource(attempt, timeout, poll_interval, &self.channel) {
            Ok(pair) => {
                self.resources = Some(pair);
                self.state = ConnectionState::Connected;
                tracing::info!(channel = %self.channel, "subscriber connected");
                Ok(())
            }
            Err(elapsed) => {
                self.state = ConnectionState::Disconnected;
                Err(ChannelError::ConnectTimeout {
                    waited: elapsed.waited,
                })
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// Block until the publisher sets the signal or `timeout` elapses;
    /// `None` waits indefinitely.
    pub fn wait_for_signal(&self, timeout: Option<Duration>) -> Result<SignalWait, ChannelError> {
        self.signal()?.wait(timeout)
    }

    /// Consume the signal if it is currently set, without blocking.
    pub fn try_signal(&self) -> Result<bool, ChannelError> {
        self.signal()?.try_wait()
    }

    /// Drain a manual-reset signal back to the unsignaled state.
    pub fn reset_signal(&self) -> Result<(), ChannelError> {
        self.signal()?.reset()
    }

    /// Map the configured read view and return it.
    ///
    /// The view is a live window onto the segment: a publish racing this
    /// read can tear the observed bytes, so drain the payload right after a
    /// successful `wait_for_signal`.
    pub fn receive(&self) -> Result<PayloadView<T>, ChannelError> {
        let (segment, _) = self
            .resources
            .as_ref()
            .ok_or(ChannelError::NotConnected)?;
        let mmap = segment.map_view(&self.config.read_view, mem::size_of::<T>())?;
        Ok(PayloadView::new(mmap))
    }

    /// Reconfigure the read view; consulted on every `receive`, no
    /// reconnection required.
    pub fn set_read_view(&mut self, view: ViewConfig) {
        self.config.read_view = view;
    }

    /// Reconfigure segment opening; must be set before `connect`.
    pub fn set_segment_open_config(&mut self, config: SegmentOpenConfig) {
        self.config.segment = config;
    }

    /// Reconfigure signal opening; must be set before `connect`.
    pub fn set_signal_open_config(&mut self, config: SignalOpenConfig) {
        self.config.signal = config;
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    fn signal(&self) -> Result<&Signal, ChannelError> {
        self.resources
            .as_ref()
            .map(|(_, signal)| signal)
            .ok_or(ChannelError::NotConnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{test_namespace, unique_channel};
    use tempfile::tempdir;

    #[test]
    fn test_operations_require_connection() {
        let dir = tempdir().unwrap();
        let channel = unique_channel("unconnected");
        let subscriber =
            Subscriber::<u64>::new_in(test_namespace(dir.path()), &channel, SubscriberConfig::default())
                .unwrap();

        assert!(!subscriber.is_connected());
        assert_eq!(subscriber.state(), ConnectionState::Disconnected);
        assert!(matches!(
            subscriber.receive(),
            Err(ChannelError::NotConnected)
        ));
        assert!(matches!(
            subscriber.wait_for_signal(Some(Duration::from_millis(1))),
            Err(ChannelError::NotConnected)
        ));
    }

    #[test]
    fn test_zero_timeout_connect_fails_fast() {
        let dir = tempdir().unwrap();
        let channel = unique_channel("zero");
        let mut subscriber =
            Subscriber::<u64>::new_in(test_namespace(dir.path()), &channel, SubscriberConfig::default())
                .unwrap();

        let result = subscriber.connect(Duration::ZERO, Duration::from_secs(10));
        assert!(matches!(result, Err(ChannelError::ConnectTimeout { .. })));
        assert_eq!(subscriber.state(), ConnectionState::Disconnected);
    }
}
