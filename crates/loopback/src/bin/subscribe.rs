use anyhow::Context;
use channel::{SignalWait, Subscriber};
use common::setup_logging;
use loopback::{LoopbackConfig, Sample};
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    let config = LoopbackConfig::from_env()?;
    setup_logging(config.environment.clone());

    let mut subscriber = Subscriber::<Sample>::new(&config.channel_name)?;
    subscriber
        .connect(config.connect_timeout, config.poll_interval)
        .context("No publisher appeared before the connect deadline")?;

    tracing::info!(channel = %config.channel_name, "connected, waiting for samples");

    loop {
        match subscriber.wait_for_signal(Some(Duration::from_secs(1)))? {
            SignalWait::Signaled => {
                let sample = subscriber.receive()?.read()?;
                tracing::info!(
                    sequence = sample.sequence,
                    produced_at_ns = sample.produced_at_ns,
                    "received sample"
                );
            }
            SignalWait::TimedOut => {
                tracing::debug!("no sample within the last second");
            }
        }
    }
}
