use anyhow::Context;
use channel::Publisher;
use common::setup_logging;
use loopback::{LoopbackConfig, Sample};
use std::time::{SystemTime, UNIX_EPOCH};

fn main() -> anyhow::Result<()> {
    let config = LoopbackConfig::from_env()?;
    setup_logging(config.environment.clone());

    let mut publisher = Publisher::<Sample>::create(&config.channel_name)
        .context("Failed to create channel resources - check /dev/shm availability")?;

    tracing::info!(channel = %config.channel_name, "publishing samples");

    let mut sequence = 0u64;
    loop {
        sequence += 1;
        let produced_at_ns = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .context("Time went backwards")?
            .as_nanos() as u64;

        let sample = Sample::new(sequence, produced_at_ns);
        match publisher.publish(&sample) {
            Ok(()) => tracing::debug!(sequence, "published sample"),
            Err(e) => tracing::error!(sequence, error = %e, "publish failed - skipping"),
        }

        std::thread::sleep(config.publish_interval);
    }
}
