use std::env;
use std::time::Duration;

pub use common::Environment;

#[derive(Debug, Clone)]
pub struct LoopbackConfig {
    pub environment: Environment,
    pub channel_name: String,
    pub connect_timeout: Duration,
    pub poll_interval: Duration,
    pub publish_interval: Duration,
}

impl LoopbackConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let environment = Environment::from_env();

        let channel_name = env::var("CHANNEL_NAME").unwrap_or_else(|_| "loopback".to_string());

        let connect_timeout_ms = env::var("CONNECT_TIMEOUT_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(5000);

        let poll_interval_ms = env::var("POLL_INTERVAL_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(100);

        let publish_interval_ms = env::var("PUBLISH_INTERVAL_MS")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(500);

        Ok(Self {
            environment,
            channel_name,
            connect_timeout: Duration::from_millis(connect_timeout_ms),
            poll_interval: Duration::from_millis(poll_interval_ms),
            publish_interval: Duration::from_millis(publish_interval_ms),
        })
    }
}
