use std::time::{Duration, Instant};

/// Returned when a resource did not come up before the deadline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WaitTimeout {
    pub resource_name: String,
    pub waited: Duration,
}

impl std::fmt::Display for WaitTimeout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} did not come up within {:?}",
            self.resource_name, self.waited
        )
    }
}

impl std::error::Error for WaitTimeout {}

/// Retry `connect` until it succeeds or `timeout` elapses, sleeping
/// `poll_interval` between attempts.
///
/// The first attempt runs immediately; a zero or already-elapsed timeout
/// makes at most one attempt. Each failure is logged at debug level only,
/// since a resource that is not up yet is the expected case while the
/// producing process is still starting.
pub fn wait_for_resource<F, T, E>(
    mut connect: F,
    timeout: Duration,
    poll_interval: Duration,
    resource_name: &str,
) -> Result<T, WaitTimeout>
where
    F: FnMut() -> Result<T, E>,
    E: std::fmt::Display,
{
    let start = Instant::now();
    let deadline = start.checked_add(timeout);

    while deadline.is_none_or(|d| Instant::now() < d) {
        match connect() {
            Ok(resource) => {
                tracing::info!("{} connected", resource_name);
                return Ok(resource);
            }
            Err(e) => {
                tracing::debug!("Waiting for {} ({})", resource_name, e);
                std::thread::sleep(poll_interval);
            }
        }
    }

    Err(WaitTimeout {
        resource_name: resource_name.to_string(),
        waited: start.elapsed(),
    })
}

#[cfg(feature = "async")]
pub async fn wait_for_resource_async<F, T, E>(
    mut connect: F,
    timeout: Duration,
    poll_interval: Duration,
    resource_name: &str,
) -> Result<T, WaitTimeout>
where
    F: FnMut() -> Result<T, E>,
    E: std::fmt::Display,
{
    let start = Instant::now();
    let deadline = start.checked_add(timeout);

    while deadline.is_none_or(|d| Instant::now() < d) {
        match connect() {
            Ok(resource) => {
                tracing::info!("{} connected", resource_name);
                return Ok(resource);
            }
            Err(e) => {
                tracing::debug!("Waiting for {} ({})", resource_name, e);
                tokio::time::sleep(poll_interval).await;
            }
        }
    }

    Err(WaitTimeout {
        resource_name: resource_name.to_string(),
        waited: start.elapsed(),
    })
}
