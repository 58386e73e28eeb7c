// ai-services-core/src/application/wait.rs

use crate::ports::ClusterError;
use miette::Diagnostic;
use std::future::Future;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{Instant, sleep};
use tracing::debug;

#[derive(Error, Debug, Diagnostic)]
pub enum WaitError {
    #[error("timed out after {}s waiting for {what}", waited.as_secs())]
    #[diagnostic(
        code(ai_services::wait::timeout),
        help("The resource did not appear in time. Check the operator installation with 'oc get csv -A'.")
    )]
    Timeout { what: String, waited: Duration },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Cluster(#[from] ClusterError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollSettings {
    pub interval: Duration,
    pub timeout: Duration,
}

impl Default for PollSettings {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(5),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Calls `probe` immediately, then every `interval`, until it returns a value.
///
/// `NotFound` means "not there yet" and is retried; any other error aborts.
pub async fn poll_until_ready<T, F, Fut>(
    what: &str,
    settings: PollSettings,
    mut probe: F,
) -> Result<T, WaitError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClusterError>>,
{
    let started = Instant::now();
    let deadline = started + settings.timeout;
    let mut attempt = 0u32;

    loop {
        attempt += 1;
        match probe().await {
            Ok(value) => {
                debug!(what, attempt, "Resource is ready");
                return Ok(value);
            }
            Err(err) if err.is_not_found() => {
                debug!(what, attempt, "Resource not found yet");
            }
            Err(err) => return Err(err.into()),
        }

        let now = Instant::now();
        if now >= deadline {
            return Err(WaitError::Timeout {
                what: what.to_string(),
                waited: now - started,
            });
        }
        sleep(settings.interval.min(deadline - now)).await;
    }
}
