//! Job completion polling.
//!
//! After submission the server hands back a status link. [`poll`] checks
//! that link on a fixed interval until it answers with something other
//! than `202 Accepted`, racing the checks against a deadline and an
//! optional cancellation token.
//!
//! The race is a single `select!` loop owned by one future, so exactly one
//! branch settles the poll. The ticker, the deadline and any in-flight
//! status request are dropped together when the future returns, so no
//! timer or late response can act after the outcome is decided. Status
//! requests are issued one at a time: a tick waits for the previous
//! request to finish before the next one is sent.

use std::time::Duration;

use tokio::time::{Instant, Interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::client::MetafoldClient;
use crate::config::ClientConfig;
use crate::error::{ClientError, ClientResult};
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// HTTP status the status endpoint returns while a job is still running.
pub const STATUS_IN_PROGRESS: u16 = 202;

/// Upper bound on the delay between status checks. Longer intervals
/// overflow `Instant` arithmetic.
const MAX_INTERVAL: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Timing and cancellation for one poll.
#[derive(Debug, Clone)]
pub struct PollOptions {
    /// Deadline, measured from the start of polling.
    pub timeout: Duration,
    /// Delay between status checks. The first check happens one interval
    /// after polling starts.
    pub interval: Duration,
    /// Stops polling early when cancelled.
    pub cancel: Option<CancellationToken>,
}

impl PollOptions {
    pub fn from_config(config: &ClientConfig) -> Self {
        Self {
            timeout: config.run_timeout,
            interval: config.poll_interval,
            cancel: None,
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn cancel_on(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }
}

impl Default for PollOptions {
    fn default() -> Self {
        Self {
            timeout: crate::config::DEFAULT_RUN_TIMEOUT,
            interval: crate::config::DEFAULT_POLL_INTERVAL,
            cancel: None,
        }
    }
}

/// Poll `url` until it returns a terminal response.
///
/// Resolves with the first non-`202` success response. Error responses
/// and transport failures end polling immediately and are returned as-is.
/// Fails with [`ClientError::PollTimeout`] when the deadline elapses and
/// [`ClientError::PollCancelled`] when the token fires.
pub async fn poll<T: Transport>(
    client: &MetafoldClient<T>,
    url: &str,
    options: &PollOptions,
) -> ClientResult<ApiResponse> {
    let started = Instant::now();
    let deadline = tokio::time::sleep(options.timeout);
    tokio::pin!(deadline);

    let cancelled = async {
        match &options.cancel {
            Some(token) => token.cancelled().await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(cancelled);

    // `interval_at` panics on a zero period.
    let period = options
        .interval
        .clamp(Duration::from_millis(1), MAX_INTERVAL);
    let mut ticker = tokio::time::interval_at(started + period, period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut attempt = 0u32;

    loop {
        tokio::select! {
            biased;

            _ = &mut cancelled => {
                tracing::warn!(status_url = %url, attempt, "Job polling cancelled");
                return Err(ClientError::PollCancelled);
            }
            _ = &mut deadline => {
                let elapsed = started.elapsed();
                tracing::warn!(
                    status_url = %url,
                    attempt,
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Job polling timed out",
                );
                return Err(ClientError::PollTimeout { elapsed });
            }
            result = check_status(client, url, &mut ticker) => {
                attempt += 1;
                let response = result?;
                if response.status == STATUS_IN_PROGRESS {
                    tracing::debug!(status_url = %url, attempt, "Job still in progress");
                    continue;
                }
                tracing::debug!(
                    status_url = %url,
                    attempt,
                    status = response.status,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Job reached terminal status",
                );
                return Ok(response);
            }
        }
    }
}

/// Wait for the next tick, then issue one status request.
async fn check_status<T: Transport>(
    client: &MetafoldClient<T>,
    url: &str,
    ticker: &mut Interval,
) -> ClientResult<ApiResponse> {
    ticker.tick().await;
    client.execute(ApiRequest::get(url)).await
}
