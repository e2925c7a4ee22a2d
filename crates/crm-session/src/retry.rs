//! Fixed-interval retry for transient backend failures.

use std::time::Duration;

use tokio::time::sleep;

/// Retry schedule with a flat delay between attempts.
///
/// Spacing is fixed rather than exponential: the dominant transient
/// failure here is identity propagation, which settles on the backend's
/// own schedule.
#[derive(Debug, Clone)]
pub struct RetrySchedule {
    /// Maximum number of attempts, including the first
    pub max_attempts: u32,
    /// Delay between consecutive attempts
    pub delay: Duration,
}

impl RetrySchedule {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }
}

impl From<&crm_config::SaveConfig> for RetrySchedule {
    fn from(config: &crm_config::SaveConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            delay: config.retry_delay(),
        }
    }
}

/// Execute an async operation with retry.
///
/// Returns the value together with the number of attempts consumed.
/// Fails fast on non-retryable errors; otherwise retries until the
/// schedule is exhausted and returns the last error.
pub async fn with_retry<F, Fut, T, E>(
    schedule: &RetrySchedule,
    operation_name: &str,
    mut operation: F,
) -> Result<(T, u32), E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display + IsRetryable,
{
    let mut attempts = 0;

    loop {
        attempts += 1;

        match operation().await {
            Ok(result) => {
                if attempts > 1 {
                    log::info!("{} succeeded after {} attempts", operation_name, attempts);
                }
                return Ok((result, attempts));
            }
            Err(e) => {
                if !e.is_retryable() || attempts >= schedule.max_attempts {
                    log::warn!("{} failed after {} attempts: {}", operation_name, attempts, e);
                    return Err(e);
                }

                log::debug!(
                    "{} attempt {} failed: {}. Retrying in {:?}",
                    operation_name,
                    attempts,
                    e,
                    schedule.delay
                );

                sleep(schedule.delay).await;
            }
        }
    }
}

/// Trait for errors that can indicate retryability
pub trait IsRetryable {
    fn is_retryable(&self) -> bool;
}

impl IsRetryable for crm_client::ClientError {
    fn is_retryable(&self) -> bool {
        self.is_retryable()
    }
}
