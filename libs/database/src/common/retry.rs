use core_config::{ConfigError, FromEnv, env_parse};
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

/// Bounded, fixed-delay retry policy for establishing the store connection.
///
/// The store may come up after the service in a multi-process deployment, so
/// start-up keeps trying for a while before giving up. There is no backoff and
/// no jitter: every gap between attempts is exactly `delay`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, including the first one. Zero behaves as one.
    pub max_attempts: u32,

    /// Pause between two consecutive attempts
    pub delay: Duration,
}

impl RetryPolicy {
    /// 10 attempts, 2 seconds apart
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Attempts that will actually be made
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            delay: Duration::from_secs(2),
        }
    }
}

/// Environment variables:
/// - `DB_CONNECT_RETRIES` (default: 10)
/// - `DB_RETRY_DELAY_MS` (default: 2000)
impl FromEnv for RetryPolicy {
    fn from_env() -> Result<Self, ConfigError> {
        let max_attempts = env_parse("DB_CONNECT_RETRIES", "10")?;
        let delay_ms: u64 = env_parse("DB_RETRY_DELAY_MS", "2000")?;

        Ok(Self {
            max_attempts,
            delay: Duration::from_millis(delay_ms),
        })
    }
}

/// Run `operation` until it succeeds or the policy is exhausted.
///
/// Returns the last error once every attempt has failed. The delay is only
/// slept between attempts, never after the final failure.
pub async fn retry_fixed<F, Fut, T, E>(mut operation: F, policy: &RetryPolicy) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let attempts = policy.attempts();
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => {
                if attempt > 1 {
                    info!(attempt, "Operation succeeded after retrying");
                }
                return Ok(result);
            }
            Err(e) if attempt >= attempts => {
                warn!(attempt, max_attempts = attempts, error = %e, "Final attempt failed, giving up");
                return Err(e);
            }
            Err(e) => {
                warn!(
                    attempt,
                    max_attempts = attempts,
                    retry_in_ms = policy.delay.as_millis() as u64,
                    error = %e,
                    "Attempt failed, retrying"
                );
                tokio::time::sleep(policy.delay).await;
                attempt += 1;
            }
        }
    }
}
