//! Bounded retry for startup connection establishment.
//!
//! # Responsibilities
//! - Attempt a connection once per iteration, up to `max_attempts`
//! - Log progress with the attempt index between attempts
//! - Hand back the last error once the budget is spent
//!
//! # Design Decisions
//! - Fixed spacing, no jitter: orchestration timeouts are tuned against
//!   30 attempts at 1 second
//! - Startup only; nothing is retried once the service is serving

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use crate::config::DatabaseConfig;

/// How many times to try, and how long to wait in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub interval: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &DatabaseConfig) -> Self {
        Self {
            max_attempts: config.max_attempts,
            interval: config.attempt_interval(),
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 30,
            interval: Duration::from_secs(1),
        }
    }
}

/// Every attempt failed; carries the error from the final one.
#[derive(Debug)]
pub struct RetryExhausted<E> {
    pub attempts: u32,
    pub last_error: E,
}

/// Call `connect` with the 1-based attempt index until it succeeds or the
/// policy runs out.
pub async fn connect_with_retry<T, E, F, Fut>(
    policy: RetryPolicy,
    mut connect: F,
) -> Result<T, RetryExhausted<E>>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: Display,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match connect(attempt).await {
            Ok(value) => {
                if attempt > 1 {
                    tracing::info!(attempt, max_attempts, "Store reachable");
                }
                return Ok(value);
            }
            Err(e) if attempt >= max_attempts => {
                return Err(RetryExhausted { attempts: attempt, last_error: e });
            }
            Err(e) => {
                tracing::warn!(
                    attempt,
                    max_attempts,
                    error = %e,
                    "Waiting for database..."
                );
                tokio::time::sleep(policy.interval).await;
                attempt += 1;
            }
        }
    }
}
