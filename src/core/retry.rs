//! Retry utility for transient failures in async operations
//!
//! Used around external timetable fetches; normalization is never retried.

use std::time::Duration;
use tokio::time::sleep;

/// Configurable retry policy for async operations
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(500),
        }
    }
}

impl RetryPolicy {
    /// A single attempt, no retries
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            delay: Duration::ZERO,
        }
    }
}

/// Execute an async operation, retrying failures according to `policy`
///
/// At least one attempt is always made, even if `max_attempts` is zero.
///
/// # Examples
/// ```rust
/// use timetable::core::retry::{retry_async, RetryPolicy};
///
/// # async fn example() -> Result<String, String> {
/// let result = retry_async("timetable_fetch", RetryPolicy::default(), || async {
///     Ok::<String, String>("records".to_string())
/// })
/// .await?;
/// # Ok(result)
/// # }
/// ```
pub async fn retry_async<F, T, E, Fut>(
    operation_name: &str,
    policy: RetryPolicy,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = Result<T, E>>,
    E: std::fmt::Display,
{
    let attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        match operation().await {
            Ok(result) => return Ok(result),
            Err(error) if attempt < attempts => {
                log::debug!(
                    "Operation '{}' failed on attempt {}/{}, retrying in {:?}: {}",
                    operation_name,
                    attempt,
                    attempts,
                    policy.delay,
                    error
                );
                sleep(policy.delay).await;
                attempt += 1;
            }
            Err(error) => return Err(error),
        }
    }
}
