//! Backoff retry for page fetches.
//!
//! Single dispatches never retry. The paginated aggregator wraps each
//! non-first page in [`retry_with_backoff`], which also honors the caller's
//! cancellation token between and during attempts.

use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::error::{ApiError, Result};

/// Fixed-backoff retry policy.
///
/// A failed attempt is retried up to `retries` times, each retry preceded
/// by the same `backoff` wait.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
///
/// use ebay_api::reliability::RetryPolicy;
///
/// // One retry after a 500ms wait.
/// let policy = RetryPolicy::fixed(1, Duration::from_millis(500));
/// assert_eq!(policy.max_attempts(), 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Retries after the first attempt (default: 1).
    pub retries: u32,
    /// Wait before each retry (default: 500ms).
    pub backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::fixed(1, Duration::from_millis(500))
    }
}

impl RetryPolicy {
    /// `retries` extra attempts, each preceded by `backoff`.
    #[must_use]
    pub const fn fixed(retries: u32, backoff: Duration) -> Self {
        Self { retries, backoff }
    }

    /// Total attempts including the first.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.retries.saturating_add(1)
    }
}

/// Runs `operation` until it succeeds or `policy.max_attempts()` is reached.
///
/// Every error is retried; this is a page-level policy, not a call-level
/// one.
///
/// Cancellation is checked while each attempt is in flight and while
/// sleeping between attempts.
///
/// # Examples
///
/// ```
/// use std::{
///     sync::{
///         Arc,
///         atomic::{AtomicU32, Ordering},
///     },
///     time::Duration,
/// };
///
/// use ebay_api::{
///     error::ApiError,
///     reliability::{RetryPolicy, retry_with_backoff},
/// };
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> ebay_api::error::Result<()> {
/// let policy = RetryPolicy::fixed(2, Duration::from_millis(10));
/// let attempt = Arc::new(AtomicU32::new(0));
///
/// let result = retry_with_backoff(&policy, &CancellationToken::new(), || {
///     let attempt = Arc::clone(&attempt);
///     async move {
///         if attempt.fetch_add(1, Ordering::Relaxed) < 2 {
///             Err(ApiError::InvalidInput("temporary failure".to_owned()))
///         } else {
///             Ok("success")
///         }
///     }
/// })
/// .await?;
///
/// assert_eq!(result, "success");
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns the last error if every attempt fails, or
/// [`ApiError::Cancelled`] once `cancel` fires.
pub async fn retry_with_backoff<F, Fut, T>(
    policy: &RetryPolicy,
    cancel: &CancellationToken,
    mut operation: F,
) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let max_attempts = policy.max_attempts();
    let mut attempt = 0;

    loop {
        let outcome = tokio::select! {
            () = cancel.cancelled() => return Err(ApiError::Cancelled),
            outcome = operation() => outcome,
        };

        match outcome {
            Ok(value) => {
                if attempt > 0 {
                    tracing::info!(attempt = attempt + 1, "operation succeeded after retry");
                }
                return Ok(value);
            }
            Err(error) => {
                tracing::warn!(
                    attempt = attempt + 1,
                    max_attempts,
                    error = %error,
                    "operation failed"
                );

                if attempt + 1 >= max_attempts {
                    return Err(error);
                }

                tracing::debug!(delay_ms = policy.backoff.as_millis(), "sleeping before retry");
                tokio::select! {
                    () = cancel.cancelled() => return Err(ApiError::Cancelled),
                    () = tokio::time::sleep(policy.backoff) => {}
                }
                attempt += 1;
            }
        }
    }
}

/// Determines if an error is worth retrying.
///
/// Retryable:
/// - timeouts and connection failures
/// - 5xx replies
/// - API failures whose error codes signal a revision conflict
///
/// Everything else (decode errors, bad input, ended or deleted listings)
/// will fail the same way again.
///
/// # Examples
///
/// ```
/// use ebay_api::{error::ApiError, reliability::is_retryable};
///
/// assert!(is_retryable(&ApiError::HttpStatus { status: 503, body: String::new() }));
/// assert!(!is_retryable(&ApiError::InvalidInput("SKU value missing".to_owned())));
/// ```
#[must_use]
pub fn is_retryable(error: &ApiError) -> bool {
    match error {
        ApiError::Transport(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        ApiError::HttpStatus { status, .. } => (500..600).contains(status),
        ApiError::Api { errors, .. } => errors.revision_conflict(),
        ApiError::XmlDecode(_)
        | ApiError::XmlEncode(_)
        | ApiError::JsonDecode(_)
        | ApiError::InvalidInput(_)
        | ApiError::Config(_)
        | ApiError::Cancelled => false,
    }
}
