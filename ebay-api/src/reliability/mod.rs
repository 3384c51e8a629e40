//! Reliability patterns for eBay API operations.
//!
//! Provides backoff retry for page fetches and a retryability check for
//! callers that want to build their own policies on top of single calls.

mod retry;

pub use retry::{RetryPolicy, is_retryable, retry_with_backoff};
