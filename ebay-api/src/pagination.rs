//! Paginated aggregator.
//!
//! [`EbayClient::execute_all`] fetches every page of a paginated call and
//! merges the items:
//!
//! 1. Page 1 is fetched first, alone. Its failure is the aggregation's
//!    failure.
//! 2. If the reply signals more pages, pages `2..=total_pages` are launched
//!    as concurrent tasks. The scheduling loop waits the stagger interval
//!    before each launch, so launch `n` happens `n - 1` intervals after the
//!    first.
//! 3. Each task retries its page after a fixed backoff (once, by default).
//!    A page that still fails is logged and dropped; the aggregation keeps
//!    going and reports it in [`Aggregate::failed_pages`].
//!
//! Items arrive in completion order. Do not rely on page order.
//!
//! The cancellation token is observed by the stagger wait, every dispatch
//! and every retry backoff. Cancelling aborts all outstanding tasks and
//! returns [`ApiError::Cancelled`].

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, instrument};

use crate::{
    call::{Response, XmlCall},
    client::EbayClient,
    error::{ApiError, Result},
    reliability::retry_with_backoff,
    transport::Transport,
};

/// A call whose reply may span several pages.
pub trait PaginatedCall: XmlCall + Clone + 'static {
    /// Copy of this call targeting `page` (1-indexed).
    #[must_use]
    fn with_page(&self, page: u32) -> Self;
}

/// A reply that reports pagination state and yields items.
pub trait PaginatedResponse: Response {
    /// Merged item type.
    type Item: Send + 'static;

    /// Whether the API signals pages beyond this one.
    fn has_more(&self) -> bool;

    /// Total page count reported by the API.
    fn total_pages(&self) -> u32;

    /// Consumes the reply, returning this page's items.
    fn into_items(self) -> Vec<Self::Item>;
}

/// Result of a multi-page fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregate<T> {
    /// Items from every page that was retrieved, in completion order.
    pub items: Vec<T>,
    /// Pages dropped after exhausting their retries, ascending.
    pub failed_pages: Vec<u32>,
}

impl<T> Aggregate<T> {
    /// `true` if every page was retrieved.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed_pages.is_empty()
    }
}

impl<T: Transport + 'static> EbayClient<T> {
    /// Fetches every page of `call` and merges the items.
    ///
    /// # Errors
    ///
    /// Returns the page-1 error, or [`ApiError::Cancelled`] if `cancel`
    /// fires. Failures on later pages are not errors; see
    /// [`Aggregate::failed_pages`].
    #[instrument(skip_all, fields(call = call.name()))]
    pub async fn execute_all<C>(
        &self,
        cancel: &CancellationToken,
        call: &C,
    ) -> Result<Aggregate<<C::Response as PaginatedResponse>::Item>>
    where
        C: PaginatedCall,
        C::Response: PaginatedResponse,
    {
        let first_call = call.with_page(1);
        let first = tokio::select! {
            () = cancel.cancelled() => return Err(ApiError::Cancelled),
            first = self.execute(&first_call) => first?,
        };

        let has_more = first.has_more();
        let total_pages = first.total_pages();
        let mut items = first.into_items();

        if !has_more || total_pages <= 1 {
            return Ok(Aggregate { items, failed_pages: Vec::new() });
        }

        debug!(total_pages, "fetching remaining pages");

        let pagination = &self.config().pagination;
        let stagger = pagination.stagger();
        let policy = pagination.retry_policy();

        let mut tasks = JoinSet::new();
        for page in 2..=total_pages {
            tokio::select! {
                () = cancel.cancelled() => {
                    tasks.abort_all();
                    return Err(ApiError::Cancelled);
                }
                () = tokio::time::sleep(stagger) => {}
            }

            let client = self.clone();
            let cancel = cancel.clone();
            let page_call = call.with_page(page);

            tasks.spawn(async move {
                let result =
                    retry_with_backoff(&policy, &cancel, || client.execute(&page_call)).await;
                (page, result)
            });
        }

        let mut failed_pages = Vec::new();
        while let Some(joined) = tasks.join_next().await {
            let (page, result) = match joined {
                Ok(outcome) => outcome,
                Err(join_error) => {
                    error!(error = %join_error, "page task did not complete");
                    continue;
                }
            };

            match result {
                Ok(response) => items.extend(response.into_items()),
                Err(ApiError::Cancelled) => {
                    tasks.abort_all();
                    return Err(ApiError::Cancelled);
                }
                Err(e) => {
                    error!(page, error = %e, "dropping page after retries");
                    failed_pages.push(page);
                }
            }
        }

        failed_pages.sort_unstable();
        Ok(Aggregate { items, failed_pages })
    }
}
