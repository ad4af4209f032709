// src/api/detail_fetcher.rs
//! Concurrent retrieval of invoice details for a collected listing.
//!
//! Every item's request is created up front and joined together; a
//! semaphore caps how many are on the wire at once. Results come back in
//! input order whatever order the responses arrive in.

use super::types::DetailOutcome;
use super::InvoiceService;
use crate::constants::MAX_DETAIL_CONCURRENCY;
use crate::error::AppError;
use crate::model::{DocumentRef, InvoiceDetail, Session};
use crate::types::InvoiceId;
use futures::future::{join_all, try_join_all};
use tokio::sync::Semaphore;

/// Fetches the full record of one listed invoice.
///
/// Failures come back wrapped in `DetailFetchFailed` naming the invoice.
pub async fn fetch_detail<S>(
    service: &S,
    id: &InvoiceId,
    session: &Session,
) -> Result<InvoiceDetail, AppError>
where
    S: InvoiceService + ?Sized,
{
    log::debug!("Fetching invoice {}", id);
    service
        .retrieve_invoice(id, session)
        .await
        .map_err(|e| e.for_invoice(id.as_str()))
}

/// Fans detail requests out over a fixed number of permits.
pub struct DetailFetcher<'a, S: ?Sized> {
    service: &'a S,
    session: &'a Session,
    permits: Semaphore,
    concurrency: usize,
}

impl<'a, S> DetailFetcher<'a, S>
where
    S: InvoiceService + ?Sized,
{
    /// Creates a fetcher allowing `concurrency` requests in flight,
    /// clamped to `1..=MAX_DETAIL_CONCURRENCY`.
    pub fn new(service: &'a S, session: &'a Session, concurrency: usize) -> Self {
        let concurrency = concurrency.clamp(1, MAX_DETAIL_CONCURRENCY);
        Self {
            service,
            session,
            permits: Semaphore::new(concurrency),
            concurrency,
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    async fn fetch_one(&self, item: &DocumentRef) -> Result<InvoiceDetail, AppError> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|e| AppError::InternalError {
                message: "detail request limiter was closed".to_string(),
                source: Some(Box::new(e)),
            })?;

        fetch_detail(self.service, &item.id, self.session).await
    }

    /// Fetches every item, failing as soon as any single fetch fails.
    ///
    /// Outstanding requests are dropped on the first failure.
    pub async fn fetch_all(&self, items: &[DocumentRef]) -> Result<Vec<InvoiceDetail>, AppError> {
        log::debug!(
            "Fetching {} invoice details ({} in flight)",
            items.len(),
            self.concurrency
        );
        try_join_all(items.iter().map(|item| self.fetch_one(item))).await
    }

    /// Fetches every item to completion and tags each outcome.
    pub async fn fetch_each(&self, items: &[DocumentRef]) -> Vec<DetailOutcome> {
        let results = join_all(items.iter().map(|item| self.fetch_one(item))).await;

        items
            .iter()
            .zip(results)
            .map(|(item, result)| DetailOutcome {
                id: item.id.clone(),
                result,
            })
            .collect()
    }
}
