// src/api/mod.rs
//! Invoice Simple API interaction: reading a user's invoices.
//!
//! This module keeps I/O (`client`), wire schemas (`responses`), response
//! parsing (`parser`) and the retrieval stages (`auth`, `pagination`,
//! `detail_fetcher`) apart. The stages depend on `InvoiceService`, never on
//! HTTP details.

pub mod auth;
pub mod client;
pub mod detail_fetcher;
pub mod pagination;
pub mod parser;
mod responses;
#[cfg(test)]
pub(crate) mod test_support;
pub mod types;

use crate::error::AppError;
use crate::model::{InvoiceDetail, ListingPage, Session};
use crate::types::{Credentials, InvoiceId, ValidatedUrl};

/// The three remote operations the export needs.
#[async_trait::async_trait]
pub trait InvoiceService: Send + Sync {
    /// Exchanges credentials for a session. One attempt, no retry.
    async fn login(&self, credentials: &Credentials) -> Result<Session, AppError>;

    /// Fetches one page of the document listing at `url`.
    async fn list_documents(
        &self,
        url: &ValidatedUrl,
        session: &Session,
    ) -> Result<ListingPage, AppError>;

    /// Fetches the full record of one invoice.
    async fn retrieve_invoice(
        &self,
        id: &InvoiceId,
        session: &Session,
    ) -> Result<InvoiceDetail, AppError>;
}

// Re-export the public interface
pub use auth::authenticate;
pub use client::InvoiceSimpleClient;
pub use detail_fetcher::{fetch_detail, DetailFetcher};
pub use pagination::{collect_all, listing_pages};
pub use types::{DetailFailure, DetailOutcome, PaginationResult};
