// src/pipeline.rs
//! Pipeline capability traits: the stages of the invoice export.
//!
//! Each trait describes a single capability, so each stage can be tested in isolation.

use crate::api::{DetailFailure, PaginationResult};
use crate::error::AppError;
use crate::model::{DocumentRef, InvoiceDetail, Session};
use crate::output::ExportReport;
use crate::projection::ExportRow;

/// Invoice details retrieved for a listing, in listing order.
#[derive(Debug, Default)]
pub struct FetchedInvoices {
    pub details: Vec<InvoiceDetail>,
    pub skipped: Vec<DetailFailure>,
}

/// Rows ready for the sink, plus everything left out on the way.
#[derive(Debug, Default)]
pub struct ExportBatch {
    pub rows: Vec<ExportRow>,
    pub skipped: Vec<DetailFailure>,
}

/// Retrieves invoices from the remote service.
#[async_trait::async_trait]
pub trait InvoiceSource {
    async fn sign_in(&self) -> Result<Session, AppError>;

    async fn list_invoices(
        &self,
        session: &Session,
    ) -> Result<PaginationResult<DocumentRef>, AppError>;

    async fn fetch_invoices(
        &self,
        session: &Session,
        items: &[DocumentRef],
    ) -> Result<FetchedInvoices, AppError>;
}

/// Flattens fetched invoices into export rows.
pub trait RowProjector {
    fn project_rows(&self, invoices: FetchedInvoices) -> Result<ExportBatch, AppError>;
}

/// Persists export rows.
pub trait ExportDelivery {
    fn deliver(&self, rows: &[ExportRow]) -> Result<ExportReport, AppError>;
}
