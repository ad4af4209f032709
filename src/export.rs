// src/export.rs
//! Orchestrates one export run: sign in → list → fetch details → project → write.
//!
//! Each stage finishes completely before the next one starts, and any error
//! ends the run before the file is touched.

use crate::api::types::partition_outcomes;
use crate::api::{
    authenticate, collect_all, DetailFailure, DetailFetcher, InvoiceService, InvoiceSimpleClient,
    PaginationResult,
};
use crate::config::{DetailFailurePolicy, ExportConfig};
use crate::error::AppError;
use crate::model::{DocumentRef, Session};
use crate::output::{write_rows, ExportReport};
use crate::pipeline::{ExportBatch, ExportDelivery, FetchedInvoices, InvoiceSource, RowProjector};
use crate::projection::{project, project_all, ExportRow, ExportSchema};
use std::time::Instant;

/// Runs a complete export against the live service.
pub async fn execute_export(config: &ExportConfig) -> Result<ExportReport, AppError> {
    let client = InvoiceSimpleClient::new(config.endpoints.clone())?;
    InvoiceExport::new(config, &client).run().await
}

/// Drives the export stages against any `InvoiceService`.
pub struct InvoiceExport<'a, S: ?Sized> {
    config: &'a ExportConfig,
    service: &'a S,
    schema: ExportSchema,
}

impl<'a, S> InvoiceExport<'a, S>
where
    S: InvoiceService + ?Sized,
{
    pub fn new(config: &'a ExportConfig, service: &'a S) -> Self {
        Self {
            config,
            service,
            schema: ExportSchema::default(),
        }
    }

    /// Runs every stage in order and returns the report of the written file.
    pub async fn run(&self) -> Result<ExportReport, AppError> {
        let started = Instant::now();

        let session = self.sign_in().await?;
        let listing = self.list_invoices(&session).await?;
        let fetched = self.fetch_invoices(&session, &listing.items).await?;
        let batch = self.project_rows(fetched)?;
        let mut report = self.deliver(&batch.rows)?.with_skipped(batch.skipped);

        report.stats.pages_fetched = listing.pages_fetched;
        report.stats.documents_listed = listing.total_fetched;
        report.stats.total_duration_ms = started.elapsed().as_millis() as u64;

        log::info!(
            "Export complete: {} rows, {} skipped, {}ms",
            report.rows_written,
            report.skipped.len(),
            report.stats.total_duration_ms
        );
        Ok(report)
    }

    fn log_skipped(skipped: &[DetailFailure]) {
        for failure in skipped {
            log::warn!("Skipping invoice {}: {}", failure.id, failure.reason);
        }
    }
}

#[async_trait::async_trait]
impl<S> InvoiceSource for InvoiceExport<'_, S>
where
    S: InvoiceService + ?Sized,
{
    async fn sign_in(&self) -> Result<Session, AppError> {
        authenticate(self.service, &self.config.credentials).await
    }

    async fn list_invoices(
        &self,
        session: &Session,
    ) -> Result<PaginationResult<DocumentRef>, AppError> {
        let listing = collect_all(
            self.service,
            session,
            self.config.documents_start(),
            self.config.max_pages,
        )
        .await?;

        log::info!(
            "Fetched {} documents across {} pages",
            listing.total_fetched,
            listing.pages_fetched
        );
        Ok(listing)
    }

    async fn fetch_invoices(
        &self,
        session: &Session,
        items: &[DocumentRef],
    ) -> Result<FetchedInvoices, AppError> {
        log::info!("Getting all invoices");
        let fetcher = DetailFetcher::new(self.service, session, self.config.concurrency);

        match self.config.on_detail_error {
            DetailFailurePolicy::Abort => Ok(FetchedInvoices {
                details: fetcher.fetch_all(items).await?,
                skipped: Vec::new(),
            }),
            DetailFailurePolicy::Skip => {
                let (details, skipped) = partition_outcomes(fetcher.fetch_each(items).await);
                Self::log_skipped(&skipped);
                Ok(FetchedInvoices { details, skipped })
            }
        }
    }
}

impl<S> RowProjector for InvoiceExport<'_, S>
where
    S: InvoiceService + ?Sized,
{
    fn project_rows(&self, invoices: FetchedInvoices) -> Result<ExportBatch, AppError> {
        match self.config.on_detail_error {
            DetailFailurePolicy::Abort => Ok(ExportBatch {
                rows: project_all(&invoices.details)?,
                skipped: invoices.skipped,
            }),
            DetailFailurePolicy::Skip => {
                let mut batch = ExportBatch {
                    rows: Vec::with_capacity(invoices.details.len()),
                    skipped: invoices.skipped,
                };
                for detail in &invoices.details {
                    match project(detail) {
                        Ok(row) => batch.rows.push(row),
                        Err(e) => {
                            let failure = DetailFailure {
                                id: detail.id.clone(),
                                reason: e.to_string(),
                            };
                            Self::log_skipped(std::slice::from_ref(&failure));
                            batch.skipped.push(failure);
                        }
                    }
                }
                Ok(batch)
            }
        }
    }
}

impl<S> ExportDelivery for InvoiceExport<'_, S>
where
    S: InvoiceService + ?Sized,
{
    fn deliver(&self, rows: &[ExportRow]) -> Result<ExportReport, AppError> {
        log::info!("Saving CSV");
        write_rows(rows, &self.config.output_file, &self.schema)
    }
}
