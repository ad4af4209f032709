// src/lib.rs
//! invoice-export library: signs in to Invoice Simple, walks the document
//! listing, fetches every invoice and writes them to a CSV file.
//!
//! # Public API
//!
//! The library exposes types organized by concern:
//! - **Error handling**: `AppError`, `ValidationError`
//! - **Configuration**: `ExportConfig`, `ServiceEndpoints`, `CommandLineInput`
//! - **Domain model**: `Session`, `DocumentRef`, `ListingPage`, `InvoiceDetail`
//! - **Domain types**: `Credentials`, `InvoiceId`, `SessionToken`, `ValidatedUrl`
//! - **API client**: `InvoiceService`, `InvoiceSimpleClient`, pagination and fan-out
//! - **Projection and output**: `project`, `ExportSchema`, `write_rows`
//! - **Orchestration**: `execute_export`, `InvoiceExport`

mod api;
mod config;
mod constants;
mod error;
mod export;
mod model;
mod output;
mod pipeline;
mod projection;
mod types;

// --- Error Handling ---
pub use crate::error::{AppError, Result};
pub use crate::types::ValidationError;

// --- Configuration ---
pub use crate::config::{
    credentials_from_lookup, CommandLineInput, DetailFailurePolicy, ExportConfig,
    ServiceEndpoints,
};

// --- Domain Model ---
pub use crate::model::{
    ClientRecord, DocumentRef, InvoiceDetail, InvoiceSetting, ListingPage, Session,
};

// --- Domain Types ---
pub use crate::types::{Credentials, InvoiceId, SessionToken, ValidatedUrl};

// --- API Client ---
pub use crate::api::{
    authenticate,
    client::ApiResponse,
    collect_all,
    fetch_detail,
    listing_pages,
    parser::{parse_api_response, parse_invoice_response, parse_listing_response, parse_login_response},
    DetailFailure, DetailFetcher, DetailOutcome, InvoiceService, InvoiceSimpleClient,
    PaginationResult,
};

// --- Projection and Output ---
pub use crate::output::{write_rows, ExecutionStats, ExportReport};
pub use crate::projection::{project, project_all, ExportColumn, ExportRow, ExportSchema};

// --- Pipeline Traits ---
pub use crate::pipeline::{ExportBatch, ExportDelivery, FetchedInvoices, InvoiceSource, RowProjector};

// --- Orchestration ---
pub use crate::export::{execute_export, InvoiceExport};
