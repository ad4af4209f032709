// src/error.rs
//! Application error types with structured error handling.
//!
//! Each variant names one failure mode of the export run: configuration,
//! authentication, connectivity, response shape, or the export sink. Every
//! one of them is fatal; the variants exist so the message tells the user
//! which stage gave up.

use std::path::PathBuf;
use thiserror::Error;

/// Main application error type.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing configuration: {0}")]
    MissingConfiguration(String),

    #[error(transparent)]
    Validation(#[from] crate::types::ValidationError),

    #[error("Could not log in: {0}")]
    AuthenticationRejected(String),

    #[error("Network failure: {0}")]
    NetworkFailure(#[from] reqwest::Error),

    #[error("Invoice Simple returned HTTP {status} for {url}")]
    ServiceError {
        status: reqwest::StatusCode,
        url: String,
    },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Failed to fetch invoice {invoice_id}: {source}")]
    DetailFetchFailed {
        invoice_id: String,
        #[source]
        source: Box<AppError>,
    },

    #[error("Pagination stopped after {0} pages; the listing kept reporting more")]
    PaginationLimitExceeded(u32),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write export to {}: {message}", path.display())]
    ExportFailed { path: PathBuf, message: String },

    #[error("Internal error: {message}")]
    InternalError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedResponse(err.to_string())
    }
}

impl AppError {
    /// Wraps a per-item failure with the id of the invoice it belongs to.
    pub fn for_invoice(self, invoice_id: impl Into<String>) -> Self {
        AppError::DetailFetchFailed {
            invoice_id: invoice_id.into(),
            source: Box::new(self),
        }
    }

    /// Whether the failure came from the remote service rather than local state.
    pub fn is_remote(&self) -> bool {
        match self {
            Self::AuthenticationRejected(_)
            | Self::NetworkFailure(_)
            | Self::ServiceError { .. }
            | Self::MalformedResponse(_) => true,
            Self::DetailFetchFailed { source, .. } => source.is_remote(),
            _ => false,
        }
    }
}

/// Result type alias for convenience
pub type Result<T, E = AppError> = std::result::Result<T, E>;
