// src/api/types.rs
//! Result types produced by the retrieval stages.

use crate::error::AppError;
use crate::model::InvoiceDetail;
use crate::types::InvoiceId;

/// Everything a paginated listing produced, in server order.
#[derive(Debug, Clone)]
pub struct PaginationResult<T> {
    pub items: Vec<T>,
    pub total_fetched: usize,
    pub pages_fetched: u32,
}

/// The tagged outcome of one detail fetch.
#[derive(Debug)]
pub struct DetailOutcome {
    pub id: InvoiceId,
    pub result: Result<InvoiceDetail, AppError>,
}

/// An invoice left out of the export, with the reason.
#[derive(Debug, Clone, PartialEq)]
pub struct DetailFailure {
    pub id: InvoiceId,
    pub reason: String,
}

/// Splits tagged outcomes into details (input order kept) and failures.
pub fn partition_outcomes(outcomes: Vec<DetailOutcome>) -> (Vec<InvoiceDetail>, Vec<DetailFailure>) {
    let mut details = Vec::with_capacity(outcomes.len());
    let mut failures = Vec::new();

    for outcome in outcomes {
        match outcome.result {
            Ok(detail) => details.push(detail),
            Err(e) => failures.push(DetailFailure {
                id: outcome.id,
                reason: e.to_string(),
            }),
        }
    }

    (details, failures)
}
