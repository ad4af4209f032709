// src/output/types.rs
//! Type definitions for export results.

use crate::api::DetailFailure;
use std::path::PathBuf;

/// Result of a completed export.
#[derive(Debug, Clone)]
pub struct ExportReport {
    /// Where the file was persisted
    pub path: PathBuf,
    /// Data rows written, header excluded
    pub rows_written: usize,
    /// Invoices left out under the skip policy
    pub skipped: Vec<DetailFailure>,
    /// Execution statistics
    pub stats: ExecutionStats,
}

impl ExportReport {
    pub fn new(path: PathBuf, rows_written: usize) -> Self {
        Self {
            path,
            rows_written,
            skipped: Vec::new(),
            stats: ExecutionStats::default(),
        }
    }

    /// Records invoices that were left out of the file.
    pub fn with_skipped(mut self, skipped: Vec<DetailFailure>) -> Self {
        self.skipped = skipped;
        self
    }

    /// Checks if every listed invoice made it into the file.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Execution statistics.
#[derive(Debug, Clone, Default)]
pub struct ExecutionStats {
    pub pages_fetched: u32,
    pub documents_listed: usize,
    pub bytes_written: u64,
    pub total_duration_ms: u64,
}
