// src/output/mod.rs
//! Export sink: persists projected rows as a CSV file.

mod types;
mod writer;

// Re-export the public interface
pub use types::{ExecutionStats, ExportReport};
pub use writer::write_rows;
