// src/output/writer.rs
//! Writes export rows to disk.
//!
//! This module is the only place where file I/O occurs. Rows go to a
//! temporary file beside the destination, which is flushed, synced and then
//! renamed over the target, so a failed write never leaves a partial file.

use super::types::ExportReport;
use crate::error::AppError;
use crate::projection::{ExportRow, ExportSchema};
use csv::{Writer, WriterBuilder};
use std::fs;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Writes the header and then every row, in input order, to `path`.
///
/// Returns once the file is durably on disk.
pub fn write_rows(
    rows: &[ExportRow],
    path: &Path,
    schema: &ExportSchema,
) -> Result<ExportReport, AppError> {
    log::debug!("Writing {} rows to {}", rows.len(), path.display());

    let mut writer = AtomicCsvWriter::new(path)?;
    writer.writer_mut().write_record(schema.titles())?;
    for row in rows {
        writer.writer_mut().write_record(schema.record(row))?;
    }
    let path = writer.finish()?;

    let mut report = ExportReport::new(path, rows.len());
    report.stats.bytes_written = fs::metadata(&report.path).map(|m| m.len()).unwrap_or(0);

    log::info!(
        "Wrote file: {} ({} bytes)",
        report.path.display(),
        report.stats.bytes_written
    );
    Ok(report)
}

/// A CSV writer over a temporary file that is persisted on `finish()`.
///
/// Dropping it without finishing deletes the temporary file.
struct AtomicCsvWriter {
    writer: Writer<BufWriter<NamedTempFile>>,
    final_path: PathBuf,
}

impl AtomicCsvWriter {
    fn new(final_path: &Path) -> Result<Self, AppError> {
        let final_path = final_path.to_path_buf();

        // The temporary file must share a filesystem with the target.
        let parent_dir = match final_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent_dir).map_err(|e| export_failed(&final_path, e))?;

        let temp_file =
            NamedTempFile::new_in(&parent_dir).map_err(|e| export_failed(&final_path, e))?;

        let writer = WriterBuilder::new()
            .has_headers(false)
            .from_writer(BufWriter::new(temp_file));

        Ok(Self {
            writer,
            final_path,
        })
    }

    fn writer_mut(&mut self) -> &mut Writer<BufWriter<NamedTempFile>> {
        &mut self.writer
    }

    fn finish(self) -> Result<PathBuf, AppError> {
        let buf_writer = self
            .writer
            .into_inner()
            .map_err(|e| export_failed(&self.final_path, e.error()))?;

        let named_temp = buf_writer
            .into_inner()
            .map_err(|e| export_failed(&self.final_path, e.error()))?;

        named_temp
            .as_file()
            .sync_all()
            .map_err(|e| export_failed(&self.final_path, e))?;

        named_temp
            .persist(&self.final_path)
            .map_err(|e| export_failed(&self.final_path, e.error))?;

        Ok(self.final_path)
    }
}

fn export_failed(path: &Path, cause: impl std::fmt::Display) -> AppError {
    AppError::ExportFailed {
        path: path.to_path_buf(),
        message: cause.to_string(),
    }
}
