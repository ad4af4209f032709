// src/projection.rs
//! Flattens invoice records into the fixed export schema.

use crate::error::AppError;
use crate::model::InvoiceDetail;

/// One output column, in the order the schema lists them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportColumn {
    InvoiceNumber,
    InvoiceTotal,
    InvoiceDue,
    ClientName,
    InvoiceNotes,
}

impl ExportColumn {
    /// Header title written to the file.
    pub fn title(self) -> &'static str {
        match self {
            Self::InvoiceNumber => "Invoice Number",
            Self::InvoiceTotal => "Invoice Total",
            Self::InvoiceDue => "Invoice Balance Due",
            Self::ClientName => "Invoice Client Name",
            Self::InvoiceNotes => "Invoice Notes",
        }
    }
}

/// Ordered column list for the export file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSchema {
    columns: Vec<ExportColumn>,
}

impl ExportSchema {
    pub fn titles(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.title()).collect()
    }

    /// Renders a row as one field per schema column.
    pub fn record(&self, row: &ExportRow) -> Vec<String> {
        self.columns.iter().map(|&c| row.field(c)).collect()
    }
}

impl Default for ExportSchema {
    fn default() -> Self {
        Self {
            columns: vec![
                ExportColumn::InvoiceNumber,
                ExportColumn::InvoiceTotal,
                ExportColumn::InvoiceDue,
                ExportColumn::ClientName,
                ExportColumn::InvoiceNotes,
            ],
        }
    }
}

/// A single invoice, flattened.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportRow {
    pub invoice_number: String,
    pub invoice_total: f64,
    pub invoice_due: f64,
    pub client_name: String,
    pub invoice_notes: String,
}

impl ExportRow {
    /// The text written for `column`.
    ///
    /// Amounts use the shortest form that round-trips: `100`, `25.5`.
    pub fn field(&self, column: ExportColumn) -> String {
        match column {
            ExportColumn::InvoiceNumber => self.invoice_number.clone(),
            ExportColumn::InvoiceTotal => self.invoice_total.to_string(),
            ExportColumn::InvoiceDue => self.invoice_due.to_string(),
            ExportColumn::ClientName => self.client_name.clone(),
            ExportColumn::InvoiceNotes => self.invoice_notes.clone(),
        }
    }
}

/// Projects an invoice onto the export schema.
///
/// The client and settings sub-records must be present; a present record
/// with no name or comment yields an empty cell.
pub fn project(detail: &InvoiceDetail) -> Result<ExportRow, AppError> {
    let client = detail.client.as_ref().ok_or_else(|| {
        AppError::MalformedResponse(format!("invoice {} has no client record", detail.id))
    })?;
    let setting = detail.setting.as_ref().ok_or_else(|| {
        AppError::MalformedResponse(format!("invoice {} has no setting record", detail.id))
    })?;

    Ok(ExportRow {
        invoice_number: detail.number.clone(),
        invoice_total: detail.total_amount,
        invoice_due: detail.balance_due,
        client_name: client.name.clone().unwrap_or_default(),
        invoice_notes: setting.comment.clone().unwrap_or_default(),
    })
}

/// Projects every invoice, keeping input order. Fails on the first bad record,
/// whose error already names the invoice.
pub fn project_all(details: &[InvoiceDetail]) -> Result<Vec<ExportRow>, AppError> {
    details.iter().map(project).collect()
}
