//! File exports of an [`ExtractionOutcome`].
//!
//! Both serializers are pure functions of the outcome and accept outcomes
//! with no successful results.

mod csv;
mod json;

pub use self::csv::{csv_rows, to_csv, CsvRow};
pub use self::json::to_json;

use std::fmt;

use chrono::NaiveDate;
use extractor_client::DocumentType;

use crate::error::ExportResult;
use crate::outcome::ExtractionOutcome;

/// Supported export formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ExportFormat::Json => "application/json",
            ExportFormat::Csv => "text/csv;charset=utf-8",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportFormat::Json => f.write_str("json"),
            ExportFormat::Csv => f.write_str("csv"),
        }
    }
}

/// `pdf_extraction_results_<YYYY-MM-DD>.json`
pub fn json_filename(date: NaiveDate) -> String {
    format!("pdf_extraction_results_{}.json", date.format("%Y-%m-%d"))
}

/// `Hasil_Ekstraksi_<DocumentType>_<YYYY-MM-DD>.csv`
pub fn csv_filename(doc_type: DocumentType, date: NaiveDate) -> String {
    format!(
        "Hasil_Ekstraksi_{}_{}.csv",
        doc_type.as_str(),
        date.format("%Y-%m-%d")
    )
}

/// A serialized export ready to be written somewhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportFile {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
}

/// Serialize `outcome` in `format`, named for `date`.
pub fn export(
    outcome: &ExtractionOutcome,
    format: ExportFormat,
    doc_type: DocumentType,
    date: NaiveDate,
) -> ExportResult<ExportFile> {
    let (filename, bytes) = match format {
        ExportFormat::Json => (json_filename(date), to_json(outcome)?),
        ExportFormat::Csv => (csv_filename(doc_type, date), to_csv(outcome, doc_type)?),
    };
    Ok(ExportFile {
        filename,
        mime_type: format.mime_type(),
        bytes,
    })
}
