//! Result handling for the PDF document extractor.
//!
//! Turns raw service responses into one canonical [`ExtractionOutcome`],
//! projects its free-form field maps onto per-document-type columns, and
//! serializes it for export.
//!
//! # Example
//!
//! ```rust,ignore
//! use extraction_results::{ExtractionSession, project, table_rows, to_csv};
//! use extractor_client::{DocumentType, ExtractionOptions, ExtractorClient};
//!
//! let session = ExtractionSession::new(ExtractorClient::new("http://localhost:7860"));
//! session.refresh_availability().await;
//!
//! let done = session.submit(files, ExtractionOptions::new(DocumentType::Sktt)).await?;
//! for row in table_rows(&done.outcome, done.document_type) {
//!     println!("{} {:?}", row.filename, row.display_values());
//! }
//! let csv = to_csv(&done.outcome, done.document_type)?;
//! ```

pub mod error;
pub mod export;
pub mod normalize;
pub mod outcome;
pub mod projection;
pub mod session;
pub mod testing;

pub use error::{ExportError, ExportResult, SubmitError, SubmitResult};
pub use export::{
    csv_filename, csv_rows, export, json_filename, to_csv, to_json, CsvRow, ExportFile,
    ExportFormat,
};
pub use normalize::{normalize, MISSING_EXTRACTION_DATA};
pub use outcome::ExtractionOutcome;
pub use projection::{
    column_specs, column_specs_for_tag, columns, columns_for_tag, document_type_label, project,
    resolve, table_rows, ColumnSpec, ProjectedRow, Source, GENERIC_COLUMNS, MISSING_DISPLAY,
};
pub use session::{CompletedSubmission, ExtractionSession};
