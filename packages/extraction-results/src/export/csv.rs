use ::csv::{QuoteStyle, WriterBuilder};
use extractor_client::DocumentType;
use indexmap::IndexMap;

use crate::error::{ExportError, ExportResult};
use crate::outcome::ExtractionOutcome;
use crate::projection::{column_specs, document_type_label, ProjectedRow};

/// Column → cell value for one exported row, in column order.
pub type CsvRow = IndexMap<String, String>;

/// Build export rows: `No`, `Filename`, `Document Type`, then the columns
/// of `doc_type`. Failed results are skipped.
pub fn csv_rows(outcome: &ExtractionOutcome, doc_type: DocumentType) -> Vec<CsvRow> {
    let specs = column_specs(doc_type);

    outcome
        .successes()
        .filter_map(|item| item.extracted().map(|data| (item, data)))
        .enumerate()
        .map(|(i, (item, data))| {
            let mut row = CsvRow::new();
            row.insert("No".to_string(), (i + 1).to_string());
            row.insert("Filename".to_string(), item.filename.clone());
            row.insert(
                "Document Type".to_string(),
                document_type_label(data, doc_type),
            );

            let projected = ProjectedRow::from_specs(item.filename.clone(), data, specs);
            for (label, value) in projected.labels().zip(projected.export_values()) {
                row.insert(label.to_string(), value.to_string());
            }
            row
        })
        .collect()
}

/// CSV of the successful results with every cell quoted.
///
/// The header is the key set of the first row, so an outcome without
/// successes yields an empty file.
pub fn to_csv(outcome: &ExtractionOutcome, doc_type: DocumentType) -> ExportResult<Vec<u8>> {
    let rows = csv_rows(outcome, doc_type);
    let Some(first) = rows.first() else {
        return Ok(Vec::new());
    };
    let header: Vec<&str> = first.keys().map(String::as_str).collect();

    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_writer(Vec::new());

    writer.write_record(&header)?;
    for row in &rows {
        writer.write_record(
            header
                .iter()
                .map(|h| row.get(*h).map(String::as_str).unwrap_or("")),
        )?;
    }

    writer
        .into_inner()
        .map_err(|e| ExportError::Csv(e.into_error().into()))
}
