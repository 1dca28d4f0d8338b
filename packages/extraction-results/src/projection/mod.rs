//! Projection of free-form field maps onto fixed display columns.

pub mod columns;

pub use columns::{column_specs, column_specs_for_tag, ColumnSpec, Source, GENERIC_COLUMNS};

use extractor_client::{DocumentType, RawFieldMap, ResultItem};

use crate::outcome::ExtractionOutcome;

/// Shown in the table for a column with no value.
pub const MISSING_DISPLAY: &str = "-";

/// Ordered column labels for `doc_type`.
pub fn columns(doc_type: DocumentType) -> Vec<&'static str> {
    column_specs(doc_type).iter().map(|c| c.label).collect()
}

/// Ordered column labels for a free-form tag; unknown tags get the generic list.
pub fn columns_for_tag(tag: &str) -> Vec<&'static str> {
    column_specs_for_tag(tag).iter().map(|c| c.label).collect()
}

/// Resolve the first source in `sources` that yields a value.
pub fn resolve(data: &RawFieldMap, sources: &[Source]) -> Option<String> {
    sources.iter().find_map(|source| match *source {
        Source::Field(key) => data.text(key),
        Source::Segment { field, index } => segment(&data.text(field)?, index),
    })
}

fn segment(combined: &str, index: usize) -> Option<String> {
    let part = combined.split(',').nth(index)?.trim();
    (!part.is_empty()).then(|| part.to_string())
}

/// Document type recorded in `data`, else the selected one.
pub fn document_type_label(data: &RawFieldMap, selected: DocumentType) -> String {
    resolve(data, columns::DOCUMENT_TYPE.sources).unwrap_or_else(|| selected.as_str().to_string())
}

/// One result projected onto a column list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectedRow {
    pub filename: String,
    cells: Vec<(&'static str, Option<String>)>,
}

impl ProjectedRow {
    /// Project `data` onto `specs`.
    pub fn from_specs(filename: impl Into<String>, data: &RawFieldMap, specs: &[ColumnSpec]) -> Self {
        Self {
            filename: filename.into(),
            cells: specs
                .iter()
                .map(|spec| (spec.label, resolve(data, spec.sources)))
                .collect(),
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.cells.iter().map(|(label, _)| *label)
    }

    /// Resolved value of `label`, `None` when missing or not a column.
    pub fn get(&self, label: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(l, _)| *l == label)
            .and_then(|(_, v)| v.as_deref())
    }

    /// Values for table display; missing cells read `-`.
    pub fn display_values(&self) -> Vec<&str> {
        self.cells
            .iter()
            .map(|(_, v)| v.as_deref().unwrap_or(MISSING_DISPLAY))
            .collect()
    }

    /// Values for export; missing cells are empty.
    pub fn export_values(&self) -> Vec<&str> {
        self.cells
            .iter()
            .map(|(_, v)| v.as_deref().unwrap_or(""))
            .collect()
    }
}

/// Project one result for `doc_type`.
///
/// `None` for failed results or results without data; they are shown in the
/// per-file details instead.
pub fn project(item: &ResultItem, doc_type: DocumentType) -> Option<ProjectedRow> {
    let data = item.extracted()?;
    Some(ProjectedRow::from_specs(
        item.filename.clone(),
        data,
        column_specs(doc_type),
    ))
}

/// Table rows for every successful result, in submission order.
pub fn table_rows(outcome: &ExtractionOutcome, doc_type: DocumentType) -> Vec<ProjectedRow> {
    outcome
        .results
        .iter()
        .filter_map(|item| project(item, doc_type))
        .collect()
}
