//! Terminal rendering of availability, catalogues and outcomes.
//!
//! Everything here returns a `String` so commands decide where it goes.

use std::fmt::Write;

use colored::Colorize;

use extraction_results::{columns, table_rows, ExtractionOutcome};
use extractor_client::{Availability, DocumentType, DocumentTypeInfo, ResultStatus, ServiceStatus};

const COLUMN_GAP: &str = "  ";

pub fn availability(base_url: &str, availability: &Availability) -> String {
    let status = match availability.status {
        ServiceStatus::Online => "online".green().bold(),
        ServiceStatus::Offline => "offline".red().bold(),
        ServiceStatus::Checking => "checking".yellow(),
    };
    match availability.checked_at {
        Some(at) => format!(
            "{} is {} (checked {})",
            base_url,
            status,
            at.format("%Y-%m-%d %H:%M:%S UTC")
        ),
        None => format!("{} is {}", base_url, status),
    }
}

/// One line per document type: code, full name, description.
pub fn document_types(types: &[DocumentTypeInfo]) -> String {
    let width = types.iter().map(|t| t.code.chars().count()).max().unwrap_or(0);
    let mut out = String::new();
    for t in types {
        let _ = writeln!(
            out,
            "{}{}{}{}",
            t.code.cyan().bold(),
            pad(width - t.code.chars().count()),
            COLUMN_GAP,
            t.name
        );
        let _ = writeln!(out, "{}{}{}", pad(width), COLUMN_GAP, t.description.dimmed());
    }
    out
}

pub fn summary(outcome: &ExtractionOutcome) -> String {
    format!(
        "Total: {}  Processed: {}  Failed: {}",
        outcome.total_files,
        outcome.processed_files.to_string().green(),
        if outcome.failed_files > 0 {
            outcome.failed_files.to_string().red()
        } else {
            outcome.failed_files.to_string().normal()
        }
    )
}

/// Aligned table of successful results with the columns of `doc_type`.
pub fn table(outcome: &ExtractionOutcome, doc_type: DocumentType) -> String {
    let rows = table_rows(outcome, doc_type);
    if rows.is_empty() {
        return "No fields were extracted.\n".to_string();
    }

    let mut header = vec!["No", "Filename"];
    header.extend(columns(doc_type));

    let body: Vec<Vec<String>> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| {
            let mut cells = vec![(i + 1).to_string(), row.filename.clone()];
            cells.extend(row.display_values().into_iter().map(str::to_string));
            cells
        })
        .collect();

    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for cells in &body {
        for (w, cell) in widths.iter_mut().zip(cells) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    let header_cells: Vec<String> = header.iter().map(|h| h.to_string()).collect();
    let _ = writeln!(out, "{}", line(&header_cells, &widths).bold());
    let _ = writeln!(
        out,
        "{}",
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP)
    );
    for cells in &body {
        let _ = writeln!(out, "{}", line(cells, &widths));
    }
    out
}

/// Every submitted file with its status, new name and error.
pub fn details(outcome: &ExtractionOutcome) -> String {
    let mut out = String::new();
    for item in &outcome.results {
        match item.status {
            ResultStatus::Success => {
                let _ = write!(out, "{} {}", "✓".green(), item.filename);
                if let Some(new_name) = outcome.renamed(&item.filename) {
                    let _ = write!(out, " → {}", new_name.cyan());
                }
                let fields = item.data.as_ref().map(|d| d.len()).unwrap_or(0);
                let _ = writeln!(out, " ({} fields)", fields);
            }
            ResultStatus::Error => {
                let _ = writeln!(
                    out,
                    "{} {}: {}",
                    "✗".red(),
                    item.filename.red(),
                    item.error.as_deref().unwrap_or("extraction failed")
                );
            }
        }
    }
    out
}

fn line(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| format!("{}{}", cell, pad(w - cell.chars().count())))
        .collect::<Vec<_>>()
        .join(COLUMN_GAP)
        .trim_end()
        .to_string()
}

fn pad(n: usize) -> String {
    " ".repeat(n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use extractor_client::{RawFieldMap, ResultItem};

    fn renamed(mut outcome: ExtractionOutcome, from: &str, to: &str) -> ExtractionOutcome {
        let mut map = outcome.renamed_files.take().unwrap_or_default();
        map.insert(from.to_string(), to.to_string());
        outcome.renamed_files = Some(map);
        outcome
    }

    fn outcome() -> ExtractionOutcome {
        ExtractionOutcome {
            total_files: 2,
            processed_files: 1,
            failed_files: 1,
            results: vec![
                ResultItem::success(
                    "a.pdf",
                    RawFieldMap::new().with("Name", "Alice").with("NIK", "123"),
                ),
                ResultItem::failure("b.pdf", "corrupt"),
            ],
            renamed_files: None,
        }
    }

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_table_shows_one_row_per_success_with_placeholders() {
        plain();
        let text = table(&outcome(), DocumentType::Sktt);
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3, "header, rule, one row");
        assert!(lines[0].starts_with("No  Filename  NIK  Name"));
        assert!(lines[2].starts_with("1   a.pdf     123  Alice"));
        assert!(lines[2].contains('-'));
        assert!(!text.contains("b.pdf"));
    }

    #[test]
    fn test_table_without_successes() {
        plain();
        let o = ExtractionOutcome::default();
        assert_eq!(table(&o, DocumentType::Evln), "No fields were extracted.\n");
    }

    #[test]
    fn test_details_flag_failures_and_renames() {
        plain();
        let text = details(&renamed(outcome(), "a.pdf", "ALICE 123.pdf"));
        assert!(text.contains("✓ a.pdf → ALICE 123.pdf (2 fields)"));
        assert!(text.contains("✗ b.pdf: corrupt"));
    }

    #[test]
    fn test_summary_counts() {
        plain();
        assert_eq!(summary(&outcome()), "Total: 2  Processed: 1  Failed: 1");
    }

    #[test]
    fn test_document_types_lists_every_entry() {
        plain();
        let types: Vec<DocumentTypeInfo> = DocumentType::ALL.into_iter().map(Into::into).collect();
        let text = document_types(&types);
        for t in DocumentType::ALL {
            assert!(text.contains(t.as_str()));
            assert!(text.contains(t.full_name()));
        }
    }
}
