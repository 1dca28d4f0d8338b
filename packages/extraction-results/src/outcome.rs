//! Canonical result of one submission.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use extractor_client::ResultItem;

/// Normalized outcome of a submission, independent of the endpoint used.
///
/// Everything downstream (table, details, exports) reads this shape and
/// never the raw response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionOutcome {
    pub total_files: usize,
    pub processed_files: usize,
    pub failed_files: usize,
    /// One entry per submitted file, in submission order.
    pub results: Vec<ResultItem>,
    /// Original filename → new filename, for files the service renamed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renamed_files: Option<IndexMap<String, String>>,
}

impl ExtractionOutcome {
    /// Whether the counts agree with each other and with `results`.
    pub fn is_consistent(&self) -> bool {
        self.processed_files + self.failed_files == self.total_files
            && (self.results.is_empty() || self.results.len() == self.total_files)
    }

    /// Successful results carrying field data, in order.
    pub fn successes(&self) -> impl Iterator<Item = &ResultItem> {
        self.results.iter().filter(|r| r.extracted().is_some())
    }

    /// Failed results, in order.
    pub fn failures(&self) -> impl Iterator<Item = &ResultItem> {
        self.results.iter().filter(|r| !r.is_success())
    }

    /// New name given to `original`, if the service renamed it.
    pub fn renamed(&self, original: &str) -> Option<&str> {
        self.renamed_files
            .as_ref()?
            .get(original)
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extractor_client::RawFieldMap;

    fn outcome() -> ExtractionOutcome {
        ExtractionOutcome {
            total_files: 2,
            processed_files: 1,
            failed_files: 1,
            results: vec![
                ResultItem::success("a.pdf", RawFieldMap::new().with("Name", "Alice")),
                ResultItem::failure("b.pdf", "corrupt"),
            ],
            renamed_files: None,
        }
    }

    #[test]
    fn test_consistency_checks_counts_and_length() {
        assert!(outcome().is_consistent());
        assert!(ExtractionOutcome::default().is_consistent());

        let mut bad = outcome();
        bad.processed_files = 2;
        assert!(!bad.is_consistent());

        let mut short = outcome();
        short.results.pop();
        assert!(!short.is_consistent());
    }

    #[test]
    fn test_successes_and_failures_split_in_order() {
        let o = outcome();
        let ok: Vec<&str> = o.successes().map(|r| r.filename.as_str()).collect();
        let failed: Vec<&str> = o.failures().map(|r| r.filename.as_str()).collect();
        assert_eq!(ok, vec!["a.pdf"]);
        assert_eq!(failed, vec!["b.pdf"]);
    }

    #[test]
    fn test_renamed_lookup() {
        let mut o = outcome();
        assert_eq!(o.renamed("a.pdf"), None);
        o.renamed_files = Some(IndexMap::from([("a.pdf".to_string(), "ALICE X1.pdf".to_string())]));
        assert_eq!(o.renamed("a.pdf"), Some("ALICE X1.pdf"));
        assert_eq!(o.renamed("b.pdf"), None);
    }
}
