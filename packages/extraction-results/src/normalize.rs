//! Reconciles the two extraction response shapes into [`ExtractionOutcome`].
//!
//! `/extract` already returns per-file results. `/extract-with-rename`
//! returns bare field maps positionally aligned with the submitted files,
//! so results are synthesized by zipping them with the requested names.

use tracing::{debug, warn};

use extractor_client::{PlainResponse, RawResponse, RenameResponse, ResultItem, ResultStatus};

use crate::outcome::ExtractionOutcome;

/// Error recorded for a requested file the rename endpoint returned no data for.
pub const MISSING_EXTRACTION_DATA: &str = "no extraction data returned for this file";

/// Normalize `raw` against the filenames that were submitted, in order.
///
/// Which shape to expect is carried by the `RawResponse` variant, fixed by
/// the endpoint the request went to, so the rename flag needs no separate
/// argument.
pub fn normalize(raw: RawResponse, requested_files: &[String]) -> ExtractionOutcome {
    match raw {
        RawResponse::Plain(resp) => normalize_plain(resp),
        RawResponse::Rename(resp) => normalize_rename(resp, requested_files),
    }
}

fn normalize_plain(resp: PlainResponse) -> ExtractionOutcome {
    let outcome = ExtractionOutcome {
        total_files: resp.total_files,
        processed_files: resp.processed_files,
        failed_files: resp.failed_files,
        results: resp.results,
        renamed_files: resp.renamed_files,
    };

    if !outcome.is_consistent() {
        warn!(
            total = outcome.total_files,
            processed = outcome.processed_files,
            failed = outcome.failed_files,
            results = outcome.results.len(),
            "Service counts disagree with returned results"
        );
    }
    outcome
}

/// Zip field maps with requested names.
///
/// Every field map is kept; one beyond the requested names is labelled
/// `File {n}`. A requested file with no field map becomes an error result
/// rather than being dropped, so `results[i]` always names the i-th file.
fn normalize_rename(resp: RenameResponse, requested_files: &[String]) -> ExtractionOutcome {
    let data_len = resp.extraction_data.len();
    if data_len != requested_files.len() {
        warn!(
            requested = requested_files.len(),
            returned = data_len,
            "Rename response length differs from submitted files"
        );
    }

    let mut results: Vec<ResultItem> = resp
        .extraction_data
        .into_iter()
        .enumerate()
        .map(|(i, data)| ResultItem::success(filename_at(requested_files, i), data))
        .collect();

    results.extend(
        requested_files
            .iter()
            .skip(data_len)
            .map(|name| ResultItem::failure(name.clone(), MISSING_EXTRACTION_DATA)),
    );

    let processed_files = results
        .iter()
        .filter(|r| r.status == ResultStatus::Success)
        .count();
    let total_files = results.len();

    debug!(total_files, processed_files, "Synthesized results from rename response");

    ExtractionOutcome {
        total_files,
        processed_files,
        failed_files: total_files - processed_files,
        results,
        renamed_files: resp.renamed_files,
    }
}

fn filename_at(requested_files: &[String], i: usize) -> String {
    requested_files
        .get(i)
        .filter(|name| !name.is_empty())
        .cloned()
        .unwrap_or_else(|| format!("File {}", i + 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use extractor_client::RawFieldMap;
    use indexmap::IndexMap;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn rename_response(data: Vec<RawFieldMap>) -> RawResponse {
        RawResponse::Rename(RenameResponse {
            success: true,
            total_files: data.len(),
            processed_files: data.len(),
            extraction_data: data,
            ..Default::default()
        })
    }

    #[test]
    fn test_plain_results_pass_through_unchanged() {
        let results = vec![
            ResultItem::success("a.pdf", RawFieldMap::new().with("Name", "Alice").with("NIK", "123")),
            ResultItem::failure("b.pdf", "corrupt"),
        ];
        let raw = RawResponse::Plain(PlainResponse {
            success: true,
            timestamp: Some("2026-10-16T08:00:00".into()),
            total_files: 2,
            processed_files: 1,
            failed_files: 1,
            results: results.clone(),
            renamed_files: None,
        });

        let outcome = normalize(raw, &names(&["a.pdf", "b.pdf"]));
        assert_eq!(outcome.results, results);
        assert_eq!(outcome.total_files, 2);
        assert_eq!(outcome.processed_files, 1);
        assert_eq!(outcome.failed_files, 1);
        assert!(outcome.is_consistent());
    }

    #[test]
    fn test_rename_zip_follows_submission_order() {
        let raw = rename_response(vec![
            RawFieldMap::new().with("Name", "X"),
            RawFieldMap::new().with("Name", "Y"),
        ]);

        let outcome = normalize(raw, &names(&["a.pdf", "b.pdf"]));

        assert_eq!(outcome.results.len(), 2);
        assert_eq!(outcome.results[0].filename, "a.pdf");
        assert_eq!(outcome.results[1].filename, "b.pdf");
        assert!(outcome.results.iter().all(|r| r.status == ResultStatus::Success));
        assert_eq!(
            outcome.results[1].extracted().and_then(|d| d.text("Name")).as_deref(),
            Some("Y")
        );
        assert!(outcome.is_consistent());
    }

    #[test]
    fn test_rename_extra_data_gets_placeholder_names() {
        let raw = rename_response(vec![
            RawFieldMap::new().with("Name", "X"),
            RawFieldMap::new().with("Name", "Y"),
            RawFieldMap::new().with("Name", "Z"),
        ]);

        let outcome = normalize(raw, &names(&["a.pdf"]));
        let filenames: Vec<&str> = outcome.results.iter().map(|r| r.filename.as_str()).collect();
        assert_eq!(filenames, vec!["a.pdf", "File 2", "File 3"]);
        assert_eq!(outcome.processed_files, 3);
    }

    #[test]
    fn test_rename_missing_data_becomes_error_results() {
        let raw = rename_response(vec![RawFieldMap::new().with("Name", "X")]);

        let outcome = normalize(raw, &names(&["a.pdf", "b.pdf", "c.pdf"]));

        assert_eq!(outcome.total_files, 3);
        assert_eq!(outcome.processed_files, 1);
        assert_eq!(outcome.failed_files, 2);
        assert_eq!(outcome.results[1].filename, "b.pdf");
        assert_eq!(outcome.results[1].status, ResultStatus::Error);
        assert_eq!(outcome.results[2].error.as_deref(), Some(MISSING_EXTRACTION_DATA));
        assert!(outcome.is_consistent());
    }

    #[test]
    fn test_rename_carries_renamed_files() {
        let renamed = IndexMap::from([("a.pdf".to_string(), "ALICE X123.pdf".to_string())]);
        let raw = RawResponse::Rename(RenameResponse {
            extraction_data: vec![RawFieldMap::new().with("Name", "Alice")],
            renamed_files: Some(renamed.clone()),
            ..Default::default()
        });

        let outcome = normalize(raw, &names(&["a.pdf"]));
        assert_eq!(outcome.renamed_files, Some(renamed));
        assert_eq!(outcome.renamed("a.pdf"), Some("ALICE X123.pdf"));
    }

    #[test]
    fn test_blank_requested_name_falls_back_to_placeholder() {
        let raw = rename_response(vec![RawFieldMap::new()]);
        let outcome = normalize(raw, &names(&[""]));
        assert_eq!(outcome.results[0].filename, "File 1");
    }
}
