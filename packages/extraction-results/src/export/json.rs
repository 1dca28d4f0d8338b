use crate::error::ExportResult;
use crate::outcome::ExtractionOutcome;

/// The full outcome, pretty-printed.
pub fn to_json(outcome: &ExtractionOutcome) -> ExportResult<Vec<u8>> {
    Ok(serde_json::to_vec_pretty(outcome)?)
}
