//! Submit PDFs and show or export the result

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::Args;
use colored::Colorize;
use tracing::{error, info};

use extraction_results::{export, CompletedSubmission, ExportFile, ExportFormat, ExtractionSession};
use extractor_client::{DocumentType, ExtractionOptions, ExtractorClient, FileBlob};

use crate::render;

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    /// PDF files to submit, in order
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Document type (SKTT, EVLN, ITAS, ITK, Notifikasi, DKPTKA)
    #[arg(short = 't', long = "type", default_value = "SKTT", value_parser = parse_document_type)]
    pub document_type: DocumentType,

    /// Ask the service to rename files from their contents
    #[arg(long)]
    pub rename: bool,

    /// Leave the holder's name out of generated filenames
    #[arg(long, requires = "rename")]
    pub no_name: bool,

    /// Leave the passport number out of generated filenames
    #[arg(long, requires = "rename")]
    pub no_passport: bool,

    /// Write the full outcome as JSON
    #[arg(long)]
    pub json: bool,

    /// Write the table as CSV
    #[arg(long)]
    pub csv: bool,

    /// Directory for exports (defaults to EXTRACTOR_EXPORT_DIR)
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,
}

impl ExtractArgs {
    pub fn options(&self) -> ExtractionOptions {
        ExtractionOptions::new(self.document_type)
            .with_rename(self.rename)
            .with_name_for_rename(!self.no_name)
            .with_passport_for_rename(!self.no_passport)
    }

    pub fn formats(&self) -> Vec<ExportFormat> {
        let mut formats = Vec::new();
        if self.json {
            formats.push(ExportFormat::Json);
        }
        if self.csv {
            formats.push(ExportFormat::Csv);
        }
        formats
    }
}

/// Run one submission end to end. Returns the paths of written exports.
pub async fn run(client: ExtractorClient, args: &ExtractArgs, export_dir: &Path) -> Result<Vec<PathBuf>> {
    let files = args
        .files
        .iter()
        .map(|path| {
            FileBlob::from_path(path).with_context(|| format!("Failed to read {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;

    let base_url = client.base_url().to_string();
    let session = ExtractionSession::new(client);

    let availability = session.refresh_availability().await;
    if !availability.is_online() {
        println!("{}", render::availability(&base_url, &availability));
    }

    println!(
        "Submitting {} file(s) as {}...",
        files.len(),
        args.document_type.as_str().cyan()
    );

    let done = match session.submit(files, args.options()).await {
        Ok(done) => done,
        Err(e) => {
            error!(error = %e, "Extraction failed");
            bail!("{}", e.user_message());
        }
    };

    println!();
    println!("{}", render::summary(&done.outcome));
    println!();
    print!("{}", render::table(&done.outcome, done.document_type));
    println!();
    print!("{}", render::details(&done.outcome));

    let today = Local::now().date_naive();
    let mut written = Vec::new();
    for format in args.formats() {
        let path = write_export(&done, format, export_dir, today)?;
        println!("Saved {} export to {}", format, path.display().to_string().green());
        written.push(path);
    }
    Ok(written)
}

/// Serialize `done` in `format` and write it under `dir`.
pub fn write_export(
    done: &CompletedSubmission,
    format: ExportFormat,
    dir: &Path,
    date: NaiveDate,
) -> Result<PathBuf> {
    let ExportFile { filename, bytes, .. } =
        export(&done.outcome, format, done.document_type, date)
            .with_context(|| format!("Failed to build {} export", format))?;

    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create export directory {}", dir.display()))?;
    let path = dir.join(filename);
    fs::write(&path, bytes).with_context(|| format!("Failed to write {}", path.display()))?;

    info!(path = %path.display(), %format, "Export written");
    Ok(path)
}

/// Document type argument parser; the error lists the valid tags.
pub fn parse_document_type(tag: &str) -> std::result::Result<DocumentType, String> {
    tag.parse().map_err(|e| {
        let valid: Vec<&str> = DocumentType::ALL.iter().map(|t| t.as_str()).collect();
        format!("{} (expected one of {})", e, valid.join(", "))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use clap::Parser;
    use extraction_results::ExtractionOutcome;
    use extractor_client::{RawFieldMap, ResultItem};

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: ExtractArgs,
    }

    fn parse(argv: &[&str]) -> ExtractArgs {
        Harness::try_parse_from(std::iter::once("extract").chain(argv.iter().copied()))
            .unwrap()
            .args
    }

    fn done() -> CompletedSubmission {
        CompletedSubmission {
            document_type: DocumentType::Sktt,
            outcome: ExtractionOutcome {
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
            },
            completed_at: Utc::now(),
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 16).unwrap()
    }

    #[test]
    fn test_args_map_to_options() {
        let args = parse(&["--type", "itas", "--rename", "--no-passport", "a.pdf", "b.pdf"]);
        let options = args.options();
        assert_eq!(options.document_type, DocumentType::Itas);
        assert!(options.rename_enabled);
        assert!(options.use_name_for_rename);
        assert!(!options.use_passport_for_rename);
        assert_eq!(args.files.len(), 2);
    }

    #[test]
    fn test_args_defaults() {
        let args = parse(&["a.pdf"]);
        assert_eq!(args.document_type, DocumentType::Sktt);
        assert!(!args.options().rename_enabled);
        assert!(args.formats().is_empty());
    }

    #[test]
    fn test_args_reject_unknown_type_and_orphan_flags() {
        let unknown = Harness::try_parse_from(["extract", "--type", "PASSPORT", "a.pdf"]);
        assert!(unknown.is_err());

        let orphan = Harness::try_parse_from(["extract", "--no-name", "a.pdf"]);
        assert!(orphan.is_err());

        let no_files = Harness::try_parse_from(["extract"]);
        assert!(no_files.is_err());
    }

    #[test]
    fn test_write_export_creates_named_files() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("exports");

        let csv = write_export(&done(), ExportFormat::Csv, &nested, date()).unwrap();
        assert_eq!(csv, nested.join("Hasil_Ekstraksi_SKTT_2026-10-16.csv"));
        let text = fs::read_to_string(&csv).unwrap();
        assert_eq!(text.lines().count(), 2);

        let json = write_export(&done(), ExportFormat::Json, &nested, date()).unwrap();
        assert_eq!(json, nested.join("pdf_extraction_results_2026-10-16.json"));
        let back: ExtractionOutcome =
            serde_json::from_slice(&fs::read(&json).unwrap()).unwrap();
        assert_eq!(back, done().outcome);
    }

    #[test]
    fn test_parse_document_type_lists_choices() {
        assert_eq!(parse_document_type("dkptka").unwrap(), DocumentType::Dkptka);
        let err = parse_document_type("KTP").unwrap_err();
        assert!(err.starts_with("unknown document type: KTP"));
        assert!(err.contains("SKTT, EVLN, ITAS, ITK, Notifikasi, DKPTKA"));
    }
}
