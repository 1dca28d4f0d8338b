//! Submission gating and outcome replacement.

use std::time::Duration;

use extraction_results::testing::{MockExtractor, MockExtractorCall};
use extraction_results::{ExtractionSession, SubmitError};
use extractor_client::{
    ClientError, DocumentType, ExtractionOptions, FileBlob, PlainResponse, RawFieldMap,
    RawResponse, RenameResponse, ResultItem, ServiceStatus,
};

fn pdf(name: &str) -> FileBlob {
    FileBlob::new(name, b"%PDF-1.4".to_vec())
}

fn plain(results: Vec<ResultItem>) -> RawResponse {
    let processed = results.iter().filter(|r| r.is_success()).count();
    RawResponse::Plain(PlainResponse {
        success: true,
        timestamp: None,
        total_files: results.len(),
        processed_files: processed,
        failed_files: results.len() - processed,
        results,
        renamed_files: None,
    })
}

#[tokio::test]
async fn test_submit_rejected_before_first_health_check() {
    let mock = MockExtractor::new();
    let session = ExtractionSession::new(mock.clone());

    let err = session
        .submit(vec![pdf("a.pdf")], ExtractionOptions::new(DocumentType::Sktt))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SubmitError::ServiceUnavailable { status: ServiceStatus::Checking }
    ));
    assert_eq!(mock.extract_count(), 0);
}

#[tokio::test]
async fn test_submit_rejected_while_offline() {
    let mock = MockExtractor::new().with_status(ServiceStatus::Offline);
    let session = ExtractionSession::new(mock.clone());

    let availability = session.refresh_availability().await;
    assert_eq!(availability.status, ServiceStatus::Offline);
    assert!(availability.checked_at.is_some());

    let err = session
        .submit(vec![pdf("a.pdf")], ExtractionOptions::new(DocumentType::Sktt))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SubmitError::ServiceUnavailable { status: ServiceStatus::Offline }
    ));
    assert!(err.user_message().contains("offline"));
    assert_eq!(mock.extract_count(), 0);
}

#[tokio::test]
async fn test_recovered_service_accepts_submissions() {
    let mock = MockExtractor::new()
        .with_status(ServiceStatus::Offline)
        .with_response(plain(vec![ResultItem::success(
            "a.pdf",
            RawFieldMap::new().with("Name", "Alice"),
        )]));
    let session = ExtractionSession::new(mock.clone());

    session.refresh_availability().await;
    mock.set_status(ServiceStatus::Online);
    session.refresh_availability().await;

    let done = session
        .submit(vec![pdf("a.pdf")], ExtractionOptions::new(DocumentType::Evln))
        .await
        .unwrap();
    assert_eq!(done.document_type, DocumentType::Evln);
    assert_eq!(done.outcome.processed_files, 1);
}

#[tokio::test]
async fn test_empty_file_list_is_invalid() {
    let session = ExtractionSession::new(MockExtractor::new());
    session.refresh_availability().await;

    let err = session
        .submit(Vec::new(), ExtractionOptions::new(DocumentType::Sktt))
        .await
        .unwrap_err();

    assert!(matches!(err, SubmitError::Client(ClientError::InvalidRequest(_))));
    assert!(!session.is_busy());
}

#[tokio::test]
async fn test_second_submission_while_in_flight_is_busy() {
    let mock = MockExtractor::new()
        .with_delay(Duration::from_millis(100))
        .with_response(plain(vec![ResultItem::success(
            "a.pdf",
            RawFieldMap::new().with("Name", "Alice"),
        )]));
    let session = ExtractionSession::new(mock.clone());
    session.refresh_availability().await;

    let options = ExtractionOptions::new(DocumentType::Sktt);
    let (first, second) = tokio::join!(
        session.submit(vec![pdf("a.pdf")], options),
        session.submit(vec![pdf("b.pdf")], options),
    );

    assert!(first.is_ok());
    assert!(matches!(second, Err(SubmitError::Busy)));
    assert_eq!(mock.extract_count(), 1);
    assert!(!session.is_busy());
}

#[tokio::test]
async fn test_new_submission_replaces_previous_outcome() {
    let mock = MockExtractor::new()
        .with_response(plain(vec![
            ResultItem::success("a.pdf", RawFieldMap::new().with("Name", "Alice")),
            ResultItem::success("b.pdf", RawFieldMap::new().with("Name", "Bob")),
        ]))
        .with_response(plain(vec![ResultItem::success(
            "c.pdf",
            RawFieldMap::new().with("Name", "Carol"),
        )]));
    let session = ExtractionSession::new(mock);
    session.refresh_availability().await;

    session
        .submit(
            vec![pdf("a.pdf"), pdf("b.pdf")],
            ExtractionOptions::new(DocumentType::Sktt),
        )
        .await
        .unwrap();
    session
        .submit(vec![pdf("c.pdf")], ExtractionOptions::new(DocumentType::Itk))
        .await
        .unwrap();

    let current = session.current_outcome().await.unwrap();
    let names: Vec<&str> = current
        .outcome
        .results
        .iter()
        .map(|r| r.filename.as_str())
        .collect();
    assert_eq!(names, vec!["c.pdf"]);
    assert_eq!(current.document_type, DocumentType::Itk);
}

#[tokio::test]
async fn test_failed_submission_clears_previous_outcome() {
    let mock = MockExtractor::new()
        .with_response(plain(vec![ResultItem::success(
            "a.pdf",
            RawFieldMap::new().with("Name", "Alice"),
        )]))
        .with_error(ClientError::Timeout {
            after: Duration::from_secs(30),
        });
    let session = ExtractionSession::new(mock);
    session.refresh_availability().await;

    session
        .submit(vec![pdf("a.pdf")], ExtractionOptions::new(DocumentType::Sktt))
        .await
        .unwrap();
    assert!(session.current_outcome().await.is_some());

    let err = session
        .submit(vec![pdf("b.pdf")], ExtractionOptions::new(DocumentType::Sktt))
        .await
        .unwrap_err();

    assert!(err.user_message().contains("smaller files"));
    assert!(session.current_outcome().await.is_none());
    assert!(!session.is_busy());
}

#[tokio::test]
async fn test_rename_submission_records_flags_and_zips_names() {
    let mock = MockExtractor::new().with_response(RawResponse::Rename(RenameResponse {
        success: true,
        total_files: 2,
        processed_files: 2,
        extraction_data: vec![
            RawFieldMap::new().with("Name", "X"),
            RawFieldMap::new().with("Name", "Y"),
        ],
        ..Default::default()
    }));
    let session = ExtractionSession::new(mock.clone());
    session.refresh_availability().await;

    let options = ExtractionOptions::new(DocumentType::Itas)
        .with_rename(true)
        .with_passport_for_rename(false);
    let done = session
        .submit(vec![pdf("a.pdf"), pdf("b.pdf")], options)
        .await
        .unwrap();

    assert_eq!(done.outcome.results[0].filename, "a.pdf");
    assert_eq!(done.outcome.results[1].filename, "b.pdf");
    assert_eq!(
        mock.calls().last(),
        Some(&MockExtractorCall::Extract {
            filenames: vec!["a.pdf".to_string(), "b.pdf".to_string()],
            rename: true,
            document_type: Some("ITAS".to_string()),
        })
    );
}
