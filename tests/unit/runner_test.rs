//! Tests for the run pipeline: list, filter, dispatch, summarize, persist

use std::fs;
use std::sync::Arc;

use tempfile::TempDir;

use repo_analyzer::adapters::ReportWriter;
use repo_analyzer::adapters::file::Report;
use repo_analyzer::core::models::CheckOptions;
use repo_analyzer::core::services::{RunRequest, Runner, SummaryTable};
use repo_analyzer::error::AnalyzerError;

use super::common::{DelayCheck, MemoryReports, RecordingProgress, StaticLister, repos};

fn request(check: Arc<DelayCheck>, concurrency: usize) -> RunRequest<'static> {
    RunRequest {
        check,
        org: "acme",
        slugs: None,
        options: CheckOptions::default(),
        concurrency,
    }
}

#[tokio::test]
async fn test_seven_repositories_with_cap_five() {
    let lister = StaticLister::new(repos(&["a", "b", "c", "d", "e", "f", "g"]));
    let reports = MemoryReports::default();
    let check = Arc::new(DelayCheck::new(&[40, 5, 25, 10, 30, 15, 20]).silent_for(&["d"]));
    let mut progress = RecordingProgress::default();

    let outcome = Runner::new(&lister, &reports)
        .run(request(Arc::clone(&check), 5), &mut progress)
        .await
        .unwrap();

    assert_eq!(check.calls(), 7);
    assert!(check.peak() <= 5, "peak in flight was {}", check.peak());
    assert_eq!(outcome.analyzed, 7);
    assert_eq!(outcome.results.len(), 6);
    assert_eq!(outcome.summary[0], "Total: 6");

    assert_eq!(progress.started, Some(7));
    assert_eq!(progress.ticks.last(), Some(&(7, 7)));
    assert_eq!(progress.ticks.iter().filter(|(done, _)| *done == 7).count(), 1);
    assert!(progress.finished);

    let saved = reports.saved();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].check_name, "aws-sdk");
    assert_eq!(saved[0].results.len(), 6);
    assert!(!saved[0].results.contains(&"d: checked".to_string()));
    assert_eq!(saved[0].summary, outcome.summary);
}

#[tokio::test]
async fn test_explicit_slugs_narrow_the_run() {
    let lister = StaticLister::new(repos(&["a", "b", "c", "d"]));
    let reports = MemoryReports::default();
    let check = Arc::new(DelayCheck::new(&[1]));
    let slugs = vec!["c".to_string(), "a".to_string()];

    let outcome = Runner::new(&lister, &reports)
        .run(
            RunRequest {
                slugs: Some(slugs.as_slice()),
                ..request(Arc::clone(&check), 5)
            },
            &mut RecordingProgress::default(),
        )
        .await
        .unwrap();

    assert_eq!(outcome.analyzed, 2);
    assert_eq!(check.calls(), 2);
}

#[tokio::test]
async fn test_repos_file_narrows_the_run() {
    let temp = TempDir::new().unwrap();
    let file = temp.path().join("repos.txt");
    fs::write(&file, "b\n\n  d \n").unwrap();

    let lister = StaticLister::new(repos(&["a", "b", "c", "d"]));
    let reports = MemoryReports::default();
    let check = Arc::new(DelayCheck::new(&[1]));

    let outcome = Runner::new(&lister, &reports)
        .run(
            RunRequest {
                options: CheckOptions {
                    repos_file: Some(file),
                    ..CheckOptions::default()
                },
                ..request(Arc::clone(&check), 5)
            },
            &mut RecordingProgress::default(),
        )
        .await
        .unwrap();

    assert_eq!(outcome.analyzed, 2);
}

#[tokio::test]
async fn test_missing_repos_file_aborts_before_listing() {
    let lister = StaticLister::new(repos(&["a"]));
    let reports = MemoryReports::default();
    let check = Arc::new(DelayCheck::new(&[1]));

    let err = Runner::new(&lister, &reports)
        .run(
            RunRequest {
                options: CheckOptions {
                    repos_file: Some("/nonexistent/repos.txt".into()),
                    ..CheckOptions::default()
                },
                ..request(Arc::clone(&check), 5)
            },
            &mut RecordingProgress::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AnalyzerError::Config(_)));
    assert_eq!(lister.calls(), 0);
    assert_eq!(check.calls(), 0);
    assert!(reports.saved().is_empty());
}

#[tokio::test]
async fn test_listing_failure_is_remote_service_error() {
    let lister = StaticLister::failing("workspace not found");
    let reports = MemoryReports::default();

    let err = Runner::new(&lister, &reports)
        .run(
            request(Arc::new(DelayCheck::new(&[1])), 5),
            &mut RecordingProgress::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AnalyzerError::RemoteService(ref m) if m.contains("workspace not found")));
}

#[tokio::test]
async fn test_no_repositories_writes_no_report() {
    let lister = StaticLister::new(Vec::new());
    let reports = MemoryReports::default();
    let mut progress = RecordingProgress::default();

    let outcome = Runner::new(&lister, &reports)
        .run(request(Arc::new(DelayCheck::new(&[1])), 5), &mut progress)
        .await
        .unwrap();

    assert_eq!(outcome.analyzed, 0);
    assert!(outcome.report.is_none());
    assert!(reports.saved().is_empty());
    assert_eq!(progress.started, None);
}

#[tokio::test]
async fn test_report_failure_is_fatal() {
    let lister = StaticLister::new(repos(&["a", "b"]));
    let reports = MemoryReports::broken();

    let err = Runner::new(&lister, &reports)
        .run(
            request(Arc::new(DelayCheck::new(&[1])), 2),
            &mut RecordingProgress::default(),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, AnalyzerError::Io { .. }));
}

#[tokio::test]
async fn test_report_written_to_disk() {
    let temp = TempDir::new().unwrap();
    let writer = ReportWriter::new(temp.path().join("output"));
    let lister = StaticLister::new(repos(&["a", "b", "c"]));

    let outcome = Runner::new(&lister, &writer)
        .run(
            request(Arc::new(DelayCheck::new(&[2, 1])), 2),
            &mut RecordingProgress::default(),
        )
        .await
        .unwrap();

    let path = outcome.report.unwrap();
    let name = path.file_name().unwrap().to_string_lossy().into_owned();
    assert!(name.starts_with("aws-sdk-results-"));
    assert!(name.ends_with("Z.json"));

    let report: Report = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(report.summary[0], "Total: 3");
    assert_eq!(report.results.len(), 3);
}

#[tokio::test]
async fn test_check_without_summary_entry_gets_generic_line() {
    let lister = StaticLister::new(repos(&["a", "b"]));
    let reports = MemoryReports::default();

    let outcome = Runner::new(&lister, &reports)
        .with_summaries(SummaryTable::empty())
        .run(
            request(Arc::new(DelayCheck::new(&[1])), 5),
            &mut RecordingProgress::default(),
        )
        .await
        .unwrap();

    assert_eq!(outcome.summary, vec!["Completed aws-sdk check: 2 result(s) collected"]);
}
