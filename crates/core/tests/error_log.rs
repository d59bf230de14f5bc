//! Remote error log behaviour.

mod support;

use std::sync::Arc;

use chrono_tz::Asia::Tokyo;
use punchcard_core::{ErrorReporter, RemoteErrorLog, RemoteFiles};
use punchcard_domain::constants::ERROR_LOG_FILE;
use support::{morning, InMemoryObjectStore, ERROR_FOLDER};

fn log_over(objects: &InMemoryObjectStore) -> RemoteErrorLog {
    RemoteErrorLog::new(RemoteFiles::new(Arc::new(objects.clone())), Arc::new(morning()), Tokyo)
}

/// Validates that the first report creates the log with its header and a
/// sanitized, Tokyo-stamped row.
#[tokio::test]
async fn first_report_creates_log() {
    let objects = InMemoryObjectStore::new();

    log_over(&objects).report("refresh failed,\nHTTP 400", "AT", ERROR_FOLDER).await;

    assert_eq!(
        objects.content_of(ERROR_FOLDER, ERROR_LOG_FILE).as_deref(),
        Some("日付（時刻）,エラー内容\n2025-04-01 09:00:00,refresh failed、 HTTP 400\n")
    );
}

/// Validates that later reports append to the same file.
#[tokio::test]
async fn reports_accumulate() {
    let objects = InMemoryObjectStore::new();
    let log = log_over(&objects);

    log.report("one", "AT", ERROR_FOLDER).await;
    log.report("two", "AT", ERROR_FOLDER).await;

    let content = objects.content_of(ERROR_FOLDER, ERROR_LOG_FILE).unwrap();
    assert_eq!(content.lines().count(), 3);
    assert!(content.ends_with("2025-04-01 09:00:00,two\n"));
    assert_eq!(objects.count_named(ERROR_LOG_FILE), 1);
}

/// Validates that a failing store is swallowed.
#[tokio::test]
async fn store_failure_is_swallowed() {
    let objects = InMemoryObjectStore::new();
    objects.fail_with("quota exceeded");

    log_over(&objects).report("boom", "AT", ERROR_FOLDER).await;

    assert_eq!(objects.calls(), 1);
}

/// Validates that an unreadable existing log is left alone.
#[tokio::test]
async fn unreadable_log_is_not_overwritten() {
    let objects = InMemoryObjectStore::new();
    objects.seed_file(ERROR_FOLDER, ERROR_LOG_FILE, "\"unterminated\n");

    log_over(&objects).report("boom", "AT", ERROR_FOLDER).await;

    assert_eq!(objects.content_of(ERROR_FOLDER, ERROR_LOG_FILE).as_deref(), Some("\"unterminated\n"));
}
