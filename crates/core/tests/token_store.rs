//! Refresh token persistence against the in-memory store.

mod support;

use std::sync::Arc;

use punchcard_core::{RefreshTokenStore, RemoteFiles, TokenStoreError};
use punchcard_domain::constants::REFRESH_TOKEN_FILE;
use support::{InMemoryObjectStore, RecordingReporter, ERROR_FOLDER, FOLDER};

fn store_with(objects: &InMemoryObjectStore, reporter: &RecordingReporter) -> RefreshTokenStore {
    RefreshTokenStore::new(RemoteFiles::new(Arc::new(objects.clone())), Arc::new(reporter.clone()))
}

/// Validates that save then load returns the same printable token.
#[tokio::test]
async fn save_then_load_round_trips() {
    let objects = InMemoryObjectStore::new();
    let tokens = store_with(&objects, &RecordingReporter::new());
    let token = "1//0gLongRefresh-Token_with.punctuation~";

    assert!(tokens.save(token, "AT", FOLDER).await);

    assert_eq!(tokens.load("AT", FOLDER).await.as_deref(), Some(token));
}

/// Validates that saving twice overwrites the single stored file.
#[tokio::test]
async fn save_overwrites_in_place() {
    let objects = InMemoryObjectStore::new();
    let tokens = store_with(&objects, &RecordingReporter::new());

    tokens.try_save("RT1", "AT", FOLDER).await.unwrap();
    tokens.try_save("RT2", "AT", FOLDER).await.unwrap();

    assert_eq!(objects.count_named(REFRESH_TOKEN_FILE), 1);
    assert_eq!(objects.content_of(FOLDER, REFRESH_TOKEN_FILE).as_deref(), Some("refresh_token\nUlQy"));
}

/// Validates that an empty folder yields `None` without a report.
#[tokio::test]
async fn load_from_empty_folder_is_absent() {
    let reporter = RecordingReporter::new();
    let tokens = store_with(&InMemoryObjectStore::new(), &reporter);

    assert!(tokens.try_load("", FOLDER).await.unwrap().is_none());
    assert!(tokens.load("", FOLDER).await.is_none());
    assert_eq!(reporter.count(), 0);
}

/// Validates that trashed copies and other folders are not read.
#[tokio::test]
async fn load_ignores_trashed_and_foreign_files() {
    let objects = InMemoryObjectStore::new();
    let trashed = objects.seed_file(FOLDER, REFRESH_TOKEN_FILE, "refresh_token\nUlQx");
    objects.trash(&trashed);
    objects.seed_file("other-folder", REFRESH_TOKEN_FILE, "refresh_token\nUlQy");
    let tokens = store_with(&objects, &RecordingReporter::new());

    assert!(tokens.try_load("AT", FOLDER).await.unwrap().is_none());
}

/// Validates that a CSV with a CRLF body and a BOM still loads.
#[tokio::test]
async fn load_tolerates_bom_and_crlf() {
    let objects = InMemoryObjectStore::new();
    objects.seed_file(FOLDER, REFRESH_TOKEN_FILE, "\u{feff}refresh_token\r\nUlQx\r\n");
    let tokens = store_with(&objects, &RecordingReporter::new());

    assert_eq!(tokens.try_load("AT", FOLDER).await.unwrap().as_deref(), Some("RT1"));
}

/// Validates that a present but unparsable file is `Malformed`, distinct
/// from not-found, and reported by `load`.
#[tokio::test]
async fn malformed_file_is_distinguished() {
    let objects = InMemoryObjectStore::new();
    objects.seed_file(FOLDER, REFRESH_TOKEN_FILE, "token\nUlQx");
    let reporter = RecordingReporter::new();
    let tokens = store_with(&objects, &reporter);

    assert!(matches!(tokens.try_load("AT", FOLDER).await, Err(TokenStoreError::Malformed(_))));
    assert!(tokens.load("AT", FOLDER).await.is_none());
    assert_eq!(reporter.count(), 1);
}

/// Validates that store outages surface as `Store` and are reported by both
/// `save` and `load`.
#[tokio::test]
async fn store_failures_are_reported() {
    let objects = InMemoryObjectStore::new();
    objects.fail_with("connection reset");
    let reporter = RecordingReporter::new();
    let tokens = store_with(&objects, &reporter);

    assert!(matches!(tokens.try_load("AT", FOLDER).await, Err(TokenStoreError::Store(_))));
    assert!(!tokens.save("RT1", "AT", FOLDER).await);
    assert!(tokens.load("AT", FOLDER).await.is_none());

    let reports = reporter.reports();
    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r.message.contains("connection reset")));
}

/// Validates that reports follow the error log override and carry the
/// caller's access token.
#[tokio::test]
async fn failures_go_to_error_log_folder_when_set() {
    let objects = InMemoryObjectStore::new();
    objects.seed_file(FOLDER, REFRESH_TOKEN_FILE, "refresh_token\n");
    let reporter = RecordingReporter::new();
    let tokens = store_with(&objects, &reporter).with_error_log_folder(ERROR_FOLDER);

    assert!(tokens.load("AT1", FOLDER).await.is_none());

    let reports = reporter.reports();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].folder_id, ERROR_FOLDER);
    assert_eq!(reports[0].access_token, "AT1");
}
