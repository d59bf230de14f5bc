//! Shared test helpers for `punchcard-core` integration tests.
//!
//! In-memory fakes for the core ports so scenario tests can focus on
//! behaviour instead of boilerplate.

#![allow(dead_code)]

pub mod reporter;
pub mod store;

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use chrono_tz::Asia::Tokyo;
use punchcard_common::auth::OAuthConfig;
use punchcard_common::testing::{MockClock, MockTokenExchanger};
use punchcard_core::{RefreshTokenStore, RemoteFiles, SessionManager};
pub use reporter::RecordingReporter;
pub use store::InMemoryObjectStore;

pub const FOLDER: &str = "folder-1";
pub const ERROR_FOLDER: &str = "errors-1";

/// 2025-04-01 09:00:00 in Tokyo.
pub fn morning() -> MockClock {
    MockClock::at(Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap())
}

pub fn oauth() -> OAuthConfig {
    OAuthConfig::google("cid", "secret", "http://localhost:8501/")
}

/// Session manager wired to in-memory fakes.
pub struct Harness {
    pub store: InMemoryObjectStore,
    pub reporter: RecordingReporter,
    pub exchanger: MockTokenExchanger,
    pub clock: MockClock,
    pub manager: SessionManager,
}

impl Harness {
    pub fn new() -> Self {
        let store = InMemoryObjectStore::new();
        let reporter = RecordingReporter::new();
        let exchanger = MockTokenExchanger::new();
        let clock = morning();

        let token_store = RefreshTokenStore::new(
            RemoteFiles::new(Arc::new(store.clone())),
            Arc::new(reporter.clone()),
        )
        .with_error_log_folder(ERROR_FOLDER);
        let manager = SessionManager::new(
            Arc::new(exchanger.clone()),
            token_store,
            Arc::new(reporter.clone()),
            Arc::new(clock.clone()),
            Tokyo,
            oauth(),
            FOLDER,
        )
        .with_error_log_folder(ERROR_FOLDER);

        Self { store, reporter, exchanger, clock, manager }
    }

    pub fn token_store(&self) -> RefreshTokenStore {
        RefreshTokenStore::new(
            RemoteFiles::new(Arc::new(self.store.clone())),
            Arc::new(self.reporter.clone()),
        )
    }
}
