//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Identity provider
pub const GOOGLE_AUTHORIZE_URL: &str = "https://accounts.google.com/o/oauth2/v2/auth";
pub const GOOGLE_TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
pub const DRIVE_FILE_SCOPE: &str = "https://www.googleapis.com/auth/drive.file";

// Object store
pub const DRIVE_API_BASE: &str = "https://www.googleapis.com/drive/v3";
pub const DRIVE_UPLOAD_BASE: &str = "https://www.googleapis.com/upload/drive/v3";
pub const FOLDER_MIME_TYPE: &str = "application/vnd.google-apps.folder";
pub const CSV_MIME_TYPE: &str = "text/csv";

// Stored artifacts
pub const REFRESH_TOKEN_FILE: &str = "refresh_token.csv";
pub const REFRESH_TOKEN_HEADER: &str = "refresh_token";
pub const ERROR_LOG_FILE: &str = "エラーLOG.csv";
pub const ERROR_LOG_HEADER: [&str; 2] = ["日付（時刻）", "エラー内容"];
pub const TIMECARD_FILE_SUFFIX: &str = "_timecard.csv";
pub const TIMECARD_HEADER: [&str; 3] = ["名前", "モード", "時刻"];

// Time
pub const DEFAULT_TIMEZONE: &str = "Asia/Tokyo";
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Session
pub const MAX_CONSUMED_CODES: usize = 32;

// Server
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8501";
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;
