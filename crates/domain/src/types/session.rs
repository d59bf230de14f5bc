//! In-memory OAuth session

use chrono::DateTime;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::impl_domain_status_conversions;

/// Access token held for the current interaction context.
///
/// A session without `expires_at` is never valid, whatever the token says.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub expires_at: Option<DateTime<Tz>>,
}

impl Session {
    /// Session that is valid until `expires_at`.
    #[must_use]
    pub fn new(access_token: impl Into<String>, expires_at: DateTime<Tz>) -> Self {
        Self { access_token: access_token.into(), expires_at: Some(expires_at) }
    }

    /// `true` when `expires_at` is present and strictly after `now`.
    #[must_use]
    pub fn is_valid_at(&self, now: DateTime<Tz>) -> bool {
        self.expires_at.is_some_and(|expires_at| expires_at > now)
    }

    /// Seconds left before expiry, negative once expired.
    #[must_use]
    pub fn seconds_until_expiry(&self, now: DateTime<Tz>) -> Option<i64> {
        self.expires_at.map(|expires_at| (expires_at - now).num_seconds())
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("access_token", &if self.access_token.is_empty() { "" } else { "<redacted>" })
            .field("expires_at", &self.expires_at)
            .finish()
    }
}

/// Outcome of a session resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionState {
    NoSession,
    SessionValid,
    SessionExpired,
}

impl_domain_status_conversions!(SessionState {
    NoSession => "no_session",
    SessionValid => "session_valid",
    SessionExpired => "session_expired",
});

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone};
    use chrono_tz::Asia::Tokyo;

    use super::*;

    fn noon() -> DateTime<Tz> {
        Tokyo.with_ymd_and_hms(2025, 4, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn expiry_boundary_is_exclusive() {
        let now = noon();

        assert!(!Session::new("t", now - Duration::seconds(1)).is_valid_at(now));
        assert!(!Session::new("t", now).is_valid_at(now));
        assert!(Session::new("t", now + Duration::seconds(1)).is_valid_at(now));
    }

    #[test]
    fn missing_expiry_is_never_valid() {
        let session = Session { access_token: "t".into(), expires_at: None };
        assert!(!session.is_valid_at(noon()));
        assert!(!Session::default().is_valid_at(noon()));
    }

    #[test]
    fn seconds_until_expiry_goes_negative() {
        let now = noon();
        let session = Session::new("t", now + Duration::seconds(90));
        assert_eq!(session.seconds_until_expiry(now), Some(90));
        assert_eq!(session.seconds_until_expiry(now + Duration::seconds(100)), Some(-10));
    }

    #[test]
    fn debug_hides_token() {
        let rendered = format!("{:?}", Session::new("secret-token", noon()));
        assert!(!rendered.contains("secret-token"));
    }

    #[test]
    fn state_names_round_trip() {
        assert_eq!(SessionState::SessionExpired.to_string(), "session_expired");
        assert_eq!("no_session".parse::<SessionState>(), Ok(SessionState::NoSession));
        assert_eq!(
            serde_json::to_string(&SessionState::SessionValid).unwrap(),
            r#""session_valid""#
        );
    }
}
