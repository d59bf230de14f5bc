//! Conversions from external infrastructure errors into domain errors.

use punchcard_domain::PunchcardError;
use reqwest::Error as HttpError;
use reqwest::StatusCode;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub PunchcardError);

impl From<InfraError> for PunchcardError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<PunchcardError> for InfraError {
    fn from(value: PunchcardError) -> Self {
        InfraError(value)
    }
}

/// Extension trait to make the conversion logic explicit in tests and within
/// this module.
trait IntoPunchcardError {
    fn into_punchcard(self) -> PunchcardError;
}

/* -------------------------------------------------------------------------- */
/* reqwest::Error → PunchcardError */
/* -------------------------------------------------------------------------- */

impl IntoPunchcardError for HttpError {
    fn into_punchcard(self) -> PunchcardError {
        if self.is_timeout() {
            return PunchcardError::Network("HTTP request timed out".into());
        }

        #[cfg(not(target_arch = "wasm32"))]
        if self.is_connect() {
            return PunchcardError::Network("HTTP connection failure".into());
        }

        if let Some(status) = self.status() {
            return status_error(status, "");
        }

        PunchcardError::Network(self.to_string())
    }
}

impl From<HttpError> for InfraError {
    fn from(value: HttpError) -> Self {
        InfraError(value.into_punchcard())
    }
}

/* -------------------------------------------------------------------------- */
/* HTTP status → PunchcardError */
/* -------------------------------------------------------------------------- */

/// Map a non-success status, keeping the response body for diagnostics.
#[must_use]
pub fn status_error(status: StatusCode, body: &str) -> PunchcardError {
    let code = status.as_u16();
    let mut message = format!("HTTP {} {}", code, status.canonical_reason().unwrap_or("unknown status"));
    let body = body.trim();
    if !body.is_empty() {
        message.push_str(": ");
        message.push_str(body);
    }

    match code {
        401 | 403 => PunchcardError::Auth(message),
        404 => PunchcardError::NotFound(message),
        429 => PunchcardError::Network(message),
        400..=499 => PunchcardError::InvalidInput(message),
        _ => PunchcardError::Network(message),
    }
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
