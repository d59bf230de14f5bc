//! HTTP error responses

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use punchcard_domain::PunchcardError;
use serde::Serialize;
use thiserror::Error;

/// Errors a route can answer with.
#[derive(Debug, Error)]
pub enum ApiError {
    /// No valid session could be established; the caller must log in.
    #[error("login required")]
    LoginRequired { login_url: String },

    #[error(transparent)]
    Domain(#[from] PunchcardError),
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    login_url: Option<String>,
}

impl ApiError {
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::LoginRequired { .. } => StatusCode::UNAUTHORIZED,
            Self::Domain(err) => match err {
                PunchcardError::Auth(_) => StatusCode::UNAUTHORIZED,
                PunchcardError::NotFound(_) => StatusCode::NOT_FOUND,
                PunchcardError::InvalidInput(_) => StatusCode::BAD_REQUEST,
                PunchcardError::Network(_) | PunchcardError::Storage(_) => StatusCode::BAD_GATEWAY,
                PunchcardError::Config(_) | PunchcardError::Internal(_) => {
                    StatusCode::INTERNAL_SERVER_ERROR
                }
            },
        }
    }

    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::LoginRequired { .. } => "login_required",
            Self::Domain(err) => err.label(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            error: self.label(),
            message: self.to_string(),
            login_url: match self {
                Self::LoginRequired { login_url } => Some(login_url),
                Self::Domain(_) => None,
            },
        };
        (status, Json(body)).into_response()
    }
}
