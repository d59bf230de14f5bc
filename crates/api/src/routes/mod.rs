//! HTTP routes
//!
//! | route                 | handler                 |
//! |-----------------------|-------------------------|
//! | `GET /`               | [`session::status`]     |
//! | `GET /oauth/callback` | [`session::status`]     |
//! | `POST /punch`         | [`punch::record`]       |
//! | `GET /health`         | [`health::check`]       |

pub mod health;
pub mod punch;
pub mod session;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use crate::AppContext;

/// Build the application router over a shared context.
pub fn router(context: Arc<AppContext>) -> Router {
    Router::new()
        .route("/", get(session::status))
        .route("/oauth/callback", get(session::status))
        .route("/punch", post(punch::record))
        .route("/health", get(health::check))
        .with_state(context)
}
