//! OAuth 2.0 token exchange
//!
//! ```text
//! ┌──────────────────┐
//! │  TokenExchanger  │  trait consumed by the session manager
//! └────────┬─────────┘
//!          │
//!          └──► OAuthClient   (reqwest, form-encoded POST to token endpoint)
//! ```
//!
//! # Module Organization
//!
//! - **[`types`]**: `OAuthConfig` (with the login link builder),
//!   `TokenGrant`, `RefreshedToken`, raw `TokenResponse`
//! - **[`client`]**: HTTP client and `ExchangeError`
//! - **[`traits`]**: the `TokenExchanger` seam

pub mod client;
pub mod traits;
pub mod types;

pub use client::{ExchangeError, OAuthClient};
pub use traits::TokenExchanger;
pub use types::{OAuthConfig, RefreshedToken, TokenGrant, TokenResponse};
