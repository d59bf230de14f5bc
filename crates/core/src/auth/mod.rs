//! OAuth session lifecycle: refresh token persistence and session resolution

pub mod session;
pub mod token_store;

pub use session::{SessionContext, SessionManager, SessionResolution};
pub use token_store::{RefreshTokenStore, TokenStoreError};
