//! Mock implementations of common traits

// Allow missing error/panic docs for test mocks - they are designed to be simple
// and errors are clearly indicated by their return types
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[cfg(feature = "platform")]
pub use exchanger::MockTokenExchanger;

#[cfg(feature = "platform")]
mod exchanger {
    use std::collections::VecDeque;
    use std::sync::Arc;

    use async_trait::async_trait;
    use parking_lot::Mutex;

    use crate::auth::{ExchangeError, OAuthConfig, RefreshedToken, TokenExchanger, TokenGrant};

    type Scripted<T> = VecDeque<Result<T, ExchangeError>>;

    #[derive(Default)]
    struct State {
        code_responses: Scripted<TokenGrant>,
        refresh_responses: Scripted<RefreshedToken>,
        codes_seen: Vec<String>,
        refresh_tokens_seen: Vec<String>,
    }

    /// Token exchanger that replays scripted responses in order.
    ///
    /// An exhausted script answers with `ExchangeError::Rejected` (HTTP 500)
    /// so unexpected calls fail loudly in assertions.
    #[derive(Clone, Default)]
    pub struct MockTokenExchanger {
        state: Arc<Mutex<State>>,
    }

    impl MockTokenExchanger {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Queue the next `exchange_code` result.
        pub fn push_code_response(&self, response: Result<TokenGrant, ExchangeError>) {
            self.state.lock().code_responses.push_back(response);
        }

        /// Queue the next `exchange_refresh_token` result.
        pub fn push_refresh_response(&self, response: Result<RefreshedToken, ExchangeError>) {
            self.state.lock().refresh_responses.push_back(response);
        }

        /// Codes passed to `exchange_code`, in call order.
        #[must_use]
        pub fn codes_seen(&self) -> Vec<String> {
            self.state.lock().codes_seen.clone()
        }

        /// Refresh tokens passed to `exchange_refresh_token`, in call order.
        #[must_use]
        pub fn refresh_tokens_seen(&self) -> Vec<String> {
            self.state.lock().refresh_tokens_seen.clone()
        }

        /// Total calls across both grants.
        #[must_use]
        pub fn call_count(&self) -> usize {
            let state = self.state.lock();
            state.codes_seen.len() + state.refresh_tokens_seen.len()
        }
    }

    fn unscripted() -> ExchangeError {
        ExchangeError::Rejected { status: 500, body: "no scripted response".to_string() }
    }

    #[async_trait]
    impl TokenExchanger for MockTokenExchanger {
        async fn exchange_code(
            &self,
            code: &str,
            _config: &OAuthConfig,
        ) -> Result<TokenGrant, ExchangeError> {
            let mut state = self.state.lock();
            state.codes_seen.push(code.to_string());
            state.code_responses.pop_front().unwrap_or_else(|| Err(unscripted()))
        }

        async fn exchange_refresh_token(
            &self,
            refresh_token: &str,
            _config: &OAuthConfig,
        ) -> Result<RefreshedToken, ExchangeError> {
            let mut state = self.state.lock();
            state.refresh_tokens_seen.push(refresh_token.to_string());
            state.refresh_responses.pop_front().unwrap_or_else(|| Err(unscripted()))
        }
    }

}
