//! Shared harness for route tests: the real adapters pointed at a mock
//! server standing in for both the token endpoint and Drive.

#![allow(dead_code)]

use std::sync::{Arc, Once};

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::{TimeZone, Utc};
use chrono_tz::Asia::Tokyo;
use punchcard_api::{router, AppContext};
use punchcard_common::auth::OAuthClient;
use punchcard_common::testing::MockClock;
use punchcard_domain::constants::{DEFAULT_BIND_ADDR, GOOGLE_AUTHORIZE_URL};
use punchcard_domain::{Config, HttpConfig, OAuthSettings, ServerConfig, StorageConfig};
use punchcard_infra::{DriveObjectStore, HttpClient};
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const FOLDER: &str = "folder-1";
pub const ERROR_FOLDER: &str = "errors-1";

fn disable_proxy() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        std::env::set_var("PUNCHCARD_DISABLE_PROXY", "1");
    });
}

/// Router plus the mock server behind it.
pub struct TestApp {
    pub server: MockServer,
    pub clock: MockClock,
    pub router: Router,
}

impl TestApp {
    /// Start a mock server and wire the application over it at
    /// 2025-04-01 09:00 Tokyo time.
    pub async fn spawn(staff: &[&str]) -> Self {
        disable_proxy();
        let server = MockServer::start().await;
        let clock = MockClock::at(Utc.with_ymd_and_hms(2025, 4, 1, 0, 0, 0).unwrap());

        let config = Config {
            oauth: OAuthSettings {
                client_id: "cid".into(),
                client_secret: "secret".into(),
                redirect_uri: "http://localhost:8501/".into(),
                token_uri: format!("{}/token", server.uri()),
                authorize_uri: GOOGLE_AUTHORIZE_URL.into(),
            },
            storage: StorageConfig {
                folder_id: FOLDER.into(),
                error_log_folder_id: Some(ERROR_FOLDER.into()),
            },
            server: ServerConfig {
                bind_addr: DEFAULT_BIND_ADDR.into(),
                staff: staff.iter().map(ToString::to_string).collect(),
            },
            http: HttpConfig::default(),
            timezone: "Asia/Tokyo".into(),
        };

        let http = HttpClient::builder().max_attempts(1).build().unwrap();
        let store = DriveObjectStore::new(http).with_base_urls(
            format!("{}/drive/v3", server.uri()),
            format!("{}/upload/drive/v3", server.uri()),
        );
        let exchanger = OAuthClient::new(Tokyo).with_clock(Arc::new(clock.clone()));
        let context = AppContext::with_adapters(
            config,
            Tokyo,
            Arc::new(exchanger),
            Arc::new(store),
            Arc::new(clock.clone()),
        );

        Self { server, clock, router: router(Arc::new(context)) }
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap()).await
    }

    pub async fn post_json(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        let request = Request::post(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        (status, value)
    }

    /// Token endpoint answering the authorization-code grant for `code`.
    pub async fn mount_code_grant(&self, code: &str, access_token: &str) {
        Mock::given(method("POST"))
            .and(path("/token"))
            .and(body_string_contains("grant_type=authorization_code"))
            .and(body_string_contains(format!("code={code}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": access_token,
                "refresh_token": "RT1",
                "expires_in": 3600,
                "token_type": "Bearer"
            })))
            .mount(&self.server)
            .await;
    }

    /// Drive with no files: every lookup misses and every write creates.
    pub async fn mount_empty_drive(&self) {
        Mock::given(method("GET"))
            .and(path("/drive/v3/files"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "files": [] })))
            .mount(&self.server)
            .await;
        Mock::given(method("POST"))
            .and(path("/upload/drive/v3/files"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "file-1" })))
            .mount(&self.server)
            .await;
        Mock::given(method("POST"))
            .and(path("/drive/v3/files"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "made-folder" })))
            .mount(&self.server)
            .await;
        Mock::given(method("PATCH"))
            .and(path_regex(r"^/upload/drive/v3/files/[^/]+$"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "file-1" })))
            .mount(&self.server)
            .await;
    }

    /// Log in through the callback route with code `abc123`.
    pub async fn login(&self) {
        self.mount_code_grant("abc123", "AT1").await;
        let (status, body) = self.get("/oauth/callback?code=abc123").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["state"], "session_valid");
    }

    /// Bodies of every multipart upload the server received.
    pub async fn uploads(&self) -> Vec<String> {
        self.server
            .received_requests()
            .await
            .unwrap_or_default()
            .into_iter()
            .filter(|r| r.method.as_str() == "POST" && r.url.path() == "/upload/drive/v3/files")
            .map(|r| String::from_utf8_lossy(&r.body).into_owned())
            .collect()
    }
}
