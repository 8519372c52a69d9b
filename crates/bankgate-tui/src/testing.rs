//! Fixtures for driving the host against a mock authority.

use std::net::TcpListener;
use std::path::PathBuf;
use std::sync::Arc;

use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, Request, ResponseTemplate};

use bankgate_core::{ApiClient, Config, CookieJar, PageContext};

use crate::app::Context;

pub const LIVE_TOKEN: &str = "live-token";
pub const ACCOUNT: &str = "user1";
pub const PASSWORD: &str = "correct";

const CHECK_LOGIN_PATH: &str = "/api/check_login";
const LOGIN_PATH: &str = "/api/login";

pub fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

/// Base URL of a local port nothing listens on
pub fn unreachable_base_url() -> String {
    let port = match TcpListener::bind("127.0.0.1:0") {
        Ok(listener) => listener.local_addr().map(|a| a.port()).unwrap_or(9),
        Err(_) => 9,
    };
    format!("http://127.0.0.1:{}", port)
}

pub fn config_for(base_url: &str) -> Config {
    Config {
        base_url: base_url.to_string(),
        request_timeout_secs: 5,
        ..Config::default()
    }
}

fn jar_path(test_name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!(
        "bankgate-tui-{}-{}",
        test_name,
        std::process::id()
    ));
    let _ = std::fs::remove_dir_all(&dir);
    dir.join("cookies.json")
}

/// Page context with a fresh cookie jar under the temp dir
pub fn context_for(config: &Config, test_name: &str) -> Context {
    let api = ApiClient::new(config).expect("client should build");
    let origin = config.origin().expect("base url should have an origin");
    let jar = CookieJar::open(jar_path(test_name), origin);
    PageContext::from_config(Arc::new(api), Arc::new(jar), config)
}

/// Authority that accepts `LIVE_TOKEN` and issues it for `ACCOUNT`/`PASSWORD`.
/// Anything else gets `code: 0`.
pub async fn mock_authority() -> MockServer {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(CHECK_LOGIN_PATH))
        .and(query_param("token", LIVE_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 1, "message": "Login success."})))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(CHECK_LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0, "message": "Login fail."})))
        .with_priority(2)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path(LOGIN_PATH))
        .and(query_param("account", ACCOUNT))
        .and(query_param("password", PASSWORD))
        .respond_with(ResponseTemplate::new(200).set_body_json(
            json!({"code": 1, "message": "Login success.", "token": LIVE_TOKEN}),
        ))
        .with_priority(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(LOGIN_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"code": 0, "message": "Login fail."})))
        .with_priority(2)
        .mount(&server)
        .await;

    server
}

/// Number of session checks the authority has answered so far
pub async fn check_login_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|r: &&Request| r.url.path() == CHECK_LOGIN_PATH)
        .count()
}
