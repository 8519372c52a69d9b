//! The gateway contract between page controllers and the remote authority.

use serde::Deserialize;
use serde_json::Value;

use crate::auth::SessionToken;

/// Outcome of a login attempt. A success always carries the issued token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginResult {
    Success { token: SessionToken },
    Failure,
}

impl LoginResult {
    pub fn is_success(&self) -> bool {
        matches!(self, LoginResult::Success { .. })
    }

    pub fn token(&self) -> Option<&SessionToken> {
        match self {
            LoginResult::Success { token } => Some(token),
            LoginResult::Failure => None,
        }
    }
}

/// Remote authority as seen by the page controllers.
///
/// Neither operation can fail: every transport, status, or parse problem
/// settles to `false` / [`LoginResult::Failure`].
#[trait_variant::make(AuthGateway: Send)]
pub trait LocalAuthGateway {
    /// Ask the authority whether `token` belongs to a live session.
    /// An absent token is still sent; the authority rejects it.
    async fn check_login(&self, token: Option<&str>) -> bool;

    /// Exchange credentials for a session token
    async fn login(&self, account: &str, password: &str) -> LoginResult;
}

/// Response body shared by `/api/check_login` and `/api/login`.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct AuthReply {
    #[serde(default)]
    code: Option<Value>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    token: Option<String>,
}

impl AuthReply {
    /// `code` is `1` (number or numeric string); anything else is a failure.
    pub fn is_success(&self) -> bool {
        match &self.code {
            Some(Value::Number(n)) => n.as_i64() == Some(1) || n.as_f64() == Some(1.0),
            Some(Value::String(s)) => s.trim() == "1",
            _ => false,
        }
    }

    /// Issued token, only when the reply reports success and carries a non-empty token
    pub fn into_login_result(self) -> LoginResult {
        if !self.is_success() {
            return LoginResult::Failure;
        }
        match self.token {
            Some(token) if !token.is_empty() => LoginResult::Success {
                token: SessionToken::new(token),
            },
            _ => LoginResult::Failure,
        }
    }
}
