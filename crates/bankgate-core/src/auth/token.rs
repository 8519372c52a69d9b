use std::fmt;

use secrecy::{ExposeSecret, SecretString};

/// Opaque session token issued by the remote authority.
///
/// The gate never inspects its structure; only the authority decides
/// whether it is valid.
#[derive(Clone, PartialEq, Eq)]
pub struct SessionToken(String);

impl SessionToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(<redacted>)")
    }
}

/// Account and password as typed into the login form.
///
/// Never persisted. Handed to the gateway once and dropped.
pub struct Credentials {
    pub account: String,
    password: SecretString,
}

impl Credentials {
    pub fn new(account: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            account: account.into(),
            password: SecretString::from(password.into()),
        }
    }

    pub fn password(&self) -> &str {
        self.password.expose_secret()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("account", &self.account)
            .field("password", &"<redacted>")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_redacts_secrets() {
        let token = SessionToken::new("4f1c2a9e");
        assert!(!format!("{:?}", token).contains("4f1c2a9e"));

        let creds = Credentials::new("user1", "hunter2");
        let rendered = format!("{:?}", creds);
        assert!(rendered.contains("user1"));
        assert!(!rendered.contains("hunter2"));
        assert_eq!(creds.password(), "hunter2");
    }
}
