//! Session token handling on the client side.
//!
//! This module provides:
//! - `TokenStore`: the named key-value store holding the session cookie
//! - `CookieJar`: a file-backed, origin-scoped `TokenStore`
//! - `SessionToken` and `Credentials`: the secrets that pass through the gate
//!
//! Tokens are never validated locally; the remote authority decides.

pub mod store;
pub mod token;

pub use store::{CookieJar, MemoryTokenStore, StoredCookie, TokenStore};
pub use token::{Credentials, SessionToken};
