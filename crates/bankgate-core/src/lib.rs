//! Client-side session gate for the bank service's login and index pages.
//!
//! The crate is split into:
//! - `auth`: the cookie-backed token store and the secrets it holds
//! - `api`: the fail-closed gateway to the remote authority
//! - `gate`: page controllers that turn the session check into navigation
//! - `config`: where the authority lives and how pages are addressed

pub mod api;
pub mod auth;
pub mod config;
pub mod gate;

pub use api::{ApiClient, AuthGateway, LoginResult};
pub use auth::{CookieJar, Credentials, MemoryTokenStore, SessionToken, TokenStore};
pub use config::{Config, LoginTransport};
pub use gate::{
    GateState, IndexPageController, LoginForm, LoginPageController, Page, PageContext, PageLoad,
    Routes, SubmitOutcome, LOGIN_FAILED_MESSAGE,
};
