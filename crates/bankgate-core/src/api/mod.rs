//! Remote authority client module.
//!
//! This module provides the `AuthGateway` contract used by the page gates
//! and `ApiClient`, its HTTP implementation against the authority's
//! `/api/check_login` and `/api/login` endpoints.
//!
//! Both gateway operations fail closed: an unreachable authority or an
//! unreadable reply is never taken as "authenticated".

pub mod client;
pub mod error;
pub mod gateway;

pub use client::ApiClient;
pub use error::ApiError;
pub use gateway::{AuthGateway, LocalAuthGateway, LoginResult};
