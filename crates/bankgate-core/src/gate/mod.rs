//! Page-level access control.
//!
//! Each page load runs its controller's entry routine once: read the session
//! cookie, ask the authority about it, and either keep the page or redirect.
//!
//! - `IndexPageController`: requires an authenticated session
//! - `LoginPageController`: requires an unauthenticated one, and only then
//!   yields the `LoginForm` submit action

pub mod controller;
pub mod page;

pub use controller::{
    IndexPageController, LoginForm, LoginPageController, PageContext, PageLoad, SubmitOutcome,
    LOGIN_FAILED_MESSAGE,
};
pub use page::{Access, GateState, Page, Routes};
