use std::fmt;

use crate::config::Config;

/// The two pages behind the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Login,
    Index,
}

/// Authentication state a page needs in order to stay put
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Authenticated,
    Unauthenticated,
}

/// Per-load gate state. Recomputed on every page load, never carried over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Unchecked,
    Checking,
    Authenticated,
    Unauthenticated,
}

impl GateState {
    pub fn from_check(authenticated: bool) -> Self {
        if authenticated {
            GateState::Authenticated
        } else {
            GateState::Unauthenticated
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(self, GateState::Authenticated | GateState::Unauthenticated)
    }
}

impl fmt::Display for GateState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GateState::Unchecked => "unchecked",
            GateState::Checking => "checking",
            GateState::Authenticated => "authenticated",
            GateState::Unauthenticated => "unauthenticated",
        };
        f.write_str(name)
    }
}

impl Page {
    pub fn requirement(&self) -> Access {
        match self {
            Page::Login => Access::Unauthenticated,
            Page::Index => Access::Authenticated,
        }
    }

    /// Where the browser goes when the gate settles in `state`.
    ///
    /// `None` means the page stays. Unsettled states never redirect.
    pub fn redirect_for(&self, state: GateState) -> Option<Page> {
        match (self, state) {
            (Page::Index, GateState::Unauthenticated) => Some(Page::Login),
            (Page::Login, GateState::Authenticated) => Some(Page::Index),
            _ => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Login => "Login",
            Page::Index => "Home",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Page::Login => f.write_str("login"),
            Page::Index => f.write_str("index"),
        }
    }
}

/// The fixed navigation targets of the two pages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Routes {
    login_path: String,
    index_path: String,
}

impl Default for Routes {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Routes {
    pub fn new(login_path: impl Into<String>, index_path: impl Into<String>) -> Self {
        Self {
            login_path: login_path.into(),
            index_path: index_path.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.login_path.clone(), config.index_path.clone())
    }

    pub fn path(&self, page: Page) -> &str {
        match page {
            Page::Login => &self.login_path,
            Page::Index => &self.index_path,
        }
    }

    /// Page served at `path`. Anything that is not the login page is the
    /// access-controlled index.
    pub fn resolve(&self, path: &str) -> Page {
        let path = path.trim().trim_end_matches('/');
        if path == self.login_path.trim_end_matches('/') {
            Page::Login
        } else {
            Page::Index
        }
    }
}
