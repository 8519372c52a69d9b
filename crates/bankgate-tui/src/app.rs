//! Application state management for the bankgate terminal host.
//!
//! `App` plays the browser: it holds the current page, runs each page's
//! gate on load, and applies the redirects the gates decide on.

use std::sync::Arc;

use anyhow::Result;
use tracing::{debug, info};

use bankgate_core::{
    ApiClient, Config, CookieJar, Credentials, LoginForm, Page, PageContext, PageLoad,
    SubmitOutcome,
};

// ============================================================================
// Constants
// ============================================================================

/// Maximum length for account input.
const MAX_ACCOUNT_LENGTH: usize = 50;

/// Maximum length for password input.
/// 128 chars accommodates password managers and passphrases.
const MAX_PASSWORD_LENGTH: usize = 128;

pub type Context = PageContext<ApiClient, CookieJar>;

/// Build the page context (gateway and cookie jar) for this host
pub fn build_context(config: &Config) -> Result<Context> {
    let api = ApiClient::new(config)?;
    let jar = CookieJar::open(config.cookie_jar_path()?, config.origin()?);
    Ok(PageContext::from_config(Arc::new(api), Arc::new(jar), config))
}

/// Login form focus state
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoginFocus {
    Account,
    Password,
    Button,
}

/// Login page once its gate has let it stay
pub struct LoginScreen {
    pub form: LoginForm<ApiClient, CookieJar>,
    pub account: String,
    pub password: String,
    pub focus: LoginFocus,
}

impl LoginScreen {
    fn new(form: LoginForm<ApiClient, CookieJar>) -> Self {
        Self {
            form,
            account: String::new(),
            password: String::new(),
            focus: LoginFocus::Account,
        }
    }
}

/// What the terminal is currently showing
pub enum Screen {
    /// Page load in progress; the gate has not settled yet
    Checking(Page),
    Index,
    Login(LoginScreen),
}

/// Main application state container
pub struct App {
    pub config: Config,
    pub context: Context,
    pub screen: Screen,
    pub quitting: bool,
}

impl App {
    /// Create a new application instance starting at `start`
    pub fn new(config: Config, start: Page) -> Result<Self> {
        let context = build_context(&config)?;
        Ok(Self::with_context(config, context, start))
    }

    /// Create an application over an already built page context
    pub fn with_context(config: Config, context: Context, start: Page) -> Self {
        debug!(base_url = %config.base_url, start = %start, "App created");
        Self {
            config,
            context,
            screen: Screen::Checking(start),
            quitting: false,
        }
    }

    /// Replace the current page with `page`. The gate runs on the next load.
    pub fn navigate(&mut self, page: Page) {
        info!(to = self.context.routes().path(page), "Navigating");
        self.screen = Screen::Checking(page);
    }

    pub fn pending_load(&self) -> Option<Page> {
        match self.screen {
            Screen::Checking(page) => Some(page),
            _ => None,
        }
    }

    /// Page currently shown or being loaded
    pub fn current_page(&self) -> Page {
        match self.screen {
            Screen::Checking(page) => page,
            Screen::Index => Page::Index,
            Screen::Login(_) => Page::Login,
        }
    }

    pub fn current_path(&self) -> &str {
        self.context.routes().path(self.current_page())
    }

    /// Run the pending page's entry routine and apply its decision
    pub async fn load_pending(&mut self) {
        let Some(page) = self.pending_load() else {
            return;
        };

        match page {
            Page::Index => match self.context.index_page().on_ready().await {
                PageLoad::Redirect(target) => self.navigate(target),
                PageLoad::Ready(()) => self.screen = Screen::Index,
            },
            Page::Login => match self.context.login_page().on_ready().await {
                PageLoad::Redirect(target) => self.navigate(target),
                PageLoad::Ready(form) => self.screen = Screen::Login(LoginScreen::new(form)),
            },
        }
    }

    /// Submit the login form with whatever is in its fields
    pub async fn submit_login(&mut self) {
        let Screen::Login(ref mut login) = self.screen else {
            return;
        };

        let credentials = Credentials::new(login.account.clone(), std::mem::take(&mut login.password));
        match login.form.submit(credentials).await {
            SubmitOutcome::Redirect(target) => self.navigate(target),
            SubmitOutcome::Failed => login.focus = LoginFocus::Password,
        }
    }
}

// ============================================================================
// Input validation helpers (exported for use in input.rs)
// ============================================================================

/// Check if a character is valid for input (no control characters)
fn is_valid_input_char(c: char) -> bool {
    !c.is_control()
}

/// Check if an account character should be accepted
pub fn can_add_account_char(current_len: usize, c: char) -> bool {
    current_len < MAX_ACCOUNT_LENGTH && is_valid_input_char(c)
}

/// Check if a password character should be accepted
pub fn can_add_password_char(current_len: usize, c: char) -> bool {
    current_len < MAX_PASSWORD_LENGTH && is_valid_input_char(c)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{
        can_bind_localhost, check_login_count, config_for, context_for, mock_authority, ACCOUNT,
        LIVE_TOKEN, PASSWORD,
    };
    use bankgate_core::{TokenStore, LOGIN_FAILED_MESSAGE};

    fn app_at(base_url: &str, test_name: &str, start: Page) -> App {
        let config = config_for(base_url);
        let context = context_for(&config, test_name);
        App::with_context(config, context, start)
    }

    fn fill_login(app: &mut App, account: &str, password: &str) {
        let Screen::Login(ref mut login) = app.screen else {
            panic!("expected the login screen");
        };
        login.account = account.to_string();
        login.password = password.to_string();
        login.focus = LoginFocus::Button;
    }

    #[tokio::test]
    async fn test_index_without_session_redirects_to_login() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = mock_authority().await;
        let mut app = app_at(&server.uri(), "index-redirect", Page::Index);
        assert_eq!(app.pending_load(), Some(Page::Index));

        app.load_pending().await;
        assert_eq!(app.pending_load(), Some(Page::Login));
        assert_eq!(app.current_path(), "/login");

        app.load_pending().await;
        assert!(matches!(app.screen, Screen::Login(_)));
        assert_eq!(app.pending_load(), None);
    }

    #[tokio::test]
    async fn test_login_with_session_redirects_to_index() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = mock_authority().await;
        let mut app = app_at(&server.uri(), "login-redirect", Page::Login);
        app.context.store().set("token", LIVE_TOKEN);

        app.load_pending().await;
        assert_eq!(app.pending_load(), Some(Page::Index));
        app.load_pending().await;
        assert!(matches!(app.screen, Screen::Index));
    }

    #[tokio::test]
    async fn test_every_navigation_rechecks_session() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = mock_authority().await;
        let mut app = app_at(&server.uri(), "reload", Page::Index);
        app.context.store().set("token", LIVE_TOKEN);

        app.load_pending().await;
        assert!(matches!(app.screen, Screen::Index));
        assert_eq!(check_login_count(&server).await, 1);

        app.navigate(Page::Index);
        assert_eq!(app.pending_load(), Some(Page::Index));
        app.load_pending().await;
        assert!(matches!(app.screen, Screen::Index));
        assert_eq!(check_login_count(&server).await, 2);
    }

    #[tokio::test]
    async fn test_failed_submit_stays_on_login() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = mock_authority().await;
        let mut app = app_at(&server.uri(), "failed-submit", Page::Login);
        app.load_pending().await;

        fill_login(&mut app, ACCOUNT, "wrong");
        app.submit_login().await;

        let Screen::Login(ref login) = app.screen else {
            panic!("expected the login screen after a failed submit");
        };
        assert_eq!(login.account, ACCOUNT);
        assert!(login.password.is_empty());
        assert_eq!(login.focus, LoginFocus::Password);
        assert_eq!(login.form.message(), Some(LOGIN_FAILED_MESSAGE));
        assert_eq!(app.pending_load(), None);
        assert_eq!(app.context.store().get("token"), None);
    }

    #[tokio::test]
    async fn test_successful_submit_loads_index_through_gate() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = mock_authority().await;
        let mut app = app_at(&server.uri(), "good-submit", Page::Login);
        app.load_pending().await;
        let checks_before = check_login_count(&server).await;

        fill_login(&mut app, ACCOUNT, PASSWORD);
        app.submit_login().await;
        assert_eq!(app.pending_load(), Some(Page::Index));
        assert_eq!(app.context.store().get("token").as_deref(), Some(LIVE_TOKEN));

        app.load_pending().await;
        assert!(matches!(app.screen, Screen::Index));
        assert_eq!(check_login_count(&server).await, checks_before + 1);
    }

    #[tokio::test]
    async fn test_retry_after_failure_succeeds() {
        if !can_bind_localhost() {
            eprintln!("Skipping test: cannot bind localhost");
            return;
        }
        let server = mock_authority().await;
        let mut app = app_at(&server.uri(), "retry", Page::Login);
        app.load_pending().await;

        fill_login(&mut app, ACCOUNT, "wrong");
        app.submit_login().await;
        fill_login(&mut app, ACCOUNT, PASSWORD);
        app.submit_login().await;
        assert_eq!(app.pending_load(), Some(Page::Index));
    }

    #[test]
    fn test_can_add_account_char() {
        // Valid chars within length
        assert!(can_add_account_char(0, 'a'));
        assert!(can_add_account_char(49, 'z'));
        // Exceeds max length
        assert!(!can_add_account_char(50, 'a'));
        // Control characters rejected
        assert!(!can_add_account_char(0, '\x00'));
        assert!(!can_add_account_char(0, '\n'));
        assert!(!can_add_account_char(0, '\t'));
    }

    #[test]
    fn test_can_add_password_char() {
        assert!(can_add_password_char(0, 'a'));
        assert!(can_add_password_char(127, '!'));
        assert!(can_add_password_char(0, '登'));
        assert!(!can_add_password_char(128, 'a'));
        assert!(!can_add_password_char(0, '\r'));
    }
}
