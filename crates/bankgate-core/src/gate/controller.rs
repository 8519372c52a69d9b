//! Page controllers: the per-load session check and the login submit flow.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::api::{AuthGateway, LoginResult};
use crate::auth::{Credentials, TokenStore};
use crate::config::Config;

use super::page::{GateState, Page, Routes};

/// Inline message shown on the login page after a rejected submission
pub const LOGIN_FAILED_MESSAGE: &str = "登入失敗，請重新登入";

/// What the host should do once a page's entry routine settles
#[derive(Debug)]
pub enum PageLoad<T> {
    /// Replace the current page with another one
    Redirect(Page),
    /// Keep the page; `T` is whatever the page needs to stay interactive
    Ready(T),
}

impl<T> PageLoad<T> {
    pub fn redirect_target(&self) -> Option<Page> {
        match self {
            PageLoad::Redirect(page) => Some(*page),
            PageLoad::Ready(_) => None,
        }
    }
}

/// Result of one login submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Redirect(Page),
    Failed,
}

/// Gateway, token store, and navigation settings shared by every page of one host.
pub struct PageContext<G, S> {
    gateway: Arc<G>,
    store: Arc<S>,
    cookie_name: String,
    routes: Routes,
}

impl<G, S> Clone for PageContext<G, S> {
    fn clone(&self) -> Self {
        Self {
            gateway: Arc::clone(&self.gateway),
            store: Arc::clone(&self.store),
            cookie_name: self.cookie_name.clone(),
            routes: self.routes.clone(),
        }
    }
}

impl<G, S> PageContext<G, S>
where
    G: AuthGateway + Send + Sync,
    S: TokenStore,
{
    pub fn new(gateway: Arc<G>, store: Arc<S>, cookie_name: impl Into<String>, routes: Routes) -> Self {
        Self {
            gateway,
            store,
            cookie_name: cookie_name.into(),
            routes,
        }
    }

    pub fn from_config(gateway: Arc<G>, store: Arc<S>, config: &Config) -> Self {
        Self::new(gateway, store, config.cookie_name.clone(), Routes::from_config(config))
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn cookie_name(&self) -> &str {
        &self.cookie_name
    }

    pub fn routes(&self) -> &Routes {
        &self.routes
    }

    pub fn index_page(&self) -> IndexPageController<G, S> {
        IndexPageController {
            gate: Gate::new(Page::Index, self.clone()),
        }
    }

    pub fn login_page(&self) -> LoginPageController<G, S> {
        LoginPageController {
            gate: Gate::new(Page::Login, self.clone()),
        }
    }

    /// Read the session cookie and ask the authority about it
    async fn check_session(&self) -> bool {
        let token = self.store.get(&self.cookie_name);
        debug!(has_token = token.is_some(), "Checking session");
        self.gateway.check_login(token.as_deref()).await
    }
}

/// Shared entry routine of both controllers
struct Gate<G, S> {
    page: Page,
    state: GateState,
    context: PageContext<G, S>,
}

impl<G, S> Gate<G, S>
where
    G: AuthGateway + Send + Sync,
    S: TokenStore,
{
    fn new(page: Page, context: PageContext<G, S>) -> Self {
        Self {
            page,
            state: GateState::Unchecked,
            context,
        }
    }

    fn transition(&mut self, next: GateState) {
        debug!(page = %self.page, from = %self.state, to = %next, "Gate transition");
        self.state = next;
    }

    /// Run the check and return where the page should go, if anywhere
    async fn settle(&mut self) -> Option<Page> {
        self.transition(GateState::Checking);
        let authenticated = self.context.check_session().await;
        self.transition(GateState::from_check(authenticated));

        let target = self.page.redirect_for(self.state);
        match target {
            Some(target) => info!(
                page = %self.page,
                requires = ?self.page.requirement(),
                to = self.context.routes.path(target),
                "Redirecting"
            ),
            None => debug!(page = %self.page, state = %self.state, "Page stays"),
        }
        target
    }
}

/// Gate for the index page: only an authenticated session may stay.
pub struct IndexPageController<G, S> {
    gate: Gate<G, S>,
}

impl<G, S> IndexPageController<G, S>
where
    G: AuthGateway + Send + Sync,
    S: TokenStore,
{
    pub fn state(&self) -> GateState {
        self.gate.state
    }

    /// Entry routine, run once per page load
    pub async fn on_ready(mut self) -> PageLoad<()> {
        match self.gate.settle().await {
            Some(target) => PageLoad::Redirect(target),
            None => PageLoad::Ready(()),
        }
    }
}

/// Gate for the login page: an authenticated session is sent to the index
/// before any submit action exists.
pub struct LoginPageController<G, S> {
    gate: Gate<G, S>,
}

impl<G, S> LoginPageController<G, S>
where
    G: AuthGateway + Send + Sync,
    S: TokenStore,
{
    pub fn state(&self) -> GateState {
        self.gate.state
    }

    /// Entry routine, run once per page load. The form is only handed out
    /// when the page stays.
    pub async fn on_ready(mut self) -> PageLoad<LoginForm<G, S>> {
        match self.gate.settle().await {
            Some(target) => PageLoad::Redirect(target),
            None => PageLoad::Ready(LoginForm {
                context: self.gate.context,
                message: None,
            }),
        }
    }
}

/// The login page's submit action. Repeatable until it succeeds.
pub struct LoginForm<G, S> {
    context: PageContext<G, S>,
    message: Option<&'static str>,
}

impl<G, S> LoginForm<G, S>
where
    G: AuthGateway + Send + Sync,
    S: TokenStore,
{
    /// Inline message currently shown under the form
    pub fn message(&self) -> Option<&'static str> {
        self.message
    }

    pub async fn submit(&mut self, credentials: Credentials) -> SubmitOutcome {
        let result = self
            .context
            .gateway
            .login(&credentials.account, credentials.password())
            .await;
        drop(credentials);

        match result {
            LoginResult::Success { token } => {
                self.context.store.set(&self.context.cookie_name, token.as_str());
                self.message = None;
                info!("Session token stored");
                SubmitOutcome::Redirect(Page::Index)
            }
            LoginResult::Failure => {
                warn!("Login failed");
                self.message = Some(LOGIN_FAILED_MESSAGE);
                SubmitOutcome::Failed
            }
        }
    }
}
