use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent};

use bankgate_core::Page;

use crate::app::{can_add_account_char, can_add_password_char, App, LoginFocus, Screen};

/// Handle keyboard input. Returns true if the app should quit.
pub async fn handle_input(app: &mut App, key: KeyEvent) -> Result<bool> {
    match app.screen {
        Screen::Checking(_) => {
            if key.code == KeyCode::Esc {
                app.quitting = true;
            }
        }
        Screen::Index => handle_index_input(app, key),
        Screen::Login(_) => handle_login_input(app, key).await,
    }
    Ok(app.quitting)
}

fn handle_index_input(app: &mut App, key: KeyEvent) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.quitting = true,
        // Reload re-runs the gate, exactly like a fresh page load
        KeyCode::Char('r') | KeyCode::F(5) => app.navigate(Page::Index),
        _ => {}
    }
}

async fn handle_login_input(app: &mut App, key: KeyEvent) {
    let Screen::Login(ref mut login) = app.screen else {
        return;
    };

    match key.code {
        KeyCode::Esc => {
            app.quitting = true;
        }
        KeyCode::Down | KeyCode::Tab => {
            login.focus = match login.focus {
                LoginFocus::Account => LoginFocus::Password,
                LoginFocus::Password => LoginFocus::Button,
                LoginFocus::Button => LoginFocus::Account,
            };
        }
        KeyCode::Up | KeyCode::BackTab => {
            login.focus = match login.focus {
                LoginFocus::Account => LoginFocus::Button,
                LoginFocus::Password => LoginFocus::Account,
                LoginFocus::Button => LoginFocus::Password,
            };
        }
        KeyCode::Enter => match login.focus {
            LoginFocus::Account => login.focus = LoginFocus::Password,
            LoginFocus::Password | LoginFocus::Button => app.submit_login().await,
        },
        KeyCode::Backspace => match login.focus {
            LoginFocus::Account => {
                login.account.pop();
            }
            LoginFocus::Password => {
                login.password.pop();
            }
            LoginFocus::Button => {}
        },
        KeyCode::Char(c) => match login.focus {
            LoginFocus::Account => {
                if can_add_account_char(login.account.chars().count(), c) {
                    login.account.push(c);
                }
            }
            LoginFocus::Password => {
                if can_add_password_char(login.password.chars().count(), c) {
                    login.password.push(c);
                }
            }
            // Ignore character input on button
            LoginFocus::Button => {}
        },
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{config_for, context_for, unreachable_base_url};
    use crossterm::event::KeyModifiers;

    fn app_at(test_name: &str, start: Page) -> App {
        let config = config_for(&unreachable_base_url());
        let context = context_for(&config, test_name);
        App::with_context(config, context, start)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[tokio::test]
    async fn test_esc_quits_while_checking() {
        let mut app = app_at("input-esc", Page::Index);
        assert!(handle_input(&mut app, key(KeyCode::Esc)).await.unwrap_or(false));
    }

    #[tokio::test]
    async fn test_other_keys_ignored_while_checking() {
        let mut app = app_at("input-ignore", Page::Login);
        assert!(!handle_input(&mut app, key(KeyCode::Char('q'))).await.unwrap_or(true));
        assert_eq!(app.pending_load(), Some(Page::Login));
    }

    #[tokio::test]
    async fn test_reload_on_index_queues_fresh_load() {
        let mut app = app_at("input-reload", Page::Index);
        app.screen = Screen::Index;
        assert!(!handle_input(&mut app, key(KeyCode::Char('r'))).await.unwrap_or(true));
        assert_eq!(app.pending_load(), Some(Page::Index));
    }
}
