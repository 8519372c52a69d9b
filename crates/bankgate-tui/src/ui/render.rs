use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::{App, LoginFocus, LoginScreen, Screen};

use super::styles;

/// Width of the centered dialogs
const DIALOG_WIDTH: u16 = 46;

const LOGO: [&str; 3] = [
    "      ╔╗ ╔═╗╔╗╔╦╔═╔═╗╔═╗╔╦╗╔═╗",
    "      ╠╩╗╠═╣║║║╠╩╗║ ╦╠═╣ ║ ║╣ ",
    "      ╚═╝╩ ╩╝╚╝╩ ╩╚═╝╩ ╩ ╩ ╚═╝",
];

pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title bar
            Constraint::Min(10),   // Page
            Constraint::Length(2), // Status bar
        ])
        .split(frame.area());

    render_title_bar(frame, app, chunks[0]);
    render_status_bar(frame, app, chunks[2]);

    match &app.screen {
        Screen::Checking(_) => render_checking(frame),
        Screen::Index => render_index(frame, app),
        Screen::Login(login) => render_login(frame, login),
    }
}

fn render_title_bar(frame: &mut Frame, app: &App, area: Rect) {
    let title = format!("  bankgate · {}", app.current_page().title());
    let location = format!("{}{}", app.config.base_url.trim_end_matches('/'), app.current_path());

    let title_line = Line::from(vec![
        Span::styled(title.clone(), styles::title_style()),
        Span::raw(" ".repeat(
            area.width
                .saturating_sub(title.chars().count() as u16 + location.chars().count() as u16 + 4)
                as usize,
        )),
        Span::styled(location, styles::muted_style()),
    ]);

    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(styles::border_style(false));

    let paragraph = Paragraph::new(title_line).block(block);
    frame.render_widget(paragraph, area);
}

/// Key hints for the status bar. Every key listed here is handled in `input.rs`.
fn status_hints(screen: &Screen) -> &'static [(&'static str, &'static str)] {
    match screen {
        Screen::Checking(_) => &[("Esc", "quit"), ("Ctrl+C", "quit")],
        Screen::Index => &[("r", "reload"), ("q", "quit")],
        Screen::Login(_) => &[("Tab", "next field"), ("Enter", "submit"), ("Esc", "quit")],
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut spans = vec![Span::raw(" ")];
    for (key, desc) in status_hints(&app.screen) {
        spans.push(Span::styled(format!("[{}]", key), styles::help_key_style()));
        spans.push(Span::raw(format!(" {}  ", desc)));
    }

    let paragraph = Paragraph::new(Line::from(spans)).style(styles::status_bar_style());
    frame.render_widget(paragraph, area);
}

fn logo_lines() -> Vec<Line<'static>> {
    LOGO.iter()
        .map(|row| Line::from(Span::styled(*row, styles::title_style())))
        .collect()
}

fn render_dialog(frame: &mut Frame, lines: Vec<Line>) {
    let height = lines.len() as u16 + 2;
    let area = centered_rect_fixed(DIALOG_WIDTH, height, frame.area());

    // Clear the area
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(styles::border_style(true))
        .style(Style::default());

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}

fn render_checking(frame: &mut Frame) {
    let mut lines = logo_lines();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "        Checking session...",
        styles::pending_style(),
    )));
    render_dialog(frame, lines);
}

fn render_index(frame: &mut Frame, app: &App) {
    let mut lines = logo_lines();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "          Welcome back.",
        styles::success_style(),
    )));
    lines.push(Line::from(vec![
        Span::styled("   Session verified by ", styles::muted_style()),
        Span::styled(app.context.store().origin().to_string(), styles::field_style()),
    ]));
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::styled("   Press ", styles::muted_style()),
        Span::styled("[R]", styles::help_key_style()),
        Span::styled(" to reload, ", styles::muted_style()),
        Span::styled("[Q]", styles::help_key_style()),
        Span::styled(" to quit", styles::muted_style()),
    ]));
    render_dialog(frame, lines);
}

fn render_login(frame: &mut Frame, login: &LoginScreen) {
    let mut lines = logo_lines();
    lines.push(Line::from(""));

    // Account field
    let account_focused = login.focus == LoginFocus::Account;
    let account_style = if account_focused {
        styles::focused_field_style()
    } else {
        styles::field_style()
    };
    let account_display = format!("{:<16}", login.account);
    let cursor = if account_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("      "),
        Span::styled("Account:  [", styles::muted_style()),
        Span::styled(format!("{}{}", account_display, cursor), account_style),
        Span::styled("]", styles::muted_style()),
    ]));

    // Password field
    let password_focused = login.focus == LoginFocus::Password;
    let password_style = if password_focused {
        styles::focused_field_style()
    } else {
        styles::field_style()
    };
    let password_masked: String = "*".repeat(login.password.chars().count().min(16));
    let password_display = format!("{:<16}", password_masked);
    let cursor = if password_focused { "▌" } else { "" };
    lines.push(Line::from(vec![
        Span::raw("      "),
        Span::styled("Password: [", styles::muted_style()),
        Span::styled(format!("{}{}", password_display, cursor), password_style),
        Span::styled("]", styles::muted_style()),
    ]));

    // Login button
    let button_focused = login.focus == LoginFocus::Button;
    let button_style = if button_focused {
        styles::focused_field_style()
    } else {
        styles::field_style()
    };
    let label = if button_focused { " ▶ Login ◀ " } else { "   Login   " };
    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("            ["),
        Span::styled(label, button_style),
        Span::raw("]"),
    ]));

    // Inline message
    if let Some(message) = login.form.message() {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("      {}", message),
            styles::error_style(),
        )));
    }

    render_dialog(frame, lines);
}

/// Create a centered rectangle with fixed dimensions
fn centered_rect_fixed(width: u16, height: u16, r: Rect) -> Rect {
    let x = r.x + (r.width.saturating_sub(width)) / 2;
    let y = r.y + (r.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width.min(r.width), height.min(r.height))
}
