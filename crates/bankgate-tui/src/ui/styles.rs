use ratatui::style::{Color, Modifier, Style};

// Bank palette: deep teal brand on a slate status strip
pub const BRAND: Color = Color::Rgb(38, 150, 140);
pub const APPROVED: Color = Color::Rgb(110, 180, 90);
pub const PENDING: Color = Color::Rgb(220, 170, 60);
pub const DECLINED: Color = Color::Rgb(210, 80, 70);
pub const SLATE: Color = Color::Rgb(120, 130, 140);
pub const FIELD_FOCUS: Color = Color::Rgb(30, 60, 64);
pub const STRIP: Color = Color::Rgb(24, 32, 36);

pub fn title_style() -> Style {
    Style::default().fg(BRAND).add_modifier(Modifier::BOLD)
}

/// Focused form field or button
pub fn focused_field_style() -> Style {
    Style::default().bg(FIELD_FOCUS).add_modifier(Modifier::BOLD)
}

pub fn field_style() -> Style {
    Style::default().fg(Color::White)
}

pub fn muted_style() -> Style {
    Style::default().fg(SLATE)
}

pub fn pending_style() -> Style {
    Style::default().fg(PENDING)
}

pub fn success_style() -> Style {
    Style::default().fg(APPROVED)
}

pub fn error_style() -> Style {
    Style::default().fg(DECLINED).add_modifier(Modifier::BOLD)
}

pub fn border_style(focused: bool) -> Style {
    Style::default().fg(if focused { BRAND } else { SLATE })
}

pub fn status_bar_style() -> Style {
    Style::default().bg(STRIP).fg(Color::White)
}

pub fn help_key_style() -> Style {
    Style::default().fg(PENDING).add_modifier(Modifier::BOLD)
}
