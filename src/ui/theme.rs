use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::BorderType;

pub struct Theme;

impl Theme {
    pub const ACCENT: Color = Color::Rgb(16, 185, 129);
    pub const ACCENT_DIM: Color = Color::Rgb(6, 95, 70);
    pub const BORDER_DIM: Color = Color::Rgb(64, 64, 72);
    pub const TEXT_MUTED: Color = Color::Rgb(148, 148, 160);

    pub fn border() -> Style {
        Style::default().fg(Self::BORDER_DIM)
    }

    pub fn border_focused() -> Style {
        Style::default().fg(Self::ACCENT)
    }

    pub fn border_type() -> BorderType {
        BorderType::Rounded
    }

    pub fn title() -> Style {
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
    }

    pub fn heading() -> Style {
        Style::default().fg(Self::ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn text() -> Style {
        Style::default().fg(Color::White)
    }

    pub fn muted() -> Style {
        Style::default().fg(Self::TEXT_MUTED)
    }

    pub fn highlight() -> Style {
        Style::default()
            .fg(Color::Black)
            .bg(Self::ACCENT)
            .add_modifier(Modifier::BOLD)
    }

    pub fn selected() -> Style {
        Style::default().fg(Self::ACCENT).add_modifier(Modifier::BOLD)
    }

    pub fn success() -> Style {
        Style::default().fg(Color::Green)
    }

    pub fn in_progress() -> Style {
        Style::default().fg(Color::Yellow)
    }

    pub fn error() -> Style {
        Style::default().fg(Color::Red)
    }

    pub fn key_hint() -> Style {
        Style::default().fg(Self::ACCENT).bg(Color::DarkGray).add_modifier(Modifier::BOLD)
    }

    pub fn status_bar() -> Style {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    }

    pub fn gauge() -> Style {
        Style::default().fg(Self::ACCENT).bg(Self::ACCENT_DIM)
    }
}
