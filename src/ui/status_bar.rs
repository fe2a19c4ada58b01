use crate::app::state::*;
use crate::ui::theme::Theme;
use crate::upload::SubmissionState;
use crate::wizard::WizardStep;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

/// Key hints for whatever currently has the keyboard.
pub fn key_hints(state: &AppState) -> &'static [(&'static str, &'static str)] {
    match &state.screen {
        Screen::Wizard(w) => match w.navigator.current_step() {
            WizardStep::Landing => &[("Enter", "start"), ("c", "continue application"), ("q", "quit")],
            WizardStep::Emi => &[("0-9", "amount"), ("Enter", "continue"), ("Esc", "back")],
            WizardStep::Employment => &[
                ("↑↓", "move"),
                ("Space", "select"),
                ("Tab", "income"),
                ("Enter", "continue"),
                ("Esc", "back"),
            ],
            _ => &[("↑↓", "move"), ("Space", "select"), ("Enter", "continue"), ("Esc", "back")],
        },
        Screen::Offers(_) => &[("↑↓", "move"), ("t", "tenure"), ("Enter", "apply"), ("q", "quit")],
        Screen::Documents(d) if d.path_prompt.is_some() => &[("Enter", "upload"), ("Esc", "cancel")],
        Screen::Documents(d) if d.simulator.submission() != SubmissionState::Editing => &[("Ctrl-C", "quit")],
        Screen::Documents(_) => &[
            ("↑↓", "move"),
            ("Enter", "choose file"),
            ("d", "remove"),
            ("x", "clear"),
            ("1-9", "dismiss error"),
            ("0", "dismiss all"),
            ("s", "submit"),
            ("Esc", "offers"),
        ],
        Screen::Tracking(_) => &[("a", "advance stage"), ("h", "support"), ("c", "call"), ("q", "quit")],
    }
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut parts: Vec<Span> = Vec::new();

    for (key, label) in key_hints(state) {
        parts.push(Span::styled(format!(" {} ", key), Theme::key_hint()));
        parts.push(Span::styled(format!("{} ", label), Theme::status_bar()));
    }

    let message = state.status_message.as_deref().unwrap_or("");
    // Pad to fill remaining space
    let used: usize = parts.iter().map(|s| s.content.width()).sum();
    let remaining = (area.width as usize).saturating_sub(used + message.width() + 2);
    parts.push(Span::styled(" ".repeat(remaining), Theme::status_bar()));
    parts.push(Span::styled(
        format!(" {} ", message),
        Style::default().fg(Color::Yellow).bg(Color::DarkGray),
    ));

    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
