use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

const FEATURES: &[&str] = &[
    "Compare offers from top banks",
    "Upload documents once, apply anywhere",
    "Track your application in one place",
];

pub fn render(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border());

    let mut lines = vec![
        Line::default(),
        Line::from(Span::styled("Get the best home loan, without the bias", Theme::heading())),
        Line::default(),
        Line::from(Span::styled(
            "Answer a few questions and see offers matched to you in minutes.",
            Theme::text(),
        )),
        Line::default(),
    ];
    for feature in FEATURES {
        lines.push(Line::from(vec![
            Span::styled("  ✓ ", Theme::success()),
            Span::styled(*feature, Theme::text()),
        ]));
    }
    lines.push(Line::default());
    lines.push(Line::from(vec![
        Span::styled(" Enter ", Theme::key_hint()),
        Span::styled(" Check eligibility    ", Theme::text()),
        Span::styled(" c ", Theme::key_hint()),
        Span::styled(" Continue application", Theme::text()),
    ]));

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    frame.render_widget(paragraph, area);
}
