use crate::app::state::TrackingScreen;
use crate::tracking::{Eta, ExternalAction, StageStatus, StageView};
use crate::ui::theme::Theme;
use chrono::NaiveDate;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use std::fmt::Write;

fn status_glyph(status: StageStatus) -> (&'static str, Style) {
    match status {
        StageStatus::Completed => ("✓", Theme::success()),
        StageStatus::InProgress => ("◐", Theme::in_progress()),
        StageStatus::Pending => ("○", Theme::muted()),
        StageStatus::Rejected => ("✗", Theme::error()),
    }
}

/// Falls back to ISO dates when `date_format` cannot be rendered.
fn format_date(date: NaiveDate, date_format: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(date_format)).is_err() {
        return date.to_string();
    }
    out
}

/// ETA text as shown under a stage.
pub fn eta_text(eta: &Eta, date_format: &str) -> String {
    match eta {
        Eta::By(date) => format!("Expected by {}", format_date(*date, date_format)),
        Eta::Note(note) => (*note).to_string(),
    }
}

fn completed_text(date: NaiveDate, date_format: &str) -> String {
    format!("Completed on: {}", format_date(date, date_format))
}

fn action_spans(actions: &[ExternalAction]) -> Vec<Span<'static>> {
    actions
        .iter()
        .flat_map(|a| {
            [
                Span::styled(format!(" {} ", a.key()), Theme::key_hint()),
                Span::styled(format!(" {}   ", a.label()), Theme::text()),
            ]
        })
        .collect()
}

pub fn render(frame: &mut Frame, area: Rect, screen: &TrackingScreen, date_format: &str) {
    let tracker = &screen.tracker;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Application header
            Constraint::Min(5),    // Stages
            Constraint::Length(3), // Help
        ])
        .split(area);

    let header = vec![
        Line::from(Span::styled("Application Status", Theme::heading())),
        Line::from(vec![
            Span::styled("Application ID: ", Theme::muted()),
            Span::styled(tracker.application_id().to_string(), Theme::selected()),
            Span::styled("  ·  ", Theme::muted()),
            Span::styled(tracker.bank_name(), Theme::text()),
        ]),
    ];
    frame.render_widget(Paragraph::new(header), chunks[0]);

    let mut lines: Vec<Line> = Vec::new();
    for view in tracker.stages() {
        lines.extend(stage_lines(&view, date_format));
        lines.push(Line::default());
    }
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border());
    frame.render_widget(Paragraph::new(lines).block(block).wrap(Wrap { trim: false }), chunks[1]);

    let help = vec![
        Line::from(Span::styled("Need help with your application?", Theme::muted())),
        Line::from(action_spans(&[ExternalAction::ContactSupport, ExternalAction::ScheduleCall])),
    ];
    frame.render_widget(Paragraph::new(help), chunks[2]);
}

fn stage_lines(view: &StageView, date_format: &str) -> Vec<Line<'static>> {
    let (glyph, style) = status_glyph(view.status);
    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", glyph), style),
            Span::styled(view.stage.title(), Theme::title()),
        ]),
        Line::from(Span::styled(format!("   {}", view.description), Theme::text())),
    ];
    if let Some(date) = view.completed_on.filter(|_| view.status == StageStatus::Completed) {
        lines.push(Line::from(Span::styled(
            format!("   {}", completed_text(date, date_format)),
            Theme::success(),
        )));
    }
    if let Some(eta) = &view.eta {
        lines.push(Line::from(Span::styled(
            format!("   {}", eta_text(eta, date_format)),
            Theme::in_progress(),
        )));
    }
    if !view.actions.is_empty() {
        let mut spans = vec![Span::raw("   ")];
        spans.extend(action_spans(view.actions));
        lines.push(Line::from(spans));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dates_use_configured_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 11).unwrap();
        assert_eq!(eta_text(&Eta::By(date), "%d/%m/%Y"), "Expected by 11/03/2024");
        assert_eq!(eta_text(&Eta::By(date), "%Y-%m-%d"), "Expected by 2024-03-11");
        assert_eq!(completed_text(date, "%d/%m/%Y"), "Completed on: 11/03/2024");
        assert_eq!(eta_text(&Eta::Note("Schedule appointment"), "%d/%m/%Y"), "Schedule appointment");
    }

    #[test]
    fn test_bad_date_format_falls_back_to_iso() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        assert_eq!(completed_text(date, "%Q"), "Completed on: 2024-03-10");
        assert_eq!(eta_text(&Eta::By(date), "%Q"), "Expected by 2024-03-10");
    }
}
