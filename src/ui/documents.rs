use crate::app::state::DocumentsScreen;
use crate::catalog::{bank_display_name, DocumentSpec};
use crate::ui::input_box;
use crate::ui::theme::Theme;
use crate::upload::{DocumentSlot, SubmissionState, UploadStatus};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph, Wrap};

/// Rows taken by one document card, borders included.
const CARD_HEIGHT: u16 = 4;

pub fn render(frame: &mut Frame, area: Rect, docs: &DocumentsScreen) {
    let errors = docs.simulator.errors();
    let error_height = if errors.is_empty() { 0 } else { errors.len() as u16 + 2 };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),            // Heading
            Constraint::Length(error_height), // Validation errors
            Constraint::Min(CARD_HEIGHT),     // Document cards
            Constraint::Length(2),            // Outstanding summary
        ])
        .split(area);

    let heading = vec![
        Line::from(Span::styled("Upload your documents", Theme::heading())),
        Line::from(Span::styled(
            format!("Required by {} · PDF, JPG, PNG or DOC files", bank_display_name(docs.bank_id)),
            Theme::muted(),
        )),
    ];
    frame.render_widget(Paragraph::new(heading), chunks[0]);

    if !errors.is_empty() {
        let lines: Vec<Line> = errors
            .iter()
            .enumerate()
            .map(|(i, e)| {
                Line::from(vec![
                    Span::styled(format!(" {} ", i + 1), Theme::key_hint()),
                    Span::styled(format!(" {}", e), Theme::error()),
                ])
            })
            .collect();
        let block = Block::default()
            .title(" Errors (press number to dismiss, 0 for all) ")
            .title_style(Theme::error())
            .borders(Borders::ALL)
            .border_type(Theme::border_type())
            .border_style(Theme::error());
        frame.render_widget(Paragraph::new(lines).block(block), chunks[1]);
    }

    let catalogue = docs.simulator.catalogue();
    let list_area = chunks[2];
    let visible = (list_area.height / CARD_HEIGHT).max(1) as usize;
    let first = docs.selected.saturating_sub(visible - 1);
    for (row, (i, spec)) in catalogue.iter().enumerate().skip(first).take(visible).enumerate() {
        let card = Rect::new(
            list_area.x,
            list_area.y + row as u16 * CARD_HEIGHT,
            list_area.width,
            CARD_HEIGHT.min(list_area.height),
        );
        render_card(frame, card, spec, docs.simulator.slot(spec.kind), i == docs.selected);
    }

    render_summary(frame, chunks[3], docs);

    if let Some(prompt) = &docs.path_prompt {
        let title = docs
            .selected_kind()
            .and_then(|kind| catalogue.iter().find(|d| d.kind == kind))
            .map(|d| d.title)
            .unwrap_or("Document");
        let popup = popup_area(area, 3);
        frame.render_widget(Clear, popup);
        input_box::render(frame, popup, &format!("File for {}", title), "❯ ", prompt);
    }
}

fn render_card(frame: &mut Frame, area: Rect, spec: &DocumentSpec, slot: Option<&DocumentSlot>, selected: bool) {
    let title = if spec.required {
        format!(" {} * ", spec.title)
    } else {
        format!(" {} ", spec.title)
    };
    let block = Block::default()
        .title(title)
        .title_style(if selected { Theme::selected() } else { Theme::title() })
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(if selected { Theme::border_focused() } else { Theme::border() });
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);
    frame.render_widget(
        Paragraph::new(Span::styled(spec.description, Theme::muted())),
        rows[0],
    );

    let Some(slot) = slot else {
        frame.render_widget(
            Paragraph::new(Span::styled("No file chosen", Theme::muted())),
            rows[1],
        );
        return;
    };

    match slot.status {
        UploadStatus::Uploading | UploadStatus::Idle => {
            let gauge = Gauge::default()
                .gauge_style(Theme::gauge())
                .percent(u16::from(slot.progress.min(100)))
                .label(format!("{} · {}%", slot.file_name, slot.progress));
            frame.render_widget(gauge, rows[1]);
        }
        UploadStatus::Success => {
            let line = Line::from(vec![
                Span::styled("✓ ", Theme::success()),
                Span::styled(slot.file_name.as_str(), Theme::text()),
                Span::styled("  uploaded", Theme::success()),
            ]);
            frame.render_widget(Paragraph::new(line), rows[1]);
        }
        UploadStatus::Error => {
            let line = Line::from(vec![
                Span::styled("✗ ", Theme::error()),
                Span::styled(slot.file_name.as_str(), Theme::text()),
                Span::styled(
                    format!("  {}", slot.error.as_deref().unwrap_or("upload failed")),
                    Theme::error(),
                ),
            ]);
            frame.render_widget(Paragraph::new(line), rows[1]);
        }
    }
}

fn render_summary(frame: &mut Frame, area: Rect, docs: &DocumentsScreen) {
    let line = match docs.simulator.submission() {
        SubmissionState::Submitting => Line::from(Span::styled("Submitting your application...", Theme::in_progress())),
        SubmissionState::Submitted => Line::from(Span::styled("Application submitted", Theme::success())),
        SubmissionState::Editing => {
            let outstanding = docs.simulator.required_outstanding();
            if outstanding.is_empty() {
                Line::from(vec![
                    Span::styled("All documents uploaded. ", Theme::success()),
                    Span::styled(" s ", Theme::key_hint()),
                    Span::styled(" Submit application", Theme::text()),
                ])
            } else {
                let titles: Vec<&str> = outstanding.iter().map(|d| d.title).collect();
                Line::from(vec![
                    Span::styled("Still needed: ", Theme::in_progress()),
                    Span::styled(titles.join(", "), Theme::muted()),
                ])
            }
        }
    };
    frame.render_widget(Paragraph::new(line).wrap(Wrap { trim: true }), area);
}

/// A full-width popup of `height` rows centered vertically in `area`.
fn popup_area(area: Rect, height: u16) -> Rect {
    let height = height.min(area.height);
    let y = area.y + (area.height - height) / 2;
    Rect::new(area.x + 2, y, area.width.saturating_sub(4), height)
}
