use crate::app::state::OffersScreen;
use crate::catalog::{Bank, Questionnaire, BANKS};
use crate::wizard::FormAnswers;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};

/// Rows taken by one offer card, borders included.
const CARD_HEIGHT: u16 = 4;

pub fn render(frame: &mut Frame, area: Rect, offers: &OffersScreen) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(CARD_HEIGHT)])
        .split(area);

    let summary = vec![
        Line::from(Span::styled("Loan offers for you", Theme::heading())),
        Line::from(vec![
            Span::styled(answers_summary(&offers.answers), Theme::text()),
            Span::styled(format!("  ·  {} banks matched", BANKS.len()), Theme::muted()),
            Span::styled("  ·  tenure ", Theme::muted()),
            Span::styled(format!("{} years", offers.tenure_years()), Theme::selected()),
        ]),
    ];
    frame.render_widget(Paragraph::new(summary), chunks[0]);

    // Scroll so the selected card stays visible
    let visible = (chunks[1].height / CARD_HEIGHT).max(1) as usize;
    let first = offers.selected.saturating_sub(visible - 1);
    for (row, (i, bank)) in BANKS.iter().enumerate().skip(first).take(visible).enumerate() {
        let card = Rect::new(
            chunks[1].x,
            chunks[1].y + row as u16 * CARD_HEIGHT,
            chunks[1].width,
            CARD_HEIGHT.min(chunks[1].height),
        );
        render_card(frame, card, bank, i == offers.selected);
    }
}

/// The borrower's key answers by their option labels.
fn answers_summary(answers: &FormAnswers) -> String {
    let q = Questionnaire::builtin();
    let employment = answers.employment.as_ref().map(|e| e.kind().value()).unwrap_or("");
    [
        q.property_value.label_for(&answers.property_value),
        q.property_location.label_for(&answers.property_location),
        q.employment.label_for(employment),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" · ")
}

fn render_card(frame: &mut Frame, area: Rect, bank: &Bank, selected: bool) {
    let block = Block::default()
        .title(format!(" {} ", bank.name))
        .title_style(if selected { Theme::selected() } else { Theme::title() })
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(if selected { Theme::border_focused() } else { Theme::border() });

    let field = |label: &'static str, value: &'static str| {
        vec![
            Span::styled(format!("{} ", label), Theme::muted()),
            Span::styled(value, Theme::text()),
            Span::raw("   "),
        ]
    };
    let mut spans = Vec::new();
    spans.extend(field("Max amount", bank.max_amount));
    spans.extend(field("ROI", bank.roi));
    spans.extend(field("EMI", bank.emi_amount));
    spans.extend(field("Tenure", bank.max_tenure));

    let mut lines = vec![Line::from(spans)];
    if selected {
        lines.push(Line::from(Span::styled("Press Enter to apply", Theme::selected())));
    }
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
