use crate::app::state::{QuestionFocus, WizardScreen};
use crate::catalog::Question;
use crate::ui::input_box;
use crate::ui::theme::Theme;
use crate::wizard::{Field, WizardStep};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Gauge, List, ListItem, Paragraph};

pub fn render(frame: &mut Frame, area: Rect, wizard: &WizardScreen) {
    let nav = &wizard.navigator;
    let step = nav.current_step();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Progress
            Constraint::Length(1),
            Constraint::Min(3), // Question(s)
        ])
        .split(area);

    let questions_total = WizardStep::ALL.len() - 2;
    let gauge = Gauge::default()
        .gauge_style(Theme::gauge())
        .ratio(nav.progress().clamp(0.0, 1.0))
        .label(format!("{} · step {} of {}", step.title(), nav.step_index(), questions_total));
    frame.render_widget(gauge, chunks[0]);

    let Some(question) = nav.question() else {
        return;
    };

    if step == WizardStep::Emi {
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
            .split(chunks[2]);
        frame.render_widget(Paragraph::new(heading_lines(question)), rows[0]);
        input_box::render(frame, rows[1], "Monthly EMI", "₹ ", &wizard.emi_input);
        return;
    }

    let income = nav.income_question();
    let constraints = if income.is_some() {
        vec![Constraint::Percentage(40), Constraint::Percentage(60)]
    } else {
        vec![Constraint::Min(3)]
    };
    let panels = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(chunks[2]);

    let primary_field = step.field();
    let primary_selected = primary_field.and_then(|f| nav.answers().get(f));
    render_question(
        frame,
        panels[0],
        question,
        primary_selected,
        (wizard.focus == QuestionFocus::Primary).then_some(wizard.cursor),
    );

    if let Some(income) = income {
        render_question(
            frame,
            panels[1],
            income,
            nav.answers().get(Field::Income),
            (wizard.focus == QuestionFocus::Income).then_some(wizard.cursor),
        );
    }
}

fn heading_lines(question: &Question) -> Vec<Line<'static>> {
    let mut lines = vec![Line::from(Span::styled(question.title, Theme::heading()))];
    if let Some(subtitle) = question.subtitle {
        lines.push(Line::from(Span::styled(subtitle, Theme::muted())));
    }
    lines
}

/// One single-choice question. `cursor` is set when this list has the
/// highlight.
fn render_question(frame: &mut Frame, area: Rect, question: &Question, selected: Option<&str>, cursor: Option<usize>) {
    let focused = cursor.is_some();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(if focused { Theme::border_focused() } else { Theme::border() });

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let heading = heading_lines(question);
    let heading_height = heading.len() as u16 + 1;
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(heading_height), Constraint::Min(1)])
        .split(inner);
    frame.render_widget(Paragraph::new(heading), rows[0]);

    let items: Vec<ListItem> = question
        .options
        .iter()
        .enumerate()
        .map(|(i, choice)| {
            let chosen = selected == Some(choice.value);
            let mark = if chosen { "● " } else { "○ " };
            let style = if cursor == Some(i) {
                Theme::highlight()
            } else if chosen {
                Theme::selected()
            } else {
                Theme::text()
            };
            ListItem::new(Line::from(vec![Span::styled(format!(" {}{} ", mark, choice.label), style)]))
        })
        .collect();
    frame.render_widget(List::new(items), rows[1]);
}
