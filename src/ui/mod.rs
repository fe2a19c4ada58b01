mod documents;
mod input_box;
mod landing;
mod layout;
mod offers;
mod question;
mod status_bar;
mod theme;
mod tracking;

use crate::app::state::{AppState, Screen};
use crate::wizard::WizardStep;
use ratatui::prelude::*;
use ratatui::widgets::Paragraph;
use theme::Theme;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();
    let app_layout = layout::compute_layout(area);

    render_header(frame, app_layout.header, state);
    match &state.screen {
        Screen::Wizard(w) if w.navigator.current_step() == WizardStep::Landing => {
            landing::render(frame, app_layout.body)
        }
        Screen::Wizard(w) => question::render(frame, app_layout.body, w),
        Screen::Offers(o) => offers::render(frame, app_layout.body, o),
        Screen::Documents(d) => documents::render(frame, app_layout.body, d),
        Screen::Tracking(t) => tracking::render(frame, app_layout.body, t, &state.config.ui.date_format),
    }
    status_bar::render(frame, app_layout.status_bar, state);
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut parts = vec![
        Span::styled(" unbias ", Theme::highlight()),
        Span::styled(" home loans", Theme::muted()),
    ];
    if let Some(bank) = state.selected_bank_name() {
        parts.push(Span::styled(format!("  ·  {}", bank), Theme::selected()));
    }
    frame.render_widget(Paragraph::new(Line::from(parts)), area);
}
