use crate::app::state::InputState;
use crate::ui::theme::Theme;
use ratatui::prelude::*;
use ratatui::widgets::block::Padding;
use ratatui::widgets::{Block, Borders, Paragraph};
use unicode_width::UnicodeWidthStr;

/// Display columns between the start of the text and the cursor.
pub fn cursor_column(input: &InputState) -> u16 {
    input.text[..input.cursor].width() as u16
}

/// A bordered single-line input with a prompt prefix and a visible cursor.
pub fn render(frame: &mut Frame, area: Rect, title: &str, prefix: &str, input: &InputState) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .title_style(Theme::title())
        .borders(Borders::ALL)
        .border_type(Theme::border_type())
        .border_style(Theme::border_focused())
        .padding(Padding::horizontal(1));

    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.width == 0 || inner.height == 0 {
        return;
    }

    let line = Line::from(vec![
        Span::styled(prefix.to_string(), Style::default().fg(Theme::ACCENT)),
        Span::styled(input.text.as_str(), Theme::text()),
    ]);
    frame.render_widget(Paragraph::new(line), inner);

    let prompt_offset = prefix.width() as u16;
    let cursor_x = inner.x + prompt_offset + cursor_column(input);
    frame.set_cursor_position((cursor_x.min(inner.right() - 1), inner.y));
}
