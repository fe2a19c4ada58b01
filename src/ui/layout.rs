use ratatui::layout::{Constraint, Direction, Layout, Rect};

pub struct AppLayout {
    pub header: Rect,
    pub body: Rect,
    pub status_bar: Rect,
}

pub fn compute_layout(area: Rect) -> AppLayout {
    // Vertical split: header | screen body | status bar
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Min(5),    // Screen
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    // Keep the body readable on wide terminals
    let body = centered_columns(chunks[1], 100);

    AppLayout {
        header: chunks[0],
        body,
        status_bar: chunks[2],
    }
}

/// A horizontally centered slice of `area` at most `max_width` wide.
pub fn centered_columns(area: Rect, max_width: u16) -> Rect {
    let width = area.width.min(max_width);
    let x = area.x + (area.width - width) / 2;
    Rect::new(x, area.y, width, area.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layout_rows() {
        let layout = compute_layout(Rect::new(0, 0, 80, 24));
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.status_bar.y, 23);
        assert_eq!(layout.body.height, 22);
        assert_eq!(layout.body.width, 80);
    }

    #[test]
    fn test_body_centered_on_wide_terminal() {
        let layout = compute_layout(Rect::new(0, 0, 160, 40));
        assert_eq!(layout.body.width, 100);
        assert_eq!(layout.body.x, 30);
    }
}
