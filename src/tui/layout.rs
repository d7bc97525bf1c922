//! Root layout computation for header + main content + status bar.

use ratatui::layout::{Constraint, Layout, Rect};

/// Height of the title/description header.
pub const HEADER_HEIGHT: u16 = 4;
/// Hide the header below this terminal height.
pub const HIDE_HEADER_THRESHOLD: u16 = 16;

/// Computed layout regions for a single frame.
pub struct AppLayout {
    /// Header area (None if the terminal is too short).
    pub header: Option<Rect>,
    /// Main content area.
    pub main: Rect,
    /// Status bar (bottom row).
    pub status: Rect,
}

impl AppLayout {
    pub fn compute(area: Rect) -> Self {
        let rows = Layout::vertical([
            Constraint::Min(1),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

        let content = rows[0];
        let status = rows[1];

        if area.height < HIDE_HEADER_THRESHOLD {
            return AppLayout {
                header: None,
                main: content,
                status,
            };
        }

        let cols = Layout::vertical([Constraint::Length(HEADER_HEIGHT), Constraint::Min(1)])
            .split(content);

        AppLayout {
            header: Some(cols[0]),
            main: cols[1],
            status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_layout() {
        let area = Rect::new(0, 0, 100, 40);
        let layout = AppLayout::compute(area);
        assert_eq!(layout.header.unwrap().height, HEADER_HEIGHT);
        assert_eq!(layout.status.height, 1);
        assert_eq!(
            HEADER_HEIGHT + layout.main.height + layout.status.height,
            area.height
        );
    }

    #[test]
    fn test_header_hidden_when_short() {
        let area = Rect::new(0, 0, 100, 10);
        let layout = AppLayout::compute(area);
        assert!(layout.header.is_none());
        assert_eq!(layout.main.height, 9);
    }
}
