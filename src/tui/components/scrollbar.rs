//! Scrollbar rendering helper
//!
//! Shared by every panel that owns a `ScrollState`.

use crate::tui::scroll::ScrollState;
use ratatui::{
    layout::{Margin, Rect},
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

/// Visual style for the scrollbar
#[derive(Debug, Clone, Copy, Default)]
pub enum ScrollbarStyle {
    /// Arrows at top and bottom (↑ ↓)
    Arrows,
    /// Just the thumb
    #[default]
    Minimal,
}

/// Render a vertical scrollbar on the right border of `area`
///
/// Does nothing while the content fits the viewport.
pub fn render_scrollbar(f: &mut Frame, area: Rect, scroll: &ScrollState, style: ScrollbarStyle) {
    if !scroll.needs_scrollbar() {
        return;
    }

    let scrollbar = match style {
        ScrollbarStyle::Arrows => Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓")),
        ScrollbarStyle::Minimal => Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(None)
            .end_symbol(None),
    };

    // ScrollbarState wants how far it can scroll, not the total
    let content_length = scroll.total().saturating_sub(scroll.viewport());
    let mut state = ScrollbarState::new(content_length).position(scroll.offset());

    // Keep the corners of the border intact
    let track = area.inner(Margin {
        vertical: 1,
        horizontal: 0,
    });
    f.render_stateful_widget(scrollbar, track, &mut state);
}
