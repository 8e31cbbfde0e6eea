// Status bar component
//
// Bottom line: row count, query mode, ordering policy, and the focused
// component's key hints on wide terminals.

use crate::config::ResponseOrdering;
use crate::tui::layout::Breakpoint;
use crate::tui::screen::QueryMode;
use crate::tui::traits::RenderContext;
use ratatui::{
    layout::Rect,
    style::Style,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// What the status bar shows, collected by the view layer
#[derive(Debug, Clone)]
pub struct StatusInfo<'a> {
    pub rows: usize,
    pub mode: &'a QueryMode,
    pub ordering: ResponseOrdering,
    pub in_flight: usize,
    pub hint: Option<&'static str>,
}

/// Build the status line for a given width
pub fn status_text(info: &StatusInfo, width: u16) -> String {
    let bp = Breakpoint::from_width(width);

    let mode = match info.mode {
        QueryMode::Unfiltered => "all shows".to_string(),
        QueryMode::Filtered(term) => format!("search \"{}\"", term),
    };

    let mut text = if bp.at_least(Breakpoint::Normal) {
        format!(
            " {} rows │ {} │ {}",
            info.rows,
            mode,
            info.ordering.as_str()
        )
    } else {
        format!(" {} │ {}", info.rows, mode)
    };

    if info.in_flight > 1 {
        text.push_str(&format!(" │ {} pending", info.in_flight));
    }

    if bp.at_least(Breakpoint::Wide) {
        if let Some(hint) = info.hint {
            text.push_str(" │ ");
            text.push_str(hint);
        }
    }

    text
}

/// Render the status bar
pub fn render(f: &mut Frame, area: Rect, info: &StatusInfo, ctx: &RenderContext) {
    let status = Paragraph::new(status_text(info, area.width))
        .style(Style::default().fg(ctx.theme.status_bar))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(ctx.theme.border_type)
                .border_style(Style::default().fg(ctx.theme.border)),
        );

    f.render_widget(status, area);
}
