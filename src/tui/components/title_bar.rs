// Title bar component
//
// Renders the screen title with a spinner while any fetch is in flight.

use crate::tui::traits::RenderContext;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::Line,
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Render the title bar at the top of the screen
pub fn render(f: &mut Frame, area: Rect, title: &str, loading: bool, ctx: &RenderContext) {
    let theme = ctx.theme;
    let indicator = if loading {
        format!(" {} loading", ctx.spinner_char())
    } else {
        String::new()
    };

    let title = Paragraph::new(format!(" 🎬 {}{}", title, indicator))
        .style(Style::default().fg(theme.title).add_modifier(Modifier::BOLD))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(theme.title))
                .title_top(Line::from(" TVMaze ").right_aligned()),
        );

    f.render_widget(title, area);
}
