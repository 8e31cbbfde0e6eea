// Frame composition
//
// ┌ screen (title, search, list) ┐
// ├ logs (optional)              ┤
// └ status                       ┘

use super::app::App;
use super::components::status_bar::{self, StatusInfo};
use super::traits::Component;
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::Style,
    widgets::Block,
    Frame,
};

const LOGS_HEIGHT: u16 = 8;
const STATUS_HEIGHT: u16 = 3;

/// Main UI render function - called on every frame
pub fn draw(f: &mut Frame, app: &mut App) {
    let bg = Block::default().style(Style::default().bg(app.theme.background));
    f.render_widget(bg, f.area());

    let mut constraints = vec![Constraint::Min(0)];
    if app.show_logs {
        constraints.push(Constraint::Length(LOGS_HEIGHT));
    }
    constraints.push(Constraint::Length(STATUS_HEIGHT));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(f.area());

    let screen_area = chunks[0];
    let status_area = chunks[chunks.len() - 1];

    // Mutable sync first, then immutable render
    app.screen.prepare_frame(screen_area);
    if app.show_logs {
        app.logs_panel.sync_entries(app.log_buffer.get_all(), chunks[1]);
    }

    let ctx = app.render_context();
    app.screen.render(f, screen_area, &ctx);
    if app.show_logs {
        app.logs_panel.render(f, chunks[1], &ctx);
    }

    let info = StatusInfo {
        rows: app.screen.number_of_rows(),
        mode: app.screen.mode(),
        ordering: app.screen.ordering(),
        in_flight: app.screen.in_flight(),
        hint: app.focus_hint(),
    };
    status_bar::render(f, status_area, &info, &ctx);
}
