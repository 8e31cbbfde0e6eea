//! Logs panel component
//!
//! Shows the tail of the in-memory log buffer. The panel owns its scroll
//! position and follows new entries until the user scrolls up.

use super::scrollbar::{render_scrollbar, ScrollbarStyle};
use crate::logging::{LogEntry, LogLevel};
use crate::theme::Theme;
use crate::tui::scroll::ScrollState;
use crate::tui::traits::{Component, ComponentId, Handled, Interactive, RenderContext};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    widgets::{Block, Borders, List, ListItem},
    Frame,
};

/// Logs panel component
#[derive(Debug, Clone)]
pub struct LogsPanel {
    scroll: ScrollState,

    /// Snapshot taken in `sync_entries`, drawn in `render`
    entries: Vec<LogEntry>,
}

impl LogsPanel {
    pub fn new() -> Self {
        Self {
            scroll: ScrollState::following(),
            entries: Vec::new(),
        }
    }

    /// Pull the current entries and fit them to `area` (call each frame)
    ///
    /// We don't own the LogBuffer because it's shared with the logging layer.
    pub fn sync_entries(&mut self, entries: Vec<LogEntry>, area: Rect) {
        let height = area.height.saturating_sub(2) as usize;
        self.scroll.update_dimensions(entries.len(), height);
        self.entries = entries;
    }

    pub fn is_following(&self) -> bool {
        self.scroll.auto_follow
    }
}

impl Default for LogsPanel {
    fn default() -> Self {
        Self::new()
    }
}

impl Component for LogsPanel {
    fn id(&self) -> ComponentId {
        ComponentId::Logs
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let theme = ctx.theme;
        let (start, end) = self.scroll.visible_range();

        let items: Vec<ListItem> = self.entries[start..end]
            .iter()
            .map(|entry| {
                ListItem::new(format_log_entry(entry)).style(log_level_style(&entry.level, theme))
            })
            .collect();

        let border_color = if ctx.is_focused(self.id()) {
            theme.highlight
        } else {
            theme.border
        };

        let title = if self.scroll.auto_follow {
            " Logs "
        } else {
            " Logs [scroll] "
        };

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_type(theme.border_type)
                .border_style(Style::default().fg(border_color))
                .title(title),
        );

        f.render_widget(list, area);
        render_scrollbar(f, area, &self.scroll, ScrollbarStyle::Arrows);
    }
}

impl Interactive for LogsPanel {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => self.scroll.scroll_up(),
            KeyCode::Down | KeyCode::Char('j') => self.scroll.scroll_down(),
            KeyCode::PageUp => self.scroll.page_up(),
            KeyCode::PageDown => self.scroll.page_down(),
            KeyCode::Home | KeyCode::Char('g') => self.scroll.scroll_to_top(),
            KeyCode::End | KeyCode::Char('G') => self.scroll.scroll_to_bottom(),
            _ => return Handled::No,
        }
        Handled::Yes
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("↑↓:scroll  End:follow  l:hide")
    }
}

fn format_log_entry(entry: &LogEntry) -> String {
    format!(
        "[{}] {:5} {}",
        entry.timestamp.format("%H:%M:%S"),
        entry.level.as_str(),
        entry.message
    )
}

fn log_level_style(level: &LogLevel, theme: &Theme) -> Style {
    match level {
        LogLevel::Error => Style::default()
            .fg(theme.error)
            .add_modifier(Modifier::BOLD),
        LogLevel::Warn => Style::default().fg(theme.warn),
        LogLevel::Info => Style::default().fg(theme.foreground),
        LogLevel::Debug | LogLevel::Trace => Style::default().fg(theme.muted),
    }
}
