//! Search input component
//!
//! Holds the text the user is typing. It only edits text; the screen
//! compares before/after and reacts to changes.

use crate::tui::traits::{Component, ComponentId, Handled, Interactive, RenderContext};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Single-line search input
#[derive(Debug, Clone, Default)]
pub struct SearchBar {
    text: String,
    placeholder: String,
}

impl SearchBar {
    pub fn new(placeholder: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            placeholder: placeholder.into(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_placeholder(&mut self, placeholder: impl Into<String>) {
        self.placeholder = placeholder.into();
    }
}

impl Component for SearchBar {
    fn id(&self) -> ComponentId {
        ComponentId::Search
    }

    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext) {
        let focused = ctx.is_focused(self.id());
        let border_color = if focused {
            ctx.theme.highlight
        } else {
            ctx.theme.border
        };

        let line = if self.text.is_empty() && !focused {
            Line::from(Span::styled(
                format!(" 🔍 {}", self.placeholder),
                Style::default().fg(ctx.theme.muted),
            ))
        } else {
            let cursor = if focused { "▏" } else { "" };
            Line::from(vec![
                Span::styled(" 🔍 ", Style::default().fg(ctx.theme.muted)),
                Span::styled(self.text.clone(), Style::default().fg(ctx.theme.foreground)),
                Span::styled(cursor, Style::default().fg(ctx.theme.highlight)),
            ])
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(ctx.theme.border_type)
            .border_style(Style::default().fg(border_color));

        f.render_widget(Paragraph::new(line).block(block), area);
    }
}

impl Interactive for SearchBar {
    fn handle_key(&mut self, key: KeyEvent) -> Handled {
        match key.code {
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.text.clear();
                Handled::Yes
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.text.push(c);
                Handled::Yes
            }
            KeyCode::Backspace => {
                self.text.pop();
                Handled::Yes
            }
            _ => Handled::No,
        }
    }

    fn focus_hint(&self) -> Option<&'static str> {
        Some("type to search  Ctrl-U:clear  Enter/Esc:back to list")
    }
}
