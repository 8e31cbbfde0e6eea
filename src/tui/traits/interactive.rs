//! Interactive trait for components that handle keyboard input

use super::Component;
use crossterm::event::KeyEvent;

/// Result of handling a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handled {
    /// Event was consumed by the component
    Yes,
    /// Event was not handled, should bubble up
    No,
}

impl From<bool> for Handled {
    fn from(handled: bool) -> Self {
        if handled {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// Trait for components that handle keyboard input
///
/// ```text
/// KeyEvent
///    │
///    ▼
/// App (global handlers: q, /, l, Tab)
///    │  if not handled
///    ▼
/// Focused component (Interactive::handle_key)
/// ```
pub trait Interactive: Component {
    fn handle_key(&mut self, key: KeyEvent) -> Handled;

    /// Keybind hints for the status bar when this component is focused
    fn focus_hint(&self) -> Option<&'static str> {
        None
    }
}
