//! Core component trait
//!
//! Every UI element that can be rendered implements `Component`.

use crate::catalog::PosterLoader;
use crate::theme::Theme;
use ratatui::{layout::Rect, Frame};

/// Identifier used for focus tracking and border colors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComponentId {
    /// Movie list (default focus)
    Movies,
    /// Search input
    Search,
    /// System logs panel
    Logs,
}

impl ComponentId {
    /// Cycle to next focusable component (Tab behavior)
    pub fn next_focus(self, logs_visible: bool) -> Self {
        match self {
            Self::Movies => Self::Search,
            Self::Search if logs_visible => Self::Logs,
            Self::Search | Self::Logs => Self::Movies,
        }
    }
}

/// Immutable context passed to components during rendering
///
/// Components only see what they need - no access to mutable app state.
#[derive(Clone, Copy)]
pub struct RenderContext<'a> {
    pub theme: &'a Theme,

    /// Which component currently has focus
    pub focus: ComponentId,

    /// Animation frame counter (for spinners)
    pub animation_frame: usize,

    /// Poster states for cells
    pub posters: &'a dyn PosterLoader,
}

impl<'a> RenderContext<'a> {
    pub fn is_focused(&self, id: ComponentId) -> bool {
        self.focus == id
    }

    /// Spinner character for current animation frame
    pub fn spinner_char(&self) -> char {
        const SPINNER: [char; 4] = ['◐', '◓', '◑', '◒'];
        SPINNER[self.animation_frame % SPINNER.len()]
    }
}

/// Base trait for all UI components
pub trait Component {
    fn id(&self) -> ComponentId;

    /// Render the component into `area`
    fn render(&self, f: &mut Frame, area: Rect, ctx: &RenderContext);
}
