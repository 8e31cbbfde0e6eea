//! Three-phase view construction
//!
//! ratatui redraws from scratch every frame, but the *shape* of a view (which
//! slots exist, how they are sized, how they are styled) is decided once when
//! the view is built. `ViewCode` splits that decision into three phases and
//! `setup_view` runs them in a fixed order.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Construction contract for views
///
/// Phases with nothing to do keep the empty default body; `setup_view` never
/// skips a phase.
pub trait ViewCode {
    /// Declare child slots, in display order
    fn build_hierarchy(&mut self) {}

    /// Declare one layout constraint per slot
    fn setup_constraints(&mut self) {}

    /// Styles, titles and other tweaks that are neither hierarchy nor layout
    fn apply_additional_changes(&mut self) {}

    /// Run the three phases in order. Call once, at construction.
    fn setup_view(&mut self) {
        self.build_hierarchy();
        self.setup_constraints();
        self.apply_additional_changes();
    }
}

/// Pair each slot with its `Rect` inside `area`
///
/// Slots beyond the constraint list get no area.
pub fn split_slots<S: Copy>(
    area: Rect,
    direction: Direction,
    slots: &[S],
    constraints: &[Constraint],
) -> Vec<(S, Rect)> {
    debug_assert_eq!(
        slots.len(),
        constraints.len(),
        "every slot needs a constraint"
    );

    let rects = Layout::default()
        .direction(direction)
        .constraints(constraints.to_vec())
        .split(area);

    slots.iter().copied().zip(rects.iter().copied()).collect()
}
