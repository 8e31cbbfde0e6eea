//! Component trait system for the TUI
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │                     App                     │
//! │   (routes keys, owns screen + log buffer)   │
//! └─────────────────────────────────────────────┘
//!                        │
//!        ┌───────────────┼───────────────┐
//!        ▼               ▼               ▼
//!   ┌──────────┐   ┌──────────┐   ┌──────────┐
//!   │  Movies  │   │  Search  │   │   Logs   │
//!   │  Screen  │   │   Bar    │   │  Panel   │
//!   └──────────┘   └──────────┘   └──────────┘
//! ```
//!
//! - [`ViewCode`] - three-phase construction (hierarchy, constraints, styling)
//! - [`Component`] - render + identity
//! - [`Interactive`] - keyboard input

mod component;
mod interactive;
mod view_code;

pub use component::{Component, ComponentId, RenderContext};
pub use interactive::{Handled, Interactive};
pub use view_code::{split_slots, ViewCode};
