// Components module - reusable UI building blocks
//
// - Title bar: screen title, loading spinner
// - Search bar: query input
// - Movie cell: one catalog entry
// - Status bar: rows, mode, key hints
// - Logs panel: tracing entries

pub mod formatters;
pub mod logs_panel;
pub mod movie_cell;
pub mod scrollbar;
pub mod search_bar;
pub mod status_bar;
pub mod title_bar;

pub use logs_panel::LogsPanel;
