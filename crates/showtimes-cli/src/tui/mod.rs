//! TUI module for the interactive showtimes browser.
//!
//! Uses `ratatui` + `crossterm` for rendering.

mod browser;
/// Browser state types.
pub mod state;
mod ui;

pub use browser::run_browser;
