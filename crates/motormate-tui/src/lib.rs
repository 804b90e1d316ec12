//! motormate-tui: Terminal UI components
//!
//! Widgets, key mapping and terminal setup for the MotorMate chat client,
//! built on ratatui and crossterm.

pub mod input;
pub mod terminal;
pub mod theme;
pub mod widgets;

pub use terminal::TerminalGuard;
pub use theme::Theme;
