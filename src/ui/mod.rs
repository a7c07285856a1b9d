//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the *core* data structures and turns them into cells on
//! the terminal.  No I/O happens here.

pub mod renderer;
pub mod switcher;
pub mod theme;
pub mod views;
