//! Front-end orchestration — state, terminal events, input handling and the
//! screen chrome around the views.

pub mod event;
pub mod handler;
pub mod layout;
pub mod popup;
pub mod settings;
pub mod state;
