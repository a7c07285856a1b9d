//! Core algorithms – column schema, row engine, role resolution and grouping.
//!
//! Nothing in this module depends on any TUI or rendering crate.

pub mod column;
pub mod engine;
pub mod grouping;
pub mod record;
pub mod roles;
pub mod row;
pub mod value;
