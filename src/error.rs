//! Configuration errors surfaced when a [`DataView`](crate::DataView) is built.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataViewError {
    #[error("column key `{0}` is defined more than once")]
    DuplicateColumn(String),

    #[error("at least one view mode must be available")]
    NoViews,

    #[error("page size must be greater than zero")]
    ZeroPageSize,
}
