use gridpath_core::{Coord, GridError};
use thiserror::Error;

/// Errors returned by [`run_search`](crate::run_search).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Start/End are unusable; nothing was searched.
    #[error("invalid search configuration: {0}")]
    Configuration(#[from] GridError),

    /// The predecessor chain from End does not lead back to Start.
    #[error("predecessor chain from {end} ends at {reached}, expected start {start}")]
    InvariantViolation {
        start: Coord,
        end: Coord,
        reached: Coord,
    },
}
