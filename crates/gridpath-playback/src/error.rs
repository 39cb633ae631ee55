use gridpath_core::GridError;
use gridpath_search::SearchError;
use thiserror::Error;

/// Errors raised by the playback [`Scheduler`](crate::Scheduler).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PlaybackError {
    #[error("a playback is already running")]
    ReentrancyViolation,
}

/// Errors raised by a [`Session`](crate::Session).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    Search(#[from] SearchError),

    #[error(transparent)]
    Playback(#[from] PlaybackError),

    /// A grid edit was attempted while a playback owns the grid.
    #[error("grid is locked while a playback is running")]
    Busy,
}
