use thiserror::Error;

use crate::geom::{Bounds, Coord};

/// Errors raised when building or validating a [`Grid`](crate::Grid).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {0}")]
    EmptyDimensions(Bounds),

    #[error("{what} {at} lies outside the {bounds} grid")]
    OutOfBounds {
        what: &'static str,
        at: Coord,
        bounds: Bounds,
    },

    #[error("start and end coincide at {0}")]
    AnchorsCoincide(Coord),

    #[error("grid invariant broken at {at}: {reason}")]
    Invariant { at: Coord, reason: &'static str },
}
