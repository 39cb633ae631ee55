//! **gridpath-core** — grid model for pathfinding visualisation.
//!
//! This crate provides the data types shared by the *gridpath* crates:
//! coordinates, nodes with search bookkeeping, a persistent grid whose
//! versions share unchanged nodes, diff frames and random wall scattering.

pub mod error;
pub mod geom;
pub mod grid;
pub mod maze;
pub mod node;

pub use error::GridError;
pub use geom::{Bounds, Coord};
pub use grid::{Frame, Grid, diff};
pub use maze::{DEFAULT_WALL_DENSITY, scatter_walls};
pub use node::{Classification, Node, UNREACHABLE};
