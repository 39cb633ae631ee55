//! The [`Node`] type — one grid cell with search bookkeeping.

use std::fmt;

use crate::geom::Coord;

/// Sentinel value standing for an infinite distance or score.
pub const UNREACHABLE: i32 = i32::MAX;

/// Display classification of a node. Exactly one holds at a time.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Classification {
    #[default]
    Empty,
    Wall,
    Start,
    End,
    Visited,
    Path,
}

impl Classification {
    /// Whether this is the Start or End anchor.
    #[inline]
    pub const fn is_anchor(self) -> bool {
        matches!(self, Self::Start | Self::End)
    }

    /// Whether this classification is produced by a search replay.
    #[inline]
    pub const fn is_search_mark(self) -> bool {
        matches!(self, Self::Visited | Self::Path)
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Empty => "empty",
            Self::Wall => "wall",
            Self::Start => "start",
            Self::End => "end",
            Self::Visited => "visited",
            Self::Path => "path",
        };
        f.write_str(s)
    }
}

/// A grid cell.
///
/// `coord` never changes once the node is created. `is_wall` must agree with
/// `classification == Wall`. The search fields hold [`UNREACHABLE`] until a
/// search discovers the node; `predecessor` is a coordinate, never a
/// reference into another grid.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    pub coord: Coord,
    pub classification: Classification,
    pub is_wall: bool,
    pub is_visited: bool,
    pub distance: i32,
    pub predecessor: Option<Coord>,
    pub g: i32,
    pub h: i32,
    pub f: i32,
}

impl Node {
    /// A fresh empty node at `coord`.
    #[inline]
    pub const fn new(coord: Coord) -> Self {
        Self {
            coord,
            classification: Classification::Empty,
            is_wall: false,
            is_visited: false,
            distance: UNREACHABLE,
            predecessor: None,
            g: UNREACHABLE,
            h: UNREACHABLE,
            f: UNREACHABLE,
        }
    }

    /// Set the classification (builder). Keeps `is_wall` in agreement.
    #[inline]
    pub const fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = classification;
        self.is_wall = matches!(classification, Classification::Wall);
        self
    }

    /// Whether a search may step onto this node.
    #[inline]
    pub const fn is_traversable(&self) -> bool {
        !self.is_wall
    }

    /// Reset every search field, keeping position and classification.
    ///
    /// Start nodes get distance 0.
    pub fn reset_search(&mut self) {
        self.is_visited = false;
        self.distance = if self.classification == Classification::Start {
            0
        } else {
            UNREACHABLE
        };
        self.predecessor = None;
        self.g = UNREACHABLE;
        self.h = UNREACHABLE;
        self.f = UNREACHABLE;
    }
}
