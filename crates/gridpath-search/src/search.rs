use std::fmt;

use gridpath_core::{Coord, Grid, Node};

use crate::error::SearchError;
use crate::space::SearchSpace;

/// The available search algorithms.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    Bfs,
    #[default]
    Dijkstra,
    AStar,
    Dfs,
}

impl Algorithm {
    /// Every algorithm, in menu order.
    pub const ALL: [Algorithm; 4] = [
        Algorithm::Dijkstra,
        Algorithm::AStar,
        Algorithm::Bfs,
        Algorithm::Dfs,
    ];

    /// Human-readable name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bfs => "Breadth First Search",
            Self::Dijkstra => "Dijkstra",
            Self::AStar => "A* Search",
            Self::Dfs => "Depth First Search",
        }
    }

    /// Whether the reported path is guaranteed to be a shortest one.
    pub const fn is_optimal(self) -> bool {
        !matches!(self, Self::Dfs)
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Output of one search run.
///
/// `visit_order` lists nodes in the order the algorithm finalized them;
/// `path` runs from start to end inclusive and is empty when end is
/// unreachable. Nodes are copies from the run's private arena.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    pub algorithm: Algorithm,
    pub visit_order: Vec<Node>,
    pub path: Vec<Node>,
}

impl SearchResult {
    /// Whether a path was found.
    #[inline]
    pub fn found(&self) -> bool {
        !self.path.is_empty()
    }
}

/// Run `algorithm` on a private snapshot of `grid` from `start` to `end`.
///
/// `grid` is never modified. The result is deterministic for a given grid.
/// Fails with [`SearchError::Configuration`] when an anchor is out of
/// bounds, a wall, or both anchors coincide.
pub fn run_search(
    algorithm: Algorithm,
    grid: &Grid,
    start: Coord,
    end: Coord,
) -> Result<SearchResult, SearchError> {
    let mut space = SearchSpace::with_anchors(grid, start, end)?;
    let visit_order = match algorithm {
        Algorithm::Bfs => space.bfs(),
        Algorithm::Dijkstra => space.dijkstra(),
        Algorithm::AStar => space.astar(),
        Algorithm::Dfs => space.dfs(),
    };
    let path = space.reconstruct_path()?;
    log::debug!(
        "{algorithm}: {start} -> {end} visited {} nodes, path {}",
        visit_order.len(),
        path.len()
    );
    Ok(SearchResult {
        algorithm,
        visit_order,
        path,
    })
}
