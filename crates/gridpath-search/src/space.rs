use gridpath_core::{Bounds, Coord, Grid, GridError, Node, UNREACHABLE};

use crate::neighbors::Neighbors;

/// Private working copy of a grid for one search run.
///
/// `SearchSpace` owns a flat arena of nodes indexed row-major, taken from a
/// grid snapshot. Algorithms write distances, scores and predecessors into
/// the arena only; the grid the snapshot came from is never touched.
#[derive(Debug)]
pub struct SearchSpace {
    pub(crate) bounds: Bounds,
    pub(crate) nodes: Vec<Node>,
    pub(crate) start: Coord,
    pub(crate) end: Coord,
    // shared scratch buffer for neighbor queries
    pub(crate) nbuf: Neighbors,
}

impl SearchSpace {
    /// Build a search space from `grid`'s own anchors.
    pub fn new(grid: &Grid) -> Result<Self, GridError> {
        Self::with_anchors(grid, grid.start(), grid.end())
    }

    /// Build a search space searching from `start` to `end`.
    ///
    /// Fails when either anchor is out of bounds or a wall, or when they
    /// coincide. Every node starts undiscovered; `start` gets distance 0.
    pub fn with_anchors(grid: &Grid, start: Coord, end: Coord) -> Result<Self, GridError> {
        let bounds = grid.bounds();
        for (what, at) in [("start", start), ("end", end)] {
            match grid.get(at) {
                None => return Err(GridError::OutOfBounds { what, at, bounds }),
                Some(n) if n.is_wall => {
                    return Err(GridError::Invariant {
                        at,
                        reason: "search anchor is a wall",
                    });
                }
                Some(_) => {}
            }
        }
        if start == end {
            return Err(GridError::AnchorsCoincide(start));
        }

        let mut space = Self {
            bounds,
            nodes: grid.snapshot().into_nodes(),
            start,
            end,
            nbuf: Neighbors::new(),
        };
        space.reset();
        Ok(space)
    }

    /// Coordinate searched from.
    #[inline]
    pub fn start(&self) -> Coord {
        self.start
    }

    /// Coordinate searched for.
    #[inline]
    pub fn end(&self) -> Coord {
        self.end
    }

    /// The arena node at `c`.
    #[inline]
    pub fn node(&self, c: Coord) -> Option<&Node> {
        self.idx(c).map(|i| &self.nodes[i])
    }

    /// All arena nodes, row-major.
    #[inline]
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Whether End has been finalized by the last run.
    #[inline]
    pub fn reached_end(&self) -> bool {
        self.node(self.end).is_some_and(|n| n.is_visited)
    }

    // -----------------------------------------------------------------------
    // Coordinate helpers
    // -----------------------------------------------------------------------

    /// Wipe the bookkeeping of any previous run. Every algorithm calls this
    /// first, so one space can be searched repeatedly.
    pub(crate) fn reset(&mut self) {
        for n in self.nodes.iter_mut() {
            n.reset_search();
            n.distance = UNREACHABLE;
        }
        if let Some(i) = self.idx(self.start) {
            self.nodes[i].distance = 0;
        }
    }

    /// Convert a coordinate to a flat index. Returns `None` if out of range.
    #[inline]
    pub(crate) fn idx(&self, c: Coord) -> Option<usize> {
        self.bounds.index(c)
    }

    /// Whether `c` is inside the grid and not a wall.
    #[inline]
    pub(crate) fn passable(&self, c: Coord) -> bool {
        self.idx(c).is_some_and(|i| self.nodes[i].is_traversable())
    }
}
