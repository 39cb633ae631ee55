//! The [`Grid`] type — a persistent 2D table of [`Node`]s.
//!
//! Every node lives behind its own [`Arc`]. Cloning a `Grid` produces a new
//! *version* that shares all nodes with the original; edits then replace the
//! affected `Arc` instead of writing through it, so older versions never
//! observe the change. Two versions can be diffed cheaply with
//! [`Arc::ptr_eq`], see [`diff`].

use std::sync::Arc;

use crate::error::GridError;
use crate::geom::{Bounds, Coord};
use crate::node::{Classification, Node};

/// A fixed-size grid with exactly one Start and one End node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    bounds: Bounds,
    nodes: Vec<Arc<Node>>,
    start: Coord,
    end: Coord,
}

impl Grid {
    /// Create a `rows × cols` grid with every node Empty except the anchors.
    pub fn new(rows: i32, cols: i32, start: Coord, end: Coord) -> Result<Self, GridError> {
        let bounds = Bounds::new(rows, cols);
        if rows <= 0 || cols <= 0 {
            return Err(GridError::EmptyDimensions(Bounds { rows, cols }));
        }
        check_anchor("start", start, bounds)?;
        check_anchor("end", end, bounds)?;
        if start == end {
            return Err(GridError::AnchorsCoincide(start));
        }

        let nodes = bounds
            .iter()
            .map(|c| {
                let mut n = Node::new(c);
                if c == start {
                    n = n.with_classification(Classification::Start);
                    n.distance = 0;
                } else if c == end {
                    n = n.with_classification(Classification::End);
                }
                Arc::new(n)
            })
            .collect();

        Ok(Self {
            bounds,
            nodes,
            start,
            end,
        })
    }

    /// The grid extent.
    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Number of rows.
    #[inline]
    pub fn rows(&self) -> i32 {
        self.bounds.rows
    }

    /// Number of columns.
    #[inline]
    pub fn cols(&self) -> i32 {
        self.bounds.cols
    }

    /// Number of nodes.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always `false` for a constructed grid; present for API symmetry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Coordinate of the Start node.
    #[inline]
    pub fn start(&self) -> Coord {
        self.start
    }

    /// Coordinate of the End node.
    #[inline]
    pub fn end(&self) -> Coord {
        self.end
    }

    /// Whether `at` is inside the grid.
    #[inline]
    pub fn contains(&self, at: Coord) -> bool {
        self.bounds.contains(at)
    }

    /// The node at `at`, or `None` if out of bounds.
    #[inline]
    pub fn get(&self, at: Coord) -> Option<&Node> {
        self.bounds.index(at).map(|i| self.nodes[i].as_ref())
    }

    /// The shared handle of the node at `at`. Useful for identity diffing.
    #[inline]
    pub fn node_ref(&self, at: Coord) -> Option<&Arc<Node>> {
        self.bounds.index(at).map(|i| &self.nodes[i])
    }

    /// Row-major iterator over the nodes.
    pub fn iter(&self) -> impl Iterator<Item = &Node> + '_ {
        self.nodes.iter().map(|n| n.as_ref())
    }

    /// Return a version with the wall at `at` flipped.
    ///
    /// Start, End and out-of-bounds targets leave the grid unchanged.
    pub fn toggle_wall(&self, at: Coord) -> Grid {
        let mut next = self.clone();
        let Some(node) = self.get(at) else {
            return next;
        };
        if node.classification.is_anchor() {
            return next;
        }
        let class = if node.is_wall {
            Classification::Empty
        } else {
            Classification::Wall
        };
        next.replace(node.with_classification(class));
        next
    }

    /// Return a version with Start moved to `at`.
    ///
    /// No-op when `at` is out of bounds, is the current Start, or is End.
    pub fn relocate_start(&self, at: Coord) -> Grid {
        self.relocate(Classification::Start, at)
    }

    /// Return a version with End moved to `at`.
    ///
    /// No-op when `at` is out of bounds, is the current End, or is Start.
    pub fn relocate_end(&self, at: Coord) -> Grid {
        self.relocate(Classification::End, at)
    }

    fn relocate(&self, anchor: Classification, at: Coord) -> Grid {
        let mut next = self.clone();
        let (current, other) = match anchor {
            Classification::Start => (self.start, self.end),
            _ => (self.end, self.start),
        };
        if at == current || at == other || !self.contains(at) {
            return next;
        }

        if let Some(old) = self.get(current) {
            let mut cleared = old.with_classification(Classification::Empty);
            cleared.reset_search();
            next.replace(cleared);
        }
        if let Some(target) = self.get(at) {
            let mut placed = target.with_classification(anchor);
            placed.reset_search();
            next.replace(placed);
        }

        match anchor {
            Classification::Start => next.start = at,
            _ => next.end = at,
        }
        next
    }

    /// Return a version with all search bookkeeping wiped.
    ///
    /// Visited and Path nodes revert to Empty; walls are kept; Start gets
    /// distance 0. Unchanged nodes stay shared with `self`.
    pub fn clear_search_state(&self) -> Grid {
        let mut next = self.clone();
        for (i, n) in self.nodes.iter().enumerate() {
            let mut cleared = **n;
            if cleared.classification.is_search_mark() {
                cleared = cleared.with_classification(Classification::Empty);
            }
            if cleared.coord == self.start {
                cleared = cleared.with_classification(Classification::Start);
            } else if cleared.coord == self.end {
                cleared = cleared.with_classification(Classification::End);
            }
            cleared.reset_search();
            if cleared != **n {
                next.nodes[i] = Arc::new(cleared);
            }
        }
        next
    }

    /// Return an independent deep copy that shares no node with `self`.
    pub fn snapshot(&self) -> Grid {
        Grid {
            bounds: self.bounds,
            nodes: self.nodes.iter().map(|n| Arc::new(**n)).collect(),
            start: self.start,
            end: self.end,
        }
    }

    /// Consume the grid, returning its nodes by value in row-major order.
    pub fn into_nodes(self) -> Vec<Node> {
        self.nodes.into_iter().map(Arc::unwrap_or_clone).collect()
    }

    /// Classify the node at `at` as [`Visited`](Classification::Visited) or
    /// [`Path`](Classification::Path).
    ///
    /// Returns `false` without mutating when `at` is out of bounds, is an
    /// anchor or a wall, or when `class` is not a search mark.
    pub fn mark(&mut self, at: Coord, class: Classification) -> bool {
        if !class.is_search_mark() {
            return false;
        }
        let Some(node) = self.get(at) else {
            return false;
        };
        if node.classification.is_anchor() || node.is_wall {
            return false;
        }
        let mut marked = node.with_classification(class);
        if class == Classification::Visited {
            marked.is_visited = true;
        }
        self.replace(marked);
        true
    }

    /// Verify the anchor and wall invariants.
    pub fn check_invariants(&self) -> Result<(), GridError> {
        if self.start == self.end {
            return Err(GridError::AnchorsCoincide(self.start));
        }
        let mut starts = 0;
        let mut ends = 0;
        for n in self.iter() {
            if n.is_wall != (n.classification == Classification::Wall) {
                return Err(GridError::Invariant {
                    at: n.coord,
                    reason: "wall flag disagrees with classification",
                });
            }
            match n.classification {
                Classification::Start => {
                    starts += 1;
                    if n.coord != self.start {
                        return Err(GridError::Invariant {
                            at: n.coord,
                            reason: "stray start node",
                        });
                    }
                }
                Classification::End => {
                    ends += 1;
                    if n.coord != self.end {
                        return Err(GridError::Invariant {
                            at: n.coord,
                            reason: "stray end node",
                        });
                    }
                }
                _ => {}
            }
        }
        if starts != 1 {
            return Err(GridError::Invariant {
                at: self.start,
                reason: "grid must hold exactly one start node",
            });
        }
        if ends != 1 {
            return Err(GridError::Invariant {
                at: self.end,
                reason: "grid must hold exactly one end node",
            });
        }
        Ok(())
    }

    /// Swap in a replacement for the node at `node.coord`.
    pub(crate) fn replace(&mut self, node: Node) {
        if let Some(i) = self.bounds.index(node.coord) {
            self.nodes[i] = Arc::new(node);
        }
    }
}

fn check_anchor(what: &'static str, at: Coord, bounds: Bounds) -> Result<(), GridError> {
    if bounds.contains(at) {
        Ok(())
    } else {
        Err(GridError::OutOfBounds { what, at, bounds })
    }
}

// ---------------------------------------------------------------------------
// Frame / diff
// ---------------------------------------------------------------------------

/// The nodes that changed between two grid versions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Frame {
    pub nodes: Vec<Node>,
    pub bounds: Bounds,
}

impl Frame {
    /// Whether nothing changed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Compute the difference between two versions of a same-sized grid.
///
/// Nodes still shared between `prev` and `curr` are skipped without being
/// compared. If the sizes differ every node of `curr` is reported.
pub fn diff(prev: &Grid, curr: &Grid) -> Frame {
    let bounds = curr.bounds();
    if prev.bounds() != bounds {
        return Frame {
            nodes: curr.iter().copied().collect(),
            bounds,
        };
    }
    let nodes = prev
        .nodes
        .iter()
        .zip(curr.nodes.iter())
        .filter(|(p, c)| !Arc::ptr_eq(p, c) && p != c)
        .map(|(_, c)| **c)
        .collect();
    Frame { nodes, bounds }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::UNREACHABLE;

    fn grid5() -> Grid {
        Grid::new(5, 5, Coord::new(0, 0), Coord::new(4, 4)).unwrap()
    }

    #[test]
    fn new_places_anchors() {
        let g = grid5();
        assert_eq!(g.len(), 25);
        assert_eq!(g.get(g.start()).unwrap().classification, Classification::Start);
        assert_eq!(g.get(g.start()).unwrap().distance, 0);
        assert_eq!(g.get(g.end()).unwrap().classification, Classification::End);
        assert_eq!(g.get(g.end()).unwrap().distance, UNREACHABLE);
        let empties = g
            .iter()
            .filter(|n| n.classification == Classification::Empty)
            .count();
        assert_eq!(empties, 23);
        assert!(g.check_invariants().is_ok());
    }

    #[test]
    fn new_rejects_bad_configuration() {
        assert_eq!(
            Grid::new(0, 5, Coord::ZERO, Coord::new(0, 1)),
            Err(GridError::EmptyDimensions(Bounds { rows: 0, cols: 5 }))
        );
        assert!(matches!(
            Grid::new(3, 3, Coord::new(3, 0), Coord::ZERO),
            Err(GridError::OutOfBounds { what: "start", .. })
        ));
        assert!(matches!(
            Grid::new(3, 3, Coord::ZERO, Coord::new(0, -1)),
            Err(GridError::OutOfBounds { what: "end", .. })
        ));
        assert_eq!(
            Grid::new(3, 3, Coord::new(1, 1), Coord::new(1, 1)),
            Err(GridError::AnchorsCoincide(Coord::new(1, 1)))
        );
    }

    #[test]
    fn toggle_wall_flips_and_leaves_original() {
        let g = grid5();
        let at = Coord::new(2, 2);
        let walled = g.toggle_wall(at);
        assert!(walled.get(at).unwrap().is_wall);
        assert_eq!(walled.get(at).unwrap().classification, Classification::Wall);
        assert!(!g.get(at).unwrap().is_wall);

        let cleared = walled.toggle_wall(at);
        assert!(!cleared.get(at).unwrap().is_wall);
        assert_eq!(cleared.get(at).unwrap().classification, Classification::Empty);
    }

    #[test]
    fn toggle_wall_ignores_anchors_and_out_of_bounds() {
        let g = grid5();
        assert_eq!(g.toggle_wall(g.start()), g);
        assert_eq!(g.toggle_wall(g.end()), g);
        assert_eq!(g.toggle_wall(Coord::new(9, 9)), g);
    }

    #[test]
    fn toggle_wall_replaces_only_one_node() {
        let g = grid5();
        let at = Coord::new(1, 3);
        let next = g.toggle_wall(at);
        for c in g.bounds().iter() {
            let same = Arc::ptr_eq(g.node_ref(c).unwrap(), next.node_ref(c).unwrap());
            assert_eq!(same, c != at, "at {c}");
        }
    }

    #[test]
    fn relocate_start_moves_anchor_and_clears_wall() {
        let g = grid5().toggle_wall(Coord::new(2, 2));
        let moved = g.relocate_start(Coord::new(2, 2));
        assert_eq!(moved.start(), Coord::new(2, 2));
        let n = moved.get(Coord::new(2, 2)).unwrap();
        assert_eq!(n.classification, Classification::Start);
        assert!(!n.is_wall);
        assert_eq!(n.distance, 0);
        let old = moved.get(Coord::new(0, 0)).unwrap();
        assert_eq!(old.classification, Classification::Empty);
        assert_eq!(old.distance, UNREACHABLE);
        assert!(moved.check_invariants().is_ok());
    }

    #[test]
    fn relocate_rejects_other_anchor_and_no_change() {
        let g = grid5();
        assert_eq!(g.relocate_start(g.end()), g);
        assert_eq!(g.relocate_start(g.start()), g);
        assert_eq!(g.relocate_end(g.start()), g);
        assert_eq!(g.relocate_end(Coord::new(5, 0)), g);
    }

    #[test]
    fn relocate_end_moves_anchor() {
        let g = grid5();
        let moved = g.relocate_end(Coord::new(0, 4));
        assert_eq!(moved.end(), Coord::new(0, 4));
        assert_eq!(
            moved.get(Coord::new(0, 4)).unwrap().classification,
            Classification::End
        );
        assert_eq!(
            moved.get(Coord::new(4, 4)).unwrap().classification,
            Classification::Empty
        );
        assert!(moved.check_invariants().is_ok());
    }

    #[test]
    fn mark_skips_anchors_and_walls() {
        let mut g = grid5().toggle_wall(Coord::new(1, 1));
        assert!(!g.mark(g.start(), Classification::Visited));
        assert!(!g.mark(g.end(), Classification::Path));
        assert!(!g.mark(Coord::new(1, 1), Classification::Visited));
        assert!(!g.mark(Coord::new(7, 7), Classification::Visited));
        assert!(!g.mark(Coord::new(0, 1), Classification::Wall));
        assert!(g.mark(Coord::new(0, 1), Classification::Visited));
        let n = g.get(Coord::new(0, 1)).unwrap();
        assert_eq!(n.classification, Classification::Visited);
        assert!(n.is_visited);
    }

    #[test]
    fn clear_search_state_reverts_marks() {
        let mut g = grid5().toggle_wall(Coord::new(3, 3));
        g.mark(Coord::new(0, 1), Classification::Visited);
        g.mark(Coord::new(0, 2), Classification::Path);
        let cleared = g.clear_search_state();
        assert_eq!(
            cleared.get(Coord::new(0, 1)).unwrap().classification,
            Classification::Empty
        );
        assert_eq!(
            cleared.get(Coord::new(0, 2)).unwrap().classification,
            Classification::Empty
        );
        assert!(cleared.get(Coord::new(3, 3)).unwrap().is_wall);
        assert_eq!(cleared.get(cleared.start()).unwrap().distance, 0);
        assert!(cleared.check_invariants().is_ok());
    }

    #[test]
    fn clear_search_state_is_idempotent() {
        let mut g = grid5();
        g.mark(Coord::new(2, 1), Classification::Visited);
        let once = g.clear_search_state();
        let twice = once.clear_search_state();
        assert_eq!(once, twice);
        // A clean grid keeps every node shared.
        for c in once.bounds().iter() {
            assert!(Arc::ptr_eq(once.node_ref(c).unwrap(), twice.node_ref(c).unwrap()));
        }
    }

    #[test]
    fn snapshot_shares_nothing() {
        let g = grid5();
        let snap = g.snapshot();
        assert_eq!(snap, g);
        for c in g.bounds().iter() {
            assert!(!Arc::ptr_eq(g.node_ref(c).unwrap(), snap.node_ref(c).unwrap()));
        }
    }

    #[test]
    fn check_invariants_detects_stray_anchor() {
        let mut g = grid5();
        let stray = g
            .get(Coord::new(2, 2))
            .unwrap()
            .with_classification(Classification::End);
        g.replace(stray);
        assert!(matches!(
            g.check_invariants(),
            Err(GridError::Invariant { reason: "stray end node", .. })
        ));
    }

    #[test]
    fn diff_reports_changed_nodes() {
        let a = grid5();
        let mut b = a.toggle_wall(Coord::new(1, 0));
        b.mark(Coord::new(2, 0), Classification::Visited);
        let frame = diff(&a, &b);
        assert_eq!(frame.nodes.len(), 2);
        assert_eq!(frame.nodes[0].coord, Coord::new(1, 0));
        assert_eq!(frame.nodes[1].coord, Coord::new(2, 0));
        assert!(diff(&a, &a.clone()).is_empty());
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Edit {
            Wall(i32, i32),
            Start(i32, i32),
            End(i32, i32),
            Visit(i32, i32),
            Clear,
        }

        fn arb_edit() -> impl Strategy<Value = Edit> {
            prop_oneof![
                (-1i32..7, -1i32..7).prop_map(|(r, c)| Edit::Wall(r, c)),
                (-1i32..7, -1i32..7).prop_map(|(r, c)| Edit::Start(r, c)),
                (-1i32..7, -1i32..7).prop_map(|(r, c)| Edit::End(r, c)),
                (0i32..6, 0i32..6).prop_map(|(r, c)| Edit::Visit(r, c)),
                Just(Edit::Clear),
            ]
        }

        proptest! {
            #[test]
            fn edits_keep_invariants(edits in prop::collection::vec(arb_edit(), 0..40)) {
                let mut g = Grid::new(6, 6, Coord::new(0, 0), Coord::new(5, 5)).unwrap();
                for e in edits {
                    g = match e {
                        Edit::Wall(r, c) => g.toggle_wall(Coord::new(r, c)),
                        Edit::Start(r, c) => g.relocate_start(Coord::new(r, c)),
                        Edit::End(r, c) => g.relocate_end(Coord::new(r, c)),
                        Edit::Visit(r, c) => {
                            g.mark(Coord::new(r, c), Classification::Visited);
                            g
                        }
                        Edit::Clear => g.clear_search_state(),
                    };
                    prop_assert!(g.check_invariants().is_ok());
                }
                let once = g.clear_search_state();
                prop_assert_eq!(once.clear_search_state(), once);
            }
        }
    }
}
