use gridpath_core::Node;

use crate::dijkstra::STEP_COST;
use crate::frontier::Frontier;
use crate::neighbors::SEARCH_ORDER;
use crate::space::SearchSpace;

impl SearchSpace {
    /// A* search from start to end with the Manhattan heuristic.
    ///
    /// The heuristic is consistent on a 4-connected uniform-cost grid, so
    /// every finalized node already has its shortest `g` and the reported
    /// path is optimal. The frontier pops the lowest `f`, then the lowest
    /// `g`, then the earliest insertion.
    pub fn astar(&mut self) -> Vec<Node> {
        self.reset();
        let mut visit_order = Vec::new();
        let (Some(si), Some(ei)) = (self.idx(self.start), self.idx(self.end)) else {
            return visit_order;
        };
        let goal = self.end;

        let mut in_open = vec![false; self.nodes.len()];
        let mut open: Frontier<(i32, i32)> = Frontier::new();

        {
            let n = &mut self.nodes[si];
            n.g = 0;
            n.h = n.coord.manhattan(goal);
            n.f = n.g + n.h;
            in_open[si] = true;
            open.push(si, (n.f, n.g));
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some((ci, key)) = open.pop() {
            let cn = &self.nodes[ci];
            // Skip finalized nodes and stale entries.
            if cn.is_visited || (cn.f, cn.g) != key {
                continue;
            }
            if cn.is_wall {
                continue;
            }

            in_open[ci] = false;
            self.nodes[ci].is_visited = true;
            visit_order.push(self.nodes[ci]);
            if ci == ei {
                break;
            }

            let cp = self.nodes[ci].coord;
            let current_g = self.nodes[ci].g;
            for &np in nbuf.cardinal(cp, &SEARCH_ORDER, |c| self.passable(c)) {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let n = &mut self.nodes[ni];
                if n.is_visited {
                    continue;
                }
                let tentative_g = current_g + STEP_COST;
                if tentative_g < n.g || !in_open[ni] {
                    n.g = tentative_g;
                    n.h = np.manhattan(goal);
                    n.f = n.g + n.h;
                    n.distance = tentative_g;
                    n.predecessor = Some(cp);
                    in_open[ni] = true;
                    open.push(ni, (n.f, n.g));
                }
            }
        }

        self.nbuf = nbuf;
        visit_order
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridpath_core::{Coord, Grid};

    #[test]
    fn straight_corridor_visits_only_the_line() {
        let g = Grid::new(5, 9, Coord::new(2, 0), Coord::new(2, 8)).unwrap();
        let mut space = SearchSpace::new(&g).unwrap();
        let order = space.astar();
        let coords: Vec<Coord> = order.iter().map(|n| n.coord).collect();
        let expected: Vec<Coord> = (0..9).map(|c| Coord::new(2, c)).collect();
        assert_eq!(coords, expected);
        assert!(space.reached_end());
    }

    #[test]
    fn scores_are_consistent() {
        let g = Grid::new(6, 6, Coord::new(0, 0), Coord::new(5, 3))
            .unwrap()
            .toggle_wall(Coord::new(1, 0))
            .toggle_wall(Coord::new(1, 1))
            .toggle_wall(Coord::new(1, 2));
        let mut space = SearchSpace::new(&g).unwrap();
        let order = space.astar();
        for n in &order {
            assert_eq!(n.f, n.g + n.h);
            assert_eq!(n.h, n.coord.manhattan(Coord::new(5, 3)));
        }
        let end = space.node(Coord::new(5, 3)).unwrap();
        // The wall stops at column 2, so the Manhattan route stays open.
        assert_eq!(end.g, 8);
    }

    #[test]
    fn detours_around_walls() {
        // Wall between start and end with a gap at the bottom.
        let mut g = Grid::new(4, 3, Coord::new(0, 0), Coord::new(0, 2)).unwrap();
        for r in 0..3 {
            g = g.toggle_wall(Coord::new(r, 1));
        }
        let mut space = SearchSpace::new(&g).unwrap();
        space.astar();
        assert!(space.reached_end());
        assert_eq!(space.node(Coord::new(0, 2)).unwrap().g, 8);
    }
}
