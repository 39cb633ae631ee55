use gridpath_core::Node;

use crate::neighbors::DFS_ORDER;
use crate::space::SearchSpace;

impl SearchSpace {
    /// Depth-first search from start to end.
    ///
    /// Nodes are marked visited when popped, so a node may sit on the stack
    /// several times; duplicates are dropped on pop. A neighbor's
    /// predecessor is overwritten each time it is pushed, which makes it
    /// point at whoever pushed the copy that gets popped first.
    ///
    /// Finds *a* path when one exists; not necessarily a shortest one.
    pub fn dfs(&mut self) -> Vec<Node> {
        self.reset();
        let mut visit_order = Vec::new();
        let (Some(si), Some(ei)) = (self.idx(self.start), self.idx(self.end)) else {
            return visit_order;
        };

        let mut stack: Vec<usize> = vec![si];
        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(ci) = stack.pop() {
            let cn = &self.nodes[ci];
            if cn.is_visited || cn.is_wall {
                continue;
            }

            self.nodes[ci].is_visited = true;
            visit_order.push(self.nodes[ci]);
            if ci == ei {
                break;
            }

            let cp = self.nodes[ci].coord;
            let depth = self.nodes[ci].distance;
            for &np in nbuf.cardinal(cp, &DFS_ORDER, |c| self.passable(c)) {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let n = &mut self.nodes[ni];
                if n.is_visited {
                    continue;
                }
                n.predecessor = Some(cp);
                n.distance = depth + 1;
                stack.push(ni);
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
    fn explores_left_first() {
        // Left is pushed last, so it is popped first.
        let g = Grid::new(1, 5, Coord::new(0, 2), Coord::new(0, 0)).unwrap();
        let mut space = SearchSpace::new(&g).unwrap();
        let order: Vec<Coord> = space.dfs().iter().map(|n| n.coord).collect();
        assert_eq!(
            order,
            vec![Coord::new(0, 2), Coord::new(0, 1), Coord::new(0, 0)]
        );
    }

    #[test]
    fn goes_deep_before_wide() {
        let g = Grid::new(3, 3, Coord::new(0, 2), Coord::new(0, 1)).unwrap();
        let mut space = SearchSpace::new(&g).unwrap();
        let order: Vec<Coord> = space.dfs().iter().map(|n| n.coord).collect();
        // From (0,2): push Down (1,2) then Left (0,1); Left is popped first
        // and it is End.
        assert_eq!(order, vec![Coord::new(0, 2), Coord::new(0, 1)]);
    }

    #[test]
    fn never_revisits() {
        let g = Grid::new(4, 4, Coord::new(0, 0), Coord::new(3, 3)).unwrap();
        let mut space = SearchSpace::new(&g).unwrap();
        let order = space.dfs();
        let mut coords: Vec<Coord> = order.iter().map(|n| n.coord).collect();
        let len = coords.len();
        coords.sort();
        coords.dedup();
        assert_eq!(coords.len(), len);
        assert!(space.reached_end());
    }
}
