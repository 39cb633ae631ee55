use gridpath_core::{Node, UNREACHABLE};

use crate::frontier::Frontier;
use crate::neighbors::SEARCH_ORDER;
use crate::space::SearchSpace;

/// Cost of one orthogonal step.
pub(crate) const STEP_COST: i32 = 1;

impl SearchSpace {
    /// Uniform-cost search from start to end.
    ///
    /// The frontier is seeded with every node in row-major order, start at
    /// distance 0 and the rest at [`UNREACHABLE`]. Ties on distance go to
    /// the earlier insertion. Popping an unreachable non-wall node ends the
    /// run: everything left is cut off from start.
    ///
    /// With a uniform step cost this finds the same path lengths as
    /// [`bfs`](Self::bfs), but keeps distance relaxation so per-step costs
    /// can vary.
    pub fn dijkstra(&mut self) -> Vec<Node> {
        self.reset();
        let mut visit_order = Vec::new();
        let Some(ei) = self.idx(self.end) else {
            return visit_order;
        };

        let mut open: Frontier<i32> = Frontier::with_capacity(self.nodes.len() * 2);
        for (i, n) in self.nodes.iter().enumerate() {
            open.push(i, n.distance);
        }

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some((ci, dist)) = open.pop() {
            let cn = &self.nodes[ci];
            // Skip finalized nodes and stale entries.
            if cn.is_visited || cn.distance != dist {
                continue;
            }
            if cn.is_wall {
                continue;
            }
            if dist == UNREACHABLE {
                break;
            }

            self.nodes[ci].is_visited = true;
            visit_order.push(self.nodes[ci]);
            if ci == ei {
                break;
            }

            let cp = self.nodes[ci].coord;
            for &np in nbuf.cardinal(cp, &SEARCH_ORDER, |c| self.passable(c)) {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let n = &mut self.nodes[ni];
                if n.is_visited {
                    continue;
                }
                let tentative = dist + STEP_COST;
                if tentative < n.distance {
                    n.distance = tentative;
                    n.predecessor = Some(cp);
                    open.push(ni, tentative);
                }
            }
        }

        self.nbuf = nbuf;
        visit_order
    }
}
