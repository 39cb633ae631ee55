use std::collections::VecDeque;

use gridpath_core::Node;

use crate::neighbors::SEARCH_ORDER;
use crate::space::SearchSpace;

impl SearchSpace {
    /// Breadth-first search from start to end.
    ///
    /// Nodes are marked visited when enqueued, so none is queued twice.
    /// Returns the nodes in dequeue order, which is non-decreasing in
    /// distance. Stops as soon as End is dequeued.
    pub fn bfs(&mut self) -> Vec<Node> {
        self.reset();
        let mut visit_order = Vec::new();
        let Some(si) = self.idx(self.start) else {
            return visit_order;
        };
        let Some(ei) = self.idx(self.end) else {
            return visit_order;
        };

        let mut queue: VecDeque<usize> = VecDeque::new();
        self.nodes[si].is_visited = true;
        self.nodes[si].distance = 0;
        queue.push_back(si);

        let mut nbuf = std::mem::take(&mut self.nbuf);

        while let Some(ci) = queue.pop_front() {
            if self.nodes[ci].is_wall {
                continue;
            }
            visit_order.push(self.nodes[ci]);
            if ci == ei {
                break;
            }

            let cp = self.nodes[ci].coord;
            let current_dist = self.nodes[ci].distance;
            for &np in nbuf.cardinal(cp, &SEARCH_ORDER, |c| self.passable(c)) {
                let Some(ni) = self.idx(np) else {
                    continue;
                };
                let n = &mut self.nodes[ni];
                if n.is_visited {
                    continue;
                }
                n.is_visited = true;
                n.predecessor = Some(cp);
                n.distance = current_dist + 1;
                queue.push_back(ni);
            }
        }

        self.nbuf = nbuf;
        visit_order
    }
}
