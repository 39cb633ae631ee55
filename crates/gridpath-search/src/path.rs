//! Path reconstruction from predecessor links.

use gridpath_core::Node;

use crate::error::SearchError;
use crate::space::SearchSpace;

impl SearchSpace {
    /// Rebuild the Start..End path (inclusive) from predecessor links.
    ///
    /// Returns an empty path when End was never finalized. The chain must
    /// end at Start; anything else (including a cycle) is reported as
    /// [`SearchError::InvariantViolation`] and trips a debug assertion.
    pub fn reconstruct_path(&self) -> Result<Vec<Node>, SearchError> {
        if !self.reached_end() {
            return Ok(Vec::new());
        }

        let mut path = Vec::new();
        let mut cur = self.end;
        loop {
            let Some(node) = self.node(cur) else {
                return Err(self.broken_chain(cur));
            };
            path.push(*node);
            if path.len() > self.nodes.len() {
                return Err(self.broken_chain(cur));
            }
            match node.predecessor {
                Some(prev) => cur = prev,
                None => break,
            }
        }

        if cur != self.start {
            return Err(self.broken_chain(cur));
        }
        path.reverse();
        Ok(path)
    }

    fn broken_chain(&self, reached: gridpath_core::Coord) -> SearchError {
        debug_assert!(
            false,
            "predecessor chain from {} broke at {reached}",
            self.end
        );
        log::error!(
            "predecessor chain from {} broke at {reached}, start is {}",
            self.end,
            self.start
        );
        SearchError::InvariantViolation {
            start: self.start,
            end: self.end,
            reached,
        }
    }
}
