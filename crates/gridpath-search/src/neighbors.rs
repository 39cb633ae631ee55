use gridpath_core::Coord;

/// One orthogonal step.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// `(drow, dcol)` offset of the step.
    #[inline]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::Up => (-1, 0),
            Self::Down => (1, 0),
            Self::Left => (0, -1),
            Self::Right => (0, 1),
        }
    }

    /// The coordinate one step from `c`.
    #[inline]
    pub const fn step(self, c: Coord) -> Coord {
        let (dr, dc) = self.offset();
        c.shift(dr, dc)
    }
}

/// Enumeration order used by BFS, Dijkstra and A*.
///
/// When several equal-cost paths exist, this order decides which one is
/// reported.
pub const SEARCH_ORDER: [Direction; 4] = [
    Direction::Up,
    Direction::Down,
    Direction::Left,
    Direction::Right,
];

/// Push order used by DFS. Clockwise from Up; since the frontier is a stack
/// the last pushed (Left) is explored first.
pub const DFS_ORDER: [Direction; 4] = [
    Direction::Up,
    Direction::Right,
    Direction::Down,
    Direction::Left,
];

/// Cached neighbor computation helper.
///
/// Enumerates the orthogonal neighbors of a coordinate in a caller-chosen
/// order, filtered by a predicate.
#[derive(Debug)]
pub struct Neighbors {
    buf: Vec<Coord>,
}

impl Default for Neighbors {
    fn default() -> Self {
        Self::new()
    }
}

impl Neighbors {
    /// Create a new `Neighbors` helper.
    pub fn new() -> Self {
        Self {
            buf: Vec::with_capacity(4),
        }
    }

    /// Return the neighbors of `c` in `order`, keeping only those for which
    /// `keep` returns `true`.
    pub fn cardinal(
        &mut self,
        c: Coord,
        order: &[Direction],
        keep: impl Fn(Coord) -> bool,
    ) -> &[Coord] {
        self.buf.clear();
        for d in order {
            let n = d.step(c);
            if keep(n) {
                self.buf.push(n);
            }
        }
        &self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_order_is_up_down_left_right() {
        let mut nb = Neighbors::new();
        let got = nb.cardinal(Coord::new(1, 1), &SEARCH_ORDER, |_| true).to_vec();
        assert_eq!(
            got,
            vec![
                Coord::new(0, 1),
                Coord::new(2, 1),
                Coord::new(1, 0),
                Coord::new(1, 2)
            ]
        );
    }

    #[test]
    fn dfs_order_is_clockwise() {
        let mut nb = Neighbors::new();
        let got = nb.cardinal(Coord::new(1, 1), &DFS_ORDER, |_| true).to_vec();
        assert_eq!(
            got,
            vec![
                Coord::new(0, 1),
                Coord::new(1, 2),
                Coord::new(2, 1),
                Coord::new(1, 0)
            ]
        );
    }

    #[test]
    fn filter_drops_out_of_bounds() {
        let mut nb = Neighbors::new();
        let got = nb
            .cardinal(Coord::ZERO, &SEARCH_ORDER, |c| c.row >= 0 && c.col >= 0)
            .to_vec();
        assert_eq!(got, vec![Coord::new(1, 0), Coord::new(0, 1)]);
    }
}
