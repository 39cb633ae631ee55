//! Random wall scattering.
//!
//! Produces the "maze" layouts of the visualiser: every cell other than the
//! anchors independently becomes a wall with a fixed probability.

use rand::{Rng, RngExt};

use crate::grid::Grid;
use crate::node::Classification;

/// Default share of cells turned into walls.
pub const DEFAULT_WALL_DENSITY: f64 = 0.3;

/// Return a version of `grid` with freshly scattered walls.
///
/// Search state is cleared first. Each non-anchor node becomes a wall with
/// probability `density` (clamped to `0.0..=1.0`) and Empty otherwise, so
/// previously drawn walls are not kept.
pub fn scatter_walls<R: Rng + ?Sized>(grid: &Grid, density: f64, rng: &mut R) -> Grid {
    let density = if density.is_nan() {
        0.0
    } else {
        density.clamp(0.0, 1.0)
    };
    let mut next = grid.clear_search_state();
    let mut walls = 0usize;
    for c in grid.bounds().iter() {
        if c == grid.start() || c == grid.end() {
            continue;
        }
        let class = if rng.random_bool(density) {
            walls += 1;
            Classification::Wall
        } else {
            Classification::Empty
        };
        if let Some(n) = next.get(c) {
            if n.classification != class {
                let replaced = n.with_classification(class);
                next.replace(replaced);
            }
        }
    }
    log::debug!(
        "scattered {walls} walls over {} cells (density {density})",
        grid.len()
    );
    next
}
