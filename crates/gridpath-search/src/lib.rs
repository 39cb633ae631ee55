//! Search algorithms over a gridpath [`Grid`](gridpath_core::Grid).
//!
//! Four traversals share one neighbor contract and one result shape:
//!
//! - **BFS** unweighted shortest path ([`SearchSpace::bfs`])
//! - **Dijkstra** uniform-cost shortest path ([`SearchSpace::dijkstra`])
//! - **A\*** Manhattan-guided shortest path ([`SearchSpace::astar`])
//! - **DFS** exhaustive depth-first exploration ([`SearchSpace::dfs`])
//!
//! Each run works on a [`SearchSpace`], a private snapshot of the grid, and
//! yields the order nodes were finalized plus the reconstructed path. Use
//! [`run_search`] for the validated one-call entry point.
//!
//! # Neighbor order
//!
//! | Algorithm | Order |
//! |---|---|
//! | BFS, Dijkstra, A* | [`SEARCH_ORDER`]: Up, Down, Left, Right |
//! | DFS | [`DFS_ORDER`]: Up, Right, Down, Left (push order) |

mod astar;
mod bfs;
mod dfs;
mod dijkstra;
mod error;
mod frontier;
mod neighbors;
mod path;
mod search;
mod space;

pub use error::SearchError;
pub use neighbors::{DFS_ORDER, Direction, Neighbors, SEARCH_ORDER};
pub use search::{Algorithm, SearchResult, run_search};
pub use space::SearchSpace;
