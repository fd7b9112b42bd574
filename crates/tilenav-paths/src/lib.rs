//! Shortest-path search over a [`TerrainGrid`](tilenav_core::TerrainGrid).
//!
//! - **A\*** guided by the octile distance ([`Pathfinder::find_path`], [`find_path`])
//! - an indexed min-[`PriorityQueue`] supporting in-place priority updates
//! - integer distance helpers ([`octile`], [`manhattan`])
//!
//! Costs use a fixed-point scale of 10 per orthogonal step and 14 per
//! diagonal step, multiplied by the entered tile's movement cost.
//!
//! [`Pathfinder`] owns its per-search side tables so the terrain itself is
//! never mutated and can be shared read-only.

mod astar;
mod distance;
mod pathfinder;
mod queue;

pub use astar::find_path;
pub use distance::{CARDINAL_STEP, DIAGONAL_STEP, manhattan, octile, step_cost};
pub use pathfinder::{Path, Pathfinder};
pub use queue::PriorityQueue;
