//! **tilenav-core** — terrain model shared by the tilenav crates.
//!
//! This crate provides the foundational types used across the workspace:
//! geometry primitives, the [`Tile`] / [`TerrainGrid`] terrain model with its
//! 8-way adjacency rule, and the [`NavError`] type.

pub mod error;
pub mod geom;
pub mod terrain;

pub use error::{NavError, Result};
pub use geom::{Point, Range};
pub use terrain::{MAX_MOVEMENT_COST, Neighbor, TerrainGrid, Tile};
