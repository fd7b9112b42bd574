//! Roguelike utilities for tilenav: field of view, terrain generation and
//! text rendering.

pub mod fov;
pub mod mapgen;
pub mod render;

pub use fov::{DEFAULT_VIEW_RADIUS, RAY_COUNT, VisibleSet, cast_ray, compute_visible};
pub use mapgen::{MapGen, TerrainConfig};
pub use render::{render_path, render_visible};
