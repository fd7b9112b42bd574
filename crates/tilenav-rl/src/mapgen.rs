//! Terrain generation.
//!
//! Produces a walled grid whose interior tiles draw a movement cost
//! uniformly from a configured range, with a fixed set of obstacles
//! turned into walls. The random source is supplied by the caller, so a
//! seeded generator yields reproducible terrain.

use log::debug;
use rand::Rng;
use tilenav_core::{MAX_MOVEMENT_COST, NavError, Point, Result, TerrainGrid};

/// Parameters for [`MapGen::terrain`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TerrainConfig {
    pub width: i32,
    pub height: i32,
    /// Lowest interior movement cost (inclusive).
    pub min_cost: i32,
    /// Highest interior movement cost (inclusive).
    pub max_cost: i32,
    /// Extra walls placed after the costs are drawn.
    pub obstacles: Vec<Point>,
}

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            width: 10,
            height: 10,
            min_cost: 0,
            max_cost: 5,
            // A short wall segment in row 3.
            obstacles: vec![Point::new(2, 3), Point::new(3, 3), Point::new(4, 3)],
        }
    }
}

impl TerrainConfig {
    /// Check the cost range and dimensions.
    pub fn validate(&self) -> Result<()> {
        if self.width <= 0 || self.height <= 0 {
            return Err(NavError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        check_cost_range(self.min_cost, self.max_cost)
    }
}

/// `min..=max` must be a non-empty range of valid movement costs.
fn check_cost_range(min: i32, max: i32) -> Result<()> {
    if min < 0 || min > max || max > MAX_MOVEMENT_COST {
        return Err(NavError::InvalidCostRange { min, max });
    }
    Ok(())
}

/// Terrain generator driven by a caller-supplied random source.
pub struct MapGen<R: Rng> {
    pub rng: R,
}

impl<R: Rng> MapGen<R> {
    /// Create a generator using `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Generate a walled terrain from `cfg`.
    ///
    /// Obstacles outside the grid fail with [`NavError::InvalidCoordinate`].
    pub fn terrain(&mut self, cfg: &TerrainConfig) -> Result<TerrainGrid> {
        cfg.validate()?;
        let mut grid = TerrainGrid::walled(cfg.width, cfg.height, cfg.min_cost)?;
        self.fill_costs(&mut grid, cfg.min_cost, cfg.max_cost)?;
        for &p in &cfg.obstacles {
            grid.set_blocking(p)?;
        }
        debug!(
            "mapgen: {}x{} terrain, costs {}..={}, {} obstacles",
            cfg.width,
            cfg.height,
            cfg.min_cost,
            cfg.max_cost,
            cfg.obstacles.len()
        );
        Ok(grid)
    }

    /// Redraw the movement cost of every passable tile from
    /// `min_cost..=max_cost`. Walls are left alone.
    pub fn randomize_costs(
        &mut self,
        grid: &mut TerrainGrid,
        min_cost: i32,
        max_cost: i32,
    ) -> Result<()> {
        check_cost_range(min_cost, max_cost)?;
        self.fill_costs(grid, min_cost, max_cost)
    }

    fn fill_costs(&mut self, grid: &mut TerrainGrid, min_cost: i32, max_cost: i32) -> Result<()> {
        for p in grid.bounds().iter() {
            if grid.passable(p) {
                let cost = self.rng.random_range(min_cost..=max_cost);
                grid.set_cost(p, cost)?;
            }
        }
        Ok(())
    }
}
