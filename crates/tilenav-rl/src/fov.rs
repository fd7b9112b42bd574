//! Field of view by radial ray marching.
//!
//! One ray is cast per integer degree from the centre of the viewpoint
//! tile. Each ray samples the tile under its current position, then
//! advances by a unit vector, for at most `radius` samples (the origin
//! sample included). A blocking tile is recorded as visible and ends the
//! ray. The visible set is the union over all rays, so the order in which
//! rays are processed does not matter.

use log::debug;
use tilenav_core::{NavError, Point, Result, TerrainGrid, Tile};

/// Number of rays cast, one per degree.
pub const RAY_COUNT: u32 = 360;

/// View radius used when none is configured.
pub const DEFAULT_VIEW_RADIUS: i32 = 3;

/// Deduplicated set of tiles seen from one viewpoint.
///
/// Holds references into the scanned [`TerrainGrid`]. Iteration follows
/// first-insertion order, which depends on ray order; compare visible sets
/// with [`contains`](Self::contains) rather than by sequence.
#[derive(Debug, Clone)]
pub struct VisibleSet<'a> {
    terrain: &'a TerrainGrid,
    order: Vec<usize>,
    seen: Vec<bool>,
}

impl<'a> VisibleSet<'a> {
    fn new(terrain: &'a TerrainGrid) -> Self {
        Self {
            terrain,
            order: Vec::new(),
            seen: vec![false; terrain.len()],
        }
    }

    fn insert(&mut self, idx: usize) {
        if !self.seen[idx] {
            self.seen[idx] = true;
            self.order.push(idx);
        }
    }

    /// Whether the tile at `p` is visible.
    pub fn contains(&self, p: Point) -> bool {
        self.terrain.index(p).is_some_and(|i| self.seen[i])
    }

    /// Number of visible tiles.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Visible tiles, in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = &'a Tile> + '_ {
        let terrain = self.terrain;
        self.order.iter().map(move |&i| terrain.tile_at_index(i))
    }

    /// Coordinates of the visible tiles, in first-seen order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.iter().map(Tile::coordinate)
    }
}

fn check(terrain: &TerrainGrid, viewpoint: Point, radius: i32) -> Result<()> {
    if radius <= 0 {
        return Err(NavError::InvalidRadius(radius));
    }
    terrain.tile(viewpoint)?;
    Ok(())
}

/// March one ray and report the flat index of every sampled tile.
fn march(
    terrain: &TerrainGrid,
    viewpoint: Point,
    angle_deg: u32,
    radius: i32,
    mut visit: impl FnMut(usize),
) {
    let (dy, dx) = f64::from(angle_deg).to_radians().sin_cos();
    let mut ox = f64::from(viewpoint.x) + 0.5;
    let mut oy = f64::from(viewpoint.y) + 0.5;
    for _ in 0..radius {
        let p = Point::new(ox.floor() as i32, oy.floor() as i32);
        let Some(idx) = terrain.index(p) else {
            return;
        };
        visit(idx);
        if terrain.tile_at_index(idx).is_blocking() {
            return;
        }
        ox += dx;
        oy += dy;
    }
}

/// Compute the tiles visible from `viewpoint` within `radius` samples.
///
/// `radius` counts samples including the origin, so `radius == 1` only
/// sees the viewpoint tile. Fails with [`NavError::InvalidRadius`] when
/// `radius <= 0` and [`NavError::InvalidCoordinate`] when the viewpoint is
/// off the grid.
pub fn compute_visible(
    terrain: &TerrainGrid,
    viewpoint: Point,
    radius: i32,
) -> Result<VisibleSet<'_>> {
    check(terrain, viewpoint, radius)?;
    let mut visible = VisibleSet::new(terrain);
    for angle in 0..RAY_COUNT {
        march(terrain, viewpoint, angle, radius, |i| visible.insert(i));
    }
    debug!(
        "fov: {} tiles visible from {viewpoint} (radius {radius})",
        visible.len()
    );
    Ok(visible)
}

/// Samples taken by the single ray at `angle_deg` (0 points along +x, 90
/// along +y), in marching order.
pub fn cast_ray(
    terrain: &TerrainGrid,
    viewpoint: Point,
    angle_deg: u32,
    radius: i32,
) -> Result<Vec<Point>> {
    check(terrain, viewpoint, radius)?;
    let mut samples = Vec::new();
    march(terrain, viewpoint, angle_deg % RAY_COUNT, radius, |i| {
        samples.push(terrain.point(i))
    });
    Ok(samples)
}
