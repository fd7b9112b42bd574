//! The terrain model: [`Tile`] values stored in a rectangular [`TerrainGrid`].
//!
//! The grid exclusively owns its tiles. Searches and scans borrow it
//! immutably and keep their own per-run state in side tables keyed by the
//! flat index `row * width + col`.

use crate::error::{NavError, Result};
use crate::geom::{Point, Range};

/// Orthogonal neighbor offsets, in expansion order.
const ORTHOGONAL: [Point; 4] = [
    Point::new(0, 1),
    Point::new(1, 0),
    Point::new(0, -1),
    Point::new(-1, 0),
];

/// Diagonal neighbor offsets, in expansion order.
const DIAGONAL: [Point; 4] = [
    Point::new(-1, 1),
    Point::new(1, 1),
    Point::new(-1, -1),
    Point::new(1, -1),
];

/// Largest accepted movement cost. Keeps scaled path costs well inside
/// `i32` for any grid that fits in memory.
pub const MAX_MOVEMENT_COST: i32 = 1000;

/// One grid cell.
///
/// A blocking tile can neither be entered nor seen through; its movement
/// cost is meaningless and kept at 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTile"))]
pub struct Tile {
    coordinate: Point,
    movement_cost: i32,
    blocking: bool,
}

impl Tile {
    /// A passable tile costing `cost` to enter, `0..=MAX_MOVEMENT_COST`.
    pub fn passable(coordinate: Point, cost: i32) -> Result<Self> {
        if cost < 0 {
            return Err(NavError::NegativeCost {
                pos: coordinate,
                cost,
            });
        }
        if cost > MAX_MOVEMENT_COST {
            return Err(NavError::CostTooHigh {
                pos: coordinate,
                cost,
            });
        }
        Ok(Self {
            coordinate,
            movement_cost: cost,
            blocking: false,
        })
    }

    /// A wall.
    pub const fn blocking(coordinate: Point) -> Self {
        Self {
            coordinate,
            movement_cost: 0,
            blocking: true,
        }
    }

    #[inline]
    pub fn coordinate(&self) -> Point {
        self.coordinate
    }

    #[inline]
    pub fn movement_cost(&self) -> i32 {
        self.movement_cost
    }

    #[inline]
    pub fn is_blocking(&self) -> bool {
        self.blocking
    }
}

/// A passable tile adjacent to some queried coordinate.
///
/// `tile` points into the grid's own storage and `index` is its flat index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Neighbor<'a> {
    pub tile: &'a Tile,
    pub index: usize,
    pub diagonal: bool,
}

/// A fixed-size rectangular grid of tiles, addressed by [`Point`].
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "RawTerrain"))]
pub struct TerrainGrid {
    bounds: Range,
    tiles: Vec<Tile>,
}

// ---------------------------------------------------------------------------
// Deserialization goes through the same checks as the constructors
// ---------------------------------------------------------------------------

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTile {
    coordinate: Point,
    movement_cost: i32,
    blocking: bool,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTile> for Tile {
    type Error = NavError;

    fn try_from(raw: RawTile) -> Result<Self> {
        if raw.blocking {
            Ok(Tile::blocking(raw.coordinate))
        } else {
            Tile::passable(raw.coordinate, raw.movement_cost)
        }
    }
}

#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct RawTerrain {
    bounds: Range,
    tiles: Vec<Tile>,
}

#[cfg(feature = "serde")]
impl TryFrom<RawTerrain> for TerrainGrid {
    type Error = NavError;

    fn try_from(raw: RawTerrain) -> Result<Self> {
        let size = raw.bounds.max - raw.bounds.min;
        if raw.bounds.min != Point::ZERO || raw.bounds.is_empty() {
            return Err(NavError::InvalidDimensions {
                width: size.x,
                height: size.y,
            });
        }
        if raw.tiles.len() != raw.bounds.len() {
            return Err(NavError::TileCountMismatch {
                expected: raw.bounds.len(),
                found: raw.tiles.len(),
            });
        }
        let grid = TerrainGrid {
            bounds: raw.bounds,
            tiles: raw.tiles,
        };
        for (i, t) in grid.tiles.iter().enumerate() {
            if t.coordinate != grid.point(i) {
                return Err(NavError::InvalidCoordinate(t.coordinate));
            }
        }
        Ok(grid)
    }
}

impl TerrainGrid {
    /// Create a grid where every tile is passable with the given cost.
    pub fn new(width: i32, height: i32, cost: i32) -> Result<Self> {
        if width <= 0 || height <= 0 {
            return Err(NavError::InvalidDimensions { width, height });
        }
        let bounds = Range::new(0, 0, width, height);
        let tiles = bounds
            .iter()
            .map(|p| Tile::passable(p, cost))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { bounds, tiles })
    }

    /// Like [`new`](Self::new), with every perimeter tile blocking.
    pub fn walled(width: i32, height: i32, cost: i32) -> Result<Self> {
        let mut grid = Self::new(width, height, cost)?;
        let bounds = grid.bounds;
        for p in bounds.iter().filter(|&p| bounds.on_border(p)) {
            grid.set_blocking(p)?;
        }
        Ok(grid)
    }

    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// Number of tiles.
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Flat index of `p`, or `None` when out of bounds.
    #[inline]
    pub fn index(&self, p: Point) -> Option<usize> {
        if !self.bounds.contains(p) {
            return None;
        }
        Some((p.y * self.width() + p.x) as usize)
    }

    /// Convert a flat index back to a `Point`.
    #[inline]
    pub fn point(&self, idx: usize) -> Point {
        let w = self.width() as usize;
        Point::new((idx % w) as i32, (idx / w) as i32)
    }

    /// The tile at `p`, or `None` when out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<&Tile> {
        self.index(p).map(|i| &self.tiles[i])
    }

    /// The tile at `p`, rejecting out-of-bounds coordinates.
    pub fn tile(&self, p: Point) -> Result<&Tile> {
        self.at(p).ok_or(NavError::InvalidCoordinate(p))
    }

    /// The tile stored at flat index `idx`.
    ///
    /// Panics if `idx` is not below [`len`](Self::len).
    #[inline]
    pub fn tile_at_index(&self, idx: usize) -> &Tile {
        &self.tiles[idx]
    }

    /// Whether `p` is inside the grid and not blocking.
    #[inline]
    pub fn passable(&self, p: Point) -> bool {
        self.at(p).is_some_and(|t| !t.blocking)
    }

    /// Turn the tile at `p` into a wall.
    pub fn set_blocking(&mut self, p: Point) -> Result<()> {
        let i = self.index(p).ok_or(NavError::InvalidCoordinate(p))?;
        self.tiles[i] = Tile::blocking(p);
        Ok(())
    }

    /// Make the tile at `p` passable with the given movement cost.
    pub fn set_cost(&mut self, p: Point, cost: i32) -> Result<()> {
        let i = self.index(p).ok_or(NavError::InvalidCoordinate(p))?;
        self.tiles[i] = Tile::passable(p, cost)?;
        Ok(())
    }

    /// Row-major iterator over all tiles.
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.tiles.iter()
    }

    /// Smallest movement cost among passable tiles, `None` if every tile
    /// blocks.
    pub fn min_passable_cost(&self) -> Option<i32> {
        self.tiles
            .iter()
            .filter(|t| !t.blocking)
            .map(|t| t.movement_cost)
            .min()
    }

    /// Passable neighbors of `p`: up to four orthogonal ones first, then up
    /// to four diagonal ones. Out-of-bounds and blocking tiles are skipped.
    pub fn neighbors_of(&self, p: Point) -> impl Iterator<Item = Neighbor<'_>> {
        let orthogonal = ORTHOGONAL.into_iter().map(|d| (d, false));
        let diagonal = DIAGONAL.into_iter().map(|d| (d, true));
        orthogonal
            .chain(diagonal)
            .filter_map(move |(d, diagonal)| {
                let index = self.index(p + d)?;
                let tile = &self.tiles[index];
                (!tile.blocking).then_some(Neighbor {
                    tile,
                    index,
                    diagonal,
                })
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_bad_dimensions() {
        assert_eq!(
            TerrainGrid::new(0, 5, 1),
            Err(NavError::InvalidDimensions {
                width: 0,
                height: 5
            })
        );
        assert!(TerrainGrid::new(4, -2, 1).is_err());
    }

    #[test]
    fn rejects_negative_cost() {
        let err = TerrainGrid::new(3, 3, -1).unwrap_err();
        assert_eq!(
            err,
            NavError::NegativeCost {
                pos: Point::new(0, 0),
                cost: -1
            }
        );
        let mut g = TerrainGrid::new(3, 3, 1).unwrap();
        assert!(g.set_cost(Point::new(1, 1), -4).is_err());
        assert_eq!(g.at(Point::new(1, 1)).unwrap().movement_cost(), 1);
    }

    #[test]
    fn rejects_cost_above_cap() {
        assert_eq!(
            TerrainGrid::new(4, 1, 200_000_000),
            Err(NavError::CostTooHigh {
                pos: Point::new(0, 0),
                cost: 200_000_000
            })
        );
        let mut g = TerrainGrid::new(3, 3, MAX_MOVEMENT_COST).unwrap();
        assert!(g.set_cost(Point::new(1, 1), MAX_MOVEMENT_COST + 1).is_err());
        assert_eq!(g.min_passable_cost(), Some(MAX_MOVEMENT_COST));
    }

    #[test]
    fn index_round_trip_is_row_major() {
        let g = TerrainGrid::new(10, 4, 1).unwrap();
        let p = Point::new(7, 2);
        assert_eq!(g.index(p), Some(27));
        assert_eq!(g.point(27), p);
        assert_eq!(g.index(Point::new(10, 0)), None);
        assert_eq!(
            g.tile(Point::new(-1, 0)),
            Err(NavError::InvalidCoordinate(Point::new(-1, 0)))
        );
    }

    #[test]
    fn walled_blocks_perimeter_only() {
        let g = TerrainGrid::walled(5, 4, 2).unwrap();
        for t in g.iter() {
            let p = t.coordinate();
            assert_eq!(t.is_blocking(), g.bounds().on_border(p), "at {p}");
        }
        assert_eq!(g.min_passable_cost(), Some(2));
    }

    #[test]
    fn min_passable_cost_ignores_walls() {
        let mut g = TerrainGrid::new(3, 1, 4).unwrap();
        assert_eq!(g.min_passable_cost(), Some(4));
        g.set_cost(Point::new(1, 0), 0).unwrap();
        assert_eq!(g.min_passable_cost(), Some(0));
        for x in 0..3 {
            g.set_blocking(Point::new(x, 0)).unwrap();
        }
        assert_eq!(g.min_passable_cost(), None);
    }

    #[test]
    fn open_interior_has_eight_neighbors() {
        let g = TerrainGrid::new(5, 5, 1).unwrap();
        let ns: Vec<_> = g.neighbors_of(Point::new(2, 2)).collect();
        assert_eq!(ns.len(), 8);
        assert!(ns[..4].iter().all(|n| !n.diagonal));
        assert!(ns[4..].iter().all(|n| n.diagonal));
        for n in &ns {
            assert!(Point::new(2, 2).is_adjacent(n.tile.coordinate()));
            assert_eq!(g.index(n.tile.coordinate()), Some(n.index));
        }
    }

    #[test]
    fn corner_neighbors_are_clipped() {
        let g = TerrainGrid::new(5, 5, 1).unwrap();
        let ns: Vec<_> = g.neighbors_of(Point::new(0, 0)).collect();
        assert_eq!(ns.len(), 3);
        assert_eq!(ns.iter().filter(|n| n.diagonal).count(), 1);
    }

    #[test]
    fn blocking_neighbors_are_omitted() {
        let mut g = TerrainGrid::new(3, 3, 1).unwrap();
        g.set_blocking(Point::new(2, 1)).unwrap();
        g.set_blocking(Point::new(0, 0)).unwrap();
        let pts: Vec<_> = g
            .neighbors_of(Point::new(1, 1))
            .map(|n| n.tile.coordinate())
            .collect();
        assert_eq!(pts.len(), 6);
        assert!(!pts.contains(&Point::new(2, 1)));
        assert!(!pts.contains(&Point::new(0, 0)));
    }

    #[test]
    fn neighbors_reference_grid_storage() {
        let g = TerrainGrid::new(3, 3, 1).unwrap();
        let n = g.neighbors_of(Point::new(0, 0)).next().unwrap();
        assert!(std::ptr::eq(n.tile, g.tile_at_index(n.index)));
    }
}
