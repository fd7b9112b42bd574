use tilenav_core::{Point, Range, TerrainGrid, Tile};

use crate::queue::PriorityQueue;

/// An ordered walk from start to goal, both included.
///
/// An empty path means the goal could not be reached.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    tiles: Vec<Tile>,
    cost: i32,
}

impl Path {
    pub(crate) fn new(tiles: Vec<Tile>, cost: i32) -> Self {
        Self { tiles, cost }
    }

    /// The "no path found" value.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Tile snapshots in traversal order.
    #[inline]
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Total scaled cost of the walk (0 for empty and single-tile paths).
    #[inline]
    pub fn cost(&self) -> i32 {
        self.cost
    }

    /// Number of tiles, endpoints included.
    #[inline]
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn start(&self) -> Option<&Tile> {
        self.tiles.first()
    }

    pub fn goal(&self) -> Option<&Tile> {
        self.tiles.last()
    }

    /// Coordinates in traversal order.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.tiles.iter().map(Tile::coordinate)
    }

    /// Whether the path passes through `p`.
    pub fn contains(&self, p: Point) -> bool {
        self.points().any(|q| q == p)
    }
}

// ---------------------------------------------------------------------------
// Per-search side table
// ---------------------------------------------------------------------------

pub(crate) const NO_PARENT: usize = usize::MAX;

/// Search state of one tile. Only meaningful when `generation` equals the
/// pathfinder's current generation; otherwise the best known cost is
/// unknown.
#[derive(Clone)]
pub(crate) struct Node {
    pub(crate) g: i32,
    pub(crate) parent: usize,
    pub(crate) generation: u32,
    /// Whether the tile has ever been enqueued during this generation.
    pub(crate) visited: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            parent: NO_PARENT,
            generation: 0,
            visited: false,
        }
    }
}

/// Reusable A* driver for grids of a given size.
///
/// `Pathfinder` owns the search side tables (best known costs, parents,
/// visited flags) and the open queue, so that repeated searches allocate
/// nothing after the first one and the terrain is only ever borrowed
/// immutably. Concurrent searches over one grid each need their own
/// `Pathfinder`.
pub struct Pathfinder {
    pub(crate) bounds: Range,
    pub(crate) nodes: Vec<Node>,
    pub(crate) generation: u32,
    pub(crate) open: PriorityQueue,
}

impl Pathfinder {
    /// Create a pathfinder sized for the given grid rectangle.
    pub fn new(bounds: Range) -> Self {
        let len = bounds.len();
        Self {
            bounds,
            nodes: vec![Node::default(); len],
            generation: 0,
            open: PriorityQueue::with_capacity(len),
        }
    }

    /// Create a pathfinder sized for `terrain`.
    pub fn for_terrain(terrain: &TerrainGrid) -> Self {
        Self::new(terrain.bounds())
    }

    /// The grid rectangle the side tables are sized for.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Best known cost to `p` from the last search, `None` if the tile was
    /// never reached (or lies outside the bounds).
    pub fn best_known_cost(&self, p: Point) -> Option<i32> {
        if self.generation == 0 || !self.bounds.contains(p) {
            return None;
        }
        let q = p - self.bounds.min;
        let n = &self.nodes[(q.y * self.bounds.width() + q.x) as usize];
        (n.generation == self.generation).then_some(n.g)
    }

    /// Start a new search over `terrain`: resize the side tables if the grid
    /// changed and invalidate every node by bumping the generation.
    pub(crate) fn begin(&mut self, terrain: &TerrainGrid) -> u32 {
        let len = terrain.len();
        self.bounds = terrain.bounds();
        if self.nodes.len() < len {
            self.nodes.clear();
            self.nodes.resize(len, Node::default());
            self.generation = 0;
        }
        self.open.clear();
        self.generation = self.generation.wrapping_add(1);
        if self.generation == 0 {
            // Wrapped around: stale nodes could now look current.
            for n in &mut self.nodes {
                *n = Node::default();
            }
            self.generation = 1;
        }
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn begin_grows_tables() {
        let mut pf = Pathfinder::new(Range::new(0, 0, 3, 3));
        assert_eq!(pf.nodes.len(), 9);
        let terrain = TerrainGrid::new(6, 5, 1).unwrap();
        let g = pf.begin(&terrain);
        assert_eq!(g, 1);
        assert_eq!(pf.nodes.len(), 30);
        assert_eq!(pf.bounds(), terrain.bounds());
    }

    #[test]
    fn begin_keeps_larger_tables() {
        let mut pf = Pathfinder::new(Range::new(0, 0, 10, 10));
        let terrain = TerrainGrid::new(4, 4, 1).unwrap();
        pf.begin(&terrain);
        assert_eq!(pf.nodes.len(), 100);
        assert_eq!(pf.bounds().width(), 4);
    }

    #[test]
    fn generation_wrap_resets_nodes() {
        let terrain = TerrainGrid::new(2, 2, 1).unwrap();
        let mut pf = Pathfinder::for_terrain(&terrain);
        pf.generation = u32::MAX;
        pf.nodes[0].generation = 1;
        pf.nodes[0].g = 77;
        assert_eq!(pf.begin(&terrain), 1);
        assert_eq!(pf.nodes[0].generation, 0);
        assert_eq!(pf.best_known_cost(Point::new(0, 0)), None);
    }

    #[test]
    fn fresh_pathfinder_knows_nothing() {
        let pf = Pathfinder::new(Range::new(0, 0, 3, 3));
        assert_eq!(pf.best_known_cost(Point::new(1, 1)), None);
        assert_eq!(pf.best_known_cost(Point::new(9, 9)), None);
    }

    #[test]
    fn empty_path() {
        let p = Path::empty();
        assert!(p.is_empty());
        assert_eq!(p.cost(), 0);
        assert_eq!(p.start(), None);
    }
}
