use log::{debug, trace};
use tilenav_core::{NavError, Point, Result, TerrainGrid, Tile};

use crate::distance::{octile, step_cost};
use crate::pathfinder::{NO_PARENT, Path, Pathfinder};

/// One-shot octile A* between two tiles of `terrain`.
///
/// Convenience wrapper allocating a fresh [`Pathfinder`]; reuse a
/// `Pathfinder` for repeated queries.
pub fn find_path(terrain: &TerrainGrid, start: &Tile, goal: &Tile) -> Result<Path> {
    Pathfinder::for_terrain(terrain).find_path(terrain, start.coordinate(), goal.coordinate())
}

impl Pathfinder {
    /// Compute the cheapest path from `from` to `to` with the octile
    /// heuristic.
    ///
    /// The heuristic is multiplied by the smallest movement cost found on
    /// the terrain, so it never overestimates: on grids containing
    /// zero-cost tiles the search falls back to plain Dijkstra and the
    /// result stays optimal.
    ///
    /// Returns an empty [`Path`] if the goal cannot be reached or the start
    /// tile is blocking, and [`NavError::InvalidCoordinate`] if either
    /// endpoint is off the grid.
    pub fn find_path(&mut self, terrain: &TerrainGrid, from: Point, to: Point) -> Result<Path> {
        let scale = terrain.min_passable_cost().unwrap_or(0);
        self.find_path_with(terrain, from, to, |a, b| octile(a, b).saturating_mul(scale))
    }

    /// Compute a path from `from` to `to` using a caller-supplied heuristic.
    ///
    /// `heuristic(p, goal)` estimates the remaining cost on the 10/14 scale.
    /// The result is optimal only if it never overestimates.
    pub fn find_path_with<H>(
        &mut self,
        terrain: &TerrainGrid,
        from: Point,
        to: Point,
        heuristic: H,
    ) -> Result<Path>
    where
        H: Fn(Point, Point) -> i32,
    {
        let start_idx = terrain.index(from).ok_or(NavError::InvalidCoordinate(from))?;
        let goal_idx = terrain.index(to).ok_or(NavError::InvalidCoordinate(to))?;

        let cur_gen = self.begin(terrain);

        {
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.parent = NO_PARENT;
            node.generation = cur_gen;
            node.visited = true;
        }

        if start_idx == goal_idx {
            return Ok(Path::new(vec![*terrain.tile_at_index(start_idx)], 0));
        }
        if terrain.tile_at_index(start_idx).is_blocking() {
            debug!("astar: start {from} is blocking");
            return Ok(Path::empty());
        }

        debug!("astar: searching {from} -> {to}");
        self.open.push(start_idx, heuristic(from, to));

        let mut expanded = 0usize;
        while let Some((ci, f)) = self.open.pop_min() {
            if ci == goal_idx {
                let path = self.reconstruct(terrain, ci);
                debug!(
                    "astar: reached {to} with cost {} in {} steps ({expanded} expansions)",
                    path.cost(),
                    path.len() - 1
                );
                return Ok(path);
            }

            expanded += 1;
            let current_g = self.nodes[ci].g;
            let current_point = terrain.point(ci);
            trace!("astar: expand {current_point} g={current_g} f={f}");

            for n in terrain.neighbors_of(current_point) {
                let tentative_g =
                    current_g.saturating_add(step_cost(n.tile.movement_cost(), n.diagonal));

                let node = &mut self.nodes[n.index];
                if node.generation == cur_gen {
                    if tentative_g >= node.g {
                        continue;
                    }
                } else {
                    node.generation = cur_gen;
                    node.visited = false;
                }

                node.g = tentative_g;
                node.parent = ci;
                let nf = tentative_g.saturating_add(heuristic(n.tile.coordinate(), to));

                if self.open.contains(n.index) {
                    self.open.update_priority(n.index, nf);
                } else {
                    if node.visited {
                        trace!("astar: reopen {}", n.tile.coordinate());
                    }
                    node.visited = true;
                    self.open.push(n.index, nf);
                }
            }
        }

        debug!("astar: no path {from} -> {to} ({expanded} expansions)");
        Ok(Path::empty())
    }

    /// Walk the parent chain back from `goal_idx` and return the path in
    /// start-to-goal order.
    fn reconstruct(&self, terrain: &TerrainGrid, goal_idx: usize) -> Path {
        let mut tiles = Vec::new();
        let mut ci = goal_idx;
        while ci != NO_PARENT {
            tiles.push(*terrain.tile_at_index(ci));
            ci = self.nodes[ci].parent;
        }
        tiles.reverse();
        Path::new(tiles, self.nodes[goal_idx].g)
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn path_round_trip() {
        let t = TerrainGrid::walled(6, 6, 2).unwrap();
        let path = Pathfinder::for_terrain(&t)
            .find_path(&t, Point::new(1, 1), Point::new(4, 2))
            .unwrap();
        let json = serde_json::to_string(&path).unwrap();
        let back: Path = serde_json::from_str(&json).unwrap();
        assert_eq!(path, back);
    }
}
