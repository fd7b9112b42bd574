//! Plain-text rendering of terrains, paths and visible sets.

use tilenav_core::{TerrainGrid, Tile};
use tilenav_paths::Path;

use crate::fov::VisibleSet;

const WALL: char = '#';
const PATH: char = '*';
const SEEN: char = '.';
const UNSEEN: char = ' ';

/// Glyph of a passable tile: its movement cost, `+` above 9.
fn cost_rune(tile: &Tile) -> char {
    u32::try_from(tile.movement_cost())
        .ok()
        .and_then(|c| char::from_digit(c, 10))
        .unwrap_or('+')
}

fn render_with(terrain: &TerrainGrid, rune: impl Fn(usize, &Tile) -> char) -> String {
    let w = terrain.width() as usize;
    let mut out = String::with_capacity(terrain.len() + terrain.height() as usize);
    for (i, tile) in terrain.iter().enumerate() {
        out.push(rune(i, tile));
        if (i + 1) % w == 0 {
            out.push('\n');
        }
    }
    out
}

/// Draw `terrain` one row per line: `#` for walls, `*` for tiles on
/// `path`, and the movement cost digit elsewhere.
pub fn render_path(terrain: &TerrainGrid, path: &Path) -> String {
    let mut on_path = vec![false; terrain.len()];
    for i in path.points().filter_map(|p| terrain.index(p)) {
        on_path[i] = true;
    }
    render_with(terrain, |i, tile| {
        if tile.is_blocking() {
            WALL
        } else if on_path[i] {
            PATH
        } else {
            cost_rune(tile)
        }
    })
}

/// Draw the visible part of `terrain`: `#` for seen walls, `.` for seen
/// floor, blank for everything else.
pub fn render_visible(terrain: &TerrainGrid, visible: &VisibleSet<'_>) -> String {
    render_with(terrain, |i, tile| {
        let p = terrain.point(i);
        match (visible.contains(p), tile.is_blocking()) {
            (false, _) => UNSEEN,
            (true, true) => WALL,
            (true, false) => SEEN,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fov::compute_visible;
    use tilenav_core::Point;
    use tilenav_paths::Pathfinder;

    #[test]
    fn path_overlay() {
        let mut t = TerrainGrid::walled(5, 4, 1).unwrap();
        t.set_cost(Point::new(3, 2), 7).unwrap();
        t.set_cost(Point::new(2, 2), 12).unwrap();
        let path = Pathfinder::for_terrain(&t)
            .find_path(&t, Point::new(1, 1), Point::new(3, 1))
            .unwrap();
        let expected = "\
#####
#***#
#1+7#
#####
";
        assert_eq!(render_path(&t, &path), expected);
    }

    #[test]
    fn empty_path_shows_costs() {
        let t = TerrainGrid::walled(4, 3, 3).unwrap();
        assert_eq!(render_path(&t, &Path::empty()), "####\n#33#\n####\n");
    }

    #[test]
    fn visibility_overlay() {
        let t = TerrainGrid::walled(5, 5, 1).unwrap();
        let v = compute_visible(&t, Point::new(1, 2), 2).unwrap();
        let out = render_visible(&t, &v);
        let rows: Vec<_> = out.lines().collect();
        assert_eq!(rows.len(), 5);
        assert_eq!(rows[2], "#..  ");
        assert!(rows[4].chars().all(|c| c == UNSEEN || c == WALL));
    }
}
