use tilenav_core::Point;

/// Cost scale of an orthogonal step onto a tile of movement cost 1.
pub const CARDINAL_STEP: i32 = 10;

/// Cost scale of a diagonal step onto a tile of movement cost 1 (≈ 10·√2).
pub const DIAGONAL_STEP: i32 = 14;

/// Cost of entering a tile with the given movement cost.
#[inline]
pub fn step_cost(movement_cost: i32, diagonal: bool) -> i32 {
    if diagonal {
        movement_cost * DIAGONAL_STEP
    } else {
        movement_cost * CARDINAL_STEP
    }
}

/// Octile distance scaled by 10: `10·(dx + dy) − 6·min(dx, dy)`.
///
/// Equal to `10·max(dx, dy) + 4·min(dx, dy)`, the cost of the cheapest
/// 8-way walk over tiles of movement cost 1.
#[inline]
pub fn octile(a: Point, b: Point) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    CARDINAL_STEP * (dx + dy) + (DIAGONAL_STEP - 2 * CARDINAL_STEP) * dx.min(dy)
}

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}
