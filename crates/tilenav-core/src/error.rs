use thiserror::Error;

use crate::geom::Point;

/// Errors reported for invalid input to the terrain model, the pathfinder
/// or the visibility scanner.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavError {
    /// A coordinate lies outside the terrain bounds.
    #[error("coordinate {0} is outside the terrain")]
    InvalidCoordinate(Point),
    /// Grid dimensions must both be positive.
    #[error("invalid terrain dimensions {width}x{height}")]
    InvalidDimensions { width: i32, height: i32 },
    /// Movement costs are non-negative.
    #[error("negative movement cost {cost} at {pos}")]
    NegativeCost { pos: Point, cost: i32 },
    /// Movement costs are capped at [`MAX_MOVEMENT_COST`](crate::terrain::MAX_MOVEMENT_COST).
    #[error("movement cost {cost} at {pos} exceeds the maximum")]
    CostTooHigh { pos: Point, cost: i32 },
    /// Stored tiles do not cover the grid bounds one to one.
    #[error("terrain has {found} tiles, expected {expected}")]
    TileCountMismatch { expected: usize, found: usize },
    /// View radius must be at least 1.
    #[error("invalid view radius {0}")]
    InvalidRadius(i32),
    /// Generation cost bounds are inverted or negative.
    #[error("invalid movement cost range [{min}, {max}]")]
    InvalidCostRange { min: i32, max: i32 },
}

/// Result alias using [`NavError`].
pub type Result<T> = std::result::Result<T, NavError>;
