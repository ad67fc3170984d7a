//! Blob Painter
//!
//! Deposits one sensed event as a circular blob with linear radial falloff:
//! full `peak_cost` at the center, shrinking toward zero at the rim.

use super::grid::{cell_distance, GridMap};
use serde::{Deserialize, Serialize};

/// Which world layer a deposit lands in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FieldLayer {
    Obstacle,
    Pheromone,
    Target,
}

impl FieldLayer {
    pub const PHEROMONE_COST: i32 = -10;
    pub const OBSTACLE_COST: i32 = 20;
    pub const TARGET_COST: i32 = -100;

    /// Layer implied by the cost value of an `updateMap` request.
    /// Agents in the field still speak this convention; any other cost selects nothing.
    pub fn from_legacy_cost(cost: i32) -> Option<Self> {
        match cost {
            Self::PHEROMONE_COST => Some(FieldLayer::Pheromone),
            Self::OBSTACLE_COST => Some(FieldLayer::Obstacle),
            Self::TARGET_COST => Some(FieldLayer::Target),
            _ => None,
        }
    }

    /// Cost an agent sends to reach this layer through `updateMap`.
    pub fn legacy_cost(self) -> i32 {
        match self {
            FieldLayer::Pheromone => Self::PHEROMONE_COST,
            FieldLayer::Obstacle => Self::OBSTACLE_COST,
            FieldLayer::Target => Self::TARGET_COST,
        }
    }
}

/// `peak − peak·d/(radius+1)`, integer division truncating toward zero.
#[inline]
pub fn level_cost(peak_cost: i32, distance: i32, radius: i32) -> i32 {
    let peak = peak_cost as i64;
    let level = peak - peak * distance as i64 / (radius as i64 + 1);
    level.clamp(i32::MIN as i64, i32::MAX as i64) as i32
}

/// Paint a blob centred on (x, y) = (column, row). The centre is clamped into
/// the grid; the scan window is clamped to `[0, size-1]` on every side.
/// Returns the number of cells written.
pub fn paint_blob(grid: &mut GridMap, center_x: i32, center_y: i32, radius: i32, peak_cost: i32) -> usize {
    if radius < 0 || grid.size() == 0 {
        return 0;
    }
    let cx = grid.clamp_coord(center_x) as i32;
    let cy = grid.clamp_coord(center_y) as i32;
    let last = grid.size() as i32 - 1;

    let row_lo = cy.saturating_sub(radius).max(0);
    let row_hi = cy.saturating_add(radius).min(last);
    let col_lo = cx.saturating_sub(radius).max(0);
    let col_hi = cx.saturating_add(radius).min(last);

    let mut written = 0;
    for row in row_lo..=row_hi {
        for col in col_lo..=col_hi {
            let d = cell_distance(col - cx, row - cy);
            if d > radius {
                continue;
            }
            let level = level_cost(peak_cost, d, radius);
            if level != 0 && grid.add_clamped(row as usize, col as usize, level) {
                written += 1;
            }
        }
    }
    written
}
