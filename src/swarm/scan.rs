//! Cone Scanner
//!
//! Recovers a heading toward the strongest attractive (sub-neutral) signal by
//! casting one ray per degree across a cone and averaging the cells each ray
//! crosses. The cheapest ray wins.

use super::grid::{GridMap, NEUTRAL};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of a cone scan.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScanResult {
    /// A ray averaged below neutral.
    pub found: bool,
    /// Bearing of the cheapest ray, or the caller's heading when nothing was found.
    pub heading_deg: f32,
}

/// 8-connected Bresenham walk from (x0, y0) to (x1, y1), both ends included.
#[derive(Clone, Debug)]
pub struct LineCells {
    x: i32,
    y: i32,
    x1: i32,
    y1: i32,
    dx: i32,
    dy: i32,
    sx: i32,
    sy: i32,
    err: i32,
    done: bool,
}

impl LineCells {
    pub fn new(x0: i32, y0: i32, x1: i32, y1: i32) -> Self {
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        LineCells {
            x: x0,
            y: y0,
            x1,
            y1,
            dx,
            dy,
            sx: if x0 < x1 { 1 } else { -1 },
            sy: if y0 < y1 { 1 } else { -1 },
            err: dx + dy,
            done: false,
        }
    }
}

impl Iterator for LineCells {
    type Item = (i32, i32);

    fn next(&mut self) -> Option<(i32, i32)> {
        if self.done {
            return None;
        }
        let current = (self.x, self.y);
        if self.x == self.x1 && self.y == self.y1 {
            self.done = true;
            return Some(current);
        }
        let e2 = 2 * self.err;
        if e2 >= self.dy {
            self.err += self.dy;
            self.x += self.sx;
        }
        if e2 <= self.dx {
            self.err += self.dx;
            self.y += self.sy;
        }
        Some(current)
    }
}

/// Mean intensity of the in-grid cells on the segment (x0, y0) → (x1, y1).
/// Cells that fall outside the grid are skipped; `None` if none remain.
pub fn ray_cost(grid: &GridMap, x0: i32, y0: i32, x1: i32, y1: i32) -> Option<f64> {
    let mut total = 0u64;
    let mut count = 0u64;
    for (x, y) in LineCells::new(x0, y0, x1, y1) {
        if let Some(v) = grid.get_signed(y, x) {
            total += v as u64;
            count += 1;
        }
    }
    if count == 0 {
        None
    } else {
        Some(total as f64 / count as f64)
    }
}

/// Angular ray-sampling search over one grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConeScanner {
    /// Ray length in cells
    pub radius: i32,
}

impl ConeScanner {
    pub fn new(radius: i32) -> Self {
        ConeScanner {
            radius: radius.max(0),
        }
    }

    /// Keep the whole ray fan on the map: `[radius, size − radius]`.
    /// When the window is inverted the lower bound wins.
    fn clamp_origin(&self, coord: i32, size: usize) -> i32 {
        let lo = self.radius;
        let hi = size as i32 - self.radius;
        coord.min(hi).max(lo)
    }

    /// Scan `heading ± half_angle` degrees from (origin_x, origin_y) = (column, row).
    pub fn scan(
        &self,
        grid: &GridMap,
        origin_x: i32,
        origin_y: i32,
        heading_deg: f32,
        half_angle_deg: f32,
    ) -> ScanResult {
        let x0 = self.clamp_origin(origin_x, grid.size());
        let y0 = self.clamp_origin(origin_y, grid.size());

        let heading = heading_deg as f64;
        let half = half_angle_deg as f64;
        let min_angle = (heading - half).round_ties_even() as i32;
        let mut max_angle = (heading + half).round_ties_even() as i32;
        if max_angle == min_angle {
            // Degenerate cone still casts the heading ray.
            max_angle = min_angle + 1;
        }
        // Angles a full turn apart cast identical rays and can never beat the first.
        let max_angle = max_angle.min(min_angle.saturating_add(360));

        let radius = self.radius as f64;
        let mut min_cost = f64::INFINITY;
        let (mut min_dx, mut min_dy) = (0i32, 0i32);

        for angle in min_angle..max_angle {
            let theta = (angle as f64).to_radians();
            let dx = (radius * theta.cos()).round() as i32;
            let dy = (radius * theta.sin()).round() as i32;

            let Some(cost) = ray_cost(grid, x0, y0, x0 + dx, y0 + dy) else {
                continue;
            };
            // Strict: on a tie the lowest angle keeps the slot.
            if cost < min_cost {
                min_cost = cost;
                min_dx = dx;
                min_dy = dy;
            }
        }

        let found = min_cost < NEUTRAL as f64;
        if found {
            let bearing = (min_dy as f64).atan2(min_dx as f64).to_degrees() as f32;
            debug!(
                "[Scan] Trail found from ({}, {}): offset ({}, {}), heading {:.1}, min cost {:.2}",
                x0, y0, min_dx, min_dy, bearing, min_cost
            );
            ScanResult {
                found: true,
                heading_deg: bearing,
            }
        } else {
            debug!("[Scan] Trail lost from ({}, {}). Min cost: {:.2}", x0, y0, min_cost);
            ScanResult {
                found: false,
                heading_deg,
            }
        }
    }
}

impl Default for ConeScanner {
    fn default() -> Self {
        Self::new(20)
    }
}
