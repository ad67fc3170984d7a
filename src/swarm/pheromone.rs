//! Pheromone Decay
//!
//! Trails evaporate by relaxing every cell a fixed step toward neutral.

use super::grid::{GridMap, NEUTRAL};
use rayon::prelude::*;

/// One evaporation pass: move each cell `amount` toward neutral without crossing it.
///
/// Cells are independent, so the pass is order-free and runs row-parallel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecayStep {
    pub amount: u8,
}

impl DecayStep {
    pub fn new(amount: u8) -> Self {
        DecayStep { amount }
    }

    #[inline]
    pub fn relax(&self, cell: u8) -> u8 {
        if cell > NEUTRAL {
            cell.saturating_sub(self.amount).max(NEUTRAL)
        } else if cell < NEUTRAL {
            cell.saturating_add(self.amount).min(NEUTRAL)
        } else {
            cell
        }
    }

    /// Apply the step to the whole grid. Returns the number of cells that moved.
    pub fn apply(&self, grid: &mut GridMap) -> usize {
        let size = grid.size().max(1);
        grid.cells_mut()
            .par_chunks_mut(size)
            .map(|row| {
                let mut moved = 0usize;
                for cell in row.iter_mut() {
                    let next = self.relax(*cell);
                    if next != *cell {
                        *cell = next;
                        moved += 1;
                    }
                }
                moved
            })
            .sum()
    }
}

impl Default for DecayStep {
    fn default() -> Self {
        Self::new(1)
    }
}
