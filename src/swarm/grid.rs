// grid.rs: Fixed square intensity grid.
//
// Row = spatial Y, column = spatial X.  One byte per cell, row-major.
// Every cell stays in [0, CEILING]; writes clamp, they never fail.

/// Side length of every world map.
pub const MAP_SIZE: usize = 300;
/// Baseline cell value: below is attractive, above is repulsive.
pub const NEUTRAL: u8 = 128;
/// Highest value a cell may hold.
pub const CEILING: u8 = 254;
/// Cell (x, y) of the agent frame origin.
pub const ORIGIN: (usize, usize) = (MAP_SIZE / 2, MAP_SIZE / 2);

/// Rounded Euclidean distance between two cells (circular blobs, not city-block).
#[inline]
pub fn cell_distance(dx: i32, dy: i32) -> i32 {
    (dx as f64).hypot(dy as f64).round() as i32
}

/// Owning N×N byte grid with bounds-checked access.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridMap {
    cells: Box<[u8]>, // [size * size] row-major
    size: usize,
}

impl GridMap {
    /// All-neutral grid of side `size`.
    pub fn new(size: usize) -> Self {
        Self::filled(size, NEUTRAL)
    }

    pub fn filled(size: usize, value: u8) -> Self {
        GridMap {
            cells: vec![value.min(CEILING); size * size].into_boxed_slice(),
            size,
        }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Clamp a raw caller coordinate into `[0, size)`.
    #[inline]
    pub fn clamp_coord(&self, coord: i32) -> usize {
        coord.clamp(0, self.size as i32 - 1) as usize
    }

    #[inline(always)]
    fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.size && col < self.size {
            Some(row * self.size + col)
        } else {
            None
        }
    }

    /// Cell at (row, col), `None` outside the grid.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        self.index(row, col).map(|i| self.cells[i])
    }

    /// Signed lookup for ray sampling; negative coordinates are outside.
    #[inline]
    pub fn get_signed(&self, row: i32, col: i32) -> Option<u8> {
        if row < 0 || col < 0 {
            return None;
        }
        self.get(row as usize, col as usize)
    }

    /// Write a cell, clamping the value to the ceiling.
    /// Returns `false` when (row, col) lies outside the grid.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, value: u8) -> bool {
        match self.index(row, col) {
            Some(i) => {
                self.cells[i] = value.min(CEILING);
                true
            }
            None => false,
        }
    }

    /// `cell = clamp(cell + delta, 0, CEILING)`.
    #[inline]
    pub fn add_clamped(&mut self, row: usize, col: usize, delta: i32) -> bool {
        match self.index(row, col) {
            Some(i) => {
                let next = (self.cells[i] as i32 + delta).clamp(0, CEILING as i32);
                self.cells[i] = next as u8;
                true
            }
            None => false,
        }
    }

    /// Raw row-major bytes, ready for image encoding by a collaborator.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.cells
    }

    /// Mutable cells for whole-grid passes. Callers keep values within the ceiling.
    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [u8] {
        &mut self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.size)
    }

    /// True when every cell equals `value`.
    pub fn is_uniform(&self, value: u8) -> bool {
        self.cells.iter().all(|&c| c == value)
    }
}

impl Default for GridMap {
    fn default() -> Self {
        Self::new(MAP_SIZE)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
