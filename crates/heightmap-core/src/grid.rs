/// A square heightmap of `size × size` cells, stored flat.
///
/// Every component addresses cells through [`Grid::index`], so generation and
/// rendering agree on one `(x, y)` convention: `x` selects the stripe of
/// `size` values, `y` the offset inside it.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Vec<f64>,
    size: usize,
}

impl Grid {
    /// Create a zero-filled grid of `size × size` cells.
    pub fn new(size: usize) -> Self {
        Self { cells: vec![0.0; size * size], size }
    }

    /// Grid for exponent `n`: `2^n + 1` cells per side.
    pub fn with_exponent(n: u32) -> Self {
        Self::new((1usize << n) + 1)
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        self.size * x + y
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.cells[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, val: f64) {
        let i = self.index(x, y);
        self.cells[i] = val;
    }

    /// Bounds-checked read with signed coordinates.
    /// Returns `None` for any cell outside the grid instead of wrapping.
    pub fn try_get(&self, x: isize, y: isize) -> Option<f64> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        if x >= self.size || y >= self.size {
            return None;
        }
        Some(self.get(x, y))
    }

    pub fn fill(&mut self, val: f64) {
        self.cells.fill(val);
    }

    /// Cells per side.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Total number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat read-only view in index order.
    pub fn cells(&self) -> &[f64] {
        &self.cells
    }

    pub fn min_height(&self) -> f64 {
        self.cells.iter().cloned().fold(f64::INFINITY, f64::min)
    }

    pub fn max_height(&self) -> f64 {
        self.cells.iter().cloned().fold(f64::NEG_INFINITY, f64::max)
    }
}
