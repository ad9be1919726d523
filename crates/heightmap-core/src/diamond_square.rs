//! Diamond-square midpoint displacement.
//!
//! Corners are seeded once, then each pass refines chunk centres (diamond
//! step) and chunk edge midpoints (square step) with a random offset whose
//! range halves along with the chunk size.
use log::{debug, warn};

use crate::grid::Grid;
use crate::rng::RandomSource;

/// Corner seed range and first-pass displacement used by the viewer.
pub const DEFAULT_INITIAL_RANGE: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiamondSquare {
    /// Corners are drawn from `[0, initial_range]`; the first pass displaces
    /// by up to `±initial_range`.
    pub initial_range: f64,
}

impl Default for DiamondSquare {
    fn default() -> Self {
        Self::new(DEFAULT_INITIAL_RANGE)
    }
}

impl DiamondSquare {
    pub fn new(initial_range: f64) -> Self {
        Self { initial_range }
    }

    /// Overwrite `grid` with a fractal heightmap.
    ///
    /// `grid.size()` must be `2^n + 1`. Returns the number of refinement
    /// passes run, which is `n`.
    pub fn fill<R: RandomSource + ?Sized>(&self, grid: &mut Grid, rng: &mut R) -> u32 {
        let size = grid.size();
        debug_assert!(size >= 3 && (size - 1).is_power_of_two(), "grid size {size} is not 2^n + 1");

        grid.fill(0.0);
        let last = size - 1;
        for (x, y) in [(0, last), (0, 0), (last, 0), (last, last)] {
            grid.set(x, y, rng.uniform(0.0, self.initial_range));
        }

        let mut chunk = last;
        let mut factor = self.initial_range;
        let mut passes = 0;
        while chunk > 1 {
            diamond_step(grid, chunk, factor, rng);
            square_step(grid, chunk, factor, rng);
            debug!("diamond-square pass {passes}: chunk {chunk}, displacement ±{factor}");
            chunk /= 2;
            factor /= 2.0;
            passes += 1;
        }
        passes
    }
}

/// Centre of every chunk from its four corners.
fn diamond_step<R: RandomSource + ?Sized>(grid: &mut Grid, chunk: usize, factor: f64, rng: &mut R) {
    let half = chunk / 2;
    let last = grid.size() - 1;
    for x in (0..last).step_by(chunk) {
        for y in (0..last).step_by(chunk) {
            let avg = finite_mean([
                neighbour(grid, x, y, 0, 0),
                neighbour(grid, x, y, chunk as isize, 0),
                neighbour(grid, x, y, 0, chunk as isize),
                neighbour(grid, x, y, chunk as isize, chunk as isize),
            ]);
            displace(grid, x + half, y + half, avg, factor, rng);
        }
    }
}

/// Edge midpoints from their up/down/left/right neighbours.
/// Off-grid neighbours are absent, never wrapped.
fn square_step<R: RandomSource + ?Sized>(grid: &mut Grid, chunk: usize, factor: f64, rng: &mut R) {
    let half = chunk / 2;
    let size = grid.size();
    let h = half as isize;
    for x in (0..size).step_by(half) {
        for y in ((x + half) % chunk..size).step_by(chunk) {
            let avg = finite_mean([
                neighbour(grid, x, y, h, 0),
                neighbour(grid, x, y, 0, -h),
                neighbour(grid, x, y, -h, 0),
                neighbour(grid, x, y, 0, h),
            ]);
            displace(grid, x, y, avg, factor, rng);
        }
    }
}

#[inline]
fn neighbour(grid: &Grid, x: usize, y: usize, dx: isize, dy: isize) -> Option<f64> {
    grid.try_get(x as isize + dx, y as isize + dy)
}

fn displace<R: RandomSource + ?Sized>(
    grid: &mut Grid,
    x: usize,
    y: usize,
    avg: Option<f64>,
    factor: f64,
    rng: &mut R,
) {
    let value = match avg {
        Some(avg) => avg + rng.uniform(-factor, factor),
        None => {
            warn!("no finite neighbours around ({x}, {y}); writing 0");
            0.0
        }
    };
    grid.set(x, y, value);
}

/// Mean of the present, finite values; `None` when there are none.
fn finite_mean<const N: usize>(values: [Option<f64>; N]) -> Option<f64> {
    let (sum, count) = values
        .into_iter()
        .flatten()
        .filter(|v| v.is_finite())
        .fold((0.0, 0u32), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SeededRng;

    /// Every draw is 0.
    struct ZeroSource;

    impl RandomSource for ZeroSource {
        fn uniform(&mut self, _low: f64, _high: f64) -> f64 {
            0.0
        }

        fn next_seed(&mut self) -> u32 {
            0
        }
    }

    /// Wraps a seeded source and remembers every value it handed out.
    struct Recording {
        inner: SeededRng,
        drawn: Vec<f64>,
    }

    impl RandomSource for Recording {
        fn uniform(&mut self, low: f64, high: f64) -> f64 {
            let v = self.inner.uniform(low, high);
            self.drawn.push(v);
            v
        }

        fn next_seed(&mut self) -> u32 {
            self.inner.next_seed()
        }
    }

    #[test]
    fn zero_source_gives_flat_zero_map() {
        let mut grid = Grid::with_exponent(2);
        assert_eq!(grid.size(), 5);
        DiamondSquare::default().fill(&mut grid, &mut ZeroSource);
        assert!(grid.cells().iter().all(|&v| v == 0.0));
    }

    #[test]
    fn runs_exactly_n_passes() {
        for n in 1..=8 {
            let mut grid = Grid::with_exponent(n);
            let passes = DiamondSquare::default().fill(&mut grid, &mut SeededRng::new(3));
            assert_eq!(passes, n);
        }
    }

    #[test]
    fn corners_keep_their_seeded_values() {
        let mut grid = Grid::with_exponent(5);
        let mut rng = Recording { inner: SeededRng::new(11), drawn: Vec::new() };
        DiamondSquare::default().fill(&mut grid, &mut rng);

        let last = grid.size() - 1;
        let seeded = &rng.drawn[..4];
        assert_eq!(grid.get(0, last), seeded[0]);
        assert_eq!(grid.get(0, 0), seeded[1]);
        assert_eq!(grid.get(last, 0), seeded[2]);
        assert_eq!(grid.get(last, last), seeded[3]);
        assert!(seeded.iter().all(|v| (0.0..=DEFAULT_INITIAL_RANGE).contains(v)));
    }

    #[test]
    fn every_cell_gets_exactly_one_draw() {
        for n in 1..=6 {
            let mut grid = Grid::with_exponent(n);
            let mut rng = Recording { inner: SeededRng::new(99), drawn: Vec::new() };
            DiamondSquare::default().fill(&mut grid, &mut rng);
            // Four corner seeds plus one displacement per remaining cell.
            assert_eq!(rng.drawn.len(), grid.len(), "exponent {n}");
            assert!(grid.cells().iter().all(|v| v.is_finite()));
        }
    }

    #[test]
    fn same_seed_is_bit_identical() {
        let mut a = Grid::with_exponent(6);
        let mut b = Grid::with_exponent(6);
        DiamondSquare::default().fill(&mut a, &mut SeededRng::new(5));
        DiamondSquare::default().fill(&mut b, &mut SeededRng::new(5));
        let bits = |g: &Grid| g.cells().iter().map(|v| v.to_bits()).collect::<Vec<_>>();
        assert_eq!(bits(&a), bits(&b));
    }

    #[test]
    fn seeded_output_is_not_flat() {
        let mut grid = Grid::with_exponent(5);
        DiamondSquare::default().fill(&mut grid, &mut SeededRng::new(42));
        assert!(grid.max_height() - grid.min_height() > 1.0);
    }

    #[test]
    fn mean_skips_absent_and_non_finite() {
        assert_eq!(finite_mean([Some(2.0), None, Some(f64::NAN), Some(4.0)]), Some(3.0));
        assert_eq!(finite_mean([Some(f64::INFINITY), None]), None);
        assert_eq!(finite_mean::<4>([None; 4]), None);
    }

    #[test]
    fn square_step_at_edge_averages_in_bounds_only() {
        let mut grid = Grid::new(3);
        grid.set(0, 0, 2.0);
        grid.set(0, 2, 4.0);
        grid.set(1, 1, 6.0);
        square_step(&mut grid, 2, 0.0, &mut ZeroSource);
        // (0, 1): neighbours (1,1)=6, (0,0)=2, (0,2)=4; (-1,1) is off-grid.
        assert_eq!(grid.get(0, 1), 4.0);
    }
}
