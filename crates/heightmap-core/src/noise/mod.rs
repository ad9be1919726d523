//! Layered gradient noise.
//!
//! Each cell sums `octaves` samples of a smooth 2D noise field, starting at
//! `base_frequency`/`base_amplitude` and scaling both per octave. Sample
//! coordinates are the raw cell indices times the octave frequency.
pub mod params;

use log::debug;
use noise::{NoiseFn, Simplex};

use crate::grid::Grid;
use crate::rng::RandomSource;
use params::NoiseParams;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayeredNoise {
    pub params: NoiseParams,
}

impl LayeredNoise {
    pub fn new(params: NoiseParams) -> Self {
        Self { params }
    }

    /// Overwrite `grid` using a `Simplex` field seeded from `rng`.
    pub fn fill<R: RandomSource + ?Sized>(&self, grid: &mut Grid, rng: &mut R) {
        let seed = rng.next_seed();
        debug!("layered noise: simplex seed {seed}, {} octaves", self.params.octaves);
        self.fill_with(grid, &Simplex::new(seed));
    }

    /// Overwrite `grid` by sampling an arbitrary noise field.
    pub fn fill_with<N: NoiseFn<f64, 2>>(&self, grid: &mut Grid, field: &N) {
        let size = grid.size();
        for x in 0..size {
            for y in 0..size {
                grid.set(x, y, self.sample(field, x as f64, y as f64));
            }
        }
    }

    /// Summed octaves at cell coordinates `(x, y)`.
    pub fn sample<N: NoiseFn<f64, 2>>(&self, field: &N, x: f64, y: f64) -> f64 {
        let p = &self.params;
        let mut height = 0.0;
        let mut frequency = p.base_frequency;
        let mut amplitude = p.base_amplitude;
        for _ in 0..p.octaves {
            height += field.get([x * frequency, y * frequency]) * amplitude;
            frequency *= p.lacunarity;
            amplitude *= p.gain;
        }
        height
    }
}
