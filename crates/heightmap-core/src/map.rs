//! The viewer's map: one grid, its tile size, and how it was last generated.

use std::fmt;
use std::str::FromStr;

use log::info;
use serde::{Deserialize, Serialize};

use crate::classify::{height_color, Color, Terrain};
use crate::diamond_square::{DiamondSquare, DEFAULT_INITIAL_RANGE};
use crate::error::MapError;
use crate::grid::Grid;
use crate::noise::{params::NoiseParams, LayeredNoise};
use crate::rng::RandomSource;
use crate::viewport::{Offset, Surface, VisibleTiles};

/// Largest supported exponent: 4097 × 4097 cells.
pub const MAX_EXPONENT: u32 = 12;

// ── Generation kind ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GenerationKind {
    DiamondSquare,
    #[serde(alias = "perlin-noise")]
    GradientNoise,
}

impl GenerationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            GenerationKind::DiamondSquare => "diamond-square",
            GenerationKind::GradientNoise => "gradient-noise",
        }
    }
}

impl fmt::Display for GenerationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GenerationKind {
    type Err = MapError;

    /// Accepts the canonical names plus the old `"perlin-noise"` form value.
    fn from_str(s: &str) -> Result<Self, MapError> {
        match s {
            "diamond-square" => Ok(GenerationKind::DiamondSquare),
            "gradient-noise" | "perlin-noise" => Ok(GenerationKind::GradientNoise),
            other => Err(MapError::UnknownGenerationKind(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapState {
    /// Freshly constructed, all heights zero.
    Unset,
    Generated(GenerationKind),
}

// ── Config ────────────────────────────────────────────────────────────────────

/// Map construction and generation settings.
/// Defaults match the viewer: 513 × 513 cells of 6 px, diamond-square.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    /// Grid side is `2^exponent + 1`.
    pub exponent: u32,
    /// Pixel size of one cell.
    pub tile_width: f64,
    pub kind: GenerationKind,
    /// Diamond-square corner range and first displacement.
    pub initial_range: f64,
    /// Random seed; `None` lets the caller pick one.
    pub seed: Option<u64>,
    pub noise: NoiseParams,
}

impl Default for MapConfig {
    fn default() -> Self {
        Self {
            exponent: 9,
            tile_width: 6.0,
            kind: GenerationKind::DiamondSquare,
            initial_range: DEFAULT_INITIAL_RANGE,
            seed: None,
            noise: NoiseParams::default(),
        }
    }
}

impl MapConfig {
    pub fn from_json(json: &str) -> Result<Self, MapError> {
        serde_json::from_str(json).map_err(|e| MapError::InvalidConfig(e.to_string()))
    }
}

// ── Map ───────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
pub struct Map {
    grid: Grid,
    tile_width: f64,
    state: MapState,
    diamond_square: DiamondSquare,
    noise: LayeredNoise,
}

impl Map {
    /// Zero-filled map of `2^exponent + 1` cells per side.
    pub fn new(exponent: u32, tile_width: f64) -> Result<Self, MapError> {
        if !(1..=MAX_EXPONENT).contains(&exponent) {
            return Err(MapError::InvalidExponent { exponent, max: MAX_EXPONENT });
        }
        if !(tile_width.is_finite() && tile_width > 0.0) {
            return Err(MapError::InvalidTileWidth(tile_width));
        }
        Ok(Self {
            grid: Grid::with_exponent(exponent),
            tile_width,
            state: MapState::Unset,
            diamond_square: DiamondSquare::default(),
            noise: LayeredNoise::default(),
        })
    }

    /// Map with the generator settings from `config`. Does not generate.
    pub fn from_config(config: &MapConfig) -> Result<Self, MapError> {
        let mut map = Self::new(config.exponent, config.tile_width)?;
        check_initial_range(config.initial_range)?;
        config.noise.validate()?;
        map.diamond_square = DiamondSquare::new(config.initial_range);
        map.noise = LayeredNoise::new(config.noise);
        Ok(map)
    }

    /// Replace the whole grid with a freshly generated one.
    ///
    /// The new heights are built in a separate buffer and swapped in once
    /// complete, so the live grid is never partially overwritten.
    pub fn generate<R: RandomSource + ?Sized>(&mut self, kind: GenerationKind, rng: &mut R) {
        let mut next = Grid::new(self.grid.size());
        match kind {
            GenerationKind::DiamondSquare => {
                self.diamond_square.fill(&mut next, rng);
            }
            GenerationKind::GradientNoise => self.noise.fill(&mut next, rng),
        }
        info!(
            "generated {kind} map {size}×{size}, heights {min:.2}..{max:.2}",
            size = next.size(),
            min = next.min_height(),
            max = next.max_height(),
        );
        self.grid = next;
        self.state = MapState::Generated(kind);
    }

    /// Parse `kind` and generate; unknown names leave the map untouched.
    pub fn generate_named<R: RandomSource + ?Sized>(&mut self, kind: &str, rng: &mut R) -> Result<(), MapError> {
        let kind = kind.parse()?;
        self.generate(kind, rng);
        Ok(())
    }

    pub fn state(&self) -> MapState {
        self.state
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn size(&self) -> usize {
        self.grid.size()
    }

    pub fn tile_width(&self) -> f64 {
        self.tile_width
    }

    pub fn height_at(&self, grid_x: usize, grid_y: usize) -> f64 {
        self.grid.get(grid_x, grid_y)
    }

    pub fn terrain_at(&self, grid_x: usize, grid_y: usize) -> Terrain {
        Terrain::classify(self.height_at(grid_x, grid_y))
    }

    pub fn color_of(&self, grid_x: usize, grid_y: usize) -> Color {
        height_color(self.height_at(grid_x, grid_y))
    }

    pub fn visible_tiles(&self, offset: Offset, screen_width: f64, screen_height: f64) -> VisibleTiles {
        VisibleTiles::new(self.grid.size(), self.tile_width, offset, screen_width, screen_height)
    }

    /// Fill one rectangle per visible cell. Returns the number drawn.
    pub fn draw<S: Surface + ?Sized>(
        &self,
        surface: &mut S,
        offset: Offset,
        screen_width: f64,
        screen_height: f64,
    ) -> usize {
        let mut drawn = 0;
        for tile in self.visible_tiles(offset, screen_width, screen_height) {
            let color = self.color_of(tile.grid_x, tile.grid_y);
            surface.fill_rect(tile.screen_x, tile.screen_y, self.tile_width, color);
            drawn += 1;
        }
        drawn
    }
}

/// Heights stay within a few multiples of the range and a square step sums
/// four of them, so leave that much headroom before `f64` overflows.
fn check_initial_range(range: f64) -> Result<(), MapError> {
    if range >= 0.0 && (range * 16.0).is_finite() {
        Ok(())
    } else {
        Err(MapError::InvalidConfig(format!(
            "initial range {range} must be non-negative and finite"
        )))
    }
}

// ── Unit tests ────────────────────────────────────────────────────────────────
