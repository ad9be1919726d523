//! Procedural heightmap generation for a tile-based map viewer.
//!
//! A [`Map`] owns a `2^n + 1` square [`Grid`] filled either by
//! diamond-square displacement or by layered gradient noise. Rendering walks
//! the [`VisibleTiles`] for the current camera and colours each cell by its
//! [`Terrain`] band.

pub mod classify;
pub mod diamond_square;
pub mod error;
pub mod grid;
pub mod map;
pub mod noise;
pub mod rng;
pub mod viewport;

pub use classify::{height_color, Color, Terrain};
pub use error::MapError;
pub use grid::Grid;
pub use map::{GenerationKind, Map, MapConfig, MapState};
pub use rng::{RandomSource, SeededRng};
pub use viewport::{Camera, DrawTile, Offset, Surface, VisibleTiles};
