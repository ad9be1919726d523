//! Height → terrain band → colour.
use serde::{Deserialize, Serialize};

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// `#rrggbb` form, as accepted by canvas fill styles.
    pub fn hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// Terrain bands in ascending height order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Terrain {
    DeepWater,
    Water,
    ShallowWater,
    ShallowWater2,
    Coast,
    Sand,
    Sand2,
    Grass,
    Forest,
    DarkForest,
    Mountain,
    Rock,
    Snow,
}

/// Inclusive upper bound of every band except the open-ended `Snow`.
const BANDS: [(f64, Terrain); 12] = [
    (0.0, Terrain::DeepWater),
    (2.0, Terrain::Water),
    (4.0, Terrain::ShallowWater),
    (5.0, Terrain::ShallowWater2),
    (6.0, Terrain::Coast),
    (6.5, Terrain::Sand),
    (7.0, Terrain::Sand2),
    (10.0, Terrain::Grass),
    (12.0, Terrain::Forest),
    (13.0, Terrain::DarkForest),
    (16.0, Terrain::Mountain),
    (18.0, Terrain::Rock),
];

impl Terrain {
    pub const ALL: [Terrain; 13] = [
        Terrain::DeepWater,
        Terrain::Water,
        Terrain::ShallowWater,
        Terrain::ShallowWater2,
        Terrain::Coast,
        Terrain::Sand,
        Terrain::Sand2,
        Terrain::Grass,
        Terrain::Forest,
        Terrain::DarkForest,
        Terrain::Mountain,
        Terrain::Rock,
        Terrain::Snow,
    ];

    /// First band whose upper bound is ≥ `height`; `Snow` above them all.
    pub fn classify(height: f64) -> Terrain {
        BANDS
            .iter()
            .find(|&&(upper, _)| height <= upper)
            .map_or(Terrain::Snow, |&(_, terrain)| terrain)
    }

    pub fn color(self) -> Color {
        match self {
            Terrain::DeepWater     => Color::rgb(0x08, 0x2e, 0x4f),
            Terrain::Water         => Color::rgb(0x0c, 0x3a, 0x61),
            Terrain::ShallowWater  => Color::rgb(0x0e, 0x48, 0x78),
            Terrain::ShallowWater2 => Color::rgb(0x14, 0x6d, 0xb8),
            Terrain::Coast         => Color::rgb(0x00, 0x9d, 0xc4),
            Terrain::Sand          => Color::rgb(0xeb, 0xe9, 0x8f),
            Terrain::Sand2         => Color::rgb(0xed, 0xeb, 0x80),
            Terrain::Grass         => Color::rgb(0x05, 0x85, 0x03),
            Terrain::Forest        => Color::rgb(0x12, 0x6e, 0x10),
            Terrain::DarkForest    => Color::rgb(0x14, 0x4f, 0x09),
            Terrain::Mountain      => Color::rgb(0x42, 0x2a, 0x00),
            Terrain::Rock          => Color::rgb(0x3b, 0x37, 0x31),
            Terrain::Snow          => Color::rgb(0xff, 0xff, 0xff),
        }
    }
}

/// Colour for a raw height value.
pub fn height_color(height: f64) -> Color {
    Terrain::classify(height).color()
}
