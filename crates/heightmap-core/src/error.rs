//! Errors raised while building or driving a [`Map`](crate::map::Map).

use thiserror::Error;

/// Errors that can occur when constructing or generating a map.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MapError {
    /// Grid exponent outside the supported range; size is `2^n + 1`.
    #[error("invalid grid exponent {exponent}: must be between 1 and {max}")]
    InvalidExponent {
        /// The exponent that was requested.
        exponent: u32,
        /// Largest supported exponent.
        max: u32,
    },

    /// Tile width must be a positive, finite pixel size.
    #[error("invalid tile width {0}: must be positive and finite")]
    InvalidTileWidth(f64),

    /// Generation kind name not recognised.
    #[error("unknown generation kind: {0:?}")]
    UnknownGenerationKind(String),

    /// Configuration could not be parsed or holds values that cannot generate a finite map.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
