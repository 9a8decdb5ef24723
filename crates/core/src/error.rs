//! Error types for map construction, configuration, and agent lifecycle.
//!
//! Only configuration-level problems are errors. Planning misses, degenerate
//! geometry, and unavailable collaborators are reported through
//! [`TickOutcome`](crate::TickOutcome) and empty paths instead.

use std::io;
use std::result::Result as StdResult;

use thiserror::Error;

use crate::types::Pos;

#[derive(Debug, Error)]
pub enum GridError {
    #[error("map has no rows")]
    Empty,

    #[error("row {row} has width {actual}, expected {expected}")]
    RaggedRow { row: usize, expected: usize, actual: usize },

    #[error("unknown tile glyph {glyph:?} at row {row}, column {column}")]
    UnknownGlyph { glyph: char, row: usize, column: usize },

    #[error("tile size must be positive and finite, got {0}")]
    InvalidTileSize(f32),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("speed must be positive and finite, got {0}")]
    InvalidSpeed(f32),

    #[error("vision radius must be non-negative and finite, got {0}")]
    InvalidVisionRadius(f32),

    #[error("max wander steps must be at least 1")]
    ZeroWanderSteps,

    #[error("arrival tolerance must be positive and finite, got {0}")]
    InvalidArrivalTolerance(f32),

    #[error("arrival tolerance {tolerance} must be under half the tile spacing {spacing}")]
    ArrivalToleranceTooLarge { tolerance: f32, spacing: f32 },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Error)]
pub enum AgentError {
    #[error("invalid agent configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("map has no walkable tile to place the agent on")]
    NoWalkableTile,

    #[error("spawn tile {0:?} is not walkable")]
    UnwalkableSpawn(Pos),
}

pub type Result<T, E = AgentError> = StdResult<T, E>;
