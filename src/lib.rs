//! # Hexgen
//!
//! Deterministic procedural generation of playable hexagonal maps.
//!
//! ## Architecture Overview
//!
//! A map is produced by a single pipeline that owns all of its state for the
//! duration of one call:
//!
//! - **Hex math**: cube coordinates, neighbors and distances
//! - **Generation**: configuration, weighted tile sampling and the staged generator
//! - **Validation**: config checks before generation and structural checks after it
//! - **Analysis**: read-only statistics and balance hints for human tuning
//!
//! ## Guarantees
//!
//! Every map handed back by [`HexMapGenerator`] has exactly one home tile at the
//! origin and at least one objective. Anything else is reported as an error and
//! the map is discarded.

pub mod analysis;
pub mod generation;
pub mod hex;
pub mod map;
pub mod tiles;
pub mod utils;
pub mod validation;

pub use analysis::*;
pub use generation::*;
pub use hex::*;
pub use map::*;
pub use tiles::*;
pub use validation::*;

/// Core error type for map generation.
#[derive(thiserror::Error, Debug)]
pub enum HexgenError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Configuration was rejected before generation started
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// Objective placement exhausted its budget without placing anything
    #[error(
        "No objectives placed (requested {requested}, radius {radius}, min distance {min_distance}); \
         increase the radius or reduce the objective spacing"
    )]
    NoObjectivesPlaced {
        requested: u32,
        radius: i32,
        min_distance: i32,
    },

    /// The finished map broke a structural invariant
    #[error("Generated map failed validation: {}", .0.error_summary())]
    ValidationFailed(ValidationReport),

    /// Cube coordinate components do not sum to zero
    #[error("Invalid cube coordinate ({q}, {r}, {s}): components must sum to zero")]
    InvalidCoordinate { q: i32, r: i32, s: i32 },

    /// Map data could not be assembled
    #[error("Invalid map: {0}")]
    InvalidMap(String),
}

/// Result type used throughout the crate.
pub type HexgenResult<T> = Result<T, HexgenError>;

/// Version information for the crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Generation constants.
pub mod config {
    /// Default map radius
    pub const DEFAULT_MAP_RADIUS: i32 = 5;

    /// Largest map radius a config may request
    pub const MAX_MAP_RADIUS: i32 = 10;

    /// Attempts allowed when placing objectives
    pub const MAX_OBJECTIVE_ATTEMPTS: u32 = 100;

    /// Attempts allowed per requested event tile
    pub const EVENT_ATTEMPTS_PER_TILE: u32 = 10;

    /// Event tiles are never placed closer to home than this
    pub const EVENT_MIN_RADIUS: i32 = 2;

    /// Upper bound on steps walked by a single connectivity repair
    pub const REPAIR_STEP_LIMIT: usize = 1000;

    /// Chance that an impassable tile spreads to each eligible neighbor
    pub const CLUSTER_CHANCE: f64 = 0.3;

    /// Chance that a danger roll actually turns a rim tile impassable
    pub const DANGER_ACCEPTANCE: f64 = 0.3;

    /// Allowed deviation of the terrain percentages from 100
    pub const PERCENTAGE_TOLERANCE: f64 = 0.1;

    /// Maps smaller than this are flagged as trivially small
    pub const MIN_INTERESTING_TILES: usize = 7;
}
