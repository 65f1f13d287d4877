//! # Generation Module
//!
//! Procedural generation of hex maps.
//!
//! This module holds the declarative [`GenerationConfig`], the weighted tile
//! sampler, and the staged [`HexMapGenerator`]. All randomness flows from one
//! seeded generator created per call, so a non-zero seed always reproduces the
//! same map.

mod builder;
pub mod hexmap;
pub mod sampler;

pub use hexmap::*;
pub use sampler::*;

use crate::{HexgenResult, TileType};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Percentage weights for the categories the terrain fill draws from.
///
/// The weights must sum to 100 (within a tenth of a percent).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerrainWeights {
    pub empty: f64,
    pub impassable: f64,
    pub crossing: f64,
    pub field: f64,
    pub forest: f64,
    pub settlement: f64,
    pub mine: f64,
    pub shaft: f64,
}

impl TerrainWeights {
    /// All weight on plain terrain.
    pub fn only_empty() -> Self {
        Self {
            empty: 100.0,
            impassable: 0.0,
            crossing: 0.0,
            field: 0.0,
            forest: 0.0,
            settlement: 0.0,
            mine: 0.0,
            shaft: 0.0,
        }
    }

    /// Weights paired with their tile type, in sampling order.
    pub fn entries(&self) -> [(TileType, f64); 8] {
        [
            (TileType::Empty, self.empty),
            (TileType::Impassable, self.impassable),
            (TileType::Crossing, self.crossing),
            (TileType::Field, self.field),
            (TileType::Forest, self.forest),
            (TileType::Settlement, self.settlement),
            (TileType::Mine, self.mine),
            (TileType::Shaft, self.shaft),
        ]
    }

    /// Weight configured for a tile type; zero for types outside the fill.
    pub fn weight(&self, tile: TileType) -> f64 {
        self.entries()
            .iter()
            .find(|(entry, _)| *entry == tile)
            .map_or(0.0, |(_, weight)| *weight)
    }

    /// Sum of every weight.
    pub fn total(&self) -> f64 {
        self.entries().iter().map(|(_, weight)| weight).sum()
    }
}

impl Default for TerrainWeights {
    fn default() -> Self {
        Self {
            empty: 30.0,
            impassable: 15.0,
            crossing: 5.0,
            field: 15.0,
            forest: 15.0,
            settlement: 10.0,
            mine: 5.0,
            shaft: 5.0,
        }
    }
}

/// Configuration for map generation.
///
/// Authored once and reused across many generations. Missing fields in a JSON
/// document fall back to [`GenerationConfig::default`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation; 0 picks a fresh seed per run
    pub seed: u64,
    /// Map radius in hexes around the home tile
    pub radius: i32,
    /// Terrain fill percentages
    pub terrain: TerrainWeights,
    /// Objectives requested (at least one)
    pub objective_count: u32,
    /// Minimum distance between objectives, and from home
    pub min_objective_distance: i32,
    /// Treasure events requested
    pub treasure_count: u32,
    /// Tavern events requested
    pub tavern_count: u32,
    /// Camp events requested
    pub camp_count: u32,
    /// Carve paths so important tiles are reachable from home
    pub ensure_connectivity: bool,
    /// Grow impassable tiles into ranges
    pub cluster_impassable: bool,
    /// Apply the resource centralization bias
    pub centralize_resources: bool,
    /// Higher keeps resources nearer the center (0.0 to 1.0)
    pub resource_centralization: f64,
    /// Higher pushes impassable terrain toward the rim (0.0 to 1.0)
    pub danger_progression: f64,
}

impl GenerationConfig {
    /// Creates the default configuration with the given seed.
    ///
    /// # Examples
    ///
    /// ```
    /// use hexgen::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(42);
    /// assert_eq!(config.seed, 42);
    /// assert!(config.objective_count >= 1);
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            radius: crate::config::DEFAULT_MAP_RADIUS,
            terrain: TerrainWeights::default(),
            objective_count: 2,
            min_objective_distance: 4,
            treasure_count: 3,
            tavern_count: 2,
            camp_count: 2,
            ensure_connectivity: true,
            cluster_impassable: true,
            centralize_resources: true,
            resource_centralization: 0.3,
            danger_progression: 0.7,
        }
    }

    /// Creates a small, quick configuration for tests.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            radius: 3,
            objective_count: 1,
            min_objective_distance: 2,
            treasure_count: 1,
            tavern_count: 1,
            camp_count: 1,
            ..Self::new(seed)
        }
    }

    /// Even spread of terrain and events.
    pub fn balanced(seed: u64) -> Self {
        Self {
            terrain: TerrainWeights {
                empty: 30.0,
                impassable: 10.0,
                crossing: 5.0,
                field: 15.0,
                forest: 15.0,
                settlement: 10.0,
                mine: 8.0,
                shaft: 7.0,
            },
            objective_count: 2,
            treasure_count: 3,
            tavern_count: 2,
            camp_count: 2,
            resource_centralization: 0.3,
            danger_progression: 0.5,
            ..Self::new(seed)
        }
    }

    /// Plenty of producers and few threats.
    pub fn resource_rich(seed: u64) -> Self {
        Self {
            terrain: TerrainWeights {
                empty: 20.0,
                impassable: 5.0,
                crossing: 5.0,
                field: 20.0,
                forest: 20.0,
                settlement: 10.0,
                mine: 10.0,
                shaft: 10.0,
            },
            objective_count: 1,
            treasure_count: 5,
            tavern_count: 3,
            camp_count: 1,
            resource_centralization: 0.2,
            danger_progression: 0.3,
            ..Self::new(seed)
        }
    }

    /// More mountains, more objectives, resources held near home.
    pub fn challenging(seed: u64) -> Self {
        Self {
            terrain: TerrainWeights {
                empty: 25.0,
                impassable: 20.0,
                crossing: 10.0,
                field: 12.0,
                forest: 12.0,
                settlement: 8.0,
                mine: 7.0,
                shaft: 6.0,
            },
            objective_count: 3,
            treasure_count: 2,
            tavern_count: 1,
            camp_count: 3,
            resource_centralization: 0.5,
            danger_progression: 0.8,
            ..Self::new(seed)
        }
    }

    /// Open terrain with many events to discover.
    pub fn exploration(seed: u64) -> Self {
        Self {
            terrain: TerrainWeights {
                empty: 35.0,
                impassable: 8.0,
                crossing: 7.0,
                field: 12.0,
                forest: 13.0,
                settlement: 8.0,
                mine: 9.0,
                shaft: 8.0,
            },
            objective_count: 1,
            treasure_count: 6,
            tavern_count: 4,
            camp_count: 3,
            resource_centralization: 0.2,
            danger_progression: 0.4,
            ..Self::new(seed)
        }
    }

    /// Many objectives and camps with a dangerous rim.
    pub fn combat(seed: u64) -> Self {
        Self {
            terrain: TerrainWeights {
                empty: 25.0,
                impassable: 15.0,
                crossing: 5.0,
                field: 10.0,
                forest: 10.0,
                settlement: 15.0,
                mine: 10.0,
                shaft: 10.0,
            },
            objective_count: 4,
            treasure_count: 2,
            tavern_count: 1,
            camp_count: 4,
            resource_centralization: 0.4,
            danger_progression: 0.9,
            ..Self::new(seed)
        }
    }

    /// Number of tiles requested for an event category.
    pub fn event_count(&self, tile: TileType) -> u32 {
        match tile {
            TileType::Treasure => self.treasure_count,
            TileType::Tavern => self.tavern_count,
            TileType::Camp => self.camp_count,
            _ => 0,
        }
    }

    /// Parses a configuration from JSON.
    pub fn from_json_str(json: &str) -> HexgenResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Loads a configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> HexgenResult<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json_str(&contents)
    }

    /// Serializes the configuration as pretty-printed JSON.
    pub fn to_json(&self) -> HexgenResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Writes the configuration to a JSON file.
    pub fn save_json_file<P: AsRef<Path>>(&self, path: P) -> HexgenResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(0)
    }
}

/// Trait for procedural generators.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> HexgenResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> HexgenResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Seeding helpers.
pub mod utils {
    use super::*;
    use rand::SeedableRng;
    use std::time::{SystemTime, UNIX_EPOCH};

    /// Creates a seeded random number generator.
    pub fn create_rng(seed: u64) -> StdRng {
        StdRng::seed_from_u64(seed)
    }

    /// Returns the configured seed, or a fresh time-based one when it is 0.
    ///
    /// The returned seed is never 0, so it can be written back into a config
    /// to reproduce the run.
    pub fn resolve_seed(config: &GenerationConfig) -> u64 {
        if config.seed != 0 {
            return config.seed;
        }

        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_nanos() as u64)
            .unwrap_or_default()
            .max(1)
    }
}
