//! # Hex Map Generation
//!
//! The staged generator that turns a [`GenerationConfig`] into a playable
//! [`HexMap`].
//!
//! Stages run in a fixed order over one owned [`MapBuilder`]:
//! 1. Enumerate the grid
//! 2. Place home at the origin with a safe ring around it
//! 3. Place objectives with spacing (at least one is mandatory)
//! 4. Place event tiles
//! 5. Fill the remaining cells with weighted terrain
//! 6. Repair connectivity to important tiles
//! 7. Cluster impassable terrain, then repair again
//! 8. Validate the finished map

use super::builder::MapBuilder;
use super::utils;
use crate::utils::{greedy_path_to_origin, hex_cell_count, normalized_radius, reachable_from};
use crate::{
    validate_config, validate_map, Finding, GenerationConfig, Generator, HexCoordinate, HexMap,
    HexgenError, HexgenResult, TileType, TileTypeSampler, ValidationReport,
};
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::Rng;
use std::collections::{BTreeMap, BTreeSet};

/// Counts of what the pipeline actually placed and changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlacementSummary {
    pub objectives_requested: u32,
    pub objectives_placed: u32,
    pub events_requested: BTreeMap<TileType, u32>,
    pub events_placed: BTreeMap<TileType, u32>,
    /// Impassable tiles turned to empty by connectivity repair
    pub impassable_cleared: usize,
    /// Tiles turned impassable by clustering
    pub tiles_clustered: usize,
}

/// A successfully generated map and everything needed to reproduce or audit it.
#[derive(Debug, Clone)]
pub struct GeneratedMap {
    /// Seed actually used, never 0
    pub seed: u64,
    pub map: HexMap,
    /// Final validation report; valid by construction, may carry warnings
    pub report: ValidationReport,
    pub summary: PlacementSummary,
}

/// Staged hex map generator.
///
/// Holds only tuning knobs; all per-run state lives in a builder created for
/// each call, so one instance can be reused for any number of maps.
#[derive(Debug, Clone)]
pub struct HexMapGenerator {
    /// Draws allowed when placing objectives
    pub max_objective_attempts: u32,
    /// Draws allowed per requested event tile
    pub event_attempts_per_tile: u32,
    /// Event tiles keep at least this distance from home
    pub event_min_radius: i32,
    /// Step bound for one repair walk
    pub repair_step_limit: usize,
    /// Spread chance per neighbor of an impassable tile
    pub cluster_chance: f64,
    /// Acceptance gate applied after a successful danger roll
    pub danger_acceptance: f64,
}

impl HexMapGenerator {
    /// Creates a generator with the standard tuning.
    ///
    /// # Examples
    ///
    /// ```
    /// use hexgen::{GenerationConfig, HexMapGenerator, TileType};
    ///
    /// let generator = HexMapGenerator::new();
    /// let generated = generator.generate_map(&GenerationConfig::new(7)).unwrap();
    /// assert_eq!(generated.map.count(TileType::Home), 1);
    /// assert_eq!(generated.seed, 7);
    /// ```
    pub fn new() -> Self {
        Self {
            max_objective_attempts: crate::config::MAX_OBJECTIVE_ATTEMPTS,
            event_attempts_per_tile: crate::config::EVENT_ATTEMPTS_PER_TILE,
            event_min_radius: crate::config::EVENT_MIN_RADIUS,
            repair_step_limit: crate::config::REPAIR_STEP_LIMIT,
            cluster_chance: crate::config::CLUSTER_CHANCE,
            danger_acceptance: crate::config::DANGER_ACCEPTANCE,
        }
    }

    /// Validates the config, seeds a generator and runs the full pipeline.
    ///
    /// A config seed of 0 is replaced with a fresh one, reported in
    /// [`GeneratedMap::seed`].
    pub fn generate_map(&self, config: &GenerationConfig) -> HexgenResult<GeneratedMap> {
        validate_config(config)?;

        let seed = utils::resolve_seed(config);
        info!("Generating map with seed {} (radius {})", seed, config.radius);
        let mut rng = utils::create_rng(seed);

        let (map, report, summary) = self.run_pipeline(config, &mut rng)?;
        Ok(GeneratedMap {
            seed,
            map,
            report,
            summary,
        })
    }

    fn run_pipeline(
        &self,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> HexgenResult<(HexMap, ValidationReport, PlacementSummary)> {
        let mut builder = MapBuilder::new(config.radius);
        debug!("Enumerated {} grid positions", builder.grid_len());

        let mut summary = PlacementSummary {
            objectives_requested: config.objective_count,
            ..PlacementSummary::default()
        };
        let mut findings = Vec::new();

        self.place_home(&mut builder, config, rng);

        let objectives = self.place_objectives(&mut builder, config, rng)?;
        summary.objectives_placed = objectives.len() as u32;
        if summary.objectives_placed < config.objective_count {
            warn!(
                "Only placed {}/{} objectives; consider a larger radius or smaller spacing",
                summary.objectives_placed, config.objective_count
            );
            findings.push(Finding::warning(format!(
                "Placed {} of {} requested objectives",
                summary.objectives_placed, config.objective_count
            )));
        }

        for tile in TileType::EVENTS {
            let requested = config.event_count(tile);
            let placed = self.place_events(&mut builder, tile, requested, rng);
            if placed < requested {
                warn!("Only placed {}/{} {} tiles", placed, requested, tile);
                findings.push(Finding::warning(format!(
                    "Placed {} of {} requested {} tiles",
                    placed, requested, tile
                )));
            }
            summary.events_requested.insert(tile, requested);
            summary.events_placed.insert(tile, placed);
        }

        self.fill_terrain(&mut builder, config, rng);

        self.shape_impassable(&mut builder, config, rng, &mut summary);

        let map = builder.finish()?;
        info!("Map generation complete, {} tiles", map.len());

        let report = validate_map(&map).with_findings(findings);
        report.log_results();
        if !report.is_valid() {
            return Err(HexgenError::ValidationFailed(report));
        }

        Ok((map, report, summary))
    }

    /// Home at the origin, ringed by safe terrain.
    fn place_home(&self, builder: &mut MapBuilder, config: &GenerationConfig, rng: &mut StdRng) {
        let origin = HexCoordinate::origin();
        builder.set(origin, TileType::Home);

        for neighbor in origin.neighbors() {
            let roll = rng.gen::<f64>();
            let drawn = if roll < 0.5 {
                TileType::Empty
            } else if roll < 0.75 {
                TileType::Field
            } else {
                TileType::Forest
            };
            let safe = if config.terrain.weight(drawn) > 0.0 {
                drawn
            } else {
                TileType::Empty
            };
            builder.place_if_vacant(neighbor, safe);
        }

        debug!("Home placed at the origin");
    }

    /// Places spaced objectives and clears their neighbors.
    ///
    /// Fails when not a single objective fits.
    fn place_objectives(
        &self,
        builder: &mut MapBuilder,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> HexgenResult<Vec<HexCoordinate>> {
        let spacing = config.min_objective_distance.max(0) as u32;
        let mut available = builder.vacant_where(|hex| hex.radius() >= spacing);
        let mut placed: Vec<HexCoordinate> = Vec::new();
        let mut attempts = 0;

        while placed.len() < config.objective_count as usize
            && attempts < self.max_objective_attempts
            && !available.is_empty()
        {
            attempts += 1;

            let candidate = available.remove(rng.gen_range(0..available.len()));
            if builder.is_occupied(candidate) {
                continue;
            }
            if placed.iter().any(|&other| other.distance(candidate) < spacing) {
                continue;
            }

            builder.set(candidate, TileType::Objective);
            placed.push(candidate);
            debug!("Objective placed at {}", candidate);

            for neighbor in candidate.neighbors() {
                builder.place_if_vacant(neighbor, TileType::Empty);
            }
        }

        info!(
            "Placed {} objectives (requested {})",
            placed.len(),
            config.objective_count
        );

        if placed.is_empty() {
            return Err(HexgenError::NoObjectivesPlaced {
                requested: config.objective_count,
                radius: config.radius,
                min_distance: config.min_objective_distance,
            });
        }

        Ok(placed)
    }

    /// Scatters one event category over vacant cells away from home.
    fn place_events(
        &self,
        builder: &mut MapBuilder,
        tile: TileType,
        count: u32,
        rng: &mut StdRng,
    ) -> u32 {
        let min_radius = self.event_min_radius.max(0) as u32;
        let mut available = builder.vacant_where(|hex| hex.radius() >= min_radius);
        let max_attempts = count.saturating_mul(self.event_attempts_per_tile);
        let mut placed = 0;
        let mut attempts = 0;

        while placed < count && attempts < max_attempts && !available.is_empty() {
            attempts += 1;
            let position = available.remove(rng.gen_range(0..available.len()));
            if builder.place_if_vacant(position, tile) {
                placed += 1;
            }
        }

        debug!("Placed {} {} tiles", placed, tile);
        placed
    }

    /// Fills every vacant cell from the sampler with position biases applied.
    fn fill_terrain(&self, builder: &mut MapBuilder, config: &GenerationConfig, rng: &mut StdRng) {
        let sampler = TileTypeSampler::new(&config.terrain);
        let radius = builder.radius();

        for hex in builder.vacant_where(|_| true) {
            let normalized = normalized_radius(hex, radius);
            let tile = self.determine_tile(&sampler, config, normalized, rng);
            builder.set(hex, tile);
        }
    }

    /// Samples one fill tile at a normalized radius.
    fn determine_tile(
        &self,
        sampler: &TileTypeSampler,
        config: &GenerationConfig,
        normalized: f64,
        rng: &mut StdRng,
    ) -> TileType {
        let mut allow_resources = true;
        if config.centralize_resources && config.resource_centralization > 0.0 {
            let resource_chance = 1.0 - normalized * config.resource_centralization;
            if rng.gen::<f64>() > resource_chance {
                allow_resources = false;
            }
        }

        let mut tile = sampler.sample(rng, allow_resources);

        if config.danger_progression > 0.0 && normalized > 0.5 {
            let danger_chance = (normalized - 0.5) * 2.0 * config.danger_progression;
            if rng.gen::<f64>() < danger_chance
                && tile != TileType::Impassable
                && rng.gen::<f64>() < self.danger_acceptance
            {
                tile = TileType::Impassable;
            }
        }

        tile
    }

    /// Repairs connectivity and clusters impassable terrain per the config
    /// toggles, recording both in the summary.
    fn shape_impassable(
        &self,
        builder: &mut MapBuilder,
        config: &GenerationConfig,
        rng: &mut StdRng,
        summary: &mut PlacementSummary,
    ) {
        if config.ensure_connectivity {
            summary.impassable_cleared += self.repair_connectivity(builder);
        }

        if config.cluster_impassable {
            summary.tiles_clustered = self.cluster_impassable(builder, rng);
            // Clustering can wall off tiles that were reachable a moment ago.
            if config.ensure_connectivity {
                summary.impassable_cleared += self.repair_connectivity(builder);
            }
        }
    }

    /// Clears impassable tiles on a greedy path from every stranded important
    /// tile back to home. Returns the number of tiles cleared.
    fn repair_connectivity(&self, builder: &mut MapBuilder) -> usize {
        let origin = HexCoordinate::origin();
        let mut reachable = reachable_from(origin, |hex| builder.get(hex));
        let mut cleared = 0;

        for target in builder.important_positions() {
            if reachable.contains(&target) {
                continue;
            }

            let path = greedy_path_to_origin(target, |hex| builder.get(hex), self.repair_step_limit);
            for hex in path {
                if builder.get(hex) == Some(TileType::Impassable) {
                    builder.set(hex, TileType::Empty);
                    cleared += 1;
                    debug!("Cleared impassable tile at {} to reach {}", hex, target);
                }
            }

            reachable = reachable_from(origin, |hex| builder.get(hex));
        }

        if cleared > 0 {
            debug!("Connectivity repair cleared {} tiles", cleared);
        }
        cleared
    }

    /// Single pass spreading impassable tiles to their neighbors.
    ///
    /// Home and important tiles are never converted. Returns the number of
    /// tiles that changed.
    fn cluster_impassable(&self, builder: &mut MapBuilder, rng: &mut StdRng) -> usize {
        let mut to_convert = BTreeSet::new();

        for hex in builder.positions_of(TileType::Impassable) {
            for neighbor in hex.neighbors() {
                let Some(tile) = builder.get(neighbor) else {
                    continue;
                };
                if tile == TileType::Home || tile.is_important() {
                    continue;
                }
                if rng.gen::<f64>() < self.cluster_chance {
                    to_convert.insert(neighbor);
                }
            }
        }

        let mut clustered = 0;
        for hex in to_convert {
            if builder.get(hex) != Some(TileType::Impassable) {
                builder.set(hex, TileType::Impassable);
                clustered += 1;
            }
        }

        debug!("Clustered {} impassable tiles", clustered);
        clustered
    }
}

impl Default for HexMapGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl Generator<HexMap> for HexMapGenerator {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> HexgenResult<HexMap> {
        validate_config(config)?;
        let (map, _, _) = self.run_pipeline(config, rng)?;
        Ok(map)
    }

    fn validate(&self, map: &HexMap, config: &GenerationConfig) -> HexgenResult<()> {
        let expected = hex_cell_count(config.radius);
        if map.len() != expected {
            return Err(HexgenError::InvalidMap(format!(
                "expected {} tiles for radius {}, found {}",
                expected,
                config.radius,
                map.len()
            )));
        }

        let report = validate_map(map);
        if !report.is_valid() {
            return Err(HexgenError::ValidationFailed(report));
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "HexMapGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{hex_grid, TerrainWeights};

    fn plain_config(seed: u64) -> GenerationConfig {
        GenerationConfig {
            seed,
            radius: 3,
            terrain: TerrainWeights::only_empty(),
            objective_count: 1,
            min_objective_distance: 2,
            treasure_count: 0,
            tavern_count: 0,
            camp_count: 0,
            resource_centralization: 0.0,
            danger_progression: 0.0,
            ..GenerationConfig::default()
        }
    }

    #[test]
    fn test_generator_creation() {
        let generator = HexMapGenerator::new();
        assert_eq!(generator.max_objective_attempts, 100);
        assert_eq!(generator.event_attempts_per_tile, 10);
        assert_eq!(generator.repair_step_limit, 1000);
        assert_eq!(generator.generator_type(), "HexMapGenerator");
    }

    #[test]
    fn test_home_ring_is_safe() {
        let generator = HexMapGenerator::new();
        let config = GenerationConfig::default();
        let mut rng = utils::create_rng(5);
        let mut builder = MapBuilder::new(3);

        generator.place_home(&mut builder, &config, &mut rng);

        assert_eq!(builder.get(HexCoordinate::origin()), Some(TileType::Home));
        for neighbor in HexCoordinate::origin().neighbors() {
            let tile = builder.get(neighbor).unwrap();
            assert!(matches!(tile, TileType::Empty | TileType::Field | TileType::Forest));
        }
    }

    #[test]
    fn test_home_ring_respects_zero_weights() {
        let generator = HexMapGenerator::new();
        let config = plain_config(5);

        for seed in 0..20 {
            let mut rng = utils::create_rng(seed);
            let mut builder = MapBuilder::new(2);
            generator.place_home(&mut builder, &config, &mut rng);
            for neighbor in HexCoordinate::origin().neighbors() {
                assert_eq!(builder.get(neighbor), Some(TileType::Empty));
            }
        }
    }

    #[test]
    fn test_objectives_respect_spacing_and_clear_neighbors() {
        let generator = HexMapGenerator::new();
        let config = GenerationConfig {
            radius: 6,
            objective_count: 3,
            min_objective_distance: 3,
            ..GenerationConfig::default()
        };
        let mut rng = utils::create_rng(11);
        let mut builder = MapBuilder::new(config.radius);
        generator.place_home(&mut builder, &config, &mut rng);

        let placed = generator
            .place_objectives(&mut builder, &config, &mut rng)
            .unwrap();

        assert!(!placed.is_empty());
        for (i, a) in placed.iter().enumerate() {
            assert!(a.radius() >= 3);
            for b in &placed[i + 1..] {
                assert!(a.distance(*b) >= 3);
            }
            for neighbor in a.neighbors() {
                if builder.contains(neighbor) {
                    assert!(builder.is_occupied(neighbor));
                    assert_ne!(builder.get(neighbor), Some(TileType::Impassable));
                }
            }
        }
    }

    #[test]
    fn test_no_room_for_objectives_fails() {
        let generator = HexMapGenerator::new();
        let config = GenerationConfig {
            radius: 2,
            objective_count: 3,
            min_objective_distance: 5,
            ..GenerationConfig::default()
        };
        let mut rng = utils::create_rng(1);
        let mut builder = MapBuilder::new(config.radius);
        generator.place_home(&mut builder, &config, &mut rng);

        let result = generator.place_objectives(&mut builder, &config, &mut rng);
        assert!(matches!(
            result,
            Err(HexgenError::NoObjectivesPlaced { requested: 3, .. })
        ));
    }

    #[test]
    fn test_events_keep_min_radius() {
        let generator = HexMapGenerator::new();
        let config = GenerationConfig::default();
        let mut rng = utils::create_rng(8);
        let mut builder = MapBuilder::new(4);
        generator.place_home(&mut builder, &config, &mut rng);

        let placed = generator.place_events(&mut builder, TileType::Treasure, 5, &mut rng);

        assert_eq!(placed, 5);
        let positions = builder.positions_of(TileType::Treasure);
        assert_eq!(positions.len(), 5);
        assert!(positions.iter().all(|hex| hex.radius() >= 2));
    }

    #[test]
    fn test_events_limited_by_space() {
        let generator = HexMapGenerator::new();
        let config = GenerationConfig::default();
        let mut rng = utils::create_rng(8);
        let mut builder = MapBuilder::new(2);
        generator.place_home(&mut builder, &config, &mut rng);

        // Only the 12 cells of ring 2 qualify.
        let placed = generator.place_events(&mut builder, TileType::Camp, 20, &mut rng);
        assert_eq!(placed, 12);
    }

    #[test]
    fn test_danger_only_on_outer_half() {
        let generator = HexMapGenerator::new();
        let config = GenerationConfig {
            terrain: TerrainWeights::only_empty(),
            danger_progression: 1.0,
            resource_centralization: 0.0,
            ..GenerationConfig::default()
        };
        let sampler = TileTypeSampler::new(&config.terrain);
        let mut rng = utils::create_rng(3);

        for _ in 0..200 {
            assert_eq!(
                generator.determine_tile(&sampler, &config, 0.5, &mut rng),
                TileType::Empty
            );
        }

        let rim: Vec<_> = (0..2000)
            .map(|_| generator.determine_tile(&sampler, &config, 1.0, &mut rng))
            .collect();
        let impassable = rim.iter().filter(|&&t| t == TileType::Impassable).count();
        // Expected share is 1.0 * 0.3.
        assert!(impassable > 450 && impassable < 750, "impassable {}", impassable);
    }

    #[test]
    fn test_repair_opens_walled_objective() {
        let generator = HexMapGenerator::new();
        let mut builder = MapBuilder::new(3);
        for hex in hex_grid(3) {
            builder.set(hex, TileType::Empty);
        }
        builder.set(HexCoordinate::origin(), TileType::Home);
        for hex in hex_grid(3).into_iter().filter(|hex| hex.radius() == 2) {
            builder.set(hex, TileType::Impassable);
        }
        let objective = HexCoordinate::new(3, -3);
        builder.set(objective, TileType::Objective);

        let cleared = generator.repair_connectivity(&mut builder);

        assert_eq!(cleared, 1);
        let reachable = reachable_from(HexCoordinate::origin(), |hex| builder.get(hex));
        assert!(reachable.contains(&objective));
    }

    #[test]
    fn test_clustering_spares_important_tiles() {
        let generator = HexMapGenerator {
            cluster_chance: 1.0,
            ..HexMapGenerator::new()
        };
        let mut builder = MapBuilder::new(2);
        for hex in hex_grid(2) {
            builder.set(hex, TileType::Empty);
        }
        builder.set(HexCoordinate::origin(), TileType::Home);
        builder.set(HexCoordinate::new(1, 0), TileType::Impassable);
        builder.set(HexCoordinate::new(2, 0), TileType::Tavern);
        let mut rng = utils::create_rng(2);

        let clustered = generator.cluster_impassable(&mut builder, &mut rng);

        assert_eq!(builder.get(HexCoordinate::origin()), Some(TileType::Home));
        assert_eq!(builder.get(HexCoordinate::new(2, 0)), Some(TileType::Tavern));
        // Neighbors of (1, 0): origin and tavern are spared, four others convert.
        assert_eq!(clustered, 4);
    }

    /// Radius-2 grid where the objective at (2, -1) reaches home only through
    /// the single open corridor cell (1, -1).
    fn corridor_builder() -> (MapBuilder, HexCoordinate) {
        let mut builder = MapBuilder::new(2);
        for hex in hex_grid(2) {
            builder.set(hex, TileType::Impassable);
        }
        builder.set(HexCoordinate::origin(), TileType::Home);
        builder.set(HexCoordinate::new(1, -1), TileType::Empty);
        let objective = HexCoordinate::new(2, -1);
        builder.set(objective, TileType::Objective);
        (builder, objective)
    }

    #[test]
    fn test_repair_runs_again_after_clustering() {
        let generator = HexMapGenerator {
            cluster_chance: 1.0,
            ..HexMapGenerator::new()
        };
        let config = GenerationConfig {
            ensure_connectivity: true,
            cluster_impassable: true,
            ..plain_config(4)
        };
        let (mut builder, objective) = corridor_builder();
        let mut rng = utils::create_rng(4);
        let mut summary = PlacementSummary::default();

        let before = reachable_from(HexCoordinate::origin(), |hex| builder.get(hex));
        assert!(before.contains(&objective));

        generator.shape_impassable(&mut builder, &config, &mut rng, &mut summary);

        // Clustering filled the corridor; only the second repair can reopen it.
        assert!(summary.tiles_clustered >= 1);
        assert!(summary.impassable_cleared >= 1);
        let after = reachable_from(HexCoordinate::origin(), |hex| builder.get(hex));
        assert!(after.contains(&objective));
    }

    #[test]
    fn test_clustering_without_repair_can_strand_objective() {
        let generator = HexMapGenerator {
            cluster_chance: 1.0,
            ..HexMapGenerator::new()
        };
        let config = GenerationConfig {
            ensure_connectivity: false,
            cluster_impassable: true,
            ..plain_config(4)
        };
        let (mut builder, objective) = corridor_builder();
        let mut rng = utils::create_rng(4);
        let mut summary = PlacementSummary::default();

        generator.shape_impassable(&mut builder, &config, &mut rng, &mut summary);

        assert_eq!(builder.get(HexCoordinate::new(1, -1)), Some(TileType::Impassable));
        assert_eq!(summary.impassable_cleared, 0);
        let reachable = reachable_from(HexCoordinate::origin(), |hex| builder.get(hex));
        assert!(!reachable.contains(&objective));
    }

    #[test]
    fn test_plain_scenario() {
        let generated = HexMapGenerator::new().generate_map(&plain_config(99)).unwrap();
        let map = &generated.map;

        assert_eq!(map.len(), 37);
        assert_eq!(map.get(HexCoordinate::origin()), Some(TileType::Home));
        assert_eq!(map.count(TileType::Objective), 1);
        assert_eq!(map.count(TileType::Empty), 35);
        assert!(map.positions_of(TileType::Objective)[0].radius() >= 2);
    }

    #[test]
    fn test_trait_generate_and_validate() {
        let generator = HexMapGenerator::new();
        let config = GenerationConfig::for_testing(12345);
        let mut rng = utils::create_rng(config.seed);

        let map = generator.generate(&config, &mut rng).unwrap();
        assert!(generator.validate(&map, &config).is_ok());

        let bigger = GenerationConfig {
            radius: 4,
            ..config
        };
        assert!(matches!(
            generator.validate(&map, &bigger),
            Err(HexgenError::InvalidMap(_))
        ));
    }

    #[test]
    fn test_same_seed_same_map() {
        let generator = HexMapGenerator::new();
        let config = GenerationConfig::new(2024);

        let first = generator.generate_map(&config).unwrap();
        let second = generator.generate_map(&config).unwrap();
        assert_eq!(first.map, second.map);
        assert_eq!(first.summary, second.summary);
    }
}
