//! # Map Analysis
//!
//! Read-only statistics and balance hints for human tuning.
//!
//! Nothing here feeds back into generation. The analyzer accepts any map,
//! including ones that failed validation, so it doubles as a postmortem tool.

use crate::{HexMap, TileType};
use log::{info, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Statistics and advice for one map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub total_tiles: usize,
    pub tile_distribution: BTreeMap<TileType, usize>,
    /// Share of tiles that produce resources
    pub resource_density: f64,
    /// Share of objective and camp tiles
    pub combat_density: f64,
    pub is_balanced: bool,
    pub warnings: Vec<String>,
    pub recommendations: Vec<String>,
}

impl AnalysisReport {
    /// Count for one tile type, zero when absent.
    pub fn count(&self, tile: TileType) -> usize {
        self.tile_distribution.get(&tile).copied().unwrap_or(0)
    }

    /// Share of the map covered by one tile type.
    pub fn share(&self, tile: TileType) -> f64 {
        if self.total_tiles == 0 {
            return 0.0;
        }
        self.count(tile) as f64 / self.total_tiles as f64
    }

    /// Emits the report through the log facade.
    pub fn log_report(&self) {
        info!(
            "Map analysis: {} tiles, resource density {:.1}%, combat density {:.1}%",
            self.total_tiles,
            self.resource_density * 100.0,
            self.combat_density * 100.0
        );
        for warning in &self.warnings {
            warn!("Analysis: {}", warning);
        }
        for recommendation in &self.recommendations {
            info!("Recommendation: {}", recommendation);
        }
    }
}

/// Multi-line human-readable report, distribution sorted by count.
impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== MAP ANALYSIS REPORT ===")?;
        writeln!(f, "Total tiles: {}", self.total_tiles)?;
        writeln!(f, "Resource density: {:.1}%", self.resource_density * 100.0)?;
        writeln!(f, "Combat density: {:.1}%", self.combat_density * 100.0)?;
        writeln!(f, "Balanced: {}", if self.is_balanced { "yes" } else { "no" })?;

        writeln!(f, "\n--- Tile distribution ---")?;
        let mut sorted: Vec<_> = self.tile_distribution.iter().collect();
        sorted.sort_by(|a, b| b.1.cmp(a.1).then(a.0.cmp(b.0)));
        for (tile, count) in sorted {
            writeln!(f, "{}: {} ({:.1}%)", tile, count, self.share(*tile) * 100.0)?;
        }

        if !self.warnings.is_empty() {
            writeln!(f, "\nWarnings:")?;
            for warning in &self.warnings {
                writeln!(f, "  - {}", warning)?;
            }
        }

        if !self.recommendations.is_empty() {
            writeln!(f, "\nRecommendations:")?;
            for recommendation in &self.recommendations {
                writeln!(f, "  - {}", recommendation)?;
            }
        }

        Ok(())
    }
}

/// Computes balance statistics for generated maps.
#[derive(Debug, Clone, Default)]
pub struct MapAnalyzer;

impl MapAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// Analyzes a map.
    ///
    /// # Examples
    ///
    /// ```
    /// use hexgen::{GenerationConfig, HexMapGenerator, MapAnalyzer};
    ///
    /// let generated = HexMapGenerator::new()
    ///     .generate_map(&GenerationConfig::balanced(3))
    ///     .unwrap();
    /// let report = MapAnalyzer::new().analyze(&generated.map);
    /// assert_eq!(report.total_tiles, generated.map.len());
    /// ```
    pub fn analyze(&self, map: &HexMap) -> AnalysisReport {
        let mut tile_distribution = BTreeMap::new();
        for (_, tile) in map.iter() {
            *tile_distribution.entry(tile).or_insert(0) += 1;
        }

        let total_tiles = map.len();
        let density = |predicate: fn(TileType) -> bool| {
            if total_tiles == 0 {
                return 0.0;
            }
            let matching: usize = tile_distribution
                .iter()
                .filter(|(tile, _)| predicate(**tile))
                .map(|(_, count)| count)
                .sum();
            matching as f64 / total_tiles as f64
        };
        let resource_density = density(TileType::is_resource);
        let combat_density = density(TileType::is_combat);

        let mut report = AnalysisReport {
            total_tiles,
            tile_distribution,
            resource_density,
            combat_density,
            is_balanced: true,
            warnings: Vec::new(),
            recommendations: Vec::new(),
        };

        self.check_balance(&mut report);
        self.add_recommendations(&mut report);
        report
    }

    fn check_balance(&self, report: &mut AnalysisReport) {
        if report.count(TileType::Home) != 1 {
            report
                .warnings
                .push("Map must have exactly 1 home tile".to_string());
            report.is_balanced = false;
        }

        let objectives = report.count(TileType::Objective);
        if objectives == 0 {
            report
                .warnings
                .push("Map has no objectives, it cannot be won".to_string());
            report.is_balanced = false;
        } else if objectives == 1 {
            report
                .recommendations
                .push("Only 1 objective, the game may be too short".to_string());
        } else if objectives > 4 {
            report.warnings.push(format!(
                "Many objectives ({}), the map may be too difficult",
                objectives
            ));
        }

        if report.resource_density < 0.3 {
            report.warnings.push(format!(
                "Low resource density ({:.0}%), the map may be too difficult",
                report.resource_density * 100.0
            ));
        } else if report.resource_density > 0.7 {
            report.warnings.push(format!(
                "High resource density ({:.0}%), the map may be too easy",
                report.resource_density * 100.0
            ));
        }

        if report.share(TileType::Impassable) > 0.25 {
            report
                .warnings
                .push("Too many impassable tiles, progression may be blocked".to_string());
        }

        if report.tile_distribution.len() < 5 {
            report
                .warnings
                .push("Low tile variety, the map may feel repetitive".to_string());
        }
    }

    fn add_recommendations(&self, report: &mut AnalysisReport) {
        if report.count(TileType::Field) < 3 {
            report
                .recommendations
                .push("Add more Field tiles for food production".to_string());
        }

        if report.count(TileType::Forest) < 3 {
            report
                .recommendations
                .push("Add more Forest tiles for wood production".to_string());
        }

        if report.count(TileType::Settlement) == 0 {
            report
                .recommendations
                .push("Consider adding Settlement tiles for power generation".to_string());
        }

        let events: usize = TileType::EVENTS.iter().map(|&tile| report.count(tile)).sum();
        if events < 3 {
            report
                .recommendations
                .push("Add more event tiles (Treasure, Tavern, Camp) for variety".to_string());
        }

        if report.share(TileType::Crossing) > 0.1 {
            report
                .recommendations
                .push("Many crossings, make sure wood for bridges is plentiful".to_string());
        }
    }
}
