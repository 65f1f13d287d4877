//! # Validation
//!
//! Checks run before generation (on the config) and after it (on the map).
//!
//! Config checks short-circuit on the first failure and consume no
//! randomness. Map checks collect every finding into a [`ValidationReport`];
//! only `Error` findings block acceptance of a map.

use crate::config::{MAX_MAP_RADIUS, MIN_INTERESTING_TILES, PERCENTAGE_TOLERANCE};
use crate::utils::{reachable_from, within_tolerance};
use crate::{GenerationConfig, HexCoordinate, HexMap, TileType};
use log::{error, info, warn};
use serde::Serialize;

/// Impassable share above which a map is flagged.
const MAX_IMPASSABLE_SHARE: f64 = 0.25;

/// Reasons a configuration is rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("objective count must be at least 1, a map without objectives cannot be won")]
    NoObjectives,

    #[error("radius must be at least 1 (got {0})")]
    RadiusTooSmall(i32),

    #[error("radius must be at most {max} (got {radius})")]
    RadiusTooLarge { radius: i32, max: i32 },

    #[error("terrain percentages must sum to 100 (got {0:.1})")]
    PercentageSum(f64),

    #[error("weight for {tile} must be a non-negative number (got {weight})")]
    NegativeWeight { tile: TileType, weight: f64 },

    #[error("{name} must be within 0.0..=1.0 (got {value})")]
    DialOutOfRange { name: &'static str, value: f64 },

    #[error("minimum objective distance must be at least 1 (got {0})")]
    InvalidSpacing(i32),
}

/// Checks a configuration before any generation work.
///
/// Order matters: objectives, radius bounds, then the percentage sum, followed
/// by the remaining range checks. The first failure is returned.
pub fn validate_config(config: &GenerationConfig) -> Result<(), ConfigError> {
    if config.objective_count < 1 {
        return Err(ConfigError::NoObjectives);
    }

    if config.radius < 1 {
        return Err(ConfigError::RadiusTooSmall(config.radius));
    }

    if config.radius > MAX_MAP_RADIUS {
        return Err(ConfigError::RadiusTooLarge {
            radius: config.radius,
            max: MAX_MAP_RADIUS,
        });
    }

    let total = config.terrain.total();
    if !within_tolerance(total, 100.0, PERCENTAGE_TOLERANCE) {
        return Err(ConfigError::PercentageSum(total));
    }

    for (tile, weight) in config.terrain.entries() {
        if !weight.is_finite() || weight < 0.0 {
            return Err(ConfigError::NegativeWeight { tile, weight });
        }
    }

    for (name, value) in [
        ("resource_centralization", config.resource_centralization),
        ("danger_progression", config.danger_progression),
    ] {
        if !(0.0..=1.0).contains(&value) {
            return Err(ConfigError::DialOutOfRange { name, value });
        }
    }

    if config.min_objective_distance < 1 {
        return Err(ConfigError::InvalidSpacing(config.min_objective_distance));
    }

    Ok(())
}

/// How much a finding matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    /// Blocks acceptance of the map
    Error,
    /// Advisory only
    Warning,
}

/// A single validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Finding {
    pub severity: Severity,
    pub message: String,
}

impl Finding {
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            message: message.into(),
        }
    }
}

/// Ordered findings from one validation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    findings: Vec<Finding>,
    is_valid: bool,
}

impl ValidationReport {
    /// Builds a report; it is valid when no finding is an error.
    pub fn new(findings: Vec<Finding>) -> Self {
        let is_valid = findings.iter().all(|f| f.severity != Severity::Error);
        Self { findings, is_valid }
    }

    /// Returns a new report with extra findings appended.
    pub fn with_findings(self, extra: impl IntoIterator<Item = Finding>) -> Self {
        let mut findings = self.findings;
        findings.extend(extra);
        Self::new(findings)
    }

    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    pub fn errors(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &Finding> {
        self.findings
            .iter()
            .filter(|f| f.severity == Severity::Warning)
    }

    /// Error messages joined into one line.
    pub fn error_summary(&self) -> String {
        let messages: Vec<&str> = self.errors().map(|f| f.message.as_str()).collect();
        if messages.is_empty() {
            "no errors".to_string()
        } else {
            messages.join("; ")
        }
    }

    /// Emits the report through the log facade.
    pub fn log_results(&self) {
        if self.is_valid {
            info!("Map validation passed");
        } else {
            error!("Map validation failed");
        }

        for finding in &self.findings {
            match finding.severity {
                Severity::Error => error!("Validation error: {}", finding.message),
                Severity::Warning => warn!("Validation warning: {}", finding.message),
            }
        }
    }
}

/// Checks a finished map.
///
/// Errors: home count other than one, no objectives. Everything else is a
/// warning. Safe to call on any map, including partial ones.
pub fn validate_map(map: &HexMap) -> ValidationReport {
    let mut findings = Vec::new();

    let homes = map.positions_of(TileType::Home);
    match homes.len() {
        0 => findings.push(Finding::error("No home tile found")),
        1 => {
            if homes[0] != HexCoordinate::origin() {
                findings.push(Finding::warning(format!(
                    "Home tile is at {} instead of the origin",
                    homes[0]
                )));
            }
        }
        n => findings.push(Finding::error(format!(
            "Found {} home tiles, exactly 1 is required",
            n
        ))),
    }

    let objectives = map.count(TileType::Objective);
    if objectives == 0 {
        findings.push(Finding::error("No objective tiles found, the map cannot be won"));
    } else if objectives == 1 {
        findings.push(Finding::warning("Only 1 objective, the game may be short"));
    }

    if map.len() < MIN_INTERESTING_TILES {
        findings.push(Finding::warning(format!(
            "Very small map ({} tiles)",
            map.len()
        )));
    }

    if !map.is_empty() {
        let impassable_share = map.count(TileType::Impassable) as f64 / map.len() as f64;
        if impassable_share > MAX_IMPASSABLE_SHARE {
            findings.push(Finding::warning(format!(
                "Impassable tiles cover {:.0}% of the map",
                impassable_share * 100.0
            )));
        }
    }

    if homes.len() == 1 {
        let reachable = reachable_from(homes[0], |hex| map.get(hex));
        let unreachable = map
            .iter()
            .filter(|&(hex, tile)| tile.is_important() && !reachable.contains(&hex))
            .count();
        if unreachable > 0 {
            findings.push(Finding::warning(format!(
                "{} important tiles are unreachable from home",
                unreachable
            )));
        }
    }

    ValidationReport::new(findings)
}
