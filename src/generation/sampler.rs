//! # Tile Sampling
//!
//! Weighted categorical sampling over the terrain percentage table.

use crate::{TerrainWeights, TileType};
use rand::Rng;

/// Draws fill tiles according to the configured percentages.
///
/// Two cumulative tables are built once: one over every category and one with
/// resource categories zeroed. A draw that lands past the last cumulative
/// bound (rounding, or withheld resource weight) yields [`TileType::Empty`].
#[derive(Debug, Clone)]
pub struct TileTypeSampler {
    with_resources: Vec<(TileType, f64)>,
    without_resources: Vec<(TileType, f64)>,
}

impl TileTypeSampler {
    /// Builds the cumulative tables for a weight set.
    pub fn new(weights: &TerrainWeights) -> Self {
        Self {
            with_resources: cumulative(weights, true),
            without_resources: cumulative(weights, false),
        }
    }

    /// Draws one tile type.
    ///
    /// # Examples
    ///
    /// ```
    /// use hexgen::{TerrainWeights, TileType, TileTypeSampler};
    /// use rand::{rngs::StdRng, SeedableRng};
    ///
    /// let sampler = TileTypeSampler::new(&TerrainWeights::only_empty());
    /// let mut rng = StdRng::seed_from_u64(1);
    /// assert_eq!(sampler.sample(&mut rng, true), TileType::Empty);
    /// ```
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R, allow_resources: bool) -> TileType {
        let roll = rng.gen::<f64>() * 100.0;
        self.pick(roll, allow_resources)
    }

    /// Maps a roll in `[0, 100)` to a tile type.
    pub fn pick(&self, roll: f64, allow_resources: bool) -> TileType {
        let table = if allow_resources {
            &self.with_resources
        } else {
            &self.without_resources
        };

        table
            .iter()
            .find(|(_, bound)| roll < *bound)
            .map_or(TileType::Empty, |(tile, _)| *tile)
    }
}

fn cumulative(weights: &TerrainWeights, allow_resources: bool) -> Vec<(TileType, f64)> {
    let mut total = 0.0;
    weights
        .entries()
        .into_iter()
        .map(|(tile, weight)| {
            if allow_resources || !tile.is_resource() {
                total += weight.max(0.0);
            }
            (tile, total)
        })
        .collect()
}
