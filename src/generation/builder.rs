//! In-progress map state owned by a single generation run.

use crate::{hex_grid, HexCoordinate, HexMap, HexgenError, HexgenResult, TileType};
use std::collections::BTreeMap;

/// Tiles placed so far, over a fixed grid.
///
/// Owned exclusively by one pipeline run and consumed by [`MapBuilder::finish`].
#[derive(Debug)]
pub(crate) struct MapBuilder {
    radius: i32,
    grid: Vec<HexCoordinate>,
    tiles: BTreeMap<HexCoordinate, TileType>,
}

impl MapBuilder {
    pub(crate) fn new(radius: i32) -> Self {
        Self {
            radius,
            grid: hex_grid(radius),
            tiles: BTreeMap::new(),
        }
    }

    pub(crate) fn radius(&self) -> i32 {
        self.radius
    }

    pub(crate) fn grid_len(&self) -> usize {
        self.grid.len()
    }

    /// Whether the coordinate lies on the grid.
    pub(crate) fn contains(&self, hex: HexCoordinate) -> bool {
        hex.radius() as i64 <= self.radius as i64
    }

    pub(crate) fn get(&self, hex: HexCoordinate) -> Option<TileType> {
        self.tiles.get(&hex).copied()
    }

    pub(crate) fn is_occupied(&self, hex: HexCoordinate) -> bool {
        self.tiles.contains_key(&hex)
    }

    pub(crate) fn set(&mut self, hex: HexCoordinate, tile: TileType) {
        debug_assert!(self.contains(hex), "{} is outside the grid", hex);
        self.tiles.insert(hex, tile);
    }

    /// Places `tile` only if the coordinate is on the grid and still vacant.
    pub(crate) fn place_if_vacant(&mut self, hex: HexCoordinate, tile: TileType) -> bool {
        if !self.contains(hex) || self.is_occupied(hex) {
            return false;
        }
        self.tiles.insert(hex, tile);
        true
    }

    /// Vacant grid coordinates matching a predicate, in grid order.
    pub(crate) fn vacant_where<P>(&self, predicate: P) -> Vec<HexCoordinate>
    where
        P: Fn(HexCoordinate) -> bool,
    {
        self.grid
            .iter()
            .copied()
            .filter(|&hex| !self.is_occupied(hex) && predicate(hex))
            .collect()
    }

    /// Placed coordinates holding a tile type, in coordinate order.
    pub(crate) fn positions_of(&self, tile_type: TileType) -> Vec<HexCoordinate> {
        self.tiles
            .iter()
            .filter(|&(_, &tile)| tile == tile_type)
            .map(|(&hex, _)| hex)
            .collect()
    }

    /// Placed coordinates that must stay reachable, in coordinate order.
    pub(crate) fn important_positions(&self) -> Vec<HexCoordinate> {
        self.tiles
            .iter()
            .filter(|&(_, &tile)| tile.is_important())
            .map(|(&hex, _)| hex)
            .collect()
    }

    /// Freezes the builder into a map. Every grid cell must be filled.
    pub(crate) fn finish(self) -> HexgenResult<HexMap> {
        if self.tiles.len() != self.grid.len() {
            return Err(HexgenError::InvalidMap(format!(
                "{} of {} cells filled",
                self.tiles.len(),
                self.grid.len()
            )));
        }
        Ok(HexMap::from_map(self.tiles))
    }
}
