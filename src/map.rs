//! # Hex Maps
//!
//! The finished product of generation: a mapping from every coordinate within
//! a radius of the origin to its tile type.

use crate::{HexCoordinate, HexgenError, HexgenResult, TileType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry of a serialized map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedTile {
    pub q: i32,
    pub r: i32,
    pub s: i32,
    pub tile: TileType,
}

/// An immutable hex map.
///
/// Entries are kept in coordinate order so iteration is reproducible. A map
/// built by the generator covers its radius with no gaps; maps assembled by
/// hand through [`HexMap::from_tiles`] may be partial, which the analyzer and
/// validator both tolerate.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(into = "Vec<PlacedTile>", try_from = "Vec<PlacedTile>")]
pub struct HexMap {
    tiles: BTreeMap<HexCoordinate, TileType>,
}

impl HexMap {
    /// Assembles a map from coordinate/tile pairs, rejecting duplicates.
    pub fn from_tiles<I>(tiles: I) -> HexgenResult<Self>
    where
        I: IntoIterator<Item = (HexCoordinate, TileType)>,
    {
        let mut map = BTreeMap::new();
        for (hex, tile) in tiles {
            if map.insert(hex, tile).is_some() {
                return Err(HexgenError::InvalidMap(format!(
                    "coordinate {} appears more than once",
                    hex
                )));
            }
        }
        Ok(Self { tiles: map })
    }

    pub(crate) fn from_map(tiles: BTreeMap<HexCoordinate, TileType>) -> Self {
        Self { tiles }
    }

    /// Gets the tile at a coordinate.
    pub fn get(&self, hex: HexCoordinate) -> Option<TileType> {
        self.tiles.get(&hex).copied()
    }

    /// Checks whether the coordinate is part of the map.
    pub fn contains(&self, hex: HexCoordinate) -> bool {
        self.tiles.contains_key(&hex)
    }

    /// Number of tiles.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// Iterates tiles in coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = (HexCoordinate, TileType)> + '_ {
        self.tiles.iter().map(|(&hex, &tile)| (hex, tile))
    }

    /// Counts tiles of one type.
    pub fn count(&self, tile_type: TileType) -> usize {
        self.tiles.values().filter(|&&tile| tile == tile_type).count()
    }

    /// All coordinates holding the given type, in coordinate order.
    pub fn positions_of(&self, tile_type: TileType) -> Vec<HexCoordinate> {
        self.iter()
            .filter(|&(_, tile)| tile == tile_type)
            .map(|(hex, _)| hex)
            .collect()
    }

    /// Largest distance from the origin of any tile.
    pub fn radius(&self) -> u32 {
        self.tiles.keys().map(|hex| hex.radius()).max().unwrap_or(0)
    }

    /// Flattened entries, suitable for persistence.
    pub fn to_entries(&self) -> Vec<PlacedTile> {
        self.iter()
            .map(|(hex, tile)| PlacedTile {
                q: hex.q,
                r: hex.r,
                s: hex.s,
                tile,
            })
            .collect()
    }

    /// Renders the map as rows of glyphs, one row per `r`.
    pub fn render_text(&self) -> String {
        let radius = self.radius() as i32;
        let mut out = String::new();

        for r in -radius..=radius {
            out.push_str(&" ".repeat(r.unsigned_abs() as usize));
            for q in -radius..=radius {
                let hex = HexCoordinate::new(q, r);
                if let Some(tile) = self.get(hex) {
                    out.push(tile.glyph());
                    out.push(' ');
                }
            }
            out.push('\n');
        }

        out
    }
}

impl From<HexMap> for Vec<PlacedTile> {
    fn from(map: HexMap) -> Self {
        map.to_entries()
    }
}

impl TryFrom<Vec<PlacedTile>> for HexMap {
    type Error = HexgenError;

    fn try_from(entries: Vec<PlacedTile>) -> HexgenResult<Self> {
        let tiles = entries
            .into_iter()
            .map(|entry| Ok((HexCoordinate::from_cube(entry.q, entry.r, entry.s)?, entry.tile)))
            .collect::<HexgenResult<Vec<_>>>()?;
        Self::from_tiles(tiles)
    }
}
