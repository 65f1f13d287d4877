//! # Tile Types
//!
//! The closed set of categories the generator assigns to hex cells.
//!
//! The generator only decides a tile's *type*; economic attributes live with
//! whatever consumes the map.

use serde::{Deserialize, Serialize};

/// Category of a single hex cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TileType {
    /// Player start, always at the origin
    Home,
    /// Win-condition target
    Objective,
    /// Plain passable terrain
    Empty,
    /// Blocks movement (mountains)
    Impassable,
    /// Passable but costly to cross (rivers)
    Crossing,
    /// Food producer
    Field,
    /// Wood producer
    Forest,
    /// First ore producer
    Mine,
    /// Second ore producer
    Shaft,
    /// One-off reward event
    Treasure,
    /// Bonus-choice event
    Tavern,
    /// Risk/battle event
    Camp,
    /// Village-like producer of power at a food cost
    Settlement,
}

impl TileType {
    /// Every category, in declaration order.
    pub const ALL: [TileType; 13] = [
        TileType::Home,
        TileType::Objective,
        TileType::Empty,
        TileType::Impassable,
        TileType::Crossing,
        TileType::Field,
        TileType::Forest,
        TileType::Mine,
        TileType::Shaft,
        TileType::Treasure,
        TileType::Tavern,
        TileType::Camp,
        TileType::Settlement,
    ];

    /// Event categories placed by count rather than by percentage.
    pub const EVENTS: [TileType; 3] = [TileType::Treasure, TileType::Tavern, TileType::Camp];

    /// Returns true for producer tiles that the centralization bias can withhold.
    ///
    /// Settlements count as producers here.
    pub fn is_resource(self) -> bool {
        matches!(
            self,
            TileType::Field
                | TileType::Forest
                | TileType::Mine
                | TileType::Shaft
                | TileType::Settlement
        )
    }

    /// Returns true for the event categories.
    pub fn is_event(self) -> bool {
        matches!(self, TileType::Treasure | TileType::Tavern | TileType::Camp)
    }

    /// Returns true for tiles that must stay reachable from home.
    pub fn is_important(self) -> bool {
        self == TileType::Objective || self.is_event()
    }

    /// Returns true for tiles that count toward combat density.
    pub fn is_combat(self) -> bool {
        matches!(self, TileType::Objective | TileType::Camp)
    }

    /// Returns true if units can move through this tile.
    pub fn is_passable(self) -> bool {
        self != TileType::Impassable
    }

    /// Single character used by text renderings.
    pub fn glyph(self) -> char {
        match self {
            TileType::Home => '@',
            TileType::Objective => 'X',
            TileType::Empty => '.',
            TileType::Impassable => '^',
            TileType::Crossing => '~',
            TileType::Field => '"',
            TileType::Forest => 'T',
            TileType::Mine => 'm',
            TileType::Shaft => 's',
            TileType::Treasure => '$',
            TileType::Tavern => 't',
            TileType::Camp => 'c',
            TileType::Settlement => 'v',
        }
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            TileType::Home => "Home",
            TileType::Objective => "Objective",
            TileType::Empty => "Empty",
            TileType::Impassable => "Impassable",
            TileType::Crossing => "Crossing",
            TileType::Field => "Field",
            TileType::Forest => "Forest",
            TileType::Mine => "Mine",
            TileType::Shaft => "Shaft",
            TileType::Treasure => "Treasure",
            TileType::Tavern => "Tavern",
            TileType::Camp => "Camp",
            TileType::Settlement => "Settlement",
        }
    }
}

impl std::fmt::Display for TileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
