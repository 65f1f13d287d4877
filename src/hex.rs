//! # Hex Coordinates
//!
//! Cube coordinates for a hexagonal lattice together with neighbor and
//! distance math.

use crate::{HexgenError, HexgenResult};
use serde::{Deserialize, Serialize};

/// The six cube directions, in canonical order.
pub const HEX_DIRECTIONS: [HexCoordinate; 6] = [
    HexCoordinate { q: 1, r: -1, s: 0 },
    HexCoordinate { q: 1, r: 0, s: -1 },
    HexCoordinate { q: 0, r: 1, s: -1 },
    HexCoordinate { q: -1, r: 1, s: 0 },
    HexCoordinate { q: -1, r: 0, s: 1 },
    HexCoordinate { q: 0, r: -1, s: 1 },
];

/// A cell on the hex grid in cube coordinates.
///
/// The three axes always satisfy `q + r + s == 0`.
///
/// # Examples
///
/// ```
/// use hexgen::HexCoordinate;
///
/// let hex = HexCoordinate::new(2, -1);
/// assert_eq!(hex.s, -1);
/// assert_eq!(hex.radius(), 2);
///
/// let neighbors = hex.neighbors();
/// assert_eq!(neighbors.len(), 6);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "CubeTriple")]
pub struct HexCoordinate {
    pub q: i32,
    pub r: i32,
    pub s: i32,
}

impl HexCoordinate {
    /// Creates a coordinate from its `q` and `r` axes; `s` is derived.
    pub fn new(q: i32, r: i32) -> Self {
        Self { q, r, s: -q - r }
    }

    /// Creates a coordinate from all three axes, rejecting triples off the
    /// `q + r + s == 0` plane.
    pub fn from_cube(q: i32, r: i32, s: i32) -> HexgenResult<Self> {
        if q.checked_add(r).and_then(|sum| sum.checked_add(s)) != Some(0) {
            return Err(HexgenError::InvalidCoordinate { q, r, s });
        }
        Ok(Self { q, r, s })
    }

    /// Returns the origin, where the home tile lives.
    pub fn origin() -> Self {
        Self { q: 0, r: 0, s: 0 }
    }

    /// Returns the six adjacent coordinates in canonical direction order.
    pub fn neighbors(self) -> [HexCoordinate; 6] {
        HEX_DIRECTIONS.map(|direction| self + direction)
    }

    /// Calculates the cube distance to another coordinate.
    ///
    /// # Examples
    ///
    /// ```
    /// use hexgen::HexCoordinate;
    ///
    /// let a = HexCoordinate::new(0, 0);
    /// let b = HexCoordinate::new(3, -1);
    /// assert_eq!(a.distance(b), 3);
    /// ```
    pub fn distance(self, other: HexCoordinate) -> u32 {
        let dq = (self.q - other.q).unsigned_abs();
        let dr = (self.r - other.r).unsigned_abs();
        let ds = (self.s - other.s).unsigned_abs();
        (dq + dr + ds) / 2
    }

    /// Distance from the origin.
    pub fn radius(self) -> u32 {
        self.distance(Self::origin())
    }
}

/// Unchecked wire form, only turned into a coordinate through `from_cube`.
#[derive(Deserialize)]
struct CubeTriple {
    q: i32,
    r: i32,
    s: i32,
}

impl TryFrom<CubeTriple> for HexCoordinate {
    type Error = HexgenError;

    fn try_from(raw: CubeTriple) -> HexgenResult<Self> {
        Self::from_cube(raw.q, raw.r, raw.s)
    }
}

impl std::ops::Add for HexCoordinate {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            q: self.q + other.q,
            r: self.r + other.r,
            s: self.s + other.s,
        }
    }
}

impl std::ops::Sub for HexCoordinate {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            q: self.q - other.q,
            r: self.r - other.r,
            s: self.s - other.s,
        }
    }
}

impl std::fmt::Display for HexCoordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.q, self.r, self.s)
    }
}

/// Enumerates every coordinate within `radius` of the origin.
///
/// Ordering is `q` ascending, then `r` ascending, and is stable across calls.
/// A negative radius yields an empty grid.
pub fn hex_grid(radius: i32) -> Vec<HexCoordinate> {
    let mut positions = Vec::new();

    for q in -radius..=radius {
        let r_min = (-radius).max(-q - radius);
        let r_max = radius.min(-q + radius);
        for r in r_min..=r_max {
            positions.push(HexCoordinate::new(q, r));
        }
    }

    positions
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_new_derives_third_axis() {
        let hex = HexCoordinate::new(3, -5);
        assert_eq!(hex.s, 2);
        assert_eq!(hex.q + hex.r + hex.s, 0);
    }

    #[test]
    fn test_from_cube_rejects_off_plane() {
        assert!(HexCoordinate::from_cube(1, -1, 0).is_ok());
        assert!(matches!(
            HexCoordinate::from_cube(1, 1, 1),
            Err(HexgenError::InvalidCoordinate { q: 1, r: 1, s: 1 })
        ));
    }

    #[test]
    fn test_from_cube_rejects_overflowing_sum() {
        assert!(HexCoordinate::from_cube(i32::MAX, i32::MAX, 2).is_err());
    }

    #[test]
    fn test_deserialize_checks_cube_constraint() {
        let hex: HexCoordinate = serde_json::from_str(r#"{"q":2,"r":-3,"s":1}"#).unwrap();
        assert_eq!(hex, HexCoordinate::new(2, -3));

        let off_plane = serde_json::from_str::<HexCoordinate>(r#"{"q":1,"r":1,"s":1}"#);
        assert!(off_plane.is_err());
    }

    #[test]
    fn test_neighbors_are_distinct_and_adjacent() {
        let center = HexCoordinate::new(2, -3);
        let neighbors = center.neighbors();
        let unique: HashSet<_> = neighbors.iter().copied().collect();

        assert_eq!(unique.len(), 6);
        for neighbor in neighbors {
            assert_eq!(center.distance(neighbor), 1);
            assert_eq!(neighbor.q + neighbor.r + neighbor.s, 0);
        }
    }

    #[test]
    fn test_neighbor_order_matches_directions() {
        let origin = HexCoordinate::origin();
        assert_eq!(origin.neighbors(), HEX_DIRECTIONS);
        assert_eq!(origin.neighbors()[0], HexCoordinate::new(1, -1));
        assert_eq!(origin.neighbors()[5], HexCoordinate::new(0, -1));
    }

    #[test]
    fn test_distance() {
        let a = HexCoordinate::new(-2, 1);
        let b = HexCoordinate::new(3, -2);

        assert_eq!(a.distance(b), 5);
        assert_eq!(b.distance(a), 5);
        assert_eq!(a.distance(a), 0);
        assert_eq!(HexCoordinate::new(0, 4).radius(), 4);
    }

    #[test]
    fn test_add_sub() {
        let a = HexCoordinate::new(1, 2);
        let b = HexCoordinate::new(-3, 1);
        assert_eq!(a + b - b, a);
        assert_eq!((a + b).q + (a + b).r + (a + b).s, 0);
    }

    #[test]
    fn test_hex_grid_counts() {
        assert_eq!(hex_grid(0), vec![HexCoordinate::origin()]);
        assert_eq!(hex_grid(1).len(), 7);
        assert_eq!(hex_grid(3).len(), 37);
        assert_eq!(hex_grid(10).len(), 331);
        assert!(hex_grid(-1).is_empty());
    }

    #[test]
    fn test_hex_grid_within_radius_and_unique() {
        let grid = hex_grid(4);
        let unique: HashSet<_> = grid.iter().copied().collect();

        assert_eq!(unique.len(), grid.len());
        assert!(grid.iter().all(|hex| hex.radius() <= 4));
    }
}
