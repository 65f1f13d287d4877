//! # Grid Mathematics
//!
//! Closed-form helpers for hexagonal grids.

use crate::HexCoordinate;

/// Number of cells in a hexagonal grid of the given radius: `3r² + 3r + 1`.
///
/// # Examples
///
/// ```
/// use hexgen::utils::hex_cell_count;
///
/// assert_eq!(hex_cell_count(0), 1);
/// assert_eq!(hex_cell_count(3), 37);
/// assert_eq!(hex_cell_count(10), 331);
/// ```
pub fn hex_cell_count(radius: i32) -> usize {
    if radius < 0 {
        return 0;
    }
    let r = radius as usize;
    3 * r * r + 3 * r + 1
}

/// Distance from the origin scaled into `[0, 1]` by the map radius.
pub fn normalized_radius(hex: HexCoordinate, max_radius: i32) -> f64 {
    if max_radius <= 0 {
        return 0.0;
    }
    hex.radius() as f64 / max_radius as f64
}

/// Checks whether two floats are within `tolerance` of each other.
pub fn within_tolerance(value: f64, target: f64, tolerance: f64) -> bool {
    (value - target).abs() <= tolerance
}
