//! # Reachability
//!
//! Breadth-first reachability over the hex lattice and the greedy walk used
//! to carve a path back to the origin.

use crate::{HexCoordinate, TileType};
use pathfinding::prelude::bfs_reach;
use std::collections::HashSet;

/// Collects every coordinate reachable from `start` without crossing an
/// impassable tile.
///
/// `tile_at` returns `None` for coordinates outside the map. The start tile
/// is included when it exists, whatever its type.
pub fn reachable_from<F>(start: HexCoordinate, tile_at: F) -> HashSet<HexCoordinate>
where
    F: Fn(HexCoordinate) -> Option<TileType>,
{
    if tile_at(start).is_none() {
        return HashSet::new();
    }

    bfs_reach(start, |&hex| {
        hex.neighbors()
            .into_iter()
            .filter(|&neighbor| tile_at(neighbor).is_some_and(TileType::is_passable))
            .collect::<Vec<_>>()
    })
    .collect()
}

/// Walks greedily from `start` toward the origin.
///
/// Each step moves to the in-map neighbor closest to the origin, preferring
/// neighbors not yet visited. Ties keep canonical direction order. The walk
/// stops at the origin, when no neighbor exists, or after `step_limit` steps.
/// The returned path excludes `start`.
pub fn greedy_path_to_origin<F>(
    start: HexCoordinate,
    tile_at: F,
    step_limit: usize,
) -> Vec<HexCoordinate>
where
    F: Fn(HexCoordinate) -> Option<TileType>,
{
    let origin = HexCoordinate::origin();
    let mut path = Vec::new();
    let mut visited = HashSet::new();
    let mut current = start;

    while current != origin && path.len() < step_limit {
        visited.insert(current);

        let candidates: Vec<HexCoordinate> = current
            .neighbors()
            .into_iter()
            .filter(|&neighbor| tile_at(neighbor).is_some())
            .collect();

        let next = candidates
            .iter()
            .filter(|neighbor| !visited.contains(*neighbor))
            .min_by_key(|neighbor| neighbor.radius())
            .or_else(|| candidates.iter().min_by_key(|neighbor| neighbor.radius()));

        match next {
            Some(&next) => {
                path.push(next);
                current = next;
            }
            None => break,
        }
    }

    path
}
