//! # Utilities Module
//!
//! Hex-grid arithmetic and graph search shared by generation and validation.

pub mod math;
pub mod pathfinding;

pub use self::math::*;
pub use self::pathfinding::*;
