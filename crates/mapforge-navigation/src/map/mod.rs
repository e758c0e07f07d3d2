//! Map-related functionality for navigation.
//!
//! This module provides the tile grid used as the collision layer of a
//! world, and related utilities for building and inspecting it.

pub mod tile_grid;

pub use tile_grid::{TileCell, TileGrid};
