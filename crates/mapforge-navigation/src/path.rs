//! The route returned by a path search.

use std::fmt;

use mapforge_geometry::{TileCoord, WorldBounds, WorldPosition};

/// A stack of tiles describing a route.
///
/// The search pushes tiles from the goal back to the start, leaving the start
/// on top. Popping therefore walks the route in travel order, and the path is
/// finished once everything has been popped.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    // Bottom of the stack first.
    tiles: Vec<TileCoord>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    /// Puts `tile` on top of the stack.
    pub fn push(&mut self, tile: TileCoord) {
        self.tiles.push(tile);
    }

    /// Removes and returns the next tile to visit.
    pub fn pop(&mut self) -> Option<TileCoord> {
        self.tiles.pop()
    }

    /// The next tile to visit, without removing it.
    pub fn peek(&self) -> Option<TileCoord> {
        self.tiles.last().copied()
    }

    /// Number of tiles left, including both ends.
    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Number of moves between the remaining tiles.
    pub fn steps(&self) -> usize {
        self.tiles.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// True once every tile has been popped. An empty search result is
    /// finished from the start.
    pub fn is_finished(&self) -> bool {
        self.is_empty()
    }

    /// First tile of the remaining route (top of the stack).
    pub fn start(&self) -> Option<TileCoord> {
        self.peek()
    }

    /// Last tile of the route (bottom of the stack).
    pub fn goal(&self) -> Option<TileCoord> {
        self.tiles.first().copied()
    }

    pub fn contains(&self, tile: TileCoord) -> bool {
        self.tiles.contains(&tile)
    }

    /// Iterates over the remaining tiles in travel order, without consuming them.
    pub fn waypoints(&self) -> impl DoubleEndedIterator<Item = TileCoord> + '_ {
        self.tiles.iter().rev().copied()
    }

    /// True if every consecutive pair of tiles shares an edge.
    pub fn is_contiguous(&self) -> bool {
        self.tiles.windows(2).all(|pair| pair[0].is_adjacent(&pair[1]))
    }

    /// Centres of the remaining tiles in travel order, each facing the next one.
    pub fn to_world_positions(&self, bounds: &WorldBounds) -> Vec<WorldPosition> {
        let centers: Vec<(f64, f64)> = self.waypoints().map(|t| bounds.tile_center(t)).collect();
        let mut positions: Vec<WorldPosition> = Vec::with_capacity(centers.len());
        for (i, &(x, y)) in centers.iter().enumerate() {
            let mut position = WorldPosition::new(x, y, 0.0);
            match centers.get(i + 1) {
                Some(&(nx, ny)) => position.set_heading_towards(&WorldPosition::new(nx, ny, 0.0)),
                None => {
                    if let Some(previous) = positions.last() {
                        position.set_heading(previous.heading());
                    }
                }
            }
            positions.push(position);
        }
        positions
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "<empty path>");
        }
        for (i, tile) in self.waypoints().enumerate() {
            if i > 0 {
                write!(f, " -> ")?;
            }
            write!(f, "{}", tile)?;
        }
        Ok(())
    }
}
