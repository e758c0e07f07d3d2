#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![doc = "A `no_std` library for tile-world geometry."]
#![doc = ""]
#![doc = "This crate provides world bounds, tile coordinates, world positions and displacements,"]
#![doc = "and cardinal axis-aligned bounding boxes with tile-space projection."]

use core::fmt;
use libm::{floor, fmod};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod bounding_box;
pub mod error;
pub mod position;

pub use bounding_box::{BoundingBox, CardinalYaw};
pub use error::GeometryError;
pub use position::{WorldDisplacement, WorldPosition};

/// Normalize an angle in degrees to be within `[0, 360)`.
///
/// # Arguments
///
/// * `degrees`: The angle in degrees to normalize.
///
/// # Returns
///
/// The normalized angle in degrees.
pub fn normalize_degrees(degrees: f64) -> f64 {
    let mut a = fmod(degrees, 360.0);
    if a < 0.0 {
        a += 360.0;
    }
    // fmod of a tiny negative value plus 360 rounds up to exactly 360
    if a >= 360.0 {
        a -= 360.0;
    }
    a
}

/// The extent of a tile world: its size in tiles and the size of one tile in
/// world units.
///
/// Positions and displacements take a `&WorldBounds` wherever they need to
/// validate coordinates or convert to tile indices.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WorldBounds {
    /// Number of tile columns.
    width_tiles: u32,
    /// Number of tile rows.
    height_tiles: u32,
    /// Width of one tile in world units.
    tile_width: f64,
    /// Height of one tile in world units.
    tile_height: f64,
}

impl WorldBounds {
    /// Construct new world bounds.
    ///
    /// # Arguments
    ///
    /// * `width_tiles`: Number of tile columns.
    /// * `height_tiles`: Number of tile rows.
    /// * `tile_width`: Width of one tile in world units.
    /// * `tile_height`: Height of one tile in world units.
    ///
    /// # Errors
    ///
    /// Returns `Err(GeometryError::InvalidDimensions)` if either tile count is zero.
    /// Returns `Err(GeometryError::InvalidTileSize)` if either tile size is not positive.
    pub fn new(
        width_tiles: u32,
        height_tiles: u32,
        tile_width: f64,
        tile_height: f64,
    ) -> Result<Self, GeometryError> {
        if width_tiles == 0 || height_tiles == 0 {
            return Err(GeometryError::InvalidDimensions("tile counts must be non-zero"));
        }
        // Negated comparison so NaN is rejected as well
        if !(tile_width > 0.0) || !(tile_height > 0.0) {
            return Err(GeometryError::InvalidTileSize("must be positive"));
        }
        Ok(WorldBounds {
            width_tiles,
            height_tiles,
            tile_width,
            tile_height,
        })
    }

    /// Returns the number of tile columns.
    pub fn width_tiles(&self) -> u32 {
        self.width_tiles
    }

    /// Returns the number of tile rows.
    pub fn height_tiles(&self) -> u32 {
        self.height_tiles
    }

    /// Returns the width of one tile in world units.
    pub fn tile_width(&self) -> f64 {
        self.tile_width
    }

    /// Returns the height of one tile in world units.
    pub fn tile_height(&self) -> f64 {
        self.tile_height
    }

    /// Returns the world width in world units.
    pub fn width(&self) -> f64 {
        self.width_tiles as f64 * self.tile_width
    }

    /// Returns the world height in world units.
    pub fn height(&self) -> f64 {
        self.height_tiles as f64 * self.tile_height
    }

    /// Checks whether a world coordinate lies inside the world.
    ///
    /// The far edges are exclusive.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= 0.0 && x < self.width() && y >= 0.0 && y < self.height()
    }

    /// Checks whether a tile index lies inside the world.
    pub fn contains_tile(&self, tile: TileCoord) -> bool {
        tile.x >= 0
            && tile.y >= 0
            && (tile.x as u32) < self.width_tiles
            && (tile.y as u32) < self.height_tiles
    }

    /// Converts a world coordinate to the index of the tile containing it.
    ///
    /// Coordinates outside the world produce tile indices outside the world;
    /// nothing is clamped.
    pub fn tile_of(&self, x: f64, y: f64) -> TileCoord {
        TileCoord::new(
            floor(x / self.tile_width) as i32,
            floor(y / self.tile_height) as i32,
        )
    }

    /// Returns the world coordinate of the centre of a tile.
    pub fn tile_center(&self, tile: TileCoord) -> (f64, f64) {
        (
            (tile.x as f64 + 0.5) * self.tile_width,
            (tile.y as f64 + 0.5) * self.tile_height,
        )
    }
}

impl fmt::Display for WorldBounds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WorldBounds ({}x{} tiles, tile: {:.2}x{:.2})",
            self.width_tiles, self.height_tiles, self.tile_width, self.tile_height
        )
    }
}

/// A tile index `(x, y)`.
///
/// Indices are signed so that positions outside the world still map to a
/// well-defined (out of range) tile.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileCoord {
    /// Column index.
    pub x: i32,
    /// Row index.
    pub y: i32,
}

impl TileCoord {
    /// Creates a new `TileCoord`.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between two tiles, saturating at `u32::MAX`.
    pub fn manhattan_distance(&self, other: &TileCoord) -> u32 {
        self.x.abs_diff(other.x).saturating_add(self.y.abs_diff(other.y))
    }

    /// Returns the tile offset by `(dx, dy)`.
    #[must_use]
    pub const fn offset(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }

    /// The four cardinal neighbours in the order up, left, right, down.
    pub fn neighbors4(&self) -> [TileCoord; 4] {
        [
            self.offset(0, -1),
            self.offset(-1, 0),
            self.offset(1, 0),
            self.offset(0, 1),
        ]
    }

    /// Returns true if `other` shares an edge with this tile.
    pub fn is_adjacent(&self, other: &TileCoord) -> bool {
        self.manhattan_distance(other) == 1
    }
}

impl From<(i32, i32)> for TileCoord {
    fn from((x, y): (i32, i32)) -> Self {
        TileCoord::new(x, y)
    }
}

impl fmt::Display for TileCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A closed rectangular range of tiles `[min, max]`.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct TileSpan {
    /// Top-left tile (inclusive).
    pub min: TileCoord,
    /// Bottom-right tile (inclusive).
    pub max: TileCoord,
}

impl TileSpan {
    /// Creates a new span. A `max` below `min` on either axis yields an empty span.
    #[must_use]
    pub const fn new(min: TileCoord, max: TileCoord) -> Self {
        Self { min, max }
    }

    /// Number of tile columns covered.
    pub fn width(&self) -> u32 {
        if self.max.x < self.min.x {
            0
        } else {
            self.max.x.abs_diff(self.min.x) + 1
        }
    }

    /// Number of tile rows covered.
    pub fn height(&self) -> u32 {
        if self.max.y < self.min.y {
            0
        } else {
            self.max.y.abs_diff(self.min.y) + 1
        }
    }

    /// Number of tiles covered.
    pub fn tile_count(&self) -> u64 {
        self.width() as u64 * self.height() as u64
    }

    /// Returns true if the span covers no tiles.
    pub fn is_empty(&self) -> bool {
        self.tile_count() == 0
    }

    /// Checks whether a tile lies inside the span.
    pub fn contains(&self, tile: TileCoord) -> bool {
        tile.x >= self.min.x && tile.x <= self.max.x && tile.y >= self.min.y && tile.y <= self.max.y
    }

    /// Iterates over the covered tiles in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = TileCoord> + use<> {
        let (min, max) = (self.min, self.max);
        (min.y..=max.y).flat_map(move |y| (min.x..=max.x).map(move |x| TileCoord::new(x, y)))
    }
}

impl fmt::Display for TileSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{} .. {}]", self.min, self.max)
    }
}
