//! Tile grid implementation for collision queries and path planning.
//!
//! This module provides the collision layer of a tile world: a fixed-size
//! grid of cells that are either open or blocked by an obstacle, together
//! with the size of one tile in world units. Grids can be built empty,
//! parsed from an ASCII layout or filled with random obstacles.

#![warn(missing_docs)]

use mapforge_geometry::{TileCoord, TileSpan, WorldBounds, WorldPosition};
use rand::Rng;
use tracing::debug;

use crate::error::NavigationError;

/// Symbol used for open tiles in ASCII layouts.
pub const OPEN_SYMBOL: char = '.';
/// Symbol used for obstacle tiles in ASCII layouts.
pub const OBSTACLE_SYMBOL: char = '#';

/// The content of a single tile of the collision layer.
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileCell {
    /// Nothing blocks the tile
    #[default]
    Open = 0,
    /// The tile carries an obstacle marker and cannot be entered
    Obstacle = 1,
}

impl TileCell {
    /// Converts the TileCell to its u8 representation
    pub fn as_u8(&self) -> u8 {
        *self as u8
    }

    /// Creates a TileCell from a u8 value. Any non-zero value is an obstacle.
    pub fn from_u8(value: u8) -> Self {
        match value {
            0 => TileCell::Open,
            _ => TileCell::Obstacle,
        }
    }

    /// The ASCII layout symbol for this cell
    pub fn symbol(&self) -> char {
        match self {
            TileCell::Open => OPEN_SYMBOL,
            TileCell::Obstacle => OBSTACLE_SYMBOL,
        }
    }

    /// Parses an ASCII layout symbol
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            OPEN_SYMBOL => Some(TileCell::Open),
            OBSTACLE_SYMBOL => Some(TileCell::Obstacle),
            _ => None,
        }
    }

    /// Returns true if nothing blocks the tile
    pub fn is_open(&self) -> bool {
        *self == TileCell::Open
    }
}

impl std::fmt::Display for TileCell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TileCell::Open => write!(f, "Open"),
            TileCell::Obstacle => write!(f, "Obstacle"),
        }
    }
}

/// A 2D grid of tiles marking which ones carry an obstacle.
///
/// Tile `(0, 0)` is the top-left tile; its top-left corner is the world
/// origin. Rows grow along +y.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileGrid {
    /// Tile counts and tile size
    bounds: WorldBounds,
    /// Row-major cell storage
    data: Vec<TileCell>,
}

impl TileGrid {
    /// Creates a new TileGrid with every tile open.
    ///
    /// # Arguments
    /// * `width` - Width of the grid in tiles
    /// * `height` - Height of the grid in tiles
    /// * `tile_width` - Width of one tile in world units
    /// * `tile_height` - Height of one tile in world units
    ///
    /// # Returns
    /// * `Result<Self, NavigationError>` - The created TileGrid or an error if parameters are invalid
    pub fn new(width: usize, height: usize, tile_width: f64, tile_height: f64) -> Result<Self, NavigationError> {
        if !(tile_width > 0.0) || !(tile_height > 0.0) {
            return Err(NavigationError::InvalidTileSize("Tile width and height must be positive"));
        }
        if width == 0 || height == 0 {
            return Err(NavigationError::InvalidDimensions("Width and height must be non-zero"));
        }
        // Tile indices are i32, so each axis must fit
        if width > i32::MAX as usize || height > i32::MAX as usize {
            return Err(NavigationError::InvalidDimensions("Grid axis exceeds the tile index range"));
        }
        let cells = width
            .checked_mul(height)
            .ok_or(NavigationError::InvalidDimensions("Grid dimensions too large, would cause overflow"))?;

        let bounds = WorldBounds::new(width as u32, height as u32, tile_width, tile_height)?;

        Ok(TileGrid {
            bounds,
            data: vec![TileCell::Open; cells],
        })
    }

    /// Parses a grid from ASCII rows, `.` for open tiles and `#` for obstacles.
    /// The first row is `y = 0`.
    ///
    /// # Arguments
    /// * `rows` - The layout, one string per row, all of the same length
    /// * `tile_width` - Width of one tile in world units
    /// * `tile_height` - Height of one tile in world units
    pub fn from_rows<S: AsRef<str>>(rows: &[S], tile_width: f64, tile_height: f64) -> Result<Self, NavigationError> {
        let height = rows.len();
        let width = rows.first().map(|r| r.as_ref().chars().count()).unwrap_or(0);
        if height == 0 || width == 0 {
            return Err(NavigationError::InvalidLayout("Layout must have at least one non-empty row"));
        }

        let mut grid = TileGrid::new(width, height, tile_width, tile_height)?;
        for (y, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.chars().count() != width {
                return Err(NavigationError::InvalidLayout("All rows must have the same length"));
            }
            for (x, symbol) in row.chars().enumerate() {
                let cell = TileCell::from_symbol(symbol)
                    .ok_or(NavigationError::InvalidLayout("Unknown tile symbol"))?;
                grid.data[y * width + x] = cell;
            }
        }
        Ok(grid)
    }

    /// Creates a grid and fills it with random obstacles.
    ///
    /// # Arguments
    /// * `density` - Probability in `[0, 1]` that any given tile is an obstacle
    /// * `rng` - Random source
    pub fn new_rand<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        tile_width: f64,
        tile_height: f64,
        density: f64,
        rng: &mut R,
    ) -> Result<Self, NavigationError> {
        let mut grid = TileGrid::new(width, height, tile_width, tile_height)?;
        grid.fill_random(density, rng)?;
        Ok(grid)
    }

    /// Marks each tile as an obstacle with probability `density`, leaving it open otherwise.
    pub fn fill_random<R: Rng + ?Sized>(&mut self, density: f64, rng: &mut R) -> Result<(), NavigationError> {
        if !(0.0..=1.0).contains(&density) {
            return Err(NavigationError::InvalidLayout("Obstacle density must be within [0, 1]"));
        }
        for cell in self.data.iter_mut() {
            *cell = if rng.random_bool(density) {
                TileCell::Obstacle
            } else {
                TileCell::Open
            };
        }
        debug!(
            density,
            obstacles = self.obstacle_count(),
            tiles = self.data.len(),
            "Filled tile grid with random obstacles"
        );
        Ok(())
    }

    /// Width of the grid in tiles
    pub fn width(&self) -> usize {
        self.bounds.width_tiles() as usize
    }

    /// Height of the grid in tiles
    pub fn height(&self) -> usize {
        self.bounds.height_tiles() as usize
    }

    /// World extent and tile size of this grid
    pub fn bounds(&self) -> WorldBounds {
        self.bounds
    }

    /// Checks whether a tile index lies inside the grid.
    pub fn contains(&self, tile: TileCoord) -> bool {
        self.bounds.contains_tile(tile)
    }

    /// Calculates the index in the data vector for a tile inside the grid
    fn get_index(&self, tile: TileCoord) -> usize {
        tile.y as usize * self.width() + tile.x as usize
    }

    /// Gets the cell at a tile index.
    ///
    /// # Returns
    /// * `Result<TileCell, NavigationError>` - The cell or an error if out of bounds
    pub fn get(&self, tile: TileCoord) -> Result<TileCell, NavigationError> {
        if self.contains(tile) {
            Ok(self.data[self.get_index(tile)])
        } else {
            Err(NavigationError::OutOfBounds("Tile index out of bounds"))
        }
    }

    /// Sets the cell at a tile index.
    ///
    /// # Returns
    /// * `Result<(), NavigationError>` - Success or error if out of bounds
    pub fn set(&mut self, tile: TileCoord, cell: TileCell) -> Result<(), NavigationError> {
        if self.contains(tile) {
            let index = self.get_index(tile);
            self.data[index] = cell;
            Ok(())
        } else {
            Err(NavigationError::OutOfBounds("Tile index out of bounds"))
        }
    }

    /// Sets every tile of `span` to `cell`. Nothing is written unless the
    /// whole span lies inside the grid.
    pub fn fill_span(&mut self, span: TileSpan, cell: TileCell) -> Result<(), NavigationError> {
        if span.is_empty() {
            return Ok(());
        }
        if !self.contains(span.min) || !self.contains(span.max) {
            return Err(NavigationError::OutOfBounds("Tile span out of bounds"));
        }
        for tile in span.iter() {
            let index = self.get_index(tile);
            self.data[index] = cell;
        }
        Ok(())
    }

    /// Returns true if the tile lies inside the grid and carries an obstacle.
    pub fn is_obstacle(&self, tile: TileCoord) -> bool {
        matches!(self.get(tile), Ok(TileCell::Obstacle))
    }

    /// Converts a world position to the tile containing it.
    /// Returns None if the position is outside the grid.
    pub fn world_to_tile(&self, position: &WorldPosition) -> Option<TileCoord> {
        if !position.is_valid(&self.bounds) {
            return None;
        }
        let tile = position.tile(&self.bounds);
        // Guards against rounding at the far edge
        self.contains(tile).then_some(tile)
    }

    /// Converts a tile to the world position of its centre.
    /// Returns None if the tile is outside the grid.
    pub fn tile_to_world(&self, tile: TileCoord, heading: f64) -> Option<WorldPosition> {
        if !self.contains(tile) {
            return None;
        }
        let (x, y) = self.bounds.tile_center(tile);
        Some(WorldPosition::new(x, y, heading))
    }

    /// Gets the cell at a world position.
    pub fn get_at_world(&self, position: &WorldPosition) -> Result<TileCell, NavigationError> {
        match self.world_to_tile(position) {
            Some(tile) => self.get(tile),
            None => Err(NavigationError::InvalidWorldCoordinates("World coordinates outside grid bounds")),
        }
    }

    /// Sets the cell at a world position.
    pub fn set_at_world(&mut self, position: &WorldPosition, cell: TileCell) -> Result<(), NavigationError> {
        match self.world_to_tile(position) {
            Some(tile) => self.set(tile, cell),
            None => Err(NavigationError::InvalidWorldCoordinates("World coordinates outside grid bounds")),
        }
    }

    /// Number of obstacle tiles.
    pub fn obstacle_count(&self) -> usize {
        self.data.iter().filter(|c| !c.is_open()).count()
    }

    /// Gets a reference to the underlying row-major cell data.
    pub fn cells(&self) -> &[TileCell] {
        &self.data
    }

    /// Clears the entire grid, opening every tile.
    pub fn clear(&mut self) {
        self.data.fill(TileCell::Open);
    }

    /// The layout as ASCII rows, the inverse of [`TileGrid::from_rows`].
    pub fn to_rows(&self) -> Vec<String> {
        self.data
            .chunks(self.width())
            .map(|row| row.iter().map(TileCell::symbol).collect::<String>())
            .collect()
    }
}

impl std::fmt::Display for TileGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "TileGrid ({}x{}, tile: {:.2}x{:.2})",
            self.width(),
            self.height(),
            self.bounds.tile_width(),
            self.bounds.tile_height()
        )?;
        for row in self.to_rows() {
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_grid_creation() {
        let grid = TileGrid::new(10, 8, 32.0, 16.0).unwrap();
        assert_eq!(grid.width(), 10);
        assert_eq!(grid.height(), 8);
        assert_eq!(grid.bounds().tile_width(), 32.0);
        assert_eq!(grid.bounds().tile_height(), 16.0);
        assert_eq!(grid.obstacle_count(), 0);
    }

    #[test]
    fn test_invalid_creation() {
        assert!(matches!(
            TileGrid::new(0, 10, 1.0, 1.0),
            Err(NavigationError::InvalidDimensions(_))
        ));
        assert!(matches!(
            TileGrid::new(10, 0, 1.0, 1.0),
            Err(NavigationError::InvalidDimensions(_))
        ));
        assert!(matches!(
            TileGrid::new(10, 10, 0.0, 1.0),
            Err(NavigationError::InvalidTileSize(_))
        ));
        assert!(matches!(
            TileGrid::new(10, 10, 1.0, -2.0),
            Err(NavigationError::InvalidTileSize(_))
        ));
    }

    #[test]
    fn test_cell_operations() {
        let mut grid = TileGrid::new(5, 5, 1.0, 1.0).unwrap();
        let tile = TileCoord::new(2, 2);

        grid.set(tile, TileCell::Obstacle).unwrap();
        assert_eq!(grid.get(tile).unwrap(), TileCell::Obstacle);
        assert!(grid.is_obstacle(tile));
        assert_eq!(grid.obstacle_count(), 1);

        assert!(matches!(
            grid.set(TileCoord::new(5, 2), TileCell::Obstacle),
            Err(NavigationError::OutOfBounds(_))
        ));
        assert!(matches!(
            grid.get(TileCoord::new(2, -1)),
            Err(NavigationError::OutOfBounds(_))
        ));
        assert!(!grid.is_obstacle(TileCoord::new(-1, 0)));

        grid.clear();
        assert_eq!(grid.obstacle_count(), 0);
    }

    #[test]
    fn test_from_rows() {
        let grid = TileGrid::from_rows(&["..#", "#..", "..."], 10.0, 10.0).unwrap();
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert!(grid.is_obstacle(TileCoord::new(2, 0)));
        assert!(grid.is_obstacle(TileCoord::new(0, 1)));
        assert!(!grid.is_obstacle(TileCoord::new(1, 1)));
        assert_eq!(grid.to_rows(), vec!["..#", "#..", "..."]);
    }

    #[test]
    fn test_from_rows_invalid() {
        let empty: [&str; 0] = [];
        assert!(matches!(
            TileGrid::from_rows(&empty, 1.0, 1.0),
            Err(NavigationError::InvalidLayout(_))
        ));
        assert!(matches!(
            TileGrid::from_rows(&["...", ".."], 1.0, 1.0),
            Err(NavigationError::InvalidLayout(_))
        ));
        assert!(matches!(
            TileGrid::from_rows(&["..x"], 1.0, 1.0),
            Err(NavigationError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_coordinate_conversion() {
        let grid = TileGrid::new(10, 10, 0.5, 0.5).unwrap();

        let tile = grid.world_to_tile(&WorldPosition::new(2.6, 0.1, 0.0)).unwrap();
        assert_eq!(tile, TileCoord::new(5, 0));

        let centre = grid.tile_to_world(TileCoord::new(5, 0), 90.0).unwrap();
        assert!((centre.x() - 2.75).abs() < 1e-9);
        assert!((centre.y() - 0.25).abs() < 1e-9);
        assert!((centre.heading() - 90.0).abs() < 1e-9);

        // Exactly on the far boundary is outside
        assert!(grid.world_to_tile(&WorldPosition::new(5.0, 1.0, 0.0)).is_none());
        assert!(grid.world_to_tile(&WorldPosition::new(-0.01, 1.0, 0.0)).is_none());
        assert!(grid.tile_to_world(TileCoord::new(10, 0), 0.0).is_none());
    }

    #[test]
    fn test_world_access() {
        let mut grid = TileGrid::new(4, 4, 2.0, 2.0).unwrap();
        let p = WorldPosition::new(3.0, 5.0, 0.0);
        grid.set_at_world(&p, TileCell::Obstacle).unwrap();
        assert!(grid.is_obstacle(TileCoord::new(1, 2)));
        assert_eq!(grid.get_at_world(&p).unwrap(), TileCell::Obstacle);
        assert!(matches!(
            grid.get_at_world(&WorldPosition::new(100.0, 0.0, 0.0)),
            Err(NavigationError::InvalidWorldCoordinates(_))
        ));
    }

    #[test]
    fn test_fill_span() {
        let mut grid = TileGrid::new(5, 5, 1.0, 1.0).unwrap();
        let wall = TileSpan::new(TileCoord::new(0, 2), TileCoord::new(3, 2));
        grid.fill_span(wall, TileCell::Obstacle).unwrap();
        assert_eq!(grid.obstacle_count(), 4);
        assert!(!grid.is_obstacle(TileCoord::new(4, 2)));

        let outside = TileSpan::new(TileCoord::new(3, 3), TileCoord::new(5, 3));
        assert!(matches!(
            grid.fill_span(outside, TileCell::Obstacle),
            Err(NavigationError::OutOfBounds(_))
        ));
        assert_eq!(grid.obstacle_count(), 4);
    }

    #[test]
    fn test_random_fill() {
        let mut rng = StdRng::seed_from_u64(7);
        let grid = TileGrid::new_rand(20, 20, 1.0, 1.0, 0.3, &mut rng).unwrap();
        let obstacles = grid.obstacle_count();
        assert!(obstacles > 0 && obstacles < 400);

        let mut full = TileGrid::new(4, 4, 1.0, 1.0).unwrap();
        full.fill_random(1.0, &mut rng).unwrap();
        assert_eq!(full.obstacle_count(), 16);
        full.fill_random(0.0, &mut rng).unwrap();
        assert_eq!(full.obstacle_count(), 0);

        assert!(matches!(
            full.fill_random(1.5, &mut rng),
            Err(NavigationError::InvalidLayout(_))
        ));
    }

    #[test]
    fn test_cell_conversions() {
        assert_eq!(TileCell::from_u8(0), TileCell::Open);
        assert_eq!(TileCell::from_u8(7), TileCell::Obstacle);
        assert_eq!(TileCell::Obstacle.as_u8(), 1);
        assert_eq!(TileCell::from_symbol('#'), Some(TileCell::Obstacle));
        assert_eq!(TileCell::from_symbol('?'), None);
    }

    #[test]
    fn test_display() {
        let grid = TileGrid::from_rows(&[".#", ".."], 1.0, 1.0).unwrap();
        let display_str = format!("{}", grid);
        assert!(display_str.contains("TileGrid (2x2"));
        assert!(display_str.contains(".#\n..\n"));
    }
}
