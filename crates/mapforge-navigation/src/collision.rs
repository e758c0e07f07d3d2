//! Walkability checks against a tile grid.

use mapforge_geometry::{BoundingBox, TileCoord, TileSpan, WorldDisplacement, WorldPosition};
use tracing::trace;

use crate::map::tile_grid::{TileCell, TileGrid};

/// Answers walkability questions for one tile grid.
///
/// The evaluator only reads the grid, so it is cheap to copy and any number
/// of evaluators may query the same grid at once.
#[derive(Debug, Clone, Copy)]
pub struct CollisionEvaluator<'a> {
    grid: &'a TileGrid,
}

impl<'a> CollisionEvaluator<'a> {
    /// Binds an evaluator to `grid`.
    pub fn new(grid: &'a TileGrid) -> Self {
        CollisionEvaluator { grid }
    }

    /// The grid this evaluator reads.
    pub fn grid(&self) -> &'a TileGrid {
        self.grid
    }

    /// A tile is walkable if it lies inside the grid and carries no obstacle.
    pub fn is_walkable_tile(&self, tile: TileCoord) -> bool {
        matches!(self.grid.get(tile), Ok(TileCell::Open))
    }

    /// Checks that every tile of the closed range `top_left ..= bottom_right`
    /// is walkable, stopping at the first one that is not.
    ///
    /// An inverted range covers no tiles and is walkable.
    pub fn is_walkable_tile_span(&self, top_left: TileCoord, bottom_right: TileCoord) -> bool {
        self.is_walkable_span(TileSpan::new(top_left, bottom_right))
    }

    /// [`is_walkable_tile_span`](Self::is_walkable_tile_span) for a [`TileSpan`].
    pub fn is_walkable_span(&self, span: TileSpan) -> bool {
        let width = span.width() as u64;
        for i in 0..span.tile_count() {
            let tile = span.min.offset((i % width) as i32, (i / width) as i32);
            if !self.is_walkable_tile(tile) {
                trace!(%span, %tile, "Tile span blocked");
                return false;
            }
        }
        true
    }

    /// Checks that every tile touched by `bbox` is walkable.
    pub fn is_walkable_location(&self, bbox: &BoundingBox) -> bool {
        self.is_walkable_span(bbox.tile_span(&self.grid.bounds()))
    }

    /// Checks whether `bbox` would stand on walkable tiles after moving by `displacement`.
    pub fn is_walkable_destination(&self, bbox: &BoundingBox, displacement: &WorldDisplacement) -> bool {
        self.is_walkable_location(&bbox.translate_by(displacement))
    }

    /// Checks whether the tile containing `position` is walkable.
    /// Positions outside the world are never walkable.
    pub fn is_walkable_position(&self, position: &WorldPosition) -> bool {
        self.grid
            .world_to_tile(position)
            .is_some_and(|tile| self.is_walkable_tile(tile))
    }

    /// Checks whether `position` moved by `displacement` lands on a walkable tile.
    pub fn is_walkable_position_destination(
        &self,
        position: &WorldPosition,
        displacement: &WorldDisplacement,
    ) -> bool {
        self.is_walkable_position(&(*position + *displacement))
    }

    /// Checks whether the centre of `tile` moved by `displacement` lands on a walkable tile.
    pub fn is_walkable_tile_destination(&self, tile: TileCoord, displacement: &WorldDisplacement) -> bool {
        let (x, y) = self.grid.bounds().tile_center(tile);
        self.is_walkable_position_destination(&WorldPosition::new(x, y, 0.0), displacement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    fn grid() -> TileGrid {
        TileGrid::from_rows(
            &[
                ".....", //
                ".#...", //
                ".....", //
                "...#.", //
                ".....",
            ],
            10.0,
            10.0,
        )
        .unwrap()
    }

    #[test]
    fn test_walkable_tile() {
        let grid = grid();
        let eval = CollisionEvaluator::new(&grid);
        assert!(eval.is_walkable_tile(TileCoord::new(0, 0)));
        assert!(!eval.is_walkable_tile(TileCoord::new(1, 1)));
        assert!(!eval.is_walkable_tile(TileCoord::new(5, 0)));
        assert!(!eval.is_walkable_tile(TileCoord::new(0, -1)));
    }

    #[test]
    fn test_walkable_tile_span() {
        let grid = grid();
        let eval = CollisionEvaluator::new(&grid);
        assert!(eval.is_walkable_tile_span(TileCoord::new(2, 0), TileCoord::new(4, 2)));
        assert!(!eval.is_walkable_tile_span(TileCoord::new(0, 0), TileCoord::new(2, 2)));
        // Partly outside the grid
        assert!(!eval.is_walkable_tile_span(TileCoord::new(3, 4), TileCoord::new(5, 4)));
        // Inverted range
        assert!(eval.is_walkable_tile_span(TileCoord::new(3, 3), TileCoord::new(2, 3)));
    }

    #[test]
    fn test_span_blocked_iff_some_tile_blocked() {
        let mut rng = StdRng::seed_from_u64(42);
        let grid = TileGrid::new_rand(12, 12, 1.0, 1.0, 0.15, &mut rng).unwrap();
        let eval = CollisionEvaluator::new(&grid);

        for _ in 0..500 {
            let min = TileCoord::new(rng.random_range(-1..12), rng.random_range(-1..12));
            let max = TileCoord::new(
                rng.random_range(min.x..min.x + 4),
                rng.random_range(min.y..min.y + 4),
            );
            let span = TileSpan::new(min, max);
            let any_blocked = span.iter().any(|t| !eval.is_walkable_tile(t));
            assert_eq!(eval.is_walkable_tile_span(min, max), !any_blocked, "span {}", span);
        }
    }

    #[test]
    fn test_walkable_location() {
        let grid = grid();
        let eval = CollisionEvaluator::new(&grid);
        // Inside tile (0, 0) only
        assert!(eval.is_walkable_location(&BoundingBox::new(1.0, 1.0, 8.0, 8.0, 0.0)));
        // Straddles into the obstacle at (1, 1)
        assert!(!eval.is_walkable_location(&BoundingBox::new(5.0, 5.0, 8.0, 8.0, 0.0)));
        // Right edge exactly on the tile border stays in tile 0
        assert!(eval.is_walkable_location(&BoundingBox::new(0.0, 10.0, 10.0, 10.0, 0.0)));
        // Sticks out of the world
        assert!(!eval.is_walkable_location(&BoundingBox::new(-2.0, 0.0, 5.0, 5.0, 0.0)));
    }

    #[test]
    fn test_walkable_destination() {
        let grid = grid();
        let eval = CollisionEvaluator::new(&grid);
        let bb = BoundingBox::new(1.0, 11.0, 8.0, 8.0, 0.0); // tile (0, 1)
        assert!(eval.is_walkable_location(&bb));
        assert!(!eval.is_walkable_destination(&bb, &WorldDisplacement::new(10.0, 0.0)));
        assert!(eval.is_walkable_destination(&bb, &WorldDisplacement::new(0.0, 10.0)));
    }

    #[test]
    fn test_destination_far_outside_world() {
        let grid = grid();
        let eval = CollisionEvaluator::new(&grid);
        let bb = BoundingBox::new(1.0, 1.0, 8.0, 8.0, 0.0);
        assert!(!eval.is_walkable_destination(&bb, &WorldDisplacement::new(-1e12, -1e12)));
        assert!(!eval.is_walkable_destination(&bb, &WorldDisplacement::new(1e12, 0.0)));
        assert!(!eval.is_walkable_location(&BoundingBox::new(-1e12, -1e12, 1.0, 1.0, 0.0)));
        assert!(!eval.is_walkable_position_destination(
            &WorldPosition::new(5.0, 5.0, 0.0),
            &WorldDisplacement::new(-1e12, 0.0)
        ));
    }

    #[test]
    fn test_walkable_position_and_tile_destination() {
        let grid = grid();
        let eval = CollisionEvaluator::new(&grid);
        let p = WorldPosition::new(35.0, 35.0, 0.0); // tile (3, 3), blocked
        assert!(!eval.is_walkable_position(&p));
        assert!(eval.is_walkable_position_destination(&p, &WorldDisplacement::new(10.0, 0.0)));
        assert!(!eval.is_walkable_position(&WorldPosition::new(-1.0, 0.0, 0.0)));

        let step_right = WorldDisplacement::new(10.0, 0.0);
        assert!(!eval.is_walkable_tile_destination(TileCoord::new(0, 1), &step_right));
        assert!(eval.is_walkable_tile_destination(TileCoord::new(1, 0), &step_right));
        assert!(!eval.is_walkable_tile_destination(TileCoord::new(4, 0), &step_right));
    }
}
