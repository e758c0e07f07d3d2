//! The world seen by the path finder, and the entities that live in it.

use mapforge_geometry::{BoundingBox, TileCoord, TileSpan, WorldBounds, WorldDisplacement, WorldPosition};

use crate::collision::CollisionEvaluator;
use crate::map::tile_grid::TileGrid;

/// A tile-based world that can answer walkability questions.
///
/// Implementors only need to expose their collision layer; everything else
/// is derived from it.
pub trait World {
    /// The collision layer of this world.
    fn tile_grid(&self) -> &TileGrid;

    /// Size of the world in tiles and world units.
    fn bounds(&self) -> WorldBounds {
        self.tile_grid().bounds()
    }

    /// Whether `tile` lies inside the world.
    fn tile_exists(&self, tile: TileCoord) -> bool {
        self.tile_grid().contains(tile)
    }

    /// Whether `position` lies inside the world.
    fn coordinate_exists(&self, position: &WorldPosition) -> bool {
        position.is_valid(&self.bounds())
    }

    /// A collision evaluator bound to this world's tile grid.
    fn collision(&self) -> CollisionEvaluator<'_> {
        CollisionEvaluator::new(self.tile_grid())
    }

    fn is_walkable_tile_location(&self, tile: TileCoord) -> bool {
        self.collision().is_walkable_tile(tile)
    }

    fn is_walkable_box_location(&self, bbox: &BoundingBox) -> bool {
        self.collision().is_walkable_location(bbox)
    }

    fn is_walkable_tile_destination(&self, tile: TileCoord, displacement: &WorldDisplacement) -> bool {
        self.collision().is_walkable_tile_destination(tile, displacement)
    }

    fn is_walkable_box_destination(&self, bbox: &BoundingBox, displacement: &WorldDisplacement) -> bool {
        self.collision().is_walkable_destination(bbox, displacement)
    }
}

impl World for TileGrid {
    fn tile_grid(&self) -> &TileGrid {
        self
    }
}

/// Something with a position and a rectangular footprint.
pub trait Entity {
    /// Centre of the entity, including its heading.
    fn location(&self) -> WorldPosition;

    /// Footprint `(width, height)` in world units, before rotation.
    fn size(&self) -> (f64, f64);

    /// Axis-aligned envelope of the entity's rotated footprint.
    fn bounding_box(&self) -> BoundingBox {
        let location = self.location();
        let (width, height) = self.size();
        BoundingBox::from_object(&location, width, height, location.heading())
    }

    /// Tiles covered by [`bounding_box`](Self::bounding_box).
    fn bounding_box_tile(&self, bounds: &WorldBounds) -> TileSpan {
        self.bounding_box().tile_span(bounds)
    }
}

/// A plain movable entity.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    location: WorldPosition,
    width: f64,
    height: f64,
}

impl Agent {
    /// Creates an agent centred on `location` with the given footprint.
    ///
    /// # Panics
    ///
    /// Panics if `width` or `height` is negative.
    pub fn new(location: WorldPosition, width: f64, height: f64) -> Self {
        assert!(
            width >= 0.0 && height >= 0.0,
            "agent footprint must not be negative, got {}x{}",
            width,
            height
        );
        Agent {
            location,
            width,
            height,
        }
    }

    /// Creates an agent standing on the exact centre of `tile`.
    pub fn at_tile(bounds: &WorldBounds, tile: TileCoord, width: f64, height: f64) -> Self {
        let (x, y) = bounds.tile_center(tile);
        Agent::new(WorldPosition::new(x, y, 0.0), width, height)
    }

    pub fn set_location(&mut self, location: WorldPosition) {
        self.location = location;
    }

    /// Moves the agent by `displacement`, keeping its heading.
    pub fn move_by(&mut self, displacement: &WorldDisplacement) {
        self.location += *displacement;
    }

    /// Checks whether the agent could stand where `displacement` would take it.
    pub fn can_move_by<W: World + ?Sized>(&self, world: &W, displacement: &WorldDisplacement) -> bool {
        world.is_walkable_box_destination(&self.bounding_box(), displacement)
    }
}

impl Entity for Agent {
    fn location(&self) -> WorldPosition {
        self.location
    }

    fn size(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}
