//! Tile-world collision queries and A* path finding.

pub mod astar;
pub mod collision;
pub mod error;
pub mod grid_point;
pub mod map;
pub mod path;
pub mod priority_queue;
pub mod world;

pub use astar::{GCost, PathFinder, SearchResult, SearchStatus};
pub use collision::CollisionEvaluator;
pub use error::NavigationError;
pub use grid_point::{GridPoint, NodeArena, NodeId};
pub use map::{TileCell, TileGrid};
pub use path::Path;
pub use priority_queue::PriorityQueue;
pub use world::{Agent, Entity, World};
