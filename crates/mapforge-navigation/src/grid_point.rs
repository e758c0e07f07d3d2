//! Search nodes and the arena that owns them.

use std::collections::HashMap;
use std::hash::{Hash, Hasher};

use mapforge_geometry::TileCoord;

/// Index of a [`GridPoint`] inside a [`NodeArena`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A tile visited by the search, with its A* costs.
///
/// Two points are equal when they refer to the same tile, whatever their costs
/// or parents.
#[derive(Debug, Clone, Copy)]
pub struct GridPoint {
    coord: TileCoord,
    parent: Option<NodeId>,
    g: u32,
    h: u32,
}

impl GridPoint {
    pub fn new(coord: TileCoord, g: u32, h: u32) -> Self {
        GridPoint {
            coord,
            parent: None,
            g,
            h,
        }
    }

    pub fn coord(&self) -> TileCoord {
        self.coord
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Cost from the start.
    pub fn g(&self) -> u32 {
        self.g
    }

    /// Estimated cost to the goal.
    pub fn h(&self) -> u32 {
        self.h
    }

    /// Total estimated cost through this point.
    pub fn f(&self) -> u32 {
        self.g + self.h
    }

    pub fn set_costs(&mut self, g: u32, h: u32) {
        self.g = g;
        self.h = h;
    }
}

impl PartialEq for GridPoint {
    fn eq(&self, other: &Self) -> bool {
        self.coord == other.coord
    }
}

impl Eq for GridPoint {}

impl Hash for GridPoint {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.coord.hash(state);
    }
}

/// Owns every point created during one search.
///
/// Each tile maps to at most one point, so parent links form a tree rooted at
/// the start.
#[derive(Debug, Default)]
pub struct NodeArena {
    nodes: Vec<GridPoint>,
    by_coord: HashMap<TileCoord, NodeId>,
}

impl NodeArena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `point` and returns its id.
    ///
    /// # Panics
    ///
    /// Panics if a point for the same tile is already stored.
    pub fn insert(&mut self, point: GridPoint) -> NodeId {
        let id = NodeId(self.nodes.len());
        let previous = self.by_coord.insert(point.coord, id);
        assert!(previous.is_none(), "tile {} already has a search node", point.coord);
        self.nodes.push(point);
        id
    }

    pub fn get(&self, id: NodeId) -> &GridPoint {
        &self.nodes[id.0]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut GridPoint {
        &mut self.nodes[id.0]
    }

    /// Looks up the point stored for `coord`.
    pub fn find(&self, coord: TileCoord) -> Option<NodeId> {
        self.by_coord.get(&coord).copied()
    }

    /// Links `child` to `parent`.
    ///
    /// # Panics
    ///
    /// Panics if `child` and `parent` are the same point.
    pub fn set_parent(&mut self, child: NodeId, parent: NodeId) {
        assert!(
            child != parent && self.get(child) != self.get(parent),
            "search node {} cannot be its own parent",
            self.get(child).coord
        );
        self.nodes[child.0].parent = Some(parent);
    }

    /// Walks parent links from `id` back to the root, starting with `id` itself.
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = &GridPoint> + '_ {
        let mut next = Some(id);
        std::iter::from_fn(move || {
            let point = self.get(next?);
            next = point.parent;
            Some(point)
        })
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
        self.by_coord.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_grid_point_equality_ignores_costs() {
        let a = GridPoint::new(TileCoord::new(1, 2), 3, 4);
        let b = GridPoint::new(TileCoord::new(1, 2), 10, 0);
        let c = GridPoint::new(TileCoord::new(2, 1), 3, 4);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.f(), 7);

        let set: HashSet<GridPoint> = [a, b, c].into_iter().collect();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_arena_parent_chain() {
        let mut arena = NodeArena::new();
        let root = arena.insert(GridPoint::new(TileCoord::new(0, 0), 0, 0));
        let mid = arena.insert(GridPoint::new(TileCoord::new(1, 0), 1, 0));
        let leaf = arena.insert(GridPoint::new(TileCoord::new(1, 1), 2, 0));
        arena.set_parent(mid, root);
        arena.set_parent(leaf, mid);

        assert_eq!(arena.find(TileCoord::new(1, 0)), Some(mid));
        assert_eq!(arena.find(TileCoord::new(5, 5)), None);

        let chain: Vec<TileCoord> = arena.ancestors(leaf).map(|p| p.coord()).collect();
        assert_eq!(
            chain,
            vec![TileCoord::new(1, 1), TileCoord::new(1, 0), TileCoord::new(0, 0)]
        );

        arena.get_mut(leaf).set_costs(5, 1);
        assert_eq!(arena.get(leaf).f(), 6);
        assert_eq!(arena.len(), 3);
        arena.clear();
        assert!(arena.is_empty());
    }

    #[test]
    #[should_panic(expected = "cannot be its own parent")]
    fn test_arena_self_parent() {
        let mut arena = NodeArena::new();
        let id = arena.insert(GridPoint::new(TileCoord::new(3, 3), 0, 0));
        arena.set_parent(id, id);
    }

    #[test]
    #[should_panic(expected = "already has a search node")]
    fn test_arena_duplicate_tile() {
        let mut arena = NodeArena::new();
        arena.insert(GridPoint::new(TileCoord::new(3, 3), 0, 0));
        arena.insert(GridPoint::new(TileCoord::new(3, 3), 1, 1));
    }
}
