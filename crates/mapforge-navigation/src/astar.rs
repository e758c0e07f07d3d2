/*

A* = f(n) = g(n) + h(n)

Where:
    n = a tile of the world
    g(n) = cost from the start tile to n
    h(n) = Manhattan distance from n to the goal tile
    f(n) = total estimated cost of the cheapest route through n

Initialize:
    - open list holding only the start tile, g = h = 0
    - empty closed set

Loop, until the goal is closed or the open list runs dry:
    - pop the open tile with the lowest f (oldest first among equals)
    - close it
    - for each of the 4 cardinal neighbours that exists in the world:
        - skip it if it is blocked or already closed
        - if it is already open, keep the cheaper of the two routes
        - otherwise open it with the current tile as parent

Finally walk the parent links back from the goal to build the path.

*/

use std::collections::HashSet;

use mapforge_geometry::{TileCoord, WorldPosition};
use tracing::{debug, trace, warn};

use crate::grid_point::{GridPoint, NodeArena, NodeId};
use crate::path::Path;
use crate::priority_queue::PriorityQueue;
use crate::world::{Entity, World};

/// How the cost from the start (`g`) of a tile is computed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum GCost {
    /// Number of moves actually taken from the start. Yields shortest paths.
    #[default]
    Accumulated,
    /// Manhattan distance to the start, ignoring the route taken.
    /// Paths stay connected but can be longer than necessary around obstacles.
    FlatManhattan,
}

/// Why a search ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchStatus {
    /// The goal was reached.
    Found,
    /// The start tile is not walkable.
    StartBlocked,
    /// The goal tile is not walkable.
    GoalBlocked,
    /// Start and goal are the same tile.
    SameTile,
    /// Every reachable tile was explored without reaching the goal.
    Unreachable,
    /// The expansion limit was hit before the goal was reached.
    ExpansionLimit,
}

impl std::fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            SearchStatus::Found => "found",
            SearchStatus::StartBlocked => "start blocked",
            SearchStatus::GoalBlocked => "goal blocked",
            SearchStatus::SameTile => "start equals goal",
            SearchStatus::Unreachable => "unreachable",
            SearchStatus::ExpansionLimit => "expansion limit reached",
        };
        write!(f, "{}", text)
    }
}

/// Outcome of [`PathFinder::search_detailed`].
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    /// The route, empty unless `status` is [`SearchStatus::Found`].
    pub path: Path,
    /// Why the search ended.
    pub status: SearchStatus,
    /// Number of tiles closed during the search.
    pub nodes_explored: usize,
}

impl SearchResult {
    /// True if a route was found.
    pub fn is_found(&self) -> bool {
        self.status == SearchStatus::Found
    }
}

/// A* search over the tiles of a [`World`], moving in the 4 cardinal directions.
///
/// The finder keeps its open and closed sets between searches so their
/// allocations are reused; they are reset at the start of every search.
pub struct PathFinder<'w, W: World + ?Sized> {
    world: &'w W,
    g_cost: GCost,
    max_expansions: Option<usize>,
    open: PriorityQueue<NodeId, u32>,
    closed: Vec<NodeId>,
    closed_tiles: HashSet<TileCoord>,
    nodes: NodeArena,
}

impl<'w, W: World + ?Sized> PathFinder<'w, W> {
    /// Creates a path finder for `world` using [`GCost::Accumulated`] and no
    /// expansion limit.
    pub fn new(world: &'w W) -> Self {
        PathFinder {
            world,
            g_cost: GCost::default(),
            max_expansions: None,
            open: PriorityQueue::new(),
            closed: Vec::new(),
            closed_tiles: HashSet::new(),
            nodes: NodeArena::new(),
        }
    }

    /// Selects how the cost from the start is measured.
    pub fn with_g_cost(mut self, g_cost: GCost) -> Self {
        self.g_cost = g_cost;
        self
    }

    /// Gives up after closing `limit` tiles.
    pub fn with_expansion_limit(mut self, limit: usize) -> Self {
        self.max_expansions = Some(limit);
        self
    }

    /// The world being searched.
    pub fn world(&self) -> &'w W {
        self.world
    }

    /// The g-cost mode in use.
    pub fn g_cost(&self) -> GCost {
        self.g_cost
    }

    /// The expansion limit, if one was set.
    pub fn expansion_limit(&self) -> Option<usize> {
        self.max_expansions
    }

    /// Tiles closed by the last search, in the order they were closed.
    pub fn explored(&self) -> impl Iterator<Item = TileCoord> + '_ {
        self.closed.iter().map(|&id| self.nodes.get(id).coord())
    }

    /// Finds a path from the tile under `from` to the tile under `to`.
    ///
    /// # Panics
    ///
    /// Panics if `from` covers more than one tile, or if either entity stands
    /// outside the world.
    pub fn find_path<E, T>(&mut self, from: &E, to: &T) -> Path
    where
        E: Entity + ?Sized,
        T: Entity + ?Sized,
    {
        self.find_path_to(from, &to.location())
    }

    /// Finds a path from the tile under `from` to the tile containing `target`.
    ///
    /// # Panics
    ///
    /// Panics if `from` covers more than one tile, or if either end lies
    /// outside the world.
    pub fn find_path_to<E: Entity + ?Sized>(&mut self, from: &E, target: &WorldPosition) -> Path {
        let footprint = from.bounding_box_tile(&self.world.bounds());
        assert!(
            footprint.tile_count() <= 1,
            "path finding needs a single-tile entity, footprint covers {}",
            footprint
        );
        self.find_path_between(&from.location(), target)
    }

    /// Finds a path between the tiles containing two world positions.
    ///
    /// # Panics
    ///
    /// Panics if either position lies outside the world.
    pub fn find_path_between(&mut self, from: &WorldPosition, to: &WorldPosition) -> Path {
        let bounds = self.world.bounds();
        self.search(from.tile(&bounds), to.tile(&bounds))
    }

    /// Finds a path between two tiles.
    ///
    /// # Returns
    ///
    /// The route with `start` on top and `end` at the bottom, or an empty
    /// path if there is none.
    ///
    /// # Panics
    ///
    /// Panics if either tile lies outside the world.
    pub fn search(&mut self, start: TileCoord, end: TileCoord) -> Path {
        self.search_detailed(start, end).path
    }

    /// Like [`search`](Self::search), but also reports why the search ended
    /// and how many tiles it explored.
    ///
    /// # Panics
    ///
    /// Panics if either tile lies outside the world.
    pub fn search_detailed(&mut self, start: TileCoord, end: TileCoord) -> SearchResult {
        assert!(
            self.world.tile_exists(start),
            "start tile {} is outside the world",
            start
        );
        assert!(
            self.world.tile_exists(end),
            "end tile {} is outside the world",
            end
        );
        self.reset();

        if start == end {
            warn!(%start, "Start and end are the same tile, no path to find");
            return self.finish(SearchStatus::SameTile, Path::new());
        }
        if !self.world.is_walkable_tile_location(start) {
            warn!(%start, "Start tile is not walkable");
            return self.finish(SearchStatus::StartBlocked, Path::new());
        }
        if !self.world.is_walkable_tile_location(end) {
            warn!(%end, "End tile is not walkable");
            return self.finish(SearchStatus::GoalBlocked, Path::new());
        }

        debug!(%start, %end, g_cost = ?self.g_cost, "Starting path search");
        let root = self.nodes.insert(GridPoint::new(start, 0, 0));
        self.open.push(root, 0);

        while !self.closed_tiles.contains(&end) {
            let Some((current, _)) = self.open.pop() else {
                break;
            };
            if self.max_expansions.is_some_and(|limit| self.closed.len() >= limit) {
                warn!(
                    %start,
                    %end,
                    nodes_explored = self.closed.len(),
                    "Expansion limit reached before the end tile"
                );
                return self.finish(SearchStatus::ExpansionLimit, Path::new());
            }
            self.close(current);
            self.expand(current, start, end);
        }

        match self.nodes.find(end).filter(|_| self.closed_tiles.contains(&end)) {
            Some(goal) => {
                let mut path = Path::new();
                for point in self.nodes.ancestors(goal) {
                    path.push(point.coord());
                }
                debug!(
                    steps = path.steps(),
                    nodes_explored = self.closed.len(),
                    "Path found"
                );
                self.finish(SearchStatus::Found, path)
            }
            None => {
                warn!(%start, %end, nodes_explored = self.closed.len(), "No path between tiles");
                self.finish(SearchStatus::Unreachable, Path::new())
            }
        }
    }

    fn reset(&mut self) {
        self.open.clear();
        self.closed.clear();
        self.closed_tiles.clear();
        self.nodes.clear();
    }

    fn finish(&self, status: SearchStatus, path: Path) -> SearchResult {
        SearchResult {
            path,
            status,
            nodes_explored: self.closed.len(),
        }
    }

    fn close(&mut self, id: NodeId) {
        let coord = self.nodes.get(id).coord();
        assert!(self.closed_tiles.insert(coord), "tile {} was closed twice", coord);
        self.closed.push(id);
        trace!(tile = %coord, f = self.nodes.get(id).f(), "Closed tile");
    }

    fn expand(&mut self, current: NodeId, start: TileCoord, end: TileCoord) {
        let point = *self.nodes.get(current);

        for neighbor in point.coord().neighbors4() {
            if !self.world.tile_exists(neighbor)
                || self.closed_tiles.contains(&neighbor)
                || !self.world.is_walkable_tile_location(neighbor)
            {
                continue;
            }

            let g = match self.g_cost {
                GCost::Accumulated => point.g() + 1,
                GCost::FlatManhattan => neighbor.manhattan_distance(&start),
            };
            let h = neighbor.manhattan_distance(&end);

            match self.nodes.find(neighbor) {
                Some(id) => {
                    // Already open: only a strictly cheaper route replaces it
                    if g + h < self.nodes.get(id).f() {
                        self.nodes.get_mut(id).set_costs(g, h);
                        self.nodes.set_parent(id, current);
                        self.open.push(id, g + h);
                    }
                }
                None => {
                    let id = self.nodes.insert(GridPoint::new(neighbor, g, h));
                    self.nodes.set_parent(id, current);
                    self.open.push(id, g + h);
                }
            }
        }
    }
}
