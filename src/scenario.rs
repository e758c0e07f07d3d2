use anyhow::{Context, ensure};
use mapforge_geometry::TileCoord;
use mapforge_navigation::{GCost, PathFinder, SearchResult, TileCell, TileGrid};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::settings::{MapSettings, Settings};

/// One path query over one map, ready to run.
#[derive(Debug, Clone)]
pub struct Scenario {
    pub grid: TileGrid,
    pub start: TileCoord,
    pub goal: TileCoord,
    pub g_cost: GCost,
    pub max_expansions: Option<usize>,
}

impl Scenario {
    /// Builds the map described by `settings` and checks that the query fits on it.
    ///
    /// Randomly filled maps always keep the start and goal tiles open.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let start = TileCoord::from((settings.query.start[0], settings.query.start[1]));
        let goal = TileCoord::from((settings.query.goal[0], settings.query.goal[1]));

        let mut grid = build_grid(&settings.map)?;
        for (name, tile) in [("start", start), ("goal", goal)] {
            ensure!(
                grid.contains(tile),
                "{} tile {} is outside the {}x{} map",
                name,
                tile,
                grid.width(),
                grid.height()
            );
        }
        if settings.map.rows.is_none() {
            grid.set(start, TileCell::Open)?;
            grid.set(goal, TileCell::Open)?;
        }

        Ok(Scenario {
            grid,
            start,
            goal,
            g_cost: settings.search.g_cost,
            max_expansions: settings.search.max_expansions,
        })
    }

    pub fn run(&self) -> SearchResult {
        let mut finder = PathFinder::new(&self.grid).with_g_cost(self.g_cost);
        if let Some(limit) = self.max_expansions {
            finder = finder.with_expansion_limit(limit);
        }
        info!(start = %self.start, goal = %self.goal, "Running path query");
        finder.search_detailed(self.start, self.goal)
    }
}

fn build_grid(map: &MapSettings) -> anyhow::Result<TileGrid> {
    if let Some(rows) = &map.rows {
        let grid = TileGrid::from_rows(rows, map.tile_width, map.tile_height)
            .context("invalid map.rows layout")?;
        debug!(width = grid.width(), height = grid.height(), "Loaded map layout");
        return Ok(grid);
    }

    let width = map.width.context("map.width is required when map.rows is not set")?;
    let height = map.height.context("map.height is required when map.rows is not set")?;
    let mut rng = match map.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let grid = TileGrid::new_rand(
        width,
        height,
        map.tile_width,
        map.tile_height,
        map.obstacle_density,
        &mut rng,
    )?;
    debug!(width, height, seed = ?map.seed, "Generated random map");
    Ok(grid)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::settings_from_str;
    use mapforge_navigation::SearchStatus;

    #[test]
    fn test_layout_scenario() {
        let settings = settings_from_str(
            r#"
            [map]
            # literal strings, so the layout can hold runs of '#'
            rows = ['.....', '.....', '####.', '.....', '.....']

            [query]
            start = [0, 0]
            goal = [0, 4]
            "#,
        )
        .unwrap();
        let scenario = Scenario::from_settings(&settings).unwrap();
        let result = scenario.run();
        assert_eq!(result.status, SearchStatus::Found);
        assert_eq!(result.path.steps(), 12);
    }

    #[test]
    fn test_random_scenario_keeps_ends_open() {
        let settings = settings_from_str(
            r#"
            [map]
            width = 10
            height = 10
            obstacle_density = 1.0
            seed = 3

            [query]
            start = [1, 1]
            goal = [8, 8]
            "#,
        )
        .unwrap();
        let scenario = Scenario::from_settings(&settings).unwrap();
        assert_eq!(scenario.grid.get(TileCoord::new(1, 1)), Ok(TileCell::Open));
        assert_eq!(scenario.grid.get(TileCoord::new(8, 8)), Ok(TileCell::Open));
        assert_eq!(scenario.grid.obstacle_count(), 98);
        assert_eq!(scenario.run().status, SearchStatus::Unreachable);
    }

    #[test]
    fn test_seeded_maps_are_reproducible() {
        let toml = r#"
            [map]
            width = 12
            height = 9
            obstacle_density = 0.3
            seed = 99

            [query]
            start = [0, 0]
            goal = [11, 8]
        "#;
        let a = Scenario::from_settings(&settings_from_str(toml).unwrap()).unwrap();
        let b = Scenario::from_settings(&settings_from_str(toml).unwrap()).unwrap();
        assert_eq!(a.grid, b.grid);
        assert_eq!(a.run(), b.run());
    }

    #[test]
    fn test_expansion_limit_setting() {
        let settings = settings_from_str(
            r#"
            [map]
            width = 30
            height = 30

            [query]
            start = [0, 0]
            goal = [29, 29]

            [search]
            max_expansions = 5
            "#,
        )
        .unwrap();
        let result = Scenario::from_settings(&settings).unwrap().run();
        assert_eq!(result.status, SearchStatus::ExpansionLimit);
        assert_eq!(result.nodes_explored, 5);
    }

    #[test]
    fn test_query_outside_map() {
        let settings = settings_from_str(
            r#"
            [map]
            width = 4
            height = 4

            [query]
            start = [0, 0]
            goal = [4, 0]
            "#,
        )
        .unwrap();
        let err = Scenario::from_settings(&settings).unwrap_err();
        assert!(err.to_string().contains("goal tile (4, 0) is outside"));
    }

    #[test]
    fn test_random_map_needs_dimensions() {
        let settings = settings_from_str(
            r#"
            [map]
            width = 4

            [query]
            start = [0, 0]
            goal = [1, 0]
            "#,
        )
        .unwrap();
        assert!(Scenario::from_settings(&settings).is_err());
    }
}
