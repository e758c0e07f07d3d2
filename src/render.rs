use mapforge_geometry::TileCoord;
use mapforge_navigation::{Path, TileGrid};

pub const START_SYMBOL: char = 'S';
pub const GOAL_SYMBOL: char = 'G';
pub const PATH_SYMBOL: char = '*';

/// Draws `grid` as ASCII with the route overlaid, one line per row.
pub fn render_route(grid: &TileGrid, path: &Path, start: TileCoord, goal: TileCoord) -> String {
    let mut out = String::with_capacity((grid.width() + 1) * grid.height());
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let tile = TileCoord::new(x, y);
            let symbol = if tile == start {
                START_SYMBOL
            } else if tile == goal {
                GOAL_SYMBOL
            } else if path.contains(tile) {
                PATH_SYMBOL
            } else {
                grid.cells()[y as usize * grid.width() + x as usize].symbol()
            };
            out.push(symbol);
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapforge_navigation::PathFinder;

    #[test]
    fn test_render_route() {
        let grid = TileGrid::from_rows(&["...", "##.", "..."], 1.0, 1.0).unwrap();
        let (start, goal) = (TileCoord::new(0, 0), TileCoord::new(0, 2));
        let path = PathFinder::new(&grid).search(start, goal);

        assert_eq!(render_route(&grid, &path, start, goal), "S**\n##*\nG**\n");
    }

    #[test]
    fn test_render_without_route() {
        let grid = TileGrid::from_rows(&[".#", "#."], 1.0, 1.0).unwrap();
        let (start, goal) = (TileCoord::new(0, 0), TileCoord::new(1, 1));
        let path = PathFinder::new(&grid).search(start, goal);

        assert!(path.is_empty());
        assert_eq!(render_route(&grid, &path, start, goal), "S#\n#G\n");
    }
}
