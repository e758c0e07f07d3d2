use mapforge_geometry::TileCoord;
use mapforge_navigation::{PathFinder, TileGrid};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
        )
        .init();

    // '.' = walkable, '#' = blocked
    let grid = TileGrid::from_rows(
        &[
            "..........", // Row 0
            ".##....##.", // Row 1
            "....#.....", // Row 2
            "..####.#..", // Row 3
            ".....#.#..", // Row 4
            ".###.#.##.", // Row 5
            "...#......", // Row 6
            ".#.#.###..", // Row 7
            ".#......#.", // Row 8
            "...###....", // Row 9
        ],
        1.0,
        1.0,
    )
    .unwrap();

    let start = TileCoord::new(0, 0);
    let goal = TileCoord::new(9, 9);

    println!("Grid:\n{}", grid);
    println!("Start: {}, Goal: {}", start, goal);

    let mut finder = PathFinder::new(&grid);
    let result = finder.search_detailed(start, goal);

    println!(
        "\nSearch {} after exploring {} tiles",
        result.status, result.nodes_explored
    );
    if result.path.is_empty() {
        println!("No path found.");
        return;
    }
    println!("Path ({} steps): {}", result.path.steps(), result.path);

    println!("\nGrid with path:");
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let tile = TileCoord::new(x, y);
            let symbol = if tile == start {
                'S'
            } else if tile == goal {
                'G'
            } else if result.path.contains(tile) {
                '*'
            } else {
                grid.get(tile).unwrap().symbol()
            };
            print!("{} ", symbol);
        }
        println!();
    }

    // Walk the route the way a follower would
    let mut path = result.path;
    let positions = path.to_world_positions(&grid.bounds());
    println!("\nFirst waypoints in world units:");
    for position in positions.iter().take(4) {
        println!("  {}", position);
    }
    let mut moves = 0;
    while path.pop().is_some() {
        moves += 1;
    }
    println!("Popped {} tiles, path finished: {}", moves, path.is_finished());
}
