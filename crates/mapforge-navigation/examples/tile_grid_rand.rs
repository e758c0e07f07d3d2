use mapforge_geometry::{BoundingBox, TileCoord, WorldPosition};
use mapforge_navigation::{Agent, Entity, PathFinder, TileCell, TileGrid, World};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn main() {
    // A 24x16 world of 32x32 tiles with roughly 20% obstacles, reproducible through the seed
    let mut rng = StdRng::seed_from_u64(2024);
    let mut grid = TileGrid::new_rand(24, 16, 32.0, 32.0, 0.2, &mut rng).unwrap();

    // Keep the corners free so the demo always has somewhere to start and stop
    grid.set(TileCoord::new(0, 0), TileCell::Open).unwrap();
    grid.set(TileCoord::new(23, 15), TileCell::Open).unwrap();

    println!("{}", grid);
    println!("Obstacles: {}", grid.obstacle_count());

    // World coordinate conversion
    let position = WorldPosition::new(100.0, 70.0, 0.0);
    match grid.world_to_tile(&position) {
        Some(tile) => {
            println!("\nWorld position {} lies in tile {}", position, tile);
            if let Some(center) = grid.tile_to_world(tile, 0.0) {
                println!("Tile {} has its centre at {}", tile, center);
            }
        }
        None => println!("\nWorld position {} is outside the map.", position),
    }

    // Ask the collision layer about a box straddling several tiles
    let bbox = BoundingBox::new(90.0, 50.0, 48.0, 40.0, 0.0);
    println!(
        "\nBox {} covers {} and is {}",
        bbox,
        bbox.tile_span(&grid.bounds()),
        if grid.is_walkable_box_location(&bbox) { "walkable" } else { "blocked" }
    );

    // Route an agent across the map
    let bounds = grid.bounds();
    let agent = Agent::at_tile(&bounds, TileCoord::new(0, 0), 20.0, 20.0);
    let target = Agent::at_tile(&bounds, TileCoord::new(23, 15), 20.0, 20.0);
    println!("\nAgent at {} occupies {}", agent.location(), agent.bounding_box_tile(&bounds));

    let mut finder = PathFinder::new(&grid);
    let path = finder.find_path(&agent, &target);
    if path.is_empty() {
        println!("The far corner is unreachable on this map.");
    } else {
        println!("Route of {} steps: {}", path.steps(), path);
    }
}
