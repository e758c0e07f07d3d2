use mapforge_geometry::*;

fn main() {
    let bounds = match WorldBounds::new(16, 12, 32.0, 32.0) {
        Ok(bounds) => bounds,
        Err(e) => {
            eprintln!("Failed to create world bounds: {:?}", e);
            return;
        }
    };

    println!("World: {}", bounds);
    println!("  Size: {:.1} x {:.1} world units", bounds.width(), bounds.height());

    let mut position = WorldPosition::from_tile(&bounds, 3, 2, 0.0);
    let target = WorldPosition::from_tile(&bounds, 9, 7, 0.0);
    position.set_heading_towards(&target);

    println!("\nObject at {} (tile {})", position, position.tile(&bounds));
    println!("Target at {} (tile {})", target, target.tile(&bounds));
    println!(
        "  Distance: {:.2} world units, {} tiles (Manhattan)",
        WorldPosition::euclidean_distance(&position, &target),
        WorldPosition::manhattan_tile_distance(&bounds, &position, &target)
    );

    // Sweep a 40x20 object through a full turn and show how its envelope and tile footprint change
    println!("\nRotating a 40x20 object:");
    for rotation in [0.0, 30.0, 45.0, 90.0, 135.0, 180.0, 270.0] {
        let bb = BoundingBox::from_object(&position, 40.0, 20.0, rotation);
        let span = bb.tile_span(&bounds);
        println!(
            "  {:>5.1}° -> {} covers {} ({} tiles)",
            rotation,
            bb,
            span,
            span.tile_count()
        );
    }

    // Step towards the target one tile-length at a time
    println!("\nStepping towards the target:");
    let step = WorldDisplacement::aim_at(&position, &target, bounds.tile_width());
    let mut current = position;
    for i in 0..4 {
        current += step;
        println!(
            "  Step {}: {} valid: {}",
            i + 1,
            current,
            current.is_valid(&bounds)
        );
    }
}
