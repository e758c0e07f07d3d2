mod render;
mod scenario;
mod settings;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::{self, EnvFilter};

use crate::scenario::Scenario;
use crate::settings::DEFAULT_CONFIG_PATH;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let settings = settings::load_settings(&config_path)
        .with_context(|| format!("failed to load scenario from {}", config_path))?;

    let scenario = Scenario::from_settings(&settings)?;
    info!(
        width = scenario.grid.width(),
        height = scenario.grid.height(),
        obstacles = scenario.grid.obstacle_count(),
        "Map ready"
    );

    let result = scenario.run();
    if result.is_found() {
        info!(
            steps = result.path.steps(),
            nodes_explored = result.nodes_explored,
            "Path found"
        );
    } else {
        warn!(status = %result.status, nodes_explored = result.nodes_explored, "No path");
    }

    print!(
        "{}",
        render::render_route(&scenario.grid, &result.path, scenario.start, scenario.goal)
    );
    println!("{}: {}", result.status, result.path);
    Ok(())
}
