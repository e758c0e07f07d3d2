use config::{Config, ConfigError, Environment, File, FileFormat};
use mapforge_navigation::GCost;
use serde::Deserialize;
use tracing::{error, info};

pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// A full scenario: the map, one query and how to run it.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub map: MapSettings,
    pub query: QuerySettings,
    #[serde(default)]
    pub search: SearchSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MapSettings {
    /// Width in tiles. Required unless `rows` is given.
    pub width: Option<usize>,
    /// Height in tiles. Required unless `rows` is given.
    pub height: Option<usize>,
    #[serde(default = "default_tile_size")]
    pub tile_width: f64,
    #[serde(default = "default_tile_size")]
    pub tile_height: f64,
    /// Fixed ASCII layout, `.` open and `#` blocked. Takes precedence over random fill.
    pub rows: Option<Vec<String>>,
    #[serde(default)]
    pub obstacle_density: f64,
    pub seed: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuerySettings {
    pub start: [i32; 2],
    pub goal: [i32; 2],
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchSettings {
    #[serde(default)]
    pub g_cost: GCost,
    pub max_expansions: Option<usize>,
}

fn default_tile_size() -> f64 {
    1.0
}

/// Loads the configuration at `path`, layered with `MAPFORGE__SECTION__KEY`
/// environment overrides.
///
/// The tile pairs `query.start` and `query.goal` are read from the
/// environment as comma-separated lists, e.g. `MAPFORGE__QUERY__GOAL=3,4`.
pub fn load_config(path: &str) -> Result<Config, ConfigError> {
    load_config_with_env(path, None)
}

/// [`load_config`] reading overrides from `env` instead of the process
/// environment when it is given.
fn load_config_with_env(
    path: &str,
    env: Option<config::Map<String, String>>,
) -> Result<Config, ConfigError> {
    info!("Attempting to load configuration from {}", path);

    let settings = Config::builder()
        .add_source(File::new(path, FileFormat::Toml).required(true))
        .add_source(
            Environment::with_prefix("MAPFORGE")
                .separator("__")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("query.start")
                .with_list_parse_key("query.goal")
                .source(env),
        )
        .build();

    match settings {
        Ok(config) => {
            info!("Successfully loaded configuration from {}", path);
            Ok(config)
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            Err(e)
        }
    }
}

pub fn load_settings(path: &str) -> Result<Settings, ConfigError> {
    load_config(path)?.try_deserialize()
}

/// Parses settings from TOML text without touching the file system or environment.
pub fn settings_from_str(toml: &str) -> Result<Settings, ConfigError> {
    Config::builder()
        .add_source(File::from_str(toml, FileFormat::Toml))
        .build()?
        .try_deserialize()
}
