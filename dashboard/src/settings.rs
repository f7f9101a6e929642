use std::{
    collections::{BTreeMap, HashMap},
    env,
    path::PathBuf,
};

use config::Config;
use serde::Deserialize;

use crate::errors::ConfigError;

pub const CONFIG_FILE_NAME: &str = "dashboard.toml";
pub const ENV_PREFIX: &str = "DASHBOARD";

/// A named hosted query from the catalogue.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QueryDefinition {
    /// Identifier of the query on the hosting service.
    pub id: String,
    /// Column holding the row date, used for date filters and partitions.
    #[serde(default)]
    pub date_column: Option<String>,
    /// Query-string parameter that selects one date partition.
    #[serde(default)]
    pub partition_param: Option<String>,
    /// Fixed parameters sent with every request.
    #[serde(default)]
    pub params: BTreeMap<String, String>,
}

/// File and environment settings. Every field is optional; command line
/// flags take precedence.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub query_api_url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub rpc_url: Option<String>,
    #[serde(default)]
    pub concurrency: Option<usize>,
    #[serde(default)]
    pub num_retries: Option<u32>,
    #[serde(default)]
    pub delay_ms: Option<u64>,
    #[serde(default)]
    pub max_delay_ms: Option<u64>,
    #[serde(default)]
    pub queries: HashMap<String, QueryDefinition>,
}

impl Settings {
    pub fn query(&self, name: &str) -> Option<&QueryDefinition> {
        self.queries.get(name)
    }
}

/// Looks for the config file next to the executable, then in the working
/// directory.
pub fn locate_config_file() -> PathBuf {
    if let Some(config_path) = env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(CONFIG_FILE_NAME)))
    {
        if config_path.exists() {
            return config_path;
        }
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

/// Loads settings from `path` (or the located default) overlaid with
/// `DASHBOARD_*` environment variables. A missing file is not an error.
/// Nested keys use a double underscore, e.g. `DASHBOARD_QUERIES__FEES__ID`.
pub fn load_settings(path: Option<&str>) -> Result<Settings, ConfigError> {
    let path = match path {
        Some(path) => PathBuf::from(path),
        None => locate_config_file(),
    };
    let file_required = path.exists();

    let settings = Config::builder()
        .add_source(config::File::from(path).required(file_required))
        .add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    Ok(settings.try_deserialize::<Settings>()?)
}

/// Parses settings from a TOML string; used for inline catalogues and tests.
pub fn settings_from_toml(toml: &str) -> Result<Settings, ConfigError> {
    let settings = Config::builder()
        .add_source(config::File::from_str(toml, config::FileFormat::Toml))
        .build()?;
    Ok(settings.try_deserialize::<Settings>()?)
}
