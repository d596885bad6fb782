use std::path::PathBuf;

use etl_engine::{EngineConfig, RestartRoute};

use super::logging::LogDestination;

pub const SOURCE_URL_VAR: &str = "SPACEX_API_URL";
pub const CONTROL_URL_VAR: &str = "MINI_ETL_CONTROL_URL";
pub const EXPORT_DIR_VAR: &str = "MINI_ETL_EXPORT_DIR";
pub const LOG_VAR: &str = "MINI_ETL_LOG";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub engine: EngineConfig,
    pub log_destination: LogDestination,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let export_dir = get(EXPORT_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("exports"));
        let mut engine = EngineConfig::default_with_export_dir(export_dir);
        engine.source_url = get(SOURCE_URL_VAR);
        if let Some(control_url) = get(CONTROL_URL_VAR) {
            engine.restart_route = RestartRoute::ControlEndpoint(control_url);
        }

        let log_destination = get(LOG_VAR)
            .and_then(|raw| LogDestination::parse(&raw))
            .unwrap_or(LogDestination::File);

        Self {
            engine,
            log_destination,
        }
    }
}
