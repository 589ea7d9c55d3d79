use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub api: ApiSettings,
    pub pagination: PaginationSettings,
    pub export: ExportSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiSettings {
    /// Root of the REST API, e.g. `http://localhost:8000/api`.
    pub base_url: String,
    pub token: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaginationSettings {
    pub default_page_size: u64,
    pub page_size_options: Vec<u64>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ExportSettings {
    /// Upper bound on records pulled for a single report.
    pub max_records: u64,
}

impl Settings {
    pub fn load() -> Result<Self, ConfigError> {
        let config = Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            .add_source(
                Environment::default()
                    .separator("__")
                    .prefix("EXPEDIENTES"),
            )
            .build()?;

        config.try_deserialize()
    }

    /// Defaults only, without reading files or the environment.
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            .set_default("api.base_url", "http://localhost:8000")?
            .set_default("api.token", None::<String>)?
            .set_default("api.timeout_secs", 30)?
            .set_default("pagination.default_page_size", 10)?
            .set_default("pagination.page_size_options", vec![5, 10, 25])?
            .set_default("export.max_records", 10000)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self::defaults().expect("Failed to load default settings")
    }
}
