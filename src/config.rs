use config::builder::{ConfigBuilder, DefaultState};
use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};

/// Application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Upper bound for one multipart request, both files included.
    pub max_upload_bytes: usize,
}

/// Classification defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// Minimum orders for a positive when the request does not say.
    pub default_threshold: u64,
    pub positive_top_percent: u32,
    pub negative_top_percent: u32,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            max_upload_bytes: 25 * 1024 * 1024,
        }
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            default_threshold: 1,
            positive_top_percent: 40,
            negative_top_percent: 20,
        }
    }
}

impl AppConfig {
    /// Load defaults, then `analyzer.toml` if present, then `ANALYZER__*`
    /// environment variables (e.g. `ANALYZER__SERVER__PORT=9000`).
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::builder()?
            .add_source(File::with_name("analyzer").required(false))
            .add_source(Self::environment())
            .build()?
            .try_deserialize()
    }

    fn environment() -> Environment {
        Environment::with_prefix("ANALYZER")
            .separator("__")
            .try_parsing(true)
    }

    fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        let defaults = AppConfig::default();
        let server = defaults.server;
        let analysis = defaults.analysis;

        Config::builder()
            .set_default("server.host", server.host)?
            .set_default("server.port", i64::from(server.port))?
            .set_default("server.max_upload_bytes", server.max_upload_bytes as i64)?
            .set_default("analysis.default_threshold", analysis.default_threshold as i64)?
            .set_default("analysis.positive_top_percent", i64::from(analysis.positive_top_percent))?
            .set_default("analysis.negative_top_percent", i64::from(analysis.negative_top_percent))
    }
}
