//! Application configuration management.

use serde::Deserialize;
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Server configuration.
    #[serde(default)]
    pub server: ServerConfig,
    /// Reference dataset configuration.
    #[serde(default)]
    pub data: DataConfig,
}

/// Server configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Host to bind to.
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    5001
}

/// Reference dataset configuration.
///
/// Each country lives in its own directory under `root`
/// (`<root>/<country>/population.csv` and friends).
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Root directory holding one folder per country.
    #[serde(default = "default_data_root")]
    pub root: PathBuf,
    /// Maximum number of countries kept in the dataset cache.
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: u64,
    /// Time-to-live for cached country datasets, in seconds.
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            root: default_data_root(),
            cache_capacity: default_cache_capacity(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

fn default_data_root() -> PathBuf {
    PathBuf::from("data")
}

fn default_cache_capacity() -> u64 {
    32
}

fn default_cache_ttl() -> u64 {
    600 // 10 minutes
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `SNT__*` environment variables (e.g. `SNT__DATA__ROOT`).
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix("SNT").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_sources() {
        temp_env::with_vars_unset(["SNT__SERVER__PORT", "SNT__DATA__ROOT"], || {
            let config = AppConfig::load().expect("config");
            assert_eq!(config.server.host, "0.0.0.0");
            assert_eq!(config.server.port, 5001);
            assert_eq!(config.data.root, PathBuf::from("data"));
            assert_eq!(config.data.cache_capacity, 32);
            assert_eq!(config.data.cache_ttl_secs, 600);
        });
    }

    #[test]
    fn test_environment_overrides() {
        temp_env::with_vars(
            [
                ("SNT__SERVER__PORT", Some("9090")),
                ("SNT__DATA__ROOT", Some("/srv/snt")),
            ],
            || {
                let config = AppConfig::load().expect("config");
                assert_eq!(config.server.port, 9090);
                assert_eq!(config.data.root, PathBuf::from("/srv/snt"));
            },
        );
    }
}
