//! Configuration management for aleph-marc

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;
use std::path::PathBuf;

/// Remote Z39.50 catalog reached through yaz-client
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CatalogConfig {
    pub host: String,
    pub port: u16,
    pub database: String,
    /// Preferred record syntax passed to `format`
    pub syntax: String,
    /// Path or name of the yaz-client executable
    pub yaz_client: String,
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct CacheConfig {
    pub dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from files and environment variables
    pub fn load() -> Result<Self, ConfigError> {
        let run_mode = env::var("RUN_MODE").unwrap_or_else(|_| "development".into());

        let config = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", run_mode)).required(false))
            // ALEPH_MARC_CATALOG__HOST, ALEPH_MARC_CACHE__DIR, ...
            .add_source(
                Environment::with_prefix("ALEPH_MARC")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .set_override_option("cache.dir", env::var("MARC_CACHE_DIR").ok())?
            .build()?;

        config.try_deserialize()
    }

    /// `tcp:host:port/database` address understood by yaz-client
    pub fn zurl(&self) -> String {
        format!(
            "tcp:{}:{}/{}",
            self.catalog.host, self.catalog.port, self.catalog.database
        )
    }
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            host: "aleph.unibas.ch".to_string(),
            port: 9909,
            database: "dsv05".to_string(),
            syntax: "usmarc".to_string(),
            yaz_client: "yaz-client".to_string(),
            timeout_secs: 30,
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("marc_cache"),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: "pretty".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_point_at_basel_aleph() {
        let config = AppConfig::default();
        assert_eq!(config.zurl(), "tcp:aleph.unibas.ch:9909/dsv05");
        assert_eq!(config.catalog.syntax, "usmarc");
        assert_eq!(config.cache.dir, PathBuf::from("marc_cache"));
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: AppConfig = Config::builder()
            .set_override("catalog.port", 210)
            .and_then(|b| b.build())
            .and_then(|c| c.try_deserialize())
            .unwrap();
        assert_eq!(config.catalog.port, 210);
        assert_eq!(config.catalog.host, "aleph.unibas.ch");
        assert_eq!(config.logging.level, "info");
    }
}
