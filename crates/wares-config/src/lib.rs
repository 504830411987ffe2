//! # wares-config
//!
//! Layered configuration loading for the wares item service using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`WARES_*` prefix, `__` as separator)
//! 2. Project-level `.wares/config.toml`
//! 3. User-level `~/.config/wares/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `WARES_DATABASE__PATH` -> `database.path`,
//! `WARES_AUDIT__LOG_PATH` -> `audit.log_path`, etc. The `__` (double
//! underscore) separates nested config sections.

mod audit;
mod database;
mod error;
mod general;

pub use audit::AuditConfig;
pub use database::DatabaseConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WaresConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub audit: AuditConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl WaresConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] if you need
    /// `.env` file loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any layer fails to merge or extract.
    pub fn load() -> Result<Self, ConfigError> {
        Self::figment().extract().map_err(ConfigError::from)
    }

    /// Load configuration with `.env` file support.
    ///
    /// Calls `dotenvy` to load the `.env` file from the workspace root before
    /// building the figment. This is the typical entry point for servers and
    /// tests.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if any layer fails to merge or extract.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// This is public so tests can inspect the figment directly or add
    /// additional providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".wares/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment = figment.merge(Env::prefixed("WARES_").split("__"));

        figment
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("wares").join("config.toml"))
    }

    /// Load `.env` from the workspace root.
    ///
    /// Walks up from `CARGO_MANIFEST_DIR` (if available) or current dir looking
    /// for a `.env` file. Silently does nothing if no `.env` is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // Walk up at most 3 levels (crate -> crates/ -> workspace root)
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        // Fallback: try current directory
        let _ = dotenvy::dotenv();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn default_config_loads() {
        let config = WaresConfig::default();
        assert_eq!(config.database.path, "wares.db");
        assert_eq!(config.audit.log_path, "logs.json");
        assert_eq!(config.general.default_page_size, 10);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: WaresConfig = WaresConfig::figment().extract()?;
            assert_eq!(config.database.path, "wares.db");
            assert_eq!(config.general.default_page_size, 10);
            Ok(())
        });
    }

    #[test]
    fn env_layer_overrides_defaults() {
        figment::Jail::expect_with(|jail| {
            jail.set_env("WARES_DATABASE__PATH", "/tmp/override.db");
            jail.set_env("WARES_AUDIT__LOG_PATH", "/tmp/audit.json");
            let config: WaresConfig = WaresConfig::figment().extract()?;
            assert_eq!(config.database.path, "/tmp/override.db");
            assert_eq!(config.audit.log_path, "/tmp/audit.json");
            Ok(())
        });
    }

    #[test]
    fn project_toml_layer_is_read() {
        figment::Jail::expect_with(|jail| {
            jail.create_dir(".wares")?;
            jail.create_file(
                ".wares/config.toml",
                r#"
                [general]
                default_page_size = 25
                "#,
            )?;
            let config: WaresConfig = WaresConfig::figment().extract()?;
            assert_eq!(config.general.default_page_size, 25);
            Ok(())
        });
    }
}
