//! # gocmd-config
//!
//! Layered configuration loading for gocmd using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`GOCMD_*` prefix, `__` as separator)
//! 2. Project-level `.gocmd/config.toml`
//! 3. User-level `~/.config/gocmd/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `GOCMD_SCAN__UNSAFE_POINTER` -> `scan.unsafe_pointer` and
//! `GOCMD_OUTPUT__FORMAT` -> `output.format`.
//!
//! # Usage
//!
//! ```no_run
//! use gocmd_config::GocmdConfig;
//!
//! let config = GocmdConfig::load().expect("config");
//! for pattern in &config.scan.exclude {
//!     println!("excluding {pattern}");
//! }
//! ```

mod error;
mod output;
mod scan;

pub use error::ConfigError;
pub use output::{OutputConfig, OutputFormat};
pub use scan::ScanConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct GocmdConfig {
    #[serde(default)]
    pub scan: ScanConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl GocmdConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`GocmdConfig::load_with_dotenv`] for
    /// `.env` file loading. The result is validated.
    ///
    /// # Errors
    /// Returns `ConfigError::Figment` when a source cannot be parsed and
    /// `ConfigError::InvalidValue` when validation fails.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the current directory.
    ///
    /// # Errors
    /// See [`GocmdConfig::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or add providers on top.
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
        let local_path = PathBuf::from(".gocmd/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("GOCMD_").split("__"))
    }

    /// Check values serde cannot check.
    ///
    /// # Errors
    /// Returns `ConfigError::InvalidValue` for an exclude glob that does
    /// not compile.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.scan.validate()
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gocmd").join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gocmd_core::UnsafePointerPolicy;

    #[test]
    fn default_config() {
        let config = GocmdConfig::default();
        assert!(config.scan.exclude.is_empty());
        assert_eq!(config.scan.unsafe_pointer, UnsafePointerPolicy::Truncate);
        assert_eq!(config.output.format, OutputFormat::Json);
    }

    #[test]
    fn figment_builds_without_files() {
        figment::Jail::expect_with(|_jail| {
            let config: GocmdConfig = GocmdConfig::figment().extract()?;
            assert_eq!(config.scan.unsafe_pointer, UnsafePointerPolicy::Truncate);
            Ok(())
        });
    }
}
