//! Configuration loading and management.

use std::path::{Path, PathBuf};

use dt_core::{BacModel, MetricsConfig};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,
    /// BAC estimate used for status and warnings.
    pub bac_model: BacModel,
    /// BAC points metabolised per hour, for the sober-time estimate.
    pub metabolism_rate_per_hour: f64,
    /// Amount recorded by `dt water` when none is given.
    pub default_water_ml: f64,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        let metrics = MetricsConfig::default();
        Self {
            database_path: data_dir.join("dt.db"),
            bac_model: metrics.bac_model,
            metabolism_rate_per_hour: metrics.metabolism_rate_per_hour,
            default_water_ml: 200.0,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    ///
    /// Later sources win: defaults, the user config file, `config_path`, then `DT_*`
    /// environment variables.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed("DT_"));

        figment.extract()
    }

    /// The metric tunables handed to the core.
    pub const fn metrics(&self) -> MetricsConfig {
        MetricsConfig {
            bac_model: self.bac_model,
            metabolism_rate_per_hour: self.metabolism_rate_per_hour,
        }
    }
}

/// Returns the platform-specific config directory for dt.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("dt"))
}

/// Returns the platform-specific data directory for dt.
///
/// On Linux: `~/.local/share/dt`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("dt"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dirs_data_path_ends_with_dt() {
        let path = dirs_data_path().unwrap();
        assert_eq!(path.file_name().unwrap(), "dt");
    }

    #[test]
    fn test_default_config_uses_data_dir_for_db() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.database_path, data_dir.join("dt.db"));
        assert_eq!(config.metrics(), MetricsConfig::default());
    }

    #[test]
    fn test_config_file_overrides_defaults() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(
            &path,
            "database_path = \"/tmp/other.db\"\nbac_model = \"simple\"\ndefault_water_ml = 350.0\n",
        )
        .unwrap();

        let config = Config::load_from(Some(&path)).unwrap();
        assert_eq!(config.database_path, PathBuf::from("/tmp/other.db"));
        assert_eq!(config.bac_model, BacModel::Simple);
        assert!((config.default_water_ml - 350.0).abs() < f64::EPSILON);
        assert!((config.metabolism_rate_per_hour - 0.15).abs() < f64::EPSILON);
    }

    #[test]
    fn test_unknown_bac_model_is_rejected() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join("config.toml");
        std::fs::write(&path, "bac_model = \"guess\"\n").unwrap();

        assert!(Config::load_from(Some(&path)).is_err());
    }
}
