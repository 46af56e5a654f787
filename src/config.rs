//! # Configuration Management
//!
//! This module loads the observer and display settings from
//! `suncalc-config.toml`. A missing or malformed file is not fatal: the
//! defaults (Kyiv at sea level) are used and the reason is logged.
//!
//! ```toml
//! [observer]
//! name = "Kyiv"
//! latitude = 50.5
//! longitude = 30.5
//! height = 0.0
//!
//! [solver]
//! dip = "refracted"
//!
//! [display]
//! json = false
//! chart = true
//! ```

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::error::ConfigError;
use crate::phases::{HorizonDip, PhaseTable};

/// Default config file name, resolved against the working directory.
pub const CONFIG_FILE: &str = "suncalc-config.toml";

/// Application configuration loaded from suncalc-config.toml
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Where the sun is observed from
    pub observer: ObserverConfig,
    /// Event solver options
    #[serde(default)]
    pub solver: SolverConfig,
    /// Output options
    #[serde(default)]
    pub display: DisplayConfig,
}

/// Observer location
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ObserverConfig {
    /// Human-readable place name for reports
    pub name: String,
    /// Degrees, north positive
    pub latitude: f64,
    /// Degrees, east positive
    pub longitude: f64,
    /// Metres above the horizon plane
    #[serde(default)]
    pub height: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct SolverConfig {
    /// Horizon dip model for elevated observers
    #[serde(default)]
    pub dip: HorizonDip,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// Print a JSON report instead of the event table
    pub json: bool,
    /// Append the altitude chart to the text report
    pub chart: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        DisplayConfig {
            json: false,
            chart: true,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            observer: ObserverConfig {
                name: "Kyiv".to_string(),
                latitude: 50.5,
                longitude: 30.5,
                height: 0.0,
            },
            solver: SolverConfig::default(),
            display: DisplayConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from suncalc-config.toml
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load() -> Self {
        Self::load_from_path(CONFIG_FILE)
    }

    /// Load configuration from specified path
    /// Falls back to default configuration if file doesn't exist or is invalid
    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::try_load_from_path(path) {
            Ok(config) => config,
            Err(e) => {
                warn!("Cannot use config file {}: {}", path.display(), e);
                warn!("Using default configuration (Kyiv)");
                Self::default()
            }
        }
    }

    /// Load configuration from specified path without falling back.
    ///
    /// A missing file yields the defaults. Any other read failure and any
    /// parse failure is returned, so callers that write the file back never
    /// replace settings they could not read.
    pub fn try_load_from_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!(
                    "No config file at {}, using default configuration (Kyiv)",
                    path.display()
                );
                return Ok(Self::default());
            }
            Err(e) => return Err(e.into()),
        };
        let config = toml::from_str::<Config>(&contents)?;
        info!("Loaded configuration for observer: {}", config.observer.name);
        Ok(config)
    }

    /// Write this configuration as pretty TOML to `path`.
    pub fn save_to_path<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        fs::write(path.as_ref(), contents)?;
        info!("Configuration saved to {}", path.as_ref().display());
        Ok(())
    }

    /// Normalize the file at `path` to pretty TOML, creating it with the
    /// defaults when missing. A file that cannot be read or parsed is left
    /// untouched and the error returned.
    pub fn rewrite_path<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let config = Self::try_load_from_path(path.as_ref())?;
        config.save_to_path(path)?;
        Ok(config)
    }

    /// Phase table using the configured dip model.
    pub fn phase_table(&self) -> PhaseTable {
        PhaseTable::with_dip(self.solver.dip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.observer.name, "Kyiv");
        assert_eq!(config.observer.latitude, 50.5);
        assert_eq!(config.observer.longitude, 30.5);
        assert_eq!(config.observer.height, 0.0);
        assert_eq!(config.solver.dip, HorizonDip::Refracted);
        assert!(config.display.chart);
        assert!(!config.display.json);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_optional_sections() {
        let parsed: Config = toml::from_str(
            r#"
            [observer]
            name = "Calgary"
            latitude = 51.0447
            longitude = -114.0719
            "#,
        )
        .unwrap();
        assert_eq!(parsed.observer.height, 0.0);
        assert_eq!(parsed.solver, SolverConfig::default());
        assert_eq!(parsed.display, DisplayConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[observer]\nname = \"Alps\"\nlatitude = 46.5\nlongitude = 8.0\nheight = 2000.0\n\n[solver]\ndip = \"geometric\""
        )
        .unwrap();

        let config = Config::load_from_path(file.path());
        assert_eq!(config.observer.name, "Alps");
        assert_eq!(config.observer.height, 2000.0);
        assert_eq!(config.phase_table().dip, HorizonDip::Geometric);
    }

    #[test]
    fn test_invalid_file_falls_back() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[observer]\nlatitude = \"north\"").unwrap();
        let config = Config::load_from_path(file.path());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_load_nonexistent_file() {
        let config = Config::load_from_path("/nonexistent/path");
        // Should fallback to default
        assert_eq!(config.observer.name, "Kyiv");
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let mut config = Config::default();
        config.observer.height = 120.0;
        config.display.json = true;

        config.save_to_path(&path).unwrap();
        assert_eq!(Config::load_from_path(&path), config);
    }

    #[test]
    fn test_save_to_missing_directory_fails() {
        let result = Config::default().save_to_path("/nonexistent/dir/suncalc-config.toml");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_strict_load_reports_parse_errors() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[observer]\nlatitude = \"north\"").unwrap();
        let result = Config::try_load_from_path(file.path());
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_strict_load_of_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::try_load_from_path(dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unreadable_path_is_not_treated_as_missing() {
        // A directory exists but cannot be read as a file
        let dir = tempfile::tempdir().unwrap();
        let result = Config::try_load_from_path(dir.path());
        assert!(matches!(result, Err(ConfigError::Io(_))));
        assert_eq!(Config::load_from_path(dir.path()), Config::default());
    }

    #[test]
    fn test_rewrite_keeps_malformed_file() {
        let original = "[observer]\nname = \"Alps\"\nlatitude = 46.5\nlongitude = 8.0\n\n[solver]\ndip = \"geometric\"\n\n[display]\njson = \"yes\"\n";
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, original).unwrap();

        let result = Config::rewrite_path(&path);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
        assert_eq!(fs::read_to_string(&path).unwrap(), original);
    }

    #[test]
    fn test_rewrite_creates_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        let config = Config::rewrite_path(&path).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(Config::try_load_from_path(&path).unwrap(), config);
    }

    #[test]
    fn test_rewrite_preserves_valid_settings() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(
            &path,
            "[observer]\nname = \"Alps\"\nlatitude = 46.5\nlongitude = 8.0\n\n[solver]\ndip = \"geometric\"\n",
        )
        .unwrap();

        let config = Config::rewrite_path(&path).unwrap();
        assert_eq!(config.observer.name, "Alps");
        assert_eq!(config.solver.dip, HorizonDip::Geometric);
        assert_eq!(Config::try_load_from_path(&path).unwrap(), config);
    }
}
