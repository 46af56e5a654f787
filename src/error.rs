//! Error types for the public entry points.
//!
//! Numerically degenerate input (polar day, polar night, latitudes outside
//! [-90, 90]) is never an error here: it shows up as `None` for the affected
//! event. The only failure the library reports is an input shape it cannot
//! broadcast.

use thiserror::Error;

/// Errors returned by [`get_position`](crate::get_position) and
/// [`get_times`](crate::get_times).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SunCalcError {
    /// Two sequence inputs have different lengths.
    #[error("shape mismatch: `{field}` has {found} rows, expected {expected}")]
    ShapeMismatch {
        /// Name of the offending argument (`date`, `lng`, `lat` or `height`)
        field: &'static str,
        /// Row count established by the first sequence argument
        expected: usize,
        /// Row count of the offending argument
        found: usize,
    },
}

/// Errors reading or writing a configuration file.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("config file I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("cannot encode config as TOML: {0}")]
    Serialize(#[from] toml::ser::Error),
}
