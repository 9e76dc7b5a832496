//! TOML-backed settings shared by the `generator` and `loader` binaries.
//! Neither binary requires a config file to run — every field defaults —
//! but one can be passed to override logging level, ring capacity, or the
//! Earth radius constant used by the Haversine recomputation.

use serde::Deserialize;
use std::path::Path;

#[derive(Deserialize, Debug, Clone)]
pub struct HaveConfig {
    #[serde(default = "defaults::log_level")]
    pub log_level: String,
    #[serde(default = "defaults::ring_capacity")]
    pub ring_capacity: usize,
    #[serde(default = "defaults::earth_radius_km")]
    pub earth_radius_km: f64,
    #[serde(default = "defaults::path_trim")]
    pub path_trim: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read '{path}'")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config")]
    Parse(#[from] toml::de::Error),
}

mod defaults {
    pub fn log_level() -> String {
        "info".into()
    }

    pub fn ring_capacity() -> usize {
        4096 * 1024
    }

    pub fn earth_radius_km() -> f64 {
        6372.8
    }

    pub fn path_trim() -> String {
        String::new()
    }
}

impl Default for HaveConfig {
    fn default() -> Self {
        Self {
            log_level: defaults::log_level(),
            ring_capacity: defaults::ring_capacity(),
            earth_radius_km: defaults::earth_radius_km(),
            path_trim: defaults::path_trim(),
        }
    }
}

impl HaveConfig {
    /// Loads config from `path`, which must exist and parse as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Ok(toml::from_str(&text)?)
    }

    /// Loads config from `path` if given, falling back to defaults
    /// otherwise. The common case for both binaries, which treat a config
    /// file as optional.
    pub fn load_or_default(path: Option<impl AsRef<Path>>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_populated_without_a_config_file() {
        let config = HaveConfig::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.ring_capacity, 4096 * 1024);
        assert!((config.earth_radius_km - 6372.8).abs() < f64::EPSILON);
    }

    #[test]
    fn partial_toml_fills_remaining_fields_with_defaults() {
        let config: HaveConfig = toml::from_str("log_level = \"debug\"\n").unwrap();
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.ring_capacity, defaults::ring_capacity());
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = HaveConfig::load("/nonexistent/have-config.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
