use crate::errors::ConfigError;
use crate::unit::DEFAULT_RESOLUTION;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// What to do when a targeted event names a layer the tree does not have
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownLayerPolicy {
    /// Reject the event with [`StoreError::UnknownLayer`](crate::errors::StoreError::UnknownLayer)
    #[default]
    Error,
    /// Log a warning and drop the event
    Ignore,
}

/// Layer store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Resolution (pixels per inch) used when a shape has no stroke resolution
    pub default_resolution: f64,

    /// Notify listeners after a full document reload
    pub emit_change_on_reload: bool,

    /// Handling of events for layers missing from the tree
    pub unknown_layer: UnknownLayerPolicy,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            default_resolution: DEFAULT_RESOLUTION,
            emit_change_on_reload: false,
            unknown_layer: UnknownLayerPolicy::Error,
        }
    }
}

impl StoreConfig {
    /// Load config from standard location
    /// Returns default config if file doesn't exist or is malformed
    pub fn load() -> Self {
        match Self::config_path().and_then(|path| Self::try_load(&path)) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load store config, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Load config from `path`, returning defaults if the file doesn't exist
    pub fn try_load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Load config from `path`
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: StoreConfig = serde_json::from_str(&contents)?;
        Ok(config.sanitized())
    }

    /// Get cross-platform config file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        use directories::ProjectDirs;

        let proj_dirs = ProjectDirs::from("", "", "layerpanel").ok_or(ConfigError::NoConfigDir)?;

        Ok(proj_dirs.config_dir().join("store.json"))
    }

    fn sanitized(mut self) -> Self {
        if !(self.default_resolution.is_finite() && self.default_resolution > 0.0) {
            log::warn!(
                "Invalid default_resolution {} in store config, using {}",
                self.default_resolution,
                DEFAULT_RESOLUTION
            );
            self.default_resolution = DEFAULT_RESOLUTION;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.default_resolution, 300.0);
        assert!(!config.emit_change_on_reload);
        assert_eq!(config.unknown_layer, UnknownLayerPolicy::Error);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "emit_change_on_reload": true, "unknown_layer": "ignore" }}"#).unwrap();

        let config = StoreConfig::load_from(file.path()).unwrap();
        assert!(config.emit_change_on_reload);
        assert_eq!(config.unknown_layer, UnknownLayerPolicy::Ignore);
        assert_eq!(config.default_resolution, 300.0);
    }

    #[test]
    fn test_invalid_resolution_is_replaced() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "default_resolution": -5 }}"#).unwrap();

        let config = StoreConfig::load_from(file.path()).unwrap();
        assert_eq!(config.default_resolution, 300.0);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = StoreConfig::try_load(&dir.path().join("store.json")).unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();

        assert!(matches!(
            StoreConfig::load_from(file.path()),
            Err(ConfigError::Json(_))
        ));
    }
}
