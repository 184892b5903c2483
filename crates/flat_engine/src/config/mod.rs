//! Configuration system
//!
//! All tunables are carried by per-instance config values handed to a
//! subsystem at construction time; there are no process-wide flags.

pub use serde::{Deserialize, Serialize};

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

        // Format is selected by file extension
        if path.ends_with(".toml") {
            toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else if path.ends_with(".ron") {
            ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
        } else {
            Err(ConfigError::UnsupportedFormat(path.to_string()))
        }
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = if path.ends_with(".toml") {
            toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else if path.ends_with(".ron") {
            ron::ser::to_string_pretty(self, Default::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?
        } else {
            return Err(ConfigError::UnsupportedFormat(path.to_string()));
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A config value failed validation
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Configuration for the collision detection subsystem
///
/// Validated at construction; a non-positive cell size is rejected up front
/// rather than silently replaced with a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Cell size of the dynamic broad-phase grid, in world units
    pub cell_size: f32,

    /// Cell size of the static grid; falls back to `cell_size` when absent
    pub static_cell_size: Option<f32>,

    /// Emit per-tick diagnostics through the `log` crate
    pub debug_logging: bool,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            cell_size: 64.0,
            static_cell_size: None,
            debug_logging: false,
        }
    }
}

impl Config for CollisionConfig {}

impl CollisionConfig {
    /// Create a config with the given grid cell size
    pub fn with_cell_size(cell_size: f32) -> Self {
        Self {
            cell_size,
            ..Default::default()
        }
    }

    /// Validate all values, rejecting non-positive (or NaN) cell sizes
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.cell_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "collision cell_size must be positive, got {}",
                self.cell_size
            )));
        }
        if let Some(size) = self.static_cell_size {
            if !(size > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "collision static_cell_size must be positive, got {size}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(CollisionConfig::default().validate().is_ok());
    }

    #[test]
    fn test_rejects_non_positive_cell_size() {
        assert!(CollisionConfig::with_cell_size(0.0).validate().is_err());
        assert!(CollisionConfig::with_cell_size(-32.0).validate().is_err());
        assert!(CollisionConfig::with_cell_size(f32::NAN).validate().is_err());
    }

    #[test]
    fn test_rejects_non_positive_static_cell_size() {
        let config = CollisionConfig {
            static_cell_size: Some(-1.0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = CollisionConfig {
            cell_size: 128.0,
            static_cell_size: Some(256.0),
            debug_logging: true,
        };
        let text = toml::to_string_pretty(&config).unwrap();
        let parsed: CollisionConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_missing_keys_use_defaults() {
        let parsed: CollisionConfig = toml::from_str("cell_size = 32.0").unwrap();
        assert_eq!(parsed.cell_size, 32.0);
        assert_eq!(parsed.static_cell_size, None);
        assert!(!parsed.debug_logging);
    }
}
