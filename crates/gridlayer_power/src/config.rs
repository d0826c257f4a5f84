//! # Layer Configuration
//!
//! Parses the power layer's TOML config. Loaded once at startup and shared
//! read-only by every classification worker.
//!
//! ```toml
//! [layer]
//! name = "power"
//!
//! [reduction.polygons]
//! buffer = 3.0
//! tolerance = 3.0
//! min_area_ratio = 0.5
//! min_hole_area_ratio = 0.5
//!
//! [reduction.lines]
//! tolerance = 5.0
//! min_length_ratio = 0.25
//! max_fan_in = 8
//! ```
//!
//! Every table is optional; missing tables take the defaults above.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::reduction::ReductionParams;

/// Default output layer name.
pub const LAYER_NAME: &str = "power";

/// Top-level power layer configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerConfig {
    /// Output layer settings.
    #[serde(default)]
    pub layer: LayerSection,
    /// Merge tuning.
    #[serde(default)]
    pub reduction: ReductionParams,
}

/// The `[layer]` table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSection {
    /// Name of the vector-tile layer shapes are emitted into.
    #[serde(default = "default_name")]
    pub name: String,
}

fn default_name() -> String {
    LAYER_NAME.to_owned()
}

impl Default for LayerSection {
    fn default() -> Self {
        Self { name: default_name() }
    }
}

impl LayerConfig {
    /// Loads and validates a config file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// holds out-of-range values.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), layer = %config.layer.name, "loaded layer config");
        Ok(config)
    }

    /// Parses and validates config text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not valid TOML or holds out-of-range
    /// values.
    pub fn from_toml_str(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks every value is usable.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] on the first bad value.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.layer.name.trim().is_empty() {
            return Err(ConfigError::Invalid("layer.name must not be empty".to_owned()));
        }
        self.reduction.validate()
    }
}
