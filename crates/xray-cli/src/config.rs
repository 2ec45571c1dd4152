//! Job config files.
//!
//! A config is a flat YAML mapping of [`ProcessOptions`] fields plus the
//! resampling filter:
//!
//! ```yaml
//! mode: interlaced
//! preserve_color: true
//! filter: lanczos3
//! limits:
//!   byte_max: 250
//! ```
//!
//! Missing keys keep their defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use xray_core::ProcessOptions;
use xray_ops::Filter;

/// Contents of a `--config` file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GenerateConfig {
    /// Generation options.
    #[serde(flatten)]
    pub options: ProcessOptions,
    /// Resampling filter name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl GenerateConfig {
    /// Loads a config from a YAML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_yaml_str(&text)
            .with_context(|| format!("Invalid config: {}", path.display()))
    }

    /// Parses a config from a YAML string.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Resolved filter, defaulting to bilinear.
    pub fn filter(&self) -> Result<Filter> {
        match &self.filter {
            Some(name) => Ok(name.parse::<Filter>()?),
            None => Ok(Filter::default()),
        }
    }
}
