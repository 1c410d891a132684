//! Tunables for the morph session, loadable from a TOML file.
//!
//! Every section and field is optional; missing values keep their defaults.

use crate::alignment::AlignmentOptions;
use crate::colors::ColorRamp;
use crate::interpolate::BlendSpec;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Upper bound for each of the before/between/after frame counts.
pub const MAX_BLEND_COUNT: usize = 100;
/// Parameter step used to find the initial direction of a curve.
pub const ARROW_EPSILON: f64 = 0.001;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub alignment: AlignmentOptions,
    pub colors: ColorRamp,
    pub blend: BlendConfig,
    pub arrows: ArrowConfig,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlendConfig {
    pub before: usize,
    pub between: usize,
    pub after: usize,
    pub max_count: usize,
}

impl Default for BlendConfig {
    fn default() -> Self {
        BlendConfig {
            before: 0,
            between: 0,
            after: 0,
            max_count: MAX_BLEND_COUNT,
        }
    }
}

impl BlendConfig {
    pub fn spec(&self) -> BlendSpec {
        BlendSpec::new(self.before, self.between, self.after)
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrowConfig {
    pub epsilon: f64,
}

impl Default for ArrowConfig {
    fn default() -> Self {
        ArrowConfig { epsilon: ARROW_EPSILON }
    }
}

impl Config {
    pub fn from_toml_str(content: &str) -> Result<Config> {
        toml::from_str(content).context("Invalid configuration")
    }

    pub fn load(path: &std::path::Path) -> Result<Config> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read config file {}", path.display()))?;
        let config = Self::from_toml_str(&content).with_context(|| format!("In {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
