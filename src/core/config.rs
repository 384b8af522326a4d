//! World and occlusion configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::Error;
use crate::core::types::Result;
use crate::world::dimension::DimensionProperties;

/// Smallest view distance the occlusion tracer will run with.
pub const MIN_TRACE_DISTANCE: i32 = 2;
/// Largest accepted view distance in chunk columns.
pub const MAX_VIEW_DISTANCE: i32 = 64;

/// Occlusion culling parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcclusionConfig {
    /// Horizontal view distance in chunk columns.
    pub view_distance: i32,
    /// When disabled no graph is ever built and every query reports "visible".
    pub enabled: bool,
}

impl Default for OcclusionConfig {
    fn default() -> Self {
        Self {
            view_distance: 10,
            enabled: true,
        }
    }
}

impl OcclusionConfig {
    /// View distance the tracer actually runs with.
    pub fn trace_distance(&self) -> i32 {
        self.view_distance.clamp(MIN_TRACE_DISTANCE, MAX_VIEW_DISTANCE)
    }

    pub fn validate(&self) -> Result<()> {
        if !(0..=MAX_VIEW_DISTANCE).contains(&self.view_distance) {
            return Err(Error::InvalidViewDistance(self.view_distance));
        }
        Ok(())
    }
}

/// Top-level configuration for a world session.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldConfig {
    /// Vertical extent of the world.
    pub dimension: DimensionProperties,
    /// Occlusion culling settings.
    pub occlusion: OcclusionConfig,
}

impl WorldConfig {
    /// Parse a config from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref())?;
        let config = Self::from_json(&contents)?;
        log::debug!("Loaded world config from {}", path.as_ref().display());
        Ok(config)
    }

    /// Write the config as pretty-printed JSON.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        self.dimension.validate()?;
        self.occlusion.validate()
    }
}
