//! # Engine Settings
//!
//! Settings that change how a [`Session`](crate::session::Session) behaves.
//! They are read from a TOML file; every field is optional and falls back to
//! its default.
//!
//! ```toml
//! # jagga.toml
//! aggregation = "active_group_only"   # all_fields | active_group_only | clear_on_lock
//! hide_inactive_groups = true
//! ```
//!
//! ## Example
//!
//! ```rust
//! use area_core::engine::AggregationPolicy;
//! use area_core::settings::EngineSettings;
//!
//! let settings = EngineSettings::from_toml_str("aggregation = \"clear_on_lock\"").unwrap();
//! assert_eq!(settings.aggregation, AggregationPolicy::ClearOnLock);
//! assert!(settings.hide_inactive_groups);
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::AggregationPolicy;
use crate::errors::{AreaError, AreaResult};

/// Environment variable that overrides the aggregation policy
pub const AGGREGATION_ENV: &str = "JAGGA_AGGREGATION";

/// Session-wide settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// How fields outside the locked group are summed
    pub aggregation: AggregationPolicy,

    /// Whether hosts should hide (and refuse input to) groups other than the
    /// locked one
    pub hide_inactive_groups: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        EngineSettings {
            aggregation: AggregationPolicy::AllFields,
            hide_inactive_groups: true,
        }
    }
}

impl EngineSettings {
    /// Parse settings from TOML text
    pub fn from_toml_str(text: &str) -> AreaResult<Self> {
        Self::parse(text, "<inline>")
    }

    /// Apply an aggregation override, e.g. from [`AGGREGATION_ENV`]
    pub fn with_aggregation_override(mut self, name: &str) -> AreaResult<Self> {
        self.aggregation = AggregationPolicy::from_name(name).ok_or_else(|| {
            AreaError::invalid_input(
                AGGREGATION_ENV,
                name,
                "Expected one of all_fields, active_group_only, clear_on_lock",
            )
        })?;
        Ok(self)
    }

    fn parse(text: &str, origin: &str) -> AreaResult<Self> {
        toml::from_str(text).map_err(|e| AreaError::config_error(origin, e.to_string()))
    }
}

/// Load settings from a TOML file
pub fn load_settings(path: &Path) -> AreaResult<EngineSettings> {
    let path_str = path.display().to_string();
    let text = fs::read_to_string(path).map_err(|e| AreaError::config_error(&path_str, e.to_string()))?;
    let settings = EngineSettings::parse(&text, &path_str)?;
    tracing::debug!(path = %path_str, policy = settings.aggregation.as_str(), "loaded settings");
    Ok(settings)
}
