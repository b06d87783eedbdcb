//! # Error Types
//!
//! Structured error types for area_core. Numeric text that fails to parse is
//! deliberately *not* an error inside the aggregator (it simply contributes
//! nothing); these variants cover the strict boundaries instead: unit-name
//! lookup, settings files, and serialization.
//!
//! ## Example
//!
//! ```rust
//! use area_core::errors::{AreaError, AreaResult};
//! use area_core::registry::UnitId;
//!
//! fn parse_id(name: &str) -> AreaResult<UnitId> {
//!     name.parse()
//! }
//!
//! assert!(parse_id("ropani").is_ok());
//! assert_eq!(
//!     parse_id("hectare").unwrap_err(),
//!     AreaError::unit_not_found("hectare"),
//! );
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for area_core operations
pub type AreaResult<T> = Result<T, AreaError>;

/// Structured error type for the conversion engine.
///
/// Serializes with a `type` discriminator so hosts can emit it as JSON.
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum AreaError {
    /// A unit id outside the fixed registry was requested.
    ///
    /// The id set is closed, so this points at a wiring bug in the caller.
    #[error("Unit not found: '{unit_id}'")]
    UnitNotFound { unit_id: String },

    /// An input value is invalid where strict parsing is required
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Settings file could not be read or parsed
    #[error("Config error in '{path}': {reason}")]
    ConfigError { path: String, reason: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },
}

impl AreaError {
    /// Create a UnitNotFound error
    pub fn unit_not_found(unit_id: impl Into<String>) -> Self {
        AreaError::UnitNotFound {
            unit_id: unit_id.into(),
        }
    }

    /// Create an InvalidInput error
    pub fn invalid_input(field: impl Into<String>, value: impl Into<String>, reason: impl Into<String>) -> Self {
        AreaError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a ConfigError
    pub fn config_error(path: impl Into<String>, reason: impl Into<String>) -> Self {
        AreaError::ConfigError {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            AreaError::UnitNotFound { .. } => "UNIT_NOT_FOUND",
            AreaError::InvalidInput { .. } => "INVALID_INPUT",
            AreaError::ConfigError { .. } => "CONFIG_ERROR",
            AreaError::SerializationError { .. } => "SERIALIZATION_ERROR",
        }
    }
}

impl From<serde_json::Error> for AreaError {
    fn from(e: serde_json::Error) -> Self {
        AreaError::SerializationError {
            reason: e.to_string(),
        }
    }
}
