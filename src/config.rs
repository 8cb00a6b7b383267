// In: src/config.rs

//! The single source of truth for proxy-layer configuration.
//!
//! `HostConfig` is created once at the application boundary (from a JSON file,
//! a JSON string, or the Python binding) and installed before the proxy
//! registry is first used. The registry then shares it read-only via an
//! `Arc<HostConfig>`.

use std::path::Path;

use arrow_schema::TimeUnit;
use serde::{Deserialize, Serialize};

use crate::error::ArrowHostError;

/// Configuration consulted by proxy constructors.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct HostConfig {
    /// If true, a validity mask with no nulls produces no bitmap at all, which
    /// Arrow reads as "all valid". If false, a bitmap is always packed.
    #[serde(default = "default_true")]
    pub elide_all_valid_bitmap: bool,

    /// Unit applied to timestamp arrays constructed without a `TimeUnit` argument.
    #[serde(default = "default_time_unit")]
    pub default_time_unit: TimeUnit,

    /// Time zone applied to timestamp arrays constructed without a `TimeZone`
    /// argument. `None` builds zone-naive timestamps.
    #[serde(default)]
    pub default_time_zone: Option<String>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            elide_all_valid_bitmap: true,
            default_time_unit: default_time_unit(),
            default_time_zone: None,
        }
    }
}

impl HostConfig {
    /// Parses a configuration from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ArrowHostError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON configuration file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ArrowHostError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// Helper for `serde` to default a boolean field to true.
fn default_true() -> bool {
    true
}

/// Helper for `serde` to provide a default for `default_time_unit`.
fn default_time_unit() -> TimeUnit {
    TimeUnit::Microsecond
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_json_yields_defaults() {
        let config = HostConfig::from_json_str("{}").unwrap();
        assert_eq!(config, HostConfig::default());
        assert!(config.elide_all_valid_bitmap);
        assert_eq!(config.default_time_unit, TimeUnit::Microsecond);
    }

    #[test]
    fn test_partial_json_overrides() {
        let config = HostConfig::from_json_str(
            r#"{"elide_all_valid_bitmap": false, "default_time_unit": "Millisecond", "default_time_zone": "UTC"}"#,
        )
        .unwrap();
        assert!(!config.elide_all_valid_bitmap);
        assert_eq!(config.default_time_unit, TimeUnit::Millisecond);
        assert_eq!(config.default_time_zone.as_deref(), Some("UTC"));
    }

    #[test]
    fn test_malformed_json_is_config_error() {
        let err = HostConfig::from_json_str("{not json").unwrap_err();
        assert!(matches!(err, ArrowHostError::SerdeJson(_)));
        assert_eq!(err.id(), crate::error::CONFIG_ERROR_ID);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = HostConfig::from_json_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ArrowHostError::Io(_)));
    }
}
