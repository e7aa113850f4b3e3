//! Top-level configuration with file, environment and CLI layering.

pub mod collection_config;
pub mod defaults;
pub mod observability_config;
pub mod scoring_config;
pub mod sources_config;
pub mod storage_config;

use std::path::Path;

use serde::{Deserialize, Serialize};

pub use collection_config::CollectionConfig;
pub use observability_config::ObservabilityConfig;
pub use scoring_config::ScoringConfig;
pub use sources_config::SourcesConfig;
pub use storage_config::StorageConfig;

use crate::errors::ConfigError;

/// Environment variable holding the places API key.
pub const ENV_PLACES_API_KEY: &str = "GOOGLE_MAPS_API_KEY";
/// Fallback variable name used by the web front-end deployment.
pub const ENV_PLACES_API_KEY_PUBLIC: &str = "NEXT_PUBLIC_GOOGLE_MAPS_API_KEY";
/// Environment variable holding the custom search engine id.
pub const ENV_CSE_ID: &str = "GOOGLE_CSE_ID";
/// Environment variable overriding the database path.
pub const ENV_DB_PATH: &str = "ANSHIN_DB_PATH";

/// Aggregate configuration for every subsystem.
///
/// Resolution order (highest priority first):
/// 1. CLI flags (applied by the binary)
/// 2. Environment variables
/// 3. TOML config file
/// 4. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AnshinConfig {
    pub storage: StorageConfig,
    pub collection: CollectionConfig,
    pub scoring: ScoringConfig,
    pub sources: SourcesConfig,
    pub observability: ObservabilityConfig,
}

impl AnshinConfig {
    /// Load from an optional TOML file, then apply environment overrides and validate.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Parse a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Load configuration from a TOML string (for testing).
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    /// Secrets and the database path come from the environment when set.
    pub fn apply_env_overrides(&mut self) {
        let key = std::env::var(ENV_PLACES_API_KEY)
            .or_else(|_| std::env::var(ENV_PLACES_API_KEY_PUBLIC))
            .ok()
            .filter(|v| !v.trim().is_empty());
        if key.is_some() {
            self.sources.places_api_key = key;
        }
        if let Ok(cse) = std::env::var(ENV_CSE_ID) {
            if !cse.trim().is_empty() {
                self.sources.cse_id = Some(cse);
            }
        }
        if let Ok(db) = std::env::var(ENV_DB_PATH) {
            if !db.trim().is_empty() {
                self.storage.db_path = db;
            }
        }
    }

    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.scoring.acceptance_reliability_threshold > 100 {
            return Err(ConfigError::ValidationFailed {
                field: "scoring.acceptance_reliability_threshold".to_string(),
                message: "must be between 0 and 100".to_string(),
            });
        }
        if self.collection.grid_step_lat <= 0.0 || self.collection.grid_step_lng <= 0.0 {
            return Err(ConfigError::ValidationFailed {
                field: "collection.grid_step".to_string(),
                message: "grid steps must be positive".to_string(),
            });
        }
        if self.collection.uncollected_batch_size == 0 {
            return Err(ConfigError::ValidationFailed {
                field: "collection.uncollected_batch_size".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        if self.storage.db_path.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "storage.db_path".to_string(),
                message: "must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_toml_yields_defaults() {
        let config = AnshinConfig::from_toml("").unwrap();
        assert_eq!(config.collection.raw_snapshot_cap, 50);
        assert_eq!(config.collection.uncollected_batch_size, 5);
        assert_eq!(config.collection.mesh_radius_m, 5_000);
        assert_eq!(config.scoring.acceptance_reliability_threshold, 30);
        assert!(config.sources.places_api_key.is_none());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let config = AnshinConfig::from_toml(
            r#"
            [scoring]
            acceptance_reliability_threshold = 45

            [collection]
            inter_job_delay_secs = 0
            "#,
        )
        .unwrap();
        assert_eq!(config.scoring.acceptance_reliability_threshold, 45);
        assert_eq!(config.collection.inter_job_delay_secs, 0);
        assert_eq!(config.collection.mesh_point_delay_secs, 2);
    }

    #[test]
    fn invalid_toml_is_a_parse_error() {
        let err = AnshinConfig::from_toml("[scoring\nx=").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn out_of_range_threshold_fails_validation() {
        let mut config = AnshinConfig::default();
        config.scoring.acceptance_reliability_threshold = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn adapter_filter_defaults_to_all() {
        let mut sources = SourcesConfig::default();
        assert!(sources.adapter_enabled("blog"));
        sources.enabled_adapters = vec!["sns".into()];
        assert!(!sources.adapter_enabled("blog"));
        assert!(sources.adapter_enabled("sns"));
    }
}
