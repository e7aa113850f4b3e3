use serde::{Deserialize, Serialize};

use super::defaults;

/// Scoring and acceptance policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// A new shop with no valuable menu is kept only above this reliability.
    pub acceptance_reliability_threshold: u8,
    /// Optional path to a TOML category table replacing the built-in one.
    pub category_table_path: Option<String>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            acceptance_reliability_threshold: defaults::DEFAULT_ACCEPTANCE_RELIABILITY_THRESHOLD,
            category_table_path: None,
        }
    }
}
