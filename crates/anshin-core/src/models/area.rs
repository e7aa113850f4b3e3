use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A municipality master row driving batch collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AreaRecord {
    pub code: String,
    pub prefecture: String,
    pub name: String,
    pub last_collected_at: Option<DateTime<Utc>>,
}

impl AreaRecord {
    /// Query string handed to name-keyed adapters, e.g. "福岡県 福岡市".
    pub fn query_name(&self) -> String {
        format!("{} {}", self.prefecture, self.name).trim().to_string()
    }

    pub fn is_due(&self, cutoff: DateTime<Utc>) -> bool {
        self.last_collected_at.map_or(true, |t| t < cutoff)
    }
}

/// An already-approved restaurant known to the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestaurantRef {
    pub id: String,
    pub name: String,
    pub place_id: Option<String>,
}
