use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::json;

use super::{Allergen, SourceCitation};
use crate::constants::SYSTEM_METADATA_SOURCE;

/// Review state of a candidate. The pipeline only ever writes `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CandidateStatus {
    Pending,
    Approved,
    Rejected,
}

impl CandidateStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }
}

/// A scored menu item as written to the review queue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateMenu {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category: String,
    pub allergens_removable: Vec<Allergen>,
    pub value_score: i64,
    pub tags: Vec<String>,
}

/// Shop-level data carried alongside the citations as one metadata source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SystemMetadata {
    pub phone: Option<String>,
    pub opening_hours: Option<String>,
    pub website_url: Option<String>,
    pub tags: Vec<String>,
    pub features: BTreeMap<String, bool>,
    pub images: Vec<String>,
    pub contamination_level: Option<String>,
    pub child_status: Option<String>,
    pub child_details: Option<String>,
    pub place_id: Option<String>,
    pub is_update: bool,
    pub reference_restaurant_id: Option<String>,
}

/// Final pipeline output, one per accepted shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateRecord {
    pub id: String,
    pub job_id: String,
    pub shop_name: String,
    pub address: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    pub menus: Vec<CandidateMenu>,
    pub sources: Vec<SourceCitation>,
    pub metadata: SystemMetadata,
    pub reliability_score: u8,
    pub status: CandidateStatus,
    pub created_at: DateTime<Utc>,
}

impl CandidateRecord {
    /// Citations followed by the system-metadata blob, as stored.
    pub fn sources_json(&self) -> serde_json::Value {
        let mut items: Vec<serde_json::Value> = self
            .sources
            .iter()
            .map(|s| json!({ "type": s.source_type.as_str(), "url": s.url }))
            .collect();
        items.push(json!({
            "type": SYSTEM_METADATA_SOURCE,
            "data": self.metadata,
        }));
        serde_json::Value::Array(items)
    }

    /// Inverse of [`CandidateRecord::sources_json`].
    pub fn split_sources(
        value: &serde_json::Value,
    ) -> Result<(Vec<SourceCitation>, SystemMetadata), serde_json::Error> {
        let mut citations = Vec::new();
        let mut metadata = SystemMetadata::default();
        if let Some(items) = value.as_array() {
            for item in items {
                if item.get("type").and_then(|t| t.as_str()) == Some(SYSTEM_METADATA_SOURCE) {
                    if let Some(data) = item.get("data") {
                        metadata = serde_json::from_value(data.clone())?;
                    }
                } else {
                    citations.push(serde_json::from_value(item.clone())?);
                }
            }
        }
        Ok((citations, metadata))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SourceType;

    #[test]
    fn sources_json_appends_metadata_blob() {
        let record = CandidateRecord {
            id: "c1".into(),
            job_id: "j1".into(),
            shop_name: "Shop".into(),
            address: None,
            lat: None,
            lng: None,
            menus: vec![],
            sources: vec![SourceCitation::new(SourceType::Blog, "https://b.example/1")],
            metadata: SystemMetadata {
                phone: Some("092-000-0000".into()),
                ..SystemMetadata::default()
            },
            reliability_score: 40,
            status: CandidateStatus::Pending,
            created_at: Utc::now(),
        };
        let value = record.sources_json();
        let items = value.as_array().unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["type"], "blog");
        assert_eq!(items[1]["type"], "system_metadata");
        assert_eq!(items[1]["data"]["phone"], "092-000-0000");

        let (citations, metadata) = CandidateRecord::split_sources(&value).unwrap();
        assert_eq!(citations, record.sources);
        assert_eq!(metadata, record.metadata);
    }
}
