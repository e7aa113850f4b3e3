use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Allergen;

/// One menu item as claimed by a single source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MenuClaim {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Allergens the source says this item is free of or can omit.
    #[serde(default)]
    pub allergens_removed: BTreeSet<Allergen>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// When the claim was observed; drives freshness decay.
    #[serde(default)]
    pub collected_at: Option<DateTime<Utc>>,
}

impl MenuClaim {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_allergens(mut self, allergens: impl IntoIterator<Item = Allergen>) -> Self {
        self.allergens_removed.extend(allergens);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn collected(mut self, at: DateTime<Utc>) -> Self {
        self.collected_at = Some(at);
        self
    }

    /// Name and description joined for text scans.
    pub fn text(&self) -> String {
        match &self.description {
            Some(d) => format!("{} {}", self.name, d),
            None => self.name.clone(),
        }
    }
}
