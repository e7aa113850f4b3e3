//! Curated chain-brand master data.
//!
//! Each brand carries the names it is known by, the query used to find its
//! branches in a places index, and the menu items its official allergy page
//! lists. The bundled master ships with the crate; a replacement can be
//! loaded from JSON.

use std::path::Path;

use anshin_core::errors::{AnshinResult, ConfigError};
use anshin_core::models::{Allergen, MenuClaim};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const BUILTIN_CHAINS: &str = include_str!("../../data/chains.json");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainMenu {
    pub name: String,
    #[serde(default)]
    pub price: Option<u32>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub supported_allergens: Vec<Allergen>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl ChainMenu {
    pub fn to_claim(&self, collected_at: DateTime<Utc>) -> MenuClaim {
        MenuClaim {
            name: self.name.clone(),
            price: self.price,
            description: self.description.clone(),
            allergens_removed: self.supported_allergens.iter().copied().collect(),
            tags: self.tags.clone(),
            collected_at: Some(collected_at),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChainBrand {
    pub id: String,
    pub brand_name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    pub search_query: String,
    pub official_url: String,
    #[serde(default)]
    pub menus: Vec<ChainMenu>,
}

#[derive(Debug, Clone, Default)]
pub struct ChainMaster {
    brands: Vec<ChainBrand>,
}

impl ChainMaster {
    /// The master bundled with the crate.
    pub fn builtin() -> AnshinResult<Self> {
        Self::from_json(BUILTIN_CHAINS)
    }

    pub fn from_json(json: &str) -> AnshinResult<Self> {
        let brands: Vec<ChainBrand> = serde_json::from_str(json)?;
        for brand in &brands {
            if brand.brand_name.trim().is_empty() || brand.search_query.trim().is_empty() {
                return Err(ConfigError::ValidationFailed {
                    field: format!("chains.{}", brand.id),
                    message: "brand_name and search_query must be non-empty".to_string(),
                }
                .into());
            }
        }
        Ok(Self { brands })
    }

    pub fn from_path(path: &Path) -> AnshinResult<Self> {
        let json = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        Self::from_json(&json)
    }

    pub fn from_brands(brands: Vec<ChainBrand>) -> Self {
        Self { brands }
    }

    pub fn brands(&self) -> &[ChainBrand] {
        &self.brands
    }

    pub fn find(&self, id: &str) -> Option<&ChainBrand> {
        self.brands.iter().find(|b| b.id == id)
    }

    pub fn len(&self) -> usize {
        self.brands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.brands.is_empty()
    }
}
