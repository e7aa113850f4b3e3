use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{MenuClaim, SourceType};
use crate::geo::GeoPoint;

/// Where a sighting came from.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SourceCitation {
    #[serde(rename = "type")]
    pub source_type: SourceType,
    pub url: Option<String>,
}

impl SourceCitation {
    pub fn new(source_type: SourceType, url: impl Into<String>) -> Self {
        Self {
            source_type,
            url: Some(url.into()),
        }
    }
}

/// Optional descriptive data attached to a sighting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct SightingMetadata {
    pub phone: Option<String>,
    pub website: Option<String>,
    pub opening_hours: Option<String>,
    /// Photo references (URLs or provider photo names).
    pub images: Vec<String>,
    /// The source showed photographic evidence even if no reference was kept.
    pub has_photos: bool,
    pub description: Option<String>,
    pub tags: Vec<String>,
    pub features: BTreeMap<String, bool>,
    pub contamination_level: Option<String>,
    pub child_status: Option<String>,
    pub child_details: Option<String>,
    /// Minimum reliability granted by a curated source.
    pub reliability_floor: Option<u8>,
}

/// One source's claim about one shop at collection time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawSighting {
    pub shop_name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    /// Stable external place identifier, when the source has one.
    #[serde(default)]
    pub place_id: Option<String>,
    pub source: SourceCitation,
    #[serde(default)]
    pub menus: Vec<MenuClaim>,
    #[serde(default)]
    pub metadata: SightingMetadata,
}

impl RawSighting {
    pub fn new(shop_name: impl Into<String>, source: SourceCitation) -> Self {
        Self {
            shop_name: shop_name.into(),
            address: None,
            location: None,
            place_id: None,
            source,
            menus: Vec::new(),
            metadata: SightingMetadata::default(),
        }
    }

    pub fn with_address(mut self, address: impl Into<String>) -> Self {
        self.address = Some(address.into());
        self
    }

    pub fn with_menu(mut self, menu: MenuClaim) -> Self {
        self.menus.push(menu);
        self
    }

    pub fn has_photos(&self) -> bool {
        self.metadata.has_photos || !self.metadata.images.is_empty()
    }
}
