//! The reconciliation unit: one record per fingerprint per job.

use std::collections::{BTreeMap, BTreeSet};

use anshin_core::constants::ALLERGEN_FREE_TAG;
use anshin_core::models::SightingMetadata;
use anshin_core::{Allergen, GeoPoint, MenuClaim, RawSighting, SourceCitation};

/// A menu claim after classification and scoring.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredMenu {
    pub claim: MenuClaim,
    pub category: String,
    pub value_score: i64,
    /// Allergens the item's text says can be left out on request.
    pub removable_on_request: BTreeSet<Allergen>,
}

impl ScoredMenu {
    /// Collision key: trimmed name plus the sorted claimed allergen set.
    pub fn dedup_key(&self) -> (String, Vec<Allergen>) {
        (
            self.claim.name.trim().to_string(),
            self.claim.allergens_removed.iter().copied().collect(),
        )
    }

    /// Carries an explicit allergen-free tag (`allergen_free` or `<label>_free`).
    pub fn has_allergen_free_tag(&self) -> bool {
        self.claim
            .tags
            .iter()
            .any(|t| t == ALLERGEN_FREE_TAG || t.ends_with("_free"))
    }

    /// Claimed plus text-extracted allergens, as shown to reviewers.
    pub fn allergens_removable(&self) -> Vec<Allergen> {
        self.claim
            .allergens_removed
            .union(&self.removable_on_request)
            .copied()
            .collect()
    }
}

/// Link from a merged shop to an already-approved restaurant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdateRef {
    pub restaurant_id: String,
}

/// Mutable merge target. Built from the first sighting of a fingerprint and
/// extended only through [`MergedShop::absorb`].
#[derive(Debug, Clone, PartialEq)]
pub struct MergedShop {
    pub fingerprint: String,
    pub name: String,
    pub address: Option<String>,
    pub location: Option<GeoPoint>,
    pub place_id: Option<String>,
    pub sources: Vec<SourceCitation>,
    /// Unscored claims awaiting the post-merge phases.
    pub menu_claims: Vec<MenuClaim>,
    pub menus: Vec<ScoredMenu>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub opening_hours: Option<String>,
    pub contamination_level: Option<String>,
    pub child_status: Option<String>,
    pub child_details: Option<String>,
    pub images: Vec<String>,
    pub has_photos: bool,
    pub descriptions: Vec<String>,
    pub tags: BTreeSet<String>,
    pub features: BTreeMap<String, bool>,
    pub reliability_floor: Option<u8>,
    pub reliability_score: u8,
    pub update: Option<UpdateRef>,
}

fn fill<T: Clone>(slot: &mut Option<T>, incoming: &Option<T>) {
    if slot.is_none() {
        slot.clone_from(incoming);
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl MergedShop {
    pub fn from_sighting(fingerprint: String, sighting: RawSighting) -> Self {
        let mut shop = Self {
            fingerprint,
            name: sighting.shop_name.trim().to_string(),
            address: None,
            location: None,
            place_id: None,
            sources: Vec::new(),
            menu_claims: Vec::new(),
            menus: Vec::new(),
            phone: None,
            website: None,
            opening_hours: None,
            contamination_level: None,
            child_status: None,
            child_details: None,
            images: Vec::new(),
            has_photos: false,
            descriptions: Vec::new(),
            tags: BTreeSet::new(),
            features: BTreeMap::new(),
            reliability_floor: None,
            reliability_score: 0,
            update: None,
        };
        shop.absorb(sighting);
        shop
    }

    /// Fold another sighting of the same fingerprint into this record.
    ///
    /// Menus append; citations union by URL; coordinates and scalar
    /// metadata are first-non-null; the address is replaced only by a
    /// strictly longer one; tags and features union.
    pub fn absorb(&mut self, sighting: RawSighting) {
        let RawSighting {
            shop_name,
            address,
            location,
            place_id,
            source,
            menus,
            metadata,
        } = sighting;

        if self.name.is_empty() {
            self.name = shop_name.trim().to_string();
        }
        if let Some(addr) = non_blank(address) {
            let longer = self
                .address
                .as_ref()
                .map_or(true, |cur| addr.chars().count() > cur.chars().count());
            if longer {
                self.address = Some(addr);
            }
        }
        fill(&mut self.location, &location);
        fill(&mut self.place_id, &non_blank(place_id));
        self.add_citation(source);
        self.menu_claims.extend(menus);
        self.absorb_metadata(metadata);
    }

    fn add_citation(&mut self, citation: SourceCitation) {
        let seen = match &citation.url {
            Some(url) => self.sources.iter().any(|s| s.url.as_deref() == Some(url.as_str())),
            None => self.sources.contains(&citation),
        };
        if !seen {
            self.sources.push(citation);
        }
    }

    fn absorb_metadata(&mut self, m: SightingMetadata) {
        fill(&mut self.phone, &non_blank(m.phone));
        fill(&mut self.website, &non_blank(m.website));
        fill(&mut self.opening_hours, &non_blank(m.opening_hours));
        fill(&mut self.contamination_level, &non_blank(m.contamination_level));
        fill(&mut self.child_status, &non_blank(m.child_status));
        fill(&mut self.child_details, &non_blank(m.child_details));
        for image in m.images {
            if !self.images.contains(&image) {
                self.images.push(image);
            }
        }
        self.has_photos |= m.has_photos || !self.images.is_empty();
        if let Some(d) = non_blank(m.description) {
            if !self.descriptions.contains(&d) {
                self.descriptions.push(d);
            }
        }
        self.tags.extend(m.tags);
        for (key, value) in m.features {
            let entry = self.features.entry(key).or_insert(false);
            *entry |= value;
        }
        self.reliability_floor = match (self.reliability_floor, m.reliability_floor) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
    }

    /// Every piece of free text attached to the shop, for feature scans.
    pub fn free_text(&self) -> String {
        let mut parts: Vec<&str> = vec![self.name.as_str()];
        parts.extend(self.descriptions.iter().map(String::as_str));
        for claim in &self.menu_claims {
            parts.push(claim.name.as_str());
            if let Some(d) = &claim.description {
                parts.push(d.as_str());
            }
        }
        for menu in &self.menus {
            parts.push(menu.claim.name.as_str());
            if let Some(d) = &menu.claim.description {
                parts.push(d.as_str());
            }
        }
        parts.join("\n")
    }

    pub fn is_update(&self) -> bool {
        self.update.is_some()
    }

    pub fn has_valuable_menu(&self) -> bool {
        self.menus.iter().any(|m| m.value_score > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anshin_core::SourceType;

    fn sighting(url: &str) -> RawSighting {
        RawSighting::new("ひだまり食堂", SourceCitation::new(SourceType::Blog, url))
    }

    #[test]
    fn absorbing_the_same_sighting_twice_keeps_one_citation() {
        let s = sighting("https://b.example/1").with_menu(MenuClaim::new("米粉パン"));
        let mut shop = MergedShop::from_sighting("fp".into(), s.clone());
        shop.absorb(s);
        assert_eq!(shop.sources.len(), 1);
        assert_eq!(shop.menu_claims.len(), 2);
    }

    #[test]
    fn longer_address_wins_and_coordinates_stick() {
        let mut first = sighting("https://a.example").with_address("福岡市中央区");
        first.location = Some(GeoPoint::new(33.59, 130.40));
        let mut shop = MergedShop::from_sighting("fp".into(), first);

        let mut second = sighting("https://b.example").with_address("福岡市中央区天神1-2-3");
        second.location = Some(GeoPoint::new(0.0, 0.0));
        shop.absorb(second);
        assert_eq!(shop.address.as_deref(), Some("福岡市中央区天神1-2-3"));
        assert_eq!(shop.location, Some(GeoPoint::new(33.59, 130.40)));

        shop.absorb(sighting("https://c.example").with_address("福岡"));
        assert_eq!(shop.address.as_deref(), Some("福岡市中央区天神1-2-3"));
        assert_eq!(shop.sources.len(), 3);
    }

    #[test]
    fn metadata_is_first_non_null_and_features_union() {
        let mut a = sighting("https://a.example");
        a.metadata.phone = Some("092-111-1111".into());
        a.metadata.features.insert("parking".into(), false);
        let mut b = sighting("https://b.example");
        b.metadata.phone = Some("092-222-2222".into());
        b.metadata.website = Some("https://hidamari.example".into());
        b.metadata.features.insert("parking".into(), true);
        b.metadata.tags = vec!["Chain".into()];
        b.metadata.images = vec!["p1.jpg".into()];

        let mut shop = MergedShop::from_sighting("fp".into(), a);
        shop.absorb(b);
        assert_eq!(shop.phone.as_deref(), Some("092-111-1111"));
        assert_eq!(shop.website.as_deref(), Some("https://hidamari.example"));
        assert_eq!(shop.features.get("parking"), Some(&true));
        assert!(shop.tags.contains("Chain"));
        assert!(shop.has_photos);
    }

    #[test]
    fn allergen_free_tag_detection() {
        let tagged = ScoredMenu {
            claim: MenuClaim::new("ライス").with_tag("小麦_free"),
            category: "other".into(),
            value_score: 0,
            removable_on_request: BTreeSet::new(),
        };
        assert!(tagged.has_allergen_free_tag());
    }
}
