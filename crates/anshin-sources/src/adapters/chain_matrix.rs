//! Chain-brand matrix: search a places index for each brand's branches,
//! then overlay the brand's curated menu master onto every hit.
//!
//! When the index is unavailable, or returns nothing at all for a named
//! area, the adapter emits one master-data-only sighting per brand with no
//! coordinates so brand coverage is never lost.

use std::sync::Arc;

use anshin_core::constants::FALLBACK_DATA_TAG;
use anshin_core::errors::AnshinResult;
use anshin_core::models::{CollectionTarget, RawSighting, SourceCitation, SourceType};
use anshin_core::traits::{PlaceHit, PlaceQuery, PlaceSearch, SourceAdapter};
use anshin_observability::events;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use futures::future::join_all;

use crate::chains::{ChainBrand, ChainMaster};

/// Reliability floor for a branch confirmed by the places index.
pub const MATCHED_RELIABILITY_FLOOR: u8 = 90;
/// Reliability floor for a master-data-only sighting.
pub const FALLBACK_RELIABILITY_FLOOR: u8 = 85;

const CHAIN_TAG: &str = "Chain";
const RESTAURANT_TAG: &str = "Restaurant";

pub struct ChainMatrixAdapter {
    places: Arc<dyn PlaceSearch>,
    master: Arc<ChainMaster>,
    max_results: u32,
}

impl ChainMatrixAdapter {
    pub fn new(places: Arc<dyn PlaceSearch>, master: Arc<ChainMaster>, max_results: u32) -> Self {
        Self {
            places,
            master,
            max_results,
        }
    }

    fn query_for(&self, brand: &ChainBrand, target: &CollectionTarget) -> PlaceQuery {
        match target {
            CollectionTarget::Area { name, .. } => {
                PlaceQuery::text(format!("{} {}", brand.search_query, name), self.max_results)
            }
            CollectionTarget::Spatial { center, radius_m } => {
                PlaceQuery::text(brand.search_query.clone(), self.max_results).near(*center, *radius_m)
            }
        }
    }

    async fn search_brand(&self, brand: &ChainBrand, target: &CollectionTarget) -> Vec<PlaceHit> {
        let query = self.query_for(brand, target);
        match self.places.search(&query).await {
            Ok(hits) => hits,
            Err(e) => {
                tracing::warn!(brand = %brand.brand_name, error = %e, "chain search failed");
                Vec::new()
            }
        }
    }

    /// Base sighting shared by matched and fallback output.
    fn brand_sighting(brand: &ChainBrand, shop_name: String, now: DateTime<Utc>) -> RawSighting {
        let mut sighting = RawSighting::new(
            shop_name,
            SourceCitation::new(SourceType::OfficialMatrix, &brand.official_url),
        );
        sighting.menus = brand.menus.iter().map(|m| m.to_claim(now)).collect();
        let meta = &mut sighting.metadata;
        meta.website = Some(brand.official_url.clone());
        meta.tags = vec![
            brand.brand_name.clone(),
            CHAIN_TAG.to_string(),
            RESTAURANT_TAG.to_string(),
        ];
        meta.features.insert("kids_menu".to_string(), true);
        meta.features.insert("kids_chair".to_string(), true);
        sighting
    }

    /// A found branch hydrated with the brand's master menus.
    pub fn hydrate(hit: PlaceHit, brand: &ChainBrand, now: DateTime<Utc>) -> RawSighting {
        let mut sighting = Self::brand_sighting(brand, hit.name, now);
        sighting.address = hit.address;
        sighting.location = hit.location;
        sighting.place_id = hit.place_id;
        let meta = &mut sighting.metadata;
        meta.phone = hit.phone;
        meta.opening_hours = hit.opening_hours;
        if let Some(site) = hit.website {
            meta.website = Some(site);
        }
        meta.has_photos = !hit.photos.is_empty();
        meta.reliability_floor = Some(MATCHED_RELIABILITY_FLOOR);
        sighting
    }

    /// One master-data-only sighting per brand for a named area.
    pub fn fallback(master: &ChainMaster, area: &str, now: DateTime<Utc>) -> Vec<RawSighting> {
        master
            .brands()
            .iter()
            .map(|brand| {
                let mut sighting =
                    Self::brand_sighting(brand, format!("{} ({area})", brand.brand_name), now);
                sighting.address = Some(format!("{area}（具体的な住所は要確認）"));
                sighting.metadata.tags.push(FALLBACK_DATA_TAG.to_string());
                sighting.metadata.reliability_floor = Some(FALLBACK_RELIABILITY_FLOOR);
                sighting
            })
            .collect()
    }

    fn fallback_for(
        &self,
        target: &CollectionTarget,
        reason: &str,
        now: DateTime<Utc>,
    ) -> Vec<RawSighting> {
        match target.area_name() {
            Some(area) => {
                let sightings = Self::fallback(&self.master, area, now);
                events::fallback_used(self.name(), reason, sightings.len());
                sightings
            }
            // A coordinate has no name to build a fallback shop from.
            None => Vec::new(),
        }
    }
}

#[async_trait]
impl SourceAdapter for ChainMatrixAdapter {
    fn name(&self) -> &str {
        super::CHAIN_MATRIX
    }

    fn source_type(&self) -> SourceType {
        SourceType::OfficialMatrix
    }

    async fn collect(&self, target: &CollectionTarget) -> AnshinResult<Vec<RawSighting>> {
        let now = Utc::now();
        if !self.places.is_available() {
            return Ok(self.fallback_for(target, "places index unavailable", now));
        }

        let per_brand = join_all(
            self.master
                .brands()
                .iter()
                .map(|brand| async move { (brand, self.search_brand(brand, target).await) }),
        )
        .await;

        let sightings: Vec<RawSighting> = per_brand
            .into_iter()
            .flat_map(|(brand, hits)| {
                hits.into_iter()
                    .filter(|h| !h.name.trim().is_empty())
                    .map(move |h| Self::hydrate(h, brand, now))
            })
            .collect();

        if sightings.is_empty() {
            return Ok(self.fallback_for(target, "no branches found", now));
        }
        tracing::debug!(adapter = self.name(), matched = sightings.len(), "chain branches matched");
        Ok(sightings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::places::StubPlaceSearch;
    use anshin_core::geo::GeoPoint;

    fn master() -> Arc<ChainMaster> {
        Arc::new(ChainMaster::builtin().unwrap())
    }

    #[tokio::test]
    async fn unavailable_index_falls_back_per_brand() {
        let master = master();
        let adapter =
            ChainMatrixAdapter::new(Arc::new(StubPlaceSearch::unavailable()), master.clone(), 20);
        let out = adapter.collect(&CollectionTarget::area("福岡市")).await.unwrap();

        assert_eq!(out.len(), master.len());
        let mos = out.iter().find(|s| s.shop_name == "モスバーガー (福岡市)").unwrap();
        assert!(mos.location.is_none());
        assert_eq!(mos.address.as_deref(), Some("福岡市（具体的な住所は要確認）"));
        assert_eq!(mos.metadata.reliability_floor, Some(FALLBACK_RELIABILITY_FLOOR));
        assert!(mos.metadata.tags.iter().any(|t| t == FALLBACK_DATA_TAG));
        assert!(!mos.menus.is_empty());
    }

    #[tokio::test]
    async fn matched_branches_are_hydrated() {
        let stub = StubPlaceSearch::new().with_hits(
            "モスバーガー",
            vec![PlaceHit {
                place_id: Some("mos-tenjin".into()),
                name: "モスバーガー天神店".into(),
                address: Some("福岡市中央区天神2-1-1".into()),
                location: Some(GeoPoint::new(33.59, 130.40)),
                photos: vec!["p".into()],
                ..PlaceHit::default()
            }],
        );
        let adapter = ChainMatrixAdapter::new(Arc::new(stub), master(), 20);
        let out = adapter.collect(&CollectionTarget::area("福岡市")).await.unwrap();

        assert_eq!(out.len(), 1);
        let s = &out[0];
        assert_eq!(s.place_id.as_deref(), Some("mos-tenjin"));
        assert_eq!(s.source.source_type, SourceType::OfficialMatrix);
        assert_eq!(s.metadata.reliability_floor, Some(MATCHED_RELIABILITY_FLOOR));
        assert_eq!(s.metadata.features.get("kids_chair"), Some(&true));
        assert!(s.has_photos());
    }

    #[tokio::test]
    async fn spatial_target_without_hits_is_empty() {
        let adapter = ChainMatrixAdapter::new(Arc::new(StubPlaceSearch::new()), master(), 20);
        let target = CollectionTarget::spatial(GeoPoint::new(33.54, 130.33), 5_000);
        assert!(adapter.collect(&target).await.unwrap().is_empty());
    }
}
