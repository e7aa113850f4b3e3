use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use anshin_core::errors::AnshinResult;
use anshin_core::models::{
    Allergen, CollectionTarget, MenuClaim, RawSighting, SourceCitation, SourceType,
};
use anshin_core::traits::{PlaceHit, PlaceQuery, PlaceSearch, SourceAdapter};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;

use super::{keyword_menus, truncate, KeywordMenu};

const PHOTO_MEDIA_BASE: &str = "https://places.googleapis.com/v1";
const PHOTO_MAX_WIDTH_PX: u32 = 1000;
const EXCERPT_MAX_CHARS: usize = 60;
const HIGHLIGHT_MIN_CHARS: usize = 10;
const HIGHLIGHT_MENU_NAME: &str = "店舗の特徴（自動抽出）";
const GENERIC_TAG: &str = "generic";

macro_rules! summary_pattern {
    ($name:ident, $re:expr) => {
        static $name: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new($re).ok());
    };
}

summary_pattern!(GF_PASTA, "(?i)グルテンフリー.*?パスタ");
summary_pattern!(KOMEKO_PANCAKE, "(?i)米粉.*?パンケーキ");
summary_pattern!(EGG_FREE_CAKE, "(?i)卵不使用.*?ケーキ");
summary_pattern!(DAIRY_FREE_ICE, "(?i)乳製品不使用.*?アイス");
summary_pattern!(VEGAN_BURGER, "(?i)ヴィーガン.*?バーガー");
summary_pattern!(JUWARI_SOBA, "十割そば");
summary_pattern!(NUT_FREE_CAKE, "ナッツ不使用.*?ケーキ|ケーキ.*?ナッツ不使用");
summary_pattern!(NUT_FREE_BREAD, "ナッツ不使用.*?パン|パン.*?ナッツ不使用");
summary_pattern!(NUT_FREE_CURRY, "ナッツ不使用.*?カレー|カレー.*?ナッツ不使用");
summary_pattern!(NUT_FREE_ANY, "ナッツ不使用|ピーナッツ不使用|くるみ不使用|アーモンド不使用");
summary_pattern!(GLUTEN_FREE, "(?i)グルテンフリー|gluten free");
summary_pattern!(VEGAN, "(?i)ヴィーガン|vegan");
summary_pattern!(ALLERGY_FRIENDLY, "(?i)アレルギー対応|allergy friendly");
summary_pattern!(NUT_FREE, "(?i)ナッツ不使用|nut free|peanuts free");

/// Dish-level mentions, preferred when present.
static SPECIFIC: [KeywordMenu; 10] = [
    KeywordMenu { pattern: &GF_PASTA, name: "グルテンフリーパスタ", allergens: &[Allergen::Wheat] },
    KeywordMenu { pattern: &KOMEKO_PANCAKE, name: "米粉パンケーキ", allergens: &[Allergen::Wheat] },
    KeywordMenu { pattern: &EGG_FREE_CAKE, name: "卵不使用ケーキ", allergens: &[Allergen::Egg] },
    KeywordMenu { pattern: &DAIRY_FREE_ICE, name: "乳製品不使用アイス", allergens: &[Allergen::Milk] },
    KeywordMenu {
        pattern: &VEGAN_BURGER,
        name: "ヴィーガンバーガー",
        allergens: &[Allergen::Egg, Allergen::Milk],
    },
    KeywordMenu { pattern: &JUWARI_SOBA, name: "十割そば", allergens: &[Allergen::Wheat] },
    KeywordMenu { pattern: &NUT_FREE_CAKE, name: "ナッツ不使用ケーキ", allergens: &[Allergen::TreeNut] },
    KeywordMenu { pattern: &NUT_FREE_BREAD, name: "ナッツ不使用パン", allergens: &[Allergen::TreeNut] },
    KeywordMenu { pattern: &NUT_FREE_CURRY, name: "ナッツ不使用カレー", allergens: &[Allergen::TreeNut] },
    KeywordMenu { pattern: &NUT_FREE_ANY, name: "ナッツ不使用対応", allergens: &[Allergen::TreeNut] },
];

/// Shop-level capabilities, used only when no dish was named.
static GENERIC: [KeywordMenu; 4] = [
    KeywordMenu { pattern: &GLUTEN_FREE, name: "グルテンフリー対応メニュー", allergens: &[Allergen::Wheat] },
    KeywordMenu {
        pattern: &VEGAN,
        name: "ヴィーガン対応メニュー",
        allergens: &[Allergen::Egg, Allergen::Milk],
    },
    KeywordMenu { pattern: &ALLERGY_FRIENDLY, name: "アレルギー対応（要相談）", allergens: &[] },
    KeywordMenu { pattern: &NUT_FREE, name: "ナッツ不使用対応", allergens: &[Allergen::TreeNut] },
];

/// Map listings found by allergy-related text searches.
pub struct GoogleMapsAdapter {
    places: Arc<dyn PlaceSearch>,
    max_results: u32,
}

impl GoogleMapsAdapter {
    pub fn new(places: Arc<dyn PlaceSearch>, max_results: u32) -> Self {
        Self { places, max_results }
    }

    fn queries(&self, target: &CollectionTarget) -> Vec<PlaceQuery> {
        match target {
            CollectionTarget::Area { name, .. } => [
                format!("Allergy friendly restaurants in {name}"),
                format!("Gluten free restaurants in {name}"),
                format!("アレルギー対応 カフェ {name}"),
                format!("グルテンフリー {name}"),
                format!("卵不使用 ケーキ屋 {name}"),
                format!("乳製品不使用 スイーツ {name}"),
                format!("アレルギー対応 テイクアウト {name}"),
                format!("米粉スイーツ 専門店 {name}"),
                format!("ナッツ不使用 {name}"),
                format!("ピーナッツ不使用 {name}"),
                format!("くるみ不使用 {name}"),
                format!("カシューナッツ不使用 {name}"),
            ]
            .into_iter()
            .map(|q| PlaceQuery::text(q, self.max_results))
            .collect(),
            CollectionTarget::Spatial { center, radius_m } => [
                "Allergy friendly restaurants",
                "Gluten free",
                "アレルギー対応",
                "グルテンフリー",
                "米粉",
                "ナッツ不使用",
                "ピーナッツ不使用",
            ]
            .into_iter()
            .map(|q| PlaceQuery::text(q, self.max_results).near(*center, *radius_m))
            .collect(),
        }
    }

    /// Menu claims read from the listing name and editorial summary.
    pub fn extract_menus(name: &str, summary: Option<&str>, now: DateTime<Utc>) -> Vec<MenuClaim> {
        let text = match summary {
            Some(s) => format!("{name}\n{s}"),
            None => name.to_string(),
        };
        let excerpt = truncate(&text, EXCERPT_MAX_CHARS);

        let specific = keyword_menus(&SPECIFIC, &text, Some(&excerpt), now);
        if !specific.is_empty() {
            return specific;
        }
        let generic = keyword_menus(&GENERIC, &text, Some(&excerpt), now);
        if !generic.is_empty() {
            return generic;
        }
        if text.chars().count() > HIGHLIGHT_MIN_CHARS {
            return vec![MenuClaim::new(HIGHLIGHT_MENU_NAME)
                .with_description(truncate(&text, 100))
                .with_tag(GENERIC_TAG)
                .collected(now)];
        }
        Vec::new()
    }

    pub fn to_sighting(hit: PlaceHit, now: DateTime<Utc>) -> RawSighting {
        let encoded: String = url::form_urlencoded::byte_serialize(hit.name.as_bytes()).collect();
        let mut link = format!("https://www.google.com/maps/search/?api=1&query={encoded}");
        if let Some(id) = &hit.place_id {
            link.push_str("&query_place_id=");
            link.push_str(id);
        }

        let menus = Self::extract_menus(&hit.name, hit.summary.as_deref(), now);
        let mut sighting = RawSighting::new(hit.name, SourceCitation::new(SourceType::GoogleMaps, link));
        sighting.address = hit.address;
        sighting.location = hit.location;
        sighting.place_id = hit.place_id;
        sighting.menus = menus;

        let meta = &mut sighting.metadata;
        meta.images = hit
            .photos
            .iter()
            .map(|p| format!("{PHOTO_MEDIA_BASE}/{p}/media?maxWidthPx={PHOTO_MAX_WIDTH_PX}"))
            .collect();
        meta.has_photos = !meta.images.is_empty();
        meta.phone = hit.phone;
        meta.website = hit.website;
        meta.opening_hours = hit.opening_hours;
        meta.description = hit.summary;
        if hit.parking == Some(true) {
            meta.features.insert("parking".to_string(), true);
        }
        if hit.wheelchair_accessible == Some(true) {
            meta.features.insert("wheelchair_accessible".to_string(), true);
        }
        sighting
    }
}

#[async_trait]
impl SourceAdapter for GoogleMapsAdapter {
    fn name(&self) -> &str {
        super::GOOGLE_MAPS
    }

    fn source_type(&self) -> SourceType {
        SourceType::GoogleMaps
    }

    async fn collect(&self, target: &CollectionTarget) -> AnshinResult<Vec<RawSighting>> {
        if !self.places.is_available() {
            tracing::warn!(adapter = self.name(), "places index unavailable, skipping");
            return Ok(Vec::new());
        }

        // Sequential on purpose: these all hit the same rate-limited API.
        let mut hits: Vec<PlaceHit> = Vec::new();
        let mut by_name: HashMap<String, usize> = HashMap::new();
        for query in self.queries(target) {
            let found = match self.places.search(&query).await {
                Ok(found) => found,
                Err(e) => {
                    tracing::warn!(adapter = self.name(), query = %query.text, error = %e, "query failed");
                    continue;
                }
            };
            for hit in found {
                match by_name.get(&hit.name) {
                    Some(&i) => hits[i] = hit,
                    None => {
                        by_name.insert(hit.name.clone(), hits.len());
                        hits.push(hit);
                    }
                }
            }
        }

        let now = Utc::now();
        Ok(hits
            .into_iter()
            .filter(|h| !h.name.trim().is_empty())
            .map(|h| Self::to_sighting(h, now))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn specific_mentions_win_over_generic() {
        let menus = GoogleMapsAdapter::extract_menus(
            "こめこカフェ",
            Some("グルテンフリーのパスタと米粉のパンケーキが人気"),
            Utc::now(),
        );
        let names: Vec<&str> = menus.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["グルテンフリーパスタ", "米粉パンケーキ"]);
    }

    #[test]
    fn generic_capability_when_no_dish() {
        let menus = GoogleMapsAdapter::extract_menus("Vegan Kitchen", None, Utc::now());
        assert_eq!(menus.len(), 1);
        assert_eq!(menus[0].name, "ヴィーガン対応メニュー");
        assert!(menus[0].allergens_removed.contains(&Allergen::Milk));
    }

    #[test]
    fn highlight_for_plain_descriptions() {
        let menus = GoogleMapsAdapter::extract_menus(
            "定食屋",
            Some("地元の野菜を使った家庭的な定食が楽しめるお店"),
            Utc::now(),
        );
        assert_eq!(menus.len(), 1);
        assert_eq!(menus[0].name, HIGHLIGHT_MENU_NAME);
        assert!(menus[0].allergens_removed.is_empty());
        assert!(GoogleMapsAdapter::extract_menus("定食屋", None, Utc::now()).is_empty());
    }

    #[test]
    fn sighting_carries_photos_and_flags() {
        let hit = PlaceHit {
            place_id: Some("abc".into()),
            name: "米粉カフェ".into(),
            photos: vec!["places/abc/photos/p1".into()],
            parking: Some(true),
            wheelchair_accessible: Some(false),
            ..PlaceHit::default()
        };
        let s = GoogleMapsAdapter::to_sighting(hit, Utc::now());
        assert!(s.has_photos());
        assert_eq!(
            s.metadata.images[0],
            "https://places.googleapis.com/v1/places/abc/photos/p1/media?maxWidthPx=1000"
        );
        assert_eq!(s.metadata.features.get("parking"), Some(&true));
        assert!(!s.metadata.features.contains_key("wheelchair_accessible"));
        assert!(s.source.url.unwrap().ends_with("&query_place_id=abc"));
    }
}
