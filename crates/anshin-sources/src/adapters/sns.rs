use std::sync::{Arc, LazyLock};

use anshin_core::errors::AnshinResult;
use anshin_core::models::{Allergen, CollectionTarget, RawSighting, SourceCitation, SourceType};
use anshin_core::traits::SourceAdapter;
use async_trait::async_trait;
use chrono::Utc;
use regex::Regex;

use super::{keyword_menus, KeywordMenu};
use crate::search::{CustomSearchClient, SearchItem};

static GLUTEN_FREE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new("米粉|グルテンフリー").ok());
static EGG_FREE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new("卵不使用").ok());
static TITLE_SPLIT: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new("[:|•]").ok());

static RULES: [KeywordMenu; 2] = [
    KeywordMenu {
        pattern: &GLUTEN_FREE,
        name: "グルテンフリーメニュー",
        allergens: &[Allergen::Wheat],
    },
    KeywordMenu {
        pattern: &EGG_FREE,
        name: "卵不使用メニュー",
        allergens: &[Allergen::Egg],
    },
];

/// Social posts found through site-restricted web search.
pub struct SnsAdapter {
    search: Arc<CustomSearchClient>,
}

impl SnsAdapter {
    pub fn new(search: Arc<CustomSearchClient>) -> Self {
        Self { search }
    }

    fn queries(area: &str) -> [String; 3] {
        [
            format!("site:instagram.com {area} グルテンフリー ランチ"),
            format!("site:instagram.com {area} 卵不使用 ケーキ"),
            format!("site:instagram.com {area} アレルギー対応"),
        ]
    }

    fn to_sighting(item: &SearchItem) -> Option<RawSighting> {
        let title = item.title.replace("Instagram", "").replace("Twitter", "");
        let name = match TITLE_SPLIT.as_ref() {
            Some(re) => re.split(&title).next().unwrap_or_default().trim().to_string(),
            None => title.trim().to_string(),
        };
        if name.is_empty() {
            return None;
        }

        let now = Utc::now();
        let mut sighting = RawSighting::new(name, SourceCitation::new(SourceType::Sns, &item.link));
        sighting.menus = keyword_menus(&RULES, &item.snippet, None, now);
        sighting.metadata.has_photos = true;
        if !item.snippet.is_empty() {
            sighting.metadata.description = Some(item.snippet.clone());
        }
        Some(sighting)
    }
}

#[async_trait]
impl SourceAdapter for SnsAdapter {
    fn name(&self) -> &str {
        super::SNS
    }

    fn source_type(&self) -> SourceType {
        SourceType::Sns
    }

    async fn collect(&self, target: &CollectionTarget) -> AnshinResult<Vec<RawSighting>> {
        let Some(area) = target.area_name() else {
            return Ok(Vec::new());
        };
        if !self.search.is_configured() {
            tracing::warn!(adapter = self.name(), "custom search credentials missing, skipping");
            return Ok(Vec::new());
        }

        let mut sightings = Vec::new();
        for query in Self::queries(area) {
            match self.search.search(&query).await {
                Ok(items) => sightings.extend(items.iter().filter_map(Self::to_sighting)),
                Err(e) => tracing::warn!(adapter = self.name(), %query, error = %e, "query failed"),
            }
        }
        Ok(sightings)
    }
}
