use std::sync::{Arc, LazyLock};

use anshin_core::errors::AnshinResult;
use anshin_core::models::{Allergen, CollectionTarget, RawSighting, SourceCitation, SourceType};
use anshin_core::traits::SourceAdapter;
use async_trait::async_trait;
use chrono::Utc;
use regex::Regex;

use super::{keyword_menus, truncate, KeywordMenu};
use crate::search::{CustomSearchClient, SearchItem};

static EGG_FREE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new("卵なし|卵不使用").ok());
static WHEAT_FREE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new("小麦なし|グルテンフリー").ok());
static BRACKETED_NAME: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new("【(.*?)】").ok());

static RULES: [KeywordMenu; 2] = [
    KeywordMenu {
        pattern: &EGG_FREE,
        name: "卵不使用メニュー",
        allergens: &[Allergen::Egg],
    },
    KeywordMenu {
        pattern: &WHEAT_FREE,
        name: "グルテンフリーメニュー",
        allergens: &[Allergen::Wheat],
    },
];

const TITLE_NAME_MAX_CHARS: usize = 20;

/// Parent blogs about eating out with allergies.
pub struct BlogAdapter {
    search: Arc<CustomSearchClient>,
}

impl BlogAdapter {
    pub fn new(search: Arc<CustomSearchClient>) -> Self {
        Self { search }
    }

    fn queries(area: &str) -> [String; 4] {
        [
            format!("site:ameblo.jp {area} アレルギーっ子 外食"),
            format!("site:ameblo.jp {area} 卵アレルギー ランチ"),
            format!("site:note.com {area} グルテンフリー カフェ"),
            format!("site:hatenablog.com {area} アレルギー対応 レストラン"),
        ]
    }

    /// Blog titles usually name the shop as `【店名】...`; otherwise the
    /// head of the title before `|` is used.
    fn shop_name(title: &str) -> String {
        let bracketed = BRACKETED_NAME
            .as_ref()
            .and_then(|re| re.captures(title))
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|n| !n.is_empty());
        bracketed.unwrap_or_else(|| {
            let head = title.split('|').next().unwrap_or_default().trim();
            truncate(head, TITLE_NAME_MAX_CHARS)
        })
    }

    fn to_sighting(item: &SearchItem) -> Option<RawSighting> {
        let name = Self::shop_name(&item.title);
        if name.is_empty() {
            return None;
        }
        let mut sighting = RawSighting::new(name, SourceCitation::new(SourceType::Blog, &item.link));
        sighting.menus = keyword_menus(&RULES, &item.snippet, None, Utc::now());
        if !item.snippet.is_empty() {
            sighting.metadata.description = Some(item.snippet.clone());
        }
        Some(sighting)
    }
}

#[async_trait]
impl SourceAdapter for BlogAdapter {
    fn name(&self) -> &str {
        super::BLOG
    }

    fn source_type(&self) -> SourceType {
        SourceType::Blog
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
