use std::sync::LazyLock;

use anshin_core::errors::AnshinResult;
use anshin_core::models::{
    Allergen, CollectionTarget, MenuClaim, RawSighting, SourceCitation, SourceType,
};
use anshin_core::traits::SourceAdapter;
use anshin_scoring::is_scrape_noise;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use regex::Regex;

use super::truncate;
use crate::transport::html::{captures, first_href, first_text, split_blocks, strip_tags};
use crate::transport::HttpClient;

static BLOCK_START: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"class="list-rst[\s"]"#).ok());
static NAME_ANCHOR: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?s)(<a\b[^>]*list-rst__rst-name-target[^>]*>.*?</a>)").ok());
static PR_TEXT: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"(?s)class="[^"]*list-rst__pr-(?:title|text)[^"]*"[^>]*>(.*?)</"#).ok()
});
static AREA_GENRE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"(?s)class="[^"]*list-rst__area-genre[^"]*"[^>]*>(.*?)</"#).ok()
});
static GLUTEN_FREE: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new("グルテンフリー").ok());

const PR_DESCRIPTION_MAX_CHARS: usize = 100;

/// Review-site list pages searched by area plus an allergy keyword.
pub struct GourmetAdapter {
    http: HttpClient,
    search_url: String,
}

impl GourmetAdapter {
    pub fn new(http: HttpClient, search_url: impl Into<String>) -> Self {
        Self {
            http,
            search_url: search_url.into(),
        }
    }

    /// Every `list-rst` block with a named, linked shop.
    pub fn parse_list(html: &str, now: DateTime<Utc>) -> Vec<RawSighting> {
        split_blocks(&BLOCK_START, html)
            .into_iter()
            .filter_map(|block| Self::parse_block(block, now))
            .collect()
    }

    fn parse_block(block: &str, now: DateTime<Utc>) -> Option<RawSighting> {
        let anchor = NAME_ANCHOR
            .as_ref()?
            .captures(block)?
            .get(1)?
            .as_str();
        let name = strip_tags(anchor);
        let url = first_href(anchor)?;
        if name.is_empty() || is_scrape_noise(&name) {
            return None;
        }

        let pr = captures(&PR_TEXT, block)
            .iter()
            .map(|t| strip_tags(t))
            .collect::<Vec<_>>()
            .join(" ");

        let mut sighting = RawSighting::new(name, SourceCitation::new(SourceType::Review, url));
        sighting.address = first_text(&AREA_GENRE, block);
        if GLUTEN_FREE.as_ref().is_some_and(|re| re.is_match(&pr)) {
            sighting.menus.push(
                MenuClaim::new("グルテンフリーメニュー（要確認）")
                    .with_allergens([Allergen::Wheat])
                    .with_description(truncate(pr.trim(), PR_DESCRIPTION_MAX_CHARS))
                    .collected(now),
            );
        }
        if !pr.trim().is_empty() {
            sighting.metadata.description = Some(pr.trim().to_string());
        }
        Some(sighting)
    }
}

#[async_trait]
impl SourceAdapter for GourmetAdapter {
    fn name(&self) -> &str {
        super::GOURMET
    }

    fn source_type(&self) -> SourceType {
        SourceType::Review
    }

    async fn collect(&self, target: &CollectionTarget) -> AnshinResult<Vec<RawSighting>> {
        let Some(area) = target.area_name() else {
            return Ok(Vec::new());
        };
        let keyword = format!("{area} アレルギー");
        let html = self
            .http
            .get_text(&self.search_url, &[("sk", keyword.as_str())])
            .await?;
        let sightings = Self::parse_list(&html, Utc::now());
        tracing::debug!(adapter = self.name(), count = sightings.len(), "parsed list page");
        Ok(sightings)
    }
}
