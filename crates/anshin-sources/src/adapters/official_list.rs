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

use crate::transport::html::{captures, first_href, first_text, resolve_link, strip_tags};
use crate::transport::HttpClient;

static LIST_ITEM: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?is)<li\b[^>]*>(.*?)</li>").ok());
static ARTICLE: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?is)<article\b[^>]*>(.*?)</article>").ok());
static SHOP_BOX: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"(?is)<div\b[^>]*class="[^"]*(?:shop_box|restaurant-item)[^"]*"[^>]*>(.*?)</div>"#)
        .ok()
});
static HEADING: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?is)<h[234]\b[^>]*>(.*?)</h[234]>").ok());
static NAME_CLASS: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(r#"(?is)class="[^"]*\b(?:name|shop-name)\b[^"]*"[^>]*>(.*?)</"#).ok()
});
static RELEVANT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new("アレルギー|小麦|卵|乳|グルテンフリー").ok());
static MENU_PHRASE: LazyLock<Option<Regex>> = LazyLock::new(|| {
    Regex::new(
        "(米粉|グルテンフリー|卵不使用|乳不使用)(の|使用した)?(パン|パスタ|ケーキ|クッキー|ラーメン|カレー|ランチ)",
    )
    .ok()
});

/// Municipality and prefecture pages listing allergy-friendly shops.
pub struct OfficialListAdapter {
    http: HttpClient,
    urls: Vec<String>,
}

impl OfficialListAdapter {
    pub fn new(http: HttpClient, urls: Vec<String>) -> Self {
        Self { http, urls }
    }

    /// Menu claims for every "free-from keyword + dish" phrase in `text`.
    pub fn extract_menus(text: &str, now: DateTime<Utc>) -> Vec<MenuClaim> {
        let Some(re) = MENU_PHRASE.as_ref() else {
            return Vec::new();
        };
        let mut menus: Vec<MenuClaim> = Vec::new();
        for caps in re.captures_iter(text) {
            let (Some(whole), Some(keyword)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let name = whole.as_str();
            if is_scrape_noise(name) || menus.iter().any(|m| m.name == name) {
                continue;
            }
            menus.push(
                MenuClaim::new(name)
                    .with_allergens(keyword_allergens(keyword.as_str()))
                    .collected(now),
            );
        }
        menus
    }

    /// Relevant blocks of one page that yield a shop name and at least one menu.
    pub fn parse_page(html: &str, page_url: &str, now: DateTime<Utc>) -> Vec<RawSighting> {
        let mut blocks = captures(&LIST_ITEM, html);
        blocks.extend(captures(&ARTICLE, html));
        blocks.extend(captures(&SHOP_BOX, html));

        let mut sightings: Vec<RawSighting> = Vec::new();
        for block in blocks {
            let text = strip_tags(&block);
            if !RELEVANT.as_ref().is_some_and(|re| re.is_match(&text)) {
                continue;
            }
            let Some(name) = first_text(&HEADING, &block).or_else(|| first_text(&NAME_CLASS, &block))
            else {
                continue;
            };
            if is_scrape_noise(&name) {
                continue;
            }
            let menus = Self::extract_menus(&text, now);
            if menus.is_empty() {
                continue;
            }
            let link = first_href(&block)
                .map(|href| resolve_link(page_url, &href))
                .unwrap_or_else(|| page_url.to_string());

            let mut sighting =
                RawSighting::new(name, SourceCitation::new(SourceType::Municipality, link));
            sighting.menus = menus;
            sighting.metadata.description = Some(text);
            sightings.push(sighting);
        }
        sightings
    }
}

fn keyword_allergens(keyword: &str) -> Vec<Allergen> {
    match keyword {
        "米粉" | "グルテンフリー" => vec![Allergen::Wheat],
        "卵不使用" => vec![Allergen::Egg],
        "乳不使用" => vec![Allergen::Milk],
        _ => Vec::new(),
    }
}

#[async_trait]
impl SourceAdapter for OfficialListAdapter {
    fn name(&self) -> &str {
        super::OFFICIAL_LIST
    }

    fn source_type(&self) -> SourceType {
        SourceType::Municipality
    }

    async fn collect(&self, target: &CollectionTarget) -> AnshinResult<Vec<RawSighting>> {
        if target.area_name().is_none() {
            return Ok(Vec::new());
        }
        if self.urls.is_empty() {
            tracing::debug!(adapter = self.name(), "no official list pages configured");
            return Ok(Vec::new());
        }

        let now = Utc::now();
        let mut sightings = Vec::new();
        for url in &self.urls {
            match self.http.get_text(url, &[]).await {
                Ok(html) => sightings.extend(Self::parse_page(&html, url, now)),
                Err(e) => tracing::warn!(adapter = self.name(), %url, error = %e, "page fetch failed"),
            }
        }
        Ok(sightings)
    }
}
