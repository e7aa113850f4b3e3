//! Tolerant regex-based HTML helpers.
//!
//! Scraped pages are malformed often enough that a strict parser buys
//! little; these helpers pull text out of roughly delimited blocks.

use std::sync::LazyLock;

use regex::Regex;

static TAG: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").ok());
static SCRIPT: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"(?is)<(script|style)\b.*?</(script|style)>").ok());
static HREF: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r#"(?i)\bhref\s*=\s*["']([^"']+)["']"#).ok());
static SPACES: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"\s+").ok());

/// Text content with tags removed, common entities decoded and whitespace collapsed.
pub fn strip_tags(fragment: &str) -> String {
    let mut text = fragment.to_string();
    if let Some(re) = SCRIPT.as_ref() {
        text = re.replace_all(&text, " ").into_owned();
    }
    if let Some(re) = TAG.as_ref() {
        text = re.replace_all(&text, " ").into_owned();
    }
    let text = decode_entities(&text);
    match SPACES.as_ref() {
        Some(re) => re.replace_all(&text, " ").trim().to_string(),
        None => text.trim().to_string(),
    }
}

fn decode_entities(text: &str) -> String {
    text.replace("&nbsp;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&")
}

/// The first `href` attribute inside a fragment.
pub fn first_href(fragment: &str) -> Option<String> {
    HREF.as_ref()?
        .captures(fragment)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
}

/// Inner HTML of every match of `pattern`'s first capture group.
pub fn captures(pattern: &Option<Regex>, html: &str) -> Vec<String> {
    let Some(re) = pattern.as_ref() else {
        return Vec::new();
    };
    re.captures_iter(html)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Inner text of the first match of `pattern`, if any and non-blank.
pub fn first_text(pattern: &Option<Regex>, html: &str) -> Option<String> {
    let re = pattern.as_ref()?;
    re.captures_iter(html)
        .filter_map(|c| c.get(1))
        .map(|m| strip_tags(m.as_str()))
        .find(|t| !t.is_empty())
}

/// Split `html` into blocks, each starting at a match of `marker`.
pub fn split_blocks<'a>(marker: &Option<Regex>, html: &'a str) -> Vec<&'a str> {
    let Some(re) = marker.as_ref() else {
        return Vec::new();
    };
    let starts: Vec<usize> = re.find_iter(html).map(|m| m.start()).collect();
    starts
        .iter()
        .enumerate()
        .map(|(i, &start)| {
            let end = starts.get(i + 1).copied().unwrap_or(html.len());
            &html[start..end]
        })
        .collect()
}

/// Resolve a possibly relative link against the page it was found on.
pub fn resolve_link(base: &str, href: &str) -> String {
    if href.starts_with("http://") || href.starts_with("https://") {
        return href.to_string();
    }
    url::Url::parse(base)
        .and_then(|b| b.join(href))
        .map(|u| u.to_string())
        .unwrap_or_else(|_| base.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_tags_and_entities() {
        let html = "<p>米粉&amp;豆乳 <b>パン</b></p>\n<script>var x = 1;</script>";
        assert_eq!(strip_tags(html), "米粉&豆乳 パン");
    }

    #[test]
    fn resolves_relative_links() {
        assert_eq!(
            resolve_link("https://city.example.lg.jp/allergy/list.html", "shop/1.html"),
            "https://city.example.lg.jp/allergy/shop/1.html"
        );
        assert_eq!(
            resolve_link("https://a.example/x", "https://b.example/y"),
            "https://b.example/y"
        );
    }

    #[test]
    fn splits_on_markers() {
        let marker = Regex::new(r"<li").ok();
        let blocks = split_blocks(&marker, "head<li>a</li><li>b</li>");
        assert_eq!(blocks, vec!["<li>a</li>", "<li>b</li>"]);
    }

    #[test]
    fn first_href_reads_single_and_double_quotes() {
        assert_eq!(first_href(r#"<a href="/x">"#).as_deref(), Some("/x"));
        assert_eq!(first_href("<a href='/y'>").as_deref(), Some("/y"));
        assert_eq!(first_href("<a>"), None);
    }
}
