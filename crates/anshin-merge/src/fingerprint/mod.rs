//! Identity key for grouping sightings of one real-world shop.
//!
//! `"{name}_{address}"` where
//! - name: width fold, whitespace strip, hiragana→katakana, lowercase,
//!   corporate-marker strip, chain-brand canonicalization, first 10 chars
//! - address: width fold, whitespace strip, leading country name and
//!   postal code dropped, hyphen strip, first 10 chars, `unknown_addr`
//!   when missing
//!
//! Deliberately fuzzy. Truncation lets "Foo Tenjin" and "Foo Tenjin-ten"
//! collide; it is a best-effort heuristic, not exact matching.

mod brands;
pub mod fold;

use anshin_core::constants::{FINGERPRINT_PREFIX_LEN, UNKNOWN_ADDRESS_KEY};

pub use brands::BrandRegistry;

/// Corporate markers removed wherever they appear (after width folding).
const CORPORATE_MARKERS: &[&str] = &[
    "株式会社", "有限会社", "合同会社", "(株)", "(有)", "(同)", "㈱", "㈲",
];

/// Latin corporate suffixes removed from the end (after lowercasing).
const CORPORATE_SUFFIXES: &[&str] = &[
    "co.,ltd.", "co.,ltd", "co.ltd.", "co.ltd", "ltd.", "ltd", "inc.", "inc", "llc", "corp.", "corp",
];

/// Name normalization without truncation or brand lookup.
pub(crate) fn normalize_name_full(name: &str) -> String {
    let folded = fold::fold_kana(&fold::strip_whitespace(&fold::fold_width(name))).to_lowercase();
    let mut out = folded;
    for marker in CORPORATE_MARKERS {
        out = out.replace(marker, "");
    }
    loop {
        let before = out.len();
        for suffix in CORPORATE_SUFFIXES {
            if out.len() > suffix.len() {
                if let Some(stripped) = out.strip_suffix(suffix) {
                    out = stripped.trim_end_matches([',', '.']).to_string();
                    break;
                }
            }
        }
        if out.len() == before {
            return out;
        }
    }
}

pub fn normalize_address(address: Option<&str>) -> String {
    let Some(address) = address else {
        return UNKNOWN_ADDRESS_KEY.to_string();
    };
    let compact = fold::strip_whitespace(&fold::fold_width(address));
    let folded = fold::strip_hyphens(fold::strip_address_prefix(&compact));
    if folded.is_empty() {
        return UNKNOWN_ADDRESS_KEY.to_string();
    }
    fold::truncate_chars(&folded, FINGERPRINT_PREFIX_LEN)
}

/// Computes fingerprints, optionally canonicalizing chain brands.
#[derive(Debug, Clone, Default)]
pub struct Fingerprinter {
    brands: BrandRegistry,
}

impl Fingerprinter {
    pub fn new(brands: BrandRegistry) -> Self {
        Self { brands }
    }

    pub fn brands(&self) -> &BrandRegistry {
        &self.brands
    }

    pub fn name_key(&self, name: &str) -> String {
        let full = normalize_name_full(name);
        let key = self.brands.canonical_for(&full).unwrap_or(&full);
        fold::truncate_chars(key, FINGERPRINT_PREFIX_LEN)
    }

    pub fn fingerprint(&self, name: &str, address: Option<&str>) -> String {
        format!("{}_{}", self.name_key(name), normalize_address(address))
    }
}

/// Fingerprint without brand canonicalization.
pub fn fingerprint(name: &str, address: Option<&str>) -> String {
    Fingerprinter::default().fingerprint(name, address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_whitespace_and_hyphen_folding() {
        assert_eq!(
            fingerprint("Ｍｏｓ　Ｂｕｒｇｅｒ", Some("福岡市-1-1")),
            fingerprint("Mos Burger", Some("福岡市1-1"))
        );
    }

    #[test]
    fn corporate_markers_are_stripped() {
        assert_eq!(normalize_name_full("株式会社ひだまり"), "ヒダマリ");
        assert_eq!(normalize_name_full("ひだまり（株）"), "ヒダマリ");
        assert_eq!(normalize_name_full("Cafe Luna Co., Ltd."), "cafeluna");
        assert_eq!(normalize_name_full("Prince"), "prince");
    }

    #[test]
    fn missing_address_uses_placeholder() {
        assert_eq!(fingerprint("A", None), "a_unknown_addr");
        assert_eq!(fingerprint("A", Some("  ")), "a_unknown_addr");
    }

    #[test]
    fn map_style_addresses_drop_country_and_postal_code() {
        assert_eq!(
            normalize_address(Some("日本、〒810-0001 福岡県福岡市中央区天神２丁目")),
            "福岡県福岡市中央区天"
        );
        assert_ne!(
            normalize_address(Some("日本、〒810-0001 福岡県福岡市中央区天神２丁目")),
            normalize_address(Some("日本、〒810-0004 福岡県福岡市中央区渡辺通５丁目"))
        );
    }

    #[test]
    fn components_are_truncated() {
        let fp = fingerprint("とても長い名前のレストランです", Some("東京都千代田区丸の内一丁目"));
        let (name, addr) = fp.split_once('_').unwrap();
        assert_eq!(name.chars().count(), 10);
        assert_eq!(addr.chars().count(), 10);
    }

    #[test]
    fn brand_aliases_share_a_key() {
        let mut brands = BrandRegistry::new();
        brands.register("mosburger", ["モスバーガー", "MOS BURGER", "mosバーガー"]);
        let f = Fingerprinter::new(brands);
        let addr = Some("福岡市中央区天神2-11-1");
        assert_eq!(
            f.fingerprint("Mos Burger Tenjin", addr),
            f.fingerprint("ｍｏｓばーがー天神", addr)
        );
        assert_eq!(f.name_key("モスバーガー博多駅店"), "mosburger");
        assert_ne!(f.name_key("もすこ食堂"), "mosburger");
    }
}
