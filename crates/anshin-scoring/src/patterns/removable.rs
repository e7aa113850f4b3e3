use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use anshin_core::Allergen;

/// Phrasings that follow an allergen word when the shop offers to leave it out.
const REMOVABLE_TAIL: &str = r"\s*(?:は|を|も|の)?\s*(?:(?:抜き|除去|除き|抜いて|除いて|なし)\s*(?:で|に|の)?\s*(?:も)?\s*(?:対応|可能|可|できます|OK|ok|相談)|(?:is\s+|are\s+)?removable|can\s+be\s+(?:removed|omitted)|[-\s]?free\s+on\s+request)";

static REMOVABLE_PATTERNS: LazyLock<Vec<(Allergen, Regex)>> = LazyLock::new(|| {
    Allergen::MAJOR
        .iter()
        .filter_map(|allergen| {
            let alternation = allergen
                .aliases()
                .iter()
                .map(|a| regex::escape(a))
                .collect::<Vec<_>>()
                .join("|");
            Regex::new(&format!("(?i)(?:{alternation}){REMOVABLE_TAIL}"))
                .ok()
                .map(|re| (*allergen, re))
        })
        .collect()
});

/// Allergens whose "removable on request" phrasing appears in `text`.
pub fn extract_removable_allergens(text: &str) -> BTreeSet<Allergen> {
    if text.trim().is_empty() {
        return BTreeSet::new();
    }
    REMOVABLE_PATTERNS
        .iter()
        .filter(|(_, re)| re.is_match(text))
        .map(|(a, _)| *a)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn japanese_phrasings() {
        let found = extract_removable_allergens("卵抜き対応可。小麦は除去できます");
        assert!(found.contains(&Allergen::Egg));
        assert!(found.contains(&Allergen::Wheat));
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn aliases_count() {
        let found = extract_removable_allergens("チーズ抜きにもできます");
        assert_eq!(found, BTreeSet::from([Allergen::Milk]));
    }

    #[test]
    fn english_phrasings() {
        let found = extract_removable_allergens("Wheat removable on request; shrimp can be removed.");
        assert_eq!(found, BTreeSet::from([Allergen::Wheat, Allergen::Shrimp]));
    }

    #[test]
    fn plain_mentions_do_not_count() {
        assert!(extract_removable_allergens("小麦・卵・乳を使用しています").is_empty());
        assert!(extract_removable_allergens("").is_empty());
    }
}
