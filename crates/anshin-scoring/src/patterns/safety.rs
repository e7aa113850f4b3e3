use std::collections::BTreeMap;

use super::{is_match, text_pattern};

/// Derived safety and family-friendliness flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum SafetyFlag {
    ContaminationMentioned,
    RemovalOnRequest,
    AllergenChart,
    KidsChair,
    Stroller,
    Diaper,
    BabyFood,
    KidsMenu,
}

impl SafetyFlag {
    pub const ALL: [SafetyFlag; 8] = [
        SafetyFlag::ContaminationMentioned,
        SafetyFlag::RemovalOnRequest,
        SafetyFlag::AllergenChart,
        SafetyFlag::KidsChair,
        SafetyFlag::Stroller,
        SafetyFlag::Diaper,
        SafetyFlag::BabyFood,
        SafetyFlag::KidsMenu,
    ];

    /// Key used in the shop's feature map.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ContaminationMentioned => "contamination_mentioned",
            Self::RemovalOnRequest => "removal_on_request",
            Self::AllergenChart => "allergen_chart",
            Self::KidsChair => "kids_chair",
            Self::Stroller => "stroller",
            Self::Diaper => "diaper",
            Self::BabyFood => "baby_food",
            Self::KidsMenu => "kids_menu",
        }
    }

    fn pattern(&self) -> &'static std::sync::LazyLock<Option<regex::Regex>> {
        match self {
            Self::ContaminationMentioned => &RE_CONTAMINATION,
            Self::RemovalOnRequest => &RE_REMOVAL,
            Self::AllergenChart => &RE_ALLERGEN_CHART,
            Self::KidsChair => &RE_KIDS_CHAIR,
            Self::Stroller => &RE_STROLLER,
            Self::Diaper => &RE_DIAPER,
            Self::BabyFood => &RE_BABY_FOOD,
            Self::KidsMenu => &RE_KIDS_MENU,
        }
    }
}

// ── Cross-contact ──────────────────────────────────────────────────────────
text_pattern!(
    RE_CONTAMINATION,
    r"同一の?工場|同一の?ライン|製造ライン|コンタミ|混入の可能性|完全には除去できません|微量.*含|調理器具.*共有|揚げ油.*共有|(?i:cross[- ]?contaminat|shared (?:fryer|kitchen|equipment))"
);

// ── Removal on request ─────────────────────────────────────────────────────
text_pattern!(
    RE_REMOVAL,
    r"除去(?:対応)?(?:可|できます|いたします)|抜き(?:対応|可|できます)|(?:卵|小麦|乳|ナッツ)なしで(?:も)?(?:対応|可|OK)|ご相談ください|リクエスト(?:対応|可)|アレルギー対応(?:可|できます)|(?i:on request|upon request)"
);

// ── Labeling ───────────────────────────────────────────────────────────────
text_pattern!(
    RE_ALLERGEN_CHART,
    r"アレルギー表|アレルゲン表|アレルギー一覧|アレルゲン一覧|アレルギー情報|成分表|(?i:allergen (?:chart|table|list|information))"
);

// ── Family facilities ──────────────────────────────────────────────────────
text_pattern!(
    RE_KIDS_CHAIR,
    r"キッズチェア|子供用椅子|子ども用椅子|お子様椅子|ベビーチェア|(?i:high ?chair|kids? chair)"
);
text_pattern!(RE_STROLLER, r"ベビーカー|(?i:stroller|pram)");
text_pattern!(RE_DIAPER, r"おむつ|オムツ|(?i:diaper|changing table)");
text_pattern!(RE_BABY_FOOD, r"離乳食|ベビーフード|(?i:baby food)");
text_pattern!(
    RE_KIDS_MENU,
    r"キッズメニュー|お子様メニュー|お子様ランチ|(?i:kids'? menu|children'?s menu)"
);

/// Scan concatenated shop text; only detected flags appear, all `true`.
pub fn extract_safety_features(text: &str) -> BTreeMap<String, bool> {
    SafetyFlag::ALL
        .iter()
        .filter(|flag| is_match(flag.pattern(), text))
        .map(|flag| (flag.as_str().to_string(), true))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_contamination_and_removal() {
        let f = extract_safety_features("同じ調理器具を共有しています。卵抜き対応可能です。");
        assert_eq!(f.get("contamination_mentioned"), Some(&true));
        assert_eq!(f.get("removal_on_request"), Some(&true));
        assert!(!f.contains_key("stroller"));
    }

    #[test]
    fn detects_family_facilities() {
        let f = extract_safety_features("ベビーカー入店OK、キッズチェアあり。離乳食持ち込み可");
        assert!(f.contains_key("stroller"));
        assert!(f.contains_key("kids_chair"));
        assert!(f.contains_key("baby_food"));
        assert!(!f.contains_key("diaper"));
    }

    #[test]
    fn english_text() {
        let f = extract_safety_features("Allergen chart available. High chair on request.");
        assert!(f.contains_key("allergen_chart"));
        assert!(f.contains_key("kids_chair"));
        assert!(f.contains_key("removal_on_request"));
    }

    #[test]
    fn empty_text_has_no_flags() {
        assert!(extract_safety_features("").is_empty());
    }
}
