use std::fmt;

use serde::{Deserialize, Serialize};

/// Allergen categories tracked by the pipeline.
///
/// The eight majors are the mandatory-labeling allergens; `TreeNut` exists
/// for dish profiles that speak about nuts in general. Serialized with the
/// Japanese label so stored candidates read the same as source material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Allergen {
    #[serde(rename = "小麦", alias = "wheat")]
    Wheat,
    #[serde(rename = "卵", alias = "egg")]
    Egg,
    #[serde(rename = "乳", alias = "milk")]
    Milk,
    #[serde(rename = "そば", alias = "buckwheat")]
    Buckwheat,
    #[serde(rename = "落花生", alias = "peanut")]
    Peanut,
    #[serde(rename = "えび", alias = "shrimp")]
    Shrimp,
    #[serde(rename = "かに", alias = "crab")]
    Crab,
    #[serde(rename = "くるみ", alias = "walnut")]
    Walnut,
    #[serde(rename = "ナッツ", alias = "tree_nut")]
    TreeNut,
}

impl Allergen {
    /// The eight mandatory-labeling allergens.
    pub const MAJOR: [Allergen; 8] = [
        Allergen::Wheat,
        Allergen::Egg,
        Allergen::Milk,
        Allergen::Buckwheat,
        Allergen::Peanut,
        Allergen::Shrimp,
        Allergen::Crab,
        Allergen::Walnut,
    ];

    pub const ALL: [Allergen; 9] = [
        Allergen::Wheat,
        Allergen::Egg,
        Allergen::Milk,
        Allergen::Buckwheat,
        Allergen::Peanut,
        Allergen::Shrimp,
        Allergen::Crab,
        Allergen::Walnut,
        Allergen::TreeNut,
    ];

    /// Japanese display label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Wheat => "小麦",
            Self::Egg => "卵",
            Self::Milk => "乳",
            Self::Buckwheat => "そば",
            Self::Peanut => "落花生",
            Self::Shrimp => "えび",
            Self::Crab => "かに",
            Self::Walnut => "くるみ",
            Self::TreeNut => "ナッツ",
        }
    }

    pub fn english(&self) -> &'static str {
        match self {
            Self::Wheat => "wheat",
            Self::Egg => "egg",
            Self::Milk => "milk",
            Self::Buckwheat => "buckwheat",
            Self::Peanut => "peanut",
            Self::Shrimp => "shrimp",
            Self::Crab => "crab",
            Self::Walnut => "walnut",
            Self::TreeNut => "tree_nut",
        }
    }

    /// Surface forms used in free text, label first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Self::Wheat => &["小麦", "グルテン", "麦", "wheat", "gluten"],
            Self::Egg => &["卵", "たまご", "玉子", "タマゴ", "エッグ", "egg"],
            Self::Milk => &[
                "乳", "乳製品", "牛乳", "ミルク", "チーズ", "バター", "生クリーム", "milk", "dairy",
            ],
            Self::Buckwheat => &["そば", "蕎麦", "ソバ", "buckwheat", "soba"],
            Self::Peanut => &["落花生", "ピーナッツ", "ピーナツ", "peanut"],
            Self::Shrimp => &["えび", "エビ", "海老", "shrimp", "prawn"],
            Self::Crab => &["かに", "カニ", "蟹", "crab"],
            Self::Walnut => &["くるみ", "クルミ", "胡桃", "walnut"],
            Self::TreeNut => &["ナッツ", "アーモンド", "カシューナッツ", "nut"],
        }
    }

    /// Wheat, egg and milk: the allergens most often removed on request.
    pub fn is_top_three(&self) -> bool {
        matches!(self, Self::Wheat | Self::Egg | Self::Milk)
    }

    /// Resolve a label, English name or alias. Matching is exact after
    /// trimming and ASCII lowercasing.
    pub fn from_label(label: &str) -> Option<Self> {
        let needle = label.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return None;
        }
        Self::ALL.into_iter().find(|a| {
            a.english() == needle || a.aliases().iter().any(|alias| *alias == needle)
        })
    }
}

impl fmt::Display for Allergen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
