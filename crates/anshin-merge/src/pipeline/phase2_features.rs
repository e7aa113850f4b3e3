use anshin_core::constants::CONTAMINATION_MENTIONED;
use anshin_scoring::{extract_safety_features, SafetyFlag};

use crate::shop::MergedShop;

/// Scan the shop's free text into feature flags. Detected flags are set to
/// `true`; flags supplied by sources are kept.
pub fn derive_features(shop: &mut MergedShop) {
    let detected = extract_safety_features(&shop.free_text());
    for (key, value) in detected {
        let entry = shop.features.entry(key).or_insert(false);
        *entry |= value;
    }
    let contamination = shop
        .features
        .get(SafetyFlag::ContaminationMentioned.as_str())
        .copied()
        .unwrap_or(false);
    if contamination && shop.contamination_level.is_none() {
        shop.contamination_level = Some(CONTAMINATION_MENTIONED.to_string());
    }
}
