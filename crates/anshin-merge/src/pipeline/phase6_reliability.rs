use anshin_scoring::{reliability_score, ReliabilityInput};

use crate::shop::MergedShop;

/// Compute the shop's reliability, never below a curated source's floor.
pub fn score(shop: &mut MergedShop) {
    let computed = reliability_score(ReliabilityInput {
        citations: &shop.sources,
        menu_count: shop.menus.len(),
        has_photos: shop.has_photos,
    });
    shop.reliability_score = shop.reliability_floor.map_or(computed, |f| computed.max(f.min(100)));
}
