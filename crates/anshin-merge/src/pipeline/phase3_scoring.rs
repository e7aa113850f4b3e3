use chrono::{DateTime, Utc};

use anshin_scoring::{extract_removable_allergens, ValueScorer};

use crate::shop::{MergedShop, ScoredMenu};

/// Classify and score every pending claim. Returns the number scored.
pub fn score_menus(shop: &mut MergedShop, scorer: &ValueScorer, now: DateTime<Utc>) -> usize {
    let claims = std::mem::take(&mut shop.menu_claims);
    let count = claims.len();
    shop.menus.extend(claims.into_iter().map(|claim| {
        let breakdown = scorer.breakdown(&claim, now);
        let removable_on_request = extract_removable_allergens(&claim.text());
        ScoredMenu {
            category: breakdown.category,
            value_score: breakdown.value,
            removable_on_request,
            claim,
        }
    }));
    count
}
