//! Allergy-safety value of a menu item.
//!
//! ```text
//! raw   = Σ presence points over claimed allergens   (100 usually, 30 rarely)
//!       + 20 if a substitution signal is present
//! value = round(raw × freshness)
//! ```
//!
//! Unmapped ("other") dishes fall back to a flat score: 80 when a
//! substitution signal backs a wheat/egg/milk claim, 40 for the claim
//! alone. A claim limited to allergens the dish never contains is worth
//! nothing unless a substitution signal is present.

pub mod freshness;

use chrono::{DateTime, Utc};

use anshin_core::MenuClaim;

use crate::category::{CategoryTable, Presence, OTHER_CATEGORY};

pub const USUALLY_PRESENT_POINTS: i64 = 100;
pub const RARELY_PRESENT_POINTS: i64 = 30;
pub const SUBSTITUTION_BONUS: i64 = 20;
pub const UNMAPPED_SUBSTITUTION_POINTS: i64 = 80;
pub const UNMAPPED_CLAIM_POINTS: i64 = 40;

/// Every term of a value computation, for review tooling and tests.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueBreakdown {
    pub category: String,
    pub base: i64,
    pub substitution_bonus: i64,
    pub naturally_free: bool,
    pub freshness: f64,
    pub value: i64,
}

/// Classifies and scores menu claims against a [`CategoryTable`].
#[derive(Debug, Clone)]
pub struct ValueScorer {
    table: CategoryTable,
}

impl ValueScorer {
    pub fn new(table: CategoryTable) -> Self {
        Self { table }
    }

    pub fn table(&self) -> &CategoryTable {
        &self.table
    }

    pub fn classify<'a>(&'a self, name: &str) -> &'a str {
        self.table.category_key(name)
    }

    pub fn value_score(&self, menu: &MenuClaim, now: DateTime<Utc>) -> i64 {
        self.breakdown(menu, now).value
    }

    pub fn breakdown(&self, menu: &MenuClaim, now: DateTime<Utc>) -> ValueBreakdown {
        let text = menu.text();
        let has_signal = self.table.has_substitution_signal(&text);
        let bonus = if has_signal { SUBSTITUTION_BONUS } else { 0 };
        let freshness = freshness::multiplier(menu.collected_at, now);

        let Some(category) = self.table.classify(&menu.name) else {
            let claims_top_three = menu.allergens_removed.iter().any(|a| a.is_top_three());
            let (base, bonus) = match (claims_top_three, has_signal) {
                (true, true) => (UNMAPPED_SUBSTITUTION_POINTS, 0),
                (true, false) => (UNMAPPED_CLAIM_POINTS, 0),
                (false, _) => (0, bonus),
            };
            return finish(OTHER_CATEGORY, base, bonus, false, freshness);
        };

        let naturally_free = !menu.allergens_removed.is_empty()
            && menu
                .allergens_removed
                .iter()
                .all(|a| self.table.is_naturally_free(category, *a, &menu.name));
        if naturally_free && !has_signal {
            return finish(&category.key, 0, 0, true, freshness);
        }

        let base = menu
            .allergens_removed
            .iter()
            .map(|a| match category.presence(*a) {
                _ if self.table.is_naturally_free(category, *a, &menu.name) => 0,
                Presence::Usually => USUALLY_PRESENT_POINTS,
                Presence::Rarely => RARELY_PRESENT_POINTS,
                Presence::Never | Presence::Unlisted => 0,
            })
            .sum();
        finish(&category.key, base, bonus, naturally_free, freshness)
    }
}

fn finish(category: &str, base: i64, bonus: i64, naturally_free: bool, freshness: f64) -> ValueBreakdown {
    let value = ((base + bonus) as f64 * freshness).round() as i64;
    ValueBreakdown {
        category: category.to_string(),
        base,
        substitution_bonus: bonus,
        naturally_free,
        freshness,
        value,
    }
}
