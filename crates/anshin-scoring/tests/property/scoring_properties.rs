use chrono::{Duration, Utc};
use proptest::prelude::*;

use anshin_core::{Allergen, MenuClaim, SourceCitation, SourceType};
use anshin_scoring::{
    extract_removable_allergens, is_blocked, reliability_score, CategoryTable, ReliabilityInput,
    ValueScorer,
};

fn arb_source_type() -> impl Strategy<Value = SourceType> {
    prop_oneof![
        Just(SourceType::Official),
        Just(SourceType::Municipality),
        Just(SourceType::OfficialMatrix),
        Just(SourceType::Reservation),
        Just(SourceType::GoogleMaps),
        Just(SourceType::Sns),
        Just(SourceType::Blog),
        Just(SourceType::Review),
        Just(SourceType::Unknown),
    ]
}

fn arb_allergen() -> impl Strategy<Value = Allergen> {
    (0usize..Allergen::ALL.len()).prop_map(|i| Allergen::ALL[i])
}

proptest! {
    #[test]
    fn reliability_always_within_bounds(
        citations in prop::collection::vec((arb_source_type(), 0u32..50), 0..40),
        menu_count in 0usize..10_000,
        has_photos in any::<bool>(),
    ) {
        let cites: Vec<SourceCitation> = citations
            .into_iter()
            .map(|(t, n)| SourceCitation::new(t, format!("https://example.com/{n}")))
            .collect();
        let score = reliability_score(ReliabilityInput {
            citations: &cites,
            menu_count,
            has_photos,
        });
        prop_assert!(score <= 100);
    }

    #[test]
    fn blocklist_is_total(name in ".{0,40}") {
        let _ = is_blocked(&name);
    }

    #[test]
    fn removable_extraction_is_total(text in ".{0,200}") {
        let found = extract_removable_allergens(&text);
        prop_assert!(found.iter().all(|a| *a != Allergen::TreeNut));
    }

    #[test]
    fn value_score_never_negative(
        name in "[a-zぁ-んァ-ン一-龥 ]{0,20}",
        allergens in prop::collection::btree_set(arb_allergen(), 0..4),
        days in prop::option::of(0i64..1_000),
    ) {
        let scorer = ValueScorer::new(CategoryTable::builtin().unwrap());
        let now = Utc::now();
        let menu = MenuClaim {
            name,
            allergens_removed: allergens,
            collected_at: days.map(|d| now - Duration::days(d)),
            ..MenuClaim::default()
        };
        prop_assert!(scorer.value_score(&menu, now) >= 0);
    }
}
