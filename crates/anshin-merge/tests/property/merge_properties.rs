use chrono::Utc;
use proptest::prelude::*;

use anshin_core::{MenuClaim, RawSighting, SourceCitation, SourceType};
use anshin_merge::{fingerprint, MergeEngine, MergedShop, Fingerprinter};
use anshin_merge::fingerprint::fold::fold_width;
use anshin_scoring::{CategoryTable, ValueScorer};

/// ASCII printable to full-width.
fn widen(s: &str) -> String {
    s.chars()
        .map(|c| match c {
            ' ' => '\u{3000}',
            '!'..='~' => char::from_u32(c as u32 + 0xFEE0).unwrap_or(c),
            _ => c,
        })
        .collect()
}

proptest! {
    #[test]
    fn fingerprint_ignores_width_and_whitespace(
        name in "[A-Za-z0-9]{1,8}( [A-Za-z0-9]{1,8}){0,2}",
        addr in "[0-9]{1,3}(-[0-9]{1,3}){0,2}",
    ) {
        let a = fingerprint(&name, Some(&addr));
        let b = fingerprint(&widen(&name), Some(&widen(&addr)));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn fingerprint_is_deterministic(name in ".{0,30}", addr in prop::option::of(".{0,30}")) {
        prop_assert_eq!(
            fingerprint(&name, addr.as_deref()),
            fingerprint(&name, addr.as_deref())
        );
    }

    #[test]
    fn width_folding_is_idempotent(s in ".{0,30}") {
        let once = fold_width(&s);
        prop_assert_eq!(fold_width(&once), once.clone());
    }

    #[test]
    fn absorbing_twice_equals_once(
        url in "https://[a-z]{3,10}\\.example/[0-9]{1,4}",
        extra in 1usize..4,
    ) {
        let s = RawSighting::new("店", SourceCitation::new(SourceType::Blog, url));
        let mut once = MergedShop::from_sighting("fp".into(), s.clone());
        let mut many = MergedShop::from_sighting("fp".into(), s.clone());
        for _ in 0..extra {
            many.absorb(s.clone());
        }
        once.absorb(s);
        prop_assert_eq!(once.sources.len(), 1);
        prop_assert_eq!(many.sources.len(), 1);
    }

    #[test]
    fn merged_reliability_within_bounds(
        count in 1usize..30,
        menus in 0usize..20,
    ) {
        let now = Utc::now();
        let engine = MergeEngine::new(
            Fingerprinter::default(),
            ValueScorer::new(CategoryTable::builtin().unwrap()),
        );
        let sightings: Vec<RawSighting> = (0..count)
            .map(|i| {
                let mut s = RawSighting::new(
                    "同じ店",
                    SourceCitation::new(SourceType::Official, format!("https://o.example/{i}")),
                );
                for m in 0..menus {
                    s.menus.push(MenuClaim::new(format!("メニュー{m}")));
                }
                s
            })
            .collect();
        let outcome = engine.merge(sightings, now);
        prop_assert_eq!(outcome.shops.len(), 1);
        prop_assert!(outcome.shops[0].reliability_score <= 100);
    }
}
