//! Shop reliability: how far a merged record can be trusted.
//!
//! ```text
//! score = 20 × distinct citations
//!       + Σ type weight over citations
//!       + min(5 × menus, 30)
//!       + 15 if any photo evidence
//! ```
//!
//! Clamped to [0, 100]. Advisory only: it feeds the acceptance filter and
//! review ordering, never an automatic approval.

use std::collections::HashSet;

use anshin_core::{SourceCitation, SourceType};

pub const PER_CITATION_WEIGHT: u32 = 20;
pub const MENU_WEIGHT: u32 = 5;
pub const MENU_BONUS_CAP: u32 = 30;
pub const PHOTO_BONUS: u32 = 15;
pub const MAX_RELIABILITY: u8 = 100;

/// Weight of one citation of the given type.
pub fn source_type_weight(source_type: SourceType) -> u32 {
    match source_type {
        SourceType::Official => 50,
        SourceType::Municipality | SourceType::OfficialMatrix => 45,
        SourceType::Reservation => 40,
        SourceType::GoogleMaps => 30,
        SourceType::Blog => 25,
        SourceType::Sns => 20,
        SourceType::Review => 15,
        SourceType::Unknown => 10,
    }
}

/// The parts of a merged shop that reliability depends on.
#[derive(Debug, Clone, Copy)]
pub struct ReliabilityInput<'a> {
    pub citations: &'a [SourceCitation],
    pub menu_count: usize,
    pub has_photos: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReliabilityBreakdown {
    pub citation_points: u32,
    pub type_points: u32,
    pub menu_points: u32,
    pub photo_points: u32,
    pub score: u8,
}

pub fn reliability_breakdown(input: ReliabilityInput<'_>) -> ReliabilityBreakdown {
    let distinct: HashSet<&SourceCitation> = input.citations.iter().collect();
    let citation_points = PER_CITATION_WEIGHT.saturating_mul(distinct.len() as u32);
    let type_points = distinct
        .iter()
        .map(|c| source_type_weight(c.source_type))
        .fold(0u32, u32::saturating_add);
    let menu_points = MENU_WEIGHT
        .saturating_mul(input.menu_count.min(u32::MAX as usize) as u32)
        .min(MENU_BONUS_CAP);
    let photo_points = if input.has_photos { PHOTO_BONUS } else { 0 };
    let total = citation_points
        .saturating_add(type_points)
        .saturating_add(menu_points)
        .saturating_add(photo_points);
    ReliabilityBreakdown {
        citation_points,
        type_points,
        menu_points,
        photo_points,
        score: total.min(MAX_RELIABILITY as u32) as u8,
    }
}

pub fn reliability_score(input: ReliabilityInput<'_>) -> u8 {
    reliability_breakdown(input).score
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cite(t: SourceType, url: &str) -> SourceCitation {
        SourceCitation::new(t, url)
    }

    #[test]
    fn single_review_without_menus() {
        let c = [cite(SourceType::Review, "https://r.example/1")];
        let s = reliability_score(ReliabilityInput {
            citations: &c,
            menu_count: 0,
            has_photos: false,
        });
        assert_eq!(s, 35);
    }

    #[test]
    fn menu_bonus_is_capped() {
        let c = [cite(SourceType::Sns, "https://s.example/1")];
        let b = reliability_breakdown(ReliabilityInput {
            citations: &c,
            menu_count: 50,
            has_photos: false,
        });
        assert_eq!(b.menu_points, 30);
        assert_eq!(b.score, 70);
    }

    #[test]
    fn duplicate_citations_count_once() {
        let c = [
            cite(SourceType::Blog, "https://b.example/1"),
            cite(SourceType::Blog, "https://b.example/1"),
        ];
        let b = reliability_breakdown(ReliabilityInput {
            citations: &c,
            menu_count: 0,
            has_photos: false,
        });
        assert_eq!(b.citation_points, 20);
        assert_eq!(b.type_points, 25);
    }

    #[test]
    fn clamped_at_one_hundred() {
        let c = [
            cite(SourceType::Official, "https://o.example"),
            cite(SourceType::Municipality, "https://m.example"),
        ];
        let s = reliability_score(ReliabilityInput {
            citations: &c,
            menu_count: 10,
            has_photos: true,
        });
        assert_eq!(s, 100);
    }
}
