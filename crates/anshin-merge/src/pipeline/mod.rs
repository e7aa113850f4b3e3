//! Merge pipeline.
//!
//! Phase 1: Grouping → Phase 2: Safety features → Phase 3: Menu scoring →
//! Phase 4: Menu dedup → Phase 5: Blocklist filter → Phase 6: Reliability

pub mod phase1_grouping;
pub mod phase2_features;
pub mod phase3_scoring;
pub mod phase4_dedup;
pub mod phase5_blocklist;
pub mod phase6_reliability;

use chrono::{DateTime, Utc};
use tracing::info;

use anshin_core::RawSighting;
use anshin_scoring::ValueScorer;

use crate::fingerprint::Fingerprinter;
use crate::shop::MergedShop;

/// Merged shops plus counters for job logs.
#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    pub shops: Vec<MergedShop>,
    pub sightings_in: usize,
    pub blank_names_dropped: usize,
    pub duplicate_menus_dropped: usize,
    pub blocked_menus_dropped: usize,
}

/// Run all merge phases over one job's sightings.
pub fn run_pipeline(
    sightings: Vec<RawSighting>,
    fingerprinter: &Fingerprinter,
    scorer: &ValueScorer,
    now: DateTime<Utc>,
) -> MergeOutcome {
    let sightings_in = sightings.len();

    // Phase 1: Grouping.
    let grouped = phase1_grouping::group(sightings, fingerprinter);
    let mut shops = grouped.shops;
    info!(
        sightings = sightings_in,
        shops = shops.len(),
        dropped = grouped.blank_names,
        "Phase 1: grouped sightings by fingerprint"
    );

    // Phase 2: Safety features.
    for shop in &mut shops {
        phase2_features::derive_features(shop);
    }

    // Phase 3: Menu scoring.
    let mut scored = 0usize;
    for shop in &mut shops {
        scored += phase3_scoring::score_menus(shop, scorer, now);
    }
    info!(menus = scored, "Phase 3: scored menus");

    // Phase 4: Menu dedup.
    let mut duplicate_menus_dropped = 0usize;
    for shop in &mut shops {
        duplicate_menus_dropped += phase4_dedup::dedup_menus(shop);
    }

    // Phase 5: Blocklist.
    let mut blocked_menus_dropped = 0usize;
    for shop in &mut shops {
        blocked_menus_dropped += phase5_blocklist::filter_blocked(shop);
    }
    info!(
        duplicates = duplicate_menus_dropped,
        blocked = blocked_menus_dropped,
        "Phase 4-5: menu dedup and blocklist"
    );

    // Phase 6: Reliability.
    for shop in &mut shops {
        phase6_reliability::score(shop);
    }

    MergeOutcome {
        shops,
        sightings_in,
        blank_names_dropped: grouped.blank_names,
        duplicate_menus_dropped,
        blocked_menus_dropped,
    }
}
