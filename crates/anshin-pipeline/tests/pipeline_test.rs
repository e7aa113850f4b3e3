//! End-to-end job runs against an in-memory store.

mod common;

use std::sync::Arc;

use chrono::Utc;
use serde::Deserialize;

use anshin_core::config::ScoringConfig;
use anshin_core::errors::{AnshinError, StorageError};
use anshin_core::models::{CollectionTarget, JobStatus, MenuClaim, RawSighting, SourceCitation, SourceType};
use anshin_core::traits::{CollectionStore, SourceAdapter};
use anshin_core::Allergen;
use anshin_pipeline::{build_merge_engine, RunnerSettings};
use anshin_scoring::{reliability_breakdown, ReliabilityInput};
use anshin_sources::ChainMaster;
use anshin_storage::StorageEngine;

use common::{fast_settings, fixed, runner_with, Fault, FaultyStore, FailingAdapter, SlowAdapter};

#[derive(Deserialize)]
struct Scenario {
    area: String,
    sightings: Vec<RawSighting>,
    expected: Expected,
}

#[derive(Deserialize)]
struct Expected {
    candidates: usize,
    sources: usize,
    menus: usize,
}

/// The Mos Burger scenario with every menu collected today.
fn mos_scenario() -> Scenario {
    let mut scenario: Scenario = test_fixtures::load_fixture("scenarios/mos_burger_tenjin.json");
    let now = Utc::now();
    for sighting in &mut scenario.sightings {
        for menu in &mut sighting.menus {
            menu.collected_at = Some(now);
        }
    }
    scenario
}

fn split_by_source(sightings: &[RawSighting]) -> Vec<Arc<dyn SourceAdapter>> {
    vec![
        fixed(
            "official_list",
            sightings.iter().filter(|s| s.source.source_type == SourceType::Official).cloned().collect(),
        ),
        fixed(
            "blog",
            sightings.iter().filter(|s| s.source.source_type == SourceType::Blog).cloned().collect(),
        ),
    ]
}

fn menu_sighting(name: &str, place_id: Option<&str>, menu: &str) -> RawSighting {
    let mut s = RawSighting::new(
        name,
        SourceCitation::new(SourceType::GoogleMaps, format!("https://maps.example/{name}")),
    )
    .with_address("福岡市中央区天神2-11-1")
    .with_menu(
        MenuClaim::new(menu)
            .with_allergens([Allergen::Wheat, Allergen::Egg, Allergen::Milk])
            .collected(Utc::now()),
    );
    s.place_id = place_id.map(str::to_string);
    s
}

// ── Scenario ────────────────────────────────────────────────────────

#[tokio::test]
async fn mos_burger_sightings_become_one_candidate() {
    let scenario = mos_scenario();
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let runner = runner_with(store.clone(), split_by_source(&scenario.sightings), fast_settings());

    let summary = runner.run(&CollectionTarget::area(&scenario.area)).await.unwrap();
    assert_eq!(summary.collected_count, 2);
    assert_eq!(summary.processed_count as usize, scenario.expected.candidates);
    assert_eq!(summary.new_shops, 1);

    let candidates = store.candidates_for_job(&summary.job_id).await.unwrap();
    assert_eq!(candidates.len(), scenario.expected.candidates);
    let c = &candidates[0];
    assert_eq!(c.sources.len(), scenario.expected.sources);
    assert_eq!(c.menus.len(), scenario.expected.menus);
    assert!(c.menus[0].value_score > 0);
    // 2 citations (40) + official (50) + blog (25) + 1 menu (5) + photo (15), clamped.
    assert_eq!(c.reliability_score, 100);
    assert!(!c.metadata.images.is_empty());
    assert!(!c.metadata.is_update);

    let job = store.get_job(&summary.job_id).await.unwrap().unwrap();
    assert_eq!(job.status, JobStatus::Completed);
    assert_eq!(job.processed_count, 1);
    assert_eq!(store.raw_snapshot_count(&summary.job_id).await.unwrap(), 2);
}

#[test]
fn mos_burger_reliability_reflects_official_source_and_photo() {
    let scenario = mos_scenario();
    let engine = build_merge_engine(&ScoringConfig::default(), &ChainMaster::builtin().unwrap()).unwrap();
    let outcome = engine.merge(scenario.sightings, Utc::now());
    assert_eq!(outcome.shops.len(), 1);
    let shop = &outcome.shops[0];

    let b = reliability_breakdown(ReliabilityInput {
        citations: &shop.sources,
        menu_count: shop.menus.len(),
        has_photos: shop.has_photos,
    });
    assert_eq!(b.citation_points, 40);
    // official (50) + blog (25)
    assert_eq!(b.type_points, 75);
    assert_eq!(b.menu_points, 5);
    assert_eq!(b.photo_points, 15);
    assert_eq!(b.score, 100);
    assert_eq!(shop.reliability_score, b.score);
}

#[tokio::test]
async fn rerun_does_not_resubmit_queued_shops() {
    let scenario = mos_scenario();
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let runner = runner_with(store.clone(), split_by_source(&scenario.sightings), fast_settings());
    let target = CollectionTarget::area(&scenario.area);

    assert_eq!(runner.run(&target).await.unwrap().processed_count, 1);
    let second = runner.run(&target).await.unwrap();
    assert_eq!(second.processed_count, 0);
    assert!(store.candidates_for_job(&second.job_id).await.unwrap().is_empty());
}

// ── Fault isolation ─────────────────────────────────────────────────

#[tokio::test]
async fn failing_and_slow_adapters_degrade_to_empty() {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let adapters: Vec<Arc<dyn SourceAdapter>> = vec![
        Arc::new(FailingAdapter),
        Arc::new(SlowAdapter),
        fixed("maps", vec![menu_sighting("こめこ食堂", Some("p1"), "米粉パンケーキ")]),
    ];
    let runner = runner_with(store.clone(), adapters, fast_settings());

    let summary = runner.run(&CollectionTarget::area("天神")).await.unwrap();
    assert_eq!(summary.collected_count, 1);
    assert_eq!(summary.processed_count, 1);
    let job = store.get_job(&summary.job_id).await.unwrap().unwrap();
    assert_eq!(job.status, JobStatus::Completed);
}

#[tokio::test]
async fn persistence_failure_fails_the_job() {
    let inner = Arc::new(StorageEngine::open_in_memory().unwrap());
    let store = Arc::new(FaultyStore::new(inner.clone(), Fault::InsertCandidates));
    let runner = runner_with(
        store.clone(),
        vec![fixed("maps", vec![menu_sighting("こめこ食堂", None, "米粉パンケーキ")])],
        fast_settings(),
    );

    let err = runner.run(&CollectionTarget::area("天神")).await.unwrap_err();
    assert!(matches!(
        err,
        AnshinError::StorageError(StorageError::SqliteError { .. })
    ));

    let job_id = store.last_job_id().unwrap();
    let job = inner.get_job(&job_id).await.unwrap().unwrap();
    assert_eq!(job.status, JobStatus::Failed);
    assert!(job.logs.last().unwrap().msg.contains("disk I/O error"));
}

#[tokio::test]
async fn area_stamp_failure_fails_the_job_before_completion() {
    let inner = Arc::new(StorageEngine::open_in_memory().unwrap());
    let store = Arc::new(FaultyStore::new(inner.clone(), Fault::MarkAreaCollected));
    let runner = runner_with(
        store.clone(),
        vec![fixed("maps", vec![menu_sighting("こめこ食堂", None, "米粉パンケーキ")])],
        fast_settings(),
    );

    assert!(runner.run(&CollectionTarget::area("天神")).await.is_err());

    // The job never reached `completed`, so the failure is recorded once.
    let job = inner.get_job(&store.last_job_id().unwrap()).await.unwrap().unwrap();
    assert_eq!(job.status, JobStatus::Failed);
    assert_eq!(job.processed_count, 0);
    assert!(job.logs.last().unwrap().msg.contains("disk I/O error"));
}

#[tokio::test]
async fn raw_snapshot_is_capped() {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let many: Vec<RawSighting> = (0..60)
        .map(|i| {
            RawSighting::new(
                format!("店舗{i}"),
                SourceCitation::new(SourceType::Sns, format!("https://sns.example/{i}")),
            )
        })
        .collect();
    let runner = runner_with(store.clone(), vec![fixed("sns", many)], fast_settings());

    let summary = runner.run(&CollectionTarget::area("天神")).await.unwrap();
    assert_eq!(summary.collected_count, 60);
    assert_eq!(store.raw_snapshot_count(&summary.job_id).await.unwrap(), 50);
}

// ── Incremental detection ───────────────────────────────────────────

#[tokio::test]
async fn known_restaurant_with_no_new_menus_is_dropped() {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let id = store
        .add_restaurant("モスバーガー天神店", None, Some("mos-tenjin"))
        .await
        .unwrap();
    store.add_menu(&id, "米粉バーガー セット").await.unwrap();

    let runner = runner_with(
        store.clone(),
        vec![fixed("maps", vec![menu_sighting("モスバーガー天神", Some("mos-tenjin"), "米粉バーガーセット")])],
        fast_settings(),
    );
    let summary = runner.run(&CollectionTarget::area("天神")).await.unwrap();
    assert_eq!(summary.processed_count, 0);
    assert_eq!(summary.updates, 0);
}

#[tokio::test]
async fn known_restaurant_contributes_only_new_menus() {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let id = store
        .add_restaurant("モスバーガー天神店", None, Some("mos-tenjin"))
        .await
        .unwrap();
    store.add_menu(&id, "ポテト").await.unwrap();

    let runner = runner_with(
        store.clone(),
        vec![fixed("maps", vec![menu_sighting("モスバーガー天神", Some("mos-tenjin"), "米粉バーガーセット")])],
        fast_settings(),
    );
    let summary = runner.run(&CollectionTarget::area("天神")).await.unwrap();
    assert_eq!(summary.updates, 1);

    let candidates = store.candidates_for_job(&summary.job_id).await.unwrap();
    assert_eq!(candidates.len(), 1);
    assert!(candidates[0].metadata.is_update);
    assert_eq!(candidates[0].metadata.reference_restaurant_id.as_deref(), Some(id.as_str()));
    assert_eq!(candidates[0].menus[0].name, "米粉バーガーセット");
}

#[tokio::test]
async fn name_match_applies_only_without_place_id() {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let id = store.add_restaurant("こめこ食堂", None, None).await.unwrap();
    store.add_menu(&id, "米粉パンケーキ").await.unwrap();

    let runner = runner_with(
        store.clone(),
        vec![
            fixed("a", vec![menu_sighting("こめこ食堂", None, "米粉パンケーキ")]),
        ],
        fast_settings(),
    );
    let by_name = runner.run(&CollectionTarget::area("天神")).await.unwrap();
    assert_eq!(by_name.processed_count, 0);

    // Same name with an unknown place id is a different, new shop.
    let runner = runner_with(
        store.clone(),
        vec![fixed("b", vec![menu_sighting("こめこ食堂", Some("p-new"), "米粉パンケーキ")])],
        fast_settings(),
    );
    let by_place = runner.run(&CollectionTarget::area("天神")).await.unwrap();
    assert_eq!(by_place.new_shops, 1);
}

#[tokio::test]
async fn acceptance_threshold_is_configurable() {
    let bare = || {
        vec![fixed(
            "sns",
            vec![RawSighting::new(
                "ひだまりカフェ",
                SourceCitation::new(SourceType::Sns, "https://sns.example/p/1"),
            )],
        )]
    };

    // One sns citation without menus scores 40.
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let strict = RunnerSettings {
        acceptance_threshold: 50,
        ..fast_settings()
    };
    let summary = runner_with(store.clone(), bare(), strict)
        .run(&CollectionTarget::area("天神"))
        .await
        .unwrap();
    assert_eq!(summary.processed_count, 0);

    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let summary = runner_with(store.clone(), bare(), fast_settings())
        .run(&CollectionTarget::area("天神"))
        .await
        .unwrap();
    assert_eq!(summary.processed_count, 1);
}

#[tokio::test]
async fn area_is_stamped_after_completion() {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    store
        .upsert_area(&anshin_core::models::AreaRecord {
            code: "401331".into(),
            prefecture: "福岡県".into(),
            name: "福岡市中央区".into(),
            last_collected_at: None,
        })
        .await
        .unwrap();
    let runner = runner_with(store.clone(), Vec::new(), fast_settings());
    runner
        .run(&CollectionTarget::area_with_code("福岡県 福岡市中央区", "401331"))
        .await
        .unwrap();
    assert!(store.area("401331").await.unwrap().unwrap().last_collected_at.is_some());
}
