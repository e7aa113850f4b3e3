//! Uncollected-area batches and mesh sweeps.

mod common;

use std::sync::Arc;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};

use anshin_core::config::CollectionConfig;
use anshin_core::errors::{AnshinError, PipelineError};
use anshin_core::geo::GeoPoint;
use anshin_core::models::AreaRecord;
use anshin_core::traits::CollectionStore;
use anshin_pipeline::scheduling::{run_mesh, run_mesh_points, run_uncollected};
use anshin_pipeline::ScheduleSettings;
use anshin_storage::StorageEngine;

use common::{fast_settings, runner_with, Fault, FaultyStore};

fn schedule() -> ScheduleSettings {
    ScheduleSettings {
        inter_job_delay: Duration::ZERO,
        mesh_point_delay: Duration::ZERO,
        ..ScheduleSettings::from_config(&CollectionConfig::default())
    }
}

fn area(code: &str, name: &str, days_ago: Option<i64>) -> AreaRecord {
    AreaRecord {
        code: code.into(),
        prefecture: "福岡県".into(),
        name: name.into(),
        last_collected_at: days_ago.map(|d| Utc::now() - ChronoDuration::days(d)),
    }
}

#[tokio::test]
async fn batch_collects_due_areas_once() {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    store.upsert_area(&area("401307", "福岡市", None)).await.unwrap();
    store.upsert_area(&area("402036", "久留米市", Some(120))).await.unwrap();
    store.upsert_area(&area("402028", "大牟田市", Some(3))).await.unwrap();
    let runner = runner_with(store.clone(), Vec::new(), fast_settings());

    let report = run_uncollected(&runner, &schedule()).await.unwrap();
    assert_eq!(report.attempted(), 2);
    assert!(report.failures.is_empty());
    assert_eq!(report.summaries[0].area_name, "福岡県 福岡市");

    let again = run_uncollected(&runner, &schedule()).await.unwrap();
    assert_eq!(again.attempted(), 0);
}

#[tokio::test]
async fn batch_size_bounds_the_run() {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    for (code, name) in [("401001", "A市"), ("401002", "B市"), ("401003", "C市")] {
        store.upsert_area(&area(code, name, None)).await.unwrap();
    }
    let runner = runner_with(store.clone(), Vec::new(), fast_settings());
    let settings = ScheduleSettings {
        batch_size: 2,
        ..schedule()
    };
    assert_eq!(run_uncollected(&runner, &settings).await.unwrap().attempted(), 2);
}

#[tokio::test]
async fn unknown_mesh_key_lists_known_keys() {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let runner = runner_with(store, Vec::new(), fast_settings());
    let err = run_mesh(&runner, "OSAKA", &schedule()).await.unwrap_err();
    match err {
        AnshinError::PipelineError(PipelineError::UnknownArea { key, known }) => {
            assert_eq!(key, "OSAKA");
            assert!(known.contains("FUKUOKA_CITY"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn mesh_sweep_runs_one_job_per_point() {
    let store = Arc::new(StorageEngine::open_in_memory().unwrap());
    let runner = runner_with(store.clone(), Vec::new(), fast_settings());

    let report = run_mesh(&runner, "fukuoka_city", &schedule()).await.unwrap();
    assert!(report.points > 0);
    assert_eq!(report.summaries.len(), report.points);
    assert!(report.summaries[0].area_name.starts_with("MESH:"));
    assert!(store.area("MESH").await.unwrap().is_some());
}

#[tokio::test]
async fn failed_mesh_points_do_not_stop_the_sweep() {
    let inner = Arc::new(StorageEngine::open_in_memory().unwrap());
    let store = Arc::new(FaultyStore::new(inner, Fault::InsertCandidates));
    let runner = runner_with(store, Vec::new(), fast_settings());
    let points = [
        GeoPoint::new(33.54, 130.33),
        GeoPoint::new(33.54, 130.38),
        GeoPoint::new(33.58, 130.33),
    ];

    let report = run_mesh_points(&runner, &points, &schedule()).await;
    assert_eq!(report.points, 3);
    assert_eq!(report.failed_points, 3);
    assert!(report.summaries.is_empty());
}
