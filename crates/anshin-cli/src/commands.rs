use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context as _};

use anshin_core::config::AnshinConfig;
use anshin_core::errors::PipelineError;
use anshin_core::models::CollectionTarget;
use anshin_observability::init_tracing;
use anshin_pipeline::scheduling::{run_mesh, run_uncollected};
use anshin_pipeline::{build_merge_engine, JobRunner, RunnerSettings, ScheduleSettings};
use anshin_sources::{ChainMaster, SourceRegistry};
use anshin_storage::StorageEngine;

/// Everything a job-running command needs, built from the layered config.
pub struct Context {
    pub config: AnshinConfig,
    pub runner: JobRunner,
}

impl Context {
    pub fn load(config_path: Option<&Path>, db: Option<&Path>) -> anyhow::Result<Self> {
        let mut config = AnshinConfig::load(config_path).context("loading configuration")?;
        if let Some(db) = db {
            config.storage.db_path = db.display().to_string();
        }
        init_tracing(&config.observability);

        let store = StorageEngine::from_config(&config.storage)
            .with_context(|| format!("opening database {}", config.storage.db_path))?;
        let master = Arc::new(ChainMaster::builtin()?);
        let engine = build_merge_engine(&config.scoring, &master)?;
        let registry = SourceRegistry::new(config.sources.clone(), master)?;
        tracing::info!(adapters = ?registry.enabled_names(), "sources configured");

        let runner = JobRunner::new(
            Arc::new(store),
            Arc::new(registry),
            engine,
            RunnerSettings::from_config(&config),
        );
        Ok(Self { config, runner })
    }
}

pub async fn collect_area(ctx: &Context, area: &str) -> anyhow::Result<()> {
    let target = CollectionTarget::area(area);
    if target.area_name().map_or(true, str::is_empty) {
        bail!("area name is empty");
    }
    let summary = ctx.runner.run(&target).await?;
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

pub async fn collect_uncollected(ctx: &Context) -> anyhow::Result<()> {
    let settings = ScheduleSettings::from_config(&ctx.config.collection);
    let report = run_uncollected(&ctx.runner, &settings).await?;
    for summary in &report.summaries {
        println!("{}", serde_json::to_string(summary)?);
    }
    for (area, error) in &report.failures {
        eprintln!("failed: {area}: {error}");
    }
    if !report.failures.is_empty() {
        return Err(PipelineError::BatchFailed {
            failed: report.failures.len(),
            total: report.attempted(),
        }
        .into());
    }
    if report.attempted() == 0 {
        println!("no uncollected areas");
    }
    Ok(())
}

pub async fn mesh(ctx: &Context, area_key: &str) -> anyhow::Result<()> {
    let settings = ScheduleSettings::from_config(&ctx.config.collection);
    let report = run_mesh(&ctx.runner, area_key, &settings).await?;
    let candidates: u32 = report.summaries.iter().map(|s| s.processed_count).sum();
    println!(
        "mesh {area_key}: {} points, {} failed, {candidates} candidates",
        report.points, report.failed_points
    );
    Ok(())
}

pub fn list_chains() -> anyhow::Result<()> {
    let master = ChainMaster::builtin()?;
    for brand in master.brands() {
        println!(
            "{}\t{}\t{} menus\t{}",
            brand.id,
            brand.brand_name,
            brand.menus.len(),
            brand.official_url
        );
    }
    Ok(())
}
