//! The `run` command: drive the full crawl → extract → parse → store
//! pipeline over the configured target list.
//!
//! Per-resort failures are recorded in the run summary and never abort the
//! run; only an unreadable target list, unusable clients, or a sustained
//! store outage surface as run-level errors.

mod batches;
mod item;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use snowsync_core::{AppConfig, ResortTarget};
use snowsync_model::ModelClient;
use snowsync_scraper::RenderClient;

use batches::{run_in_batches, AbortReason, BatchRun};
use item::{process_target, StageError};

/// One resort that failed, with the stage error that stopped it.
pub(crate) struct FailedItem {
    pub resort: String,
    pub error: StageError,
}

/// Execution report for one pipeline run. Never persisted.
pub(crate) struct RunSummary {
    pub processed: usize,
    pub succeeded: usize,
    pub failed: Vec<FailedItem>,
    pub aborted: Option<AbortReason>,
}

/// Handler for `snowsync-cli run`.
///
/// # Errors
///
/// Returns an error if the target list cannot be loaded, the resort filter
/// matches nothing, the store or clients cannot be constructed, or the run
/// aborted on a sustained store outage. Per-resort failures are reported in
/// the summary, not propagated.
pub(crate) async fn run_command(
    config: &AppConfig,
    resort_filter: Option<&str>,
    dry_run: bool,
) -> anyhow::Result<()> {
    let targets = load_targets(config, resort_filter)?;

    if dry_run {
        let names: Vec<&str> = targets.iter().map(|t| t.name.as_str()).collect();
        println!(
            "dry-run: would refresh {} resorts in batches of {}: [{}]",
            targets.len(),
            config.batch_size,
            names.join(", ")
        );
        return Ok(());
    }

    let pool = snowsync_db::connect_pool(
        &config.database_url,
        snowsync_db::PoolConfig::from_app_config(config),
    )
    .await
    .context("failed to connect to the report store")?;

    let render = RenderClient::new(
        &config.render_url,
        config.render_api_key.as_deref(),
        config.fetch_timeout_secs,
        &config.fetch_user_agent,
        config.max_retries,
        config.retry_backoff_base_secs,
    )
    .context("failed to build render client")?;

    let model = ModelClient::new(
        &config.model_base_url,
        &config.model_api_key,
        &config.model_id,
        config.model_timeout_secs,
    )
    .context("failed to build model client")?;

    let cancel = Arc::new(AtomicBool::new(false));
    {
        let cancel = Arc::clone(&cancel);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                tracing::warn!("cancellation requested; finishing current batch");
                cancel.store(true, Ordering::SeqCst);
            }
        });
    }

    let summary = run_pipeline(&pool, &render, &model, targets, config, &cancel).await;
    print_summary(&summary);

    if let Some(reason @ AbortReason::StoreUnreachable { .. }) = &summary.aborted {
        anyhow::bail!("run aborted: {reason}");
    }
    Ok(())
}

/// Load the targets to process for a run.
///
/// If `resort_filter` is `Some(name)`, the run is restricted to that single
/// configured resort (matched case-insensitively) and an error is returned
/// if it is not configured. If `None`, every target runs, in file order.
fn load_targets(
    config: &AppConfig,
    resort_filter: Option<&str>,
) -> anyhow::Result<Vec<ResortTarget>> {
    let file = snowsync_core::load_resorts(&config.resorts_path)
        .with_context(|| format!("failed to load targets from {}", config.resorts_path.display()))?;

    match resort_filter {
        Some(name) => {
            let target = file
                .resorts
                .into_iter()
                .find(|r| r.name.eq_ignore_ascii_case(name))
                .ok_or_else(|| {
                    anyhow::anyhow!(
                        "resort '{}' is not configured in {}",
                        name,
                        config.resorts_path.display()
                    )
                })?;
            Ok(vec![target])
        }
        None => Ok(file.resorts),
    }
}

/// Drives the batch scheduler and folds per-item outcomes into a summary.
async fn run_pipeline(
    pool: &sqlx::PgPool,
    render: &RenderClient,
    model: &ModelClient,
    targets: Vec<ResortTarget>,
    config: &AppConfig,
    cancel: &AtomicBool,
) -> RunSummary {
    let submitted = targets.len();
    tracing::info!(
        resorts = submitted,
        batch_size = config.batch_size,
        "starting pipeline run"
    );

    let BatchRun { outcomes, aborted } = run_in_batches(
        targets,
        config.batch_size,
        Duration::from_millis(config.inter_batch_delay_ms),
        config.store_failure_limit,
        cancel,
        |target: ResortTarget| async move { process_target(pool, render, model, &target).await },
    )
    .await;

    let mut summary = RunSummary {
        processed: 0,
        succeeded: 0,
        failed: Vec::new(),
        aborted,
    };

    for (target, outcome) in outcomes {
        summary.processed += 1;
        match outcome {
            Ok(()) => summary.succeeded += 1,
            Err(error) => {
                tracing::error!(
                    resort = %target.name,
                    stage = error.kind(),
                    error = %error,
                    "resort failed"
                );
                summary.failed.push(FailedItem {
                    resort: target.name,
                    error,
                });
            }
        }
    }

    summary
}

fn print_summary(summary: &RunSummary) {
    println!(
        "processed {} resorts: {} succeeded, {} failed",
        summary.processed,
        summary.succeeded,
        summary.failed.len()
    );
    for failure in &summary.failed {
        println!(
            "  {} — {} error: {}",
            failure.resort,
            failure.error.kind(),
            failure.error
        );
    }
    if let Some(reason) = &summary.aborted {
        println!("run stopped early: {reason}");
    }
}
