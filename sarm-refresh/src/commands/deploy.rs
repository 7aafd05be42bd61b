use anyhow::Context;
use chrono::Utc;
use tracing::{error, info};

use sarm_mimic::TaskConfig;

use crate::config::Config;

/// Placeholder CID shown by dry runs, the real one comes from the upload.
const DRY_RUN_TASK_CID: &str = "<task-cid>";

pub(super) async fn deploy(config: &Config, dry_run: bool) -> anyhow::Result<()> {
    config.validate_deploy()?;
    let hook_address = config.sarm_hook_address()?;
    info!(chain_id = config.chain_id, dry_run, "deploying rating refresh task");

    // Reports are fetched first so the configuration carries fresh ones.
    let reports = super::fetch_reports(config).await?;
    let inputs = config.task_inputs(reports)?;

    if dry_run {
        let task_config = TaskConfig::rating_refresh(DRY_RUN_TASK_CID, inputs, hook_address);
        println!("{}", serde_json::to_string_pretty(&task_config)?);
        info!("dry run, nothing was sent to Mimic");
        return Ok(());
    }

    let manifest = std::fs::read(&config.task_manifest)
        .with_context(|| format!("reading {}", config.task_manifest.display()))?;
    let wasm = std::fs::read(&config.task_wasm)
        .with_context(|| format!("reading {}", config.task_wasm.display()))?;

    let client = super::mimic_client(config).await?;
    let task = client.create_task(manifest, wasm).await?;
    let task_config = TaskConfig::rating_refresh(task.cid.clone(), inputs, hook_address);
    let created = client.create_config(&task_config).await?;

    info!("deployment complete, the task runs on every swap checked by the hook");
    println!("Task: {}", task.cid);
    println!("Config: {}", created.sig);
    println!();
    println!("Next steps:");
    println!("1. Save the config signature: MIMIC_CONFIG_SIG={}", created.sig);
    println!("2. Trigger a manual run: sarm-refresh trigger");
    println!("3. Check the dashboard: https://mimic.fi");
    Ok(())
}

/// Deploys with freshly fetched reports, logging start and end for cron.
pub(super) async fn redeploy(config: &Config) -> anyhow::Result<()> {
    let started = Utc::now();
    info!("redeployment started at {}", started.to_rfc3339());

    let result = deploy(config, false).await;

    let finished = Utc::now();
    let elapsed = (finished - started).num_seconds();
    match &result {
        Ok(()) => info!(elapsed, "redeployment completed at {}", finished.to_rfc3339()),
        Err(e) => error!(elapsed, "redeployment failed at {}: {e:#}", finished.to_rfc3339()),
    }
    result
}
