use tracing::info;

use crate::config::Config;

pub(super) async fn trigger(config: &Config) -> anyhow::Result<()> {
    let config_sig = config.mimic_config_sig()?;
    let client = super::mimic_client(config).await?;

    let execution = client.trigger_execution(config_sig).await?;

    info!("execution {} is {}", execution.hash, execution.status);
    println!("{}", execution.hash);
    Ok(())
}
