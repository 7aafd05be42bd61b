mod api_key;
mod deploy;
mod run;
mod trigger;

use tracing::info;

use sarm_common::Report;
use sarm_datalink::DataLinkClientBuilder;
use sarm_mimic::{MimicClient, MimicClientBuilder, auth::parse_signer};

use crate::{
    config::{Command, Config},
    error::ConfigError,
};

pub(crate) async fn execute(command: &Command, config: &Config) -> anyhow::Result<()> {
    match command {
        Command::ApiKey => api_key::retrieve(config).await,
        Command::Deploy { dry_run } => deploy::deploy(config, *dry_run).await,
        Command::Redeploy => deploy::redeploy(config).await,
        Command::Trigger => trigger::trigger(config).await,
        Command::Run { inputs, output } => {
            run::run(config, inputs.as_deref(), output.as_deref()).await
        }
    }
}

/// Authenticates with MIMIC_API_KEY, or logs in with PRIVATE_KEY.
async fn mimic_client(config: &Config) -> anyhow::Result<MimicClient> {
    let builder = MimicClientBuilder::new().with_api_url(config.mimic_api_url.as_str());

    if let Some(api_key) = config.mimic_api_key() {
        info!("using API key authentication");
        return Ok(builder.with_api_key(api_key)?);
    }
    if config.has_private_key() {
        info!("using signer authentication");
        let signer = parse_signer(config.private_key()?)?;
        return Ok(builder.with_signer(&signer).await?);
    }
    Err(ConfigError::MissingMimicAuth.into())
}

async fn fetch_reports(config: &Config) -> anyhow::Result<Vec<Report>> {
    let client = DataLinkClientBuilder::new()
        .with_user_agent(concat!("sarm-refresh/", env!("CARGO_PKG_VERSION")))
        .build(config.datalink_config()?)?;
    Ok(client.fetch_reports(&config.feed_ids()).await?)
}
