use alloy_primitives::Address;
use tracing::{info, warn};

use sarm_mimic::{LoginFlow, auth::parse_signer};

use crate::config::Config;

pub(super) async fn retrieve(config: &Config) -> anyhow::Result<()> {
    let signer = parse_signer(config.private_key()?)?;

    if let Some(wallet) = config.wallet_address() {
        match wallet.parse::<Address>() {
            Ok(address) if address == signer.address() => {}
            _ => warn!(
                "WALLET_ADDRESS {wallet} does not match the signing key address {}",
                signer.address()
            ),
        }
    }

    let api_key = LoginFlow::new(config.mimic_api_url.as_str())?
        .retrieve_api_key(&signer)
        .await?;

    info!("API key retrieved, add the line below to your .env file");
    println!("MIMIC_API_KEY={api_key}");
    Ok(())
}
