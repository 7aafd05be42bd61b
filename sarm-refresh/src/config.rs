use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use strum::IntoEnumIterator;
use url::Url;

use sarm_common::{
    Report, Stablecoin, TokenDescriptor, chain::BASE_SEPOLIA_CHAIN_ID, inputs::TaskInputs,
};
use sarm_datalink::{DEFAULT_DATALINK_API_URL, DataLinkConfig};
use sarm_mimic::constants::DEFAULT_MIMIC_API_URL;

use crate::error::ConfigError;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: Config,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    /// Logs in with PRIVATE_KEY and prints a Mimic API key
    ApiKey,
    /// Uploads the task and creates its trigger configuration
    Deploy {
        /// Print the configuration instead of sending it to Mimic
        #[arg(long)]
        dry_run: bool,
    },
    /// Deploys again with fresh reports, meant to be run by cron
    Redeploy,
    /// Requests a manual execution of MIMIC_CONFIG_SIG
    Trigger,
    /// Runs the rating refresh locally and prints the call intents
    Run {
        /// Task inputs as JSON, built from the environment when absent
        #[arg(long)]
        inputs: Option<PathBuf>,
        /// Write intents to this file instead of stdout
        #[arg(long)]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug, Clone)]
pub(crate) struct Config {
    #[arg(long, env = "CHAIN_ID", default_value_t = BASE_SEPOLIA_CHAIN_ID)]
    pub(crate) chain_id: u64,

    #[arg(long, env = "SSA_ORACLE_ADDRESS")]
    pub(crate) ssa_oracle_address: Option<String>,

    #[arg(long, env = "SARM_HOOK_ADDRESS")]
    pub(crate) sarm_hook_address: Option<String>,

    #[command(flatten, next_help_heading = "Tokens")]
    pub(crate) tokens: TokenArgs,

    #[arg(long, env = "DATALINK_API_URL", default_value = DEFAULT_DATALINK_API_URL)]
    pub(crate) datalink_api_url: Url,

    #[arg(long, env = "DATALINK_USER")]
    pub(crate) datalink_user: Option<String>,

    #[arg(long, env = "DATALINK_SECRET", hide_env_values = true)]
    pub(crate) datalink_secret: Option<String>,

    #[arg(long, env = "MIMIC_API_URL", default_value = DEFAULT_MIMIC_API_URL)]
    pub(crate) mimic_api_url: Url,

    #[arg(long, env = "MIMIC_API_KEY", hide_env_values = true)]
    pub(crate) mimic_api_key: Option<String>,

    #[arg(long, env = "PRIVATE_KEY", hide_env_values = true)]
    pub(crate) private_key: Option<String>,

    #[arg(long, env = "WALLET_ADDRESS")]
    pub(crate) wallet_address: Option<String>,

    #[arg(long, env = "MIMIC_CONFIG_SIG")]
    pub(crate) mimic_config_sig: Option<String>,

    #[arg(long, env = "TASK_MANIFEST", default_value = "manifest.yaml")]
    pub(crate) task_manifest: PathBuf,

    #[arg(long, env = "TASK_WASM", default_value = "build/task.wasm")]
    pub(crate) task_wasm: PathBuf,
}

/// Address and feed id of every supported stablecoin.
#[derive(Args, Debug, Clone, Default)]
pub(crate) struct TokenArgs {
    #[arg(long, env = "EURC_ADDRESS")]
    pub(crate) eurc_address: Option<String>,
    #[arg(long, env = "FEED_ID_EURC")]
    pub(crate) feed_id_eurc: Option<String>,
    #[arg(long, env = "EURCV_ADDRESS")]
    pub(crate) eurcv_address: Option<String>,
    #[arg(long, env = "FEED_ID_EURCV")]
    pub(crate) feed_id_eurcv: Option<String>,
    #[arg(long, env = "FDUSD_ADDRESS")]
    pub(crate) fdusd_address: Option<String>,
    #[arg(long, env = "FEED_ID_FDUSD")]
    pub(crate) feed_id_fdusd: Option<String>,
    #[arg(long, env = "GUSD_ADDRESS")]
    pub(crate) gusd_address: Option<String>,
    #[arg(long, env = "FEED_ID_GUSD")]
    pub(crate) feed_id_gusd: Option<String>,
    #[arg(long, env = "TUSD_ADDRESS")]
    pub(crate) tusd_address: Option<String>,
    #[arg(long, env = "FEED_ID_TUSD")]
    pub(crate) feed_id_tusd: Option<String>,
    #[arg(long, env = "USDE_ADDRESS")]
    pub(crate) usde_address: Option<String>,
    #[arg(long, env = "FEED_ID_USDE")]
    pub(crate) feed_id_usde: Option<String>,
    #[arg(long, env = "USDP_ADDRESS")]
    pub(crate) usdp_address: Option<String>,
    #[arg(long, env = "FEED_ID_USDP")]
    pub(crate) feed_id_usdp: Option<String>,
    #[arg(long, env = "DAI_ADDRESS")]
    pub(crate) dai_address: Option<String>,
    #[arg(long, env = "FEED_ID_DAI")]
    pub(crate) feed_id_dai: Option<String>,
    #[arg(long, env = "USDT_ADDRESS")]
    pub(crate) usdt_address: Option<String>,
    #[arg(long, env = "FEED_ID_USDT")]
    pub(crate) feed_id_usdt: Option<String>,
    #[arg(long, env = "USDC_ADDRESS")]
    pub(crate) usdc_address: Option<String>,
    #[arg(long, env = "FEED_ID_USDC")]
    pub(crate) feed_id_usdc: Option<String>,
}

impl TokenArgs {
    /// Configured `(address, feed id)` of `coin`.
    pub(crate) fn get(&self, coin: Stablecoin) -> (Option<&str>, Option<&str>) {
        let (address, feed_id) = match coin {
            Stablecoin::Eurc => (&self.eurc_address, &self.feed_id_eurc),
            Stablecoin::Eurcv => (&self.eurcv_address, &self.feed_id_eurcv),
            Stablecoin::Fdusd => (&self.fdusd_address, &self.feed_id_fdusd),
            Stablecoin::Gusd => (&self.gusd_address, &self.feed_id_gusd),
            Stablecoin::Tusd => (&self.tusd_address, &self.feed_id_tusd),
            Stablecoin::Usde => (&self.usde_address, &self.feed_id_usde),
            Stablecoin::Usdp => (&self.usdp_address, &self.feed_id_usdp),
            Stablecoin::Dai => (&self.dai_address, &self.feed_id_dai),
            Stablecoin::Usdt => (&self.usdt_address, &self.feed_id_usdt),
            Stablecoin::Usdc => (&self.usdc_address, &self.feed_id_usdc),
        };
        (non_empty(address), non_empty(feed_id))
    }
}

// Empty variables count as unset.
fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn required<'a>(value: &'a Option<String>, var: &str) -> Result<&'a str, ConfigError> {
    non_empty(value).ok_or_else(|| ConfigError::Missing(var.to_string()))
}

fn require_file(name: &'static str, path: &Path) -> Result<(), ConfigError> {
    if path.is_file() {
        Ok(())
    } else {
        Err(ConfigError::FileNotFound {
            name,
            path: path.to_path_buf(),
        })
    }
}

impl Config {
    pub(crate) fn ssa_oracle_address(&self) -> Result<&str, ConfigError> {
        required(&self.ssa_oracle_address, "SSA_ORACLE_ADDRESS")
    }

    pub(crate) fn sarm_hook_address(&self) -> Result<&str, ConfigError> {
        required(&self.sarm_hook_address, "SARM_HOOK_ADDRESS")
    }

    pub(crate) fn mimic_config_sig(&self) -> Result<&str, ConfigError> {
        required(&self.mimic_config_sig, "MIMIC_CONFIG_SIG")
    }

    pub(crate) fn mimic_api_key(&self) -> Option<&str> {
        non_empty(&self.mimic_api_key)
    }

    pub(crate) fn wallet_address(&self) -> Option<&str> {
        non_empty(&self.wallet_address)
    }

    /// The private key used for the wallet login.
    pub(crate) fn private_key(&self) -> Result<&str, ConfigError> {
        match (non_empty(&self.private_key), self.wallet_address()) {
            (Some(key), _) => Ok(key),
            (None, Some(_)) => Err(ConfigError::WalletWithoutKey),
            (None, None) => Err(ConfigError::Missing("PRIVATE_KEY".to_string())),
        }
    }

    pub(crate) fn has_private_key(&self) -> bool {
        non_empty(&self.private_key).is_some()
    }

    /// Every token in update order. All twenty variables must be set.
    pub(crate) fn token_descriptors(&self) -> Result<Vec<TokenDescriptor>, ConfigError> {
        Stablecoin::iter()
            .map(|coin| match self.tokens.get(coin) {
                (Some(address), Some(feed_id)) => {
                    Ok(TokenDescriptor::new(coin.to_string(), address, feed_id))
                }
                (None, _) => Err(ConfigError::Missing(coin.address_env())),
                (_, None) => Err(ConfigError::Missing(coin.feed_id_env())),
            })
            .collect()
    }

    /// Feed ids that are set, in update order.
    pub(crate) fn feed_ids(&self) -> Vec<String> {
        Stablecoin::iter()
            .filter_map(|coin| self.tokens.get(coin).1.map(str::to_string))
            .collect()
    }

    pub(crate) fn datalink_config(&self) -> Result<DataLinkConfig, ConfigError> {
        let user = required(&self.datalink_user, "DATALINK_USER")?;
        let secret = required(&self.datalink_secret, "DATALINK_SECRET")?;
        Ok(DataLinkConfig::new(user, secret).with_api_url(self.datalink_api_url.as_str()))
    }

    /// Checks everything a deployment needs before any request is made.
    pub(crate) fn validate_deploy(&self) -> Result<(), ConfigError> {
        self.ssa_oracle_address()?;
        self.sarm_hook_address()?;
        self.token_descriptors()?;
        require_file("manifest", &self.task_manifest)?;
        require_file("task wasm", &self.task_wasm)?;
        Ok(())
    }

    /// Task inputs carrying the configured tokens and the pre-fetched reports.
    pub(crate) fn task_inputs(&self, reports: Vec<Report>) -> Result<TaskInputs, ConfigError> {
        let mut inputs = TaskInputs::new(
            self.chain_id,
            self.ssa_oracle_address()?,
            self.datalink_api_url.as_str(),
        );
        inputs.sarm_hook_address = non_empty(&self.sarm_hook_address).map(str::to_string);
        for coin in Stablecoin::iter() {
            if let (Some(address), Some(feed_id)) = self.tokens.get(coin) {
                inputs.insert_token(coin, address, feed_id);
            }
        }
        inputs.reports = reports;
        Ok(inputs)
    }
}
