use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub(crate) enum ConfigError {
    #[error("{0} is required, set it in the environment or the .env file")]
    Missing(String),
    #[error("{name} file not found: {}", path.display())]
    FileNotFound { name: &'static str, path: PathBuf },
    #[error("WALLET_ADDRESS alone cannot sign the login nonce, set PRIVATE_KEY")]
    WalletWithoutKey,
    #[error("either MIMIC_API_KEY or PRIVATE_KEY must be set")]
    MissingMimicAuth,
}
