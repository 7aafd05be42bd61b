pub mod builder;
pub mod client;
pub mod config;
pub(crate) mod constants;

pub use builder::{BuilderError, DataLinkClientBuilder};
pub use client::{DataLinkClient, DataLinkError};
pub use config::DataLinkConfig;
pub use constants::DEFAULT_DATALINK_API_URL;
