pub mod auth;
pub mod builder;
pub mod client;
pub mod constants;
pub mod errors;
pub(crate) mod http;
pub mod types;

pub use auth::{AuthError, LoginFlow};
pub use builder::MimicClientBuilder;
pub use client::{MimicAuth, MimicClient};
pub use errors::MimicError;
pub use types::{ConfigCreated, Execution, TaskConfig, TaskCreated, Trigger};
