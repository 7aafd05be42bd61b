pub mod abi;
pub mod chain;
pub mod inputs;
pub mod reports;
pub mod submit;
pub mod tracing;
pub mod types;
pub mod updates;

// Re-export the types every consumer of the core needs.
pub use chain::{ChainResolution, ChainTag, resolve_chain};
pub use reports::find_report;
pub use types::{
    CallIntent, Denomination, Report, Stablecoin, TokenAmount, TokenDescriptor,
    intent::{MAX_FEE_USD, REFRESH_RATING_SIGNATURE},
};
pub use updates::{UpdateError, run_updates, run_updates_and_submit};
