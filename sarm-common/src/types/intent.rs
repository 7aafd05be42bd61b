use alloy_primitives::{Address, Bytes};
use bigdecimal::{BigDecimal, num_bigint::BigInt};
use serde::{Deserialize, Serialize};
use strum::Display;

use crate::chain::ChainTag;

/// Oracle adapter entrypoint every intent calls.
pub const REFRESH_RATING_SIGNATURE: &str = "refreshRatingWithReport(address,bytes)";

/// Maximum fee of a single rating refresh, in USD.
pub const MAX_FEE_USD: &str = "0.25";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum Denomination {
    #[serde(rename = "USD")]
    #[strum(serialize = "USD")]
    Usd,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAmount {
    pub amount: BigDecimal,
    pub denomination: Denomination,
}

impl TokenAmount {
    /// 0.25 USD, the fee cap attached to every refresh intent.
    pub fn refresh_fee() -> Self {
        Self {
            amount: BigDecimal::new(BigInt::from(25), 2),
            denomination: Denomination::Usd,
        }
    }
}

impl std::fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.denomination)
    }
}

/// A contract call the execution network is asked to perform.
///
/// Intents are built per token and per run, then handed to an
/// [`IntentSubmitter`](crate::submit::IntentSubmitter). They are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallIntent {
    pub chain: ChainTag,
    pub target: Address,
    pub data: Bytes,
    pub max_fee: TokenAmount,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_refresh_fee_matches_constant() {
        let fee = TokenAmount::refresh_fee();
        assert_eq!(fee.amount, BigDecimal::from_str(MAX_FEE_USD).unwrap());
        assert_eq!(fee.to_string(), "0.25 USD");
    }
}
