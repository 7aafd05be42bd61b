use alloy_primitives::Address;
use tracing::{info, warn};

use crate::{
    abi::{EncodingError, encode_refresh_rating, parse_address},
    chain::resolve_chain,
    reports::find_report,
    submit::{IntentAck, IntentSubmitter, SubmitError},
    types::{CallIntent, Report, TokenAmount, TokenDescriptor},
};

#[derive(Debug, thiserror::Error)]
pub enum UpdateError {
    /// A configured value could not be encoded. This is a configuration
    /// defect, the whole run stops.
    #[error("invalid encoding ({context}): {source}")]
    InvalidEncoding {
        context: String,
        #[source]
        source: EncodingError,
    },
    #[error(transparent)]
    Submit(#[from] SubmitError),
}

/// Builds one `refreshRatingWithReport` intent per token that has a report.
///
/// Tokens without a report are logged and skipped. An encoding failure on any
/// token aborts the run, no partial result is returned.
pub fn run_updates(
    tokens: &[TokenDescriptor],
    reports: &[Report],
    chain_id: u64,
    oracle_address: &str,
) -> Result<Vec<CallIntent>, UpdateError> {
    if reports.is_empty() {
        warn!("no reports in inputs, skipping execution");
        return Ok(Vec::new());
    }

    let target =
        parse_address(oracle_address, "oracle address").map_err(|source| {
            UpdateError::InvalidEncoding {
                context: "oracle address".to_string(),
                source,
            }
        })?;

    info!("using {} pre-fetched reports", reports.len());

    let mut intents = Vec::with_capacity(tokens.len());
    for token in tokens {
        if let Some(intent) = build_intent(token, reports, chain_id, target)? {
            intents.push(intent);
        }
    }

    info!(
        created = intents.len(),
        skipped = tokens.len() - intents.len(),
        "rating refresh completed"
    );
    Ok(intents)
}

/// Same as [`run_updates`], then hands every intent to `submitter`.
///
/// Nothing is submitted if building any intent fails.
pub fn run_updates_and_submit<S: IntentSubmitter>(
    tokens: &[TokenDescriptor],
    reports: &[Report],
    chain_id: u64,
    oracle_address: &str,
    submitter: &mut S,
) -> Result<Vec<IntentAck>, UpdateError> {
    let intents = run_updates(tokens, reports, chain_id, oracle_address)?;
    intents
        .iter()
        .map(|intent| submitter.submit(intent).map_err(UpdateError::from))
        .collect()
}

#[tracing::instrument(skip_all, fields(token = %token.name))]
fn build_intent(
    token: &TokenDescriptor,
    reports: &[Report],
    chain_id: u64,
    target: Address,
) -> Result<Option<CallIntent>, UpdateError> {
    let Some(report) = find_report(reports, &token.feed_id).filter(|r| r.has_payload()) else {
        warn!(
            feed_id = %token.feed_id,
            "no report found for {}, skipping", token.name
        );
        return Ok(None);
    };

    info!(
        valid_from = %report.valid_from(),
        observations = %report.observed_at(),
        "report found for {}", token.name
    );

    let data = encode_refresh_rating(&token.address, &report.full_report).map_err(|source| {
        UpdateError::InvalidEncoding {
            context: format!("{} (feed {})", token.name, token.feed_id),
            source,
        }
    })?;

    let chain = resolve_chain(chain_id);
    if chain.fallback {
        warn!("{} intent targets {} by fallback", token.name, chain.tag);
    }

    let intent = CallIntent {
        chain: chain.tag,
        target,
        data,
        max_fee: TokenAmount::refresh_fee(),
    };
    info!("intent created for {} rating update", token.name);
    Ok(Some(intent))
}
