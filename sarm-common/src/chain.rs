use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Base Sepolia. Not a chain of its own for the execution network.
pub const BASE_SEPOLIA_CHAIN_ID: u64 = 84532;

/// Networks the execution network can send intents to.
#[derive(
    Default, Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ChainTag {
    Ethereum,
    Optimism,
    #[default]
    Base,
    Arbitrum,
}

impl ChainTag {
    pub fn chain_id(self) -> u64 {
        match self {
            Self::Ethereum => 1,
            Self::Optimism => 10,
            Self::Base => 8453,
            Self::Arbitrum => 42161,
        }
    }
}

/// Outcome of [`resolve_chain`]. `fallback` is set when the numeric id was
/// unknown and the default tag was used instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainResolution {
    pub tag: ChainTag,
    pub fallback: bool,
}

/// Maps a numeric chain id to a [`ChainTag`].
///
/// Base Sepolia resolves to [`ChainTag::Base`] as an approximation. Unknown ids
/// also resolve to Base, with `fallback` set and a warning logged.
pub fn resolve_chain(numeric_id: u64) -> ChainResolution {
    let tag = match numeric_id {
        1 => Some(ChainTag::Ethereum),
        10 => Some(ChainTag::Optimism),
        8453 | BASE_SEPOLIA_CHAIN_ID => Some(ChainTag::Base),
        42161 => Some(ChainTag::Arbitrum),
        _ => None,
    };

    tag.map_or_else(
        || {
            tracing::warn!(
                chain_id = numeric_id,
                "unknown chain id {numeric_id}, using {}",
                ChainTag::default()
            );
            ChainResolution {
                tag: ChainTag::default(),
                fallback: true,
            }
        },
        |tag| ChainResolution {
            tag,
            fallback: false,
        },
    )
}

#[cfg(test)]
mod tests {
    use rstest::rstest;
    use tracing_test::traced_test;

    use super::*;

    #[rstest]
    #[case(1, ChainTag::Ethereum)]
    #[case(10, ChainTag::Optimism)]
    #[case(8453, ChainTag::Base)]
    #[case(42161, ChainTag::Arbitrum)]
    fn test_known_chains(#[case] id: u64, #[case] expected: ChainTag) {
        let resolution = resolve_chain(id);
        assert_eq!(resolution.tag, expected);
        assert!(!resolution.fallback);
        assert_eq!(resolution.tag.chain_id(), id);
    }

    #[rstest]
    fn test_base_sepolia_maps_to_base() {
        assert_eq!(resolve_chain(8453), resolve_chain(BASE_SEPOLIA_CHAIN_ID));
    }

    #[test]
    #[traced_test]
    fn test_unknown_chain_falls_back_to_base() {
        let resolution = resolve_chain(999_999);
        assert_eq!(resolution.tag, ChainTag::Base);
        assert!(resolution.fallback);
        assert!(logs_contain("unknown chain id 999999, using BASE"));
    }

    #[rstest]
    fn test_tag_serialization() {
        assert_eq!(serde_json::to_string(&ChainTag::Arbitrum).unwrap(), "\"ARBITRUM\"");
        assert_eq!("base".parse::<ChainTag>().unwrap(), ChainTag::Base);
    }
}
