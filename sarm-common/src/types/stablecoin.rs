use strum::{Display, EnumIter, EnumString};

/// The stablecoins whose SSA rating is refreshed, in update order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum Stablecoin {
    Eurc,
    Eurcv,
    Fdusd,
    Gusd,
    Tusd,
    #[strum(serialize = "USDe")]
    Usde,
    Usdp,
    Dai,
    Usdt,
    Usdc,
}

impl Stablecoin {
    /// Symbol as used in environment variable names, e.g. `USDE`.
    pub fn env_prefix(self) -> String {
        self.to_string().to_uppercase()
    }

    /// e.g. `EURC_ADDRESS`
    pub fn address_env(self) -> String {
        format!("{}_ADDRESS", self.env_prefix())
    }

    /// e.g. `FEED_ID_EURC`
    pub fn feed_id_env(self) -> String {
        format!("FEED_ID_{}", self.env_prefix())
    }

    /// Key of the token address in the task inputs, e.g. `eurcAddress`.
    pub fn address_input_key(self) -> String {
        format!("{}Address", self.env_prefix().to_lowercase())
    }

    /// Key of the feed id in the task inputs, e.g. `feedIdEurc`.
    pub fn feed_id_input_key(self) -> String {
        let lower = self.env_prefix().to_lowercase();
        let mut chars = lower.chars();
        let capitalized = chars.next().map_or_else(String::new, |first| {
            first.to_ascii_uppercase().to_string() + chars.as_str()
        });
        format!("feedId{capitalized}")
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use rstest::rstest;
    use strum::IntoEnumIterator;

    use super::*;

    #[rstest]
    fn test_table_order() {
        let names: Vec<String> = Stablecoin::iter().map(|s| s.to_string()).collect();
        assert_eq!(
            names,
            vec![
                "EURC", "EURCV", "FDUSD", "GUSD", "TUSD", "USDe", "USDP", "DAI", "USDT", "USDC"
            ]
        );
    }

    #[rstest]
    #[case(Stablecoin::Eurc, "EURC_ADDRESS", "FEED_ID_EURC", "eurcAddress", "feedIdEurc")]
    #[case(Stablecoin::Eurcv, "EURCV_ADDRESS", "FEED_ID_EURCV", "eurcvAddress", "feedIdEurcv")]
    #[case(Stablecoin::Usde, "USDE_ADDRESS", "FEED_ID_USDE", "usdeAddress", "feedIdUsde")]
    #[case(Stablecoin::Dai, "DAI_ADDRESS", "FEED_ID_DAI", "daiAddress", "feedIdDai")]
    fn test_keys(
        #[case] coin: Stablecoin,
        #[case] address_env: &str,
        #[case] feed_env: &str,
        #[case] address_key: &str,
        #[case] feed_key: &str,
    ) {
        assert_eq!(coin.address_env(), address_env);
        assert_eq!(coin.feed_id_env(), feed_env);
        assert_eq!(coin.address_input_key(), address_key);
        assert_eq!(coin.feed_id_input_key(), feed_key);
    }

    #[rstest]
    #[case("usde", Stablecoin::Usde)]
    #[case("USDe", Stablecoin::Usde)]
    #[case("fdusd", Stablecoin::Fdusd)]
    fn test_parse_symbol(#[case] raw: &str, #[case] expected: Stablecoin) {
        assert_eq!(Stablecoin::from_str(raw).unwrap(), expected);
    }
}
