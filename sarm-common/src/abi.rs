use std::str::FromStr;

use alloy_primitives::{Address, Bytes, U256, hex, keccak256};

use crate::types::intent::REFRESH_RATING_SIGNATURE;

const WORD_SIZE: usize = 32;
const ADDRESS_SIZE: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncodingError {
    #[error("invalid encoding for {field}: {reason}")]
    InvalidEncoding { field: String, reason: String },
    #[error("malformed function signature `{0}`")]
    InvalidSignature(String),
    #[error("unsupported abi type `{0}`")]
    UnsupportedType(String),
}

impl EncodingError {
    fn invalid(field: &str, reason: impl Into<String>) -> Self {
        Self::InvalidEncoding {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

/// The subset of Solidity types the encoder understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbiKind {
    Address,
    Bool,
    /// `uint<bits>`
    Uint(usize),
    /// `bytes<len>`
    FixedBytes(usize),
    Bytes,
    String,
}

impl AbiKind {
    pub const fn is_dynamic(self) -> bool {
        matches!(self, Self::Bytes | Self::String)
    }
}

impl FromStr for AbiKind {
    type Err = EncodingError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let unsupported = || EncodingError::UnsupportedType(raw.to_string());
        match raw {
            "address" => return Ok(Self::Address),
            "bool" => return Ok(Self::Bool),
            "bytes" => return Ok(Self::Bytes),
            "string" => return Ok(Self::String),
            "uint" => return Ok(Self::Uint(256)),
            _ => {}
        }

        if let Some(bits) = raw.strip_prefix("uint") {
            let bits: usize = bits.parse().map_err(|_| unsupported())?;
            if bits == 0 || bits > 256 || bits % 8 != 0 {
                return Err(unsupported());
            }
            return Ok(Self::Uint(bits));
        }
        if let Some(len) = raw.strip_prefix("bytes") {
            let len: usize = len.parse().map_err(|_| unsupported())?;
            if !(1..=WORD_SIZE).contains(&len) {
                return Err(unsupported());
            }
            return Ok(Self::FixedBytes(len));
        }
        Err(unsupported())
    }
}

impl std::fmt::Display for AbiKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Address => f.write_str("address"),
            Self::Bool => f.write_str("bool"),
            Self::Uint(bits) => write!(f, "uint{bits}"),
            Self::FixedBytes(len) => write!(f, "bytes{len}"),
            Self::Bytes => f.write_str("bytes"),
            Self::String => f.write_str("string"),
        }
    }
}

/// One positional argument of a call: its declared type and its textual value
/// (hex for addresses and byte strings, decimal or hex for integers).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbiArg {
    pub kind: AbiKind,
    pub value: String,
}

impl AbiArg {
    pub fn new(kind: AbiKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    pub fn address(value: impl Into<String>) -> Self {
        Self::new(AbiKind::Address, value)
    }

    pub fn bytes(value: impl Into<String>) -> Self {
        Self::new(AbiKind::Bytes, value)
    }
}

/// First four bytes of the keccak-256 hash of the signature.
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = keccak256(signature.as_bytes());
    [hash[0], hash[1], hash[2], hash[3]]
}

/// Builds the calldata `selector ‖ abi_encode(args)` for `signature`.
///
/// The signature must be canonical (`name(type1,type2)`, no spaces, no
/// aliases like `uint`) since the selector is hashed from it verbatim. The
/// argument kinds must match the declared parameter types one to one.
pub fn encode_call(signature: &str, args: &[AbiArg]) -> Result<Bytes, EncodingError> {
    let declared = parse_signature(signature)?;
    if declared.len() != args.len() {
        return Err(EncodingError::invalid(
            "arguments",
            format!(
                "{signature} expects {} arguments, got {}",
                declared.len(),
                args.len()
            ),
        ));
    }
    for (index, (kind, arg)) in declared.iter().zip(args).enumerate() {
        if *kind != arg.kind {
            return Err(EncodingError::invalid(
                &format!("arg[{index}]"),
                format!("declared as {kind}, got {}", arg.kind),
            ));
        }
    }

    let encoded = encode_params(args)?;
    let mut calldata = Vec::with_capacity(4 + encoded.len());
    calldata.extend_from_slice(&selector(signature));
    calldata.extend_from_slice(&encoded);
    Ok(Bytes::from(calldata))
}

/// Calldata for `refreshRatingWithReport(address,bytes)`.
pub fn encode_refresh_rating(token_address: &str, full_report: &str) -> Result<Bytes, EncodingError> {
    encode_call(
        REFRESH_RATING_SIGNATURE,
        &[AbiArg::address(token_address), AbiArg::bytes(full_report)],
    )
}

/// Parses a 20-byte hex address with the same strictness as call encoding.
pub fn parse_address(value: &str, field: &str) -> Result<Address, EncodingError> {
    let raw = decode_hex(value, field)?;
    if raw.len() != ADDRESS_SIZE {
        return Err(EncodingError::invalid(
            field,
            format!("address must be 20 bytes, got {}", raw.len()),
        ));
    }
    Ok(Address::from_slice(&raw))
}

fn parse_signature(signature: &str) -> Result<Vec<AbiKind>, EncodingError> {
    let malformed = || EncodingError::InvalidSignature(signature.to_string());

    let (name, rest) = signature.split_once('(').ok_or_else(malformed)?;
    let params = rest.strip_suffix(')').ok_or_else(malformed)?;
    let name_is_valid = name
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !name_is_valid || params.contains(['(', ')', ' ']) {
        return Err(malformed());
    }
    if params.is_empty() {
        return Ok(Vec::new());
    }

    params
        .split(',')
        .map(|raw| {
            let kind = AbiKind::from_str(raw)?;
            if kind.to_string() != raw {
                // `uint` hashes differently from `uint256`.
                return Err(malformed());
            }
            Ok(kind)
        })
        .collect()
}

/// Head/tail layout: static values sit in the head, dynamic ones leave an
/// offset word there and append `len ‖ data ‖ padding` to the tail.
fn encode_params(args: &[AbiArg]) -> Result<Vec<u8>, EncodingError> {
    let head_size = args.len() * WORD_SIZE;
    let mut head = Vec::with_capacity(head_size);
    let mut tail = Vec::new();

    for (index, arg) in args.iter().enumerate() {
        let field = format!("arg[{index}]");
        if arg.kind.is_dynamic() {
            let offset = head_size + tail.len();
            head.extend_from_slice(&u256_word(U256::from(offset)));
            tail.extend_from_slice(&encode_dynamic(arg, &field)?);
        } else {
            head.extend_from_slice(&encode_static(arg, &field)?);
        }
    }

    head.extend_from_slice(&tail);
    Ok(head)
}

fn encode_static(arg: &AbiArg, field: &str) -> Result<[u8; WORD_SIZE], EncodingError> {
    let mut word = [0u8; WORD_SIZE];
    match arg.kind {
        AbiKind::Address => {
            let address = parse_address(&arg.value, field)?;
            word[WORD_SIZE - ADDRESS_SIZE..].copy_from_slice(address.as_slice());
        }
        AbiKind::Bool => {
            word[31] = match arg.value.as_str() {
                "true" => 1,
                "false" => 0,
                other => {
                    return Err(EncodingError::invalid(
                        field,
                        format!("`{other}` is not a bool"),
                    ));
                }
            };
        }
        AbiKind::Uint(bits) => {
            let value = U256::from_str(&arg.value)
                .map_err(|e| EncodingError::invalid(field, e.to_string()))?;
            if value.bit_len() > bits {
                return Err(EncodingError::invalid(
                    field,
                    format!("{value} does not fit in uint{bits}"),
                ));
            }
            word = value.to_be_bytes::<WORD_SIZE>();
        }
        AbiKind::FixedBytes(len) => {
            let raw = decode_hex(&arg.value, field)?;
            if raw.len() != len {
                return Err(EncodingError::invalid(
                    field,
                    format!("bytes{len} needs {len} bytes, got {}", raw.len()),
                ));
            }
            word[..len].copy_from_slice(&raw);
        }
        AbiKind::Bytes | AbiKind::String => {
            return Err(EncodingError::invalid(field, "dynamic value in static slot"));
        }
    }
    Ok(word)
}

fn encode_dynamic(arg: &AbiArg, field: &str) -> Result<Vec<u8>, EncodingError> {
    let payload = match arg.kind {
        AbiKind::Bytes => decode_hex(&arg.value, field)?,
        AbiKind::String => arg.value.as_bytes().to_vec(),
        _ => return Err(EncodingError::invalid(field, "static value in dynamic slot")),
    };

    let padding = (WORD_SIZE - payload.len() % WORD_SIZE) % WORD_SIZE;
    let mut out = Vec::with_capacity(WORD_SIZE + payload.len() + padding);
    out.extend_from_slice(&u256_word(U256::from(payload.len())));
    out.extend_from_slice(&payload);
    out.resize(out.len() + padding, 0);
    Ok(out)
}

/// Strict hex decoding: odd lengths and non-hex characters are rejected,
/// never truncated. The `0x` prefix is optional.
fn decode_hex(value: &str, field: &str) -> Result<Vec<u8>, EncodingError> {
    let digits = value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
        .unwrap_or(value);
    // `hex::decode` strips a further `0x` on its own.
    if let Some(bad) = digits.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(EncodingError::invalid(
            field,
            format!("`{value}`: invalid character {bad:?}"),
        ));
    }
    hex::decode(digits).map_err(|e| EncodingError::invalid(field, format!("`{value}`: {e}")))
}

fn u256_word(value: U256) -> [u8; WORD_SIZE] {
    value.to_be_bytes::<WORD_SIZE>()
}

#[cfg(test)]
mod tests {
    use alloy_sol_types::{SolCall, sol};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    sol! {
        function refreshRatingWithReport(address tokenAddress, bytes report);
        function transfer(address to, uint256 amount);
        function annotate(bytes blob, string label, bool flag, bytes4 tag, uint8 level);
    }

    const TOKEN: &str = "0xaAaAaAaaAaAaAaaAaAAAAAAAAaaaAaAaAaaAaaAa";

    #[rstest]
    fn test_selector_matches_reference() {
        assert_eq!(
            selector(REFRESH_RATING_SIGNATURE),
            refreshRatingWithReportCall::SELECTOR
        );
        assert_eq!(selector("transfer(address,uint256)"), [0xa9, 0x05, 0x9c, 0xbb]);
    }

    #[rstest]
    fn test_refresh_rating_layout() {
        let data = encode_refresh_rating(TOKEN, "0xdeadbeef").unwrap();

        assert_eq!(data.len(), 4 + 4 * WORD_SIZE);
        assert_eq!(&data[..4], &selector(REFRESH_RATING_SIGNATURE));
        // address, left padded
        assert_eq!(&data[4..16], &[0u8; 12]);
        assert_eq!(&data[16..36], &[0xaa; 20]);
        // offset of the bytes tail
        assert_eq!(data[67], 0x40);
        // length then payload, right padded
        assert_eq!(data[99], 4);
        assert_eq!(&data[100..104], &[0xde, 0xad, 0xbe, 0xef]);
        assert!(data[104..].iter().all(|b| *b == 0));
    }

    #[rstest]
    #[case("0xdeadbeef")]
    #[case("0x")]
    #[case("0x00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff")]
    #[case("0x00112233445566778899aabbccddeeff00112233445566778899aabbccddeeff01")]
    fn test_refresh_rating_matches_reference(#[case] report: &str) {
        let expected = refreshRatingWithReportCall {
            tokenAddress: Address::from_str(TOKEN).unwrap(),
            report: Bytes::from_str(report).unwrap(),
        }
        .abi_encode();

        let data = encode_refresh_rating(TOKEN, report).unwrap();
        assert_eq!(data.to_vec(), expected);
    }

    #[rstest]
    fn test_static_types_match_reference() {
        let expected = transferCall {
            to: Address::from_str(TOKEN).unwrap(),
            amount: U256::from(1_000_000u64),
        }
        .abi_encode();

        let data = encode_call(
            "transfer(address,uint256)",
            &[
                AbiArg::address(TOKEN),
                AbiArg::new(AbiKind::Uint(256), "1000000"),
            ],
        )
        .unwrap();
        assert_eq!(data.to_vec(), expected);
    }

    #[rstest]
    fn test_mixed_dynamic_types_match_reference() {
        let expected = annotateCall {
            blob: Bytes::from_static(&[0x01, 0x02, 0x03]),
            label: "SSA rating".to_string(),
            flag: true,
            tag: [0xca, 0xfe, 0xba, 0xbe].into(),
            level: 5,
        }
        .abi_encode();

        let data = encode_call(
            "annotate(bytes,string,bool,bytes4,uint8)",
            &[
                AbiArg::bytes("0x010203"),
                AbiArg::new(AbiKind::String, "SSA rating"),
                AbiArg::new(AbiKind::Bool, "true"),
                AbiArg::new(AbiKind::FixedBytes(4), "0xcafebabe"),
                AbiArg::new(AbiKind::Uint(8), "0x05"),
            ],
        )
        .unwrap();
        assert_eq!(data.to_vec(), expected);
    }

    #[rstest]
    fn test_encoding_is_deterministic() {
        let first = encode_refresh_rating(TOKEN, "0xdeadbeef").unwrap();
        let second = encode_refresh_rating(TOKEN, "0xdeadbeef").unwrap();
        assert_eq!(first, second);
    }

    #[rstest]
    #[case::odd_length_report(TOKEN, "0xabc")]
    #[case::bad_char_report(TOKEN, "0xzz")]
    #[case::odd_length_address("0xaaa", "0xdeadbeef")]
    #[case::short_address("0xaaaa", "0xdeadbeef")]
    #[case::empty_address("", "0xdeadbeef")]
    #[case::double_prefix_report(TOKEN, "0x0xdeadbeef")]
    #[case::double_prefix_upper_report(TOKEN, "0X0xdeadbeef")]
    #[case::double_prefix_address("0x0xaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa", "0xdeadbeef")]
    fn test_malformed_hex_is_rejected(#[case] token: &str, #[case] report: &str) {
        let err = encode_refresh_rating(token, report).unwrap_err();
        assert!(matches!(err, EncodingError::InvalidEncoding { .. }), "{err}");
    }

    #[rstest]
    #[case("0x0x00000000000000000000000000000000000000aa")]
    #[case("0X0x00000000000000000000000000000000000000aa")]
    fn test_double_prefixed_address_is_rejected(#[case] value: &str) {
        let err = parse_address(value, "oracle address").unwrap_err();
        assert!(matches!(err, EncodingError::InvalidEncoding { .. }), "{err}");
    }

    #[rstest]
    fn test_argument_kinds_must_match_signature() {
        let swapped = encode_call(
            REFRESH_RATING_SIGNATURE,
            &[AbiArg::bytes("0xdeadbeef"), AbiArg::address(TOKEN)],
        );
        assert!(matches!(swapped, Err(EncodingError::InvalidEncoding { .. })));

        let missing = encode_call(REFRESH_RATING_SIGNATURE, &[AbiArg::address(TOKEN)]);
        assert!(matches!(missing, Err(EncodingError::InvalidEncoding { .. })));
    }

    #[rstest]
    fn test_uint_overflow_is_rejected() {
        let err = encode_call("level(uint8)", &[AbiArg::new(AbiKind::Uint(8), "256")]);
        assert!(matches!(err, Err(EncodingError::InvalidEncoding { .. })));
    }

    #[rstest]
    #[case("refreshRatingWithReport(address, bytes)")]
    #[case("refreshRatingWithReport(address,bytes")]
    #[case("(address,bytes)")]
    #[case("transfer(address,uint)")]
    fn test_malformed_signature(#[case] signature: &str) {
        assert!(matches!(
            parse_signature(signature),
            Err(EncodingError::InvalidSignature(_))
        ));
    }

    #[rstest]
    #[case("int256")]
    #[case("uint7")]
    #[case("bytes33")]
    #[case("address[]")]
    fn test_unsupported_types(#[case] raw: &str) {
        assert!(matches!(
            AbiKind::from_str(raw),
            Err(EncodingError::UnsupportedType(_))
        ));
    }

    #[rstest]
    fn test_empty_parameter_list() {
        let data = encode_call("pause()", &[]).unwrap();
        assert_eq!(data.to_vec(), selector("pause()").to_vec());
    }
}
