use alloy::hex;
use alloy::primitives::{Address, B256, U256};
use anyhow::{anyhow, bail};
use bigdecimal::{BigDecimal, ToPrimitive};
use std::str::FromStr;

/// Converts an ETH amount to wei as a `U256`.
/// Returns an error if the value is too large to fit in a `u128`.
pub fn eth_to_wei(eth: BigDecimal) -> anyhow::Result<U256> {
    let wei = (eth * BigDecimal::from(1_000_000_000_000_000_000u128))
        .to_u128()
        .ok_or_else(|| anyhow!("Value too large"))?;
    Ok(U256::from(wei))
}

/// Converts a wei amount (`U256`) to ETH as a `BigDecimal`.
pub fn wei_to_eth(wei: U256) -> BigDecimal {
    // U256 always prints as a plain decimal integer.
    BigDecimal::from_str(&wei.to_string()).unwrap_or_default()
        / BigDecimal::from(1_000_000_000_000_000_000u128)
}

/// Strips a leading `0x` from a hex string, unless nothing would be left after it.
pub fn strip_hex_prefix(s: &str) -> &str {
    match s.strip_prefix("0x") {
        Some(rest) if !rest.is_empty() => rest,
        _ => s,
    }
}

/// Decodes a `0x`-prefixed hex string. `"0x"` decodes to an empty byte vector.
pub fn decode_prefixed_hex(s: &str) -> anyhow::Result<Vec<u8>> {
    if s.is_empty() {
        bail!("empty hex string");
    }
    let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) else {
        bail!("hex string without 0x prefix");
    };
    if digits.len() % 2 != 0 {
        bail!("hex string of odd length");
    }
    hex::decode(digits).map_err(|e| anyhow!("invalid hex string: {e}"))
}

/// Parses a hex encoded address.
pub fn parse_address(s: &str) -> anyhow::Result<Address> {
    Address::from_str(s).map_err(|e| anyhow!("Invalid address {s:?}: {e}"))
}

/// Parses a hex encoded 32-byte hash.
pub fn parse_hash(s: &str) -> anyhow::Result<B256> {
    B256::from_str(s).map_err(|e| anyhow!("Invalid hash {s:?}: {e}"))
}
