//! Hex encoding used on the Ethereum JSON-RPC wire.
//!
//! Two shapes exist:
//! ```text
//! QUANTITY  "0x" + minimal lowercase hex, zero is "0x0"     e.g. 0x5208
//! DATA      "0x" + two hex digits per byte, may be empty    e.g. 0x48656c6c6f
//! ```

use crate::config::WEI_PER_ETHER;
use crate::error::RpcError;

/// Largest quantity we decode (u128 holds 32 hex digits).
const MAX_QUANTITY_DIGITS: usize = 32;

/// Encode an integer as a QUANTITY.
pub fn encode_quantity(value: u128) -> String {
    format!("{value:#x}")
}

/// Decode a QUANTITY. Accepts an optional `0x` prefix and leading zeros.
pub fn decode_quantity(s: &str) -> Result<u128, RpcError> {
    let digits = strip_0x(s);
    if digits.is_empty() {
        return Err(RpcError::Decode(format!("empty quantity {s:?}")));
    }
    let significant = digits.trim_start_matches('0');
    if significant.len() > MAX_QUANTITY_DIGITS {
        return Err(RpcError::Decode(format!("quantity {s:?} exceeds 128 bits")));
    }
    if significant.is_empty() {
        return Ok(0);
    }
    u128::from_str_radix(significant, 16)
        .map_err(|e| RpcError::Decode(format!("bad quantity {s:?}: {e}")))
}

/// Decode a QUANTITY that must fit in 64 bits (block numbers, nonces, chain ids).
pub fn decode_u64(s: &str) -> Result<u64, RpcError> {
    let v = decode_quantity(s)?;
    u64::try_from(v).map_err(|_| RpcError::Decode(format!("quantity {s:?} exceeds 64 bits")))
}

/// Encode bytes as DATA.
pub fn encode_data(bytes: &[u8]) -> String {
    format!("0x{}", hex::encode(bytes))
}

/// Decode DATA into bytes.
pub fn decode_data(s: &str) -> Result<Vec<u8>, RpcError> {
    hex::decode(strip_0x(s)).map_err(|e| RpcError::Decode(format!("bad data {s:?}: {e}")))
}

/// Decode a 20-byte address.
pub fn decode_address(s: &str) -> Result<[u8; 20], RpcError> {
    let bytes = decode_data(s)?;
    <[u8; 20]>::try_from(bytes.as_slice())
        .map_err(|_| RpcError::Decode(format!("address {s:?} is not 20 bytes")))
}

/// UTF-8 text as DATA.
pub fn text_to_data(text: &str) -> String {
    encode_data(text.as_bytes())
}

/// Wei to ether, for display only.
pub fn wei_to_ether(wei: u128) -> f64 {
    wei as f64 / WEI_PER_ETHER as f64
}

pub(crate) fn strip_0x(s: &str) -> &str {
    s.strip_prefix("0x")
        .or_else(|| s.strip_prefix("0X"))
        .unwrap_or(s)
}
