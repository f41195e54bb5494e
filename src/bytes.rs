//! Byte and text primitives: big-integer serialization and base64url.
//!
//! Everything here is a deterministic, platform-independent pure function.
//! Ranks travel as minimal big-endian byte strings (no superfluous leading
//! zeros; the value zero is a single zero byte), then as unpadded URL-safe
//! base64 text suitable for a location fragment.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use num_bigint::BigUint;

use crate::error::Result;

/// Minimal big-endian byte representation of a non-negative integer.
///
/// Always at least one byte: zero encodes as `[0x00]`.
pub(crate) fn big_to_bytes(value: &BigUint) -> Vec<u8> {
    // BigUint::to_bytes_be already yields [0] for zero and no leading
    // zero bytes otherwise.
    value.to_bytes_be()
}

/// Reconstruct a non-negative integer from big-endian bytes.
///
/// Accepts any length including zero (empty slice decodes to 0).
pub(crate) fn big_from_bytes(bytes: &[u8]) -> BigUint {
    BigUint::from_bytes_be(bytes)
}

/// Read a big-endian `u16` field at `pos`. Callers check bounds.
pub(crate) fn read_u16_be(bytes: &[u8], pos: usize) -> u16 {
    u16::from_be_bytes([bytes[pos], bytes[pos + 1]])
}

/// Encode bytes as unpadded URL-safe base64.
pub(crate) fn to_base64url(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}

/// Decode unpadded URL-safe base64 text back to bytes.
pub(crate) fn from_base64url(text: &str) -> Result<Vec<u8>> {
    Ok(URL_SAFE_NO_PAD.decode(text)?)
}
