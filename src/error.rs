//! Error types for the tier codec.

use thiserror::Error;

use crate::tier::Tier;

/// Tier codec error types.
///
/// Encode-side variants (`InvalidItemCount`, `IndexOutOfRange`,
/// `DuplicateIndex`, `InvalidPermutation`) indicate caller bugs and are
/// raised before anything is serialized. Decode-side variants indicate
/// corrupted or foreign fragments; callers loading untrusted URL state
/// should catch these and fall back rather than trust a partial parse.
#[derive(Debug, Error)]
pub enum CodecError {
    /// Item count is outside the supported range `1..=65535`.
    #[error("item count {0} outside supported range 1..=65535")]
    InvalidItemCount(u32),
    /// A tier list references an index past the end of the dataset.
    #[error("index {index} out of range for {item_count} items")]
    IndexOutOfRange {
        /// The offending index.
        index: u32,
        /// Declared dataset size.
        item_count: u32,
    },
    /// The same index appears more than once across the tier lists.
    #[error("duplicate index {index}: listed in {first} and again in {second}")]
    DuplicateIndex {
        /// The offending index.
        index: u32,
        /// Tier holding the first occurrence.
        first: Tier,
        /// Tier holding the repeated occurrence.
        second: Tier,
    },
    /// Input sequence is not a permutation of `0..N`.
    #[error("input is not a valid permutation of 0..{0}")]
    InvalidPermutation(u32),
    /// Fragment text is not valid unpadded base64url.
    #[error("malformed base64url fragment: {0}")]
    Base64(#[from] base64::DecodeError),
    /// Decoded fragment is shorter than the fixed header.
    #[error("fragment too short: {0} bytes, header needs 5")]
    TruncatedFragment(usize),
    /// Fragment was produced by an unknown format revision.
    #[error("unsupported format version: {0}")]
    UnsupportedVersion(u8),
    /// Header cut points are inconsistent with the declared item count.
    #[error("invalid cut points: k1={k1} + k2={k2} exceeds {item_count} items")]
    InvalidCutPoints {
        /// Size of the first tier group.
        k1: u16,
        /// Size of the second tier group.
        k2: u16,
        /// Declared dataset size.
        item_count: u32,
    },
    /// Decoded rank is `>= N!` for the declared item count.
    #[error("rank out of range for {item_count} items")]
    RankOutOfRange {
        /// Declared dataset size.
        item_count: u32,
    },
    /// A Lehmer digit exceeds the number of elements left to place.
    #[error("lehmer digit {digit} out of range, {remaining} elements remaining")]
    DigitOutOfRange {
        /// The offending digit.
        digit: u32,
        /// Pool size when the digit was applied.
        remaining: usize,
    },
}

/// Result type alias.
pub type Result<T> = std::result::Result<T, CodecError>;
