//! Compact tier-partition encoding via permutation ranking.
//!
//! `tiercode` encodes a partition of N named items into three ordered
//! importance tiers ("very", "somewhat", "not", with an implicit
//! remainder) as a short URL-safe text fragment, and losslessly decodes
//! it back. The intended consumer is URL-hash state for a browser-based
//! ranking tool, where every byte of the fragment is visible to the user.
//!
//! # Method
//!
//! - The three tier lists are canonicalized into one full permutation of
//!   `0..N` plus two 16-bit cut sizes (unlisted indices land at the end
//!   of "not", ascending).
//! - The permutation is ranked through its Lehmer code into a single
//!   integer in `[0, N!)`, costing `log2(N!)` bits instead of the
//!   `N*log2(N)` bits of a naive index list.
//! - A 5-byte header (format version + cut sizes) plus the minimal
//!   big-endian rank bytes are base64url-encoded, no padding.
//!
//! Decoding reverses each step exactly, and rejects corrupted or foreign
//! fragments with typed errors instead of guessing.
//!
//! # Example
//!
//! ```rust
//! use tiercode::{decode_tiers, encode_tiers, TierState};
//!
//! let state = TierState {
//!     very: vec![3, 1],
//!     somewhat: vec![7],
//!     not: vec![0],
//! };
//!
//! // 10 items total; unlisted indices join "not" in ascending order.
//! let fragment = encode_tiers(&state, 10, true).unwrap();
//! let decoded = decode_tiers(&fragment, 10).unwrap();
//!
//! assert_eq!(decoded.very, vec![3, 1]);
//! assert_eq!(decoded.somewhat, vec![7]);
//! assert_eq!(decoded.not, vec![0, 2, 4, 5, 6, 8, 9]);
//! ```
//!
//! The codec is pure and stateless: no I/O, no shared mutable state, safe
//! to call concurrently without coordination.
//!
//! # References
//!
//! - Lehmer, D. H. (1960). "Teaching combinatorial tricks to a computer"
//! - Laisant, C.-A. (1888). "Sur la numération factorielle, application
//!   aux permutations"

#![warn(missing_docs)]
#![warn(clippy::all)]

mod bytes;
mod error;
pub mod rank;
mod tier;

pub use error::{CodecError, Result};
pub use tier::{
    decode_tiers, encode_tiers, Tier, TierState, FORMAT_VERSION, FRAGMENT_MARKER, MAX_ITEM_COUNT,
};
