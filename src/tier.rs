//! Tier codec: the public encode/decode surface.
//!
//! A tier state is three disjoint ordered lists of dataset indices. The
//! codec canonicalizes them into one full permutation of `0..N` plus two
//! cut sizes, ranks the permutation, and ships everything as a short
//! base64url fragment:
//!
//! ```text
//! [version:u8][k1:u16 BE][k2:u16 BE][rank bytes: big-endian, minimal]
//! ```
//!
//! `k3` is implicit (`N - k1 - k2`). N itself is never embedded; the
//! caller is responsible for knowing which dataset, and hence which N, a
//! fragment refers to.

use crate::bytes;
use crate::error::{CodecError, Result};
use crate::rank;
use std::fmt;

/// Wire format revision. Decoders reject any other value outright.
pub const FORMAT_VERSION: u8 = 1;

/// Hard ceiling on dataset size: cut sizes travel as 16-bit fields.
pub const MAX_ITEM_COUNT: u32 = u16::MAX as u32;

/// Optional prefix marking a fragment destined for a URL hash.
pub const FRAGMENT_MARKER: char = '#';

/// Fixed header length: version byte plus two 16-bit cut sizes.
const HEADER_LEN: usize = 5;

/// The three importance tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// Most important.
    Very,
    /// Somewhat important.
    Somewhat,
    /// Not important; also the remainder bucket for unlisted indices.
    Not,
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Tier::Very => "very",
            Tier::Somewhat => "somewhat",
            Tier::Not => "not",
        })
    }
}

/// A partition of dataset indices into three ordered importance tiers.
///
/// Indices absent from all three lists belong to an implicit remainder
/// group; encoding appends them to `not` in ascending order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TierState {
    /// Indices ranked "very important", in display order.
    pub very: Vec<u32>,
    /// Indices ranked "somewhat important", in display order.
    pub somewhat: Vec<u32>,
    /// Indices ranked "not important", in display order.
    pub not: Vec<u32>,
}

/// Validate the tier lists and return the canonical full permutation.
///
/// Position `i` of the returned occupancy scan has already checked range
/// and uniqueness; unlisted indices are appended to the `not` segment in
/// ascending order so that encoding is deterministic regardless of how
/// the caller grouped unlisted items.
fn canonical_permutation(state: &TierState, item_count: u32) -> Result<Vec<u32>> {
    let mut seen: Vec<Option<Tier>> = vec![None; item_count as usize];
    let lists = [
        (Tier::Very, &state.very),
        (Tier::Somewhat, &state.somewhat),
        (Tier::Not, &state.not),
    ];

    for (tier, list) in lists {
        for &index in list {
            if index >= item_count {
                return Err(CodecError::IndexOutOfRange { index, item_count });
            }
            match seen[index as usize] {
                Some(first) => {
                    return Err(CodecError::DuplicateIndex {
                        index,
                        first,
                        second: tier,
                    })
                }
                None => seen[index as usize] = Some(tier),
            }
        }
    }

    let mut perm = Vec::with_capacity(item_count as usize);
    perm.extend_from_slice(&state.very);
    perm.extend_from_slice(&state.somewhat);
    perm.extend_from_slice(&state.not);
    // Ascending by construction of the occupancy scan.
    perm.extend(
        seen.iter()
            .enumerate()
            .filter(|(_, tier)| tier.is_none())
            .map(|(index, _)| index as u32),
    );

    Ok(perm)
}

fn check_item_count(item_count: u32) -> Result<()> {
    if item_count == 0 || item_count > MAX_ITEM_COUNT {
        return Err(CodecError::InvalidItemCount(item_count));
    }
    Ok(())
}

/// Encode a tier state as a compact base64url fragment.
///
/// Validation fails loudly on out-of-range or duplicate indices; silent
/// correction would corrupt the user's ranking. With `with_marker` the
/// result is prefixed with [`FRAGMENT_MARKER`] for direct use as a URL
/// hash.
///
/// After canonicalization the permutation is `very ++ somewhat ++ not ++
/// remainder`, so round-tripping turns implicitly-unlisted indices into
/// explicit trailing `not` entries but preserves every explicit tier
/// element-for-element.
pub fn encode_tiers(state: &TierState, item_count: u32, with_marker: bool) -> Result<String> {
    check_item_count(item_count)?;

    let perm = canonical_permutation(state, item_count)?;
    // Disjoint in-range indices bound both lists by item_count <= 65535.
    let k1 = state.very.len() as u16;
    let k2 = state.somewhat.len() as u16;

    let rank = rank::rank_from_digits(&rank::digits_from_permutation(&perm)?);
    let rank_bytes = bytes::big_to_bytes(&rank);

    let mut buf = Vec::with_capacity(HEADER_LEN + rank_bytes.len());
    buf.push(FORMAT_VERSION);
    buf.extend_from_slice(&k1.to_be_bytes());
    buf.extend_from_slice(&k2.to_be_bytes());
    buf.extend_from_slice(&rank_bytes);

    let encoded = bytes::to_base64url(&buf);
    if with_marker {
        let mut fragment = String::with_capacity(encoded.len() + 1);
        fragment.push(FRAGMENT_MARKER);
        fragment.push_str(&encoded);
        Ok(fragment)
    } else {
        Ok(encoded)
    }
}

/// Decode a fragment produced by [`encode_tiers`] back into tier lists.
///
/// `item_count` must match the N the fragment was encoded with. A stale
/// or hand-edited fragment fails with a typed error rather than decoding
/// to a plausible-but-wrong ranking.
pub fn decode_tiers(fragment: &str, item_count: u32) -> Result<TierState> {
    check_item_count(item_count)?;

    let text = fragment.strip_prefix(FRAGMENT_MARKER).unwrap_or(fragment);
    let buf = bytes::from_base64url(text)?;

    if buf.len() < HEADER_LEN {
        return Err(CodecError::TruncatedFragment(buf.len()));
    }
    if buf[0] != FORMAT_VERSION {
        return Err(CodecError::UnsupportedVersion(buf[0]));
    }

    let k1 = bytes::read_u16_be(&buf, 1);
    let k2 = bytes::read_u16_be(&buf, 3);
    if u32::from(k1) + u32::from(k2) > item_count {
        return Err(CodecError::InvalidCutPoints {
            k1,
            k2,
            item_count,
        });
    }

    let rank = bytes::big_from_bytes(&buf[HEADER_LEN..]);
    let digits = rank::digits_from_rank(&rank, item_count)?;
    let perm = rank::permutation_from_digits(&digits)?;

    let cut1 = usize::from(k1);
    let cut2 = cut1 + usize::from(k2);
    Ok(TierState {
        very: perm[..cut1].to_vec(),
        somewhat: perm[cut1..cut2].to_vec(),
        not: perm[cut2..].to_vec(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_concrete_example() {
        // N=10, very=[3,1], somewhat=[7], not=[0]: indices 2,4,5,6,8,9
        // are unlisted and canonicalize onto the end of `not`.
        let state = TierState {
            very: vec![3, 1],
            somewhat: vec![7],
            not: vec![0],
        };

        let fragment = encode_tiers(&state, 10, false).unwrap();
        let decoded = decode_tiers(&fragment, 10).unwrap();

        assert_eq!(decoded.very, vec![3, 1]);
        assert_eq!(decoded.somewhat, vec![7]);
        assert_eq!(decoded.not, vec![0, 2, 4, 5, 6, 8, 9]);
    }

    #[test]
    fn test_exact_byte_layout() {
        // Same input as above: k1=2, k2=1, rank = 3*9! + 1*8! + 5*7!
        // = 1_154_160 = 0x119C70.
        let state = TierState {
            very: vec![3, 1],
            somewhat: vec![7],
            not: vec![0],
        };

        let fragment = encode_tiers(&state, 10, false).unwrap();
        let buf = bytes::from_base64url(&fragment).unwrap();
        assert_eq!(buf, vec![0x01, 0x00, 0x02, 0x00, 0x01, 0x11, 0x9C, 0x70]);
    }

    #[test]
    fn test_marker_prefix() {
        let state = TierState {
            very: vec![0],
            ..TierState::default()
        };

        let marked = encode_tiers(&state, 3, true).unwrap();
        let bare = encode_tiers(&state, 3, false).unwrap();
        assert_eq!(marked, format!("#{}", bare));

        // Decode accepts both forms.
        assert_eq!(
            decode_tiers(&marked, 3).unwrap(),
            decode_tiers(&bare, 3).unwrap()
        );
    }

    #[test]
    fn test_minimal_item_count() {
        let state = TierState {
            very: vec![0],
            ..TierState::default()
        };

        let fragment = encode_tiers(&state, 1, false).unwrap();
        // Header plus the single zero byte for rank 0.
        let buf = bytes::from_base64url(&fragment).unwrap();
        assert_eq!(buf, vec![0x01, 0x00, 0x01, 0x00, 0x00, 0x00]);

        let decoded = decode_tiers(&fragment, 1).unwrap();
        assert_eq!(decoded.very, vec![0]);
        assert!(decoded.somewhat.is_empty());
        assert!(decoded.not.is_empty());
    }

    #[test]
    fn test_max_item_count() {
        // All indices unlisted: identity permutation, rank 0, both cut
        // sizes at zero. Exercises the 16-bit size-field ceiling.
        let state = TierState::default();

        let fragment = encode_tiers(&state, MAX_ITEM_COUNT, false).unwrap();
        let decoded = decode_tiers(&fragment, MAX_ITEM_COUNT).unwrap();

        assert!(decoded.very.is_empty());
        assert!(decoded.somewhat.is_empty());
        assert_eq!(decoded.not.len(), MAX_ITEM_COUNT as usize);
        assert_eq!(decoded.not.first(), Some(&0));
        assert_eq!(decoded.not.last(), Some(&(MAX_ITEM_COUNT - 1)));
    }

    #[test]
    fn test_canonicalization_is_stable() {
        // Listing the remainder explicitly changes nothing.
        let implicit = TierState {
            very: vec![2],
            somewhat: vec![],
            not: vec![0],
        };
        let explicit = TierState {
            very: vec![2],
            somewhat: vec![],
            not: vec![0, 1],
        };

        assert_eq!(
            encode_tiers(&implicit, 3, false).unwrap(),
            encode_tiers(&explicit, 3, false).unwrap()
        );
    }

    #[test]
    fn test_rejects_zero_item_count() {
        let result = encode_tiers(&TierState::default(), 0, false);
        assert!(matches!(result, Err(CodecError::InvalidItemCount(0))));

        let result = decode_tiers("AQAAAAAA", 0);
        assert!(matches!(result, Err(CodecError::InvalidItemCount(0))));
    }

    #[test]
    fn test_rejects_oversized_item_count() {
        let result = encode_tiers(&TierState::default(), MAX_ITEM_COUNT + 1, false);
        assert!(matches!(result, Err(CodecError::InvalidItemCount(_))));
    }

    #[test]
    fn test_rejects_out_of_range_index() {
        let state = TierState {
            somewhat: vec![5],
            ..TierState::default()
        };

        let result = encode_tiers(&state, 5, false);
        assert!(matches!(
            result,
            Err(CodecError::IndexOutOfRange {
                index: 5,
                item_count: 5
            })
        ));
    }

    #[test]
    fn test_rejects_duplicate_across_lists() {
        let state = TierState {
            very: vec![1, 2],
            somewhat: vec![],
            not: vec![2],
        };

        let result = encode_tiers(&state, 4, false);
        assert!(matches!(
            result,
            Err(CodecError::DuplicateIndex {
                index: 2,
                first: Tier::Very,
                second: Tier::Not
            })
        ));
    }

    #[test]
    fn test_rejects_duplicate_within_list() {
        let state = TierState {
            very: vec![3, 3],
            ..TierState::default()
        };

        let result = encode_tiers(&state, 4, false);
        assert!(matches!(
            result,
            Err(CodecError::DuplicateIndex {
                index: 3,
                first: Tier::Very,
                second: Tier::Very
            })
        ));
    }

    #[test]
    fn test_rejects_unsupported_version() {
        let state = TierState {
            very: vec![1],
            ..TierState::default()
        };
        let fragment = encode_tiers(&state, 3, false).unwrap();

        let mut buf = bytes::from_base64url(&fragment).unwrap();
        buf[0] = 2;
        let tampered = bytes::to_base64url(&buf);

        let result = decode_tiers(&tampered, 3);
        assert!(matches!(result, Err(CodecError::UnsupportedVersion(2))));
    }

    #[test]
    fn test_rejects_inconsistent_cut_points() {
        // k1=3, k2=1 against N=3.
        let buf = [0x01, 0x00, 0x03, 0x00, 0x01, 0x00];
        let fragment = bytes::to_base64url(&buf);

        let result = decode_tiers(&fragment, 3);
        assert!(matches!(
            result,
            Err(CodecError::InvalidCutPoints {
                k1: 3,
                k2: 1,
                item_count: 3
            })
        ));
    }

    #[test]
    fn test_rejects_rank_out_of_range() {
        // Rank 6 = 3! is one past the last valid rank for N=3.
        let buf = [0x01, 0x00, 0x00, 0x00, 0x00, 0x06];
        let fragment = bytes::to_base64url(&buf);

        let result = decode_tiers(&fragment, 3);
        assert!(matches!(
            result,
            Err(CodecError::RankOutOfRange { item_count: 3 })
        ));
    }

    #[test]
    fn test_rejects_truncated_fragment() {
        let fragment = bytes::to_base64url(&[0x01, 0x00, 0x00]);
        let result = decode_tiers(&fragment, 3);
        assert!(matches!(result, Err(CodecError::TruncatedFragment(3))));
    }

    #[test]
    fn test_rejects_malformed_base64url() {
        let result = decode_tiers("#not base64!", 3);
        assert!(matches!(result, Err(CodecError::Base64(_))));
    }

    #[test]
    fn test_empty_payload_is_truncated_not_panic() {
        let result = decode_tiers("", 3);
        assert!(matches!(result, Err(CodecError::TruncatedFragment(0))));
    }

    #[test]
    fn test_bare_permutation_zero_cuts() {
        // Category-order reuse: both cut sizes zero, the whole ordering
        // rides in `not`.
        let state = TierState {
            not: vec![4, 0, 3, 1, 2],
            ..TierState::default()
        };

        let fragment = encode_tiers(&state, 5, false).unwrap();
        let decoded = decode_tiers(&fragment, 5).unwrap();

        assert!(decoded.very.is_empty());
        assert!(decoded.somewhat.is_empty());
        assert_eq!(decoded.not, vec![4, 0, 3, 1, 2]);
    }
}
