//! Lehmer-code ranking of permutations.
//!
//! Converts between a permutation of `0..N`, its Lehmer digit sequence,
//! and its integer rank in the lexicographic ordering of all `N!`
//! permutations of that size.
//!
//! # Theory
//!
//! Digit `i` of the Lehmer code counts how many not-yet-placed elements
//! are smaller than `perm[i]` at the moment position `i` is filled, so
//! digit `i` lies in `[0, N-1-i]`. Reading the digits as a factorial-base
//! (mixed-radix) number with place values `(N-1)!, (N-2)!, .., 0!` gives a
//! rank in `[0, N!)`, costing `log2(N!)` bits instead of the `N*log2(N)` bits a
//! naive index list costs. Exact big-integer arithmetic is mandatory past
//! N = 20, since 21! already overflows 64 bits.
//!
//! The working pool is a sorted `Vec` with O(N) removal, O(N^2) overall.
//! That is deliberate: intended datasets are a few hundred items at most.
//! An order-statistics tree would give O(N log N) if ever needed.
//!
//! # References
//!
//! - Lehmer, D. H. (1960). "Teaching combinatorial tricks to a computer"
//! - Laisant, C.-A. (1888). "Sur la numération factorielle, application
//!   aux permutations"
//! - Knuth, D. E. TAOCP Vol. 2, §3.3.2 (factorial number system)

use num_bigint::BigUint;
use num_integer::Integer;
use num_traits::{ToPrimitive, Zero};

use crate::error::{CodecError, Result};

/// Compute the Lehmer digit sequence of a permutation of `0..N`.
///
/// Fails with [`CodecError::InvalidPermutation`] if the input contains a
/// duplicate or an out-of-range value.
pub fn digits_from_permutation(perm: &[u32]) -> Result<Vec<u32>> {
    let n = perm.len() as u32;
    let mut pool: Vec<u32> = (0..n).collect();
    let mut digits = Vec::with_capacity(perm.len());

    for &value in perm {
        // Pool stays sorted ascending, so the binary-search position is
        // exactly the count of smaller unused elements. A miss means the
        // value was already placed or never in range.
        let pos = pool
            .binary_search(&value)
            .map_err(|_| CodecError::InvalidPermutation(n))?;
        digits.push(pos as u32);
        pool.remove(pos);
    }

    Ok(digits)
}

/// Factorial-base rank of a Lehmer digit sequence.
///
/// Horner accumulation, most significant digit first; equivalent to
/// `sum(digit[i] * (N-1-i)!)`. Returns a value in `[0, N!)`.
pub fn rank_from_digits(digits: &[u32]) -> BigUint {
    let n = digits.len() as u32;
    let mut rank = BigUint::zero();

    for (i, &digit) in digits.iter().enumerate() {
        rank *= n - i as u32;
        rank += digit;
    }

    rank
}

/// Recover the Lehmer digit sequence of `rank` among permutations of size
/// `n`.
///
/// Fails with [`CodecError::RankOutOfRange`] if `rank >= n!`, the
/// primary validity check against a corrupted or mismatched-N rank.
pub fn digits_from_rank(rank: &BigUint, n: u32) -> Result<Vec<u32>> {
    let mut rank = rank.clone();
    let mut digits = vec![0u32; n as usize];

    for i in 1..=n {
        let (quotient, remainder) = rank.div_rem(&BigUint::from(i));
        // remainder < i <= 65535, so the conversion cannot fail.
        digits[(n - i) as usize] = remainder
            .to_u32()
            .ok_or(CodecError::RankOutOfRange { item_count: n })?;
        rank = quotient;
    }

    if !rank.is_zero() {
        return Err(CodecError::RankOutOfRange { item_count: n });
    }

    Ok(digits)
}

/// Rebuild the permutation described by a Lehmer digit sequence.
///
/// Fails with [`CodecError::DigitOutOfRange`] if a digit exceeds the
/// number of elements left to place; unreachable for digits produced by
/// [`digits_from_rank`], kept as a guard against format drift.
pub fn permutation_from_digits(digits: &[u32]) -> Result<Vec<u32>> {
    let n = digits.len() as u32;
    let mut pool: Vec<u32> = (0..n).collect();
    let mut perm = Vec::with_capacity(digits.len());

    for &digit in digits {
        if digit as usize >= pool.len() {
            return Err(CodecError::DigitOutOfRange {
                digit,
                remaining: pool.len(),
            });
        }
        perm.push(pool.remove(digit as usize));
    }

    Ok(perm)
}
