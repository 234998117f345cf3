// Find the one value missing from a sequence of 1..=n.
//
// * The arithmetic series sum (sum 1..n) formula is n * (n + 1) / 2
// * thus, the missing number is the difference of the expected sum and the actual sum
// * sums are carried in u128 so the formula stays exact for every u64 bound
use log::trace;
use rand::Rng;

use crate::error::{FinderError, FinderResult};

/// Sum of a sequence, wide enough to hold the triangular number of any `u64`.
pub type Total = u128;

/// Picks the value to remove, uniformly from [1, bound].
pub fn choose_missing<R: Rng + ?Sized>(bound: u64, rng: &mut R) -> FinderResult<u64> {
    if bound == 0 {
        return Err(FinderError::EmptyRange);
    }
    Ok(rng.random_range(1..=bound))
}

/// Every value of [1, bound] except `missing`, ascending.
pub fn generate_sequence(bound: u64, missing: u64) -> FinderResult<Vec<u64>> {
    if bound == 0 {
        return Err(FinderError::EmptyRange);
    }
    if !(1..=bound).contains(&missing) {
        return Err(FinderError::MissingOutOfRange { missing, bound });
    }

    // both a length past usize and a failed allocation end up here
    let len = usize::try_from(bound - 1).map_err(|_| FinderError::BoundTooLarge { bound })?;
    let mut sequence = Vec::new();
    sequence
        .try_reserve_exact(len)
        .map_err(|_| FinderError::BoundTooLarge { bound })?;
    sequence.extend((1..=bound).filter(|&value| value != missing));
    trace!("generated {} values for bound {}", sequence.len(), bound);
    Ok(sequence)
}

pub fn sum_sequence(sequence: &[u64]) -> Total {
    sequence.iter().map(|&value| Total::from(value)).sum()
}

/// Closed-form sum of 1..=bound.
pub fn expected_sum(bound: u64) -> Total {
    let n = Total::from(bound);
    n * (n + 1) / 2
}

/// The missing value is whatever the sequence falls short of the expected sum by.
///
/// A sequence summing to more than the expected total cannot come from [1, bound]
/// with one value removed, so it is reported instead of wrapping.
pub fn recover_missing(expected_total: Total, actual_total: Total) -> FinderResult<Total> {
    expected_total
        .checked_sub(actual_total)
        .ok_or(FinderError::SumExceedsExpected {
            expected: expected_total,
            actual: actual_total,
        })
}

pub fn verify(actual_missing: u64, computed_missing: Total) -> bool {
    Total::from(actual_missing) == computed_missing
}
