//! Monotone sequence ↔ gap sequence conversion (d-gaps).
//!
//! A posting list is almost always handed to a codec as gaps rather than raw
//! document IDs, since gaps are typically much smaller and compress better.
//! This module is the one place that owns the gap convention so every codec
//! that wants it (chunking layers above this crate, mainly) applies it the
//! same way.

use crate::error::{CodecError, Result};

/// Converts a monotone non-decreasing sequence into its d-gap sequence:
/// `gaps[0] = list[0]` and `gaps[i] = list[i] - list[i-1] - 1` for `i >= 1`.
///
/// # Errors
/// Returns [`CodecError::NonMonotonic`] if any `list[i] <= list[i-1]`, i.e.
/// the input is not *strictly* increasing from index 1 onward (d-gaps
/// require a nonnegative gap, which for this convention means strict
/// increase).
pub fn to_gaps(list: &[u64]) -> Result<Vec<u64>> {
    let mut gaps = Vec::with_capacity(list.len());
    for (i, &value) in list.iter().enumerate() {
        if i == 0 {
            gaps.push(value);
            continue;
        }
        let previous = list[i - 1];
        if value <= previous {
            return Err(CodecError::NonMonotonic { index: i, previous, value });
        }
        gaps.push(value - previous - 1);
    }
    Ok(gaps)
}

/// Inverse of [`to_gaps`]: reconstructs the original monotone sequence from
/// its d-gaps.
#[must_use]
pub fn from_gaps(gaps: &[u64]) -> Vec<u64> {
    let mut list = Vec::with_capacity(gaps.len());
    let mut previous: u64 = 0;
    for (i, &gap) in gaps.iter().enumerate() {
        let value = if i == 0 { gap } else { previous + gap + 1 };
        list.push(value);
        previous = value;
    }
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_list_roundtrips() {
        assert_eq!(to_gaps(&[]).unwrap(), Vec::<u64>::new());
        assert_eq!(from_gaps(&[]), Vec::<u64>::new());
    }

    #[test]
    fn single_element_gap_is_the_value_itself() {
        assert_eq!(to_gaps(&[42]).unwrap(), vec![42]);
        assert_eq!(from_gaps(&[42]), vec![42]);
    }

    #[test]
    fn to_gaps_then_from_gaps_roundtrips() {
        let list = vec![5, 10, 20, 40, 80, 160];
        let gaps = to_gaps(&list).unwrap();
        assert_eq!(gaps, vec![5, 4, 9, 19, 39, 79]);
        assert_eq!(from_gaps(&gaps), list);
    }

    #[test]
    fn consecutive_integers_yield_zero_gaps() {
        let list: Vec<u64> = (1..=128).collect();
        let gaps = to_gaps(&list).unwrap();
        assert!(gaps[1..].iter().all(|&g| g == 0));
        assert_eq!(from_gaps(&gaps), list);
    }

    #[test]
    fn non_monotonic_input_is_rejected() {
        let err = to_gaps(&[1, 1, 2]).unwrap_err();
        assert_eq!(err, CodecError::NonMonotonic { index: 1, previous: 1, value: 1 });

        let err = to_gaps(&[5, 3]).unwrap_err();
        assert_eq!(err, CodecError::NonMonotonic { index: 1, previous: 5, value: 3 });
    }
}
