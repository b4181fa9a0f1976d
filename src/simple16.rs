//! Simple16: packs up to 28 small values into a single 32-bit word.
//!
//! The top 4 bits of each word are a **selector** in `0..16` that picks one
//! of 16 fixed slot layouts for the remaining 28 bits. The table is expressed
//! as data — a static array of per-slot bit widths per selector — and the
//! encoder just walks it in ascending selector order.

use crate::bits::bits;
use crate::error::{CodecError, Result};

/// Per-selector slot widths, in the order values are packed into the word.
/// Every row sums to at most 28 bits (the payload available once the 4-bit
/// selector is accounted for).
const TABLE: [&[u32]; 16] = [
    &[1; 28],                                                          // 0: 28 x 1
    &[2, 2, 2, 2, 2, 2, 2, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1, 1],   // 1: 7x2 + 14x1
    &[1, 1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 2, 2, 2, 1, 1, 1, 1, 1, 1, 1],   // 2: 7x1 + 7x2 + 7x1
    &[2; 14],                                                          // 3: 14 x 2
    &[3; 9],                                                           // 4: 9 x 3 (1 bit wasted)
    &[3, 3, 3, 3, 3, 3, 3, 3, 1, 1, 1, 1],                             // 5: 8x3 + 4x1
    &[4; 7],                                                           // 6: 7 x 4
    &[4, 4, 4, 4, 4, 4, 2, 2],                                         // 7: 6x4 + 2x2
    &[5, 5, 5, 5, 5, 3],                                               // 8: 5x5 + 1x3
    &[7; 4],                                                           // 9: 4 x 7
    &[9, 9, 9, 1],                                                     // 10: 3x9 + 1x1
    &[8, 8, 8, 4],                                                     // 11: 3x8 + 1x4
    &[14, 14],                                                         // 12: 2 x 14
    &[28],                                                             // 13: 1 x 28
    &[7, 7, 14],                                                       // 14: 2x7 + 1x14
    &[5, 5, 5, 5, 4, 4],                                               // 15: 4x5 + 2x4
];

const MAX_VALUE: u64 = (1 << 28) - 1;

/// Packs `list` into as many 32-bit words as needed, choosing at each step
/// the smallest selector whose slot widths accommodate the next group of
/// values (padding the final, partial word with zeros).
///
/// # Errors
/// Returns [`CodecError::ValueTooLarge`] if a value exceeds `2^28 - 1` (no
/// selector's widest slot, 28 bits, can hold it).
pub fn encode(list: &[u64]) -> Result<Vec<u32>> {
    let mut words = Vec::with_capacity(list.len().div_ceil(28));
    let mut i = 0;
    while i < list.len() {
        let remaining = list.len() - i;
        let selector = (0..16)
            .find(|&sel| fits(&list[i..], remaining.min(TABLE[sel].len()), sel))
            .ok_or_else(|| CodecError::ValueTooLarge {
                value: list[i],
                max: MAX_VALUE,
            })?;

        let widths = TABLE[selector];
        let mut word = (selector as u32) << 28;
        let mut bit_pos = 0u32;
        for (slot, &w) in widths.iter().enumerate() {
            let value = list.get(i + slot).copied().unwrap_or(0) as u32;
            word |= value << (28 - bit_pos - w);
            bit_pos += w;
        }
        words.push(word);
        i += widths.len().min(remaining);
    }
    Ok(words)
}

/// Whether the first `take` slots of `selector` can each hold the
/// corresponding value of `values`.
fn fits(values: &[u64], take: usize, selector: usize) -> bool {
    let widths = TABLE[selector];
    (0..take).all(|slot| bits(values[slot]) <= widths[slot])
}

/// Unpacks `count` values from a sequence of Simple16 words, discarding any
/// unused slots in the final word.
///
/// # Errors
/// Returns [`CodecError::CountMismatch`] if `words` does not hold at least
/// `count` values.
pub fn decode(words: &[u32], count: usize) -> Result<Vec<u64>> {
    let mut values = Vec::with_capacity(count);
    for &word in words {
        if values.len() >= count {
            break;
        }
        let selector = (word >> 28) as usize;
        let widths = TABLE[selector];
        let mut bit_pos = 0u32;
        for &w in widths {
            if values.len() >= count {
                break;
            }
            let shift = 28 - bit_pos - w;
            let mask = (1u32 << w) - 1;
            values.push(((word >> shift) & mask) as u64);
            bit_pos += w;
        }
    }
    if values.len() < count {
        return Err(CodecError::CountMismatch {
            requested: count,
            available: "fewer than `count` values decodable from the supplied Simple16 words",
        });
    }
    values.truncate(count);
    Ok(values)
}
