//! NewPFD / OptPFD: patched frame-of-reference over fixed-size blocks.
//!
//! Each block of [`BLOCK_SIZE`] values picks a bit width `b` and packs every
//! value's low `b` bits into a word-aligned region. Values that don't fit in
//! `b` bits ("exceptions") instead store their low bits in place and record
//! their block-local index and high bits in two side arrays, both
//! compressed with [`crate::simple16`] — the same "build the bigger codec
//! out of the smaller ones" shape the rest of this crate uses (`gamma` out
//! of `unary`, `elias_fano` out of `vbyte`).
//!
//! Two ways to pick `b` per block, both exposed as entry points:
//! - [`encode`] (NewPFD): `b` is the smallest width covering the 90th
//!   percentile of the block's values (see [`choose_width`]).
//! - [`encode_opt`] (OptPFD): tries every width at which the exception set
//!   could change and keeps whichever produces the fewest total words (see
//!   [`choose_width_opt`]).
//!
//! Whichever `b` is chosen is then raised if needed so every exception's
//! high bits still fit Simple16's domain cap — see
//! [`clamp_width_for_exceptions`].
//!
//! Wire format per block (all quantities are 32-bit words):
//! `[b, num_exceptions, packed_word_count, index_word_count, highbits_word_count]`
//! followed by the packed region, then Simple16(exception indices), then
//! Simple16(exception high bits).

use crate::bits::{bits, packed_length, read_bits, write_bits};
use crate::error::{CodecError, Result};
use crate::simple16;

/// Values per block. A power of two.
pub const BLOCK_SIZE: usize = 128;

const HEADER_WORDS: usize = 5;
const MAX_VALUE: u64 = (1u64 << 32) - 1;

/// Encodes `list` with NewPFD's fixed 90th-percentile width rule. The final
/// block is zero-padded up to [`BLOCK_SIZE`]; callers recover the true
/// length by passing it to [`decode`].
///
/// # Errors
/// Returns [`CodecError::ValueTooLarge`] if any value reaches or exceeds
/// `2^32` (the domain cap for block codecs).
pub fn encode(list: &[u64]) -> Result<Vec<u32>> {
    encode_with(list, |block| Ok(choose_width(block)))
}

/// Encodes `list` with OptPFD: for each block, tries every candidate width
/// and keeps the one that minimizes the block's total encoded word count,
/// rather than fixing the 90th-percentile rule.
///
/// # Errors
/// Same as [`encode`].
pub fn encode_opt(list: &[u64]) -> Result<Vec<u32>> {
    encode_with(list, choose_width_opt)
}

fn encode_with(list: &[u64], pick_width: impl Fn(&[u64]) -> Result<u32>) -> Result<Vec<u32>> {
    if let Some(&value) = list.iter().find(|&&v| v > MAX_VALUE) {
        return Err(CodecError::ValueTooLarge {
            value,
            max: MAX_VALUE,
        });
    }

    let mut words = Vec::new();
    let mut i = 0;
    while i < list.len() {
        let end = (i + BLOCK_SIZE).min(list.len());
        let mut block = list[i..end].to_vec();
        block.resize(BLOCK_SIZE, 0);
        let b = pick_width(&block)?;
        words.extend(encode_block(&block, b)?);
        i += BLOCK_SIZE;
    }
    Ok(words)
}

/// Picks `b` by the 90th-percentile rule: the smallest width such that at
/// least 90% of the block's values fit in it.
fn choose_width(block: &[u64]) -> u32 {
    let mut widths: Vec<u32> = block.iter().map(|&v| bits(v)).collect();
    widths.sort_unstable();
    let keep = (block.len() * 9).div_ceil(10).max(1);
    widths[keep - 1]
}

/// Tries every width at which the block's exception set could change (the
/// distinct per-value bit-widths present, since between two such widths the
/// exception set is constant and the packed region only grows with `b`) and
/// returns whichever produces the fewest total words for the block.
fn choose_width_opt(block: &[u64]) -> Result<u32> {
    let mut candidates: Vec<u32> = block.iter().map(|&v| bits(v)).collect();
    candidates.push(0);
    candidates.sort_unstable();
    candidates.dedup();

    let mut best_b = 0;
    let mut best_word_count = usize::MAX;
    for b in candidates {
        let word_count = encode_block(block, b)?.len();
        if word_count < best_word_count {
            best_word_count = word_count;
            best_b = b;
        }
    }
    Ok(best_b)
}

/// Raises `b` as needed so every exception's high bits (`v >> b`) stay
/// within Simple16's `2^28 - 1` domain cap. Block values are bounded at
/// `2^32 - 1`, so whenever `bits(max_value) > b + 28`, bumping `b` up to
/// `bits(max_value) - 28` guarantees `max_value >> b < 2^28` regardless of
/// how skewed the block is — without this, a 90th-percentile `b` chosen
/// from a block that's mostly small values but has a handful of near-`2^32`
/// outliers could pick a `b` whose outlier high bits overflow Simple16's
/// domain and fail `encode` on an otherwise admissible block.
fn clamp_width_for_exceptions(block: &[u64], b: u32) -> u32 {
    let max_bits = block.iter().copied().map(bits).max().unwrap_or(0);
    if max_bits > b + 28 {
        max_bits - 28
    } else {
        b
    }
}

fn encode_block(block: &[u64], b: u32) -> Result<Vec<u32>> {
    let b = clamp_width_for_exceptions(block, b);
    let mask = if b == 0 { 0 } else { (1u64 << b) - 1 };

    let mut low_values = Vec::with_capacity(block.len());
    let mut exception_indices = Vec::new();
    let mut exception_highbits = Vec::new();
    for (index, &v) in block.iter().enumerate() {
        if bits(v) <= b {
            low_values.push(v);
        } else {
            low_values.push(v & mask);
            exception_indices.push(index as u64);
            exception_highbits.push(v >> b);
        }
    }

    let packed = pack_block(&low_values, b);
    let index_words = simple16::encode(&exception_indices)?;
    let highbits_words = simple16::encode(&exception_highbits)?;

    let mut words =
        Vec::with_capacity(HEADER_WORDS + packed.len() + index_words.len() + highbits_words.len());
    words.push(b);
    words.push(exception_indices.len() as u32);
    words.push(packed.len() as u32);
    words.push(index_words.len() as u32);
    words.push(highbits_words.len() as u32);
    words.extend(packed);
    words.extend(index_words);
    words.extend(highbits_words);
    Ok(words)
}

/// Decodes `count` values from a sequence of NewPFD/OptPFD blocks (the two
/// share one wire format and one decoder).
///
/// # Errors
/// Returns [`CodecError::TruncatedStream`] if `words` ends before a block
/// header or body is complete, or [`CodecError::CorruptStream`] if a block
/// declares a width outside the `0..=32` domain cap.
pub fn decode(words: &[u32], count: usize) -> Result<Vec<u64>> {
    let mut values = Vec::with_capacity(count);
    let mut pos = 0;
    while values.len() < count {
        if pos + HEADER_WORDS > words.len() {
            return Err(CodecError::TruncatedStream {
                bit_offset: pos * 32,
                context: "PFor block header is incomplete",
            });
        }
        let b = words[pos];
        if b > 32 {
            return Err(CodecError::CorruptStream {
                bit_offset: pos * 32,
                context: "PFor block width exceeds the 32-bit domain cap",
            });
        }
        let num_exceptions = words[pos + 1] as usize;
        let packed_word_count = words[pos + 2] as usize;
        let index_word_count = words[pos + 3] as usize;
        let highbits_word_count = words[pos + 4] as usize;
        pos += HEADER_WORDS;

        let packed_end = pos + packed_word_count;
        let index_end = packed_end + index_word_count;
        let highbits_end = index_end + highbits_word_count;
        if highbits_end > words.len() {
            return Err(CodecError::TruncatedStream {
                bit_offset: words.len() * 32,
                context: "PFor block body is shorter than its header declares",
            });
        }

        let mut block = unpack_block(&words[pos..packed_end], b, BLOCK_SIZE)?;
        let exception_indices = simple16::decode(&words[packed_end..index_end], num_exceptions)?;
        let exception_highbits =
            simple16::decode(&words[index_end..highbits_end], num_exceptions)?;
        for (&index, &high) in exception_indices.iter().zip(exception_highbits.iter()) {
            block[index as usize] |= high << b;
        }

        values.extend(block);
        pos = highbits_end;
    }
    values.truncate(count);
    Ok(values)
}

/// Bit-packs `values` at `b` bits each, MSB-first, returning 32-bit words
/// (zero-padded to a word boundary).
fn pack_block(values: &[u64], b: u32) -> Vec<u32> {
    if b == 0 {
        return Vec::new();
    }
    let mut bytes = vec![0u8; packed_length(values.len(), b)];
    for (i, &v) in values.iter().enumerate() {
        write_bits(&mut bytes, i * b as usize, v, b);
    }
    while bytes.len() % 4 != 0 {
        bytes.push(0);
    }
    bytes
        .chunks_exact(4)
        .map(|c| u32::from_be_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}

fn unpack_block(words: &[u32], b: u32, count: usize) -> Result<Vec<u64>> {
    if b == 0 {
        return Ok(vec![0; count]);
    }
    let mut bytes = Vec::with_capacity(words.len() * 4);
    for &word in words {
        bytes.extend_from_slice(&word.to_be_bytes());
    }
    (0..count).map(|i| read_bits(&bytes, i * b as usize, b)).collect()
}
