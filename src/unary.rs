//! Unary coding: encodes a positive integer `n` as `n - 1` one-bits followed
//! by a terminating zero-bit, so `n = 1` is just the single bit `0`.
//!
//! Both conventions ("ones then a zero" vs. "zeros then a one") appear in the
//! literature; this crate commits to the former. Two decoders are provided —
//! a bit-by-bit one and a byte-at-a-time "optimized" one — and they must
//! always agree.

use crate::bit_byte_array::BitByteArray;
use crate::error::{CodecError, Result};

/// Encodes `n` (`n >= 1`) as a unary code, returning the encoded bytes and
/// the padding (unused trailing bits in the last byte).
///
/// # Panics
/// Panics if `n == 0`; unary coding has no representation for it.
#[must_use]
pub fn encode(n: u64) -> (Vec<u8>, u8) {
    let mut buf = BitByteArray::new();
    write_into(&mut buf, n);
    let padding = buf.padding();
    (buf.into_bytes(), padding)
}

/// Appends the unary code for `n` directly to an existing buffer. Used by
/// both the public [`encode`] and by [`crate::gamma`], which prefixes a
/// value with a unary-coded length.
pub(crate) fn write_into(buf: &mut BitByteArray, n: u64) {
    assert!(n >= 1, "unary coding requires n >= 1");
    for _ in 0..n - 1 {
        buf.append_bit(true);
    }
    buf.append_bit(false);
}

/// Reads `count` unary-coded numbers starting at bit `offset` in `source`.
///
/// `optimized` selects between a bit-by-bit decoder and a decoder that scans
/// whole bytes at a time looking for a zero bit; both must produce identical
/// results.
///
/// # Errors
/// Returns [`CodecError::TruncatedStream`] if the source runs out of bits
/// before `count` values have been produced.
pub fn decode(source: &BitByteArray, count: usize, optimized: bool, offset: usize) -> Result<Vec<u64>> {
    if optimized {
        decode_optimized(source, count, offset)
    } else {
        decode_plain(source, count, offset)
    }
}

/// Reads a single unary-coded number starting at bit `offset`, returning the
/// value and the bit offset immediately after the terminator.
pub(crate) fn read_one(source: &BitByteArray, offset: usize) -> Result<(u64, usize)> {
    let mut pos = offset;
    let mut ones = 0u64;
    loop {
        let bit = source.read_bits(pos, 1).map_err(|_| CodecError::TruncatedStream {
            bit_offset: pos,
            context: "unary code was not terminated before the stream ended",
        })?;
        pos += 1;
        if bit == 0 {
            return Ok((ones + 1, pos));
        }
        ones += 1;
    }
}

fn decode_plain(source: &BitByteArray, count: usize, offset: usize) -> Result<Vec<u64>> {
    let mut values = Vec::with_capacity(count);
    let mut pos = offset;
    for _ in 0..count {
        let (value, next) = read_one(source, pos)?;
        values.push(value);
        pos = next;
    }
    Ok(values)
}

/// Same semantics as [`decode_plain`] but scans whole bytes at a time via
/// `u8::leading_zeros`/`trailing_zeros`-style byte inspection instead of one
/// bit per loop iteration, the same buffered-word scan a word-oriented bit
/// reader performs over its internal refill buffer.
fn decode_optimized(source: &BitByteArray, count: usize, offset: usize) -> Result<Vec<u64>> {
    let bytes = source.bytes();
    let total_bits = source.bit_length();
    let mut values = Vec::with_capacity(count);
    let mut pos = offset;

    for _ in 0..count {
        let mut ones = 0u64;
        loop {
            if pos >= total_bits {
                return Err(CodecError::TruncatedStream {
                    bit_offset: pos,
                    context: "unary code was not terminated before the stream ended",
                });
            }
            let byte_index = pos / 8;
            let bit_in_byte = pos % 8;
            let remaining_in_byte = 8 - bit_in_byte;

            // Shift the unconsumed bits of this byte to the top; the
            // zero-filled low bits then naturally bound how many leading
            // ones can be observed to the bits actually remaining.
            let shifted = bytes[byte_index] << bit_in_byte;
            let leading_ones = shifted.leading_ones() as usize;

            if leading_ones >= remaining_in_byte {
                // No terminator in this byte; all remaining bits are 1.
                ones += remaining_in_byte as u64;
                pos += remaining_in_byte;
                continue;
            }
            ones += leading_ones as u64;
            pos += leading_ones + 1; // consume the terminating zero too
            break;
        }
        values.push(ones + 1);
    }
    Ok(values)
}
