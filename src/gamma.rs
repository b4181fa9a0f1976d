//! Elias gamma coding: optimal for a Zipf distribution of exponent 2.
//!
//! To represent `n >= 1` we write in unary `floor(log2 n)` (via the unary
//! convention in [`crate::unary`]) and then the `floor(log2 n)` low bits of
//! `n` in binary. `n = 1` therefore encodes as the single bit `0`.

use crate::bit_byte_array::BitByteArray;
use crate::bits::bits;
use crate::error::Result;
use crate::unary;

/// Encodes a single value `n >= 1`, returning the encoded bytes and padding.
///
/// # Panics
/// Panics if `n == 0`.
#[must_use]
pub fn encode(n: u64) -> (Vec<u8>, u8) {
    let mut buf = BitByteArray::new();
    write_into(&mut buf, n);
    let padding = buf.padding();
    (buf.into_bytes(), padding)
}

/// Appends the gamma code for `n` (`n >= 1`) to an existing buffer.
pub(crate) fn write_into(buf: &mut BitByteArray, n: u64) {
    assert!(n >= 1, "gamma coding requires n >= 1");
    let log = bits(n) - 1; // floor(log2 n)
    unary::write_into(buf, log as u64 + 1);
    if log > 0 {
        let low_bits_mask = (1u64 << log) - 1;
        buf.append_bits(n & low_bits_mask, log);
    }
}

/// Reads `count` gamma-coded numbers starting at bit `offset` in `source`.
///
/// # Errors
/// Returns [`CodecError::TruncatedStream`](crate::error::CodecError::TruncatedStream)
/// if the source runs out of bits before `count` values have been produced.
pub fn decode(source: &BitByteArray, count: usize, offset: usize) -> Result<Vec<u64>> {
    let mut values = Vec::with_capacity(count);
    let mut pos = offset;
    for _ in 0..count {
        let (value, next) = read_one(source, pos)?;
        values.push(value);
        pos = next;
    }
    Ok(values)
}

/// Reads a single gamma-coded value starting at bit `offset`, returning the
/// value and the bit offset immediately after it.
pub(crate) fn read_one(source: &BitByteArray, offset: usize) -> Result<(u64, usize)> {
    let (unary_value, after_unary) = unary::read_one(source, offset)?;
    let log = unary_value - 1;
    if log == 0 {
        return Ok((1, after_unary));
    }
    let low = source.read_bits(after_unary, log as u32)?;
    Ok(((1u64 << log) | low, after_unary + log as usize))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn into_array(buf: &BitByteArray) -> BitByteArray {
        BitByteArray::from_bytes(buf.bytes().to_vec(), buf.bit_length())
    }

    #[test]
    fn one_encodes_as_single_zero_bit() {
        let (bytes, padding) = encode(1);
        assert_eq!(bytes, vec![0b0000_0000]);
        assert_eq!(padding, 7);
    }

    #[test]
    fn roundtrips_each_value_individually() {
        for n in 1u64..=1000 {
            let mut buf = BitByteArray::new();
            write_into(&mut buf, n);
            let array = into_array(&buf);
            assert_eq!(decode(&array, 1, 0).unwrap(), vec![n], "n = {n}");
        }
    }

    #[test]
    fn roundtrips_a_sequence_of_values() {
        let values: Vec<u64> = vec![1, 2, 3, 4, 7, 8, 15, 16, 1000, 1_000_000];
        let mut buf = BitByteArray::new();
        for &v in &values {
            write_into(&mut buf, v);
        }
        let array = into_array(&buf);
        assert_eq!(decode(&array, values.len(), 0).unwrap(), values);
    }

    #[test]
    fn length_matches_2_floor_log2_plus_1() {
        for n in [1u64, 2, 3, 4, 7, 8, 255, 256, 1 << 20] {
            let (bytes, padding) = encode(n);
            let log = bits(n) - 1;
            let expected_bits = 2 * log as usize + 1;
            let encoded_bit_len = bytes.len() * 8 - padding as usize;
            assert_eq!(encoded_bit_len, expected_bits, "n = {n}");
        }
    }

    #[test]
    fn decode_at_nonzero_offset() {
        let mut buf = BitByteArray::new();
        buf.append_bits(0b11, 2);
        write_into(&mut buf, 9);
        let array = into_array(&buf);
        assert_eq!(decode(&array, 1, 2).unwrap(), vec![9]);
    }
}
