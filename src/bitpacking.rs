//! Fixed-width bit packing: every value in a block occupies the same number
//! of bits, `width = bits(max(list))`. Width is not self-describing — the
//! caller must record it alongside the encoded bytes and supply it back to
//! [`decode`].

use crate::bits::{bits, packed_length, read_bits, write_bits};
use crate::error::{CodecError, Result};

/// Packs every value of `list` into `width = bits(max(list))` bits each,
/// MSB-first. Returns the encoded bytes and the padding (unused trailing
/// bits of the last byte).
///
/// An empty list encodes to an empty buffer with width 0.
///
/// # Errors
/// Returns [`CodecError::ValueTooLarge`] if any value requires more than 32
/// bits, the cap this crate enforces for every block codec.
pub fn encode(list: &[u64]) -> Result<(Vec<u8>, u8, u32)> {
    let width = list.iter().copied().max().map_or(0, bits);
    if width > 32 {
        return Err(CodecError::ValueTooLarge {
            value: list.iter().copied().max().unwrap_or(0),
            max: (1u64 << 32) - 1,
        });
    }
    let mut bytes = vec![0u8; packed_length(list.len(), width)];
    for (i, &value) in list.iter().enumerate() {
        write_bits(&mut bytes, i * width as usize, value, width);
    }
    let bit_length = list.len() * width as usize;
    let padding = ((8 - bit_length % 8) % 8) as u8;
    Ok((bytes, padding, width))
}

/// Unpacks `count` values of `width` bits each from `bytes`, MSB-first.
///
/// # Errors
/// Returns [`CodecError::TruncatedStream`] if `bytes` is too short to hold
/// `count` values of `width` bits.
pub fn decode(bytes: &[u8], count: usize, width: u32) -> Result<Vec<u64>> {
    if width == 0 {
        return Ok(vec![0; count]);
    }
    if packed_length(count, width) > bytes.len() {
        return Err(CodecError::TruncatedStream {
            bit_offset: bytes.len() * 8,
            context: "bit-packed block is shorter than count * width bits",
        });
    }
    let mut values = Vec::with_capacity(count);
    for i in 0..count {
        values.push(read_bits(bytes, i * width as usize, width)?);
    }
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_vector_1_to_128_packs_at_width_7() {
        let list: Vec<u64> = (1..=128).collect();
        let (bytes, padding, width) = encode(&list).unwrap();
        assert_eq!(width, 7);
        assert_eq!(bytes.len(), 112);
        assert_eq!(padding, 0);
        assert_eq!(decode(&bytes, 128, width).unwrap(), list);
    }

    #[test]
    fn empty_list_encodes_to_empty_buffer() {
        let (bytes, padding, width) = encode(&[]).unwrap();
        assert!(bytes.is_empty());
        assert_eq!(padding, 0);
        assert_eq!(width, 0);
        assert_eq!(decode(&bytes, 0, width).unwrap(), Vec::<u64>::new());
    }

    #[test]
    fn all_zero_list_needs_width_zero() {
        let list = vec![0u64; 10];
        let (bytes, _padding, width) = encode(&list).unwrap();
        assert_eq!(width, 0);
        assert!(bytes.is_empty());
        assert_eq!(decode(&bytes, 10, width).unwrap(), list);
    }

    #[test]
    fn single_outlier_drives_width_for_the_whole_block() {
        let mut list = vec![1u64; 99];
        list.push(1 << 20);
        let (bytes, padding, width) = encode(&list).unwrap();
        assert_eq!(width, 21);
        assert_eq!(decode(&bytes, list.len(), width).unwrap(), list);
        let _ = padding;
    }

    #[test]
    fn value_too_large_for_32_bit_cap_is_rejected() {
        let list = vec![1u64 << 40];
        assert!(matches!(encode(&list), Err(CodecError::ValueTooLarge { .. })));
    }

    #[test]
    fn truncated_buffer_is_reported() {
        let list: Vec<u64> = (1..=20).collect();
        let (bytes, _padding, width) = encode(&list).unwrap();
        assert!(matches!(
            decode(&bytes[..bytes.len() - 1], list.len(), width),
            Err(CodecError::TruncatedStream { .. })
        ));
    }
}
