//! Variable Byte (VByte) coding: 7 payload bits per byte, continuation bit
//! in the high bit, least-significant group first.
//!
//! This is the classic LEB128-style group-varint (see e.g. LLVM's
//! `LEB128.h`): `0` encodes as a single zero byte, and larger values spill
//! into as many following bytes as needed, each carrying the continuation
//! flag until the final (most significant) group.

use crate::error::{CodecError, Result};

const PAYLOAD_BITS: u32 = 7;
const CONTINUATION: u8 = 0x80;
const PAYLOAD_MASK: u8 = 0x7F;

/// Encodes a single value as a VByte byte sequence.
///
/// ```
/// use postings_codecs::vbyte;
/// assert_eq!(vbyte::encode(0), vec![0x00]);
/// assert_eq!(vbyte::encode(127), vec![0x7F]);
/// assert_eq!(vbyte::encode(128), vec![0x80, 0x01]);
/// ```
#[must_use]
pub fn encode(mut value: u64) -> Vec<u8> {
    let mut out = Vec::with_capacity(10);
    loop {
        let byte = (value & PAYLOAD_MASK as u64) as u8;
        value >>= PAYLOAD_BITS;
        if value != 0 {
            out.push(byte | CONTINUATION);
        } else {
            out.push(byte);
            break;
        }
    }
    out
}

/// Appends the VByte encoding of `value` directly into `out`, returning the
/// number of bytes written. Avoids an intermediate `Vec` allocation for
/// callers encoding many values in a row.
pub fn encode_into(mut value: u64, out: &mut Vec<u8>) -> usize {
    let start = out.len();
    loop {
        let byte = (value & PAYLOAD_MASK as u64) as u8;
        value >>= PAYLOAD_BITS;
        if value != 0 {
            out.push(byte | CONTINUATION);
        } else {
            out.push(byte);
            break;
        }
    }
    out.len() - start
}

/// Decodes every value in `bytes`, consuming the whole slice.
///
/// # Errors
/// Returns [`CodecError::TruncatedStream`] if the last byte still has its
/// continuation bit set (more bytes were expected).
pub fn decode(bytes: &[u8]) -> Result<Vec<u64>> {
    let mut values = Vec::new();
    let mut offset = 0usize;
    while offset < bytes.len() {
        let (value, next) = decode_number(bytes, offset * 8)?;
        values.push(value);
        offset = next / 8;
    }
    Ok(values)
}

/// Reads a single VByte-encoded number starting at byte `bit_offset / 8`
/// (VByte is always byte-aligned; `bit_offset` is accepted in bits purely so
/// callers composing VByte with other bit-level codecs can thread a single
/// cursor through). Returns the value and the bit offset immediately after
/// the terminating byte.
///
/// # Errors
/// Returns [`CodecError::TruncatedStream`] if the stream ends with the
/// continuation bit still set.
pub fn decode_number(bytes: &[u8], bit_offset: usize) -> Result<(u64, usize)> {
    debug_assert_eq!(bit_offset % 8, 0, "VByte is byte-aligned");
    let mut byte_index = bit_offset / 8;
    let mut value: u64 = 0;
    let mut shift = 0u32;
    loop {
        let Some(&byte) = bytes.get(byte_index) else {
            return Err(CodecError::TruncatedStream {
                bit_offset: byte_index * 8,
                context: "VByte stream ended mid-number (continuation bit was set)",
            });
        };
        value |= ((byte & PAYLOAD_MASK) as u64) << shift;
        byte_index += 1;
        if byte & CONTINUATION == 0 {
            break;
        }
        shift += PAYLOAD_BITS;
    }
    Ok((value, byte_index * 8))
}
