//! Chunk-local Elias-Fano ("EF Local"): a non-standard composition of
//! [`crate::vbyte`] with classic Elias-Fano (and a dense-bitmap fallback),
//! built so each chunk of a posting list is independently decodable.
//!
//! Layout for a chunk of `n >= 2` values `C = [c_1, ..., c_n]`:
//!
//! `VByte(x) ‖ VByte(n_F) ‖ encoded(F)`
//!
//! The degenerate path (`c_1 == 0`, F is C itself, yielded directly on
//! decode) and the general path (F is reconstructed via `c_1 + F[0]` and
//! `f_j + c_1 + F[0] + 1`) need no wire flag of their own: the degenerate
//! path always encodes `x = 0`, while the general path always has `x >= 1`
//! (`z` is capped at `y - 1`, so `x = y - z >= 1`), so decode dispatches on
//! `x == 0` alone. `encoded(F)` carries its own discriminator byte choosing
//! a dense bitmap or classic Elias-Fano — see [`encode_f`].
//!
//! A single-value chunk (`n == 1`) is just `VByte(c_1)`; there's nothing to
//! split into a base and a shifted tail.

use crate::bits::{bits, read_bits, write_bits};
use crate::error::{CodecError, Result};
use crate::vbyte;

/// Encodes a strictly increasing chunk, returning the encoded bytes and the
/// padding (unused trailing bits of the last byte).
///
/// `z` (which becomes `F[0]`) can be any value satisfying `x = y - z`: decode
/// only ever uses `x + F[0]`, so `z` and `x` cancel out of every
/// reconstructed value. That freedom is used here to cap `z` at
/// `F[1] = c_2 - y - 1` so `F` stays non-decreasing, rather than the naive
/// `z = min(c_2, y) - 1`, which collapses to a constant (`y - 1`, since
/// `c_2 > y` always for a strictly increasing chunk) and can exceed `F[1]`.
///
/// # Errors
/// Returns [`CodecError::NonMonotonic`] if `chunk` is not strictly
/// increasing, or any error [`encode_f`] / [`crate::simple16::encode`]-style
/// sub-encoders can return (e.g. if `F`'s classic Elias-Fano construction
/// hits an internal value out of range).
pub fn encode(chunk: &[u64]) -> Result<(Vec<u8>, u8)> {
    if chunk.is_empty() {
        return Ok((Vec::new(), 0));
    }
    for i in 1..chunk.len() {
        if chunk[i] <= chunk[i - 1] {
            return Err(CodecError::NonMonotonic {
                index: i,
                previous: chunk[i - 1],
                value: chunk[i],
            });
        }
    }
    if chunk.len() == 1 {
        return Ok((vbyte::encode(chunk[0]), 0));
    }

    let y = chunk[0];
    let (x, f) = if y == 0 {
        (0u64, chunk.to_vec())
    } else {
        // z must not exceed F[1] = c2 - y - 1, or F stops being non-decreasing.
        // F must be non-decreasing for its bitmap/classic-EF sub-encoding to
        // decode correctly, but z := min(c2, y) - 1 only holds that up when
        // 2y <= c2; since c2 > y always for a strictly increasing chunk,
        // min(c2, y) - 1 is just y - 1, unconditionally, which overshoots
        // F[1] once y grows past c2 - y. Capping z at F[1] too keeps the
        // construction safe for every strictly increasing chunk while
        // leaving x + z = y intact, so decode is unaffected.
        let f1_candidate = chunk[1];
        let z = (y - 1).min(f1_candidate - y - 1);
        let x = y - z;
        let mut f = Vec::with_capacity(chunk.len());
        f.push(z);
        for &c in &chunk[1..] {
            f.push(c - y - 1);
        }
        (x, f)
    };

    let mut out = vbyte::encode(x);
    out.extend(vbyte::encode(chunk.len() as u64));
    let (f_bytes, padding) = encode_f(&f)?;
    out.extend(f_bytes);
    Ok((out, padding))
}

/// Decodes `count` values from an EF Local-encoded chunk.
///
/// # Errors
/// Returns [`CodecError::CountMismatch`] if the chunk's own recorded length
/// disagrees with `count`, or [`CodecError::TruncatedStream`] /
/// [`CodecError::CorruptStream`] if the byte stream ends early or its
/// internal bit counts don't add up.
pub fn decode(bytes: &[u8], count: usize) -> Result<Vec<u64>> {
    if count == 0 {
        return Ok(Vec::new());
    }
    if count == 1 {
        let (value, _) = vbyte::decode_number(bytes, 0)?;
        return Ok(vec![value]);
    }

    let (x, after_x) = vbyte::decode_number(bytes, 0)?;
    let (n_f, after_nf) = vbyte::decode_number(bytes, after_x)?;
    if n_f as usize != count {
        return Err(CodecError::CountMismatch {
            requested: count,
            available: "the chunk's own encoded length disagrees with the requested count",
        });
    }

    // x == 0 iff the degenerate path (c_1 == 0) was taken: the general path
    // always caps z at y - 1, forcing x = y - z >= 1.
    let degenerate = x == 0;
    let f = decode_f(bytes, after_nf / 8, count)?;
    if degenerate {
        return Ok(f);
    }

    let f1 = x + f[0];
    let mut result = Vec::with_capacity(count);
    result.push(f1);
    for &fj in &f[1..] {
        result.push(fj + f1 + 1);
    }
    Ok(result)
}

/// Encodes the shifted sequence `F`, choosing between a dense bitmap and
/// classic Elias-Fano.
///
/// The density rule (bitmap iff `|F| > max(F)/4`) assumes a bitmap can
/// represent `F` at all, but a bitmap is a presence-per-position structure
/// and cannot represent repeated values — and `F` can legitimately contain
/// ties (two chunk elements that land on the same shifted position). This
/// implementation therefore only takes the bitmap path when `F` has no
/// duplicates; classic Elias-Fano handles repeats natively via same-bucket
/// unary gaps and is always safe to fall back to.
fn encode_f(f: &[u64]) -> Result<(Vec<u8>, u8)> {
    let m = f.len();
    let u = f.iter().copied().max().unwrap_or(0);
    let mut sorted = f.to_vec();
    sorted.sort_unstable();
    let all_distinct = sorted.windows(2).all(|w| w[0] != w[1]);
    let use_bitmap = all_distinct && (m as u64) * 4 > u;

    let mut header = Vec::new();
    if use_bitmap {
        header.push(0u8);
        header.extend(vbyte::encode(u));
        let bit_len = u as usize + 1;
        let mut payload = vec![0u8; bit_len.div_ceil(8)];
        for &v in f {
            write_bits(&mut payload, v as usize, 1, 1);
        }
        let padding = ((8 - bit_len % 8) % 8) as u8;
        header.extend(payload);
        Ok((header, padding))
    } else {
        header.push(1u8);
        header.extend(vbyte::encode(u));
        let l = low_bit_width(u, m as u64);
        header.extend(vbyte::encode(l as u64));

        let low_mask = if l == 0 { 0 } else { (1u64 << l) - 1 };
        let low_bits_total = m * l as usize;
        let upper_len = m + (u >> l) as usize + 1;
        let total_bits = low_bits_total + upper_len;

        let mut payload = vec![0u8; total_bits.div_ceil(8)];
        for (i, &v) in f.iter().enumerate() {
            write_bits(&mut payload, i * l as usize, v & low_mask, l);
        }
        for (i, &v) in f.iter().enumerate() {
            let pos = low_bits_total + (v >> l) as usize + i;
            write_bits(&mut payload, pos, 1, 1);
        }
        let padding = ((8 - total_bits % 8) % 8) as u8;
        header.extend(payload);
        Ok((header, padding))
    }
}

/// `l = max(0, floor(log2(floor(u / m))))`, the low-bit width classic
/// Elias-Fano uses for a monotone sequence of `m` values over universe `u`.
fn low_bit_width(u: u64, m: u64) -> u32 {
    if m == 0 {
        return 0;
    }
    let q = u / m;
    if q == 0 {
        0
    } else {
        bits(q) - 1
    }
}

fn decode_f(bytes: &[u8], start_byte: usize, m: usize) -> Result<Vec<u64>> {
    if start_byte >= bytes.len() {
        return Err(CodecError::TruncatedStream {
            bit_offset: start_byte * 8,
            context: "F payload is missing its bitmap/EF discriminator byte",
        });
    }
    let discriminator = bytes[start_byte];
    let (u, after_u) = vbyte::decode_number(bytes, (start_byte + 1) * 8)?;

    if discriminator == 0 {
        let payload = &bytes[after_u / 8..];
        let bit_len = u as usize + 1;
        let mut values = Vec::with_capacity(m);
        for pos in 0..bit_len {
            if read_bits(payload, pos, 1)? == 1 {
                values.push(pos as u64);
            }
        }
        if values.len() != m {
            return Err(CodecError::CorruptStream {
                bit_offset: (after_u / 8) * 8,
                context: "EF Local bitmap set-bit count does not match the expected F length",
            });
        }
        Ok(values)
    } else {
        let (l_value, after_l) = vbyte::decode_number(bytes, after_u)?;
        let l = l_value as u32;
        let payload = &bytes[after_l / 8..];

        let mut low = Vec::with_capacity(m);
        for i in 0..m {
            low.push(read_bits(payload, i * l as usize, l)?);
        }
        let low_bits_total = m * l as usize;
        let upper_len = m + (u >> l) as usize + 1;

        let mut results = Vec::with_capacity(m);
        let mut seen = 0usize;
        for pos in 0..upper_len {
            if read_bits(payload, low_bits_total + pos, 1)? == 1 {
                let bucket = pos - seen;
                results.push(((bucket as u64) << l) | low[seen]);
                seen += 1;
                if seen == m {
                    break;
                }
            }
        }
        if results.len() != m {
            return Err(CodecError::CorruptStream {
                bit_offset: (after_l / 8) * 8 + low_bits_total,
                context: "EF Local upper bit vector has fewer set bits than the expected F length",
            });
        }
        Ok(results)
    }
}
