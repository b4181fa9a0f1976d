//! Seeded property-style roundtrip checks across every codec, using a fixed
//! RNG seed so any failure reproduces exactly.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use postings_codecs::bit_byte_array::BitByteArray;
use postings_codecs::gaps::to_gaps;
use postings_codecs::{bitpacking, elias_fano, gamma, pfor, simple16, unary, vbyte};

fn random_monotone_list(rng: &mut SmallRng, len: usize, max_gap: u64) -> Vec<u64> {
    let mut value = rng.random_range(0..=max_gap);
    let mut list = Vec::with_capacity(len);
    list.push(value);
    for _ in 1..len {
        value += rng.random_range(1..=max_gap);
        list.push(value);
    }
    list
}

#[test]
fn random_gapped_lists_roundtrip_through_every_block_codec() {
    let mut rng = SmallRng::seed_from_u64(0xC0FFEE);
    for _ in 0..20 {
        let len = rng.random_range(1..=500);
        let max_gap = rng.random_range(1..=5000u64);
        let list = random_monotone_list(&mut rng, len, max_gap);
        let gaps = to_gaps(&list).unwrap();

        let s16 = simple16::encode(&gaps).unwrap();
        assert_eq!(simple16::decode(&s16, gaps.len()).unwrap(), gaps);

        let pf = pfor::encode(&gaps).unwrap();
        assert_eq!(pfor::decode(&pf, gaps.len()).unwrap(), gaps);

        let pf_opt = pfor::encode_opt(&gaps).unwrap();
        assert_eq!(pfor::decode(&pf_opt, gaps.len()).unwrap(), gaps);

        let (bp_bytes, _padding, width) = bitpacking::encode(&gaps).unwrap();
        assert_eq!(bitpacking::decode(&bp_bytes, gaps.len(), width).unwrap(), gaps);

        let mut vbytes = Vec::new();
        for &g in &gaps {
            vbyte::encode_into(g, &mut vbytes);
        }
        assert_eq!(vbyte::decode(&vbytes).unwrap(), gaps);
    }
}

#[test]
fn random_strictly_increasing_chunks_roundtrip_through_ef_local() {
    let mut rng = SmallRng::seed_from_u64(0x5EED);
    for _ in 0..50 {
        let len = rng.random_range(1..=30);
        let max_gap = rng.random_range(1..=200u64);
        let chunk = random_monotone_list(&mut rng, len, max_gap);
        let (bytes, _padding) = elias_fano::encode(&chunk).unwrap();
        assert_eq!(elias_fano::decode(&bytes, chunk.len()).unwrap(), chunk);
    }
}

#[test]
fn random_values_roundtrip_through_unary_and_gamma() {
    let mut rng = SmallRng::seed_from_u64(0xABCD);
    for _ in 0..200 {
        let v = rng.random_range(1..=1_000_000u64);

        let (u_bytes, u_padding) = unary::encode(v);
        let u_bit_len = u_bytes.len() * 8 - u_padding as usize;
        let u_buf = BitByteArray::from_bytes(u_bytes, u_bit_len);
        assert_eq!(unary::decode(&u_buf, 1, false, 0).unwrap(), vec![v]);
        assert_eq!(unary::decode(&u_buf, 1, true, 0).unwrap(), vec![v]);

        let (g_bytes, g_padding) = gamma::encode(v);
        let g_bit_len = g_bytes.len() * 8 - g_padding as usize;
        let g_buf = BitByteArray::from_bytes(g_bytes, g_bit_len);
        assert_eq!(gamma::decode(&g_buf, 1, 0).unwrap(), vec![v]);
    }
}

#[test]
fn pfor_handles_random_skewed_blocks_without_overflowing_simple16() {
    // Each block mixes a random run of tiny values with a random handful of
    // values near the 2^32-1 block-codec cap, the shape that can otherwise
    // push exception high bits past Simple16's domain.
    let mut rng = SmallRng::seed_from_u64(0xFACE);
    for _ in 0..15 {
        let small_count = rng.random_range(100..=127);
        let large_count = pfor::BLOCK_SIZE - small_count;
        let mut block: Vec<u64> = (0..small_count).map(|_| rng.random_range(0..=3u64)).collect();
        block.extend((0..large_count).map(|_| rng.random_range((1u64 << 28)..(1u64 << 32))));

        let words = pfor::encode(&block).unwrap();
        assert_eq!(pfor::decode(&words, block.len()).unwrap(), block);

        let words_opt = pfor::encode_opt(&block).unwrap();
        assert_eq!(pfor::decode(&words_opt, block.len()).unwrap(), block);
    }
}
