//! Outlier-segregated codec (tag 2): a two-region layout that keeps most
//! values inline at a small width `k` and segregates the rare large values
//! ("outliers") into a trailing full-width overflow region, addressed by
//! index from the main entry.
//!
//! Each main-region entry is `bits_per_element` bits wide: the top bit is a
//! flag (0 = inline value, 1 = overflow index), and the low
//! `bits_per_element - 1` bits carry either the value itself or the index
//! of the outlier's full value in the overflow region.

use crate::base::{allocate_with_header, minimum_width, width_of};
use crate::bitio::{read_bits, write_bits};
use crate::consts::WORD_BITS;
use crate::dispatch::{Codec, CodecKind};
use crate::error::CodecError;
use crate::header::{self, HEADER_WORDS};

/// Minimum number of bits needed to represent `v` when `v` may exceed
/// `u32::MAX` (used for the overflow-index width, which is sized off an
/// element *count* rather than an element value).
#[inline]
fn width_of_u64(v: u64) -> u32 {
    if v == 0 {
        1
    } else {
        64 - v.leading_zeros()
    }
}

/// The (k, bitsPerElement, bitsPerOverflow, overflow-count) chosen by the
/// adaptive width selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Selection {
    k: u32,
    bpe: u32,
    bpo: u32,
    n_overflow: u64,
}

/// Scans `seq` once to build a width histogram, then evaluates every
/// candidate inline width `k` in `1..=max_bits` and keeps the one with the
/// lowest total bit cost, breaking ties toward the smaller `k` by only ever
/// replacing the incumbent on a *strictly* lower cost.
fn select_width(seq: &[u32]) -> Result<Selection, CodecError> {
    let max_bits = minimum_width(seq)?;

    // hist[w] = number of elements whose minimum width is exactly w.
    let mut hist = [0u64; 32];
    for &v in seq {
        hist[width_of(v) as usize] += 1;
    }
    // suffix[w] = number of elements with width >= w, so that the number of
    // elements with width strictly greater than k is suffix[k + 1].
    let mut suffix = [0u64; 33];
    for w in (1..=31u32).rev() {
        suffix[w as usize] = suffix[w as usize + 1] + hist[w as usize];
    }

    let n = seq.len() as u64;
    let mut best: Option<(Selection, u64)> = None;

    for k in 1..=max_bits {
        let n_overflow = suffix[(k + 1) as usize];
        let index_bits = if n_overflow > 0 {
            width_of_u64(n_overflow)
        } else {
            0
        };
        let bpe = 1 + k.max(index_bits);
        let total_cost = n * bpe as u64 + n_overflow * max_bits as u64;

        let is_better = match &best {
            None => true,
            Some((_, best_cost)) => total_cost < *best_cost,
        };
        if is_better {
            best = Some((
                Selection {
                    k,
                    bpe,
                    bpo: max_bits,
                    n_overflow,
                },
                total_cost,
            ));
        }
    }

    Ok(best.expect("max_bits >= 1 so the loop runs at least once").0)
}

/// Bit position of main-region entry `i` given `bpe`.
#[inline(always)]
fn main_bit_pos(i: usize, bpe: u32) -> u64 {
    HEADER_WORDS as u64 * WORD_BITS as u64 + i as u64 * bpe as u64
}

/// Bit position of overflow-region entry `idx` given `n`, `bpe`, and `bpo`.
#[inline(always)]
fn overflow_bit_pos(n: usize, bpe: u32, bpo: u32, idx: u64) -> u64 {
    let main_bits = n as u64 * bpe as u64;
    HEADER_WORDS as u64 * WORD_BITS as u64 + main_bits + idx * bpo as u64
}

/// Reads and decodes the main entry at logical index `i`, following the
/// overflow indirection when its flag bit is set.
fn decode_entry(packed: &[u32], n: usize, bpe: u32, bpo: u32, i: usize) -> u32 {
    let entry = read_bits(packed, main_bit_pos(i, bpe), bpe);
    let flag_bit = 1u32 << (bpe - 1);
    if entry & flag_bit == 0 {
        entry
    } else {
        let idx = (entry & !flag_bit) as u64;
        read_bits(packed, overflow_bit_pos(n, bpe, bpo, idx), bpo)
    }
}

/// The outlier-segregated codec. Zero-sized; all state lives in the packed
/// buffer.
pub struct OutlierCodec;

impl Codec for OutlierCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::Outlier
    }

    fn compress(&self, src: &[u32]) -> Result<Vec<u32>, CodecError> {
        let sel = select_width(src)?;
        let n = src.len();
        let main_bits = n as u64 * sel.bpe as u64;
        let overflow_bits = sel.n_overflow * sel.bpo as u64;
        let mut buf = allocate_with_header(main_bits + overflow_bits)?;
        header::write_header(&mut buf, n, CodecKind::Outlier, sel.k, sel.bpe, sel.bpo);

        let flag_bit = 1u32 << (sel.bpe - 1);
        let mut overflow_index = 0u64;
        for (i, &v) in src.iter().enumerate() {
            let pos = main_bit_pos(i, sel.bpe);
            if width_of(v) <= sel.k {
                write_bits(&mut buf, pos, sel.bpe, v);
            } else {
                let opos = overflow_bit_pos(n, sel.bpe, sel.bpo, overflow_index);
                write_bits(&mut buf, opos, sel.bpo, v);
                write_bits(&mut buf, pos, sel.bpe, flag_bit | overflow_index as u32);
                overflow_index += 1;
            }
        }
        Ok(buf)
    }

    fn decompress(&self, packed: &[u32], dst: &mut [u32]) -> Result<(), CodecError> {
        let n = header::n(packed)?;
        if dst.len() < n {
            return Err(CodecError::DestinationTooSmall {
                needed: n,
                got: dst.len(),
            });
        }
        let bpe = header::bits_per_element(packed)?;
        let bpo = header::bits_per_overflow(packed)?;
        for i in 0..n {
            dst[i] = decode_entry(packed, n, bpe, bpo, i);
        }
        Ok(())
    }

    fn get(&self, packed: &[u32], index: usize) -> Result<u32, CodecError> {
        let n = header::n(packed)?;
        if index >= n {
            return Err(CodecError::IndexOutOfBounds { index, len: n });
        }
        let bpe = header::bits_per_element(packed)?;
        let bpo = header::bits_per_overflow(packed)?;
        Ok(decode_entry(packed, n, bpe, bpo, index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_with_no_outliers() {
        let src = [0u32, 1, 2, 3, 4, 5, 6, 7];
        let packed = OutlierCodec.compress(&src).unwrap();
        let mut dst = vec![0u32; src.len()];
        OutlierCodec.decompress(&packed, &mut dst).unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn single_dominant_outlier_is_segregated() {
        let mut src = vec![0u32; 999];
        for (i, v) in src.iter_mut().enumerate() {
            *v = (i as u32 * 7) % 64;
        }
        src.insert(500, 1_048_575);

        let packed = OutlierCodec.compress(&src).unwrap();
        let k = header::k(&packed).unwrap();
        let bpo = header::bits_per_overflow(&packed).unwrap();
        assert!(k <= 6, "selector should keep k small, got {k}");
        assert_eq!(bpo, 20);

        let mut dst = vec![0u32; src.len()];
        OutlierCodec.decompress(&packed, &mut dst).unwrap();
        assert_eq!(dst, src);
        assert_eq!(OutlierCodec.get(&packed, 500).unwrap(), 1_048_575);
    }

    #[test]
    fn random_access_matches_decompress() {
        let mut src: Vec<u32> = (0..500).map(|i| (i * 31) % 40).collect();
        src[123] = 900_000;
        src[456] = 2_000_000;
        let packed = OutlierCodec.compress(&src).unwrap();
        for (i, &expected) in src.iter().enumerate() {
            assert_eq!(OutlierCodec.get(&packed, i).unwrap(), expected);
        }
    }

    #[test]
    fn selector_minimizes_total_cost() {
        let mut src: Vec<u32> = (0..2000).map(|i| (i * 3) % 16).collect();
        for v in src.iter_mut().step_by(50) {
            *v = 500_000;
        }
        let sel = select_width(&src).unwrap();

        // Brute-force the same cost model and confirm the incumbent wins.
        let max_bits = minimum_width(&src).unwrap();
        let mut best_cost = u64::MAX;
        let mut best_k = 0;
        for k in 1..=max_bits {
            let n_overflow = src.iter().filter(|&&v| width_of(v) > k).count() as u64;
            let index_bits = if n_overflow > 0 {
                width_of_u64(n_overflow)
            } else {
                0
            };
            let bpe = 1 + k.max(index_bits);
            let cost = src.len() as u64 * bpe as u64 + n_overflow * max_bits as u64;
            if cost < best_cost {
                best_cost = cost;
                best_k = k;
            }
        }
        assert_eq!(sel.k, best_k);
    }

    #[test]
    fn empty_input_is_header_only() {
        let packed = OutlierCodec.compress(&[]).unwrap();
        assert_eq!(packed.len(), HEADER_WORDS);
        assert_eq!(
            OutlierCodec.get(&packed, 0),
            Err(CodecError::IndexOutOfBounds { index: 0, len: 0 })
        );
    }

    #[test]
    fn values_near_31_bit_ceiling_roundtrip() {
        let src = [2_147_483_647u32, 0, 1, 2_147_483_647];
        let packed = OutlierCodec.compress(&src).unwrap();
        let mut dst = vec![0u32; src.len()];
        OutlierCodec.decompress(&packed, &mut dst).unwrap();
        assert_eq!(dst, src);
    }

    #[test]
    fn value_over_31_bits_is_rejected() {
        assert_eq!(
            OutlierCodec.compress(&[1u32 << 31]),
            Err(CodecError::ValueTooLarge { value: 1 << 31 })
        );
    }
}
