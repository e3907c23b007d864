//! Word-aligned codec (tag 1): `⌊32/k⌋` fields packed into each 32-bit word,
//! with the unused high bits of the word left at zero. No field ever
//! straddles a word boundary, so every access takes the branch-free in-word
//! path at the cost of up to `32 mod k` wasted bits per word.

use crate::base::{allocate_with_header, minimum_width};
use crate::bitio::{read_bits_in_word, write_bits_in_word};
use crate::consts::WORD_BITS;
use crate::dispatch::{Codec, CodecKind};
use crate::error::CodecError;
use crate::header::{self, HEADER_WORDS};

/// Number of `k`-bit fields that fit in one 32-bit word.
#[inline(always)]
fn elements_per_word(k: u32) -> u32 {
    (WORD_BITS / k).max(1)
}

/// Bit position of logical element `i` in a word-aligned buffer with field
/// width `k`.
#[inline(always)]
fn bit_pos(i: usize, k: u32) -> u64 {
    let e = elements_per_word(k) as u64;
    let word = HEADER_WORDS as u64 + i as u64 / e;
    let offset = (i as u64 % e) * k as u64;
    word * WORD_BITS as u64 + offset
}

/// The word-aligned codec. Zero-sized; all state lives in the packed buffer.
pub struct AlignedCodec;

impl Codec for AlignedCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::Aligned
    }

    fn compress(&self, src: &[u32]) -> Result<Vec<u32>, CodecError> {
        let k = minimum_width(src)?;
        let n = src.len();
        let e = elements_per_word(k) as usize;
        let data_words = if n == 0 { 0 } else { n.div_ceil(e) };
        let mut buf = allocate_with_header(data_words as u64 * WORD_BITS as u64)?;
        header::write_header(&mut buf, n, CodecKind::Aligned, k, k, 0);
        for (i, &v) in src.iter().enumerate() {
            write_bits_in_word(&mut buf, bit_pos(i, k), k, v);
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
        let k = header::k(packed)?;
        for i in 0..n {
            dst[i] = read_bits_in_word(packed, bit_pos(i, k), k);
        }
        Ok(())
    }

    fn get(&self, packed: &[u32], index: usize) -> Result<u32, CodecError> {
        let n = header::n(packed)?;
        if index >= n {
            return Err(CodecError::IndexOutOfBounds { index, len: n });
        }
        let k = header::k(packed)?;
        Ok(read_bits_in_word(packed, bit_pos(index, k), k))
    }
}
