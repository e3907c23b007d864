//! Packed-contiguous codec (tag 0): `n` fields of width `k` packed back to
//! back with no padding. A field may straddle two adjacent words — this is
//! the densest of the three layouts and the simplest to reason about, at
//! the cost of every read needing the cross-word path.

use crate::base::{allocate_with_header, minimum_width};
use crate::bitio::{read_bits, write_bits};
use crate::consts::WORD_BITS;
use crate::dispatch::{Codec, CodecKind};
use crate::error::CodecError;
use crate::header::{self, HEADER_WORDS};

/// Bit position of logical element `i` in a packed-contiguous buffer with
/// field width `k`.
#[inline(always)]
fn bit_pos(i: usize, k: u32) -> u64 {
    HEADER_WORDS as u64 * WORD_BITS as u64 + i as u64 * k as u64
}

/// The packed-contiguous codec. Zero-sized; all state lives in the packed
/// buffer itself.
pub struct ContiguousCodec;

impl Codec for ContiguousCodec {
    fn kind(&self) -> CodecKind {
        CodecKind::Contiguous
    }

    fn compress(&self, src: &[u32]) -> Result<Vec<u32>, CodecError> {
        let k = minimum_width(src)?;
        let n = src.len();
        let data_bits = n as u64 * k as u64;
        let mut buf = allocate_with_header(data_bits)?;
        header::write_header(&mut buf, n, CodecKind::Contiguous, k, k, 0);
        for (i, &v) in src.iter().enumerate() {
            write_bits(&mut buf, bit_pos(i, k), k, v);
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
            dst[i] = read_bits(packed, bit_pos(i, k), k);
        }
        Ok(())
    }

    fn get(&self, packed: &[u32], index: usize) -> Result<u32, CodecError> {
        let n = header::n(packed)?;
        if index >= n {
            return Err(CodecError::IndexOutOfBounds { index, len: n });
        }
        let k = header::k(packed)?;
        Ok(read_bits(packed, bit_pos(index, k), k))
    }
}
