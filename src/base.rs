//! Helpers shared by all three codecs: minimum bit-width scanning and
//! header-aware buffer allocation. No codec-specific layout knowledge lives
//! here.

use crate::error::CodecError;
use crate::header::HEADER_WORDS;

/// The largest value a 31-bit field may hold.
const MAX_31_BIT_VALUE: u32 = (1u32 << 31) - 1;

/// Minimum number of bits needed to represent `v`: 1 for `v == 0`, otherwise
/// `32 - v.leading_zeros()`.
#[inline]
pub fn width_of(v: u32) -> u32 {
    if v == 0 {
        1
    } else {
        32 - v.leading_zeros()
    }
}

/// Scans `seq` for its maximum value and returns the minimum bit width
/// needed to represent it. Fails if any value needs more than 31 bits.
pub fn minimum_width(seq: &[u32]) -> Result<u32, CodecError> {
    let mut max = 0u32;
    for &v in seq {
        if v > MAX_31_BIT_VALUE {
            return Err(CodecError::ValueTooLarge { value: v });
        }
        if v > max {
            max = v;
        }
    }
    Ok(width_of(max))
}

/// Allocates a zero-initialized word vector of `header_words` header words
/// plus enough words to hold `data_bits` bits of packed data, computing the
/// total in 64-bit arithmetic and rejecting sizes that would not fit in the
/// native word-count domain.
pub fn allocate(header_words: usize, data_bits: u64) -> Result<Vec<u32>, CodecError> {
    let data_words = data_bits.div_ceil(32);
    let total_words = (header_words as u64)
        .checked_add(data_words)
        .ok_or(CodecError::Capacity)?;
    let total_words: usize = total_words.try_into().map_err(|_| CodecError::Capacity)?;
    Ok(vec![0u32; total_words])
}

/// Convenience wrapper over [`allocate`] using the standard header size.
#[inline]
pub fn allocate_with_header(data_bits: u64) -> Result<Vec<u32>, CodecError> {
    allocate(HEADER_WORDS, data_bits)
}
