//! The fixed five-word preamble that makes a packed buffer self-describing.
//!
//! Layout (all words 32-bit, native array order):
//!
//! | word | contents                                         |
//! |------|---------------------------------------------------|
//! | 0    | magic sentinel                                   |
//! | 1    | `n`, the element count                           |
//! | 2    | codec tag (0 contiguous, 1 word-aligned, 2 outlier) |
//! | 3    | `k`                                               |
//! | 4    | `bits_per_element << 16 \| bits_per_overflow`     |

use crate::consts::WORD_BITS;
pub use crate::consts::{HEADER_WORDS, MAGIC};
use crate::dispatch::CodecKind;
use crate::error::CodecError;

/// Returns `true` if `buf` is non-empty and its first word equals [`MAGIC`].
#[inline]
pub fn magic_ok(buf: &[u32]) -> bool {
    matches!(buf.first(), Some(&w) if w == MAGIC)
}

/// Validates the magic sentinel, the minimum header length, and the codec
/// tag range, so every getter below fails the same way `codec()` does
/// rather than returning a field read out of a header with an unknown tag.
fn check(buf: &[u32]) -> Result<(), CodecError> {
    if !magic_ok(buf) {
        return Err(CodecError::InvalidMagic);
    }
    if buf.len() < HEADER_WORDS {
        return Err(CodecError::InvalidMagic);
    }
    CodecKind::from_tag(buf[2])?;
    Ok(())
}

/// Returns the element count recorded in the header.
#[inline]
pub fn n(buf: &[u32]) -> Result<usize, CodecError> {
    check(buf)?;
    Ok(buf[1] as usize)
}

/// Returns the codec that produced this buffer, validating the tag range.
#[inline]
pub fn codec(buf: &[u32]) -> Result<CodecKind, CodecError> {
    check(buf)?;
    CodecKind::from_tag(buf[2])
}

/// Returns `k`, the requested/inline bit width recorded in the header.
#[inline]
pub fn k(buf: &[u32]) -> Result<u32, CodecError> {
    check(buf)?;
    Ok(buf[3])
}

/// Returns the width in bits of one main-region entry.
#[inline]
pub fn bits_per_element(buf: &[u32]) -> Result<u32, CodecError> {
    check(buf)?;
    Ok(buf[4] >> 16)
}

/// Returns the width in bits of one overflow-region entry (0 for codecs
/// without an overflow region).
#[inline]
pub fn bits_per_overflow(buf: &[u32]) -> Result<u32, CodecError> {
    check(buf)?;
    Ok(buf[4] & 0xFFFF)
}

/// Returns the word offset at which the overflow region begins, i.e. the
/// first word not covered by the main region.
#[inline]
pub fn overflow_word_offset(buf: &[u32]) -> Result<usize, CodecError> {
    let n = n(buf)? as u64;
    let bpe = bits_per_element(buf)? as u64;
    let total_bits = HEADER_WORDS as u64 * WORD_BITS as u64 + n * bpe;
    Ok((total_bits / WORD_BITS as u64) as usize)
}

/// Writes the five header words into `buf[0..5]`.
pub fn write_header(
    buf: &mut [u32],
    n: usize,
    codec: CodecKind,
    k: u32,
    bits_per_element: u32,
    bits_per_overflow: u32,
) {
    buf[0] = MAGIC;
    buf[1] = n as u32;
    buf[2] = codec as u32;
    buf[3] = k;
    buf[4] = (bits_per_element << 16) | (bits_per_overflow & 0xFFFF);
}
