//! The codec discriminator, the shared `Codec` trait, and dispatch between
//! the three concrete codecs.

use crate::contiguous::ContiguousCodec;
use crate::aligned::AlignedCodec;
use crate::error::CodecError;
use crate::header;
use crate::outlier::OutlierCodec;

/// Which of the three codecs produced (or should produce) a packed buffer.
///
/// The discriminant values are part of the on-disk format: they are written
/// verbatim into header word 2, so their ordering must never change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u32)]
pub enum CodecKind {
    /// Packed-contiguous: `n` fields of width `k`, may straddle words.
    Contiguous = 0,
    /// Word-aligned: `⌊32/k⌋` fields per word, no field straddles.
    Aligned = 1,
    /// Outlier-segregated: inline main region plus a full-width overflow region.
    Outlier = 2,
}

impl CodecKind {
    /// Parses a raw header tag, rejecting anything outside `0..=2`.
    pub fn from_tag(tag: u32) -> Result<Self, CodecError> {
        match tag {
            0 => Ok(CodecKind::Contiguous),
            1 => Ok(CodecKind::Aligned),
            2 => Ok(CodecKind::Outlier),
            _ => Err(CodecError::UnknownCodec { tag }),
        }
    }

    /// Returns the codec instance implementing this discriminant.
    pub fn codec(self) -> &'static dyn Codec {
        match self {
            CodecKind::Contiguous => &ContiguousCodec,
            CodecKind::Aligned => &AlignedCodec,
            CodecKind::Outlier => &OutlierCodec,
        }
    }
}

/// The operation set every codec implements: full-array compression,
/// full-array decompression, and O(1) random access to a single element.
pub trait Codec {
    /// Which discriminant this codec writes into the header.
    fn kind(&self) -> CodecKind;

    /// Compresses `src` into a freshly allocated, self-describing packed
    /// buffer.
    fn compress(&self, src: &[u32]) -> Result<Vec<u32>, CodecError>;

    /// Decompresses `packed` into `dst`, which must be at least as long as
    /// the element count recorded in the header.
    fn decompress(&self, packed: &[u32], dst: &mut [u32]) -> Result<(), CodecError>;

    /// Returns the element at logical `index` without materializing any
    /// other element.
    fn get(&self, packed: &[u32], index: usize) -> Result<u32, CodecError>;
}

/// Looks up the codec that produced `packed` by reading its header, without
/// requiring the caller to remember which codec they used.
pub fn codec_for_buffer(packed: &[u32]) -> Result<&'static dyn Codec, CodecError> {
    Ok(header::codec(packed)?.codec())
}
