//! Fixed-width bit-packing codecs for sequences of non-negative 32-bit
//! integers.
//!
//! Three codecs share one operation set — [`Codec::compress`],
//! [`Codec::decompress`], [`Codec::get`] — and trade off density against
//! the simplicity of random access:
//!
//! - [`ContiguousCodec`]: `n` fields of width `k` packed with no padding;
//!   densest, but every access may straddle a word boundary.
//! - [`AlignedCodec`]: fields padded out so none ever straddles a word;
//!   faster random access, at the cost of up to `32 mod k` wasted bits per
//!   word.
//! - [`OutlierCodec`]: keeps most values inline at a small width and
//!   segregates rare large values into a full-width overflow region,
//!   choosing the inline width that minimizes total packed size.
//!
//! Every packed buffer is a self-describing `Vec<u32>` / `&[u32]`: its
//! first five words are a [`header`] that a caller can read back without
//! remembering which codec produced it, via [`dispatch::codec_for_buffer`].

mod aligned;
mod base;
mod bitio;
mod consts;
mod contiguous;
mod dispatch;
mod error;
pub mod header;
mod outlier;

// ─────────────────────────────────────────────────────────────────────────────
// Public surface
// ─────────────────────────────────────────────────────────────────────────────

/// Shared operation set implemented by every codec.
pub use dispatch::Codec;
/// Discriminates the three codecs; stable, on-disk-format values.
pub use dispatch::CodecKind;
/// Looks up the codec that produced a packed buffer from its header.
pub use dispatch::codec_for_buffer;

/// Errors returned by compression, decompression, and random access.
pub use error::CodecError;

/// The packed-contiguous codec (header codec tag 0).
pub use contiguous::ContiguousCodec;
/// The word-aligned codec (header codec tag 1).
pub use aligned::AlignedCodec;
/// The outlier-segregated codec (header codec tag 2).
pub use outlier::OutlierCodec;

/// Number of 32-bit words occupied by every packed buffer's header.
pub use header::HEADER_WORDS;
/// The fixed sentinel every packed buffer begins with.
pub use header::MAGIC;

/// Minimum number of bits needed to represent `v`.
pub use base::width_of;
