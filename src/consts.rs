//! Numeric constants shared by every codec: word size, header geometry, and
//! the magic sentinel. Centralized here so the magic number and header
//! geometry are not scattered as magic numbers through the codec bodies.

/// Number of bits in one packed word (`u32`).
pub(crate) const WORD_BITS: u32 = 32;

/// Sentinel value every packed buffer must begin with.
pub const MAGIC: u32 = 0x4650_4B31; // ASCII "FPK1"

/// Number of 32-bit words occupied by the header.
pub const HEADER_WORDS: usize = 5;
