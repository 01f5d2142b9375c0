// SPDX-FileCopyrightText: 2024 Nils Jochem
// SPDX-License-Identifier: MPL-2.0
//! Conversion between decimal text and magnitudes.
//!
//! Both directions work on base `10^9` "super limbs". Small numbers are folded one super limb at a time,
//! big ones are split recursively along the powers `(10^9)^(2^k)`, see [`PowersOf1e9`].

mod format;
mod number_buffer;
mod parse;
mod powers;

pub use format::{format_decimal, format_decimal_with, to_super_limbs};
pub use number_buffer::NumberBuffer;
pub use parse::{magnitude_of, parse_decimal, parse_decimal_with};
pub use powers::PowersOf1e9;

/// `10^9`, the biggest power of ten that fits into 32 bits
pub const TEN_POW_MAX_PARTIAL: u32 = 1_000_000_000;
/// number of decimal digits in one super limb
pub const MAX_PARTIAL_DIGITS: usize = 9;
/// the most decimal digits in front of the decimal point a parsed number may have
pub const MAX_SCALE: usize = i32::MAX as usize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseError {
    #[display("no digits to parse")]
    Empty,
    #[display("unexpected {digit:?} at position {position}")]
    InvalidDigit { digit: char, position: usize },
    #[display("non zero digit after the decimal point at position {position}")]
    NonZeroFraction { position: usize },
    #[display("number has too many decimal digits")]
    Overflow,
}
impl ParseError {
    /// overflow is the only error a syntactically valid number can produce
    pub const fn is_overflow(&self) -> bool {
        matches!(self, Self::Overflow)
    }
}
