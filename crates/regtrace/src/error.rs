//! Operand errors raised at the engine boundary.
//!
//! Engines are total over well-formed registers. Everything that can go
//! wrong with caller input is rejected here, before a single step runs.

use thiserror::Error;

/// Error when building or loading an operand register.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OperandError {
    /// The operand string contained no bits.
    #[error("operand is empty")]
    Empty,

    /// A character other than `'0'` or `'1'`.
    #[error("invalid binary digit '{digit}' at position {position}")]
    InvalidDigit {
        /// The offending character.
        digit: char,
        /// Position in the string (0 = leftmost).
        position: usize,
    },

    /// The operand does not have the width the register requires.
    #[error("expected a {expected}-bit operand, got {actual} bits")]
    Width {
        /// Register width.
        expected: u8,
        /// Width supplied by the caller.
        actual: usize,
    },

    /// A decimal value that two's complement cannot hold in `width` bits.
    #[error("{value} does not fit in a {width}-bit two's-complement register")]
    OutOfRange {
        /// The decimal value.
        value: i32,
        /// Target register width.
        width: u8,
    },

    /// A register wider than the engine's storage word.
    #[error("registers are limited to {max} bits, requested {requested}")]
    TooWide {
        /// Requested width.
        requested: usize,
        /// Maximum supported width.
        max: u8,
    },
}
