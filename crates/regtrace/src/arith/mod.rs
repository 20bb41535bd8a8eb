//! Fixed-width two's-complement arithmetic.
//!
//! Every operation is bit-exact and wraps modulo `2^width`, matching a
//! hardware register that silently overflows.
//!
//! # Layers
//!
//! | Layer | Provides |
//! |-------|----------|
//! | [`BitPrimitives`] | `bnot`, `xor`, `and`, `or` |
//! | [`RippleCarryAdder`] | `a + b + carry_in` with carry/overflow flags |
//! | [`RegisterOps`] | `inc`, `complement`, `add`, `sub` (+ overflow variants) |
//! | [`shift`] | combined-register shifts used by the engines |
//!
//! # Identities
//!
//! ```text
//! complement(x)     = bnot(x) + 1
//! sub(a, b)         = add(a, complement(b))
//! complement(complement(x)) = x
//! sub(add(a, b), b) = a
//! ```
//!
//! The free functions below use [`ScalarPrimitives`].
//!
//! ```
//! use regtrace::arith;
//! use regtrace::register::Register;
//!
//! let a: Register = "0011".parse().unwrap();
//! let m: Register = "1101".parse().unwrap();
//! assert_eq!(arith::sub(a, m).to_string(), "0110"); // 3 - (-3) = 6
//! assert_eq!(arith::to_signed_decimal(m), -3);
//! ```

pub mod adder;
pub mod ops;
pub mod primitives;
pub mod shift;

pub use adder::{AdderOutput, RippleCarryAdder};
pub use ops::RegisterOps;
pub use primitives::{BitPrimitives, ScalarPrimitives};
pub use shift::{arithmetic_right_shift, shift_left_pair};

use crate::register::Register;

/// Two's-complement negation of `b`, same width.
#[inline]
#[must_use]
pub fn complement(b: Register) -> Register {
    ScalarPrimitives.complement(b)
}

/// `a + b` modulo `2^width(a)`.
///
/// # Panics
///
/// Panics when the widths differ.
#[inline]
#[must_use]
pub fn add(a: Register, b: Register) -> Register {
    ScalarPrimitives.add(a, b)
}

/// `a - b` modulo `2^width(a)`.
///
/// # Panics
///
/// Panics when the widths differ.
#[inline]
#[must_use]
pub fn sub(a: Register, b: Register) -> Register {
    ScalarPrimitives.sub(a, b)
}

/// Reads `b` as a two's-complement integer.
///
/// Non-negative values are read directly; negative values are
/// `-(bnot(b) + 1)`, with the magnitude read as unsigned.
#[must_use]
pub fn to_signed_decimal(b: Register) -> i16 {
    if b.is_negative() {
        // Widen first: a full 16-bit 1000.. has magnitude 2^15.
        (-i32::from(complement(b).value())) as i16
    } else {
        b.value() as i16
    }
}
