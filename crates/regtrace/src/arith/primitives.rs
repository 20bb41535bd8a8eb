//! The bitwise primitives every register operation is built from.
//!
//! - `bnot`: bitwise NOT (unary)
//! - `xor`: bitwise XOR (binary)
//! - `and`: bitwise AND (binary)
//! - `or`: bitwise OR (binary)
//!
//! All four keep the width of their operands. Binary primitives require
//! equal widths; mixing widths is a caller contract violation.

use crate::register::Register;

/// Width-preserving bitwise operations on registers.
///
/// Derived arithmetic (complement, add, sub) is layered on top of this trait
/// by [`RegisterOps`](super::ops::RegisterOps).
pub trait BitPrimitives {
    /// Bitwise NOT, masked to the register width.
    ///
    /// Self-inverse: `bnot(bnot(x)) = x`.
    fn bnot(&self, a: Register) -> Register;

    /// Bitwise XOR.
    ///
    /// # Panics
    ///
    /// Implementations panic when widths differ.
    fn xor(&self, a: Register, b: Register) -> Register;

    /// Bitwise AND.
    ///
    /// # Panics
    ///
    /// Implementations panic when widths differ.
    fn and(&self, a: Register, b: Register) -> Register;

    /// Bitwise OR.
    ///
    /// # Panics
    ///
    /// Implementations panic when widths differ.
    fn or(&self, a: Register, b: Register) -> Register;
}

/// Reference implementation over the register's storage word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScalarPrimitives;

#[inline]
fn same_width(a: Register, b: Register) -> u8 {
    assert_eq!(
        a.width(),
        b.width(),
        "register widths differ: {} vs {}",
        a,
        b
    );
    a.width()
}

impl BitPrimitives for ScalarPrimitives {
    #[inline]
    fn bnot(&self, a: Register) -> Register {
        Register::new(!a.value() & a.mask(), a.width())
    }

    #[inline]
    fn xor(&self, a: Register, b: Register) -> Register {
        let width = same_width(a, b);
        Register::new(a.value() ^ b.value(), width)
    }

    #[inline]
    fn and(&self, a: Register, b: Register) -> Register {
        let width = same_width(a, b);
        Register::new(a.value() & b.value(), width)
    }

    #[inline]
    fn or(&self, a: Register, b: Register) -> Register {
        let width = same_width(a, b);
        Register::new(a.value() | b.value(), width)
    }
}
