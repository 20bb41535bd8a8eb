//! Derived register arithmetic built from the bitwise primitives.
//!
//! The `RegisterOps` trait provides default implementations of every
//! operation the engines need, using only the four primitives plus the
//! ripple-carry adder.

use super::adder::{AdderOutput, RippleCarryAdder};
use super::primitives::{BitPrimitives, ScalarPrimitives};
use crate::register::Register;

/// Width-preserving two's-complement arithmetic.
///
/// All results wrap modulo `2^width` of the primary operand. The
/// `*_with_overflow` variants also report whether the exact signed result
/// left the register's range.
pub trait RegisterOps: BitPrimitives {
    /// Increment: `a + 1`.
    #[inline]
    fn inc(&self, a: Register) -> Register {
        RippleCarryAdder::add(self, a, Register::zero(a.width()), true).sum
    }

    /// Two's-complement negation: `bnot(a) + 1`.
    ///
    /// Self-inverse: `complement(complement(x)) = x`. The most negative value
    /// (`1000` for 4 bits) is its own complement.
    #[inline]
    fn complement(&self, a: Register) -> Register {
        self.inc(self.bnot(a))
    }

    /// `a + b`, reporting signed overflow.
    ///
    /// # Panics
    ///
    /// Panics when the widths differ.
    #[inline]
    fn add_with_overflow(&self, a: Register, b: Register) -> AdderOutput {
        RippleCarryAdder::add(self, a, b, false)
    }

    /// `a + b` modulo `2^width`.
    ///
    /// # Panics
    ///
    /// Panics when the widths differ.
    #[inline]
    fn add(&self, a: Register, b: Register) -> Register {
        self.add_with_overflow(a, b).sum
    }

    /// `a - b`, reporting signed overflow.
    ///
    /// Computed as `a + bnot(b) + 1` in a single adder pass, which yields the
    /// same sum as `add(a, complement(b))` while still seeing the carries of
    /// the real subtraction. That matters for `b = 1000`: its complement is
    /// itself, yet `0 - (-8)` overflows a 4-bit register.
    ///
    /// # Panics
    ///
    /// Panics when the widths differ.
    #[inline]
    fn sub_with_overflow(&self, a: Register, b: Register) -> AdderOutput {
        RippleCarryAdder::add(self, a, self.bnot(b), true)
    }

    /// `a - b` modulo `2^width`.
    ///
    /// # Panics
    ///
    /// Panics when the widths differ.
    #[inline]
    fn sub(&self, a: Register, b: Register) -> Register {
        self.sub_with_overflow(a, b).sum
    }
}

impl RegisterOps for ScalarPrimitives {}
