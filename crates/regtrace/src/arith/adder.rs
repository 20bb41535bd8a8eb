//! Ripple-carry adder over the bitwise primitives.
//!
//! # Algorithm
//!
//! For operands `a` and `b` of width n, with carry-in `c[-1]`:
//!
//! - Propagate: `p = a XOR b`
//! - Generate: `g = a AND b`
//! - Carry: `c[i] = g[i] OR (p[i] AND c[i-1])`, from the LSB upward
//! - Sum: `s = p XOR (carries shifted into position)`
//!
//! The carry out of the MSB is dropped, so the sum wraps modulo 2^n the way a
//! hardware register does. The carries into and out of the MSB are kept to
//! report signed overflow.

use super::primitives::BitPrimitives;
use crate::register::Register;

/// Result of one pass through the adder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AdderOutput {
    /// Sum modulo 2^width.
    pub sum: Register,
    /// Carry out of the most significant bit.
    pub carry_out: bool,
    /// Signed overflow: carry into the MSB differs from carry out of it.
    pub overflow: bool,
}

/// Ripple-carry adder.
///
/// Stateless; a namespace for the adder algorithm.
pub struct RippleCarryAdder;

impl RippleCarryAdder {
    /// Adds `a + b + carry_in`.
    ///
    /// # Panics
    ///
    /// Panics when the widths of `a` and `b` differ.
    pub fn add<P>(prims: &P, a: Register, b: Register, carry_in: bool) -> AdderOutput
    where
        P: BitPrimitives + ?Sized,
    {
        let propagate = prims.xor(a, b);
        let generate = prims.and(a, b);
        let width = a.width();

        // carry_word holds c[i-1] at bit position i.
        let mut carry = carry_in;
        let mut carry_word = 0u16;
        let mut carry_into_msb = false;
        for position in 0..width {
            if position == width - 1 {
                carry_into_msb = carry;
            }
            carry_word |= (carry as u16) << position;
            let index = width - 1 - position;
            carry = generate.bit(index) || (propagate.bit(index) && carry);
        }

        let sum = prims.xor(propagate, Register::new(carry_word, width));
        AdderOutput {
            sum,
            carry_out: carry,
            overflow: carry_into_msb != carry,
        }
    }
}
