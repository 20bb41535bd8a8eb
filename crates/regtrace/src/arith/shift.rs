//! Combined-register shifts.
//!
//! Both engines shift several registers as one wide register and split the
//! result back into their starting widths.

use crate::register::Register;

/// Arithmetic right shift of `A ‖ Q ‖ Q₋₁` by one bit.
///
/// The sign bit of `A` is replicated into the vacated MSB. The bit shifted out
/// of `Q` becomes the new `Q₋₁`; the old `Q₋₁` falls off the end.
///
/// ```
/// use regtrace::arith::arithmetic_right_shift;
///
/// let (a, q, q1) = arithmetic_right_shift(
///     "1101".parse().unwrap(),
///     "0111".parse().unwrap(),
///     "0".parse().unwrap(),
/// );
/// assert_eq!((a.to_string(), q.to_string(), q1.to_string()),
///            ("1110".into(), "1011".into(), "1".into()));
/// ```
///
/// # Panics
///
/// Panics when the combined width exceeds the register storage word.
#[must_use]
pub fn arithmetic_right_shift(a: Register, q: Register, q_minus_1: Register) -> (Register, Register, Register) {
    let combined = a.concat(q).concat(q_minus_1);
    let width = combined.width();
    let sign = if combined.msb() { 1u16 << (width - 1) } else { 0 };
    let shifted = Register::new((combined.value() >> 1) | sign, width);

    let (a_q, q_minus_1) = shifted.split(width - q_minus_1.width());
    let (a, q) = a_q.split(a.width());
    (a, q, q_minus_1)
}

/// Logical left shift of `A ‖ Q` by one bit.
///
/// A zero fills the vacated LSB of `Q`; the MSB of `A` is discarded.
///
/// # Panics
///
/// Panics when the combined width exceeds the register storage word.
#[must_use]
pub fn shift_left_pair(a: Register, q: Register) -> (Register, Register) {
    let combined = a.concat(q);
    let shifted = Register::new(combined.value() << 1, combined.width());
    shifted.split(a.width())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reg(bits: &str) -> Register {
        bits.parse().unwrap()
    }

    #[test]
    fn test_right_shift_replicates_sign() {
        let (a, q, q1) = arithmetic_right_shift(reg("1000"), reg("0001"), reg("0"));
        assert_eq!(a, reg("1100"));
        assert_eq!(q, reg("0000"));
        assert_eq!(q1, reg("1"));
    }

    #[test]
    fn test_right_shift_positive() {
        let (a, q, q1) = arithmetic_right_shift(reg("0011"), reg("0011"), reg("1"));
        assert_eq!(a, reg("0001"));
        assert_eq!(q, reg("1001"));
        assert_eq!(q1, reg("1"));
    }

    #[test]
    fn test_left_shift_pair() {
        let (a, q) = shift_left_pair(reg("00000"), reg("1011"));
        assert_eq!(a, reg("00001"));
        assert_eq!(q, reg("0110"));

        let (a, q) = shift_left_pair(reg("10000"), reg("0001"));
        assert_eq!(a, reg("00000"));
        assert_eq!(q, reg("0010"));
    }
}
