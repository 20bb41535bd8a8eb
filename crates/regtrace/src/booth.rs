//! Booth's signed multiplication.
//!
//! # Registers
//!
//! | Register | Width | Role |
//! |----------|-------|------|
//! | `A` | 4 | accumulator, high half of the product |
//! | `Q` | 4 | multiplier, low half of the product |
//! | `Q₋₁` | 1 | bit last shifted out of `Q` |
//! | `M` | 4 | multiplicand, read-only |
//!
//! # Control Loop
//!
//! ```text
//! INIT → { A−M | A+M | no-op } → ASR → … (×4) → DONE
//!
//! Q0 Q₋₁ = 10  →  A = A − M
//! Q0 Q₋₁ = 01  →  A = A + M
//! Q0 Q₋₁ = 00 | 11  →  no operation
//! ```
//!
//! Every run emits exactly [`BOOTH_RECORD_COUNT`] records: the initial
//! state, an operation and a shift per iteration, and the final product.
//!
//! # Overflow
//!
//! A 4-bit `A` cannot hold `A − M` when `M = 1000` (-8): `0 − (−8) = 8`.
//! Such steps are flagged and [`BoothProduct::overflowed`] is set, since
//! the product bits no longer equal `x * y`.
//!
//! # Example
//!
//! ```
//! use regtrace::booth::BoothEngine;
//!
//! let trace = BoothEngine::new().run_bits("1101", "0111").unwrap();
//! let product = trace.outcome();
//! assert_eq!(product.product.to_string(), "11101011");
//! assert_eq!(product.value, -21);
//! assert_eq!(trace.len(), 10);
//! ```

use crate::arith::{arithmetic_right_shift, RegisterOps, ScalarPrimitives};
use crate::error::OperandError;
use crate::register::Register;
use crate::step::{Operation, Recorder, StepTag, Trace};

/// Width of the multiplicand, multiplier, and accumulator.
pub const OPERAND_WIDTH: u8 = 4;

/// Width of the product `A ‖ Q`.
pub const PRODUCT_WIDTH: u8 = 2 * OPERAND_WIDTH;

/// Records emitted by every Booth run: init + 2 per iteration + final.
pub const BOOTH_RECORD_COUNT: usize = 1 + 2 * OPERAND_WIDTH as usize + 1;

/// Result of a Booth run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoothProduct {
    /// Multiplicand as a signed decimal.
    pub multiplicand: i16,
    /// Multiplier as a signed decimal.
    pub multiplier: i16,
    /// Product bits `A ‖ Q`.
    pub product: Register,
    /// Product as a signed decimal.
    pub value: i16,
    /// The accumulator overflowed at least once; `value` is not `x * y`.
    pub overflowed: bool,
}

/// Trace of a Booth run.
pub type BoothTrace = Trace<BoothProduct>;

/// Booth multiplication engine.
///
/// Holds no state between runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoothEngine {
    ops: ScalarPrimitives,
}

impl BoothEngine {
    /// Creates an engine over the scalar primitives.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ops: ScalarPrimitives,
        }
    }

    /// Multiplies two 4-bit bit strings.
    ///
    /// # Errors
    ///
    /// Any [`OperandError`] from parsing; both strings must be exactly
    /// [`OPERAND_WIDTH`] binary digits.
    pub fn run_bits(&self, multiplicand: &str, multiplier: &str) -> Result<BoothTrace, OperandError> {
        self.run(
            Register::from_bits(multiplicand, OPERAND_WIDTH)?,
            Register::from_bits(multiplier, OPERAND_WIDTH)?,
        )
    }

    /// Multiplies `multiplicand × multiplier`, recording every step.
    ///
    /// # Errors
    ///
    /// [`OperandError::Width`] unless both registers are [`OPERAND_WIDTH`]
    /// bits wide. No step is recorded in that case.
    pub fn run(&self, multiplicand: Register, multiplier: Register) -> Result<BoothTrace, OperandError> {
        check_width(multiplicand)?;
        check_width(multiplier)?;

        let m = multiplicand;
        let mut a = Register::zero(OPERAND_WIDTH);
        let mut q = multiplier;
        let mut q_minus_1 = Register::zero(1);
        let mut overflowed = false;

        tracing::debug!(%m, %q, "booth multiplication");
        let mut recorder = Recorder::with_capacity(BOOTH_RECORD_COUNT);
        recorder.push(
            StepTag::Init,
            (Some(a), q, Some(q_minus_1)),
            Operation::BoothInit,
            "Initial state",
            false,
        );

        for iteration in 1..=q.width() {
            let (operation, overflow) = match (q.lsb(), q_minus_1.lsb()) {
                (true, false) => {
                    let out = self.ops.sub_with_overflow(a, m);
                    a = out.sum;
                    (Operation::BoothSubtract, out.overflow)
                }
                (false, true) => {
                    let out = self.ops.add_with_overflow(a, m);
                    a = out.sum;
                    (Operation::BoothAdd, out.overflow)
                }
                _ => (Operation::NoOperation, false),
            };
            if overflow {
                tracing::warn!(iteration, %a, %m, "accumulator overflow");
            }
            overflowed |= overflow;

            let pair = format!("{}{}", u8::from(q.lsb()), q_minus_1);
            let note = match operation {
                Operation::NoOperation => format!("Q0 Q-1 = {pair} → No Operation"),
                _ => format!("Q0 Q-1 = {pair} → {}", operation.label()),
            };
            recorder.push(
                StepTag::Phase {
                    iteration,
                    phase: 1,
                },
                (Some(a), q, Some(q_minus_1)),
                operation,
                note,
                overflow,
            );

            (a, q, q_minus_1) = arithmetic_right_shift(a, q, q_minus_1);
            recorder.push(
                StepTag::Phase {
                    iteration,
                    phase: 2,
                },
                (Some(a), q, Some(q_minus_1)),
                Operation::ArithmeticShiftRight,
                "ASR → A, Q, Q-1 shifted right",
                false,
            );
        }

        let product = a.concat(q);
        let outcome = BoothProduct {
            multiplicand: m.to_signed(),
            multiplier: multiplier.to_signed(),
            product,
            value: product.to_signed(),
            overflowed,
        };
        let mut note = format!(
            "Final Product: {} (Decimal : {} X {} = {})",
            product, outcome.multiplicand, outcome.multiplier, outcome.value
        );
        if overflowed {
            note.push_str(" [accumulator overflow]");
        }
        recorder.push(
            StepTag::Summary,
            (Some(a), q, Some(q_minus_1)),
            Operation::FinalProduct,
            note,
            overflowed,
        );

        tracing::debug!(product = %outcome.product, value = outcome.value, overflowed, "booth done");
        Ok(recorder.finish(outcome))
    }
}

fn check_width(operand: Register) -> Result<(), OperandError> {
    if operand.width() != OPERAND_WIDTH {
        return Err(OperandError::Width {
            expected: OPERAND_WIDTH,
            actual: operand.width() as usize,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reg(bits: &str) -> Register {
        bits.parse().unwrap()
    }

    #[test]
    fn test_negative_times_positive() {
        let trace = BoothEngine::new().run_bits("1101", "0111").unwrap();
        let out = trace.outcome();
        assert_eq!(out.product, reg("11101011"));
        assert_eq!(out.value, -21);
        assert_eq!(out.multiplicand, -3);
        assert_eq!(out.multiplier, 7);
        assert!(!out.overflowed);
    }

    #[test]
    fn test_three_times_three() {
        let trace = BoothEngine::new().run_bits("0011", "0011").unwrap();
        assert_eq!(trace.outcome().value, 9);
        assert_eq!(trace.outcome().product, reg("00001001"));
    }

    #[test]
    fn test_record_count_and_order() {
        let trace = BoothEngine::new().run_bits("0101", "1010").unwrap();
        assert_eq!(trace.len(), BOOTH_RECORD_COUNT);

        let records = trace.records();
        assert_eq!(records[0].operation, Operation::BoothInit);
        for iteration in 0..4 {
            let op = records[1 + 2 * iteration].operation;
            assert!(matches!(
                op,
                Operation::BoothSubtract | Operation::BoothAdd | Operation::NoOperation
            ));
            assert_eq!(
                records[2 + 2 * iteration].operation,
                Operation::ArithmeticShiftRight
            );
        }
        assert_eq!(records[9].operation, Operation::FinalProduct);
        assert!(records.iter().all(|r| r.q_minus_1.is_some()));
    }

    #[test]
    fn test_register_evolution() {
        // -3 x 7: Q = 0111, Q-1 = 0
        let trace = BoothEngine::new().run_bits("1101", "0111").unwrap();
        let r = trace.records();

        // 1.1: pair 10 → A = 0000 - 1101 = 0011
        assert_eq!(r[1].operation, Operation::BoothSubtract);
        assert_eq!(r[1].a, Some(reg("0011")));
        assert_eq!(r[1].q, reg("0111"));

        // 1.2: ASR 0011 0111 0 → 0001 1011 1
        assert_eq!(r[2].a, Some(reg("0001")));
        assert_eq!(r[2].q, reg("1011"));
        assert_eq!(r[2].q_minus_1, Some(reg("1")));

        // 2.1: pair 11 → no-op
        assert_eq!(r[3].operation, Operation::NoOperation);
        assert_eq!(r[3].a, Some(reg("0001")));
    }

    #[test]
    fn test_most_negative_multiplicand_overflows() {
        let trace = BoothEngine::new().run_bits("1000", "0001").unwrap();
        let out = trace.outcome();
        assert!(out.overflowed);
        assert_ne!(out.value, -8);
        assert!(trace.records()[1].overflow);
    }

    #[test]
    fn test_most_negative_times_zero_is_exact() {
        let trace = BoothEngine::new().run_bits("1000", "0000").unwrap();
        assert_eq!(trace.outcome().value, 0);
        assert!(!trace.outcome().overflowed);
    }

    #[test]
    fn test_rejects_wrong_width() {
        let engine = BoothEngine::new();
        assert_eq!(
            engine.run(reg("101"), reg("0011")).unwrap_err(),
            OperandError::Width {
                expected: 4,
                actual: 3
            }
        );
        assert!(matches!(
            engine.run_bits("0011", "00112"),
            Err(OperandError::InvalidDigit { digit: '2', .. })
        ));
    }
}
