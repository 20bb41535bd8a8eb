//! Non-restoring division.
//!
//! # Registers
//!
//! | Register | Width | Role |
//! |----------|-------|------|
//! | `A` | 5 | running remainder, may go negative mid-run |
//! | `Q` | 4 | dividend, shifted out as quotient bits shift in |
//! | `M` | 5 | divisor, zero-extended, read-only |
//!
//! # Control Loop
//!
//! ```text
//! INIT → divisor == 0 ? ERROR
//!      → (SHIFT → ADJUST → SET_Q0) ×4 → RESTORE? → DONE
//!
//! SHIFT   A‖Q <<= 1
//! ADJUST  A ≥ 0 ? A − M : A + M         (= A_temp)
//! SET_Q0  Q0 = A_temp ≥ 0 ? 1 : 0;  A = A_temp
//! RESTORE A < 0 after the last iteration ? A + M
//! ```
//!
//! # Signedness
//!
//! [`DivisionEngine::run`] reads its 4-bit dividend and divisor as unsigned
//! magnitudes (0..=15): `1011 ÷ 0011` is `11 ÷ 3 = 3 r 2`. The quotient is
//! unsigned; the remainder is `A` read as 5-bit two's complement, which is
//! never negative once the restore step has run.
//!
//! [`DivisionEngine::run_signed`] reads both operands as two's complement,
//! divides their magnitudes, and applies truncating-division signs.
//!
//! # Overflow
//!
//! The 5-bit accumulator holds every intermediate remainder for divisors up
//! to 8. For divisors 9..=15 a left shift can push a significant bit out of
//! `A`; that `Shift Left` record is flagged and
//! [`DivisionResult::overflowed`] is set.
//!
//! # Example
//!
//! ```
//! use regtrace::division::{DivisionEngine, DivisionOutcome};
//!
//! let trace = DivisionEngine::new().run_bits("1011", "0011").unwrap();
//! let DivisionOutcome::Completed(result) = trace.outcome() else {
//!     panic!("divisor is non-zero");
//! };
//! assert_eq!(result.quotient.to_string(), "0011");
//! assert_eq!(result.remainder.to_string(), "00010");
//! ```

use crate::arith::{complement, shift_left_pair, RegisterOps, ScalarPrimitives};
use crate::error::OperandError;
use crate::register::Register;
use crate::step::{Operation, Recorder, StepTag, Trace};

/// Width of the dividend, divisor operand, and quotient.
pub const DIVIDEND_WIDTH: u8 = 4;

/// Width of the accumulator `A` and the loaded divisor `M`.
pub const ACCUMULATOR_WIDTH: u8 = DIVIDEND_WIDTH + 1;

/// Records of a completed run without the restore step: init, three per
/// iteration, and the final result.
pub const DIVISION_MIN_RECORD_COUNT: usize = 1 + 3 * DIVIDEND_WIDTH as usize + 1;

/// Quotient and remainder of a completed unsigned run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DivisionResult {
    /// Dividend as an unsigned decimal.
    pub dividend: u16,
    /// Divisor as an unsigned decimal.
    pub divisor: u16,
    /// Quotient bits (final `Q`).
    pub quotient: Register,
    /// Remainder bits (final `A`).
    pub remainder: Register,
    /// Quotient as an unsigned decimal.
    pub quotient_value: u16,
    /// Remainder as a signed decimal.
    pub remainder_value: i16,
    /// A shift lost a significant bit of `A`; quotient and remainder are
    /// not the true ones.
    pub overflowed: bool,
}

/// Quotient and remainder of a completed signed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignedDivisionResult {
    /// Dividend as a signed decimal.
    pub dividend: i16,
    /// Divisor as a signed decimal.
    pub divisor: i16,
    /// Quotient, truncated toward zero.
    pub quotient: i16,
    /// Remainder, with the sign of the dividend.
    pub remainder: i16,
    /// The unsigned run over the operand magnitudes.
    pub magnitudes: DivisionResult,
}

/// How a division run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DivisionOutcome<R = DivisionResult> {
    /// All iterations ran.
    Completed(R),
    /// The divisor was zero; only the ERROR record was emitted.
    DivideByZero,
}

impl<R> DivisionOutcome<R> {
    /// The result, if the run completed.
    #[must_use]
    pub fn result(&self) -> Option<&R> {
        match self {
            Self::Completed(result) => Some(result),
            Self::DivideByZero => None,
        }
    }

    /// True when the run stopped on a zero divisor.
    #[must_use]
    pub fn is_divide_by_zero(&self) -> bool {
        matches!(self, Self::DivideByZero)
    }
}

/// Trace of an unsigned division run.
pub type DivisionTrace = Trace<DivisionOutcome>;

/// Trace of a signed division run.
pub type SignedDivisionTrace = Trace<DivisionOutcome<SignedDivisionResult>>;

/// Non-restoring division engine.
///
/// Holds no state between runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct DivisionEngine {
    ops: ScalarPrimitives,
}

impl DivisionEngine {
    /// Creates an engine over the scalar primitives.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ops: ScalarPrimitives,
        }
    }

    /// Divides two 4-bit bit strings (unsigned).
    ///
    /// # Errors
    ///
    /// Any [`OperandError`] from parsing; both strings must be exactly
    /// [`DIVIDEND_WIDTH`] binary digits.
    pub fn run_bits(&self, dividend: &str, divisor: &str) -> Result<DivisionTrace, OperandError> {
        self.run(
            Register::from_bits(dividend, DIVIDEND_WIDTH)?,
            Register::from_bits(divisor, DIVIDEND_WIDTH)?,
        )
    }

    /// Divides `dividend ÷ divisor`, both read as unsigned, recording every
    /// step.
    ///
    /// A zero divisor yields a single ERROR record and
    /// [`DivisionOutcome::DivideByZero`].
    ///
    /// # Errors
    ///
    /// [`OperandError::Width`] unless both registers are [`DIVIDEND_WIDTH`]
    /// bits wide.
    pub fn run(&self, dividend: Register, divisor: Register) -> Result<DivisionTrace, OperandError> {
        check_width(dividend)?;
        check_width(divisor)?;

        let (mut recorder, result) = self.divide(dividend, divisor);
        let Some(result) = result else {
            return Ok(recorder.finish(DivisionOutcome::DivideByZero));
        };

        let note = format!(
            "Quotient: {} ({}), Remainder: {} ({}) | Dividend: {} Divisor: {}",
            result.quotient,
            result.quotient_value,
            result.remainder,
            result.remainder_value,
            result.dividend,
            result.divisor
        );
        push_summary(&mut recorder, &result, note);
        Ok(recorder.finish(DivisionOutcome::Completed(result)))
    }

    /// Divides two 4-bit two's-complement registers.
    ///
    /// The records are those of the unsigned run over `|dividend|` and
    /// `|divisor|`; the summary record and the outcome carry the signed
    /// quotient (truncated toward zero) and remainder (sign of the dividend),
    /// so that `dividend == quotient * divisor + remainder`.
    ///
    /// ```
    /// use regtrace::division::DivisionEngine;
    /// use regtrace::register::Register;
    ///
    /// let x = Register::from_signed(-7, 4).unwrap();
    /// let y = Register::from_signed(2, 4).unwrap();
    /// let trace = DivisionEngine::new().run_signed(x, y).unwrap();
    /// let result = trace.outcome().result().unwrap();
    /// assert_eq!((result.quotient, result.remainder), (-3, -1));
    /// ```
    ///
    /// # Errors
    ///
    /// [`OperandError::Width`] unless both registers are [`DIVIDEND_WIDTH`]
    /// bits wide.
    pub fn run_signed(
        &self,
        dividend: Register,
        divisor: Register,
    ) -> Result<SignedDivisionTrace, OperandError> {
        check_width(dividend)?;
        check_width(divisor)?;

        let (mut recorder, magnitudes) = self.divide(magnitude(dividend), magnitude(divisor));
        let Some(magnitudes) = magnitudes else {
            return Ok(recorder.finish(DivisionOutcome::DivideByZero));
        };

        let x = dividend.to_signed();
        let y = divisor.to_signed();
        let quotient_magnitude = magnitudes.quotient_value as i16;
        let quotient = if (x < 0) != (y < 0) {
            -quotient_magnitude
        } else {
            quotient_magnitude
        };
        let remainder = if x < 0 {
            -magnitudes.remainder_value
        } else {
            magnitudes.remainder_value
        };

        let signed = SignedDivisionResult {
            dividend: x,
            divisor: y,
            quotient,
            remainder,
            magnitudes,
        };
        let note = format!(
            "Signed: {x} ÷ {y} = {quotient} r {remainder} (magnitudes {} ÷ {})",
            magnitudes.dividend, magnitudes.divisor
        );
        push_summary(&mut recorder, &magnitudes, note);
        Ok(recorder.finish(DivisionOutcome::Completed(signed)))
    }

    /// Runs the control loop up to, not including, the summary record.
    ///
    /// Returns `None` for a zero divisor after recording the ERROR step.
    fn divide(&self, dividend: Register, divisor: Register) -> (Recorder, Option<DivisionResult>) {
        let mut recorder = Recorder::with_capacity(DIVISION_MIN_RECORD_COUNT + 1);

        if divisor.is_zero() {
            tracing::warn!(%dividend, "division by zero");
            recorder.push(
                StepTag::Halt,
                (None, dividend, None),
                Operation::DivideByZero,
                "Division by zero is undefined",
                false,
            );
            return (recorder, None);
        }

        let m = divisor.zero_extend(ACCUMULATOR_WIDTH);
        let mut a = Register::zero(ACCUMULATOR_WIDTH);
        let mut q = dividend;
        let mut overflowed = false;

        tracing::debug!(%q, %m, "non-restoring division");
        recorder.push(
            StepTag::Init,
            (Some(a), q, None),
            Operation::DivisionInit,
            "Initial state",
            false,
        );

        for iteration in 1..=dividend.width() {
            // The shift keeps A's value only while its top two bits agree.
            let overflow = a.bit(0) != a.bit(1);
            if overflow {
                tracing::warn!(iteration, %a, %m, "accumulator overflow on shift");
            }
            overflowed |= overflow;
            (a, q) = shift_left_pair(a, q);
            recorder.push(
                StepTag::Phase {
                    iteration,
                    phase: 1,
                },
                (Some(a), q, None),
                Operation::ShiftLeft,
                "A and Q shifted",
                overflow,
            );

            let (a_temp, operation, note) = if a.is_negative() {
                (self.ops.add(a, m), Operation::Add, "A < 0 → A + M")
            } else {
                (self.ops.sub(a, m), Operation::Subtract, "A ≥ 0 → A - M")
            };
            recorder.push(
                StepTag::Phase {
                    iteration,
                    phase: 2,
                },
                (Some(a_temp), q, None),
                operation,
                note,
                false,
            );

            let non_negative = !a_temp.is_negative();
            q = q.with_lsb(non_negative);
            a = a_temp;
            recorder.push(
                StepTag::Phase {
                    iteration,
                    phase: 3,
                },
                (Some(a), q, None),
                Operation::SetQ0,
                if non_negative {
                    "A ≥ 0 → Q0 ← 1"
                } else {
                    "A < 0 → Q0 ← 0"
                },
                false,
            );
        }

        if a.is_negative() {
            a = self.ops.add(a, m);
            recorder.push(
                StepTag::Correction,
                (Some(a), q, None),
                Operation::RestoreA,
                "A was negative → A + M",
                false,
            );
        }

        let result = DivisionResult {
            dividend: dividend.value(),
            divisor: divisor.value(),
            quotient: q,
            remainder: a,
            quotient_value: q.value(),
            remainder_value: a.to_signed(),
            overflowed,
        };
        tracing::debug!(
            quotient = %result.quotient,
            remainder = %result.remainder,
            overflowed,
            "division done"
        );
        (recorder, Some(result))
    }
}

fn push_summary(recorder: &mut Recorder, result: &DivisionResult, mut note: String) {
    if result.overflowed {
        note.push_str(" [accumulator overflow]");
    }
    recorder.push(
        StepTag::Summary,
        (Some(result.remainder), result.quotient, None),
        Operation::FinalResult,
        note,
        result.overflowed,
    );
}

/// `|x|` of a two's-complement register, read back as unsigned bits.
///
/// `1000` (-8) is its own complement and reads as 8.
fn magnitude(x: Register) -> Register {
    if x.is_negative() {
        complement(x)
    } else {
        x
    }
}

fn check_width(operand: Register) -> Result<(), OperandError> {
    if operand.width() != DIVIDEND_WIDTH {
        return Err(OperandError::Width {
            expected: DIVIDEND_WIDTH,
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
    fn test_eleven_by_three() {
        let trace = DivisionEngine::new().run_bits("1011", "0011").unwrap();
        let result = trace.outcome().result().unwrap();
        assert_eq!(result.dividend, 11);
        assert_eq!(result.divisor, 3);
        assert_eq!(result.quotient, reg("0011"));
        assert_eq!(result.quotient_value, 3);
        assert_eq!(result.remainder, reg("00010"));
        assert_eq!(result.remainder_value, 2);
        assert!(!result.overflowed);
    }

    #[test]
    fn test_divide_by_zero_emits_single_error() {
        let trace = DivisionEngine::new().run_bits("0101", "0000").unwrap();
        assert!(trace.outcome().is_divide_by_zero());
        assert_eq!(trace.len(), 1);

        let record = &trace.records()[0];
        assert_eq!(record.operation, Operation::DivideByZero);
        assert_eq!(record.tag, StepTag::Halt);
        assert_eq!(record.a, None);
        assert_eq!(record.q, reg("0101"));
        assert_eq!(record.note, "Division by zero is undefined");
    }

    #[test]
    fn test_phases_per_iteration() {
        let trace = DivisionEngine::new().run_bits("1011", "0011").unwrap();
        let records = trace.records();
        assert_eq!(records[0].operation, Operation::DivisionInit);
        for iteration in 0..4 {
            let base = 1 + 3 * iteration;
            assert_eq!(records[base].operation, Operation::ShiftLeft);
            assert!(matches!(
                records[base + 1].operation,
                Operation::Subtract | Operation::Add
            ));
            assert_eq!(records[base + 2].operation, Operation::SetQ0);
        }
        assert_eq!(records.last().unwrap().operation, Operation::FinalResult);
    }

    #[test]
    fn test_register_evolution() {
        // 11 ÷ 3, first iteration:
        // shift  00000 1011 → 00001 0110
        // A - M  00001 - 00011 = 11110
        // Q0 ← 0 (A_temp negative)
        let trace = DivisionEngine::new().run_bits("1011", "0011").unwrap();
        let r = trace.records();
        assert_eq!(r[1].a, Some(reg("00001")));
        assert_eq!(r[1].q, reg("0110"));
        assert_eq!(r[2].operation, Operation::Subtract);
        assert_eq!(r[2].a, Some(reg("11110")));
        assert_eq!(r[3].a, Some(reg("11110")));
        assert_eq!(r[3].q, reg("0110"));

        // second iteration starts from a negative A, so it adds M
        assert_eq!(r[5].operation, Operation::Add);
    }

    #[test]
    fn test_restore_step_when_remainder_negative() {
        // 6 ÷ 3 finishes with A = 11101 (-3) and restores to 0
        let trace = DivisionEngine::new().run_bits("0110", "0011").unwrap();
        let records = trace.records();
        assert_eq!(trace.len(), DIVISION_MIN_RECORD_COUNT + 1);
        let restore = &records[records.len() - 2];
        assert_eq!(restore.operation, Operation::RestoreA);
        assert_eq!(restore.tag, StepTag::Correction);
        let result = trace.outcome().result().unwrap();
        assert_eq!((result.quotient_value, result.remainder_value), (2, 0));
    }

    #[test]
    fn test_no_restore_when_remainder_non_negative() {
        let trace = DivisionEngine::new().run_bits("0100", "0011").unwrap();
        assert_eq!(trace.len(), DIVISION_MIN_RECORD_COUNT);
        assert!(trace
            .records()
            .iter()
            .all(|r| r.operation != Operation::RestoreA));
    }

    #[test]
    fn test_large_divisor_overflow_flagged() {
        let trace = DivisionEngine::new().run_bits("0000", "1001").unwrap();
        let result = trace.outcome().result().unwrap();
        assert!(result.overflowed);
        assert!(trace.records().iter().any(|r| r.overflow));
    }

    #[test]
    fn test_signed_division() {
        let engine = DivisionEngine::new();
        let cases = [(-7, 2, -3, -1), (7, -2, -3, 1), (-8, -1, 8, 0), (-5, 3, -1, -2), (6, 3, 2, 0)];
        for (x, y, q, r) in cases {
            let trace = engine
                .run_signed(
                    Register::from_signed(x, 4).unwrap(),
                    Register::from_signed(y, 4).unwrap(),
                )
                .unwrap();
            let result = trace.outcome().result().unwrap();
            assert_eq!((result.quotient, result.remainder), (q, r), "{x} / {y}");
        }
    }

    #[test]
    fn test_signed_divide_by_zero() {
        let trace = DivisionEngine::new()
            .run_signed(reg("1011"), reg("0000"))
            .unwrap();
        assert!(trace.outcome().is_divide_by_zero());
        assert_eq!(trace.len(), 1);
    }

    #[test]
    fn test_rejects_wrong_width() {
        assert_eq!(
            DivisionEngine::new().run(reg("1011"), reg("00011")).unwrap_err(),
            OperandError::Width {
                expected: 4,
                actual: 5
            }
        );
    }
}
