//! Step records: immutable snapshots of one engine run.
//!
//! An engine emits one [`StepRecord`] per algorithm step, in order, and
//! returns them together with the run's typed outcome as a [`Trace`]. Nothing
//! mutates a record after the engine pushes it.

use core::fmt;

use crate::register::Register;

/// Position of a record within the algorithm, as shown in the trace table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "kind", rename_all = "snake_case"))]
pub enum StepTag {
    /// Registers as loaded from the operands.
    Init,
    /// Phase `phase` of iteration `iteration` (both 1-based).
    Phase {
        /// Iteration number, 1..=4.
        iteration: u8,
        /// Sub-step within the iteration.
        phase: u8,
    },
    /// The final remainder correction.
    Correction,
    /// The closing result record.
    Summary,
    /// A run that stopped before the first step.
    Halt,
}

impl fmt::Display for StepTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Init => f.write_str("0"),
            Self::Phase { iteration, phase } => write!(f, "{iteration}.{phase}"),
            Self::Correction => f.write_str("F"),
            Self::Summary => f.write_str("="),
            Self::Halt => f.write_str("-"),
        }
    }
}

/// The operation a record reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Operation {
    /// Booth: registers loaded.
    BoothInit,
    /// Booth: control pair `10`, `A = A - M`.
    BoothSubtract,
    /// Booth: control pair `01`, `A = A + M`.
    BoothAdd,
    /// Booth: control pair `00` or `11`.
    NoOperation,
    /// Booth: arithmetic shift right of `A ‖ Q ‖ Q₋₁`.
    ArithmeticShiftRight,
    /// Booth: final product record.
    FinalProduct,
    /// Division: registers loaded.
    DivisionInit,
    /// Division: logical shift left of `A ‖ Q`.
    ShiftLeft,
    /// Division: `A` was non-negative, `A - M`.
    Subtract,
    /// Division: `A` was negative, `A + M`.
    Add,
    /// Division: quotient bit written into `Q0`.
    SetQ0,
    /// Division: negative remainder corrected by `A + M`.
    RestoreA,
    /// Division: quotient/remainder record.
    FinalResult,
    /// Division: divisor was zero.
    DivideByZero,
}

impl Operation {
    /// Label shown in the operation column.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::BoothInit => "Initial State",
            Self::BoothSubtract => "A = A − M",
            Self::BoothAdd => "A = A + M",
            Self::NoOperation => "No Operation",
            Self::ArithmeticShiftRight => "Arithmetic Shift Right",
            Self::FinalProduct => "Final Product",
            Self::DivisionInit => "INIT",
            Self::ShiftLeft => "Shift Left",
            Self::Subtract => "A − M",
            Self::Add => "A + M",
            Self::SetQ0 => "Set Q0",
            Self::RestoreA => "Restore A",
            Self::FinalResult => "Final Result",
            Self::DivideByZero => "ERROR",
        }
    }

    /// True for records that change `A` through the adder.
    #[must_use]
    pub const fn is_arithmetic(self) -> bool {
        matches!(
            self,
            Self::BoothSubtract | Self::BoothAdd | Self::Subtract | Self::Add | Self::RestoreA
        )
    }

    /// True for shift records.
    #[must_use]
    pub const fn is_shift(self) -> bool {
        matches!(self, Self::ArithmeticShiftRight | Self::ShiftLeft)
    }

    /// True for the record that closes a run.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::FinalProduct | Self::FinalResult | Self::DivideByZero
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Snapshot of the registers after one step.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StepRecord {
    /// 0-based position in the run.
    pub index: usize,
    /// Table label (`0`, `2.1`, `F`, ...).
    pub tag: StepTag,
    /// Accumulator. `None` only when the run halted before loading it.
    pub a: Option<Register>,
    /// Multiplier/product-low (Booth) or dividend/quotient (division).
    pub q: Register,
    /// Booth's shifted-out history bit; `None` for division.
    pub q_minus_1: Option<Register>,
    /// What the step did.
    pub operation: Operation,
    /// Human-readable explanation.
    pub note: String,
    /// The step left the accumulator's signed range.
    pub overflow: bool,
}

/// The records of one run plus its outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Trace<O> {
    records: Vec<StepRecord>,
    outcome: O,
}

impl<O> Trace<O> {
    /// Records in emission order.
    #[must_use]
    pub fn records(&self) -> &[StepRecord] {
        &self.records
    }

    /// Typed result of the run.
    #[must_use]
    pub fn outcome(&self) -> &O {
        &self.outcome
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when no record was emitted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Splits the trace into its parts.
    #[must_use]
    pub fn into_parts(self) -> (Vec<StepRecord>, O) {
        (self.records, self.outcome)
    }
}

/// Accumulates records during a run.
#[derive(Debug, Default)]
pub(crate) struct Recorder {
    records: Vec<StepRecord>,
}

impl Recorder {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            records: Vec::with_capacity(capacity),
        }
    }

    /// Appends a record, assigning the next index.
    pub(crate) fn push(
        &mut self,
        tag: StepTag,
        registers: (Option<Register>, Register, Option<Register>),
        operation: Operation,
        note: impl Into<String>,
        overflow: bool,
    ) {
        let (a, q, q_minus_1) = registers;
        let record = StepRecord {
            index: self.records.len(),
            tag,
            a,
            q,
            q_minus_1,
            operation,
            note: note.into(),
            overflow,
        };
        tracing::debug!(
            step = %record.tag,
            a = ?record.a,
            q = %record.q,
            op = record.operation.label(),
            overflow,
            "step"
        );
        self.records.push(record);
    }

    pub(crate) fn finish<O>(self, outcome: O) -> Trace<O> {
        Trace {
            records: self.records,
            outcome,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_display() {
        assert_eq!(StepTag::Init.to_string(), "0");
        assert_eq!(
            StepTag::Phase {
                iteration: 3,
                phase: 2
            }
            .to_string(),
            "3.2"
        );
        assert_eq!(StepTag::Correction.to_string(), "F");
        assert_eq!(StepTag::Halt.to_string(), "-");
    }

    #[test]
    fn test_recorder_assigns_indices() {
        let mut recorder = Recorder::default();
        let q = Register::zero(4);
        recorder.push(StepTag::Init, (None, q, None), Operation::DivisionInit, "a", false);
        recorder.push(StepTag::Summary, (None, q, None), Operation::FinalResult, "b", false);
        let trace = recorder.finish(());
        let indices: Vec<usize> = trace.records().iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(trace.len(), 2);
    }

    #[test]
    fn test_operation_kinds() {
        assert!(Operation::BoothSubtract.is_arithmetic());
        assert!(!Operation::NoOperation.is_arithmetic());
        assert!(Operation::ShiftLeft.is_shift());
        assert!(Operation::DivideByZero.is_terminal());
    }
}
