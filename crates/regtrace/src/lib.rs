//! regtrace - register-transfer traces of fixed-width binary arithmetic
//!
//! Two classic algorithms run bit-exactly on small two's-complement
//! registers, recording every intermediate register state:
//!
//! - **Booth's multiplication** ([`booth`]): 4-bit × 4-bit → 8-bit product.
//! - **Non-restoring division** ([`division`]): 4-bit ÷ 4-bit with a 5-bit
//!   accumulator.
//!
//! # Layers
//!
//! ```text
//! register   fixed-width bit strings
//!    ↓
//! arith      bnot/xor/and/or → ripple adder → complement/add/sub, shifts
//!    ↓
//! booth, division   control loops emitting StepRecords
//!    ↓
//! (visualizer, outside this crate)   consumes the Trace
//! ```
//!
//! Engines are synchronous and hold no state between runs. A run returns a
//! [`Trace`]: the ordered, immutable [`StepRecord`]s plus a typed outcome.
//! Errors (malformed operands) are rejected before the first step;
//! division by zero and accumulator overflow are distinct outcomes, never
//! sentinel bit patterns.
//!
//! # Example
//!
//! ```
//! use regtrace::{BoothEngine, DivisionEngine};
//!
//! let product = BoothEngine::new().run_bits("0011", "0011").unwrap();
//! assert_eq!(product.outcome().value, 9);
//!
//! let quotient = DivisionEngine::new().run_bits("1011", "0011").unwrap();
//! let result = quotient.outcome().result().unwrap();
//! assert_eq!((result.quotient_value, result.remainder_value), (3, 2));
//!
//! let by_zero = DivisionEngine::new().run_bits("0101", "0000").unwrap();
//! assert!(by_zero.outcome().is_divide_by_zero());
//! assert_eq!(by_zero.len(), 1);
//! ```
//!
//! # Features
//!
//! - `serde`: `Serialize`/`Deserialize` for records, traces and outcomes.
//!   Registers serialize as bit strings.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

pub mod arith;
pub mod booth;
pub mod division;
pub mod error;
pub mod register;
pub mod step;

pub use booth::{BoothEngine, BoothProduct, BoothTrace};
pub use division::{
    DivisionEngine, DivisionOutcome, DivisionResult, DivisionTrace, SignedDivisionResult,
    SignedDivisionTrace,
};
pub use error::OperandError;
pub use register::Register;
pub use step::{Operation, StepRecord, StepTag, Trace};
