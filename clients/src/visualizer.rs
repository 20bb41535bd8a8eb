//! Trace presentation.
//!
//! A [`Visualizer`] consumes the records of one run in order:
//!
//! ```text
//! begin(title, layout) → present(record) × n → finish(summary)
//! ```
//!
//! [`play`] drives that sequence for a [`Trace`] and stops early when
//! `present` returns [`Flow::Stop`]; `finish` always runs.
//!
//! | Visualizer | Output |
//! |------------|--------|
//! | [`TableVisualizer`] | one row per record, optional ANSI colors and pacing |
//! | [`JsonVisualizer`] | one JSON document once the run is finished |

use std::io::{self, Write};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use regtrace::{Operation, StepRecord, Trace};
use serde::Serialize;

use crate::config::{OutputFormat, VisualizerConfig};

/// Raised by SIGINT/SIGTERM; visualizers stop presenting once it is set.
pub type CancelFlag = Arc<AtomicBool>;

/// Installs a [`CancelFlag`] set by SIGINT and SIGTERM.
///
/// # Errors
///
/// Propagates a failure to register either signal handler.
pub fn install_cancel_flag() -> io::Result<CancelFlag> {
    let flag = CancelFlag::default();
    for signal in [signal_hook::consts::SIGINT, signal_hook::consts::SIGTERM] {
        signal_hook::flag::register(signal, Arc::clone(&flag))?;
    }
    Ok(flag)
}

/// Register widths of the algorithm being shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Width of `A`.
    pub a_width: u8,
    /// Width of `Q`.
    pub q_width: u8,
    /// Whether records carry `Q₋₁`.
    pub q_minus_1: bool,
}

impl Layout {
    /// Booth: 4-bit `A` and `Q`, plus `Q₋₁`.
    pub const BOOTH: Self = Self {
        a_width: 4,
        q_width: 4,
        q_minus_1: true,
    };

    /// Division: 5-bit `A`, 4-bit `Q`.
    pub const DIVISION: Self = Self {
        a_width: 5,
        q_width: 4,
        q_minus_1: false,
    };
}

/// What a visualizer is told once the records are done.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    /// Note of the closing record.
    pub text: String,
    /// The run's typed outcome, serialized.
    pub outcome: serde_json::Value,
    /// Presentation was interrupted before the last record.
    pub cancelled: bool,
}

/// Whether to keep presenting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Present the next record.
    Continue,
    /// Stop; [`Visualizer::finish`] is still called.
    Stop,
}

/// A consumer of step records.
pub trait Visualizer {
    /// Called once before the first record.
    ///
    /// # Errors
    ///
    /// Write failures.
    fn begin(&mut self, title: &str, layout: Layout) -> io::Result<()>;

    /// Called once per record, in order.
    ///
    /// # Errors
    ///
    /// Write failures.
    fn present(&mut self, record: &StepRecord) -> io::Result<Flow>;

    /// Called once after the last presented record.
    ///
    /// # Errors
    ///
    /// Write or serialization failures.
    fn finish(&mut self, summary: &Summary) -> io::Result<()>;
}

/// How far [`play`] got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Played {
    /// Records handed to the visualizer.
    pub presented: usize,
    /// The visualizer stopped before the last record.
    pub cancelled: bool,
}

/// Presents every record of `trace`, then its summary.
///
/// # Errors
///
/// Any error from the visualizer, or from serializing the outcome.
pub fn play<O: Serialize>(
    visualizer: &mut dyn Visualizer,
    title: &str,
    layout: Layout,
    trace: &Trace<O>,
) -> io::Result<Played> {
    visualizer.begin(title, layout)?;

    let mut presented = 0;
    let mut cancelled = false;
    for record in trace.records() {
        if visualizer.present(record)? == Flow::Stop {
            cancelled = true;
            break;
        }
        presented += 1;
    }
    // A stop on the final record still showed everything.
    cancelled &= presented < trace.len();
    if cancelled {
        tracing::info!(presented, total = trace.len(), "presentation interrupted");
    }

    let summary = Summary {
        text: trace
            .records()
            .last()
            .map(|record| record.note.clone())
            .unwrap_or_default(),
        outcome: serde_json::to_value(trace.outcome()).map_err(io::Error::from)?,
        cancelled,
    };
    visualizer.finish(&summary)?;
    Ok(Played {
        presented,
        cancelled,
    })
}

/// Builds the visualizer `config` asks for.
pub fn for_config<'a, W: Write + 'a>(
    config: &VisualizerConfig,
    out: W,
    cancel: CancelFlag,
) -> Box<dyn Visualizer + 'a> {
    match config.format {
        OutputFormat::Table => Box::new(TableVisualizer::new(out, config, cancel)),
        OutputFormat::Json => Box::new(JsonVisualizer::new(out)),
    }
}

// =============================================================================
// Table
// =============================================================================

const STEP_COLUMN: usize = 4;
const Q_MINUS_1_COLUMN: usize = 3;
const OPERATION_COLUMN: usize = 22;

/// Slice of the per-record pause between cancel checks.
const CANCEL_POLL: Duration = Duration::from_millis(50);

/// Column table, one row per record.
///
/// ```text
/// Step  A     Q     Q-1  Operation               Note
/// ----  ----  ----  ---  ----------------------  ----
/// 0     0000  0111  0    Initial State           Initial state
/// 1.1   0011  0111  0    A = A − M               Q0 Q-1 = 10 → A = A − M
/// ```
pub struct TableVisualizer<W: Write> {
    out: W,
    color: bool,
    delay: Duration,
    cancel: CancelFlag,
    layout: Layout,
}

impl<W: Write> TableVisualizer<W> {
    /// Creates a table writer honoring `config`'s color and delay.
    pub fn new(out: W, config: &VisualizerConfig, cancel: CancelFlag) -> Self {
        Self {
            out,
            color: config.color,
            delay: config.delay(),
            cancel,
            layout: Layout::BOOTH,
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    fn a_column(&self) -> usize {
        usize::from(self.layout.a_width).max(1)
    }

    fn q_column(&self) -> usize {
        usize::from(self.layout.q_width).max(1)
    }

    fn write_row(&mut self, cells: [&str; 6]) -> io::Result<()> {
        let [step, a, q, q_minus_1, operation, note] = cells;
        let (a_col, q_col) = (self.a_column(), self.q_column());
        write!(self.out, "{step:<STEP_COLUMN$}  {a:<a_col$}  {q:<q_col$}  ")?;
        if self.layout.q_minus_1 {
            write!(self.out, "{q_minus_1:<Q_MINUS_1_COLUMN$}  ")?;
        }
        writeln!(self.out, "{operation}  {note}")
    }

    /// Waits out the delay in slices, returning early on cancel.
    fn pause(&self) {
        let mut left = self.delay;
        while !left.is_zero() && !self.cancelled() {
            let slice = left.min(CANCEL_POLL);
            thread::sleep(slice);
            left -= slice;
        }
    }
}

/// ANSI SGR code for an operation cell.
fn style(record: &StepRecord) -> Option<&'static str> {
    if record.overflow || record.operation == Operation::DivideByZero {
        Some("31")
    } else if record.operation.is_terminal() {
        Some("1;32")
    } else if record.operation.is_arithmetic() {
        Some("33")
    } else if record.operation.is_shift() {
        Some("36")
    } else {
        None
    }
}

impl<W: Write> Visualizer for TableVisualizer<W> {
    fn begin(&mut self, title: &str, layout: Layout) -> io::Result<()> {
        self.layout = layout;
        writeln!(self.out, "{title}")?;
        writeln!(self.out, "{}", "=".repeat(title.chars().count()))?;
        writeln!(self.out)?;

        let operation = format!("{:<OPERATION_COLUMN$}", "Operation");
        self.write_row(["Step", "A", "Q", "Q-1", &operation, "Note"])?;
        let rule = |n: usize| "-".repeat(n);
        let (step, a, q, q1, op) = (
            rule(STEP_COLUMN),
            rule(self.a_column()),
            rule(self.q_column()),
            rule(Q_MINUS_1_COLUMN),
            rule(OPERATION_COLUMN),
        );
        self.write_row([&step, &a, &q, &q1, &op, "----"])?;
        self.out.flush()
    }

    fn present(&mut self, record: &StepRecord) -> io::Result<Flow> {
        if self.cancelled() {
            return Ok(Flow::Stop);
        }

        let step = record.tag.to_string();
        let a = record.a.map_or_else(|| "-".to_string(), |a| a.to_string());
        let q = record.q.to_string();
        let q_minus_1 = record
            .q_minus_1
            .map_or_else(|| "-".to_string(), |bit| bit.to_string());
        let padded = format!("{:<OPERATION_COLUMN$}", record.operation.label());
        let operation = match style(record) {
            Some(code) if self.color => format!("\x1b[{code}m{padded}\x1b[0m"),
            _ => padded,
        };
        self.write_row([&step, &a, &q, &q_minus_1, &operation, &record.note])?;
        self.out.flush()?;

        if !record.operation.is_terminal() {
            self.pause();
        }
        Ok(if self.cancelled() {
            Flow::Stop
        } else {
            Flow::Continue
        })
    }

    fn finish(&mut self, summary: &Summary) -> io::Result<()> {
        writeln!(self.out)?;
        if summary.cancelled {
            writeln!(self.out, "Interrupted.")?;
        } else {
            writeln!(self.out, "{}", summary.text)?;
        }
        self.out.flush()
    }
}

// =============================================================================
// JSON
// =============================================================================

/// Buffers the records and writes a single JSON document on
/// [`finish`](Visualizer::finish).
///
/// ```json
/// { "title": "...", "records": [...], "outcome": {...}, "cancelled": false }
/// ```
pub struct JsonVisualizer<W: Write> {
    out: W,
    title: String,
    records: Vec<StepRecord>,
}

#[derive(Serialize)]
struct Document<'a> {
    title: &'a str,
    records: &'a [StepRecord],
    outcome: &'a serde_json::Value,
    cancelled: bool,
}

impl<W: Write> JsonVisualizer<W> {
    /// Creates a JSON writer.
    pub fn new(out: W) -> Self {
        Self {
            out,
            title: String::new(),
            records: Vec::new(),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Visualizer for JsonVisualizer<W> {
    fn begin(&mut self, title: &str, _layout: Layout) -> io::Result<()> {
        self.title = title.to_string();
        self.records.clear();
        Ok(())
    }

    fn present(&mut self, record: &StepRecord) -> io::Result<Flow> {
        self.records.push(record.clone());
        Ok(Flow::Continue)
    }

    fn finish(&mut self, summary: &Summary) -> io::Result<()> {
        let document = Document {
            title: &self.title,
            records: &self.records,
            outcome: &summary.outcome,
            cancelled: summary.cancelled,
        };
        serde_json::to_writer_pretty(&mut self.out, &document)?;
        writeln!(self.out)?;
        self.out.flush()
    }
}
