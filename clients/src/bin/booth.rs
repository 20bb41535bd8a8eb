//! `regtrace-booth` - Traces Booth's multiplication of two 4-bit operands.
//!
//! **Usage:**
//! ```text
//! regtrace-booth <MULTIPLICAND> <MULTIPLIER> [--decimal] [--format table|json]
//! ```
//!
//! Operands are 4-bit two's-complement strings (`1101`), or decimals in
//! -8..=7 with `--decimal`. Exits non-zero if an operand is malformed.

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

use std::io;

use anyhow::{Context, Result};
use clap::Parser;
use regtrace::BoothEngine;
use regtrace_clients::{
    for_config, init_tracing, install_cancel_flag, parse_operand, play, DisplayArgs, Layout,
    Notation,
};

/// Trace Booth's multiplication step by step.
#[derive(Parser)]
#[command(
    name = "regtrace-booth",
    about = "Trace Booth's multiplication of two 4-bit two's-complement operands"
)]
struct Args {
    /// Multiplicand (M).
    #[arg(allow_negative_numbers = true)]
    multiplicand: String,

    /// Multiplier (Q).
    #[arg(allow_negative_numbers = true)]
    multiplier: String,

    #[command(flatten)]
    display: DisplayArgs,
}

impl Args {
    fn notation(&self) -> Notation {
        if self.display.decimal {
            Notation::Signed
        } else {
            Notation::Bits
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.display.verbose);

    let config = args.display.resolve()?;
    let multiplicand = parse_operand(&args.multiplicand, args.notation())
        .with_context(|| format!("invalid multiplicand `{}`", args.multiplicand))?;
    let multiplier = parse_operand(&args.multiplier, args.notation())
        .with_context(|| format!("invalid multiplier `{}`", args.multiplier))?;

    let trace = BoothEngine::new().run(multiplicand, multiplier)?;
    if trace.outcome().overflowed {
        tracing::warn!(%multiplicand, %multiplier, "accumulator overflowed; product is not exact");
    }

    let cancel = install_cancel_flag().context("installing signal handlers")?;
    let stdout = io::stdout();
    let mut visualizer = for_config(&config, stdout.lock(), cancel);
    play(visualizer.as_mut(), "Booth's Algorithm", Layout::BOOTH, &trace)
        .context("writing trace")?;

    Ok(())
}
