//! `regtrace-divide` - Traces non-restoring division of two 4-bit operands.
//!
//! **Usage:**
//! ```text
//! regtrace-divide <DIVIDEND> <DIVISOR> [--signed] [--decimal] [--format table|json]
//! ```
//!
//! Operands are unsigned 4-bit strings by default. `--signed` reads them as
//! two's complement and divides the magnitudes. Exits non-zero on a
//! malformed operand or a zero divisor (after printing the ERROR step).

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

use std::io;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use regtrace::{DivisionEngine, Register};
use regtrace_clients::{
    for_config, init_tracing, install_cancel_flag, parse_operand, play, DisplayArgs, Layout,
    Notation, VisualizerConfig,
};

const TITLE: &str = "Non-Restoring Division Algorithm";

/// Trace non-restoring division step by step.
#[derive(Parser)]
#[command(
    name = "regtrace-divide",
    about = "Trace non-restoring division of two 4-bit operands"
)]
struct Args {
    /// Dividend (Q).
    #[arg(allow_negative_numbers = true)]
    dividend: String,

    /// Divisor (M).
    #[arg(allow_negative_numbers = true)]
    divisor: String,

    /// Read operands as two's complement (-8..=7).
    #[arg(long)]
    signed: bool,

    #[command(flatten)]
    display: DisplayArgs,
}

impl Args {
    fn notation(&self) -> Notation {
        match (self.display.decimal, self.signed) {
            (false, _) => Notation::Bits,
            (true, true) => Notation::Signed,
            (true, false) => Notation::Unsigned,
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.display.verbose);

    let config = args.display.resolve()?;
    let dividend = parse_operand(&args.dividend, args.notation())
        .with_context(|| format!("invalid dividend `{}`", args.dividend))?;
    let divisor = parse_operand(&args.divisor, args.notation())
        .with_context(|| format!("invalid divisor `{}`", args.divisor))?;

    let divided = if args.signed {
        run_signed(&config, dividend, divisor)?
    } else {
        run_unsigned(&config, dividend, divisor)?
    };

    if !divided {
        eprintln!("error: division by zero");
        process::exit(1);
    }
    Ok(())
}

/// Returns false on a zero divisor.
fn run_unsigned(config: &VisualizerConfig, dividend: Register, divisor: Register) -> Result<bool> {
    let trace = DivisionEngine::new().run(dividend, divisor)?;
    render(config, &trace)?;
    Ok(!trace.outcome().is_divide_by_zero())
}

/// Returns false on a zero divisor.
fn run_signed(config: &VisualizerConfig, dividend: Register, divisor: Register) -> Result<bool> {
    let trace = DivisionEngine::new().run_signed(dividend, divisor)?;
    render(config, &trace)?;
    Ok(!trace.outcome().is_divide_by_zero())
}

fn render<O: serde::Serialize>(config: &VisualizerConfig, trace: &regtrace::Trace<O>) -> Result<()> {
    let cancel = install_cancel_flag().context("installing signal handlers")?;
    let stdout = io::stdout();
    let mut visualizer = for_config(config, stdout.lock(), cancel);
    play(visualizer.as_mut(), TITLE, Layout::DIVISION, trace).context("writing trace")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_notation() {
        let parse = |argv: &[&str]| {
            Args::try_parse_from(argv.iter().copied())
                .unwrap()
                .notation()
        };
        assert_eq!(parse(&["regtrace-divide", "1011", "0011"]), Notation::Bits);
        assert_eq!(
            parse(&["regtrace-divide", "--decimal", "11", "3"]),
            Notation::Unsigned
        );
        assert_eq!(
            parse(&["regtrace-divide", "--decimal", "--signed", "-7", "2"]),
            Notation::Signed
        );
    }

    #[test]
    fn test_zero_divisor_reported() {
        let config = VisualizerConfig {
            format: regtrace_clients::OutputFormat::Json,
            ..VisualizerConfig::default()
        };
        let x = parse_operand("0101", Notation::Bits).unwrap();
        let zero = parse_operand("0000", Notation::Bits).unwrap();
        assert!(!run_unsigned(&config, x, zero).unwrap());
        assert!(run_unsigned(&config, x, parse_operand("0011", Notation::Bits).unwrap()).unwrap());
    }
}
