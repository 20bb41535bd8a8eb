//! Command-line pieces shared by the client binaries.

use std::path::PathBuf;

use clap::Args;
use regtrace::{OperandError, Register};
use thiserror::Error;

use crate::config::{ConfigError, OutputFormat, Overrides, VisualizerConfig};

/// Width of every operand the binaries accept.
pub const OPERAND_WIDTH: u8 = 4;

/// Display and logging flags, flattened into each binary's arguments.
#[derive(Debug, Clone, Default, Args)]
pub struct DisplayArgs {
    /// Read operands as decimal integers instead of 4-bit binary strings.
    #[arg(long)]
    pub decimal: bool,

    /// TOML file with visualizer settings.
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Pause after each step, in milliseconds.
    #[arg(long, value_name = "MS")]
    pub delay_ms: Option<u64>,

    /// Disable ANSI colors.
    #[arg(long)]
    pub no_color: bool,

    /// Output format.
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Log every step at debug level (stderr).
    #[arg(short, long)]
    pub verbose: bool,
}

impl DisplayArgs {
    /// Loads `--config` if given and applies the remaining flags on top.
    ///
    /// # Errors
    ///
    /// Any [`ConfigError`] from reading or parsing the file.
    pub fn resolve(&self) -> Result<VisualizerConfig, ConfigError> {
        let base = match &self.config {
            Some(path) => VisualizerConfig::load(path)?,
            None => VisualizerConfig::default(),
        };
        Ok(base.with_overrides(&Overrides {
            delay_ms: self.delay_ms,
            no_color: self.no_color,
            format: self.format,
        }))
    }
}

/// How an operand string is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notation {
    /// Exactly four binary digits.
    Bits,
    /// A decimal in -8..=7.
    Signed,
    /// A decimal in 0..=15.
    Unsigned,
}

/// An operand the binaries could not read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// `--decimal` was given but the text is not an integer.
    #[error("`{0}` is not a decimal integer")]
    NotDecimal(String),

    /// The text parsed but is not a valid operand.
    #[error(transparent)]
    Operand(#[from] OperandError),
}

/// Reads one operand in the given notation.
///
/// # Errors
///
/// [`InputError::NotDecimal`] for non-numeric decimal input, otherwise the
/// register's [`OperandError`] (wrong width, bad digit, out of range).
pub fn parse_operand(text: &str, notation: Notation) -> Result<Register, InputError> {
    let text = text.trim();
    let register = match notation {
        Notation::Bits => Register::from_bits(text, OPERAND_WIDTH)?,
        Notation::Signed | Notation::Unsigned => {
            let value: i32 = text
                .parse()
                .map_err(|_| InputError::NotDecimal(text.to_string()))?;
            if notation == Notation::Signed {
                Register::from_signed(value, OPERAND_WIDTH)?
            } else {
                Register::from_unsigned(value, OPERAND_WIDTH)?
            }
        }
    };
    Ok(register)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bits() {
        let r = parse_operand("1011", Notation::Bits).unwrap();
        assert_eq!(r.to_string(), "1011");
        assert!(matches!(
            parse_operand("101", Notation::Bits),
            Err(InputError::Operand(OperandError::Width { .. }))
        ));
    }

    #[test]
    fn test_signed_decimal() {
        assert_eq!(
            parse_operand("-3", Notation::Signed).unwrap().to_string(),
            "1101"
        );
        assert_eq!(
            parse_operand("8", Notation::Signed),
            Err(InputError::Operand(OperandError::OutOfRange {
                value: 8,
                width: 4
            }))
        );
    }

    #[test]
    fn test_unsigned_decimal() {
        assert_eq!(
            parse_operand(" 11 ", Notation::Unsigned).unwrap().to_string(),
            "1011"
        );
        assert!(parse_operand("-1", Notation::Unsigned).is_err());
    }

    #[test]
    fn test_not_decimal() {
        assert_eq!(
            parse_operand("0x3", Notation::Signed),
            Err(InputError::NotDecimal("0x3".to_string()))
        );
    }

    #[test]
    fn test_resolve_without_file() {
        let args = DisplayArgs {
            delay_ms: Some(250),
            no_color: true,
            ..DisplayArgs::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.delay_ms, 250);
        assert!(!config.color);
        assert_eq!(config.format, OutputFormat::Table);
    }
}
