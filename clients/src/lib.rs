//! regtrace-clients - terminal front ends for the regtrace engines
//!
//! The binaries share this library:
//!
//! - [`cli`]: flattened display flags and operand parsing
//! - [`config`]: TOML visualizer settings, overridden by flags
//! - [`visualizer`]: table and JSON presentation of a trace
//! - [`logging`]: `tracing` subscriber setup
//!
//! | Binary | Engine |
//! |--------|--------|
//! | `regtrace-booth` | `BoothEngine::run` |
//! | `regtrace-divide` | `DivisionEngine::run`, or `run_signed` with `--signed` |

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used, clippy::panic))]

pub mod cli;
pub mod config;
pub mod logging;
pub mod visualizer;

pub use cli::{parse_operand, DisplayArgs, InputError, Notation};
pub use config::{ConfigError, OutputFormat, VisualizerConfig};
pub use logging::init_tracing;
pub use visualizer::{
    for_config, install_cancel_flag, play, CancelFlag, JsonVisualizer, Layout, Played,
    TableVisualizer, Visualizer,
};
