//! Tracing setup for the binaries.

use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_ENV: &str = "REGTRACE_LOG";

/// Filter used when [`LOG_ENV`] is unset.
#[must_use]
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "regtrace=debug,regtrace_clients=debug"
    } else {
        "regtrace=info,regtrace_clients=info"
    }
}

/// Installs a stderr subscriber filtered by [`LOG_ENV`].
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing(verbose: bool) {
    let directive =
        std::env::var(LOG_ENV).unwrap_or_else(|_| default_directive(verbose).to_string());
    let _ = tracing_subscriber::fmt()
        .with_span_events(FmtSpan::NONE)
        .with_writer(std::io::stderr)
        .with_ansi(true)
        .with_target(false)
        .with_env_filter(EnvFilter::new(directive))
        .try_init();
}
