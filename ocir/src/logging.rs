//! Tracing subscriber setup for the binaries.
//!
//! Events go to stderr so that report output on stdout stays parseable.
//! `RUST_LOG` replaces the filter derived from the verbosity flags.

use crate::context::VerbosityLevel;
use tracing_subscriber::EnvFilter;

/// Filter directive for a verbosity level.
pub fn filter_directive(verbosity: VerbosityLevel) -> &'static str {
    match verbosity {
        VerbosityLevel::Quiet => "warn",
        VerbosityLevel::Normal => "warn,libocir=info,ocir=info",
        VerbosityLevel::Verbose => "info,libocir=debug,ocir=debug",
        VerbosityLevel::Trace => "debug,libocir=trace,ocir=trace",
    }
}

/// Installs the global subscriber. Later calls are ignored.
pub fn init(verbosity: VerbosityLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity == VerbosityLevel::Trace)
        .try_init();
}
