//! Log setup
//!
//! Logs go to stderr so the screen printed on stdout stays clean.
//! `RUST_LOG` wins over the `-v`/`-q` flags.

use tracing_subscriber::EnvFilter;

use crate::config::Verbosity;

/// Filter directives used when `RUST_LOG` is unset
#[must_use]
pub fn default_directives(verbosity: Verbosity) -> String {
    let level = verbosity.log_level();
    format!("glass_calculator={level},glass_calculator_cli={level}")
}

/// Installs the global subscriber; later calls are no-ops
pub fn init(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
