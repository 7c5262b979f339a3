//! Logging setup
//!
//! Diagnostics go to stderr so that generated output and task progress on
//! stdout stay readable. `RUST_LOG` takes precedence over the verbosity flag.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Filter used when `RUST_LOG` is unset
#[must_use]
pub const fn default_directives(verbose: bool) -> &'static str {
    if verbose {
        "warn,scaffolder=debug,scaffolder_cli=debug"
    } else {
        "warn"
    }
}

/// Initialize the global subscriber
///
/// Calling this more than once keeps the first subscriber.
///
/// # Example
///
/// ```rust,no_run
/// scaffolder::observability::init(true);
/// tracing::debug!("logging ready");
/// ```
pub fn init(verbose: bool) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(verbose)));

    let installed = tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_target(verbose)
                .with_writer(std::io::stderr),
        )
        .try_init();

    if installed.is_err() {
        tracing::debug!("subscriber already installed");
    }
}
