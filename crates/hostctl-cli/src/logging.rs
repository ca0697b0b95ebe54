//! Tracing subscriber setup

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::error::Result;

/// Install the global subscriber.
///
/// Logs go to stderr so command output on stdout stays parseable. `RUST_LOG`
/// takes precedence; otherwise only warnings are shown, or everything from
/// debug up with `--verbose`.
pub fn init(verbose: bool) -> Result<()> {
    let default_directive = if verbose { "debug" } else { "warn" };

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_level(true)
        .compact();

    let filter_layer =
        EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(default_directive))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tracing::{debug, warn};

    #[test]
    fn test_logging_init() {
        // Only the first init in a process can succeed
        let _ = init(true);

        debug!("This is a debug message");
        warn!("This is a warning message");
    }
}
