//! Tracing subscriber setup

use tracing_subscriber::EnvFilter;

/// Default filter directive
fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "vibeclip=debug"
    } else {
        "vibeclip=info"
    }
}

/// Install the global subscriber, writing to stderr.
///
/// `RUST_LOG` wins when set; otherwise `--verbose` picks the level.
/// Calling this twice is harmless.
pub fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbose_raises_level() {
        assert_eq!(default_directive(false), "vibeclip=info");
        assert_eq!(default_directive(true), "vibeclip=debug");
    }

    #[test]
    fn init_twice_does_not_panic() {
        init_logging(false);
        init_logging(true);
    }
}
