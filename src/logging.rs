//! Tracing subscriber setup
//!
//! Structured logging goes to stderr with a level controlled by the
//! `VITRIN_LOG` environment variable (standard `tracing-subscriber`
//! filter syntax). Interactive mode defaults to warnings only so the
//! alternate screen is not disturbed; one-shot commands default to info.
//!
//! Events of interest:
//! - `debug`: superseded fetch results being discarded
//! - `warn`: transport/status failures the UI degrades from

use tracing::Level;
use tracing_subscriber::EnvFilter;

/// Environment variable controlling the log filter
pub const LOG_ENV: &str = "VITRIN_LOG";

/// Install the global subscriber with the given default level
///
/// `VITRIN_LOG` overrides the default when set. Calling this more than
/// once has no effect beyond the first installation.
pub fn init(default_level: Level) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(format!("vitrin={default_level}")));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_is_idempotent() {
        init(Level::WARN);
        init(Level::INFO);
    }
}
