//! Subscriber setup for the `switchyard` binary.
//!
//! Chat output owns stdout, so human-readable logs go to stderr. Every event
//! is also written as NDJSON to `<log_dir>/switchyard.log.YYYY-MM-DD`, where
//! the per-turn records from [`crate::EventLogger`] can be grepped by session.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Env var consulted before the `level` argument.
pub const LOG_ENV: &str = "SWITCHYARD_LOG";

/// File name prefix of the rolling log.
pub const LOG_FILE_PREFIX: &str = "switchyard.log";

const FALLBACK_LEVEL: &str = "warn";

/// Pick the filter directives: a parseable `SWITCHYARD_LOG` wins, then
/// `level`, then [`FALLBACK_LEVEL`].
fn build_filter(from_env: Option<&str>, level: &str) -> EnvFilter {
    from_env
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .or_else(|| EnvFilter::try_new(level).ok())
        .unwrap_or_else(|| EnvFilter::new(FALLBACK_LEVEL))
}

/// Install the global subscriber. A second call is ignored.
pub fn init_logger<P: AsRef<Path>>(log_dir: P, level: &str) {
    let from_env = std::env::var(LOG_ENV).ok();
    let filter = build_filter(from_env.as_deref(), level);

    let file_layer = fmt::layer()
        .json()
        .with_writer(RollingFileAppender::new(Rotation::DAILY, log_dir, LOG_FILE_PREFIX))
        .with_ansi(false);

    let console_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(console_layer)
        .with(file_layer)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_directives_win_over_level() {
        let filter = build_filter(Some("switchyard_routing=debug"), "info");
        assert_eq!(filter.to_string(), "switchyard_routing=debug");
    }

    #[test]
    fn unparseable_values_fall_back() {
        assert_eq!(build_filter(Some("routing=notalevel"), "info").to_string(), "info");
        assert_eq!(build_filter(None, "routing=notalevel").to_string(), FALLBACK_LEVEL);
    }
}
