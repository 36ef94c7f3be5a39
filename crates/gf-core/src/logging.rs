//! Log subscriber setup for the CLI.
//!
//! The library only emits `tracing` events; installing a subscriber is the
//! binary's job. Logs always go to stderr so stdout stays parseable.

use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Primary filter variable, e.g. `GF_LOG=forecast.run=info`.
pub const LOG_ENV_VAR: &str = "GF_LOG";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Filter from `GF_LOG`, then `RUST_LOG`, else `warn`.
pub fn env_filter() -> EnvFilter {
    let directives = std::env::var(LOG_ENV_VAR)
        .ok()
        .or_else(|| std::env::var(EnvFilter::DEFAULT_ENV).ok())
        .filter(|s| !s.trim().is_empty());
    match directives {
        Some(d) => EnvFilter::builder()
            .with_default_directive(LevelFilter::WARN.into())
            .parse_lossy(d),
        None => EnvFilter::default().add_directive(LevelFilter::WARN.into()),
    }
}

/// Install the global subscriber. A second call is a no-op.
pub fn init(format: LogFormat) {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter())
        .with_writer(std::io::stderr)
        .with_target(true);
    let _ = match format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
