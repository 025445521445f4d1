//! Tracing subscriber setup.
//!
//! The terminal belongs to the renderer while the game runs, so log lines go
//! to a file. `RUST_LOG`, when set, replaces the crate's default level.

use anyhow::Context;
use std::fs::{self, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{fmt::time, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Crate log level: more detail in debug builds.
fn default_directive() -> &'static str {
    if cfg!(debug_assertions) {
        "skyward=debug"
    } else {
        "skyward=info"
    }
}

fn rust_log() -> Option<String> {
    std::env::var(EnvFilter::DEFAULT_ENV).ok()
}

/// `RUST_LOG` directives when set, otherwise `fallback`. Anything not
/// matched logs at warn.
fn build_filter(rust_log: Option<&str>, fallback: &str) -> EnvFilter {
    let builder = EnvFilter::builder().with_default_directive(LevelFilter::WARN.into());
    match rust_log {
        Some(directives) if !directives.trim().is_empty() => builder.parse_lossy(directives),
        _ => builder.parse_lossy(fallback),
    }
}

/// Install the global subscriber, appending to `path`. Call once at startup.
pub fn init(path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("create log directory {}", parent.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("open log file {}", path.display()))?;

    let filter = build_filter(rust_log().as_deref(), default_directive());

    tracing_subscriber::Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .with_ansi(false)
                .with_timer(time::uptime())
                .with_writer(Mutex::new(file)),
        )
        .with(filter)
        .try_init()
        .context("install tracing subscriber")?;
    Ok(())
}

/// Install a stderr subscriber for headless tools.
pub fn init_stderr() -> anyhow::Result<()> {
    let filter = build_filter(rust_log().as_deref(), "");

    tracing_subscriber::Registry::default()
        .with(
            tracing_subscriber::fmt::layer()
                .with_timer(time::uptime())
                .with_writer(std::io::stderr),
        )
        .with(filter)
        .try_init()
        .context("install tracing subscriber")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directive_parses() {
        let parsed: Result<tracing_subscriber::filter::Directive, _> = default_directive().parse();
        assert!(parsed.is_ok());
    }

    #[test]
    fn test_crate_default_without_rust_log() {
        let filter = build_filter(None, "skyward=info");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::INFO));
    }

    #[test]
    fn test_rust_log_overrides_crate_default() {
        let filter = build_filter(Some("skyward=trace"), "skyward=info");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));

        let subscriber = tracing_subscriber::Registry::default().with(filter);
        tracing::subscriber::with_default(subscriber, || {
            assert!(tracing::enabled!(target: "skyward", tracing::Level::DEBUG));
        });
    }

    #[test]
    fn test_blank_rust_log_uses_default() {
        let filter = build_filter(Some("  "), "skyward=debug");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn test_stderr_fallback_is_warn() {
        let filter = build_filter(None, "");
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::WARN));
    }
}
