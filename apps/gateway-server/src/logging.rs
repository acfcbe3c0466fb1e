//! Tracing subscriber setup

use crate::config::LoggingConfig;
use anyhow::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Install the global subscriber. `RUST_LOG` wins over the configured level;
/// each `-v` raises the configured level one step, up to `trace`.
pub fn init(cfg: &LoggingConfig, verbose: u8) -> Result<()> {
    let level = effective_level(&cfg.level, verbose);
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("{level},sqlx=warn,hyper=warn,tower=warn")));

    let registry = tracing_subscriber::registry().with(filter);
    if cfg.json {
        registry
            .with(fmt::layer().json().with_current_span(true).with_target(true))
            .try_init()?;
    } else {
        registry.with(fmt::layer().with_target(true)).try_init()?;
    }
    Ok(())
}

/// Step `configured` up by `verbose` levels. A directive that is not a bare
/// level is kept as is without `-v`, and counts as `info` with it.
fn effective_level(configured: &str, verbose: u8) -> String {
    let current = LEVELS
        .iter()
        .position(|l| l.eq_ignore_ascii_case(configured.trim()));
    match (current, verbose) {
        (None, 0) => configured.to_string(),
        (current, _) => {
            let base = current.unwrap_or(2);
            let index = (base + usize::from(verbose)).min(LEVELS.len() - 1);
            LEVELS[index].to_string()
        }
    }
}
