//! Logging Infrastructure
//!
//! Structured logging setup for hosts embedding the split engine:
//! - Console output, pretty for development or JSON for production
//! - Optional daily rotating file log
//! - `RUST_LOG` overrides the configured level

use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, prelude::*};

use crate::config::Config;

/// Build the level filter, letting `RUST_LOG` win over `level`
fn env_filter(level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level))
}

/// Initialize logging with an optional daily rotating file
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn")
/// * `json_format` - JSON output (production) instead of pretty (development)
/// * `log_dir` - Optional directory for `divup.YYYY-MM-DD` files
///
/// # Examples
/// ```no_run
/// // Development setup (console only)
/// split_engine::init_logger_with_file("debug", false, None)?;
///
/// // Production setup (console + file)
/// split_engine::init_logger_with_file("info", true, Some("./logs"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(
    level: &str,
    json_format: bool,
    log_dir: Option<&str>,
) -> anyhow::Result<()> {
    let registry = tracing_subscriber::registry().with(env_filter(level));

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    };

    let file_layer = match log_dir {
        Some(dir) => {
            let log_dir = Path::new(dir);
            fs::create_dir_all(log_dir)?;
            let appender = RollingFileAppender::new(Rotation::DAILY, log_dir, "divup");
            let layer = fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(std::sync::Mutex::new(appender));
            Some(if json_format { layer.json().boxed() } else { layer.boxed() })
        }
        None => None,
    };

    registry.with(console_layer).with(file_layer).try_init()?;
    Ok(())
}

/// Initialize the logging system (console only)
pub fn init_logger(level: &str, json_format: bool) -> anyhow::Result<()> {
    init_logger_with_file(level, json_format, None)
}

/// Initialize logging from engine configuration
pub fn init_from_config(config: &Config) -> anyhow::Result<()> {
    init_logger(&config.log_level, config.log_json)
}
