//! Logging setup.
//!
//! Log records go through the `log` facade and are dispatched by `fern` to
//! stderr and, when configured, to a log file.

use anyhow::{Context, Result};
use log::LevelFilter;

use crate::config::LoggingConfig;

const LOG_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Noisy dependencies are capped at this level
const DEPENDENCY_MAX_LEVEL: LevelFilter = LevelFilter::Warn;

/// Build the dispatch described by `config` without installing it
pub fn build_dispatch(config: &LoggingConfig) -> Result<fern::Dispatch> {
    let level = config.level_filter()?;
    let dependency_level = level.min(DEPENDENCY_MAX_LEVEL);

    let mut dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {:<5} {}] {}",
                chrono::Local::now().format(LOG_TIMESTAMP_FORMAT),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .level_for("sqlx", dependency_level)
        .level_for("sea_orm", dependency_level)
        .level_for("hyper", dependency_level)
        .chain(std::io::stderr());

    if let Some(path) = &config.file {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
        }
        let file = fern::log_file(path).with_context(|| format!("Failed to open log file: {}", path.display()))?;
        dispatch = dispatch.chain(file);
    }

    Ok(dispatch)
}

/// Install the global logger. Must be called at most once per process.
pub fn init(config: &LoggingConfig) -> Result<()> {
    build_dispatch(config)?
        .apply()
        .context("Failed to install logger")?;
    Ok(())
}
