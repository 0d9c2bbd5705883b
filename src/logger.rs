//! File-based logging using simplelog.
//!
//! The terminal belongs to the TUI while it runs, so log records go to a file:
//! the `--log-file` path when given, otherwise `sidediff.log` in the system
//! temp directory.

use std::fs::File;
use std::path::PathBuf;

use anyhow::{Context, Result};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

fn level_from_env() -> LevelFilter {
    std::env::var("RUST_LOG")
        .map(|v| parse_level(&v))
        .unwrap_or(LevelFilter::Info)
}

fn parse_level(value: &str) -> LevelFilter {
    value.parse().unwrap_or(LevelFilter::Info)
}

/// Initialize the global logger. Returns the path of the log file.
pub fn init(log_file: Option<PathBuf>) -> Result<PathBuf> {
    let path = log_file.unwrap_or_else(|| std::env::temp_dir().join("sidediff.log"));

    let config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .set_time_offset_to_local()
        .unwrap_or_else(|c| c)
        .build();

    let file = File::create(&path)
        .with_context(|| format!("Failed to create log file {}", path.display()))?;
    WriteLogger::init(level_from_env(), config, file).context("Failed to initialize logger")?;

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("DEBUG"), LevelFilter::Debug);
        assert_eq!(parse_level("warn"), LevelFilter::Warn);
        assert_eq!(parse_level("off"), LevelFilter::Off);
        assert_eq!(parse_level("Trace"), LevelFilter::Trace);
        assert_eq!(parse_level("sidediff=trace"), LevelFilter::Info);
    }
}
