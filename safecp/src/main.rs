// safecp/src/main.rs
//! safecp entry point.
//!
//! Provisions and loads the pattern file, compiles the store, connects the
//! platform clipboard, and runs the monitor loop until process termination.
//! Configuration errors at startup exit non-zero with a clear message;
//! runtime clipboard errors are logged and retried by the loop.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

use safecp::clipboard::SystemClipboard;
use safecp::logger;
use safecp_core::{ClipboardMonitor, Engine, PatternConfig, PatternStore};

#[derive(Parser, Debug)]
#[command(
    name = "safecp",
    author,
    version,
    about = "Replaces sensitive values on the clipboard with placeholders"
)]
struct Cli {
    /// Use a specific pattern file instead of ~/.safecp.patterns.json
    #[arg(long, value_name = "FILE")]
    patterns: Option<PathBuf>,

    /// Clipboard poll interval in milliseconds
    #[arg(long, value_name = "MS", default_value_t = 100)]
    interval_ms: u64,

    /// Suppress all informational messages
    #[arg(long, short = 'q')]
    quiet: bool,

    /// Enable debug logging
    #[arg(long, short = 'd')]
    debug: bool,
}

fn main() -> Result<()> {
    let args = Cli::parse();

    if args.quiet {
        logger::init_logger(Some(log::LevelFilter::Off));
    } else if args.debug {
        logger::init_logger(Some(log::LevelFilter::Debug));
    } else {
        logger::init_logger(Some(log::LevelFilter::Info));
    }

    let patterns_path = match args.patterns {
        Some(path) => path,
        None => safecp_core::ensure_user_patterns_file()
            .context("Failed to provision the user pattern file")?,
    };

    let config = PatternConfig::load_from_file(&patterns_path)
        .with_context(|| format!("Cannot start without patterns ({})", patterns_path.display()))?;
    let store = PatternStore::compile(&config).context("Failed to compile patterns")?;
    let engine = Engine::new(store);

    let provider = SystemClipboard::new()?;

    log::info!("Starting safecp...");
    let mut monitor = ClipboardMonitor::new(provider, engine)
        .with_poll_interval(Duration::from_millis(args.interval_ms));
    monitor.run();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults() {
        let cli = Cli::parse_from(["safecp"]);
        assert_eq!(cli.interval_ms, 100);
        assert!(cli.patterns.is_none());
        assert!(!cli.quiet);
        assert!(!cli.debug);
    }

    #[test]
    fn cli_accepts_pattern_file_and_interval() {
        let cli = Cli::parse_from(["safecp", "--patterns", "/tmp/p.json", "--interval-ms", "250"]);
        assert_eq!(cli.patterns, Some(PathBuf::from("/tmp/p.json")));
        assert_eq!(cli.interval_ms, 250);
    }
}
