//! Kana drill terminal entry point.
//!
//! # Usage
//!
//! ```bash
//! # Run against a host program
//! kana-tui --host ./kana-host
//!
//! # Pass arguments to the host and keep a debug log
//! kana-tui --host ./kana-host --log-level debug --log-file kana.log -- --words words.txt
//! ```

use std::{path::PathBuf, time::Duration};

use clap::Parser;
use kana_tui::{HostProcess, Runtime, TerminalDriver, logging};

/// Kana typing drill
#[derive(Parser, Debug)]
#[command(name = "kana-tui")]
#[command(about = "Terminal frontend for the kana typing drill")]
#[command(version)]
struct Args {
    /// Host program that owns lessons and scoring
    #[arg(long, env = "KANA_HOST")]
    host: String,

    /// Arguments passed through to the host program
    #[arg(last = true)]
    host_args: Vec<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Also write logs to this file
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Redraw interval in milliseconds
    #[arg(long, default_value = "100")]
    tick_ms: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let host = HostProcess::spawn(&args.host, &args.host_args)?;
    logging::init(&args.log_level, args.log_file.as_deref(), host.link().writer())?;
    tracing::info!(host = %args.host, "kana-tui starting");

    let driver = TerminalDriver::new(host, Duration::from_millis(args.tick_ms))?;
    let mut runtime = Runtime::new(driver);
    Ok(runtime.run().await?)
}
