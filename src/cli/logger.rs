//! Tracing subscriber for the CLI. The library itself never installs one.

use anyhow::{Result, anyhow};
use tracing::{Level, subscriber::set_global_default};
use tracing_subscriber::FmtSubscriber;

/// Log level for a `-v` count: warnings by default, then info, debug and
/// trace.
pub fn level_for(verbosity: u8) -> Level {
    match verbosity {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    }
}

/// Install a stderr subscriber. Call once, before any command runs.
pub fn init_logger(verbosity: u8) -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level_for(verbosity))
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();

    set_global_default(subscriber)
        .map_err(|e| anyhow!("could not set global tracing subscriber: {e}"))
}
