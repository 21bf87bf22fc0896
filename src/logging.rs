use anyhow::Context;
use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use tracing_subscriber::EnvFilter;

/// Targets that should receive log output
const CRATE_TARGETS: &[&str] = &["weekgrid"];

/// Send log messages to the file at `path`, replacing its contents.  With no
/// path, nothing is logged, as the terminal belongs to the calendar.
///
/// Mapping of `verbosity` to the level logged:
/// - 0 (none) -> info
/// - 1 (-v)   -> debug
/// - 2+ (-vv) -> trace
///
/// `RUST_LOG` overrides the level if set.
pub(crate) fn init(path: Option<&Path>, verbosity: u8) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let level = match verbosity {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let default_filter = CRATE_TARGETS
        .iter()
        .map(|t| format!("{t}={level}"))
        .collect::<Vec<_>>()
        .join(",");
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .map_err(|e| anyhow::anyhow!(e))
        .context("failed to install logger")?;
    Ok(())
}
