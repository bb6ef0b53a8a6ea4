use std::{fs::File, path::Path};

use anyhow::Context as _;
use env_logger::{Builder, Env, Target};

/// Logs to stderr, filtered by `RUST_LOG` (warnings by default).
pub(crate) fn init_stderr() {
    Builder::from_env(Env::default().default_filter_or("warn")).init();
}

/// Sets up logging while the terminal UI owns the screen.
///
/// Anything written to stderr would tear the alternate screen, so without a
/// log file logging stays off.
pub(crate) fn init_for_tui(log_file: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = log_file else {
        log::set_max_level(log::LevelFilter::Off);
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("Failed to create log file: {}", path.display()))?;
    Builder::from_env(Env::default().default_filter_or("debug"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .context("Failed to initialize logger")?;
    Ok(())
}
