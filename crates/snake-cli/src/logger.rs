use std::{fs::OpenOptions, path::Path};

use anyhow::Context as _;
use env_logger::{Env, Target};

/// Routes `log` records to `path`, appending.
///
/// The terminal is owned by the TUI while playing, so nothing is logged to
/// stderr. The level comes from `RUST_LOG` and defaults to `info`.
pub(crate) fn init(path: &Path) -> anyhow::Result<()> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory: {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file: {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .try_init()
        .context("Failed to initialize logger")?;
    Ok(())
}
