use std::fs::{self, OpenOptions};
use std::path::Path;

use env_logger::{Builder, Env, Target};

use crate::error::WhackError;

/// Route `log` output into `path`. The terminal belongs to the TUI, so we
/// never write log lines to stdout/stderr while it is running.
///
/// The filter is taken from `RUST_LOG` and defaults to `warn`.
pub fn init(path: &Path) -> Result<(), WhackError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    // a second init (tests, embedding) keeps the first logger
    let _ = Builder::from_env(Env::default().default_filter_or("warn"))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init();
    Ok(())
}
