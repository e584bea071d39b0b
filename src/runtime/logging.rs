use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

use crate::config::LoggingSettings;

/// Send `log` output to `path`. The terminal belongs to the UI, so nothing
/// is ever written to stderr while it runs. `RUST_LOG` overrides the
/// configured level.
pub fn init(settings: &LoggingSettings, path: &Path) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    env_logger::Builder::new()
        .parse_filters(&settings.level)
        .parse_default_env()
        .format_timestamp_millis()
        .target(env_logger::Target::Pipe(Box::new(file)))
        .try_init()
        .map_err(io::Error::other)
}
