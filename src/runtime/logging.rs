use std::fs::File;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::prefs;

/// Route tracing output to a file under the data directory. The terminal
/// belongs to the TUI, so nothing may write to stdout/stderr after raw
/// mode is entered. `RUST_LOG` overrides the default filter.
pub fn init() {
    let Some(dir) = prefs::data_dir() else {
        return;
    };
    if std::fs::create_dir_all(&dir).is_err() {
        return;
    }
    let Ok(file) = File::create(dir.join("solace.log")) else {
        return;
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("solace=info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
