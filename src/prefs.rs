//! The single piece of persisted state: the chosen interface language.
//!
//! Written when the user picks a language, read back on the next start.
//! Stored as a one-line file named after the key, under the XDG data dir.

use std::{env, fs, io, path::Path, path::PathBuf};

/// Name of the persisted key (and of the file that backs it).
pub const LANGUAGE_KEY: &str = "spiritual-language";

/// Resolve the data directory under `$XDG_DATA_HOME/solace` or
/// `~/.local/share/solace` when `XDG_DATA_HOME` is not set.
pub fn data_dir() -> Option<PathBuf> {
    let base = if let Some(xdg) = env::var_os("XDG_DATA_HOME") {
        Some(PathBuf::from(xdg))
    } else if let Some(home) = env::var_os("HOME") {
        Some(PathBuf::from(home).join(".local").join("share"))
    } else {
        None
    };

    base.map(|d| d.join("solace"))
}

/// Path of the persisted language file, if a data dir can be resolved.
pub fn language_path() -> Option<PathBuf> {
    data_dir().map(|d| d.join(LANGUAGE_KEY))
}

/// Read a language code from `path`. Missing, empty or unreadable files
/// yield `None`; callers fall back to the default language.
pub fn load_language_from(path: &Path) -> Option<String> {
    let raw = fs::read_to_string(path).ok()?;
    let code = raw.trim();
    if code.is_empty() {
        None
    } else {
        Some(code.to_string())
    }
}

/// Write a language code to `path`, creating parent directories as needed.
pub fn store_language_at(path: &Path, code: &str) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, code)
}

/// Read the persisted language from the default location.
pub fn load_language() -> Option<String> {
    language_path().and_then(|p| load_language_from(&p))
}

/// Persist the language at the default location.
pub fn store_language(code: &str) -> io::Result<()> {
    let Some(path) = language_path() else {
        return Err(io::Error::new(
            io::ErrorKind::NotFound,
            "no data directory available",
        ));
    };
    store_language_at(&path, code)
}
