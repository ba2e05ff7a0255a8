use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/solace/config.toml` or `~/.config/solace/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `SOLACE__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub storage: StorageSettings,
    pub upload: UploadSettings,
    pub library: LibrarySettings,
    pub ui: UiSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage: StorageSettings::default(),
            upload: UploadSettings::default(),
            library: LibrarySettings::default(),
            ui: UiSettings::default(),
        }
    }
}

/// Object-storage bucket the upload forwarder talks to.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// Base URL of the storage project, without trailing slash.
    pub base_url: String,
    /// API key sent as bearer token. Empty means "not configured";
    /// uploads will fail with a storage error until it is set.
    pub api_key: String,
    /// Bucket that holds the audio objects.
    pub bucket: String,
    /// Prefix prepended to every stored object name.
    pub object_prefix: String,
    /// HTTP timeout for a single storage call, in seconds.
    pub timeout_secs: u64,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            base_url: "https://your-project.supabase.co".to_string(),
            api_key: String::new(),
            bucket: "audio-files".to_string(),
            object_prefix: "tracks".to_string(),
            timeout_secs: 30,
        }
    }
}

/// Rules applied to files staged for upload.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    /// Directory scanned for audio files to upload.
    pub staging_dir: String,
    /// File extensions accepted as audio (case-insensitive, without dot).
    pub extensions: Vec<String>,
    /// Per-file size cap. Larger files are rejected before any network call.
    pub max_file_bytes: u64,
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            staging_dir: "Uploads".to_string(),
            extensions: vec![
                "mp3".into(),
                "wav".into(),
                "m4a".into(),
                "flac".into(),
                "ogg".into(),
            ],
            // 50 MB per file, as advertised by the upload screen.
            max_file_bytes: 50 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LibrarySettings {
    /// Directory holding the audio and artwork of the curated catalog.
    pub media_dir: String,
}

impl Default for LibrarySettings {
    fn default() -> Self {
        Self {
            media_dir: "Media".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Whether track descriptions are shown on the playlist screen.
    pub show_descriptions: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ Spiritual Harmony ~ ".to_string(),
            show_descriptions: true,
        }
    }
}
