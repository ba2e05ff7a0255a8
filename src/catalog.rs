//! Track catalog: the curated built-in tracks, the sections tracks are
//! filed under, and the types/validation used by the upload flow.

use std::path::{Path, PathBuf};
use std::time::Duration;

use lofty::file::{AudioFile, TaggedFileExt};
use lofty::tag::ItemKey;
use thiserror::Error;
use walkdir::WalkDir;

use crate::config::UploadSettings;

/// The sections a track can be filed under.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    Meditation,
    Chanting,
    Healing,
    Nature,
    Instrumental,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Meditation,
        Category::Chanting,
        Category::Healing,
        Category::Nature,
        Category::Instrumental,
        Category::Other,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Category::Meditation => "Meditation",
            Category::Chanting => "Chanting",
            Category::Healing => "Healing",
            Category::Nature => "Nature",
            Category::Instrumental => "Instrumental",
            Category::Other => "Other",
        }
    }

    /// Short blurb shown when picking an upload section.
    pub fn description(self) -> &'static str {
        match self {
            Category::Meditation => "Guided meditations and mindfulness tracks",
            Category::Chanting => "Sacred mantras and devotional songs",
            Category::Healing => "Sound therapy and healing frequencies",
            Category::Nature => "Natural soundscapes and ambient sounds",
            Category::Instrumental => "Spiritual music and classical pieces",
            Category::Other => "Other spiritual and wellness content",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// A curated track. Immutable once loaded for the session.
#[derive(Debug, Clone)]
pub struct Track {
    /// Unique, stable within the catalog.
    pub id: u32,
    pub title: String,
    pub artist: String,
    /// Display-only duration label, not seconds.
    pub duration_label: String,
    /// Artwork file under the media dir.
    pub artwork: PathBuf,
    pub category: Category,
    pub description: String,
    /// Playable audio file under the media dir.
    pub audio: PathBuf,
}

/// A track added through the upload flow. Lives only for the session.
#[derive(Debug, Clone)]
pub struct UploadedTrack {
    /// Creation timestamp in unix milliseconds.
    pub id: u64,
    /// Filename minus extension.
    pub title: String,
    /// Local file the upload was read from; also used for preview playback.
    pub file: PathBuf,
    /// Public URL returned by the storage forwarder.
    pub url: String,
    pub section: Category,
}

/// The shipped catalog. No mutation at runtime.
pub fn builtin(media_dir: &Path) -> Vec<Track> {
    vec![
        Track {
            id: 1,
            title: "Deep Meditation Flow".to_string(),
            artist: "Sacred Sounds".to_string(),
            duration_label: "15:30".to_string(),
            artwork: media_dir.join("meditation-1.jpg"),
            category: Category::Meditation,
            description: "Guided meditation with Tibetan bowls and nature sounds".to_string(),
            audio: media_dir.join("deep-meditation-flow.mp3"),
        },
        Track {
            id: 2,
            title: "Om Mani Padme Hum".to_string(),
            artist: "Zen Masters".to_string(),
            duration_label: "21:45".to_string(),
            artwork: media_dir.join("chanting-2.jpg"),
            category: Category::Chanting,
            description: "Traditional Sanskrit mantras for compassion and wisdom".to_string(),
            audio: media_dir.join("om-mani-padme-hum.mp3"),
        },
        Track {
            id: 3,
            title: "432Hz Healing Frequencies".to_string(),
            artist: "Sound Healers".to_string(),
            duration_label: "18:20".to_string(),
            artwork: media_dir.join("healing-3.jpg"),
            category: Category::Healing,
            description: "Pure healing tones for chakra alignment and restoration".to_string(),
            audio: media_dir.join("432hz-healing-frequencies.mp3"),
        },
    ]
}

/// Rejections raised before any storage call is attempted.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{path} is not an audio file (accepted: {accepted})")]
    NotAudio { path: PathBuf, accepted: String },
    #[error("{path} is {size} bytes, over the {max} byte limit")]
    TooLarge { path: PathBuf, size: u64, max: u64 },
    #[error("could not inspect {path}: {source}")]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Check a file extension against the accepted audio extensions.
pub fn is_audio_file(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            let ext = ext.to_ascii_lowercase();
            extensions.iter().any(|e| e.eq_ignore_ascii_case(&ext))
        })
        .unwrap_or(false)
}

/// Gate a file before it is queued for upload: audio extension and size cap.
pub fn validate_upload(path: &Path, settings: &UploadSettings) -> Result<(), ValidationError> {
    if !is_audio_file(path, &settings.extensions) {
        return Err(ValidationError::NotAudio {
            path: path.to_path_buf(),
            accepted: settings.extensions.join(", "),
        });
    }

    let meta = std::fs::metadata(path).map_err(|source| ValidationError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    if meta.len() > settings.max_file_bytes {
        return Err(ValidationError::TooLarge {
            path: path.to_path_buf(),
            size: meta.len(),
            max: settings.max_file_bytes,
        });
    }

    Ok(())
}

/// A local file found in the staging directory, ready to upload.
#[derive(Debug, Clone)]
pub struct StagedFile {
    pub path: PathBuf,
    /// Tag title when present, file stem otherwise.
    pub title: String,
    pub size: u64,
    pub duration: Option<Duration>,
}

/// Title shown for an upload candidate: filename minus extension.
pub fn title_from_path(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("UNKNOWN")
        .to_string()
}

/// Walk the staging directory. Audio files come back as [`StagedFile`]s
/// sorted by title; anything else lands in the rejected list so the
/// upload screen can notify per-file.
pub fn scan_staging(dir: &Path, settings: &UploadSettings) -> (Vec<StagedFile>, Vec<PathBuf>) {
    let mut staged: Vec<StagedFile> = Vec::new();
    let mut rejected: Vec<PathBuf> = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        if !is_audio_file(path, &settings.extensions) {
            rejected.push(path.to_path_buf());
            continue;
        }

        let size = entry.metadata().map(|m| m.len()).unwrap_or(0);

        let mut title = title_from_path(path);
        let mut duration: Option<Duration> = None;
        if let Ok(tagged) = lofty::read_from_path(path) {
            duration = Some(tagged.properties().duration());
            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(v) = tag.get_string(&ItemKey::TrackTitle) {
                    if !v.trim().is_empty() {
                        title = v.to_string();
                    }
                }
            }
        }

        staged.push(StagedFile {
            path: path.to_path_buf(),
            title,
            size,
            duration,
        });
    }

    staged.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));
    (staged, rejected)
}
