//! Application model: current route, the active screen's state, and the
//! playback flags mirrored from the player thread.

use std::path::PathBuf;

use crate::catalog::Track;
use crate::player::PlaybackHandle;
use crate::screens::{LanguageState, PlaylistState, QuizState, UploadState, WelcomeState};

/// The navigable routes. Navigation is always an explicit call; there are
/// no deep-link parameters beyond the route itself.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Route {
    Welcome,
    Language,
    Playlist,
    Quiz,
    Upload,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Welcome => "/",
            Route::Language => "/language",
            Route::Playlist => "/playlist",
            Route::Quiz => "/quiz",
            Route::Upload => "/upload",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Welcome => "Spiritual Harmony",
            Route::Language => "Choose Your Language",
            Route::Playlist => "Sacred Sound Library",
            Route::Quiz => "Find Your Path",
            Route::Upload => "Upload Your Sacred Sounds",
        }
    }
}

/// State of the screen currently mounted. Replaced wholesale on
/// navigation; the old screen's state is dropped with it.
pub enum Screen {
    Welcome(WelcomeState),
    Language(LanguageState),
    Playlist(PlaylistState),
    Quiz(QuizState),
    Upload(UploadState),
}

/// The playback state of the application, mirrored from the player.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlaybackState {
    Stopped,
    Playing,
    Paused,
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::Stopped
    }
}

/// The main application model.
pub struct App {
    pub route: Route,
    pub screen: Screen,
    /// Persisted language code, if one was ever chosen.
    pub language: Option<String>,
    /// The curated catalog; immutable for the session.
    pub catalog: Vec<Track>,
    pub playback: PlaybackState,
    pub playback_handle: Option<PlaybackHandle>,
    /// Set when the active track sequence no longer matches what the
    /// player thread was last given.
    pub sequence_dirty: bool,
    /// Transient notification shown in the status box.
    pub status: Option<String>,
}

impl App {
    pub fn new(catalog: Vec<Track>, language: Option<String>) -> Self {
        let screen = Screen::Welcome(WelcomeState::new(language.as_deref()));
        Self {
            route: Route::Welcome,
            screen,
            language,
            catalog,
            playback: PlaybackState::Stopped,
            playback_handle: None,
            sequence_dirty: true,
            status: None,
        }
    }

    /// Move to `route`, building fresh screen state and tearing down the
    /// old screen's. Also flags the player sequence for resync.
    pub fn navigate(&mut self, route: Route) {
        self.screen = match route {
            Route::Welcome => Screen::Welcome(WelcomeState::new(self.language.as_deref())),
            Route::Language => Screen::Language(LanguageState::new(self.language.as_deref())),
            Route::Playlist => Screen::Playlist(PlaylistState::new()),
            Route::Quiz => Screen::Quiz(QuizState::new()),
            Route::Upload => Screen::Upload(UploadState::new()),
        };
        self.route = route;
        self.status = None;
        self.mark_sequence_dirty();
    }

    /// Record the chosen language on the model; persistence is the
    /// caller's side of the operation.
    pub fn set_language(&mut self, code: &str) {
        self.language = Some(code.to_string());
    }

    /// Attach the shared handle used to observe the player thread.
    pub fn set_playback_handle(&mut self, h: PlaybackHandle) {
        self.playback_handle = Some(h);
    }

    /// The track sequence the mounted screen plays from: the curated
    /// catalog on the playlist, local previews on the upload screen,
    /// nothing anywhere else.
    pub fn current_sequence(&self) -> Vec<PathBuf> {
        match &self.screen {
            Screen::Playlist(_) => self.catalog.iter().map(|t| t.audio.clone()).collect(),
            Screen::Upload(state) => state.uploaded_paths(),
            _ => Vec::new(),
        }
    }

    pub fn mark_sequence_dirty(&mut self) {
        self.sequence_dirty = true;
    }

    pub fn clear_sequence_dirty(&mut self) {
        self.sequence_dirty = false;
    }

    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status = Some(msg.into());
    }
}
