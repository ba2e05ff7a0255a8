//! Per-screen state objects. Each screen owns exactly the state it needs
//! and is rebuilt from scratch on navigation, so nothing leaks between
//! screens except the persisted language preference.

mod language;
mod playlist;
mod quiz;
mod upload;
mod welcome;

pub use language::LanguageState;
pub use playlist::PlaylistState;
pub use quiz::QuizState;
pub use upload::{UploadFocus, UploadState};
pub use welcome::WelcomeState;
