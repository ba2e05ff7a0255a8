//! Welcome screen: hero text plus the language grid. Picking a language
//! persists it and jumps straight into the playlist.

use crate::lang::{self, LANGUAGES, Language};

pub struct WelcomeState {
    /// Cursor into [`LANGUAGES`].
    pub selected: usize,
}

impl WelcomeState {
    /// Start with the cursor on the persisted language, if any.
    pub fn new(current_code: Option<&str>) -> Self {
        Self {
            selected: current_code.and_then(lang::index_of).unwrap_or(0),
        }
    }

    pub fn next(&mut self) {
        self.selected = (self.selected + 1) % LANGUAGES.len();
    }

    pub fn prev(&mut self) {
        self.selected = (self.selected + LANGUAGES.len() - 1) % LANGUAGES.len();
    }

    pub fn chosen(&self) -> &'static Language {
        &LANGUAGES[self.selected]
    }
}
