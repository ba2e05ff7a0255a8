//! Dedicated language-selection screen, reachable from the welcome screen
//! and from "change language" on other screens.

use crate::lang::{self, LANGUAGES, Language};

pub struct LanguageState {
    pub selected: usize,
}

impl LanguageState {
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
