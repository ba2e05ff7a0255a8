//! The fixed set of interface languages offered during onboarding.

/// A selectable interface language.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Language {
    /// Two-letter code stored in the persisted preference.
    pub code: &'static str,
    pub name: &'static str,
    /// Name of the language written in itself.
    pub native: &'static str,
}

pub const LANGUAGES: [Language; 8] = [
    Language {
        code: "en",
        name: "English",
        native: "English",
    },
    Language {
        code: "es",
        name: "Spanish",
        native: "Español",
    },
    Language {
        code: "fr",
        name: "French",
        native: "Français",
    },
    Language {
        code: "de",
        name: "German",
        native: "Deutsch",
    },
    Language {
        code: "hi",
        name: "Hindi",
        native: "हिंदी",
    },
    Language {
        code: "zh",
        name: "Chinese",
        native: "中文",
    },
    Language {
        code: "ja",
        name: "Japanese",
        native: "日本語",
    },
    Language {
        code: "pt",
        name: "Portuguese",
        native: "Português",
    },
];

/// Look up a language by its code.
pub fn by_code(code: &str) -> Option<&'static Language> {
    LANGUAGES.iter().find(|l| l.code == code)
}

/// Position of a code in [`LANGUAGES`], used to restore the cursor on startup.
pub fn index_of(code: &str) -> Option<usize> {
    LANGUAGES.iter().position(|l| l.code == code)
}
