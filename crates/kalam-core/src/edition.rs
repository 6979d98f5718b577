//! Editions offered by the content provider.
//!
//! The original-script text is always loaded from [`ARABIC_EDITION`];
//! translations are selected by a short language code.

use crate::route::ReadingUnit;

/// Original-script (Uthmani) edition.
pub const ARABIC_EDITION: &str = "quran-uthmani";

/// Edition shown next to the text in the single-verse view.
pub const DETAIL_TRANSLATION: Language = Language {
    code: "id",
    name: "Indonesian",
    edition: "id.indonesian",
};

/// A translation language and the provider edition that serves it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
    pub edition: &'static str,
}

const TRANSLATIONS: &[Language] = &[
    DETAIL_TRANSLATION,
    Language {
        code: "en",
        name: "English",
        edition: "en.sahih",
    },
    Language {
        code: "fr",
        name: "Français",
        edition: "fr.hamidullah",
    },
    Language {
        code: "tr",
        name: "Türkçe",
        edition: "tr.ates",
    },
    Language {
        code: "ur",
        name: "اردو",
        edition: "ur.jalandhry",
    },
];

const ARABIC: Language = Language {
    code: "ar",
    name: "Arab",
    edition: ARABIC_EDITION,
};

/// Languages selectable in a view over `unit`. The section view also lets
/// the reader switch the secondary line to the Arabic text itself.
pub fn languages_for(unit: ReadingUnit) -> Vec<Language> {
    let mut langs = Vec::with_capacity(TRANSLATIONS.len() + 1);
    if matches!(unit, ReadingUnit::Section(_)) {
        langs.push(ARABIC);
    }
    langs.extend_from_slice(TRANSLATIONS);
    langs
}

/// Look up a language by code for a given unit.
pub fn find_language(unit: ReadingUnit, code: &str) -> Option<Language> {
    languages_for(unit)
        .into_iter()
        .find(|l| l.code.eq_ignore_ascii_case(code))
}
