//! On-demand translation state of a reading view.
//!
//! Selecting a language either shows a cached translation immediately or
//! asks the caller to fetch one edition. Fetched translations are memoised
//! per language for the lifetime of the panel; hiding the translation keeps
//! the cache.

use std::collections::HashMap;

use crate::edition::Language;

/// Translation sub-state of a ready view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslationStatus {
    Idle,
    Loading(Language),
    Shown(Language),
}

/// What the caller must do after [`TranslationPanel::select`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// The translation was cached and is now shown.
    Cached,
    /// Fetch this edition, then call [`TranslationPanel::fulfil`].
    Fetch(&'static str),
}

#[derive(Debug, Default)]
pub struct TranslationPanel {
    cache: HashMap<&'static str, Vec<Option<String>>>,
    status: Option<TranslationStatus>,
    /// Shown language to fall back to when a fetch fails.
    previous: Option<Language>,
}

impl TranslationPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> TranslationStatus {
        self.status.unwrap_or(TranslationStatus::Idle)
    }

    pub fn select(&mut self, language: Language) -> Selection {
        if self.cache.contains_key(language.code) {
            self.status = Some(TranslationStatus::Shown(language));
            return Selection::Cached;
        }
        self.previous = match self.status() {
            TranslationStatus::Shown(l) => Some(l),
            _ => None,
        };
        self.status = Some(TranslationStatus::Loading(language));
        Selection::Fetch(language.edition)
    }

    /// Store a fetched translation and show it.
    pub fn fulfil(&mut self, language: Language, lines: Vec<Option<String>>) {
        self.cache.insert(language.code, lines);
        self.status = Some(TranslationStatus::Shown(language));
    }

    /// A fetch failed: return to whatever was shown before.
    pub fn fail(&mut self) {
        self.status = Some(match self.previous.take() {
            Some(l) => TranslationStatus::Shown(l),
            None => TranslationStatus::Idle,
        });
    }

    /// Revert to original-script only. The cache is kept.
    pub fn hide(&mut self) {
        self.status = Some(TranslationStatus::Idle);
    }

    /// Lines of the translation currently shown, aligned to the verses.
    pub fn shown(&self) -> Option<&[Option<String>]> {
        match self.status() {
            TranslationStatus::Shown(l) => self.cache.get(l.code).map(|v| v.as_slice()),
            _ => None,
        }
    }
}
