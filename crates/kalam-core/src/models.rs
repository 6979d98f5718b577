//! Core data models: bookmarks, verse references and the display models
//! each view derives from a provider response.
//!
//! Display models are `Serialize` so the CLI can emit them as JSON; they are
//! rebuilt on every navigation and never persisted.

use std::fmt;
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Canonical location of a verse: chapter number plus in-chapter number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VerseRef {
    pub chapter: u16,
    pub verse: u16,
}

/// Identity of a bookmark.
///
/// The chapter view keys bookmarks by chapter and in-chapter verse, the
/// section view by section and global verse number. Equality compares the
/// tag together with its fields, so the same verse saved from both views
/// yields two distinct keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BookmarkKey {
    ChapterVerse { chapter: u16, verse: u16 },
    SectionVerse { section: u8, global_verse: u16 },
}

impl BookmarkKey {
    pub fn section(&self) -> Option<u8> {
        match self {
            BookmarkKey::SectionVerse { section, .. } => Some(*section),
            BookmarkKey::ChapterVerse { .. } => None,
        }
    }
}

/// `surah:<chapter>:<verse>` or `juz:<section>:<global verse>`.
impl fmt::Display for BookmarkKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookmarkKey::ChapterVerse { chapter, verse } => write!(f, "surah:{}:{}", chapter, verse),
            BookmarkKey::SectionVerse {
                section,
                global_verse,
            } => write!(f, "juz:{}:{}", section, global_verse),
        }
    }
}

impl FromStr for BookmarkKey {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(':').collect();
        let [kind, unit, verse] = parts.as_slice() else {
            bail!(
                "invalid bookmark key '{}': expected surah:<chapter>:<verse> or juz:<section>:<verse>",
                s
            );
        };
        let verse: u16 = verse
            .parse()
            .with_context(|| format!("invalid verse number in bookmark key '{}'", s))?;
        match *kind {
            "surah" => Ok(BookmarkKey::ChapterVerse {
                chapter: unit
                    .parse()
                    .with_context(|| format!("invalid chapter in bookmark key '{}'", s))?,
                verse,
            }),
            "juz" => Ok(BookmarkKey::SectionVerse {
                section: unit
                    .parse()
                    .with_context(|| format!("invalid section in bookmark key '{}'", s))?,
                global_verse: verse,
            }),
            other => bail!("unknown bookmark kind '{}': expected surah or juz", other),
        }
    }
}

/// A persisted, user-saved reference to one verse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bookmark {
    pub key: BookmarkKey,
    pub verse: VerseRef,
    pub chapter_name: String,
    pub chapter_arabic_name: String,
    /// Creation time; only used for ordering.
    pub date: DateTime<Utc>,
}

impl Bookmark {
    /// Whether this record refers to `verse`, whichever view created it.
    pub fn refers_to(&self, verse: VerseRef) -> bool {
        self.verse == verse
    }
}

/// Revelation classification of a chapter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevelationType {
    Meccan,
    Medinan,
}

impl fmt::Display for RevelationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RevelationType::Meccan => f.pad("Meccan"),
            RevelationType::Medinan => f.pad("Medinan"),
        }
    }
}

/// Chapter identity as carried by each verse entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChapterRef {
    pub number: u16,
    pub name: String,
    pub arabic_name: String,
}

/// One verse in a reading view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerseEntry {
    /// Zero-based position within the view.
    pub position: usize,
    pub text: String,
    /// Number within its chapter.
    pub number: u16,
    pub global_number: u16,
    pub chapter: ChapterRef,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub translation: Option<String>,
    pub bookmarked: bool,
}

impl VerseEntry {
    pub fn verse_ref(&self) -> VerseRef {
        VerseRef {
            chapter: self.chapter.number,
            verse: self.number,
        }
    }
}

/// Header metadata of a reading view.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "unit", rename_all = "snake_case")]
pub enum ReadingHeader {
    Chapter {
        number: u16,
        name: String,
        arabic_name: String,
        revelation_type: RevelationType,
        number_of_verses: u16,
        previous: Option<u16>,
        next: Option<u16>,
    },
    Section {
        number: u8,
    },
    Page {
        number: u16,
    },
}

/// Display model of the chapter, section and page views.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadingView {
    pub header: ReadingHeader,
    pub verses: Vec<VerseEntry>,
}

/// Where "previous" / "next" leads from the verse detail view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "to", rename_all = "snake_case")]
pub enum NavTarget {
    Verse { chapter: u16, verse: u16 },
    Chapter { chapter: u16 },
}

impl NavTarget {
    pub fn href(&self) -> String {
        match self {
            NavTarget::Verse { chapter, verse } => format!("/ayah/{}/{}", chapter, verse),
            NavTarget::Chapter { chapter } => format!("/surah/{}", chapter),
        }
    }
}

/// A translation shown alongside a verse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationText {
    pub language: String,
    pub text: String,
}

/// Display model of the single-verse view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerseDetail {
    pub chapter: ChapterRef,
    pub number: u16,
    pub total_verses: u16,
    pub global_number: u16,
    pub text: String,
    pub translations: Vec<TranslationText>,
    pub previous: Option<NavTarget>,
    pub next: Option<NavTarget>,
    pub bookmarked: bool,
}

impl VerseDetail {
    pub fn verse_ref(&self) -> VerseRef {
        VerseRef {
            chapter: self.chapter.number,
            verse: self.number,
        }
    }
}

/// One row of the chapter index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChapterSummary {
    pub number: u16,
    pub name: String,
    pub arabic_name: String,
    pub meaning: String,
    pub revelation_type: RevelationType,
    pub number_of_verses: u16,
}

/// One row of the section index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionSummary {
    pub number: u8,
    pub first_chapter_name: String,
    pub first_chapter_arabic_name: String,
    pub number_of_verses: usize,
}

/// One row of the page index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSummary {
    pub number: u16,
    pub first_chapter_name: String,
    pub first_chapter_arabic_name: String,
    pub first_verse: u16,
    pub number_of_verses: usize,
}

/// One row of the bookmark list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookmarkEntry {
    pub key: String,
    pub chapter_name: String,
    pub chapter_arabic_name: String,
    pub chapter_href: String,
    pub label: String,
    pub verse_href: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section: Option<u8>,
    pub saved_at: String,
}

/// Display model of the bookmark list view.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookmarkListView {
    pub entries: Vec<BookmarkEntry>,
}

impl BookmarkListView {
    pub const EMPTY_MESSAGE: &'static str =
        "No bookmarks yet. Star a verse while reading to find it here again.";

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bookmark_key_parses_both_kinds() {
        assert_eq!(
            "surah:2:255".parse::<BookmarkKey>().unwrap(),
            BookmarkKey::ChapterVerse {
                chapter: 2,
                verse: 255
            }
        );
        assert_eq!(
            "juz:3:262".parse::<BookmarkKey>().unwrap(),
            BookmarkKey::SectionVerse {
                section: 3,
                global_verse: 262
            }
        );
    }

    #[test]
    fn bookmark_key_display_matches_parse() {
        let key = BookmarkKey::SectionVerse {
            section: 30,
            global_verse: 6236,
        };
        assert_eq!(key.to_string(), "juz:30:6236");
        assert_eq!(key.to_string().parse::<BookmarkKey>().unwrap(), key);
    }

    #[test]
    fn bookmark_key_rejects_garbage() {
        assert!("surah:2".parse::<BookmarkKey>().is_err());
        assert!("page:1:1".parse::<BookmarkKey>().is_err());
        assert!("surah:x:1".parse::<BookmarkKey>().is_err());
    }

    #[test]
    fn keys_from_different_views_are_distinct() {
        let chapter = BookmarkKey::ChapterVerse {
            chapter: 2,
            verse: 255,
        };
        let section = BookmarkKey::SectionVerse {
            section: 3,
            global_verse: 262,
        };
        assert_ne!(chapter, section);
    }

    #[test]
    fn bookmark_serializes_with_tagged_key() {
        let bookmark = Bookmark {
            key: BookmarkKey::ChapterVerse {
                chapter: 1,
                verse: 1,
            },
            verse: VerseRef {
                chapter: 1,
                verse: 1,
            },
            chapter_name: "Al-Faatiha".to_string(),
            chapter_arabic_name: "سُورَةُ ٱلْفَاتِحَةِ".to_string(),
            date: DateTime::parse_from_rfc3339("2024-01-01T00:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        };
        let json = serde_json::to_value(&bookmark).unwrap();
        assert_eq!(json["key"]["kind"], "chapter_verse");
        assert_eq!(json["date"], "2024-01-01T00:00:00Z");
    }
}
