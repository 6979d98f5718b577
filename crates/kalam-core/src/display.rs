//! Pure transforms from provider responses to display models.
//!
//! Nothing here touches the network or storage; controllers fetch, decode
//! with [`crate::api::decode`], then call into this module.

use std::collections::HashMap;

use crate::api::{RawAyah, RawAyahCollection, RawSurah};
use crate::edition::DETAIL_TRANSLATION;
use crate::error::ViewError;
use crate::models::{
    Bookmark, BookmarkEntry, BookmarkListView, ChapterRef, ChapterSummary, NavTarget,
    PageSummary, ReadingHeader, ReadingView, SectionSummary, TranslationText, VerseDetail,
    VerseEntry,
};
use crate::route::{ReadingUnit, CHAPTER_COUNT};

const UNKNOWN_NAME: &str = "Unknown";
const UNKNOWN_ARABIC_NAME: &str = "غير معروف";

fn chapter_ref(raw: &RawSurah) -> ChapterRef {
    ChapterRef {
        number: raw.number,
        name: raw.english_name.clone(),
        arabic_name: raw.name.clone(),
    }
}

/// Build the chapter view from `GET /surah/{n}/quran-uthmani`.
///
/// The number of verses must match the chapter's declared total.
pub fn chapter_view(target: &str, raw: RawSurah) -> Result<ReadingView, ViewError> {
    let chapter = chapter_ref(&raw);
    let ayahs = raw
        .ayahs
        .ok_or_else(|| ViewError::malformed(target, "missing ayahs"))?;
    if ayahs.len() != raw.number_of_ayahs as usize {
        return Err(ViewError::malformed(
            target,
            format!(
                "chapter declares {} verses but {} were returned",
                raw.number_of_ayahs,
                ayahs.len()
            ),
        ));
    }

    let verses = ayahs
        .into_iter()
        .enumerate()
        .map(|(position, a)| VerseEntry {
            position,
            text: a.text,
            number: a.number_in_surah,
            global_number: a.number,
            chapter: chapter.clone(),
            translation: None,
            bookmarked: false,
        })
        .collect();

    let n = raw.number;
    Ok(ReadingView {
        header: ReadingHeader::Chapter {
            number: n,
            name: chapter.name,
            arabic_name: chapter.arabic_name,
            revelation_type: raw.revelation_type,
            number_of_verses: raw.number_of_ayahs,
            previous: (n > 1).then(|| n - 1),
            next: (n < CHAPTER_COUNT).then(|| n + 1),
        },
        verses,
    })
}

/// Build the section or page view from `GET /juz/{n}/…` or `GET /page/{n}/…`.
///
/// Each verse must carry its chapter, since a section or page spans
/// chapter boundaries.
pub fn collection_view(
    target: &str,
    unit: ReadingUnit,
    raw: RawAyahCollection,
) -> Result<ReadingView, ViewError> {
    if raw.ayahs.is_empty() {
        return Err(ViewError::malformed(target, "no ayahs returned"));
    }
    let header = match unit {
        ReadingUnit::Section(n) => ReadingHeader::Section { number: n },
        ReadingUnit::Page(n) => ReadingHeader::Page { number: n },
        ReadingUnit::Chapter(_) => {
            return Err(ViewError::malformed(
                target,
                "chapter responses are not verse collections",
            ))
        }
    };

    let mut verses = Vec::with_capacity(raw.ayahs.len());
    for (position, a) in raw.ayahs.into_iter().enumerate() {
        let surah = a.surah.ok_or_else(|| {
            ViewError::malformed(target, format!("verse {} has no chapter", a.number))
        })?;
        verses.push(VerseEntry {
            position,
            text: a.text,
            number: a.number_in_surah,
            global_number: a.number,
            chapter: ChapterRef {
                number: surah.number,
                name: surah.english_name,
                arabic_name: surah.name,
            },
            translation: None,
            bookmarked: false,
        });
    }

    Ok(ReadingView { header, verses })
}

/// Align translated verses to the verses of `view`.
///
/// Chapter translations are matched by in-chapter number; section and page
/// translations by position.
pub fn align_translation(view: &ReadingView, translated: Vec<RawAyah>) -> Vec<Option<String>> {
    match view.header {
        ReadingHeader::Chapter { .. } => {
            let by_number: HashMap<u16, String> = translated
                .into_iter()
                .map(|a| (a.number_in_surah, a.text))
                .collect();
            view.verses
                .iter()
                .map(|v| by_number.get(&v.number).cloned())
                .collect()
        }
        ReadingHeader::Section { .. } | ReadingHeader::Page { .. } => {
            let mut texts = translated.into_iter().map(|a| a.text);
            view.verses.iter().map(|_| texts.next()).collect()
        }
    }
}

/// Copy aligned translation lines onto the view, or clear them.
pub fn apply_translation(view: &mut ReadingView, lines: Option<&[Option<String>]>) {
    for (i, verse) in view.verses.iter_mut().enumerate() {
        verse.translation = lines.and_then(|l| l.get(i).cloned().flatten());
    }
}

/// Mark the verses that are bookmarked under either key space.
pub fn mark_bookmarks(view: &mut ReadingView, unit: ReadingUnit, bookmarks: &[Bookmark]) {
    for verse in view.verses.iter_mut() {
        let key = crate::bookmarks::key_for(unit, verse);
        verse.bookmarked = crate::bookmarks::is_saved(bookmarks, &key, verse.verse_ref());
    }
}

/// Build the single-verse view from
/// `GET /surah/{n}/editions/quran-uthmani,id.indonesian`.
pub fn verse_detail(
    target: &str,
    editions: Vec<RawSurah>,
    verse: u16,
) -> Result<VerseDetail, ViewError> {
    let mut editions = editions.into_iter();
    let arabic = editions
        .next()
        .ok_or_else(|| ViewError::malformed(target, "missing original-script edition"))?;
    let translation = editions
        .next()
        .ok_or_else(|| ViewError::malformed(target, "missing translation edition"))?;

    let chapter = chapter_ref(&arabic);
    let arabic_ayahs = arabic
        .ayahs
        .ok_or_else(|| ViewError::malformed(target, "missing ayahs"))?;
    let translated_ayahs = translation
        .ayahs
        .ok_or_else(|| ViewError::malformed(target, "missing ayahs in translation edition"))?;

    let total = arabic_ayahs.len() as u16;
    let index = verse as usize;
    if index == 0 || index > arabic_ayahs.len() {
        return Err(ViewError::InvalidParameter {
            kind: "verse",
            value: verse.to_string(),
            min: 1,
            max: total as u32,
        });
    }

    let ayah = &arabic_ayahs[index - 1];
    let translated = translated_ayahs.get(index - 1).ok_or_else(|| {
        ViewError::malformed(target, format!("translation edition lacks verse {}", verse))
    })?;
    let translations = vec![TranslationText {
        language: DETAIL_TRANSLATION.name.to_string(),
        text: translated.text.clone(),
    }];

    let n = chapter.number;
    let number = ayah.number_in_surah;
    let previous = if number > 1 {
        Some(NavTarget::Verse {
            chapter: n,
            verse: number - 1,
        })
    } else if n > 1 {
        Some(NavTarget::Chapter { chapter: n - 1 })
    } else {
        None
    };
    let next = if number < total {
        Some(NavTarget::Verse {
            chapter: n,
            verse: number + 1,
        })
    } else if n < CHAPTER_COUNT {
        Some(NavTarget::Chapter { chapter: n + 1 })
    } else {
        None
    };

    Ok(VerseDetail {
        number,
        total_verses: total,
        global_number: ayah.number,
        text: ayah.text.clone(),
        chapter,
        translations,
        previous,
        next,
        bookmarked: false,
    })
}

/// Build the chapter index from `GET /surah`, keeping only chapters whose
/// Latin name contains `search` (case-insensitive) or whose Arabic name
/// contains it verbatim.
pub fn chapter_index(raw: Vec<RawSurah>, search: Option<&str>) -> Vec<ChapterSummary> {
    let needle = search.map(|s| s.trim()).filter(|s| !s.is_empty());
    let needle_lower = needle.map(|s| s.to_lowercase());
    raw.into_iter()
        .filter(|s| match (needle, &needle_lower) {
            (Some(n), Some(lower)) => {
                s.english_name.to_lowercase().contains(lower.as_str()) || s.name.contains(n)
            }
            _ => true,
        })
        .map(|s| ChapterSummary {
            number: s.number,
            name: s.english_name,
            arabic_name: s.name,
            meaning: s.english_name_translation,
            revelation_type: s.revelation_type,
            number_of_verses: s.number_of_ayahs,
        })
        .collect()
}

fn first_chapter_names(raw: &RawAyahCollection) -> (String, String) {
    raw.ayahs
        .first()
        .and_then(|a| a.surah.as_ref())
        .map(|s| (s.english_name.clone(), s.name.clone()))
        .unwrap_or_else(|| (UNKNOWN_NAME.to_string(), UNKNOWN_ARABIC_NAME.to_string()))
}

pub fn section_summary(number: u8, raw: &RawAyahCollection) -> SectionSummary {
    let (name, arabic) = first_chapter_names(raw);
    SectionSummary {
        number,
        first_chapter_name: name,
        first_chapter_arabic_name: arabic,
        number_of_verses: raw.ayahs.len(),
    }
}

pub fn page_summary(number: u16, raw: &RawAyahCollection) -> PageSummary {
    let (name, arabic) = first_chapter_names(raw);
    PageSummary {
        number,
        first_chapter_name: name,
        first_chapter_arabic_name: arabic,
        first_verse: raw.ayahs.first().map(|a| a.number_in_surah).unwrap_or(1),
        number_of_verses: raw.ayahs.len(),
    }
}

/// Build the bookmark list view. `bookmarks` is expected most recent first.
pub fn bookmark_list(bookmarks: &[Bookmark]) -> BookmarkListView {
    let entries = bookmarks
        .iter()
        .map(|b| BookmarkEntry {
            key: b.key.to_string(),
            chapter_name: b.chapter_name.clone(),
            chapter_arabic_name: b.chapter_arabic_name.clone(),
            chapter_href: format!("/surah/{}", b.verse.chapter),
            label: format!("Ayat {}", b.verse.verse),
            verse_href: format!("/ayah/{}/{}", b.verse.chapter, b.verse.verse),
            section: b.key.section(),
            saved_at: b.date.format("%-d %B %Y %H:%M").to_string(),
        })
        .collect();
    BookmarkListView { entries }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::RawSurahRef;
    use crate::models::{BookmarkKey, RevelationType, VerseRef};
    use chrono::{TimeZone, Utc};

    fn ayah(global: u16, in_surah: u16, text: &str) -> RawAyah {
        RawAyah {
            number: global,
            text: text.to_string(),
            number_in_surah: in_surah,
            surah: None,
        }
    }

    fn surah(number: u16, verses: u16) -> RawSurah {
        RawSurah {
            number,
            name: format!("سورة {}", number),
            english_name: format!("Chapter {}", number),
            english_name_translation: "Meaning".to_string(),
            revelation_type: RevelationType::Medinan,
            number_of_ayahs: verses,
            ayahs: Some(
                (1..=verses)
                    .map(|v| ayah(1000 + v, v, &format!("text {}", v)))
                    .collect(),
            ),
        }
    }

    fn with_chapter(mut a: RawAyah, chapter: u16) -> RawAyah {
        a.surah = Some(RawSurahRef {
            number: chapter,
            name: format!("سورة {}", chapter),
            english_name: format!("Chapter {}", chapter),
        });
        a
    }

    #[test]
    fn chapter_view_counts_verses_and_links_neighbours() {
        let view = chapter_view("surah/2", surah(2, 7)).unwrap();
        assert_eq!(view.verses.len(), 7);
        assert_eq!(view.verses[6].number, 7);
        assert_eq!(view.verses[6].position, 6);
        match view.header {
            ReadingHeader::Chapter {
                number_of_verses,
                previous,
                next,
                ..
            } => {
                assert_eq!(number_of_verses, 7);
                assert_eq!(previous, Some(1));
                assert_eq!(next, Some(3));
            }
            other => panic!("unexpected header {:?}", other),
        }
    }

    #[test]
    fn last_chapter_has_no_next() {
        let view = chapter_view("surah/114", surah(114, 6)).unwrap();
        assert!(matches!(
            view.header,
            ReadingHeader::Chapter { next: None, previous: Some(113), .. }
        ));
    }

    #[test]
    fn chapter_view_rejects_count_mismatch() {
        let mut raw = surah(3, 4);
        raw.number_of_ayahs = 200;
        let err = chapter_view("surah/3", raw).unwrap_err();
        assert!(matches!(err, ViewError::MalformedResponse { .. }));
    }

    #[test]
    fn collection_view_spans_chapters() {
        let raw = RawAyahCollection {
            number: 1,
            ayahs: vec![
                with_chapter(ayah(7, 7, "last of one"), 1),
                with_chapter(ayah(8, 1, "first of two"), 2),
            ],
        };
        let view = collection_view("page/1", ReadingUnit::Page(1), raw).unwrap();
        assert_eq!(view.header, ReadingHeader::Page { number: 1 });
        assert_eq!(view.verses[1].chapter.number, 2);
        assert_eq!(view.verses[1].global_number, 8);
    }

    #[test]
    fn collection_verse_without_chapter_is_malformed() {
        let raw = RawAyahCollection {
            number: 1,
            ayahs: vec![ayah(1, 1, "x")],
        };
        assert!(collection_view("juz/1", ReadingUnit::Section(1), raw).is_err());
    }

    #[test]
    fn chapter_translation_aligns_by_verse_number() {
        let view = chapter_view("surah/5", surah(5, 3)).unwrap();
        let translated = vec![ayah(0, 3, "three"), ayah(0, 1, "one")];
        let lines = align_translation(&view, translated);
        assert_eq!(
            lines,
            vec![Some("one".to_string()), None, Some("three".to_string())]
        );
    }

    #[test]
    fn apply_and_clear_translation() {
        let mut view = chapter_view("surah/5", surah(5, 2)).unwrap();
        let lines = vec![Some("a".to_string()), Some("b".to_string())];
        apply_translation(&mut view, Some(&lines));
        assert_eq!(view.verses[1].translation.as_deref(), Some("b"));
        apply_translation(&mut view, None);
        assert!(view.verses.iter().all(|v| v.translation.is_none()));
    }

    #[test]
    fn verse_detail_navigation() {
        let detail = verse_detail("surah/2", vec![surah(2, 5), surah(2, 5)], 5).unwrap();
        assert_eq!(detail.number, 5);
        assert_eq!(detail.translations.len(), 1);
        assert_eq!(
            detail.previous,
            Some(NavTarget::Verse {
                chapter: 2,
                verse: 4
            })
        );
        assert_eq!(detail.next, Some(NavTarget::Chapter { chapter: 3 }));

        let first = verse_detail("surah/1", vec![surah(1, 7), surah(1, 7)], 1).unwrap();
        assert_eq!(first.previous, None);
    }

    #[test]
    fn verse_detail_out_of_range() {
        let err = verse_detail("surah/1", vec![surah(1, 7), surah(1, 7)], 8).unwrap_err();
        assert!(matches!(
            err,
            ViewError::InvalidParameter {
                kind: "verse",
                max: 7,
                ..
            }
        ));
    }

    #[test]
    fn verse_detail_requires_translated_verses() {
        let mut bare = surah(1, 7);
        bare.ayahs = None;
        let err = verse_detail("surah/1", vec![surah(1, 7), bare], 5).unwrap_err();
        assert!(matches!(err, ViewError::MalformedResponse { .. }));
        assert!(err.to_string().contains("missing ayahs in translation edition"));
    }

    #[test]
    fn verse_detail_short_translation_is_malformed() {
        let err = verse_detail("surah/1", vec![surah(1, 7), surah(1, 3)], 5).unwrap_err();
        assert!(matches!(err, ViewError::MalformedResponse { .. }));
        assert!(err.to_string().contains("lacks verse 5"));

        let detail = verse_detail("surah/1", vec![surah(1, 7), surah(1, 3)], 3).unwrap();
        assert_eq!(detail.translations.len(), 1);
        assert_eq!(detail.translations[0].text, "text 3");
    }

    #[test]
    fn chapter_index_filters_by_name() {
        let mut list = vec![surah(1, 7), surah(2, 286)];
        list[1].english_name = "Al-Baqara".to_string();
        for s in list.iter_mut() {
            s.ayahs = None;
        }
        let all = chapter_index(list.clone(), None);
        assert_eq!(all.len(), 2);
        let hits = chapter_index(list, Some("baq"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].number, 2);
    }

    #[test]
    fn section_summary_falls_back_to_unknown() {
        let raw = RawAyahCollection {
            number: 4,
            ayahs: vec![ayah(1, 1, "x")],
        };
        let summary = section_summary(4, &raw);
        assert_eq!(summary.first_chapter_name, "Unknown");
        assert_eq!(summary.number_of_verses, 1);
    }

    #[test]
    fn bookmark_entry_links_and_label() {
        let bookmark = Bookmark {
            key: BookmarkKey::ChapterVerse {
                chapter: 2,
                verse: 255,
            },
            verse: VerseRef {
                chapter: 2,
                verse: 255,
            },
            chapter_name: "Al-Baqara".to_string(),
            chapter_arabic_name: "سورة البقرة".to_string(),
            date: Utc.with_ymd_and_hms(2024, 3, 5, 9, 7, 0).unwrap(),
        };
        let list = bookmark_list(&[bookmark]);
        let entry = &list.entries[0];
        assert_eq!(entry.chapter_href, "/surah/2");
        assert_eq!(entry.label, "Ayat 255");
        assert_eq!(entry.verse_href, "/ayah/2/255");
        assert_eq!(entry.saved_at, "5 March 2024 09:07");
        assert_eq!(entry.section, None);
    }
}
