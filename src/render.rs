//! Plain-text rendering of display models for the terminal.
//!
//! Every function returns the full text; the CLI prints it to stdout. With
//! `--json` the CLI prints the model itself via [`json`] instead.

use std::fmt::Write;

use anyhow::Result;
use serde::Serialize;

use kalam_core::models::{
    BookmarkListView, ChapterSummary, PageSummary, ReadingHeader, ReadingView, SectionSummary,
    VerseDetail,
};

const STAR: &str = "★";
const NO_STAR: &str = "☆";

pub fn json<T: Serialize + ?Sized>(model: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(model)?)
}

fn star(bookmarked: bool) -> &'static str {
    if bookmarked {
        STAR
    } else {
        NO_STAR
    }
}

pub fn reading_view(view: &ReadingView) -> String {
    let mut out = String::new();
    match &view.header {
        ReadingHeader::Chapter {
            number,
            name,
            arabic_name,
            revelation_type,
            number_of_verses,
            previous,
            next,
        } => {
            let _ = writeln!(out, "{}. {}  {}", number, name, arabic_name);
            let _ = writeln!(out, "{} · {} verses", revelation_type, number_of_verses);
            let nav: Vec<String> = [
                previous.map(|p| format!("previous: /surah/{}", p)),
                next.map(|n| format!("next: /surah/{}", n)),
            ]
            .into_iter()
            .flatten()
            .collect();
            if !nav.is_empty() {
                let _ = writeln!(out, "{}", nav.join("  "));
            }
        }
        ReadingHeader::Section { number } => {
            let _ = writeln!(out, "Juz {}", number);
        }
        ReadingHeader::Page { number } => {
            let _ = writeln!(out, "Page {}", number);
        }
    }

    let spans_chapters = !matches!(view.header, ReadingHeader::Chapter { .. });
    let mut current_chapter = None;
    for verse in &view.verses {
        if spans_chapters && current_chapter != Some(verse.chapter.number) {
            current_chapter = Some(verse.chapter.number);
            let _ = writeln!(
                out,
                "\n── {}. {}  {}",
                verse.chapter.number, verse.chapter.name, verse.chapter.arabic_name
            );
        }
        let _ = writeln!(
            out,
            "\n{} [{}:{}] {}",
            star(verse.bookmarked),
            verse.chapter.number,
            verse.number,
            verse.text
        );
        if let Some(translation) = &verse.translation {
            let _ = writeln!(out, "    {}", translation);
        }
    }
    out
}

pub fn verse_detail(detail: &VerseDetail) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} {} {}  ·  verse {} of {}",
        star(detail.bookmarked),
        detail.chapter.name,
        detail.chapter.arabic_name,
        detail.number,
        detail.total_verses
    );
    let _ = writeln!(out, "\n{}", detail.text);
    for t in &detail.translations {
        let _ = writeln!(out, "\n{}: {}", t.language, t.text);
    }
    let mut nav = Vec::new();
    if let Some(p) = detail.previous {
        nav.push(format!("previous: {}", p.href()));
    }
    if let Some(n) = detail.next {
        nav.push(format!("next: {}", n.href()));
    }
    if !nav.is_empty() {
        let _ = writeln!(out, "\n{}", nav.join("  "));
    }
    out
}

pub fn chapter_index(chapters: &[ChapterSummary]) -> String {
    if chapters.is_empty() {
        return "No chapters match.\n".to_string();
    }
    let mut out = String::new();
    for c in chapters {
        let _ = writeln!(
            out,
            "{:>3}. {:<16} {:<28} {:<8} {:>3} verses  {}",
            c.number, c.name, c.meaning, c.revelation_type, c.number_of_verses, c.arabic_name
        );
    }
    out
}

pub fn section_index(sections: &[SectionSummary]) -> String {
    let mut out = String::new();
    for s in sections {
        let _ = writeln!(
            out,
            "Juz {:>2}  starts in {} {}  ·  {} verses",
            s.number, s.first_chapter_name, s.first_chapter_arabic_name, s.number_of_verses
        );
    }
    out
}

pub fn page_index(pages: &[PageSummary]) -> String {
    let mut out = String::new();
    for p in pages {
        let _ = writeln!(
            out,
            "Page {:>3}  {} {} from verse {}  ·  {} verses",
            p.number,
            p.first_chapter_name,
            p.first_chapter_arabic_name,
            p.first_verse,
            p.number_of_verses
        );
    }
    out
}

pub fn bookmark_list(view: &BookmarkListView) -> String {
    if view.is_empty() {
        return format!("{}\n", BookmarkListView::EMPTY_MESSAGE);
    }
    let mut out = String::new();
    for e in &view.entries {
        let _ = write!(
            out,
            "{} {} ({})  {} ({})",
            e.chapter_name, e.chapter_arabic_name, e.chapter_href, e.label, e.verse_href
        );
        if let Some(section) = e.section {
            let _ = write!(out, "  Juz {}", section);
        }
        let _ = writeln!(out, "  saved {}  [{}]", e.saved_at, e.key);
    }
    out
}
