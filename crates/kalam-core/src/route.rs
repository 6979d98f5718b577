//! Route parameter validation.
//!
//! Every reading route takes one numeric parameter. Validation happens
//! before any network call; a bad value moves the view straight into its
//! error state.

use crate::error::ViewError;

pub const CHAPTER_COUNT: u16 = 114;
pub const SECTION_COUNT: u8 = 30;
pub const PAGE_COUNT: u16 = 604;

/// The addressable reading units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReadingUnit {
    Chapter(u16),
    Section(u8),
    Page(u16),
}

impl ReadingUnit {
    /// Provider path segment, e.g. `surah/2`.
    pub fn path(&self) -> String {
        match self {
            ReadingUnit::Chapter(n) => format!("surah/{}", n),
            ReadingUnit::Section(n) => format!("juz/{}", n),
            ReadingUnit::Page(n) => format!("page/{}", n),
        }
    }

    pub fn label(&self) -> String {
        match self {
            ReadingUnit::Chapter(n) => format!("Surah {}", n),
            ReadingUnit::Section(n) => format!("Juz {}", n),
            ReadingUnit::Page(n) => format!("Page {}", n),
        }
    }
}

fn parse_in_range(kind: &'static str, raw: &str, max: u32) -> Result<u32, ViewError> {
    let invalid = || ViewError::InvalidParameter {
        kind,
        value: raw.to_string(),
        min: 1,
        max,
    };
    let n: u32 = raw.trim().parse().map_err(|_| invalid())?;
    if n < 1 || n > max {
        return Err(invalid());
    }
    Ok(n)
}

pub fn parse_chapter(raw: &str) -> Result<u16, ViewError> {
    parse_in_range("chapter", raw, CHAPTER_COUNT as u32).map(|n| n as u16)
}

pub fn parse_section(raw: &str) -> Result<u8, ViewError> {
    parse_in_range("section", raw, SECTION_COUNT as u32).map(|n| n as u8)
}

pub fn parse_page(raw: &str) -> Result<u16, ViewError> {
    parse_in_range("page", raw, PAGE_COUNT as u32).map(|n| n as u16)
}

/// Verse numbers are only bounded below here; the upper bound depends on
/// the chapter and is checked once its length is known.
pub fn parse_verse(raw: &str) -> Result<u16, ViewError> {
    parse_in_range("verse", raw, u16::MAX as u32).map(|n| n as u16)
}

/// Parse a unit route such as the `:id` of `/juz/:id`.
pub fn parse_unit(kind: UnitKind, raw: &str) -> Result<ReadingUnit, ViewError> {
    match kind {
        UnitKind::Chapter => parse_chapter(raw).map(ReadingUnit::Chapter),
        UnitKind::Section => parse_section(raw).map(ReadingUnit::Section),
        UnitKind::Page => parse_page(raw).map(ReadingUnit::Page),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnitKind {
    Chapter,
    Section,
    Page,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chapter_bounds() {
        assert_eq!(parse_chapter("1"), Ok(1));
        assert_eq!(parse_chapter("114"), Ok(114));
        assert!(parse_chapter("0").is_err());
        assert!(parse_chapter("115").is_err());
        assert!(parse_chapter("abc").is_err());
        assert!(parse_chapter("-3").is_err());
    }

    #[test]
    fn section_and_page_bounds() {
        assert_eq!(parse_section("30"), Ok(30));
        assert!(parse_section("31").is_err());
        assert_eq!(parse_page("604"), Ok(604));
        assert!(matches!(
            parse_page("605"),
            Err(ViewError::InvalidParameter { kind: "page", max: 604, .. })
        ));
    }

    #[test]
    fn verse_must_be_positive() {
        assert_eq!(parse_verse("255"), Ok(255));
        assert!(parse_verse("0").is_err());
        assert!(parse_verse("").is_err());
    }

    #[test]
    fn unit_paths() {
        assert_eq!(
            parse_unit(UnitKind::Section, "3").unwrap().path(),
            "juz/3"
        );
        assert_eq!(ReadingUnit::Page(12).label(), "Page 12");
    }
}
