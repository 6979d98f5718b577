//! Chapter, section and page indexes.
//!
//! The chapter index is one request. The section and page indexes request
//! every unit in original script and summarise each one, through
//! [`load_batched`].

use kalam_core::display;
use kalam_core::edition::ARABIC_EDITION;
use kalam_core::error::ViewError;
use kalam_core::models::{ChapterSummary, PageSummary, SectionSummary};
use kalam_core::route::{ReadingUnit, PAGE_COUNT, SECTION_COUNT};

use crate::batch::{load_batched, BatchPlan};
use crate::progress::IndexProgressReporter;
use crate::provider::ContentProvider;

/// All chapters, optionally filtered by name.
pub async fn chapter_index(
    provider: &ContentProvider,
    search: Option<&str>,
) -> Result<Vec<ChapterSummary>, ViewError> {
    let raw = provider.chapter_list().await?;
    Ok(display::chapter_index(raw, search))
}

pub async fn section_index(
    provider: &ContentProvider,
    plan: BatchPlan,
    reporter: &dyn IndexProgressReporter,
) -> Result<Vec<SectionSummary>, ViewError> {
    let numbers: Vec<u16> = (1..=SECTION_COUNT as u16).collect();
    load_batched("sections", &numbers, plan, reporter, |n| async move {
        let section = n as u8;
        let raw = provider
            .collection(ReadingUnit::Section(section), ARABIC_EDITION)
            .await?;
        Ok(display::section_summary(section, &raw))
    })
    .await
}

/// The first `limit` pages (all 604 when `None`).
pub async fn page_index(
    provider: &ContentProvider,
    plan: BatchPlan,
    reporter: &dyn IndexProgressReporter,
    limit: Option<u16>,
) -> Result<Vec<PageSummary>, ViewError> {
    let last = limit.map_or(PAGE_COUNT, |l| l.min(PAGE_COUNT));
    let numbers: Vec<u16> = (1..=last).collect();
    load_batched("pages", &numbers, plan, reporter, |n| async move {
        let raw = provider
            .collection(ReadingUnit::Page(n), ARABIC_EDITION)
            .await?;
        Ok(display::page_summary(n, &raw))
    })
    .await
}
