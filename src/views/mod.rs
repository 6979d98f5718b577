//! View controllers.
//!
//! | Module | Routes |
//! |--------|--------|
//! | [`reading`] | `/surah/:id`, `/juz/:id`, `/page/:id` |
//! | [`verse`] | `/ayah/:surah/:ayah` |
//! | [`index`] | chapter, section and page indexes |
//! | [`bookmarks`] | `/bookmarks` |

pub mod bookmarks;
pub mod index;
pub mod reading;
pub mod verse;

pub use reading::ReadingController;
pub use verse::VerseController;
