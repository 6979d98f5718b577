//! SQLite-backed [`BookmarkStore`].
//!
//! The bookmark list lives in a single named row of the `slots` table as a
//! JSON array, mirroring a browser's local storage slot. Every mutation
//! rewrites the whole value.

use anyhow::Result;
use async_trait::async_trait;
use sqlx::SqlitePool;

use kalam_core::models::Bookmark;
use kalam_core::store::{decode_slot, encode_slot, BookmarkStore, BOOKMARK_SLOT};

use crate::config::Config;
use crate::{db, migrate};

pub struct SqliteBookmarkStore {
    pool: SqlitePool,
}

impl SqliteBookmarkStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Connect to the configured database, creating the slot table if
    /// `kalam init` has not been run yet.
    pub async fn open(config: &Config) -> Result<Self> {
        let pool = db::connect(config).await?;
        migrate::ensure_schema(&pool).await?;
        Ok(Self::new(pool))
    }

    pub async fn close(self) {
        self.pool.close().await;
    }

    async fn read_slot(&self, name: &str) -> Result<Option<String>> {
        let value: Option<String> = sqlx::query_scalar("SELECT value FROM slots WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(value)
    }

    async fn write_slot(&self, name: &str, value: &str) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO slots (name, value, updated_at)
            VALUES (?, ?, ?)
            ON CONFLICT(name) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(name)
        .bind(value)
        .bind(chrono::Utc::now().timestamp())
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl BookmarkStore for SqliteBookmarkStore {
    async fn load(&self) -> Result<Vec<Bookmark>> {
        let raw = self.read_slot(BOOKMARK_SLOT).await?;
        Ok(decode_slot(raw.as_deref()))
    }

    async fn save(&self, bookmarks: &[Bookmark]) -> Result<()> {
        let encoded = encode_slot(bookmarks)?;
        self.write_slot(BOOKMARK_SLOT, &encoded).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use kalam_core::models::{BookmarkKey, VerseRef};
    use tempfile::TempDir;

    fn config_in(dir: &TempDir) -> Config {
        let mut cfg = Config::minimal();
        cfg.storage.path = dir.path().join("data").join("kalam.sqlite");
        cfg
    }

    fn bookmark(verse: u16, hour: u32) -> Bookmark {
        Bookmark {
            key: BookmarkKey::ChapterVerse { chapter: 2, verse },
            verse: VerseRef { chapter: 2, verse },
            chapter_name: "Al-Baqara".to_string(),
            chapter_arabic_name: "سُورَةُ البَقَرَةِ".to_string(),
            date: Utc.with_ymd_and_hms(2024, 6, 1, hour, 0, 0).unwrap(),
        }
    }

    #[tokio::test]
    async fn persists_across_connections() {
        let dir = TempDir::new().unwrap();
        let cfg = config_in(&dir);

        let store = SqliteBookmarkStore::open(&cfg).await.unwrap();
        store.add(bookmark(255, 8)).await.unwrap();
        store.add(bookmark(256, 9)).await.unwrap();
        store.close().await;

        let store = SqliteBookmarkStore::open(&cfg).await.unwrap();
        let list = store.list().await.unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].verse.verse, 256);
        store.close().await;
    }

    #[tokio::test]
    async fn malformed_slot_reads_empty() {
        let dir = TempDir::new().unwrap();
        let cfg = config_in(&dir);
        let store = SqliteBookmarkStore::open(&cfg).await.unwrap();
        store.write_slot(BOOKMARK_SLOT, "{oops").await.unwrap();
        assert!(store.list().await.unwrap().is_empty());
        store.clear().await.unwrap();
        assert_eq!(
            store.read_slot(BOOKMARK_SLOT).await.unwrap().as_deref(),
            Some("[]")
        );
        store.close().await;
    }
}
