//! Client for the remote content provider.
//!
//! Builds every endpoint URL, runs requests through
//! [`fetch_with_retry`](crate::fetch::fetch_with_retry) and decodes the
//! response envelope into the raw shapes of [`kalam_core::api`].

use std::sync::Arc;

use anyhow::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

use kalam_core::api::{decode, RawAyahCollection, RawSurah};
use kalam_core::error::ViewError;
use kalam_core::route::ReadingUnit;

use crate::config::Config;
use crate::fetch::{fetch_with_retry, HttpTransport, RetryPolicy, Transport};

/// One recitation clip, addressed by global verse number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AudioClip {
    pub global_verse: u16,
    pub url: String,
}

pub struct ContentProvider {
    transport: Arc<dyn Transport>,
    base_url: String,
    audio_base_url: String,
    policy: RetryPolicy,
}

impl ContentProvider {
    pub fn new(
        transport: Arc<dyn Transport>,
        base_url: &str,
        audio_base_url: &str,
        policy: RetryPolicy,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.trim_end_matches('/').to_string(),
            audio_base_url: audio_base_url.trim_end_matches('/').to_string(),
            policy,
        }
    }

    /// Provider over HTTP, configured from `[api]` and `[fetch]`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let transport = Arc::new(HttpTransport::new(&config.api)?);
        Ok(Self::new(
            transport,
            &config.api.base_url,
            &config.api.audio_base_url,
            RetryPolicy::from(&config.fetch),
        ))
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// GET `path` and decode its `data` member.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ViewError> {
        let url = self.url(path);
        let body = fetch_with_retry(self.transport.as_ref(), &url, self.policy).await?;
        decode(path, body)
    }

    /// `GET /surah`: metadata of all chapters.
    pub async fn chapter_list(&self) -> Result<Vec<RawSurah>, ViewError> {
        self.get("surah").await
    }

    /// `GET /surah/{n}/{edition}`.
    pub async fn chapter(&self, number: u16, edition: &str) -> Result<RawSurah, ViewError> {
        self.get(&format!("surah/{}/{}", number, edition)).await
    }

    /// `GET /juz/{n}/{edition}` or `GET /page/{n}/{edition}`.
    pub async fn collection(
        &self,
        unit: ReadingUnit,
        edition: &str,
    ) -> Result<RawAyahCollection, ViewError> {
        self.get(&format!("{}/{}", unit.path(), edition)).await
    }

    /// `GET /surah/{n}/editions/{e1},{e2},…`: one chapter in several editions.
    pub async fn chapter_editions(
        &self,
        number: u16,
        editions: &[&str],
    ) -> Result<Vec<RawSurah>, ViewError> {
        self.get(&format!("surah/{}/editions/{}", number, editions.join(",")))
            .await
    }

    pub fn audio_clip(&self, global_verse: u16) -> AudioClip {
        AudioClip {
            global_verse,
            url: format!("{}/{}.mp3", self.audio_base_url, global_verse),
        }
    }
}
