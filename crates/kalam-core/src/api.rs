//! Response shapes of the remote content provider.
//!
//! Every endpoint wraps its payload in `{ "code", "status", "data" }`.
//! Bodies arrive as untyped JSON from the transport and are decoded here;
//! a body that does not fit the expected shape is a
//! [`ViewError::MalformedResponse`].

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ViewError;
use crate::models::RevelationType;

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// Decode the `data` member of a provider response.
pub fn decode<T: DeserializeOwned>(target: &str, body: serde_json::Value) -> Result<T, ViewError> {
    serde_json::from_value::<Envelope<T>>(body)
        .map(|e| e.data)
        .map_err(|e| ViewError::malformed(target, e.to_string()))
}

/// Chapter metadata, optionally with its verses.
///
/// `GET /surah` returns a list of these without verses;
/// `GET /surah/{n}/{edition}` returns one with `ayahs`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSurah {
    pub number: u16,
    pub name: String,
    pub english_name: String,
    #[serde(default)]
    pub english_name_translation: String,
    pub revelation_type: RevelationType,
    pub number_of_ayahs: u16,
    #[serde(default)]
    pub ayahs: Option<Vec<RawAyah>>,
}

/// Chapter identity attached to each verse of a section or page.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSurahRef {
    pub number: u16,
    pub name: String,
    pub english_name: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawAyah {
    /// Global verse number (1..=6236).
    pub number: u16,
    pub text: String,
    pub number_in_surah: u16,
    #[serde(default)]
    pub surah: Option<RawSurahRef>,
}

/// Payload of `GET /juz/{n}/{edition}` and `GET /page/{n}/{edition}`.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAyahCollection {
    /// Echo of the requested section or page. Views take the number from
    /// the route, so a body without it still decodes.
    #[serde(default)]
    pub number: u16,
    pub ayahs: Vec<RawAyah>,
}
