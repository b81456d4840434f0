//! Dictionary service: response shapes, the lookup trait and the HTTP client.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Free Dictionary API, English entries.
pub const DEFAULT_DICTIONARY_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en";

/// One returned entry (unknown fields such as phonetics are ignored).
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub word: String,
    #[serde(default)]
    pub meanings: Vec<Meaning>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Meaning {
    #[serde(rename = "partOfSpeech", default)]
    pub part_of_speech: String,
    #[serde(default)]
    pub definitions: Vec<Definition>,
}

#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct Definition {
    pub definition: String,
}

/// Why a lookup produced no entries. Only `NotFound` is a real answer.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum LookupError {
    #[error("word not found")]
    NotFound,
    #[error("dictionary request failed: {0}")]
    Transport(String),
    #[error("dictionary returned status {0}")]
    Status(u16),
    #[error("dictionary response malformed: {0}")]
    Malformed(String),
}

impl LookupError {
    /// True when the service could not answer and a fallback should be used.
    pub fn is_unavailable(&self) -> bool {
        !matches!(self, LookupError::NotFound)
    }
}

/// Source of dictionary entries. Implementations hold no per-call mutable state,
/// so overlapping lookups are independent.
#[async_trait]
pub trait DictionarySource: Send + Sync {
    /// Look up a lowercase word.
    async fn lookup(&self, word: &str) -> Result<Vec<DictionaryEntry>, LookupError>;
}

/// HTTP client for a dictionaryapi.dev compatible service.
#[derive(Clone, Debug)]
pub struct DictionaryClient {
    http: Client,
    base: Url,
}

impl DictionaryClient {
    /// Build a client for `base_url` (entries are fetched from `{base_url}/{word}`).
    pub fn new(base_url: &str, request_timeout: Duration) -> Result<Self, LookupError> {
        let base = Url::parse(base_url).map_err(|e| LookupError::Transport(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(LookupError::Transport(format!("not a base url: {base_url}")));
        }
        let http = Client::builder()
            .timeout(request_timeout)
            .build()
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        Ok(Self { http, base })
    }

    fn word_url(&self, word: &str) -> Url {
        let mut url = self.base.clone();
        // Checked in `new`, so the segments are always available.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(word);
        }
        url
    }
}

#[async_trait]
impl DictionarySource for DictionaryClient {
    async fn lookup(&self, word: &str) -> Result<Vec<DictionaryEntry>, LookupError> {
        let url = self.word_url(word);
        log::debug!("Dictionary lookup: {}", url);
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(LookupError::NotFound),
            s if !s.is_success() => Err(LookupError::Status(s.as_u16())),
            _ => response
                .json::<Vec<DictionaryEntry>>()
                .await
                .map_err(|e| LookupError::Malformed(e.to_string())),
        }
    }
}
