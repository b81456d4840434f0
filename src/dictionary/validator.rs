//! WordValidator: dictionary lookup with offline fallback, plus the bounded check.

use crate::dictionary::client::{DictionaryEntry, DictionarySource, LookupError};
use crate::dictionary::fallback::is_common_word;
use crate::models::{Verdict, WordCheck};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Fragments shorter than this are never looked up.
pub const MIN_WORD_LEN: usize = 2;

/// Definitions kept for display.
pub const MAX_SAMPLE_DEFINITIONS: usize = 5;

/// A check that never produced a result.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum CheckFailure {
    #[error("Error checking word: no answer within {0:?}")]
    TimedOut(Duration),
}

/// Validates fragments. Cheap to clone; shares the underlying source.
#[derive(Clone)]
pub struct WordValidator {
    source: Arc<dyn DictionarySource>,
}

impl WordValidator {
    pub fn new(source: Arc<dyn DictionarySource>) -> Self {
        Self { source }
    }

    /// Check a fragment. Always resolves to a result; service failures fall back
    /// to the common word list.
    pub async fn validate(&self, fragment: &str) -> WordCheck {
        if fragment.chars().count() < MIN_WORD_LEN {
            return WordCheck::too_short();
        }
        let word = fragment.to_lowercase();
        match self.source.lookup(&word).await {
            Ok(entries) => from_entries(&entries),
            Err(LookupError::NotFound) => WordCheck::not_found(),
            Err(e) => {
                log::warn!("Dictionary unavailable for '{}': {}; using offline list", word, e);
                offline(&word)
            }
        }
    }
}

/// Check with an upper bound on how long the lookup may take.
pub async fn check_fragment(
    validator: &WordValidator,
    fragment: &str,
    limit: Duration,
) -> Result<WordCheck, CheckFailure> {
    tokio::time::timeout(limit, validator.validate(fragment))
        .await
        .map_err(|_| CheckFailure::TimedOut(limit))
}

fn from_entries(entries: &[DictionaryEntry]) -> WordCheck {
    if entries.is_empty() {
        return WordCheck::not_found();
    }
    let definitions: Vec<String> = entries
        .iter()
        .flat_map(|e| e.meanings.iter())
        .flat_map(|m| {
            m.definitions
                .iter()
                .map(move |d| format!("{}: {}", m.part_of_speech, d.definition))
        })
        .collect();
    let count = u32::try_from(definitions.len()).unwrap_or(u32::MAX);
    WordCheck {
        is_valid: true,
        match_count: count,
        message: format!("Found {} definition(s)", count),
        sample_definitions: definitions.into_iter().take(MAX_SAMPLE_DEFINITIONS).collect(),
        verdict: Verdict::Confirmed,
    }
}

fn offline(word: &str) -> WordCheck {
    let found = is_common_word(word);
    WordCheck {
        is_valid: found,
        match_count: u32::from(found),
        sample_definitions: Vec::new(),
        message: if found {
            "Word validated (offline mode)".to_string()
        } else {
            "Unable to validate word".to_string()
        },
        verdict: Verdict::Offline,
    }
}
