//! Outcome of checking a fragment against the dictionary.

use serde::{Deserialize, Serialize};

/// How much the result can be trusted.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Answered by the dictionary service (or the length rule).
    Confirmed,
    /// Service unavailable; answered from the built-in common word list.
    Offline,
    /// No answer at all (timeout); assumed invalid.
    Unverified,
}

/// Result of one word check. Always well-formed, even when the service failed.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct WordCheck {
    pub is_valid: bool,
    /// Total number of definitions found.
    pub match_count: u32,
    /// Up to five definitions for display.
    pub sample_definitions: Vec<String>,
    pub message: String,
    pub verdict: Verdict,
}

impl WordCheck {
    /// A word only counts when it is valid and has at least one definition.
    pub fn is_accepted(&self) -> bool {
        self.is_valid && self.match_count > 0
    }

    pub fn too_short() -> Self {
        Self::rejected("Word must be at least 2 characters long", Verdict::Confirmed)
    }

    pub fn not_found() -> Self {
        Self::rejected("Word not found in dictionary", Verdict::Confirmed)
    }

    /// Used when no answer arrived; the fragment is treated as invalid.
    pub fn unverified(reason: impl Into<String>) -> Self {
        Self::rejected(reason, Verdict::Unverified)
    }

    fn rejected(message: impl Into<String>, verdict: Verdict) -> Self {
        Self {
            is_valid: false,
            match_count: 0,
            sample_definitions: Vec::new(),
            message: message.into(),
            verdict,
        }
    }
}
