//! Word validation: dictionary service client, offline fallback, validator.

mod client;
mod fallback;
mod validator;

pub use client::{
    Definition, DictionaryClient, DictionaryEntry, DictionarySource, LookupError, Meaning,
    DEFAULT_DICTIONARY_URL,
};
pub use fallback::is_common_word;
pub use validator::{check_fragment, CheckFailure, WordValidator, MAX_SAMPLE_DEFINITIONS, MIN_WORD_LEN};
