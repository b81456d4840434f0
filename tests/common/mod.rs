//! Shared helpers: a scripted dictionary source and engine builders.

#![allow(dead_code)]

use async_trait::async_trait;
use ghost_word_web::{
    DictionaryEntry, DictionarySource, LookupError, PlayerId, PlayerLedger, RoundEngine,
    WordValidator,
};
use ghost_word_web::dictionary::{Definition, Meaning};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// What the stub answers for a word.
#[derive(Clone, Debug)]
pub enum Reply {
    Definitions(usize),
    Entries(Vec<DictionaryEntry>),
    Fail(LookupError),
    Hang,
}

/// Scripted dictionary. Unknown words answer `NotFound`.
#[derive(Default)]
pub struct StubDictionary {
    replies: Mutex<HashMap<String, Reply>>,
    calls: AtomicUsize,
    seen: Mutex<Vec<String>>,
}

impl StubDictionary {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn reply(&self, word: &str, reply: Reply) {
        self.replies.lock().unwrap().insert(word.to_string(), reply);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

pub fn entry_with(word: &str, definitions: usize) -> DictionaryEntry {
    DictionaryEntry {
        word: word.to_string(),
        meanings: vec![Meaning {
            part_of_speech: "noun".to_string(),
            definitions: (0..definitions)
                .map(|i| Definition {
                    definition: format!("sense {i}"),
                })
                .collect(),
        }],
    }
}

#[async_trait]
impl DictionarySource for StubDictionary {
    async fn lookup(&self, word: &str) -> Result<Vec<DictionaryEntry>, LookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen.lock().unwrap().push(word.to_string());
        let reply = self.replies.lock().unwrap().get(word).cloned();
        match reply {
            Some(Reply::Definitions(n)) => Ok(vec![entry_with(word, n)]),
            Some(Reply::Entries(entries)) => Ok(entries),
            Some(Reply::Fail(e)) => Err(e),
            Some(Reply::Hang) => std::future::pending().await,
            None => Err(LookupError::NotFound),
        }
    }
}

pub fn validator(stub: &Arc<StubDictionary>) -> WordValidator {
    let source: Arc<dyn DictionarySource> = stub.clone();
    WordValidator::new(source)
}

/// Engine with an in-memory ledger holding `names` in order.
pub fn engine_with(names: &[&str], stub: &Arc<StubDictionary>) -> (RoundEngine, Vec<PlayerId>) {
    let mut ledger = PlayerLedger::in_memory();
    let ids = names.iter().map(|n| ledger.add_player(n).unwrap()).collect();
    let engine = RoundEngine::new(ledger, validator(stub))
        .with_validation_timeout(Duration::from_millis(200));
    (engine, ids)
}
