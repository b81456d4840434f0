//! Ghost word web app: library with models, game logic, dictionary client and storage.

pub mod config;
pub mod dictionary;
pub mod logic;
pub mod models;
pub mod storage;

pub use dictionary::{
    check_fragment, CheckFailure, DictionaryClient, DictionaryEntry, DictionarySource,
    LookupError, WordValidator,
};
pub use logic::{
    spawn_check, CheckTrigger, PendingCheck, PlayerLedger, Resolution, RoundEngine, Submission,
    ROSTER_KEY,
};
pub use models::{
    GameError, GameSnapshot, Phase, Player, PlayerId, PlayerStatus, RoundState, Standing,
    Verdict, WordCheck,
};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StoreError};
