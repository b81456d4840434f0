//! Integration tests for the player ledger: roster edits, eliminations, persistence.

use ghost_word_web::{
    FileStore, GameError, KeyValueStore, MemoryStore, PlayerLedger, PlayerStatus, StoreError,
    ROSTER_KEY,
};

/// Store whose every read and write fails.
struct BrokenStore;

impl KeyValueStore for BrokenStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StoreError> {
        Err(StoreError::Poisoned)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StoreError> {
        Err(StoreError::Poisoned)
    }

    fn remove(&mut self, _key: &str) -> Result<(), StoreError> {
        Err(StoreError::Poisoned)
    }
}

fn ledger_with(names: &[&str]) -> PlayerLedger {
    let mut ledger = PlayerLedger::in_memory();
    for n in names {
        ledger.add_player(n).unwrap();
    }
    ledger
}

fn assert_experience_derived(ledger: &PlayerLedger) {
    for p in ledger.players() {
        assert_eq!(p.experience(), p.wins() * 10, "{}", p.name);
    }
}

#[test]
fn add_player_starts_active_with_zero_stats() {
    let mut ledger = PlayerLedger::in_memory();
    let id = ledger.add_player("  Alice ").unwrap();
    let p = ledger.get(id).unwrap();
    assert_eq!(p.name, "Alice");
    assert_eq!((p.wins(), p.losses(), p.experience()), (0, 0, 0));
    assert_eq!(p.status(), PlayerStatus::Active);
    assert_eq!(ledger.add_player("   "), Err(GameError::EmptyName));
}

#[test]
fn duplicate_names_are_allowed() {
    let ledger = ledger_with(&["Sam", "Sam"]);
    assert_eq!(ledger.len(), 2);
    assert_ne!(ledger.players()[0].id, ledger.players()[1].id);
}

#[test]
fn remove_then_add_never_reuses_ids() {
    let mut ledger = ledger_with(&["Alice", "Bob"]);
    let before = ledger.len();
    let id = ledger.add_player("A").unwrap();
    assert_eq!(ledger.remove_player(id), Ok(2));
    assert_eq!(ledger.len(), before);
    assert!(ledger.get(id).is_none());

    let again = ledger.add_player("A").unwrap();
    assert_ne!(again, id);
    assert_eq!(ledger.remove_player(id), Err(GameError::PlayerNotFound(id)));
}

#[test]
fn rename_ignores_empty_and_unchanged_names() {
    let mut ledger = ledger_with(&["Alice"]);
    let id = ledger.players()[0].id;
    assert_eq!(ledger.rename_player(id, ""), Ok(false));
    assert_eq!(ledger.rename_player(id, "Alice"), Ok(false));
    assert_eq!(ledger.rename_player(id, "Alicia"), Ok(true));
    assert_eq!(ledger.get(id).unwrap().name, "Alicia");
}

#[test]
fn eliminate_awards_every_active_survivor() {
    let mut ledger = ledger_with(&["Alice", "Bob", "Cleo", "Dan"]);
    let ids: Vec<_> = ledger.players().iter().map(|p| p.id).collect();
    ledger.withdraw(ids[3]).unwrap();
    let wins_before: Vec<u32> = ledger.players().iter().map(|p| p.wins()).collect();

    ledger.eliminate(ids[1]).unwrap();

    let bob = ledger.get(ids[1]).unwrap();
    assert_eq!(bob.status(), PlayerStatus::Eliminated);
    assert_eq!(bob.losses(), 1);
    assert_eq!(bob.wins(), wins_before[1]);
    assert_eq!(ledger.get(ids[0]).unwrap().wins(), wins_before[0] + 1);
    assert_eq!(ledger.get(ids[2]).unwrap().wins(), wins_before[2] + 1);
    // Withdrawn players are not survivors.
    assert_eq!(ledger.get(ids[3]).unwrap().wins(), wins_before[3]);
    assert_experience_derived(&ledger);
}

#[test]
fn withdraw_has_the_same_bookkeeping() {
    let mut ledger = ledger_with(&["Alice", "Bob", "Cleo"]);
    let ids: Vec<_> = ledger.players().iter().map(|p| p.id).collect();
    ledger.withdraw(ids[0]).unwrap();

    let alice = ledger.get(ids[0]).unwrap();
    assert_eq!(alice.status(), PlayerStatus::Withdrawn);
    assert_eq!(alice.losses(), 1);
    assert_eq!(ledger.get(ids[1]).unwrap().wins(), 1);
    assert_eq!(ledger.get(ids[2]).unwrap().experience(), 10);
    assert_eq!(ledger.active_count(), 2);
}

#[test]
fn retired_players_cannot_be_retired_again() {
    let mut ledger = ledger_with(&["Alice", "Bob"]);
    let bob = ledger.players()[1].id;
    ledger.eliminate(bob).unwrap();
    assert_eq!(ledger.eliminate(bob), Err(GameError::PlayerNotActive(bob)));
    assert_eq!(ledger.withdraw(bob), Err(GameError::PlayerNotActive(bob)));
    assert_eq!(ledger.get(bob).unwrap().losses(), 1);
}

#[test]
fn reinstate_keeps_stats() {
    let mut ledger = ledger_with(&["Alice", "Bob"]);
    let bob = ledger.players()[1].id;
    ledger.eliminate(bob).unwrap();
    ledger.reinstate_all();
    assert_eq!(ledger.active_count(), 2);
    assert_eq!(ledger.get(bob).unwrap().losses(), 1);
    assert_eq!(ledger.players()[0].wins(), 1);
}

#[test]
fn standings_rank_by_wins_then_losses() {
    let mut ledger = ledger_with(&["Alice", "Bob", "Cleo"]);
    let ids: Vec<_> = ledger.players().iter().map(|p| p.id).collect();
    ledger.eliminate(ids[0]).unwrap();
    ledger.eliminate(ids[1]).unwrap();

    let table = ledger.standings();
    assert_eq!(table[0].name, "Cleo");
    assert_eq!(table[0].rank, 1);
    assert_eq!(table[0].wins, 2);
    assert_eq!(table[1].name, "Bob");
    assert_eq!(table[2].name, "Alice");
}

#[test]
fn every_mutation_is_persisted_and_reloaded() {
    let store = MemoryStore::new();
    let mut ledger = PlayerLedger::load(Box::new(store.clone()));
    let a = ledger.add_player("Alice").unwrap();
    let b = ledger.add_player("Bob").unwrap();
    ledger.eliminate(b).unwrap();
    ledger.rename_player(a, "Ali").unwrap();

    let reloaded = PlayerLedger::load(Box::new(store.clone()));
    assert_eq!(reloaded.players(), ledger.players());
    assert_eq!(reloaded.get(a).unwrap().experience(), 10);

    ledger.reset_ledger();
    assert!(ledger.is_empty());
    assert_eq!(store.get(ROSTER_KEY).unwrap(), None);
    assert!(PlayerLedger::load(Box::new(store)).is_empty());
}

#[test]
fn corrupt_roster_loads_empty() {
    let mut store = MemoryStore::new();
    store.set(ROSTER_KEY, "{not json").unwrap();
    let mut ledger = PlayerLedger::load(Box::new(store.clone()));
    assert!(ledger.is_empty());

    ledger.add_player("Alice").unwrap();
    assert_eq!(PlayerLedger::load(Box::new(store)).len(), 1);
}

#[test]
fn load_rederives_experience_and_drops_duplicate_ids() {
    let mut store = MemoryStore::new();
    let raw = r#"[
        {"id":"6f1c3f0e-8a4b-4d8e-9a57-0d5b9c1e2f3a","name":"Ann","wins":3,"losses":0,"xp":7,"status":"continuer"},
        {"id":"6f1c3f0e-8a4b-4d8e-9a57-0d5b9c1e2f3a","name":"Copy","wins":0,"losses":0,"xp":0,"status":"quit"}
    ]"#;
    store.set(ROSTER_KEY, raw).unwrap();
    let ledger = PlayerLedger::load(Box::new(store));
    assert_eq!(ledger.len(), 1);
    assert_eq!(ledger.players()[0].experience(), 30);
    assert_eq!(ledger.players()[0].status(), PlayerStatus::Active);
}

#[test]
fn short_string_ids_from_older_rosters_load() {
    let mut store = MemoryStore::new();
    let raw = r#"[
        {"id":"k3j2h4g5f","name":"Ann","wins":3,"losses":1,"xp":30,"status":"continuer"},
        {"id":"p9x8c7v6b","name":"Ben","wins":0,"losses":2,"xp":0,"status":"executed"},
        {"id":"k3j2h4g5f","name":"Copy","wins":0,"losses":0,"xp":0,"status":"quit"}
    ]"#;
    store.set(ROSTER_KEY, raw).unwrap();
    let mut ledger = PlayerLedger::load(Box::new(store.clone()));
    assert_eq!(ledger.len(), 2);
    assert_eq!(ledger.players()[0].name, "Ann");
    assert_eq!(ledger.players()[0].experience(), 30);
    assert_eq!(ledger.players()[1].status(), PlayerStatus::Eliminated);

    let ann = ledger.players()[0].id;
    ledger.rename_player(ann, "Anna").unwrap();
    let reloaded = PlayerLedger::load(Box::new(store));
    assert_eq!(reloaded.get(ann).unwrap().name, "Anna");
}

#[test]
fn storage_failures_never_block_the_roster() {
    let mut ledger = PlayerLedger::load(Box::new(BrokenStore));
    assert!(ledger.is_empty());

    let a = ledger.add_player("Alice").unwrap();
    let b = ledger.add_player("Bob").unwrap();
    ledger.eliminate(b).unwrap();
    assert_eq!(ledger.get(b).unwrap().status(), PlayerStatus::Eliminated);
    assert_eq!(ledger.get(a).unwrap().wins(), 1);
    assert!(ledger.rename_player(a, "Ali").unwrap());

    ledger.reset_ledger();
    assert!(ledger.is_empty());
}

#[test]
fn file_store_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let id = {
        let mut ledger = PlayerLedger::load(Box::new(FileStore::new(dir.path())));
        ledger.add_player("Alice").unwrap()
    };
    let ledger = PlayerLedger::load(Box::new(FileStore::new(dir.path())));
    assert_eq!(ledger.get(id).unwrap().name, "Alice");
}
