//! Player ledger: the durable roster and its status/score rules.

use crate::models::{GameError, Player, PlayerId, PlayerStatus, Standing};
use crate::storage::{KeyValueStore, MemoryStore};
use std::collections::HashSet;

/// Key the roster is stored under.
pub const ROSTER_KEY: &str = "ghost-word-players";

/// Owns every Player record. Each mutation writes the full roster back to the store.
pub struct PlayerLedger {
    players: Vec<Player>,
    store: Box<dyn KeyValueStore>,
}

impl PlayerLedger {
    /// Load the roster from `store`. Missing or unreadable data gives an empty roster.
    pub fn load(store: Box<dyn KeyValueStore>) -> Self {
        let players = match store.get(ROSTER_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<Player>>(&raw) {
                Ok(players) => sanitize(players),
                Err(e) => {
                    log::warn!("Stored roster is corrupt, starting empty: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Could not read stored roster, starting empty: {}", e);
                Vec::new()
            }
        };
        log::info!("Loaded {} player(s)", players.len());
        Self { players, store }
    }

    /// Ledger backed by a fresh in-memory store.
    pub fn in_memory() -> Self {
        Self::load(Box::new(MemoryStore::new()))
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn get(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn position(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    pub fn active_count(&self) -> usize {
        self.players.iter().filter(|p| p.is_active()).count()
    }

    /// Whether the player at `index` exists and is active.
    pub fn is_active_at(&self, index: usize) -> bool {
        self.players.get(index).is_some_and(Player::is_active)
    }

    /// First active player in roster order.
    pub fn first_active(&self) -> Option<usize> {
        self.players.iter().position(Player::is_active)
    }

    /// Next active player strictly after `index`, wrapping around.
    pub fn next_active_after(&self, index: usize) -> Option<usize> {
        let n = self.players.len();
        (1..=n)
            .map(|step| (index + step) % n)
            .find(|&i| self.players[i].is_active())
    }

    /// Append a new active player. Names are trimmed; duplicates are allowed.
    pub fn add_player(&mut self, name: &str) -> Result<PlayerId, GameError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GameError::EmptyName);
        }
        let player = Player::new(name);
        let id = player.id;
        log::info!("Added player {} ({})", name, id);
        self.players.push(player);
        self.persist();
        Ok(id)
    }

    /// Remove a player. Returns the index they occupied so the caller can re-clamp.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<usize, GameError> {
        let idx = self.position(id).ok_or(GameError::PlayerNotFound(id))?;
        let removed = self.players.remove(idx);
        log::info!("Removed player {} ({})", removed.name, id);
        self.persist();
        Ok(idx)
    }

    /// Rename a player. Returns false (and writes nothing) for an empty or unchanged name.
    pub fn rename_player(&mut self, id: PlayerId, new_name: &str) -> Result<bool, GameError> {
        let new_name = new_name.trim();
        let p = self
            .players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(GameError::PlayerNotFound(id))?;
        if new_name.is_empty() || p.name == new_name {
            return Ok(false);
        }
        p.name = new_name.to_string();
        self.persist();
        Ok(true)
    }

    /// Eliminate an active player: +1 loss for them, +1 win for every other active player.
    pub fn eliminate(&mut self, id: PlayerId) -> Result<(), GameError> {
        self.retire(id, PlayerStatus::Eliminated)
    }

    /// Voluntary exit. Same bookkeeping as `eliminate`.
    pub fn withdraw(&mut self, id: PlayerId) -> Result<(), GameError> {
        self.retire(id, PlayerStatus::Withdrawn)
    }

    fn retire(&mut self, id: PlayerId, status: PlayerStatus) -> Result<(), GameError> {
        let p = self
            .players
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(GameError::PlayerNotFound(id))?;
        if !p.is_active() {
            return Err(GameError::PlayerNotActive(id));
        }
        p.set_status(status);
        p.add_loss();
        log::info!("Player {} is now {:?}", p.name, status);

        for survivor in self.players.iter_mut().filter(|p| p.is_active()) {
            survivor.add_win();
        }
        self.persist();
        Ok(())
    }

    /// Put every player back to active for a new game. Stats are kept.
    pub fn reinstate_all(&mut self) {
        for p in &mut self.players {
            p.set_status(PlayerStatus::Active);
        }
        self.persist();
    }

    /// Wipe the roster and its stored record.
    pub fn reset_ledger(&mut self) {
        self.players.clear();
        if let Err(e) = self.store.remove(ROSTER_KEY) {
            log::warn!("Could not clear stored roster: {}", e);
        }
        log::info!("Ledger reset");
    }

    /// Results table: most wins first, then fewest losses, then name.
    pub fn standings(&self) -> Vec<Standing> {
        let mut sorted: Vec<&Player> = self.players.iter().collect();
        sorted.sort_by(|a, b| {
            b.wins()
                .cmp(&a.wins())
                .then(a.losses().cmp(&b.losses()))
                .then_with(|| a.name.cmp(&b.name))
        });
        sorted
            .into_iter()
            .enumerate()
            .map(|(i, p)| Standing::from_player(i + 1, p))
            .collect()
    }

    fn persist(&mut self) {
        let raw = match serde_json::to_string(&self.players) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("Could not serialize roster: {}", e);
                return;
            }
        };
        if let Err(e) = self.store.set(ROSTER_KEY, &raw) {
            log::warn!("Failed to save players: {}", e);
        }
    }
}

/// Re-derive experience and drop records whose id was already seen.
fn sanitize(players: Vec<Player>) -> Vec<Player> {
    let mut seen = HashSet::new();
    players
        .into_iter()
        .filter(|p| seen.insert(p.id))
        .map(|mut p| {
            p.refresh_experience();
            p
        })
        .collect()
}
