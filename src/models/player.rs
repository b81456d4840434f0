//! Player, PlayerStatus and Standing data structures.

use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Unique identifier for a player (used by the engine and in API paths).
pub type PlayerId = Uuid;

/// Accept any string id. Ids that are not UUIDs (older rosters used short random
/// strings) map to a stable name-based UUID, so repeated ids still collide.
fn deserialize_id<'de, D>(deserializer: D) -> Result<PlayerId, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    Ok(Uuid::parse_str(&raw)
        .unwrap_or_else(|_| Uuid::new_v5(&Uuid::NAMESPACE_OID, raw.as_bytes())))
}

/// Experience awarded per win. Experience is always derived from wins.
pub const EXPERIENCE_PER_WIN: u32 = 10;

/// Experience for a given number of wins.
pub fn experience_for(wins: u32) -> u32 {
    wins.saturating_mul(EXPERIENCE_PER_WIN)
}

/// Roster status. Only `Active` players take turns.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlayerStatus {
    #[default]
    #[serde(alias = "continuer")]
    Active,
    /// Left the game voluntarily.
    #[serde(alias = "quit")]
    Withdrawn,
    /// Contributed the letter that broke the word.
    #[serde(alias = "executed")]
    Eliminated,
}

/// A player in the ledger.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Player {
    #[serde(deserialize_with = "deserialize_id")]
    pub id: PlayerId,
    pub name: String,
    #[serde(default)]
    wins: u32,
    #[serde(default)]
    losses: u32,
    #[serde(default, alias = "xp")]
    experience: u32,
    #[serde(default)]
    status: PlayerStatus,
}

impl Player {
    /// Create a new active player with the given name. Counters start at zero.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            wins: 0,
            losses: 0,
            experience: 0,
            status: PlayerStatus::Active,
        }
    }

    pub fn wins(&self) -> u32 {
        self.wins
    }

    pub fn losses(&self) -> u32 {
        self.losses
    }

    pub fn experience(&self) -> u32 {
        self.experience
    }

    pub fn status(&self) -> PlayerStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == PlayerStatus::Active
    }

    /// Record a win for this player.
    pub fn add_win(&mut self) {
        self.wins += 1;
        self.refresh_experience();
    }

    /// Record a loss for this player.
    pub fn add_loss(&mut self) {
        self.losses += 1;
        self.refresh_experience();
    }

    /// Move the player to a new status (terminal statuses recompute experience too).
    pub fn set_status(&mut self, status: PlayerStatus) {
        self.status = status;
        self.refresh_experience();
    }

    /// Re-derive experience from wins. Called after every counter change and on load.
    pub(crate) fn refresh_experience(&mut self) {
        self.experience = experience_for(self.wins);
    }
}

/// One row of the results table.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based position after sorting.
    pub rank: usize,
    pub id: PlayerId,
    pub name: String,
    pub wins: u32,
    pub losses: u32,
    pub experience: u32,
    pub status: PlayerStatus,
}

impl Standing {
    pub fn from_player(rank: usize, p: &Player) -> Self {
        Self {
            rank,
            id: p.id,
            name: p.name.clone(),
            wins: p.wins,
            losses: p.losses,
            experience: p.experience,
            status: p.status,
        }
    }
}
