//! Phase, RoundState and the snapshot handed to the presentation layer.

use crate::models::check::WordCheck;
use crate::models::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};

/// Current phase of the game.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// No game running.
    #[default]
    Idle,
    /// Lobby state owned by the presentation layer; the engine never enters it
    /// but accepts `start_game` from it.
    Setup,
    /// Letters are being played.
    Active,
    /// One player left standing or the game was ended by hand.
    Concluded,
}

/// Transient per-game state. Holds indices into the ledger, never player copies.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    pub phase: Phase,
    pub current_player_index: usize,
    pub fragment: String,
    pub round_number: u32,
    pub pending_validation: bool,
    pub last_validation: Option<WordCheck>,
}

impl Default for RoundState {
    fn default() -> Self {
        Self {
            phase: Phase::Idle,
            current_player_index: 0,
            fragment: String::new(),
            round_number: 1,
            pending_validation: false,
            last_validation: None,
        }
    }
}

impl RoundState {
    /// Fragment length in letters.
    pub fn fragment_len(&self) -> usize {
        self.fragment.chars().count()
    }
}

/// Everything the view layer renders, published to subscribers after each mutation.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct GameSnapshot {
    #[serde(flatten)]
    pub round: RoundState,
    pub current_player: Option<Player>,
    pub players: Vec<Player>,
    /// Set once the game has concluded with a single active player.
    pub winner: Option<PlayerId>,
}
