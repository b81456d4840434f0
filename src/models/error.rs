//! Errors returned by ledger and engine operations. None of them change state.

use crate::models::player::PlayerId;
use crate::models::round::Phase;
use thiserror::Error;

#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum GameError {
    /// Starting needs two active players.
    #[error("Need at least 2 active players to start (have {active})")]
    NotEnoughPlayers { active: usize },
    #[error("Action not allowed while the game is {0:?}")]
    InvalidPhase(Phase),
    #[error("'{0}' is not a single letter")]
    InvalidLetter(String),
    /// A word check is still outstanding.
    #[error("Still checking the current word")]
    ValidationPending,
    #[error("Need 2+ letters to check the word")]
    FragmentTooShort,
    #[error("Player name must not be empty")]
    EmptyName,
    #[error("Player not found")]
    PlayerNotFound(PlayerId),
    #[error("Player is not active")]
    PlayerNotActive(PlayerId),
}
