//! Data structures for the ghost word game: players, round state, word checks.

mod check;
mod error;
mod player;
mod round;

pub use check::{Verdict, WordCheck};
pub use error::GameError;
pub use player::{experience_for, Player, PlayerId, PlayerStatus, Standing, EXPERIENCE_PER_WIN};
pub use round::{GameSnapshot, Phase, RoundState};
