//! Game logic: the player ledger and the round/turn engine.

mod engine;
mod ledger;

pub use engine::{
    spawn_check, CheckTrigger, PendingCheck, Resolution, RoundEngine, Submission,
    DEFAULT_VALIDATION_TIMEOUT,
};
pub use ledger::{PlayerLedger, ROSTER_KEY};
