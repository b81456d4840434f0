//! Round/turn engine: letters, word checks, eliminations and game termination.
//!
//! A letter that grows the fragment to 2+ letters does not advance the turn.
//! It hands back a [`PendingCheck`]; the caller runs the lookup (see
//! [`check_fragment`]) and feeds the outcome to [`RoundEngine::finish_check`].
//! While a check is outstanding, turn-taking operations are rejected with
//! [`GameError::ValidationPending`].

use crate::dictionary::{check_fragment, CheckFailure, WordValidator};
use crate::logic::ledger::PlayerLedger;
use crate::models::{GameError, GameSnapshot, Phase, PlayerId, RoundState, WordCheck};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::watch;
use tokio::task::JoinHandle;

/// Default upper bound on a single word check.
pub const DEFAULT_VALIDATION_TIMEOUT: Duration = Duration::from_secs(5);

/// What started a check.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CheckTrigger {
    /// A letter grew the fragment to 2+ letters.
    Letter,
    /// A player asked to check the fragment as a finished word.
    Manual,
}

/// An outstanding word check. Hand it back to `finish_check` once the lookup is done.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct PendingCheck {
    pub id: u64,
    pub fragment: String,
    /// Player who added the last letter; eliminated if the word fails.
    pub contributor: PlayerId,
    pub trigger: CheckTrigger,
}

/// Result of a submitted letter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Submission {
    /// No check needed; the turn has already moved on.
    Settled(Resolution),
    /// A check must run before the turn moves on.
    Pending(PendingCheck),
}

/// What the engine did after a turn or check.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Resolution {
    Advanced { next_player: PlayerId },
    /// Manual check passed; ending the game is up to the caller.
    Accepted,
    /// `concluded` is false when a fresh round started.
    Eliminated { player: PlayerId, concluded: bool },
    Concluded { winner: Option<PlayerId> },
    /// The check belonged to a round or game that no longer exists,
    /// or its contributor is no longer in play.
    Stale,
}

pub struct RoundEngine {
    ledger: PlayerLedger,
    validator: WordValidator,
    round: RoundState,
    validation_timeout: Duration,
    last_contributor: Option<PlayerId>,
    in_flight: Option<u64>,
    next_check_id: u64,
    observers: watch::Sender<GameSnapshot>,
}

impl RoundEngine {
    pub fn new(ledger: PlayerLedger, validator: WordValidator) -> Self {
        let (observers, _) = watch::channel(GameSnapshot::default());
        let engine = Self {
            ledger,
            validator,
            round: RoundState::default(),
            validation_timeout: DEFAULT_VALIDATION_TIMEOUT,
            last_contributor: None,
            in_flight: None,
            next_check_id: 1,
            observers,
        };
        engine.publish();
        engine
    }

    pub fn with_validation_timeout(mut self, limit: Duration) -> Self {
        self.validation_timeout = limit;
        self
    }

    pub fn ledger(&self) -> &PlayerLedger {
        &self.ledger
    }

    pub fn round(&self) -> &RoundState {
        &self.round
    }

    pub fn phase(&self) -> Phase {
        self.round.phase
    }

    pub fn validator(&self) -> WordValidator {
        self.validator.clone()
    }

    pub fn validation_timeout(&self) -> Duration {
        self.validation_timeout
    }

    /// Receive a fresh snapshot after every state change.
    pub fn subscribe(&self) -> watch::Receiver<GameSnapshot> {
        self.observers.subscribe()
    }

    pub fn current_player_id(&self) -> Option<PlayerId> {
        if self.round.phase != Phase::Active {
            return None;
        }
        self.ledger
            .players()
            .get(self.round.current_player_index)
            .map(|p| p.id)
    }

    /// The sole active player of a concluded game.
    pub fn winner(&self) -> Option<PlayerId> {
        if self.round.phase != Phase::Concluded || self.ledger.active_count() != 1 {
            return None;
        }
        self.ledger.players().iter().find(|p| p.is_active()).map(|p| p.id)
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let current_player = self.current_player_id().and_then(|id| self.ledger.get(id)).cloned();
        GameSnapshot {
            round: self.round.clone(),
            current_player,
            players: self.ledger.players().to_vec(),
            winner: self.winner(),
        }
    }

    pub fn add_player(&mut self, name: &str) -> Result<PlayerId, GameError> {
        let id = self.ledger.add_player(name)?;
        self.publish();
        Ok(id)
    }

    pub fn rename_player(&mut self, id: PlayerId, new_name: &str) -> Result<bool, GameError> {
        let changed = self.ledger.rename_player(id, new_name)?;
        if changed {
            self.publish();
        }
        Ok(changed)
    }

    /// Remove a player and keep the current index on the same (or next) player.
    pub fn remove_player(&mut self, id: PlayerId) -> Result<(), GameError> {
        if self.round.pending_validation {
            return Err(GameError::ValidationPending);
        }
        let removed = self.ledger.remove_player(id)?;
        if self.last_contributor == Some(id) {
            self.last_contributor = None;
        }
        if self.round.phase == Phase::Active {
            let current = self.round.current_player_index;
            if removed < current {
                self.round.current_player_index = current - 1;
            } else if removed == current {
                self.settle_on_active_from(current);
            }
            if self.ledger.active_count() < 2 {
                self.conclude();
            }
        } else {
            self.round.current_player_index = self
                .round
                .current_player_index
                .min(self.ledger.len().saturating_sub(1));
        }
        self.publish();
        Ok(())
    }

    /// Wipe the roster. Any running game goes back to idle.
    pub fn reset_ledger(&mut self) {
        self.ledger.reset_ledger();
        self.clear_round();
        self.publish();
    }

    /// Start a game. Needs at least two active players.
    pub fn start_game(&mut self) -> Result<(), GameError> {
        if !matches!(self.round.phase, Phase::Idle | Phase::Setup) {
            return Err(GameError::InvalidPhase(self.round.phase));
        }
        let active = self.ledger.active_count();
        let first = match self.ledger.first_active() {
            Some(first) if active >= 2 => first,
            _ => {
                log::info!("Cannot start game - {} active player(s)", active);
                return Err(GameError::NotEnoughPlayers { active });
            }
        };
        self.clear_round();
        self.round.phase = Phase::Active;
        self.round.current_player_index = first;
        log::info!("Starting game with {} players", active);
        self.publish();
        Ok(())
    }

    /// Add a letter for the current player.
    pub fn submit_letter(&mut self, letter: &str) -> Result<Submission, GameError> {
        self.require_active()?;
        if self.round.pending_validation {
            return Err(GameError::ValidationPending);
        }
        let ch = parse_letter(letter)?;
        let contributor = self
            .current_player_id()
            .ok_or(GameError::InvalidPhase(self.round.phase))?;

        self.round.fragment.push(ch);
        self.round.last_validation = None;
        self.last_contributor = Some(contributor);
        log::debug!("Letter {} -> {}", ch, self.round.fragment);

        let submission = if self.round.fragment_len() < 2 {
            Submission::Settled(self.advance())
        } else {
            Submission::Pending(self.open_check(contributor, CheckTrigger::Letter))
        };
        self.publish();
        Ok(submission)
    }

    /// Check the current fragment as a finished word.
    pub fn manual_check(&mut self) -> Result<PendingCheck, GameError> {
        self.require_active()?;
        if self.round.pending_validation {
            return Err(GameError::ValidationPending);
        }
        if self.round.fragment_len() < 2 {
            return Err(GameError::FragmentTooShort);
        }
        // The letter adder may have left the roster since; the current player answers for it.
        let contributor = self
            .last_contributor
            .filter(|&id| self.ledger.get(id).is_some_and(|p| p.is_active()))
            .or_else(|| self.current_player_id())
            .ok_or(GameError::InvalidPhase(self.round.phase))?;
        log::info!("Manually checking word: {}", self.round.fragment);
        let check = self.open_check(contributor, CheckTrigger::Manual);
        self.publish();
        Ok(check)
    }

    /// Apply the outcome of a check. A failed check counts as an invalid word.
    pub fn finish_check(
        &mut self,
        check: PendingCheck,
        outcome: Result<WordCheck, CheckFailure>,
    ) -> Resolution {
        if self.in_flight != Some(check.id) || self.round.phase != Phase::Active {
            log::debug!("Ignoring stale check #{} for {}", check.id, check.fragment);
            return Resolution::Stale;
        }
        self.in_flight = None;
        self.round.pending_validation = false;

        let result = outcome.unwrap_or_else(|failure| {
            log::warn!("Word check for {} failed: {}", check.fragment, failure);
            WordCheck::unverified(failure.to_string())
        });
        let accepted = result.is_accepted();
        log::info!("{} -> {} ({:?})", check.fragment, result.message, result.verdict);
        self.round.last_validation = Some(result);

        let resolution = match (accepted, check.trigger) {
            (true, CheckTrigger::Letter) => self.advance(),
            (true, CheckTrigger::Manual) => Resolution::Accepted,
            (false, _) => self.eliminate_contributor(check.contributor),
        };
        self.publish();
        resolution
    }

    /// Run a pending check with the configured timeout and apply it.
    pub async fn run_check(&mut self, check: PendingCheck) -> Resolution {
        let outcome = check_fragment(&self.validator, &check.fragment, self.validation_timeout).await;
        self.finish_check(check, outcome)
    }

    /// Submit a letter and, if needed, check the fragment.
    pub async fn play_letter(&mut self, letter: &str) -> Result<Resolution, GameError> {
        match self.submit_letter(letter)? {
            Submission::Settled(resolution) => Ok(resolution),
            Submission::Pending(check) => Ok(self.run_check(check).await),
        }
    }

    /// Manually check the fragment and apply the result.
    pub async fn check_word(&mut self) -> Result<Resolution, GameError> {
        let check = self.manual_check()?;
        Ok(self.run_check(check).await)
    }

    /// Move the turn to the next active player, or conclude with fewer than two.
    pub fn next_player(&mut self) -> Result<Resolution, GameError> {
        self.require_active()?;
        if self.round.pending_validation {
            return Err(GameError::ValidationPending);
        }
        let resolution = self.advance();
        self.publish();
        Ok(resolution)
    }

    /// The current player gives up. The fragment carries on with the next player.
    pub fn quit_current_player(&mut self) -> Result<Resolution, GameError> {
        self.require_active()?;
        if self.round.pending_validation {
            return Err(GameError::ValidationPending);
        }
        let id = self
            .current_player_id()
            .ok_or(GameError::InvalidPhase(self.round.phase))?;
        self.ledger.withdraw(id)?;
        let resolution = self.advance();
        self.publish();
        Ok(resolution)
    }

    /// End the game by hand. Scores are left as they are.
    pub fn end_game(&mut self) -> Result<(), GameError> {
        self.require_active()?;
        log::info!("Ending game");
        self.conclude();
        self.publish();
        Ok(())
    }

    /// Back to idle with all transient state cleared. The ledger is untouched.
    pub fn reset_round(&mut self) {
        log::info!("Resetting game");
        self.clear_round();
        self.publish();
    }

    /// Reset and bring every player back for another game with the same roster.
    pub fn new_game(&mut self) -> Result<(), GameError> {
        if self.round.phase == Phase::Active {
            return Err(GameError::InvalidPhase(self.round.phase));
        }
        self.clear_round();
        self.ledger.reinstate_all();
        self.publish();
        Ok(())
    }

    fn require_active(&self) -> Result<(), GameError> {
        if self.round.phase == Phase::Active {
            Ok(())
        } else {
            Err(GameError::InvalidPhase(self.round.phase))
        }
    }

    fn open_check(&mut self, contributor: PlayerId, trigger: CheckTrigger) -> PendingCheck {
        let id = self.next_check_id;
        self.next_check_id += 1;
        self.in_flight = Some(id);
        self.round.pending_validation = true;
        PendingCheck {
            id,
            fragment: self.round.fragment.clone(),
            contributor,
            trigger,
        }
    }

    fn advance(&mut self) -> Resolution {
        if self.ledger.active_count() < 2 {
            return self.conclude();
        }
        match self.ledger.next_active_after(self.round.current_player_index) {
            Some(next) => {
                self.round.current_player_index = next;
                let next_player = self.ledger.players()[next].id;
                log::debug!("Moving to next player: {}", next);
                Resolution::Advanced { next_player }
            }
            None => self.conclude(),
        }
    }

    fn eliminate_contributor(&mut self, player: PlayerId) -> Resolution {
        if let Err(e) = self.ledger.eliminate(player) {
            log::warn!("Could not eliminate {}: {}", player, e);
            return Resolution::Stale;
        }
        if self.ledger.active_count() <= 1 {
            self.conclude();
            return Resolution::Eliminated { player, concluded: true };
        }
        self.round.round_number += 1;
        self.round.fragment.clear();
        self.round.last_validation = None;
        self.last_contributor = None;
        self.round.current_player_index = self.ledger.first_active().unwrap_or(0);
        log::info!("Starting round {}", self.round.round_number);
        Resolution::Eliminated { player, concluded: false }
    }

    /// Point at `index` if active, else the next active player after it.
    fn settle_on_active_from(&mut self, index: usize) {
        let len = self.ledger.len();
        if len == 0 {
            self.round.current_player_index = 0;
            return;
        }
        let index = index % len;
        if !self.ledger.is_active_at(index) {
            if let Some(next) = self.ledger.next_active_after(index) {
                self.round.current_player_index = next;
                return;
            }
        }
        self.round.current_player_index = index;
    }

    fn conclude(&mut self) -> Resolution {
        self.round.phase = Phase::Concluded;
        self.round.pending_validation = false;
        self.in_flight = None;
        let winner = self.winner();
        log::info!("Game concluded after round {}", self.round.round_number);
        Resolution::Concluded { winner }
    }

    fn clear_round(&mut self) {
        self.round = RoundState::default();
        self.in_flight = None;
        self.last_contributor = None;
    }

    fn publish(&self) {
        self.observers.send_replace(self.snapshot());
    }
}

/// Run a pending check on its own task and apply the outcome.
///
/// The check settles even if whoever awaits the handle goes away. `None` means the
/// engine lock was poisoned.
pub fn spawn_check(
    engine: Arc<Mutex<RoundEngine>>,
    check: PendingCheck,
) -> JoinHandle<Option<Resolution>> {
    let settings = engine
        .lock()
        .ok()
        .map(|g| (g.validator(), g.validation_timeout()));
    tokio::spawn(async move {
        let (validator, limit) = settings?;
        let outcome = check_fragment(&validator, &check.fragment, limit).await;
        let mut g = engine.lock().ok()?;
        Some(g.finish_check(check, outcome))
    })
}

/// A single ASCII letter, upper-cased.
fn parse_letter(letter: &str) -> Result<char, GameError> {
    let mut chars = letter.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii_alphabetic() => Ok(c.to_ascii_uppercase()),
        _ => Err(GameError::InvalidLetter(letter.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_letter;
    use crate::models::GameError;

    #[test]
    fn parse_letter_accepts_one_ascii_letter() {
        assert_eq!(parse_letter("q"), Ok('Q'));
        assert_eq!(parse_letter("Z"), Ok('Z'));
        for bad in ["", "ab", "1", " ", "é"] {
            assert_eq!(parse_letter(bad), Err(GameError::InvalidLetter(bad.to_string())));
        }
    }
}
