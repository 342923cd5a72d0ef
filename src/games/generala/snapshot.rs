//! Save and resume a match, dice stream included.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::core::{
    DiceVec, GameConfig, GameRng, GameRngState, GeneralaError, PlayerId, PlayerMap, DICE_COUNT,
};
use crate::rules::{validate_dice, validate_held_subset, validate_player_names, GeneralaRules, ScoreBoard, MAX_ROLLS};

use super::game::GeneralaGame;

/// Errors from snapshot encoding and decoding.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot encoding failed: {0}")]
    Encoding(#[from] bincode::Error),

    #[error("snapshot is inconsistent: {0}")]
    Invalid(#[from] GeneralaError),
}

/// Complete serialisable state of a match driven by `GameRng`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub names: Vec<String>,
    pub scoreboards: Vec<ScoreBoard>,
    pub current_player: PlayerId,
    pub round: usize,
    pub dice: Vec<u8>,
    pub held: Vec<u8>,
    pub roll_number: u8,
    pub scored: bool,
    pub finished: bool,
    pub config: GameConfig,
    pub rng: GameRngState,
}

impl GameSnapshot {
    fn check(&self) -> Result<(), GeneralaError> {
        validate_player_names(&self.names)?;
        self.config.validate()?;
        if self.scoreboards.len() != self.names.len() {
            return Err(GeneralaError::invalid(format!(
                "{} scoreboards for {} players",
                self.scoreboards.len(),
                self.names.len()
            )));
        }
        if self.current_player.index() >= self.names.len() {
            return Err(GeneralaError::invalid(format!(
                "current player {} out of range",
                self.current_player.index()
            )));
        }
        if self.roll_number > MAX_ROLLS {
            return Err(GeneralaError::invalid(format!(
                "roll number {} exceeds {MAX_ROLLS}",
                self.roll_number
            )));
        }
        let expected_dice = if self.roll_number == 0 { 0 } else { DICE_COUNT };
        if self.dice.len() != expected_dice {
            return Err(GeneralaError::invalid(format!(
                "expected {expected_dice} dice on roll {}, got {}",
                self.roll_number,
                self.dice.len()
            )));
        }
        validate_dice(&self.dice, true)?;
        validate_held_subset(&self.held, &self.dice)?;
        if self.scored && self.roll_number == 0 {
            return Err(GeneralaError::invalid("scored before any roll"));
        }
        if self.round > self.config.rounds {
            return Err(GeneralaError::invalid(format!(
                "round {} exceeds {} rounds",
                self.round, self.config.rounds
            )));
        }
        if self.round == self.config.rounds && !self.finished {
            return Err(GeneralaError::invalid("every round played but match not finished"));
        }
        Ok(())
    }
}

impl GeneralaGame<GameRng> {
    /// Capture the full match state.
    #[must_use]
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot {
            names: self.names.clone(),
            scoreboards: self.scoreboards.as_slice().to_vec(),
            current_player: self.current_player,
            round: self.round,
            dice: self.dice.to_vec(),
            held: self.held.to_vec(),
            roll_number: self.roll_number,
            scored: self.scored,
            finished: self.finished,
            config: self.config.clone(),
            rng: self.source.state(),
        }
    }

    /// Rebuild a match from a snapshot, rejecting inconsistent state.
    pub fn from_snapshot(snapshot: GameSnapshot) -> Result<Self, GeneralaError> {
        snapshot.check()?;

        let boards = snapshot.scoreboards;
        let scoreboards = PlayerMap::new(boards.len(), |p| boards[p.index()].clone())?;

        Ok(Self {
            names: snapshot.names,
            scoreboards,
            current_player: snapshot.current_player,
            round: snapshot.round,
            dice: DiceVec::from_vec(snapshot.dice),
            held: DiceVec::from_vec(snapshot.held),
            roll_number: snapshot.roll_number,
            scored: snapshot.scored,
            finished: snapshot.finished,
            rules: GeneralaRules::new(snapshot.config.scoring),
            config: snapshot.config,
            source: GameRng::from_state(&snapshot.rng),
        })
    }

    /// Encode the match with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>, SnapshotError> {
        Ok(bincode::serialize(&self.snapshot())?)
    }

    /// Decode a match written by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, SnapshotError> {
        let snapshot: GameSnapshot = bincode::deserialize(bytes)?;
        Ok(Self::from_snapshot(snapshot)?)
    }
}
