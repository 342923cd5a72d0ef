//! Error types for rule and game operations.
//!
//! Every failure is synchronous and happens before any state is mutated,
//! so a caller can fix its input and retry the same call.

use thiserror::Error;

use super::category::Category;

/// Errors raised by the rules engine and the game state machine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneralaError {
    /// Malformed dice, held values, roll number, player names or config.
    #[error("invalid input: {reason}")]
    InvalidInput { reason: String },

    /// Category already holds a score.
    #[error("category '{category}' already scored")]
    AlreadyScored { category: Category },

    /// All rolls for this turn have been used.
    #[error("no rolls left (maximum is {max_rolls})")]
    NoRollsLeft { max_rolls: u8 },

    /// Scoring attempted before the first roll of the turn.
    #[error("cannot score before rolling")]
    CannotScore,

    /// The match has finished; no further rolls or scores are accepted.
    #[error("game is over")]
    GameOver,
}

impl GeneralaError {
    /// Build an `InvalidInput` error from any message.
    pub fn invalid(reason: impl Into<String>) -> Self {
        GeneralaError::InvalidInput {
            reason: reason.into(),
        }
    }
}

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, GeneralaError>;
