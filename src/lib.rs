//! # generala
//!
//! Rules engine for the Generala dice game, built for reinforcement-learning
//! experiments.
//!
//! ## Design Principles
//!
//! 1. **Pure Rules**: Scoring is a stateless function of dice and roll
//!    number. Match state lives in `GeneralaGame` and nowhere else.
//!
//! 2. **Injectable Dice**: Every die is drawn through a `DiceSource`, so
//!    matches replay bit-for-bit from a seed or a scripted face list.
//!
//! 3. **Fixed Agent Contract**: A 24-feature state encoding and a 44-entry
//!    action space with legality masks.
//!
//! ## Modules
//!
//! - `core`: Categories, actions, players, configuration, errors, dice sources
//! - `rules`: Scoring, dice rolling, validation, scoreboards
//! - `games`: The match state machine and snapshots
//! - `nn`: State encoding, action masks, Q-network trait, epsilon-greedy agent
//! - `training`: Transitions, episodes and the replay buffer
//!
//! ```
//! use generala::{Category, GeneralaGame};
//!
//! let mut game = GeneralaGame::new(["ana", "bo"]).unwrap();
//! game.start_turn().unwrap();
//! game.score(Category::Sixes).unwrap();
//! game.next_player().unwrap();
//! assert_eq!(game.current_player().index(), 1);
//! ```

pub mod core;
pub mod games;
pub mod nn;
pub mod rules;
pub mod training;

#[cfg(feature = "python")]
mod python;

// Re-export commonly used types
pub use crate::core::{
    Action, Category, DiceSource, GameConfig, GameRng, GeneralaError, PlayerId, Result,
    ScoringTable, ScriptedDice, ACTION_SPACE,
};

pub use crate::rules::{GeneralaRules, Outcome, ScoreBoard, MAX_ROLLS};

pub use crate::games::{GameSnapshot, GameView, GeneralaGame, SnapshotError, Standings};

pub use crate::nn::{EncodedState, GeneralaEncoder, QAgent, QNetwork, StateEncoder};

pub use crate::training::{Episode, EpisodeConfig, EpisodeRunner, ReplayBuffer, Transition};
