//! Core types: categories, players, actions, dice sources, configuration, errors.
//!
//! Everything here is free of game-flow logic; the rules engine and the
//! match state machine build on these.

pub mod action;
pub mod category;
pub mod config;
pub mod error;
pub mod player;
pub mod rng;

pub use action::{Action, DiceVec, ACTION_SPACE, DICE_COUNT, HOLD_ACTIONS, SCORE_OFFSET};
pub use category::{Category, NUM_CATEGORIES};
pub use config::{GameConfig, ScoringTable};
pub use error::{GeneralaError, Result};
pub use player::{PlayerId, PlayerMap, MAX_PLAYERS};
pub use rng::{DiceSource, GameRng, GameRngState, ScriptedDice, FACES};
