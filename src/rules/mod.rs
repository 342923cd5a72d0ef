//! Generala rules: dice generation, category scoring and scoreboards.
//!
//! Everything here is independent of turn order; `games::generala` drives
//! a match on top of it.

pub mod engine;
pub mod scoreboard;
pub mod validation;

pub use engine::{face_counts, GeneralaRules, Outcome, MAX_ROLLS};
pub use scoreboard::ScoreBoard;
pub use validation::{
    validate_dice, validate_dice_count, validate_held_count, validate_held_subset,
    validate_player_names, validate_roll_number,
};
