//! Generala match state machine.
//!
//! - Each player takes one turn per round: up to three rolls, then one score
//! - A full match plays one round per category (11)
//! - A generala on the very first roll of a turn wins the match outright
//!
//! Supports 1-255 players and any `DiceSource`, so tests can script the dice.

mod game;
mod snapshot;

pub use game::{GameView, GeneralaGame, Standings};
pub use snapshot::{GameSnapshot, SnapshotError};
