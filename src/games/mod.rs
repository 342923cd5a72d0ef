//! Game implementations built on the rules engine.

pub mod generala;

pub use generala::{GameSnapshot, GameView, GeneralaGame, SnapshotError, Standings};
