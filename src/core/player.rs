//! Player identification and per-player data storage.
//!
//! ## PlayerId
//!
//! Seat index in turn order, 0-based, supporting 1-255 players.
//!
//! ## PlayerMap
//!
//! Per-player storage backed by `Vec` for O(1) access by `PlayerId`.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

use super::error::{GeneralaError, Result};

/// Most players a single match supports.
pub const MAX_PLAYERS: usize = 255;

/// Player seat in turn order. The first player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// The player seated after this one, wrapping to seat 0.
    #[must_use]
    pub fn next(self, player_count: usize) -> Self {
        Self(((self.index() + 1) % player_count.max(1)) as u8)
    }

    /// Iterate over all player IDs for a match with `player_count` players.
    ///
    /// ```
    /// use generala::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(3).collect();
    /// assert_eq!(players, vec![PlayerId(0), PlayerId(1), PlayerId(2)]);
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count.min(MAX_PLAYERS) as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a map with one entry per player from a factory function.
    ///
    /// Fails with `InvalidInput` for zero or more than 255 players.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Result<Self> {
        if player_count == 0 {
            return Err(GeneralaError::invalid("player list cannot be empty"));
        }
        if player_count > MAX_PLAYERS {
            return Err(GeneralaError::invalid(format!(
                "at most {MAX_PLAYERS} players supported, got {player_count}"
            )));
        }

        Ok(Self {
            data: PlayerId::all(player_count).map(factory).collect(),
        })
    }

    /// Create a map with every entry set to `T::default()`.
    pub fn with_default(player_count: usize) -> Result<Self>
    where
        T: Default,
    {
        Self::new(player_count, |_| T::default())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a player's entry, if the seat exists.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> Option<&T> {
        self.data.get(player.index())
    }

    /// Get a mutable reference to a player's entry, if the seat exists.
    pub fn get_mut(&mut self, player: PlayerId) -> Option<&mut T> {
        self.data.get_mut(player.index())
    }

    /// Entries in seat order.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        &self.data[player.index()]
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        &mut self.data[player.index()]
    }
}
