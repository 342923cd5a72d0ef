//! Match configuration.
//!
//! - `ScoringTable`: point values for the combination categories
//! - `GameConfig`: rounds, scoring table and dice seed for one match
//!
//! Upper-section categories (ones..sixes) always score face × count and are
//! not configurable.

use serde::{Deserialize, Serialize};

use super::category::NUM_CATEGORIES;
use super::error::{GeneralaError, Result};

/// Point values for the combination categories.
///
/// Two revisions of the rules exist; `standard()` is the default and
/// `reduced()` selects the lower base values.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoringTable {
    /// Escalera (straight) base value.
    pub straight: u32,
    /// Full house base value.
    pub full_house: u32,
    /// Poker (four of a kind) base value.
    pub four_of_a_kind: u32,
    /// Added to escalera/full/poker when made on the first roll.
    pub first_roll_bonus: u32,
    /// Generala made after the first roll. A first-roll generala wins outright
    /// and records this value.
    pub generala: u32,
    /// Double generala, regardless of roll number.
    pub double_generala: u32,
}

impl ScoringTable {
    /// Base values {25, 35, 45} with a +5 first-roll bonus.
    #[must_use]
    pub const fn standard() -> Self {
        Self {
            straight: 25,
            full_house: 35,
            four_of_a_kind: 45,
            first_roll_bonus: 5,
            generala: 50,
            double_generala: 100,
        }
    }

    /// Base values {20, 30, 40} with a +5 first-roll bonus.
    #[must_use]
    pub const fn reduced() -> Self {
        Self {
            straight: 20,
            full_house: 30,
            four_of_a_kind: 40,
            ..Self::standard()
        }
    }
}

impl Default for ScoringTable {
    fn default() -> Self {
        Self::standard()
    }
}

/// Configuration for a single match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Rounds in the match (1..=11). A full game plays one round per category.
    pub rounds: usize,

    /// Point values for combination categories.
    pub scoring: ScoringTable,

    /// Seed for the default dice source.
    pub seed: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rounds: NUM_CATEGORIES,
            scoring: ScoringTable::standard(),
            seed: 42,
        }
    }
}

impl GameConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the number of rounds.
    #[must_use]
    pub fn with_rounds(mut self, rounds: usize) -> Self {
        self.rounds = rounds;
        self
    }

    /// Set the scoring table.
    #[must_use]
    pub fn with_scoring(mut self, scoring: ScoringTable) -> Self {
        self.scoring = scoring;
        self
    }

    /// Set the dice seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check the configuration before a match is built from it.
    pub fn validate(&self) -> Result<()> {
        if !(1..=NUM_CATEGORIES).contains(&self.rounds) {
            return Err(GeneralaError::invalid(format!(
                "rounds must be between 1 and {NUM_CATEGORIES}, got {}",
                self.rounds
            )));
        }
        Ok(())
    }
}
