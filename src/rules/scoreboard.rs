//! Per-player scoreboard.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{Category, GeneralaError, Result, NUM_CATEGORIES};

/// One optional score per category. A filled category never changes again.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ScoreBoard {
    scores: [Option<u32>; NUM_CATEGORIES],
}

impl ScoreBoard {
    /// An empty scoreboard.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` (zero included) in `category`.
    ///
    /// Fails with `AlreadyScored` if the category is filled.
    pub fn set_score(&mut self, category: Category, value: u32) -> Result<()> {
        let slot = &mut self.scores[category.index()];
        if slot.is_some() {
            return Err(GeneralaError::AlreadyScored { category });
        }
        *slot = Some(value);
        Ok(())
    }

    /// Recorded score, if any.
    #[must_use]
    pub fn get(&self, category: Category) -> Option<u32> {
        self.scores[category.index()]
    }

    #[must_use]
    pub fn is_filled(&self, category: Category) -> bool {
        self.get(category).is_some()
    }

    /// Sum of filled categories.
    #[must_use]
    pub fn total(&self) -> u32 {
        self.scores.iter().flatten().sum()
    }

    /// Unfilled categories in declaration order.
    pub fn available(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL.into_iter().filter(|&c| !self.is_filled(c))
    }

    /// Filled/unfilled flag per category in declaration order.
    #[must_use]
    pub fn filled_mask(&self) -> [bool; NUM_CATEGORIES] {
        self.scores.map(|s| s.is_some())
    }

    /// Whether every category is filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.scores.iter().all(Option::is_some)
    }

    /// (category, score) pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Category, Option<u32>)> + '_ {
        Category::ALL.into_iter().zip(self.scores.iter().copied())
    }
}

impl fmt::Display for ScoreBoard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (category, score)) in self.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            match score {
                Some(value) => write!(f, "{category}: {value}")?,
                None => write!(f, "{category}: -")?,
            }
        }
        Ok(())
    }
}
