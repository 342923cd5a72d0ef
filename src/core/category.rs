//! The eleven scoring categories.
//!
//! Declaration order is significant: it drives scoreboard display and the
//! index-based state/action encoding used by agents.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::GeneralaError;

/// Number of scoring categories (and of rounds in a full match).
pub const NUM_CATEGORIES: usize = 11;

/// A scoring slot on a scoreboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    /// Straight: 1-2-3-4-5 or 2-3-4-5-6.
    Escalera,
    /// Full house: a pair plus three of a kind.
    Full,
    /// Four of a kind.
    Poker,
    /// Five of a kind.
    Generala,
    /// A second five of a kind.
    DoubleGenerala,
}

impl Category {
    /// All categories in declaration order.
    pub const ALL: [Category; NUM_CATEGORIES] = [
        Category::Ones,
        Category::Twos,
        Category::Threes,
        Category::Fours,
        Category::Fives,
        Category::Sixes,
        Category::Escalera,
        Category::Full,
        Category::Poker,
        Category::Generala,
        Category::DoubleGenerala,
    ];

    /// Position of this category in declaration order.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Look up a category by its declaration index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// The face value counted by an upper-section category.
    #[must_use]
    pub const fn face(self) -> Option<u8> {
        match self {
            Category::Ones => Some(1),
            Category::Twos => Some(2),
            Category::Threes => Some(3),
            Category::Fours => Some(4),
            Category::Fives => Some(5),
            Category::Sixes => Some(6),
            _ => None,
        }
    }

    /// Snake-case name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Category::Ones => "ones",
            Category::Twos => "twos",
            Category::Threes => "threes",
            Category::Fours => "fours",
            Category::Fives => "fives",
            Category::Sixes => "sixes",
            Category::Escalera => "escalera",
            Category::Full => "full",
            Category::Poker => "poker",
            Category::Generala => "generala",
            Category::DoubleGenerala => "double_generala",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Category {
    type Err = GeneralaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.name() == wanted)
            .ok_or_else(|| GeneralaError::invalid(format!("unknown category '{s}'")))
    }
}
