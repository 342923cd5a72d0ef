//! Fixed action space shared by the game and learning agents.
//!
//! Layout (44 entries):
//! - `0`: ROLL (re-roll everything)
//! - `1..=32`: HOLD with mask `index - 1`; bit `j` keeps die `j`, the rest are re-rolled
//! - `33..=43`: SCORE in a category, in declaration order
//!
//! ```
//! use generala::core::{Action, Category};
//!
//! assert_eq!(Action::Roll.to_index(), 0);
//! assert_eq!(Action::Hold(0b00011).to_index(), 4);
//! assert_eq!(Action::from_index(33), Some(Action::Score(Category::Ones)));
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::category::{Category, NUM_CATEGORIES};

/// Dice in a hand.
pub const DICE_COUNT: usize = 5;

/// Number of distinct hold masks over five dice.
pub const HOLD_ACTIONS: usize = 1 << DICE_COUNT;

/// Width of the action space.
pub const ACTION_SPACE: usize = 1 + HOLD_ACTIONS + NUM_CATEGORIES;

/// Index of the first SCORE action.
pub const SCORE_OFFSET: usize = 1 + HOLD_ACTIONS;

/// Inline storage for up to five dice values.
pub type DiceVec = SmallVec<[u8; DICE_COUNT]>;

/// A player decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    /// Re-roll all dice.
    Roll,
    /// Keep the dice selected by the mask, re-roll the rest.
    Hold(u8),
    /// Record the current dice in a category.
    Score(Category),
}

impl Action {
    /// Position in the fixed action space.
    #[must_use]
    pub fn to_index(self) -> usize {
        match self {
            Action::Roll => 0,
            Action::Hold(mask) => 1 + (mask as usize & (HOLD_ACTIONS - 1)),
            Action::Score(category) => SCORE_OFFSET + category.index(),
        }
    }

    /// Decode an action-space index.
    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Action::Roll),
            i if i < SCORE_OFFSET => Some(Action::Hold((i - 1) as u8)),
            i => Category::from_index(i - SCORE_OFFSET).map(Action::Score),
        }
    }

    /// Values kept by a hold mask. Bits past the end of `dice` are ignored.
    #[must_use]
    pub fn held_values(mask: u8, dice: &[u8]) -> DiceVec {
        dice.iter()
            .take(DICE_COUNT)
            .enumerate()
            .filter(|(j, _)| (mask >> j) & 1 == 1)
            .map(|(_, &d)| d)
            .collect()
    }

    /// Whether this action rolls dice.
    #[must_use]
    pub fn is_roll(self) -> bool {
        matches!(self, Action::Roll | Action::Hold(_))
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Roll => write!(f, "roll"),
            Action::Hold(mask) => write!(f, "hold({mask:05b})"),
            Action::Score(category) => write!(f, "score({category})"),
        }
    }
}
