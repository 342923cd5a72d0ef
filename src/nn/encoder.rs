//! State and action-mask encoding for learning agents.
//!
//! Feature layout (24 values):
//!
//! | range    | content                                             |
//! |----------|-----------------------------------------------------|
//! | `0..5`   | dice faces, zero-padded                             |
//! | `5..10`  | held values of the latest roll, zero-padded         |
//! | `10..13` | one-hot of `clamp(roll_number - 1, 0, 2)`           |
//! | `13..24` | 1 if the category is filled for the current player  |

use crate::core::{Category, ACTION_SPACE, DICE_COUNT, HOLD_ACTIONS, NUM_CATEGORIES, SCORE_OFFSET};
use crate::games::GameView;
use crate::rules::MAX_ROLLS;

use super::traits::EncodedState;

pub const DICE_OFFSET: usize = 0;
pub const HELD_OFFSET: usize = DICE_OFFSET + DICE_COUNT;
pub const ROLL_OFFSET: usize = HELD_OFFSET + DICE_COUNT;
pub const CATEGORY_OFFSET: usize = ROLL_OFFSET + MAX_ROLLS as usize;

/// Width of the encoded state.
pub const STATE_WIDTH: usize = CATEGORY_OFFSET + NUM_CATEGORIES;

/// Turns an observation into network input and a legality mask.
pub trait StateEncoder: Send + Sync {
    /// Encode the state the current player sees.
    fn encode(&self, view: &GameView<'_>) -> EncodedState;

    /// Legality of every action-space index.
    fn action_mask(&self, view: &GameView<'_>) -> Vec<bool>;

    /// Get the shape of encoded states.
    fn output_shape(&self) -> Vec<usize>;

    /// Get the total number of possible actions.
    fn action_space_size(&self) -> usize;
}

/// The fixed 24-feature / 44-action Generala encoding.
#[derive(Clone, Copy, Debug, Default)]
pub struct GeneralaEncoder;

impl GeneralaEncoder {
    pub fn new() -> Self {
        Self
    }
}

impl StateEncoder for GeneralaEncoder {
    fn encode(&self, view: &GameView<'_>) -> EncodedState {
        let mut tensor = vec![0.0f32; STATE_WIDTH];

        for (slot, &d) in tensor[DICE_OFFSET..HELD_OFFSET].iter_mut().zip(view.dice) {
            *slot = f32::from(d);
        }
        for (slot, &h) in tensor[HELD_OFFSET..ROLL_OFFSET].iter_mut().zip(view.held) {
            *slot = f32::from(h);
        }

        let roll_index = view.roll_number.saturating_sub(1).min(MAX_ROLLS - 1);
        tensor[ROLL_OFFSET + roll_index as usize] = 1.0;

        for category in Category::ALL {
            if view.filled[category.index()] {
                tensor[CATEGORY_OFFSET + category.index()] = 1.0;
            }
        }

        EncodedState::new(tensor)
    }

    /// ROLL and HOLD are legal while rolls remain; SCORE is legal for open
    /// categories once the turn has rolled and not yet scored. Nothing is
    /// legal after the match.
    fn action_mask(&self, view: &GameView<'_>) -> Vec<bool> {
        let mut mask = vec![false; ACTION_SPACE];
        if view.finished {
            return mask;
        }

        let rolls_remain = view.roll_number < MAX_ROLLS;
        mask[0] = rolls_remain;
        mask[1..=HOLD_ACTIONS].fill(rolls_remain);

        if view.can_score() && !view.scored {
            for category in Category::ALL {
                mask[SCORE_OFFSET + category.index()] = !view.filled[category.index()];
            }
        }
        mask
    }

    fn output_shape(&self) -> Vec<usize> {
        vec![STATE_WIDTH]
    }

    fn action_space_size(&self) -> usize {
        ACTION_SPACE
    }
}
