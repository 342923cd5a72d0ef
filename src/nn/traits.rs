//! Q-network interface and baseline estimators.
//!
//! These traits define the boundary between the rules engine and whatever
//! learns to play it (typically a Python model reached through PyO3). The
//! engine only needs Q-values over the fixed action space.

use serde::{Deserialize, Serialize};

use crate::core::{Category, ScoringTable, ACTION_SPACE, DICE_COUNT, SCORE_OFFSET};
use crate::rules::{GeneralaRules, Outcome};

use super::encoder::{CATEGORY_OFFSET, ROLL_OFFSET};

/// Flat feature vector for network input.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EncodedState {
    /// Feature values.
    pub tensor: Vec<f32>,

    /// Shape of the tensor; `[features]` for the flat encoding.
    pub shape: Vec<usize>,
}

impl EncodedState {
    /// Wrap a flat feature vector.
    pub fn new(tensor: Vec<f32>) -> Self {
        let shape = vec![tensor.len()];
        Self { tensor, shape }
    }

    /// All-zero features of the given width (terminal next-state).
    pub fn zeros(width: usize) -> Self {
        Self::new(vec![0.0; width])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tensor.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tensor.is_empty()
    }

    /// Feature at a flat index.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<f32> {
        self.tensor.get(index).copied()
    }
}

/// Estimates the value of every action in a state.
pub trait QNetwork: Send + Sync {
    /// One Q-value per action-space index.
    fn q_values(&self, encoded: &EncodedState) -> Vec<f32>;

    /// Batch prediction for multiple states (optional optimization).
    fn q_values_batch(&self, encoded: &[EncodedState]) -> Vec<Vec<f32>> {
        encoded.iter().map(|e| self.q_values(e)).collect()
    }
}

/// All-zero Q-values: with masking, a uniform choice among legal actions.
#[derive(Clone, Debug, Default)]
pub struct ZeroQ;

impl QNetwork for ZeroQ {
    fn q_values(&self, _encoded: &EncodedState) -> Vec<f32> {
        vec![0.0; ACTION_SPACE]
    }
}

/// Values each SCORE action by the points it would earn right now.
///
/// Roll and hold actions get zero, so a masked greedy agent scores as soon
/// as any open category pays. Reads the dice and roll number back out of
/// the encoded state.
#[derive(Clone, Debug, Default)]
pub struct GreedyQ {
    rules: GeneralaRules,
}

impl GreedyQ {
    /// Greedy estimator for the given scoring table.
    pub fn new(table: ScoringTable) -> Self {
        Self {
            rules: GeneralaRules::new(table),
        }
    }

    /// Q-value given to a first-roll generala.
    pub const WIN_VALUE: f32 = 1000.0;
}

impl QNetwork for GreedyQ {
    fn q_values(&self, encoded: &EncodedState) -> Vec<f32> {
        let mut q = vec![0.0; ACTION_SPACE];
        let dice: Vec<u8> = encoded.tensor[..DICE_COUNT.min(encoded.len())]
            .iter()
            .map(|&v| v as u8)
            .collect();
        let roll_number = (0..3)
            .find(|&i| encoded.get(ROLL_OFFSET + i) == Some(1.0))
            .map_or(1, |i| i as u8 + 1);

        for category in Category::ALL {
            let filled = encoded.get(CATEGORY_OFFSET + category.index()) == Some(1.0);
            if filled {
                continue;
            }
            // Incomplete hands (before the first roll) fail validation and stay at zero.
            let value = match self.rules.score_category(category, &dice, roll_number) {
                Ok(Outcome::Points(points)) => points as f32,
                Ok(Outcome::ImmediateWin) => Self::WIN_VALUE,
                Err(_) => 0.0,
            };
            q[SCORE_OFFSET + category.index()] = value;
        }
        q
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoded(dice: [f32; 5], roll_index: usize, filled: &[Category]) -> EncodedState {
        let mut tensor = vec![0.0; 24];
        tensor[..5].copy_from_slice(&dice);
        tensor[ROLL_OFFSET + roll_index] = 1.0;
        for c in filled {
            tensor[CATEGORY_OFFSET + c.index()] = 1.0;
        }
        EncodedState::new(tensor)
    }

    #[test]
    fn test_encoded_state_basics() {
        let state = EncodedState::new(vec![1.0, 2.0, 3.0]);
        assert_eq!(state.len(), 3);
        assert_eq!(state.shape, vec![3]);
        assert_eq!(state.get(2), Some(3.0));
        assert_eq!(state.get(3), None);

        let zeros = EncodedState::zeros(24);
        assert!(zeros.tensor.iter().all(|&v| v == 0.0));
        assert!(EncodedState::zeros(0).is_empty());
    }

    #[test]
    fn test_zero_q_width() {
        let q = ZeroQ.q_values(&EncodedState::zeros(24));
        assert_eq!(q.len(), ACTION_SPACE);
        assert!(q.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_greedy_q_scores_open_categories() {
        let state = encoded([2.0, 2.0, 3.0, 3.0, 3.0], 1, &[Category::Threes]);
        let q = GreedyQ::default().q_values(&state);

        assert_eq!(q[SCORE_OFFSET + Category::Full.index()], 35.0);
        assert_eq!(q[SCORE_OFFSET + Category::Twos.index()], 4.0);
        assert_eq!(q[SCORE_OFFSET + Category::Threes.index()], 0.0);
        assert_eq!(q[0], 0.0);
    }

    #[test]
    fn test_greedy_q_prefers_first_roll_generala() {
        let state = encoded([4.0; 5], 0, &[]);
        let q = GreedyQ::default().q_values(&state);
        assert_eq!(q[SCORE_OFFSET + Category::Generala.index()], GreedyQ::WIN_VALUE);
    }

    #[test]
    fn test_greedy_q_without_dice() {
        let q = GreedyQ::default().q_values(&EncodedState::zeros(24));
        assert!(q.iter().all(|&v| v == 0.0));
    }

    #[test]
    fn test_batch_prediction() {
        let states = vec![EncodedState::zeros(24), EncodedState::zeros(24)];
        let batch = ZeroQ.q_values_batch(&states);
        assert_eq!(batch.len(), 2);
        assert!(batch.iter().all(|q| q.len() == ACTION_SPACE));
    }

    #[test]
    fn test_serialization() {
        let state = EncodedState::new(vec![1.0, 2.0, 3.0]);
        let json = serde_json::to_string(&state).unwrap();
        let deserialized: EncodedState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, deserialized);
    }
}
