//! Transitions, episodes and the replay buffer.
//!
//! An episode records every decision of a match, capturing:
//! - Encoded states before and after each action
//! - The action index taken and its shaped reward
//! - Which seat acted
//! - Final scoreboard totals

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::{Action, GameRng, PlayerId};
use crate::nn::EncodedState;

/// Divisor turning category points into a step reward.
pub const POINTS_SCALE: f32 = 50.0;

/// Divisor turning a final scoreboard total into the terminal reward.
pub const TOTAL_SCALE: f32 = 500.0;

/// One agent decision and its consequence.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Transition {
    /// State seen by the acting player.
    pub state: EncodedState,

    /// The action taken.
    pub action: Action,

    /// Shaped reward for this step.
    pub reward: f32,

    /// State after the action; all zeros on the terminal transition.
    pub next_state: EncodedState,

    /// Last transition of the episode.
    pub done: bool,

    /// The player who acted.
    pub player: PlayerId,
}

impl Transition {
    /// Action-space index of `action`.
    #[must_use]
    pub fn action_index(&self) -> usize {
        self.action.to_index()
    }
}

/// Every transition of one match, in play order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    pub transitions: Vec<Transition>,

    /// Scoreboard totals in seat order when the episode ended.
    pub totals: Vec<u32>,

    /// Seed of the match's dice.
    pub seed: u64,
}

impl Episode {
    pub fn new(seed: u64) -> Self {
        Self {
            transitions: Vec::new(),
            totals: Vec::new(),
            seed,
        }
    }

    pub fn push(&mut self, transition: Transition) {
        self.transitions.push(transition);
    }

    /// Turn the last transition terminal: reward becomes the acting
    /// player's final total over `TOTAL_SCALE` and the next state is zeroed.
    pub fn finish(&mut self, totals: Vec<u32>) {
        if let Some(last) = self.transitions.last_mut() {
            let total = totals.get(last.player.index()).copied().unwrap_or(0);
            last.reward = total as f32 / TOTAL_SCALE;
            last.next_state = EncodedState::zeros(last.state.len());
            last.done = true;
        }
        self.totals = totals;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    /// Transitions taken by one player.
    pub fn player_transitions(&self, player: PlayerId) -> impl Iterator<Item = &Transition> {
        self.transitions.iter().filter(move |t| t.player == player)
    }

    /// Sum of step rewards.
    #[must_use]
    pub fn total_reward(&self) -> f32 {
        self.transitions.iter().map(|t| t.reward).sum()
    }

    /// Mean final total across players.
    #[must_use]
    pub fn mean_total(&self) -> f64 {
        if self.totals.is_empty() {
            return 0.0;
        }
        self.totals.iter().map(|&t| f64::from(t)).sum::<f64>() / self.totals.len() as f64
    }
}

/// Bounded transition memory.
///
/// Uses a FIFO strategy: when full, the oldest transitions are dropped.
#[derive(Clone, Debug)]
pub struct ReplayBuffer {
    transitions: VecDeque<Transition>,
    max_transitions: usize,
}

impl ReplayBuffer {
    pub fn new(max_transitions: usize) -> Self {
        Self {
            transitions: VecDeque::with_capacity(max_transitions.min(1 << 16)),
            max_transitions,
        }
    }

    /// Add a transition, evicting the oldest when full.
    pub fn push(&mut self, transition: Transition) {
        if self.max_transitions == 0 {
            return;
        }
        if self.transitions.len() >= self.max_transitions {
            self.transitions.pop_front();
        }
        self.transitions.push_back(transition);
    }

    /// Add every transition of an episode.
    pub fn extend_episode(&mut self, episode: Episode) {
        for transition in episode.transitions {
            self.push(transition);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.transitions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.transitions.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.max_transitions
    }

    pub fn clear(&mut self) {
        self.transitions.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.iter()
    }

    /// Sample up to `batch_size` distinct transitions.
    ///
    /// Uses the provided RNG seed for reproducibility.
    pub fn sample_batch(&self, batch_size: usize, seed: u64) -> Vec<Transition> {
        let n = self.transitions.len();
        if n == 0 || batch_size == 0 {
            return vec![];
        }

        let mut rng = GameRng::new(seed);

        // Partial Fisher-Yates over the first `limit` slots
        let mut indices: Vec<usize> = (0..n).collect();
        let limit = batch_size.min(n);
        for i in 0..limit {
            let j = i + rng.gen_range_usize(0..n - i);
            indices.swap(i, j);
        }

        indices[..limit]
            .iter()
            .map(|&i| self.transitions[i].clone())
            .collect()
    }
}

impl Default for ReplayBuffer {
    fn default() -> Self {
        Self::new(100_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transition(player: u8, reward: f32) -> Transition {
        Transition {
            state: EncodedState::new(vec![1.0; 24]),
            action: Action::Roll,
            reward,
            next_state: EncodedState::new(vec![2.0; 24]),
            done: false,
            player: PlayerId::new(player),
        }
    }

    #[test]
    fn test_finish_marks_last_terminal() {
        let mut episode = Episode::new(42);
        episode.push(transition(0, 0.5));
        episode.push(transition(1, 0.2));
        episode.finish(vec![100, 250]);

        let last = episode.transitions.last().unwrap();
        assert!(last.done);
        assert_eq!(last.reward, 0.5);
        assert!(last.next_state.tensor.iter().all(|&v| v == 0.0));
        assert_eq!(last.next_state.len(), 24);

        assert!(!episode.transitions[0].done);
        assert_eq!(episode.transitions[0].reward, 0.5);
        assert_eq!(episode.mean_total(), 175.0);
    }

    #[test]
    fn test_finish_empty_episode() {
        let mut episode = Episode::new(1);
        episode.finish(vec![3]);
        assert!(episode.is_empty());
        assert_eq!(episode.totals, vec![3]);
    }

    #[test]
    fn test_player_transitions() {
        let mut episode = Episode::new(0);
        for i in 0..5u8 {
            episode.push(transition(i % 2, 0.0));
        }
        assert_eq!(episode.player_transitions(PlayerId::new(0)).count(), 3);
        assert_eq!(episode.player_transitions(PlayerId::new(1)).count(), 2);
    }

    #[test]
    fn test_buffer_evicts_oldest() {
        let mut buffer = ReplayBuffer::new(3);
        for i in 0..4 {
            buffer.push(transition(0, i as f32));
        }
        assert_eq!(buffer.len(), 3);
        let rewards: Vec<f32> = buffer.iter().map(|t| t.reward).collect();
        assert_eq!(rewards, vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_zero_capacity_buffer_stays_empty() {
        let mut buffer = ReplayBuffer::new(0);
        buffer.push(transition(0, 1.0));
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_sample_batch_is_distinct_and_seeded() {
        let mut buffer = ReplayBuffer::new(100);
        for i in 0..20 {
            buffer.push(transition(0, i as f32));
        }

        let batch = buffer.sample_batch(8, 123);
        assert_eq!(batch.len(), 8);
        let mut rewards: Vec<i32> = batch.iter().map(|t| t.reward as i32).collect();
        rewards.sort_unstable();
        rewards.dedup();
        assert_eq!(rewards.len(), 8);

        assert_eq!(batch, buffer.sample_batch(8, 123));
    }

    #[test]
    fn test_sample_batch_larger_than_available() {
        let mut buffer = ReplayBuffer::new(10);
        buffer.push(transition(0, 0.0));
        buffer.push(transition(1, 0.0));
        assert_eq!(buffer.sample_batch(100, 7).len(), 2);
        assert!(ReplayBuffer::default().sample_batch(4, 7).is_empty());
    }

    #[test]
    fn test_episode_serialization() {
        let mut episode = Episode::new(42);
        episode.push(transition(0, 0.1));
        episode.finish(vec![10]);

        let json = serde_json::to_string(&episode).unwrap();
        let deserialized: Episode = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, episode);
    }
}
