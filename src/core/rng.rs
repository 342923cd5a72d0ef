//! Dice sources: seedable RNG and scripted faces for tests.
//!
//! ## Key Features
//!
//! - **Injectable**: the game draws every die through the `DiceSource` trait
//! - **Deterministic**: same seed produces identical rolls
//! - **Forkable**: independent per-episode streams for data collection
//! - **Serializable**: O(1) state capture and restore
//!
//! ```
//! use generala::core::{DiceSource, GameRng};
//!
//! let mut a = GameRng::new(7);
//! let mut b = GameRng::new(7);
//! assert_eq!(a.roll_die(), b.roll_die());
//! ```

use std::collections::VecDeque;

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Number of faces on a die.
pub const FACES: u8 = 6;

/// Source of die faces in `1..=6`.
pub trait DiceSource {
    /// Draw one die.
    fn roll_die(&mut self) -> u8;
}

/// Deterministic RNG backed by ChaCha8.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
    fork_counter: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
            fork_counter: 0,
        }
    }

    /// Seed this RNG was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Fork this RNG to create an independent branch.
    ///
    /// Each fork produces a different but deterministic sequence.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        self.fork_counter += 1;
        let fork_seed = self.seed.wrapping_add(self.fork_counter.wrapping_mul(0x9E3779B97F4A7C15));
        Self::new(fork_seed)
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Uniform float in `[0, 1)`.
    pub fn gen_unit(&mut self) -> f64 {
        self.inner.gen::<f64>()
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
            fork_counter: self.fork_counter,
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
            fork_counter: state.fork_counter,
        }
    }
}

impl DiceSource for GameRng {
    fn roll_die(&mut self) -> u8 {
        self.inner.gen_range(1..=FACES)
    }
}

/// Serializable RNG state for resuming a match.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many dice have been rolled.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
    /// Fork counter for deterministic branching
    pub fork_counter: u64,
}

/// Replays a fixed list of faces, cycling when exhausted.
///
/// An empty script behaves as an endless stream of ones.
#[derive(Clone, Debug, Default)]
pub struct ScriptedDice {
    faces: VecDeque<u8>,
    script: Vec<u8>,
}

impl ScriptedDice {
    /// Create a scripted source. Faces outside `1..=6` are clamped into range.
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        let script: Vec<u8> = faces.into_iter().map(|f| f.clamp(1, FACES)).collect();
        Self {
            faces: script.iter().copied().collect(),
            script,
        }
    }

    /// Always roll the same face.
    pub fn constant(face: u8) -> Self {
        Self::new([face])
    }

    /// Faces left before the script wraps around.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.faces.len()
    }
}

impl DiceSource for ScriptedDice {
    fn roll_die(&mut self) -> u8 {
        if self.faces.is_empty() {
            self.faces.extend(self.script.iter().copied());
        }
        self.faces.pop_front().unwrap_or(1)
    }
}

impl<S: DiceSource + ?Sized> DiceSource for &mut S {
    fn roll_die(&mut self) -> u8 {
        (**self).roll_die()
    }
}
