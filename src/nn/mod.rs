//! Learning-agent integration.
//!
//! The engine does no learning itself. It exposes a fixed contract that an
//! external trainer (usually Python, through the `python` feature) builds on:
//!
//! - **Encoding**: `StateEncoder` and the 24-feature `GeneralaEncoder`
//! - **Masks**: legality of each of the 44 action indices
//! - **Q-values**: the `QNetwork` trait, with `ZeroQ` and `GreedyQ` baselines
//! - **Acting**: `QAgent`, epsilon-greedy over masked Q-values
//!
//! ```rust,ignore
//! use generala::nn::{GreedyQ, QAgent};
//!
//! let agent = QAgent::new(GreedyQ::default());
//! let action = agent.act(&game.view(), 0.1, &mut rng);
//! ```

pub mod agent;
pub mod encoder;
pub mod traits;

pub use agent::QAgent;
pub use encoder::{
    GeneralaEncoder, StateEncoder, CATEGORY_OFFSET, DICE_OFFSET, HELD_OFFSET, ROLL_OFFSET,
    STATE_WIDTH,
};
pub use traits::{EncodedState, GreedyQ, QNetwork, ZeroQ};
