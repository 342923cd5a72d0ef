//! Experience collection for reinforcement learning.
//!
//! ## Overview
//!
//! - **Transition / Episode**: shaped rewards, terminal marking
//! - **ReplayBuffer**: bounded FIFO memory with seeded sampling
//! - **EpisodeRunner**: plays matches with a `QAgent` on an epsilon schedule
//!
//! The learning step itself (network updates) lives outside this crate.
//!
//! ```rust,ignore
//! use generala::nn::{QAgent, ZeroQ};
//! use generala::training::{EpisodeConfig, EpisodeRunner, ReplayBuffer};
//!
//! let runner = EpisodeRunner::new(QAgent::new(ZeroQ), EpisodeConfig::default());
//! let mut buffer = ReplayBuffer::new(100_000);
//! runner.collect(100, &mut buffer)?;
//! let batch = buffer.sample_batch(64, 0);
//! ```

pub mod episode;
pub mod trajectory;

pub use episode::{EpisodeConfig, EpisodeRunner};
pub use trajectory::{Episode, ReplayBuffer, Transition, POINTS_SCALE, TOTAL_SCALE};
