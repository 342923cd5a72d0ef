//! Python bindings for the Generala engine.
//!
//! Exposes the match state machine, the agent encoding and experience
//! collection so a Python-side trainer can drive the engine.
//!
//! # Quick Start
//!
//! ```python
//! import generala
//!
//! game = generala.GeneralaGame(["ana", "bo"], seed=7)
//! game.start_turn()
//! mask = game.action_mask()
//! game.apply_action(33)  # score ones
//! game.next_player()
//!
//! net = generala.QNetwork(lambda state: model(state.to_numpy()).tolist())
//! runner = generala.EpisodeRunner(net, player_count=2)
//! buffer = generala.ReplayBuffer(100_000)
//! runner.collect(100, buffer)
//! states, actions, rewards, next_states, dones = buffer.sample_batch(64, seed=0)
//! ```

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::core::GeneralaError;
use crate::games::SnapshotError;

mod py_game;
mod py_nn;
mod py_training;

pub use py_game::*;
pub use py_nn::*;
pub use py_training::*;

impl From<GeneralaError> for PyErr {
    fn from(err: GeneralaError) -> Self {
        PyErr::new::<PyValueError, _>(err.to_string())
    }
}

impl From<SnapshotError> for PyErr {
    fn from(err: SnapshotError) -> Self {
        PyErr::new::<PyValueError, _>(err.to_string())
    }
}

/// generala: Generala dice game engine for reinforcement learning.
#[pymodule]
fn generala(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add("ACTION_SPACE", crate::core::ACTION_SPACE)?;
    m.add("STATE_WIDTH", crate::nn::STATE_WIDTH)?;
    m.add("CATEGORIES", crate::core::Category::ALL.map(|c| c.name()).to_vec())?;

    // Game
    m.add_class::<PyGeneralaGame>()?;

    // Agent contract
    m.add_class::<PyEncodedState>()?;
    m.add_class::<PyEncoder>()?;
    m.add_class::<PyQNetwork>()?;

    // Experience collection
    m.add_class::<PyEpisode>()?;
    m.add_class::<PyReplayBuffer>()?;
    m.add_class::<PyEpisodeRunner>()?;

    Ok(())
}
