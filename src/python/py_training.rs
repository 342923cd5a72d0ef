//! Experience collection bindings for Python.

use numpy::{PyArray1, PyArray2, PyArrayMethods};
use pyo3::prelude::*;

use crate::core::GameConfig;
use crate::nn::{QAgent, STATE_WIDTH};
use crate::training::{Episode, EpisodeConfig, EpisodeRunner, ReplayBuffer, Transition};

use super::py_nn::PyQNetwork;

/// Python wrapper for Episode.
#[pyclass(name = "Episode")]
#[derive(Clone)]
pub struct PyEpisode(pub Episode);

#[pymethods]
impl PyEpisode {
    #[getter]
    fn totals(&self) -> Vec<u32> {
        self.0.totals.clone()
    }

    #[getter]
    fn seed(&self) -> u64 {
        self.0.seed
    }

    /// Rewards in play order.
    #[getter]
    fn rewards(&self) -> Vec<f32> {
        self.0.transitions.iter().map(|t| t.reward).collect()
    }

    /// Action indices in play order.
    #[getter]
    fn actions(&self) -> Vec<usize> {
        self.0.transitions.iter().map(Transition::action_index).collect()
    }

    fn mean_total(&self) -> f64 {
        self.0.mean_total()
    }

    fn __len__(&self) -> usize {
        self.0.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "Episode(steps={}, totals={:?}, seed={})",
            self.0.len(),
            self.0.totals,
            self.0.seed
        )
    }
}

/// Python wrapper for ReplayBuffer.
#[pyclass(name = "ReplayBuffer")]
pub struct PyReplayBuffer {
    inner: ReplayBuffer,
}

#[pymethods]
impl PyReplayBuffer {
    #[new]
    #[pyo3(signature = (capacity = 100_000))]
    fn new(capacity: usize) -> Self {
        Self {
            inner: ReplayBuffer::new(capacity),
        }
    }

    fn push_episode(&mut self, episode: &PyEpisode) {
        self.inner.extend_episode(episode.0.clone());
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    #[getter]
    fn capacity(&self) -> usize {
        self.inner.capacity()
    }

    fn clear(&mut self) {
        self.inner.clear();
    }

    /// Sample a batch as numpy arrays:
    /// - states: [N, state_dim] float32
    /// - actions: [N] int64
    /// - rewards: [N] float32
    /// - next_states: [N, state_dim] float32
    /// - dones: [N] bool
    #[allow(clippy::type_complexity)]
    fn sample_batch<'py>(
        &self,
        py: Python<'py>,
        batch_size: usize,
        seed: u64,
    ) -> PyResult<(
        Bound<'py, PyArray2<f32>>,
        Bound<'py, PyArray1<i64>>,
        Bound<'py, PyArray1<f32>>,
        Bound<'py, PyArray2<f32>>,
        Bound<'py, PyArray1<bool>>,
    )> {
        let batch = self.inner.sample_batch(batch_size, seed);
        let n = batch.len();
        let state_dim = batch.first().map_or(STATE_WIDTH, |t| t.state.len());

        let mut states = Vec::with_capacity(n * state_dim);
        let mut next_states = Vec::with_capacity(n * state_dim);
        let mut actions = Vec::with_capacity(n);
        let mut rewards = Vec::with_capacity(n);
        let mut dones = Vec::with_capacity(n);

        for (i, t) in batch.iter().enumerate() {
            if t.state.len() != state_dim || t.next_state.len() != state_dim {
                return Err(PyErr::new::<pyo3::exceptions::PyValueError, _>(format!(
                    "inconsistent state width at sample {i}: expected {state_dim}"
                )));
            }
            states.extend_from_slice(&t.state.tensor);
            next_states.extend_from_slice(&t.next_state.tensor);
            actions.push(t.action_index() as i64);
            rewards.push(t.reward);
            dones.push(t.done);
        }

        let states = PyArray1::from_vec_bound(py, states).reshape([n, state_dim])?;
        let next_states = PyArray1::from_vec_bound(py, next_states).reshape([n, state_dim])?;
        Ok((
            states,
            PyArray1::from_vec_bound(py, actions),
            PyArray1::from_vec_bound(py, rewards),
            next_states,
            PyArray1::from_vec_bound(py, dones),
        ))
    }

    fn __repr__(&self) -> String {
        format!(
            "ReplayBuffer(len={}, capacity={})",
            self.inner.len(),
            self.inner.capacity()
        )
    }
}

/// Python wrapper for EpisodeRunner driven by a Python Q-network.
#[pyclass(name = "EpisodeRunner")]
pub struct PyEpisodeRunner {
    inner: EpisodeRunner<PyQNetwork>,
}

#[pymethods]
impl PyEpisodeRunner {
    #[new]
    #[pyo3(signature = (
        network,
        player_count = 2,
        rounds = 11,
        max_steps = 1000,
        seed_offset = 0,
        eps_start = 1.0,
        eps_end = 0.05,
        eps_decay = 0.9995
    ))]
    #[allow(clippy::too_many_arguments)]
    fn new(
        py: Python<'_>,
        network: &PyQNetwork,
        player_count: usize,
        rounds: usize,
        max_steps: usize,
        seed_offset: u64,
        eps_start: f64,
        eps_end: f64,
        eps_decay: f64,
    ) -> PyResult<Self> {
        let game = GameConfig::new().with_rounds(rounds);
        game.validate()?;
        let config = EpisodeConfig::new()
            .with_player_count(player_count)
            .with_game(game)
            .with_max_steps(max_steps)
            .with_seed_offset(seed_offset)
            .with_epsilon(eps_start, eps_end, eps_decay);
        Ok(Self {
            inner: EpisodeRunner::new(QAgent::new(network.clone_ref(py)), config),
        })
    }

    fn play_episode(&self, seed: u64, epsilon: f64) -> PyResult<PyEpisode> {
        Ok(PyEpisode(self.inner.play_episode(seed, epsilon)?))
    }

    /// Play episodes on the epsilon schedule into `buffer`; returns mean totals.
    fn collect(&self, episodes: usize, buffer: &mut PyReplayBuffer) -> PyResult<Vec<f64>> {
        Ok(self.inner.collect(episodes, &mut buffer.inner)?)
    }

    fn evaluate(&self, episodes: usize) -> PyResult<f64> {
        Ok(self.inner.evaluate(episodes)?)
    }

    fn epsilon_at(&self, episode: u32) -> f64 {
        self.inner.config().epsilon_at(episode)
    }
}
