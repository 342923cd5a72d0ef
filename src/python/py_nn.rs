//! Encoding and Q-network bindings for Python.

use numpy::PyArray1;
use pyo3::prelude::*;
use tracing::warn;

use crate::core::ACTION_SPACE;
use crate::nn::{EncodedState, GeneralaEncoder, QNetwork, StateEncoder};

use super::py_game::PyGeneralaGame;

/// Python wrapper for EncodedState.
#[pyclass(name = "EncodedState")]
#[derive(Clone, Debug)]
pub struct PyEncodedState(pub EncodedState);

#[pymethods]
impl PyEncodedState {
    #[new]
    fn new(tensor: Vec<f32>) -> Self {
        Self(EncodedState::new(tensor))
    }

    #[staticmethod]
    fn zeros(width: usize) -> Self {
        Self(EncodedState::zeros(width))
    }

    #[getter]
    fn tensor(&self) -> Vec<f32> {
        self.0.tensor.clone()
    }

    #[getter]
    fn shape(&self) -> Vec<usize> {
        self.0.shape.clone()
    }

    fn __len__(&self) -> usize {
        self.0.len()
    }

    /// Convert tensor to numpy array (flat).
    fn to_numpy<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<f32>> {
        PyArray1::from_slice_bound(py, &self.0.tensor)
    }

    fn get(&self, index: usize) -> Option<f32> {
        self.0.get(index)
    }

    fn __repr__(&self) -> String {
        format!("EncodedState(shape={:?})", self.0.shape)
    }
}

/// Python wrapper for the 24-feature encoder.
#[pyclass(name = "Encoder")]
#[derive(Clone, Default)]
pub struct PyEncoder(pub GeneralaEncoder);

#[pymethods]
impl PyEncoder {
    #[new]
    fn new() -> Self {
        Self::default()
    }

    fn encode(&self, game: &PyGeneralaGame) -> PyEncodedState {
        PyEncodedState(self.0.encode(&game.0.view()))
    }

    fn action_mask(&self, game: &PyGeneralaGame) -> Vec<bool> {
        self.0.action_mask(&game.0.view())
    }

    fn output_shape(&self) -> Vec<usize> {
        self.0.output_shape()
    }

    fn action_space_size(&self) -> usize {
        self.0.action_space_size()
    }
}

/// Python-implemented Q-network.
///
/// The callable receives an `EncodedState` and returns 44 floats.
#[pyclass(name = "QNetwork")]
pub struct PyQNetwork {
    callback: PyObject,
}

#[pymethods]
impl PyQNetwork {
    #[new]
    fn new(callback: PyObject) -> Self {
        Self { callback }
    }

    /// Call the network on an encoded state.
    fn q_values(&self, py: Python<'_>, encoded: &PyEncodedState) -> PyResult<Vec<f32>> {
        self.callback.call1(py, (encoded.clone(),))?.extract(py)
    }
}

impl PyQNetwork {
    /// Second handle on the same Python callable.
    pub(crate) fn clone_ref(&self, py: Python<'_>) -> Self {
        Self {
            callback: self.callback.clone_ref(py),
        }
    }
}

impl QNetwork for PyQNetwork {
    /// Falls back to all-zero values (uniform over legal actions) when the
    /// callable fails or returns the wrong width.
    fn q_values(&self, encoded: &EncodedState) -> Vec<f32> {
        Python::with_gil(|py| {
            let py_encoded = PyEncodedState(encoded.clone());
            let result = self
                .callback
                .call1(py, (py_encoded,))
                .and_then(|r| r.extract::<Vec<f32>>(py));
            match result {
                Ok(q) if q.len() == ACTION_SPACE => q,
                Ok(q) => {
                    warn!(got = q.len(), expected = ACTION_SPACE, "q-network returned wrong width");
                    vec![0.0; ACTION_SPACE]
                }
                Err(e) => {
                    warn!(error = %e, "q-network call failed");
                    vec![0.0; ACTION_SPACE]
                }
            }
        })
    }
}
