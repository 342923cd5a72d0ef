//! Game bindings for Python.

use pyo3::prelude::*;
use pyo3::types::PyBytes;

use crate::core::{Action, Category, GameConfig, GeneralaError, ScoringTable};
use crate::games::GeneralaGame;
use crate::nn::{GeneralaEncoder, StateEncoder};

use super::py_nn::PyEncodedState;

/// Python wrapper for GeneralaGame.
#[pyclass(name = "GeneralaGame")]
#[derive(Clone)]
pub struct PyGeneralaGame(pub GeneralaGame);

#[pymethods]
impl PyGeneralaGame {
    /// Create a new match.
    ///
    /// # Arguments
    /// - names: Player names in seat order
    /// - rounds: Rounds to play (1-11)
    /// - seed: RNG seed for the dice
    /// - reduced_scoring: Use the {20, 30, 40} combination values
    #[new]
    #[pyo3(signature = (names, rounds = 11, seed = 42, reduced_scoring = false))]
    fn new(names: Vec<String>, rounds: usize, seed: u64, reduced_scoring: bool) -> PyResult<Self> {
        let scoring = if reduced_scoring {
            ScoringTable::reduced()
        } else {
            ScoringTable::standard()
        };
        let config = GameConfig::new()
            .with_rounds(rounds)
            .with_scoring(scoring)
            .with_seed(seed);
        Ok(Self(GeneralaGame::with_config(names, config)?))
    }

    /// Roll a fresh hand for the current player.
    fn start_turn(&mut self) -> PyResult<Vec<u8>> {
        Ok(self.0.start_turn()?.to_vec())
    }

    /// Keep the listed values and re-roll the rest.
    #[pyo3(signature = (held = Vec::new()))]
    fn roll(&mut self, held: Vec<u8>) -> PyResult<Vec<u8>> {
        Ok(self.0.roll(&held)?.to_vec())
    }

    /// Score a category by name; returns (points recorded, immediate win).
    fn score(&mut self, category: &str) -> PyResult<(u32, bool)> {
        let category: Category = category.parse()?;
        let outcome = self.0.score(category)?;
        Ok((outcome.recorded_points(self.0.rules().table()), outcome.is_win()))
    }

    fn next_player(&mut self) -> PyResult<()> {
        Ok(self.0.next_player()?)
    }

    /// Apply an action-space index; returns the points recorded by a SCORE.
    fn apply_action(&mut self, index: usize) -> PyResult<Option<u32>> {
        let action = Action::from_index(index)
            .ok_or_else(|| GeneralaError::invalid(format!("action index {index} out of range")))?;
        let outcome = self.0.apply_action(action)?;
        Ok(outcome.map(|o| o.recorded_points(self.0.rules().table())))
    }

    /// Encode the state the current player sees.
    fn encode(&self) -> PyEncodedState {
        PyEncodedState(GeneralaEncoder.encode(&self.0.view()))
    }

    /// Legal action indices as booleans.
    fn action_mask(&self) -> Vec<bool> {
        GeneralaEncoder.action_mask(&self.0.view())
    }

    /// (winner names, totals in seat order).
    fn get_winner(&self) -> (Vec<String>, Vec<u32>) {
        let standings = self.0.get_winner();
        (standings.winners, standings.totals)
    }

    /// Scores of one player as {category: points or None}.
    fn scoreboard(&self, player: usize) -> PyResult<Vec<(String, Option<u32>)>> {
        let board = self
            .0
            .scoreboards()
            .get(player)
            .ok_or_else(|| GeneralaError::invalid(format!("no player {player}")))?;
        Ok(board
            .iter()
            .map(|(c, v)| (c.name().to_string(), v))
            .collect())
    }

    fn totals(&self) -> Vec<u32> {
        self.0.totals()
    }

    #[getter]
    fn dice(&self) -> Vec<u8> {
        self.0.dice().to_vec()
    }

    #[getter]
    fn held(&self) -> Vec<u8> {
        self.0.held().to_vec()
    }

    #[getter]
    fn roll_number(&self) -> u8 {
        self.0.roll_number()
    }

    #[getter]
    fn current_player(&self) -> usize {
        self.0.current_player().index()
    }

    #[getter]
    fn round(&self) -> usize {
        self.0.round()
    }

    #[getter]
    fn finished(&self) -> bool {
        self.0.is_finished()
    }

    #[getter]
    fn player_names(&self) -> Vec<String> {
        self.0.player_names().to_vec()
    }

    fn can_score(&self) -> bool {
        self.0.can_score()
    }

    #[getter]
    fn has_scored(&self) -> bool {
        self.0.has_scored()
    }

    /// Serialize the match, dice stream included.
    fn to_bytes<'py>(&self, py: Python<'py>) -> PyResult<Bound<'py, PyBytes>> {
        let bytes = self.0.to_bytes()?;
        Ok(PyBytes::new_bound(py, &bytes))
    }

    #[staticmethod]
    fn from_bytes(bytes: &[u8]) -> PyResult<Self> {
        Ok(Self(GeneralaGame::from_bytes(bytes)?))
    }

    fn __repr__(&self) -> String {
        format!(
            "GeneralaGame(players={}, round={}/{}, current={}, roll={}, finished={})",
            self.0.player_count(),
            self.0.round(),
            self.0.rounds(),
            self.0.current_name(),
            self.0.roll_number(),
            self.0.is_finished()
        )
    }
}
