//! Episode loop for collecting experience.
//!
//! Plays full matches with a `QAgent` controlling every seat and records
//! shaped transitions for an external trainer.

use tracing::debug;

use crate::core::{Action, GameConfig, GameRng, Result};
use crate::games::GeneralaGame;
use crate::nn::{QAgent, QNetwork, StateEncoder};
use crate::rules::Outcome;

use super::trajectory::{Episode, ReplayBuffer, Transition, POINTS_SCALE};

/// Configuration for experience collection.
#[derive(Clone, Debug)]
pub struct EpisodeConfig {
    /// Exploration rate of the first episode.
    pub eps_start: f64,

    /// Floor the exploration rate decays towards.
    pub eps_end: f64,

    /// Per-episode multiplicative decay of `eps_start - eps_end`.
    pub eps_decay: f64,

    /// Maximum actions per episode (guards against agents that never score).
    pub max_steps: usize,

    /// Seed offset for RNG (combined with episode index for unique seeds).
    pub seed_offset: u64,

    /// Seats in each match, all driven by the same agent.
    pub player_count: usize,

    /// Rounds and scoring of each match. Its seed is replaced per episode.
    pub game: GameConfig,
}

impl Default for EpisodeConfig {
    fn default() -> Self {
        Self {
            eps_start: 1.0,
            eps_end: 0.05,
            eps_decay: 0.9995,
            max_steps: 1000,
            seed_offset: 0,
            player_count: 2,
            game: GameConfig::default(),
        }
    }
}

impl EpisodeConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the epsilon schedule.
    pub fn with_epsilon(mut self, start: f64, end: f64, decay: f64) -> Self {
        self.eps_start = start;
        self.eps_end = end;
        self.eps_decay = decay;
        self
    }

    pub fn with_max_steps(mut self, max: usize) -> Self {
        self.max_steps = max;
        self
    }

    pub fn with_seed_offset(mut self, offset: u64) -> Self {
        self.seed_offset = offset;
        self
    }

    pub fn with_player_count(mut self, count: usize) -> Self {
        self.player_count = count;
        self
    }

    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    /// Exploration rate for a given episode number:
    /// `eps_end + (eps_start - eps_end) * eps_decay^episode`.
    pub fn epsilon_at(&self, episode: u32) -> f64 {
        let decay = self.eps_decay.powi(episode.min(i32::MAX as u32) as i32);
        self.eps_end + (self.eps_start - self.eps_end) * decay
    }

    /// Seed for the `index`-th episode.
    pub fn episode_seed(&self, index: usize) -> u64 {
        self.seed_offset.wrapping_add(index as u64)
    }

    /// Default seat names: "P1", "P2", ...
    pub fn player_names(&self) -> Vec<String> {
        (1..=self.player_count).map(|i| format!("P{i}")).collect()
    }
}

/// Plays matches with one agent and records transitions.
pub struct EpisodeRunner<N: QNetwork> {
    agent: QAgent<N>,
    config: EpisodeConfig,
}

impl<N: QNetwork> EpisodeRunner<N> {
    pub fn new(agent: QAgent<N>, config: EpisodeConfig) -> Self {
        Self { agent, config }
    }

    /// Play one match seeded with `seed`, exploring at rate `epsilon`.
    ///
    /// Rewards: a SCORE step earns its recorded points over 50, other steps
    /// earn 0, and the final transition is made terminal.
    pub fn play_episode(&self, seed: u64, epsilon: f64) -> Result<Episode> {
        let config = self.config.game.clone().with_seed(seed);
        let mut game = GeneralaGame::with_config(self.config.player_names(), config)?;
        let mut rng = GameRng::new(seed).fork();
        let encoder = self.agent.encoder();
        let mut episode = Episode::new(seed);

        game.start_turn()?;
        for _ in 0..self.config.max_steps {
            if game.is_finished() {
                break;
            }
            let view = game.view();
            let state = encoder.encode(&view);
            let player = view.current_player;
            let Some(action) = self.agent.act(&view, epsilon, &mut rng) else {
                break;
            };

            let reward = match game.apply_action(action)? {
                Some(outcome) => scaled_reward(outcome, &game),
                None => 0.0,
            };
            let next_state = encoder.encode(&game.view());
            episode.push(Transition {
                state,
                action,
                reward,
                next_state,
                done: false,
                player,
            });

            if matches!(action, Action::Score(_)) {
                game.next_player()?;
            }
        }

        episode.finish(game.totals());
        debug!(
            seed,
            epsilon,
            steps = episode.len(),
            finished = game.is_finished(),
            totals = ?episode.totals,
            "episode complete"
        );
        Ok(episode)
    }

    /// Play `episodes` matches on the epsilon schedule, pushing every
    /// transition into `buffer`. Returns the mean final total per episode.
    pub fn collect(&self, episodes: usize, buffer: &mut ReplayBuffer) -> Result<Vec<f64>> {
        let mut means = Vec::with_capacity(episodes);
        for index in 0..episodes {
            let epsilon = self.config.epsilon_at(index.min(u32::MAX as usize) as u32);
            let episode = self.play_episode(self.config.episode_seed(index), epsilon)?;
            means.push(episode.mean_total());
            buffer.extend_episode(episode);
        }
        Ok(means)
    }

    /// Mean final total (averaged over seats) across `episodes` greedy matches.
    pub fn evaluate(&self, episodes: usize) -> Result<f64> {
        if episodes == 0 {
            return Ok(0.0);
        }
        let mut sum = 0.0;
        for index in 0..episodes {
            sum += self.play_episode(self.config.episode_seed(index), 0.0)?.mean_total();
        }
        Ok(sum / episodes as f64)
    }

    #[must_use]
    pub fn agent(&self) -> &QAgent<N> {
        &self.agent
    }

    #[must_use]
    pub fn config(&self) -> &EpisodeConfig {
        &self.config
    }
}

fn scaled_reward(outcome: Outcome, game: &GeneralaGame) -> f32 {
    outcome.recorded_points(game.rules().table()) as f32 / POINTS_SCALE
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nn::{GreedyQ, ZeroQ};

    #[test]
    fn test_epsilon_schedule() {
        let config = EpisodeConfig::default();
        assert_eq!(config.epsilon_at(0), 1.0);
        assert!(config.epsilon_at(1000) < config.epsilon_at(10));
        assert!(config.epsilon_at(1_000_000) >= 0.05);
        assert!((config.epsilon_at(1_000_000) - 0.05).abs() < 1e-9);
    }

    #[test]
    fn test_player_names() {
        let config = EpisodeConfig::new().with_player_count(3);
        assert_eq!(config.player_names(), vec!["P1", "P2", "P3"]);
    }

    #[test]
    fn test_random_episode_completes() {
        let runner = EpisodeRunner::new(QAgent::new(ZeroQ), EpisodeConfig::default());
        let episode = runner.play_episode(7, 1.0).unwrap();

        assert!(!episode.is_empty());
        let last = episode.transitions.last().unwrap();
        assert!(last.done);
        assert_eq!(episode.transitions.iter().filter(|t| t.done).count(), 1);
        assert_eq!(episode.totals.len(), 2);
    }

    #[test]
    fn test_episode_is_reproducible() {
        let runner = EpisodeRunner::new(QAgent::new(ZeroQ), EpisodeConfig::default());
        assert_eq!(runner.play_episode(3, 0.5).unwrap(), runner.play_episode(3, 0.5).unwrap());
    }

    #[test]
    fn test_greedy_scores_every_turn() {
        let config = EpisodeConfig::new()
            .with_player_count(1)
            .with_game(GameConfig::new().with_rounds(3));
        let runner = EpisodeRunner::new(QAgent::new(GreedyQ::default()), config);
        let episode = runner.play_episode(11, 0.0).unwrap();

        // GreedyQ values rolls at 0 and every upper category pays at least
        // its face once, so the first scoring option is taken immediately.
        assert!(episode.len() <= 3);
        assert!(episode
            .transitions
            .iter()
            .all(|t| matches!(t.action, Action::Score(_))));
    }

    #[test]
    fn test_max_steps_cuts_episode() {
        let config = EpisodeConfig::new().with_max_steps(2);
        let runner = EpisodeRunner::new(QAgent::new(ZeroQ), config);
        let episode = runner.play_episode(1, 1.0).unwrap();
        assert_eq!(episode.len(), 2);
        assert!(episode.transitions[1].done);
    }

    #[test]
    fn test_collect_fills_buffer() {
        let config = EpisodeConfig::new()
            .with_game(GameConfig::new().with_rounds(2))
            .with_seed_offset(100);
        let runner = EpisodeRunner::new(QAgent::new(ZeroQ), config);
        let mut buffer = ReplayBuffer::new(10_000);

        let means = runner.collect(3, &mut buffer).unwrap();
        assert_eq!(means.len(), 3);
        assert!(!buffer.is_empty());
        assert_eq!(buffer.iter().filter(|t| t.done).count(), 3);
    }

    #[test]
    fn test_evaluate_is_non_negative() {
        let config = EpisodeConfig::new().with_game(GameConfig::new().with_rounds(2));
        let runner = EpisodeRunner::new(QAgent::new(GreedyQ::default()), config);
        assert!(runner.evaluate(3).unwrap() > 0.0);
        assert_eq!(runner.evaluate(0).unwrap(), 0.0);
    }
}
