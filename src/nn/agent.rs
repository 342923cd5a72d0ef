//! Epsilon-greedy action selection over masked Q-values.

use crate::core::{Action, GameRng};
use crate::games::GameView;

use super::encoder::{GeneralaEncoder, StateEncoder};
use super::traits::QNetwork;

/// Picks actions for whichever player is to move.
pub struct QAgent<N: QNetwork> {
    network: N,
    encoder: GeneralaEncoder,
}

impl<N: QNetwork> QAgent<N> {
    pub fn new(network: N) -> Self {
        Self {
            network,
            encoder: GeneralaEncoder,
        }
    }

    #[must_use]
    pub fn network(&self) -> &N {
        &self.network
    }

    #[must_use]
    pub fn encoder(&self) -> &GeneralaEncoder {
        &self.encoder
    }

    /// With probability `epsilon`, a uniformly random legal action;
    /// otherwise the legal action with the highest Q-value (lowest index on
    /// ties). `None` when nothing is legal.
    pub fn act(&self, view: &GameView<'_>, epsilon: f64, rng: &mut GameRng) -> Option<Action> {
        let mask = self.encoder.action_mask(view);
        let legal: Vec<usize> = (0..mask.len()).filter(|&i| mask[i]).collect();
        if legal.is_empty() {
            return None;
        }

        let index = if rng.gen_unit() < epsilon {
            *rng.choose(&legal)?
        } else {
            let q = self.network.q_values(&self.encoder.encode(view));
            let mut best = legal[0];
            let mut best_value = f32::NEG_INFINITY;
            for &i in &legal {
                let value = q.get(i).copied().unwrap_or(f32::NEG_INFINITY);
                if value > best_value {
                    best = i;
                    best_value = value;
                }
            }
            best
        };
        Action::from_index(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Category, PlayerId, NUM_CATEGORIES, SCORE_OFFSET};
    use crate::nn::{EncodedState, GreedyQ, ZeroQ};

    struct Fixed(Vec<f32>);

    impl QNetwork for Fixed {
        fn q_values(&self, _encoded: &EncodedState) -> Vec<f32> {
            self.0.clone()
        }
    }

    fn view<'a>(dice: &'a [u8], roll_number: u8) -> GameView<'a> {
        GameView {
            dice,
            held: &[],
            roll_number,
            scored: false,
            current_player: PlayerId(0),
            filled: [false; NUM_CATEGORIES],
            finished: false,
        }
    }

    #[test]
    fn test_greedy_skips_masked_actions() {
        // Highest raw value sits on ROLL, which is illegal on the third roll.
        let mut q = vec![0.0; 44];
        q[0] = 100.0;
        q[SCORE_OFFSET + Category::Fives.index()] = 3.0;
        let agent = QAgent::new(Fixed(q));
        let mut rng = GameRng::new(1);

        let action = agent.act(&view(&[5, 5, 1, 2, 3], 3), 0.0, &mut rng);
        assert_eq!(action, Some(Action::Score(Category::Fives)));
    }

    #[test]
    fn test_greedy_q_agent_takes_generala() {
        let agent = QAgent::new(GreedyQ::default());
        let mut rng = GameRng::new(1);
        let action = agent.act(&view(&[6; 5], 1), 0.0, &mut rng);
        assert_eq!(action, Some(Action::Score(Category::Generala)));
    }

    #[test]
    fn test_exploration_stays_legal() {
        let agent = QAgent::new(ZeroQ);
        let mut rng = GameRng::new(9);
        let v = view(&[1, 2, 3, 4, 6], 3);
        let mask = agent.encoder().action_mask(&v);

        for _ in 0..200 {
            let action = agent.act(&v, 1.0, &mut rng).unwrap();
            assert!(mask[action.to_index()]);
        }
    }

    #[test]
    fn test_no_action_when_finished() {
        let agent = QAgent::new(ZeroQ);
        let mut v = view(&[1, 2, 3, 4, 6], 1);
        v.finished = true;
        assert_eq!(agent.act(&v, 0.5, &mut GameRng::new(0)), None);
    }
}
