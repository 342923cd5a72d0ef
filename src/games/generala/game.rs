//! Match state machine: turns, rolls, scoring and rounds.
//!
//! ```text
//! not started --start_turn--> rolling(1) --roll--> rolling(2) --roll--> rolling(3)
//!                                  \______________ score ______________/
//!                                                   |
//!                     next_player (starts next turn) | first-roll generala
//!                                                   v
//!                                               finished
//! ```

use tracing::{debug, info};

use crate::core::{
    Action, Category, DiceSource, DiceVec, GameConfig, GameRng, GeneralaError, PlayerId, PlayerMap,
    Result, NUM_CATEGORIES,
};
use crate::rules::{validate_held_subset, validate_player_names, GeneralaRules, Outcome, ScoreBoard, MAX_ROLLS};

/// A Generala match between one or more players.
///
/// Owns the dice source; every die drawn during the match comes from it.
#[derive(Clone, Debug)]
pub struct GeneralaGame<S: DiceSource = GameRng> {
    pub(super) names: Vec<String>,
    pub(super) scoreboards: PlayerMap<ScoreBoard>,
    pub(super) current_player: PlayerId,
    pub(super) round: usize,
    pub(super) dice: DiceVec,
    pub(super) held: DiceVec,
    pub(super) roll_number: u8,
    pub(super) scored: bool,
    pub(super) finished: bool,
    pub(super) config: GameConfig,
    pub(super) rules: GeneralaRules,
    pub(super) source: S,
}

/// Final (or current) ranking of a match.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Standings {
    /// Names of every player tied at the highest total, in seat order.
    pub winners: Vec<String>,
    /// Seats of the winners.
    pub winner_ids: Vec<PlayerId>,
    /// Scoreboard total per player, in seat order.
    pub totals: Vec<u32>,
}

impl Standings {
    /// More than one player shares the top total.
    #[must_use]
    pub fn is_tie(&self) -> bool {
        self.winners.len() > 1
    }
}

/// Read-only view of the state an agent may observe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GameView<'a> {
    pub dice: &'a [u8],
    pub held: &'a [u8],
    pub roll_number: u8,
    /// The current turn has already recorded a score.
    pub scored: bool,
    pub current_player: PlayerId,
    /// Filled flags of the current player's scoreboard.
    pub filled: [bool; NUM_CATEGORIES],
    pub finished: bool,
}

impl GameView<'_> {
    #[must_use]
    pub fn can_score(&self) -> bool {
        self.roll_number >= 1
    }

    #[must_use]
    pub fn rolls_left(&self) -> u8 {
        MAX_ROLLS.saturating_sub(self.roll_number)
    }
}

impl GeneralaGame<GameRng> {
    /// New match with the default configuration.
    pub fn new<I, N>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Self::with_config(names, GameConfig::default())
    }

    /// New match whose dice come from a `GameRng` seeded by `config.seed`.
    pub fn with_config<I, N>(names: I, config: GameConfig) -> Result<Self>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let rng = GameRng::new(config.seed);
        Self::with_source(names, config, rng)
    }
}

impl<S: DiceSource> GeneralaGame<S> {
    /// New match drawing dice from `source`.
    ///
    /// Fails with `InvalidInput` for an empty roster, a blank name or an
    /// out-of-range round count. No turn is started.
    pub fn with_source<I, N>(names: I, config: GameConfig, source: S) -> Result<Self>
    where
        I: IntoIterator<Item = N>,
        N: Into<String>,
    {
        let names: Vec<String> = names.into_iter().map(Into::into).collect();
        validate_player_names(&names)?;
        config.validate()?;
        let scoreboards = PlayerMap::with_default(names.len())?;

        Ok(Self {
            names,
            scoreboards,
            current_player: PlayerId::default(),
            round: 0,
            dice: DiceVec::new(),
            held: DiceVec::new(),
            roll_number: 0,
            scored: false,
            finished: false,
            rules: GeneralaRules::new(config.scoring),
            config,
            source,
        })
    }

    // === Read state ===

    #[must_use]
    pub fn player_names(&self) -> &[String] {
        &self.names
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn scoreboards(&self) -> &[ScoreBoard] {
        self.scoreboards.as_slice()
    }

    #[must_use]
    pub fn scoreboard(&self, player: PlayerId) -> Option<&ScoreBoard> {
        self.scoreboards.get(player)
    }

    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.current_player
    }

    /// Name of the player whose turn it is.
    #[must_use]
    pub fn current_name(&self) -> &str {
        &self.names[self.current_player.index()]
    }

    /// Completed rounds (0-based index of the round in progress).
    #[must_use]
    pub fn round(&self) -> usize {
        self.round
    }

    /// Rounds in this match.
    #[must_use]
    pub fn rounds(&self) -> usize {
        self.config.rounds
    }

    /// Current dice; empty before the first turn starts.
    #[must_use]
    pub fn dice(&self) -> &[u8] {
        &self.dice
    }

    /// Values kept by the latest roll of this turn.
    #[must_use]
    pub fn held(&self) -> &[u8] {
        &self.held
    }

    /// Rolls taken this turn; 0 before any roll.
    #[must_use]
    pub fn roll_number(&self) -> u8 {
        self.roll_number
    }

    #[must_use]
    pub fn rolls_left(&self) -> u8 {
        MAX_ROLLS.saturating_sub(self.roll_number)
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// True once at least one roll has been made this turn.
    #[must_use]
    pub fn can_score(&self) -> bool {
        self.roll_number >= 1
    }

    /// True once the current turn has recorded a score.
    #[must_use]
    pub fn has_scored(&self) -> bool {
        self.scored
    }

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[must_use]
    pub fn rules(&self) -> &GeneralaRules {
        &self.rules
    }

    /// Observation for agents.
    #[must_use]
    pub fn view(&self) -> GameView<'_> {
        GameView {
            dice: &self.dice,
            held: &self.held,
            roll_number: self.roll_number,
            scored: self.scored,
            current_player: self.current_player,
            filled: self.scoreboards[self.current_player].filled_mask(),
            finished: self.finished,
        }
    }

    // === Transitions ===

    /// Roll a fresh hand for the current player and reset the roll counter.
    pub fn start_turn(&mut self) -> Result<&[u8]> {
        if self.finished {
            return Err(GeneralaError::GameOver);
        }
        self.dice = self.rules.roll_dice(&[], &mut self.source)?;
        self.held.clear();
        self.roll_number = 1;
        self.scored = false;
        debug!(
            player = self.current_player.index(),
            round = self.round,
            dice = ?self.dice.as_slice(),
            "turn started"
        );
        Ok(&self.dice)
    }

    /// Keep `held` and re-roll the other dice.
    ///
    /// `held` lists values, not positions, and must be drawn from the current
    /// dice. Before the first roll of a turn the dice are empty, so only an
    /// empty hold is accepted and the roll deals a full hand.
    pub fn roll(&mut self, held: &[u8]) -> Result<&[u8]> {
        if self.finished {
            return Err(GeneralaError::GameOver);
        }
        if self.roll_number >= MAX_ROLLS {
            return Err(GeneralaError::NoRollsLeft {
                max_rolls: MAX_ROLLS,
            });
        }
        validate_held_subset(held, &self.dice)?;

        self.dice = self.rules.roll_dice(held, &mut self.source)?;
        self.held = held.iter().copied().collect();
        self.roll_number += 1;
        debug!(
            player = self.current_player.index(),
            roll_number = self.roll_number,
            held = ?held,
            dice = ?self.dice.as_slice(),
            "rolled"
        );
        Ok(&self.dice)
    }

    /// Score the current dice in `category` for the current player.
    ///
    /// One score per turn; a second attempt fails with `CannotScore` until
    /// `next_player` starts the next turn. A first-roll generala records its
    /// points, ends the match at once and returns `Outcome::ImmediateWin`.
    pub fn score(&mut self, category: Category) -> Result<Outcome> {
        if self.finished {
            return Err(GeneralaError::GameOver);
        }
        if !self.can_score() || self.scored {
            return Err(GeneralaError::CannotScore);
        }
        let board = &self.scoreboards[self.current_player];
        if board.is_filled(category) {
            return Err(GeneralaError::AlreadyScored { category });
        }

        let outcome = self
            .rules
            .score_category(category, &self.dice, self.roll_number)?;
        let points = outcome.recorded_points(self.rules.table());
        self.scoreboards[self.current_player].set_score(category, points)?;
        self.scored = true;
        debug!(
            player = self.current_player.index(),
            %category,
            points,
            roll_number = self.roll_number,
            "scored"
        );

        if outcome.is_win() {
            self.finished = true;
            info!(
                player = self.current_player.index(),
                name = %self.current_name(),
                "generala on the first roll, match over"
            );
        }
        Ok(outcome)
    }

    /// Pass the turn to the next player and start their turn.
    ///
    /// The round counter increments when play wraps back to seat 0; the match
    /// finishes once every round has been played. Does nothing once finished.
    pub fn next_player(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }

        self.current_player = self.current_player.next(self.player_count());
        if self.current_player.index() == 0 {
            self.round += 1;
        }

        if self.round >= self.config.rounds {
            self.finished = true;
            self.dice.clear();
            self.held.clear();
            self.roll_number = 0;
            self.scored = false;
            let totals = self.totals();
            info!(rounds = self.round, ?totals, "match over");
            return Ok(());
        }

        self.start_turn()?;
        Ok(())
    }

    /// Apply an action from the fixed action space.
    ///
    /// Returns the scoring outcome for `Score` actions and `None` for rolls.
    pub fn apply_action(&mut self, action: Action) -> Result<Option<Outcome>> {
        match action {
            Action::Roll => self.roll(&[]).map(|_| None),
            Action::Hold(mask) => {
                let held = Action::held_values(mask, &self.dice);
                self.roll(&held).map(|_| None)
            }
            Action::Score(category) => self.score(category).map(Some),
        }
    }

    /// Scoreboard totals in seat order.
    #[must_use]
    pub fn totals(&self) -> Vec<u32> {
        self.scoreboards.as_slice().iter().map(ScoreBoard::total).collect()
    }

    /// Players tied at the highest total. Ties yield several winners.
    #[must_use]
    pub fn get_winner(&self) -> Standings {
        let totals = self.totals();
        let best = totals.iter().copied().max().unwrap_or(0);
        let winner_ids: Vec<PlayerId> = self
            .scoreboards
            .iter()
            .filter(|(_, board)| board.total() == best)
            .map(|(p, _)| p)
            .collect();
        let winners = winner_ids
            .iter()
            .map(|p| self.names[p.index()].clone())
            .collect();

        Standings {
            winners,
            winner_ids,
            totals,
        }
    }
}
