//! Dice generation and category scoring.
//!
//! `GeneralaRules` is pure apart from the dice source it is handed: the same
//! dice, roll number and table always produce the same `Outcome`.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::core::{Category, DiceSource, DiceVec, Result, ScoringTable, DICE_COUNT, FACES};

use super::scoreboard::ScoreBoard;
use super::validation::{validate_dice, validate_dice_count, validate_held, validate_roll_number};

/// Rolls allowed per turn.
pub const MAX_ROLLS: u8 = 3;

/// Result of scoring a category.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// Ordinary points.
    Points(u32),
    /// Generala on the first roll: the match ends and the scorer wins.
    ImmediateWin,
}

impl Outcome {
    /// Points recorded on the scoreboard for this outcome.
    #[must_use]
    pub fn recorded_points(self, table: &ScoringTable) -> u32 {
        match self {
            Outcome::Points(points) => points,
            Outcome::ImmediateWin => table.generala,
        }
    }

    /// Whether this outcome ends the match.
    #[must_use]
    pub fn is_win(self) -> bool {
        matches!(self, Outcome::ImmediateWin)
    }
}

/// Occurrences of each face; index 0 is unused.
#[must_use]
pub fn face_counts(dice: &[u8]) -> [u8; FACES as usize + 1] {
    let mut counts = [0u8; FACES as usize + 1];
    for &d in dice {
        if let Some(slot) = counts.get_mut(d as usize) {
            *slot += 1;
        }
    }
    counts
}

/// Scoring rules parameterised by a `ScoringTable`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralaRules {
    table: ScoringTable,
}

impl GeneralaRules {
    /// Rules using the given table.
    #[must_use]
    pub const fn new(table: ScoringTable) -> Self {
        Self { table }
    }

    /// The active scoring table.
    #[must_use]
    pub fn table(&self) -> &ScoringTable {
        &self.table
    }

    /// Keep `held` and draw fresh dice for the rest of the hand.
    ///
    /// Held values come first, in the order given. Fails with `InvalidInput`
    /// for more than five held values or a value outside `1..=6`; nothing is
    /// drawn in that case.
    pub fn roll_dice<S: DiceSource + ?Sized>(&self, held: &[u8], source: &mut S) -> Result<DiceVec> {
        validate_held(held)?;

        let mut dice: DiceVec = held.iter().copied().collect();
        while dice.len() < DICE_COUNT {
            dice.push(source.roll_die());
        }
        trace!(held = ?held, dice = ?dice.as_slice(), "rolled dice");
        Ok(dice)
    }

    /// Score `dice` in `category` on the given roll of the turn.
    ///
    /// Dice order never affects the result.
    pub fn score_category(&self, category: Category, dice: &[u8], roll_number: u8) -> Result<Outcome> {
        validate_dice_count(dice, DICE_COUNT)?;
        validate_dice(dice, false)?;
        validate_roll_number(roll_number, MAX_ROLLS)?;

        let counts = face_counts(dice);
        let first_roll = roll_number == 1;
        let bonus = if first_roll { self.table.first_roll_bonus } else { 0 };
        let five_of_a_kind = counts.contains(&5);

        let outcome = match category {
            Category::Ones
            | Category::Twos
            | Category::Threes
            | Category::Fours
            | Category::Fives
            | Category::Sixes => {
                let face = category.face().unwrap_or(0);
                Outcome::Points(u32::from(counts[face as usize]) * u32::from(face))
            }
            Category::Escalera => {
                let mut sorted: DiceVec = dice.iter().copied().collect();
                sorted.sort_unstable();
                let straight = matches!(sorted.as_slice(), [1, 2, 3, 4, 5] | [2, 3, 4, 5, 6]);
                Outcome::Points(if straight { self.table.straight + bonus } else { 0 })
            }
            Category::Full => {
                let mut sorted = counts;
                sorted.sort_unstable();
                // Two largest face counts.
                let full = sorted[FACES as usize - 1] == 2 && sorted[FACES as usize] == 3;
                Outcome::Points(if full { self.table.full_house + bonus } else { 0 })
            }
            Category::Poker => {
                let poker = counts.contains(&4);
                Outcome::Points(if poker { self.table.four_of_a_kind + bonus } else { 0 })
            }
            Category::Generala => match (five_of_a_kind, first_roll) {
                (true, true) => Outcome::ImmediateWin,
                (true, false) => Outcome::Points(self.table.generala),
                (false, _) => Outcome::Points(0),
            },
            Category::DoubleGenerala => {
                Outcome::Points(if five_of_a_kind { self.table.double_generala } else { 0 })
            }
        };
        Ok(outcome)
    }

    /// Outcome for every category still open on `board`, in declaration order.
    pub fn potential_scores(
        &self,
        dice: &[u8],
        roll_number: u8,
        board: &ScoreBoard,
    ) -> Result<Vec<(Category, Outcome)>> {
        board
            .available()
            .map(|category| Ok((category, self.score_category(category, dice, roll_number)?)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{GeneralaError, ScriptedDice};

    fn rules() -> GeneralaRules {
        GeneralaRules::default()
    }

    fn score(category: Category, dice: [u8; 5], roll: u8) -> Outcome {
        rules().score_category(category, &dice, roll).unwrap()
    }

    #[test]
    fn test_face_counts() {
        let counts = face_counts(&[1, 1, 6, 3, 1]);
        assert_eq!(counts, [0, 3, 0, 1, 0, 0, 1]);
    }

    #[test]
    fn test_upper_section() {
        assert_eq!(score(Category::Ones, [1, 1, 2, 3, 4], 1), Outcome::Points(2));
        assert_eq!(score(Category::Twos, [2, 2, 2, 5, 6], 2), Outcome::Points(6));
        assert_eq!(score(Category::Sixes, [6, 6, 6, 1, 2], 1), Outcome::Points(18));
        assert_eq!(score(Category::Fives, [1, 2, 3, 4, 6], 3), Outcome::Points(0));
    }

    #[test]
    fn test_combinations_with_bonus() {
        assert_eq!(score(Category::Escalera, [1, 2, 3, 4, 5], 1), Outcome::Points(30));
        assert_eq!(score(Category::Escalera, [6, 5, 4, 3, 2], 3), Outcome::Points(25));
        assert_eq!(score(Category::Escalera, [1, 2, 3, 4, 6], 1), Outcome::Points(0));
        assert_eq!(score(Category::Full, [2, 2, 3, 3, 3], 1), Outcome::Points(40));
        assert_eq!(score(Category::Full, [2, 2, 2, 3, 3], 2), Outcome::Points(35));
        assert_eq!(score(Category::Poker, [4, 4, 4, 4, 1], 1), Outcome::Points(50));
        assert_eq!(score(Category::Poker, [4, 4, 4, 4, 1], 2), Outcome::Points(45));
    }

    #[test]
    fn test_five_of_a_kind_is_not_full_or_poker() {
        assert_eq!(score(Category::Full, [3, 3, 3, 3, 3], 2), Outcome::Points(0));
        assert_eq!(score(Category::Poker, [3, 3, 3, 3, 3], 2), Outcome::Points(0));
    }

    #[test]
    fn test_generala() {
        assert_eq!(score(Category::Generala, [5, 5, 5, 5, 5], 1), Outcome::ImmediateWin);
        assert_eq!(score(Category::Generala, [5, 5, 5, 5, 5], 3), Outcome::Points(50));
        assert_eq!(score(Category::Generala, [1, 2, 3, 4, 5], 1), Outcome::Points(0));
        assert_eq!(score(Category::DoubleGenerala, [6, 6, 6, 6, 6], 1), Outcome::Points(100));
        assert_eq!(score(Category::DoubleGenerala, [1, 2, 3, 4, 5], 1), Outcome::Points(0));
    }

    #[test]
    fn test_reduced_table() {
        let rules = GeneralaRules::new(ScoringTable::reduced());
        assert_eq!(
            rules.score_category(Category::Full, &[2, 2, 3, 3, 3], 1),
            Ok(Outcome::Points(35))
        );
        assert_eq!(
            rules.score_category(Category::Escalera, &[1, 2, 3, 4, 5], 2),
            Ok(Outcome::Points(20))
        );
    }

    #[test]
    fn test_score_rejects_bad_input() {
        let r = rules();
        assert!(matches!(
            r.score_category(Category::Ones, &[1, 2, 3, 4], 1),
            Err(GeneralaError::InvalidInput { .. })
        ));
        assert!(r.score_category(Category::Ones, &[1, 2, 3, 4, 7], 1).is_err());
        assert!(r.score_category(Category::Ones, &[1, 2, 3, 4, 5], 0).is_err());
        assert!(r.score_category(Category::Ones, &[1, 2, 3, 4, 5], 4).is_err());
    }

    #[test]
    fn test_roll_dice_keeps_held_first() {
        let mut source = ScriptedDice::constant(6);
        let dice = rules().roll_dice(&[2, 3], &mut source).unwrap();
        assert_eq!(dice.as_slice(), &[2, 3, 6, 6, 6]);
    }

    #[test]
    fn test_roll_dice_rejects_bad_held() {
        let mut source = ScriptedDice::new([1, 2, 3, 4, 5]);
        assert!(rules().roll_dice(&[1, 1, 1, 1, 1, 1], &mut source).is_err());
        assert!(rules().roll_dice(&[0], &mut source).is_err());
        // Nothing was drawn by the failed calls.
        assert_eq!(source.remaining(), 5);
    }

    #[test]
    fn test_outcome_recorded_points() {
        let table = ScoringTable::standard();
        assert_eq!(Outcome::ImmediateWin.recorded_points(&table), 50);
        assert_eq!(Outcome::Points(12).recorded_points(&table), 12);
        assert!(Outcome::ImmediateWin.is_win());
    }

    #[test]
    fn test_potential_scores_skip_filled() {
        let mut board = ScoreBoard::new();
        board.set_score(Category::Ones, 0).unwrap();

        let scores = rules().potential_scores(&[2, 2, 3, 3, 3], 2, &board).unwrap();
        assert_eq!(scores.len(), 10);
        assert_eq!(scores[0], (Category::Twos, Outcome::Points(4)));
        assert!(scores.contains(&(Category::Full, Outcome::Points(35))));
    }
}
