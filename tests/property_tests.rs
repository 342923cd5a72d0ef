//! Property-based tests for scoring, rolling and the action codec.

use proptest::prelude::*;

use generala::core::{Action, GameRng, ScriptedDice, ACTION_SPACE};
use generala::{Category, GameConfig, GeneralaError, GeneralaGame, GeneralaRules, Outcome, ScoreBoard};

const UPPER: [Category; 6] = [
    Category::Ones,
    Category::Twos,
    Category::Threes,
    Category::Fours,
    Category::Fives,
    Category::Sixes,
];

/// Strategy: a valid hand (each die 1-6).
fn dice_strategy() -> impl Strategy<Value = [u8; 5]> {
    prop::array::uniform5(1..=6u8)
}

fn category_strategy() -> impl Strategy<Value = Category> {
    (0..Category::ALL.len()).prop_map(|i| Category::ALL[i])
}

fn points(outcome: Outcome) -> u32 {
    match outcome {
        Outcome::Points(p) => p,
        Outcome::ImmediateWin => 50,
    }
}

proptest! {
    // Upper section always sums to the dice total.
    #[test]
    fn upper_section_sums_dice(dice in dice_strategy(), roll in 1..=3u8) {
        let rules = GeneralaRules::default();
        let upper: u32 = UPPER
            .iter()
            .map(|&c| points(rules.score_category(c, &dice, roll).unwrap()))
            .sum();
        let sum: u32 = dice.iter().map(|&d| u32::from(d)).sum();
        prop_assert_eq!(upper, sum);
    }

    // Dice order never changes the result.
    #[test]
    fn score_is_permutation_invariant(
        dice in dice_strategy(),
        cat in category_strategy(),
        roll in 1..=3u8,
        rotation in 0..5usize,
    ) {
        let rules = GeneralaRules::default();
        let mut shuffled = dice;
        shuffled.rotate_left(rotation);
        shuffled.swap(0, 4);
        prop_assert_eq!(
            rules.score_category(cat, &dice, roll),
            rules.score_category(cat, &shuffled, roll)
        );
    }

    // Holding five values draws nothing.
    #[test]
    fn hold_five_returns_held(held in dice_strategy(), seed in any::<u64>()) {
        let mut rng = GameRng::new(seed);
        let rolled = GeneralaRules::default().roll_dice(&held, &mut rng).unwrap();
        prop_assert_eq!(rolled.as_slice(), &held[..]);
    }

    // Rolled hands always have five faces in range, held values first.
    #[test]
    fn roll_keeps_held_prefix(held in prop::collection::vec(1..=6u8, 0..=5), seed in any::<u64>()) {
        let mut rng = GameRng::new(seed);
        let rolled = GeneralaRules::default().roll_dice(&held, &mut rng).unwrap();
        prop_assert_eq!(rolled.len(), 5);
        prop_assert_eq!(&rolled[..held.len()], held.as_slice());
        prop_assert!(rolled.iter().all(|d| (1..=6).contains(d)));
    }

    // Refilling any category fails however many were filled before.
    #[test]
    fn refill_always_fails(fills in prop::collection::vec(0..11usize, 0..11), value in 0..100u32) {
        let mut board = ScoreBoard::new();
        for &i in &fills {
            let _ = board.set_score(Category::ALL[i], value);
        }
        for &i in &fills {
            let category = Category::ALL[i];
            prop_assert_eq!(
                board.set_score(category, value),
                Err(GeneralaError::AlreadyScored { category })
            );
        }
        let filled: u32 = board.iter().filter_map(|(_, v)| v).sum();
        prop_assert_eq!(board.total(), filled);
    }

    // Index codec is a bijection over the action space.
    #[test]
    fn action_index_round_trips(index in 0..ACTION_SPACE) {
        let action = Action::from_index(index).unwrap();
        prop_assert_eq!(action.to_index(), index);
    }

    // Hold masks decode to a sub-multiset of the dice.
    #[test]
    fn hold_mask_decodes_to_subset(dice in dice_strategy(), mask in 0..32u8) {
        let held = Action::held_values(mask, &dice);
        prop_assert_eq!(held.len(), mask.count_ones() as usize);
        let mut game = GeneralaGame::with_source(
            ["a"],
            GameConfig::new(),
            ScriptedDice::new(dice),
        ).unwrap();
        game.start_turn().unwrap();
        prop_assert!(game.roll(&held).is_ok());
    }
}
