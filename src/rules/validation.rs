//! Argument checks shared by the rules engine and the game.
//!
//! Stateless: each helper either returns `Ok(())` or an `InvalidInput`.

use crate::core::{GeneralaError, Result, DICE_COUNT, FACES};

/// Check every value is a die face in `1..=6`.
///
/// An empty slice passes only when `allow_empty` is set.
pub fn validate_dice(dice: &[u8], allow_empty: bool) -> Result<()> {
    if !allow_empty && dice.is_empty() {
        return Err(GeneralaError::invalid("dice list cannot be empty"));
    }
    match dice.iter().find(|&&d| !(1..=FACES).contains(&d)) {
        Some(d) => Err(GeneralaError::invalid(format!(
            "dice values must be between 1 and {FACES}, got {d}"
        ))),
        None => Ok(()),
    }
}

/// Check the slice holds exactly `expected` dice.
pub fn validate_dice_count(dice: &[u8], expected: usize) -> Result<()> {
    if dice.len() != expected {
        return Err(GeneralaError::invalid(format!(
            "must have exactly {expected} dice, got {}",
            dice.len()
        )));
    }
    Ok(())
}

/// Check `1 <= roll_number <= max_rolls`.
pub fn validate_roll_number(roll_number: u8, max_rolls: u8) -> Result<()> {
    if roll_number == 0 || roll_number > max_rolls {
        return Err(GeneralaError::invalid(format!(
            "roll number must be between 1 and {max_rolls}, got {roll_number}"
        )));
    }
    Ok(())
}

/// Check at most `max_dice` values are held.
pub fn validate_held_count(held: &[u8], max_dice: usize) -> Result<()> {
    if held.len() > max_dice {
        return Err(GeneralaError::invalid(format!(
            "cannot hold more than {max_dice} dice, got {}",
            held.len()
        )));
    }
    Ok(())
}

/// Check `held` is a sub-multiset of `dice` (compared by value counts).
pub fn validate_held_subset(held: &[u8], dice: &[u8]) -> Result<()> {
    let mut available = [0u8; FACES as usize + 1];
    for &d in dice {
        if let Some(slot) = available.get_mut(d as usize) {
            *slot += 1;
        }
    }
    for &h in held {
        match available.get_mut(h as usize) {
            Some(slot) if *slot > 0 => *slot -= 1,
            _ => {
                return Err(GeneralaError::invalid(format!(
                    "held value {h} is not among the current dice {dice:?}"
                )))
            }
        }
    }
    Ok(())
}

/// Check the roster is non-empty and every name has visible characters.
pub fn validate_player_names<S: AsRef<str>>(names: &[S]) -> Result<()> {
    if names.is_empty() {
        return Err(GeneralaError::invalid("player list cannot be empty"));
    }
    for (i, name) in names.iter().enumerate() {
        if name.as_ref().trim().is_empty() {
            return Err(GeneralaError::invalid(format!(
                "player name at index {i} must be a non-empty string, got {:?}",
                name.as_ref()
            )));
        }
    }
    Ok(())
}

/// Held values for a roll: count and range.
pub(crate) fn validate_held(held: &[u8]) -> Result<()> {
    validate_held_count(held, DICE_COUNT)?;
    validate_dice(held, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_dice() {
        assert!(validate_dice(&[1, 6, 3], false).is_ok());
        assert!(validate_dice(&[], true).is_ok());
        assert!(validate_dice(&[], false).is_err());
        assert!(validate_dice(&[0], false).is_err());
        assert!(validate_dice(&[7, 1], false).is_err());
    }

    #[test]
    fn test_validate_dice_count() {
        assert!(validate_dice_count(&[1, 2, 3, 4, 5], 5).is_ok());
        assert!(validate_dice_count(&[1, 2, 3, 4], 5).is_err());
    }

    #[test]
    fn test_validate_roll_number() {
        assert!(validate_roll_number(1, 3).is_ok());
        assert!(validate_roll_number(3, 3).is_ok());
        assert!(validate_roll_number(0, 3).is_err());
        assert!(validate_roll_number(4, 3).is_err());
    }

    #[test]
    fn test_validate_held_subset() {
        assert!(validate_held_subset(&[1, 1], &[1, 2, 1, 4, 5]).is_ok());
        assert!(validate_held_subset(&[], &[]).is_ok());
        assert!(validate_held_subset(&[1, 1, 1], &[1, 2, 1, 4, 5]).is_err());
        assert!(validate_held_subset(&[6], &[1, 2, 3, 4, 5]).is_err());
        assert!(validate_held_subset(&[9], &[1, 2, 3, 4, 5]).is_err());
    }

    #[test]
    fn test_validate_player_names() {
        assert!(validate_player_names(&["ana", "bo"]).is_ok());
        assert!(validate_player_names::<&str>(&[]).is_err());
        assert!(validate_player_names(&["ana", "  "]).is_err());
    }

    #[test]
    fn test_validate_held() {
        assert!(validate_held(&[]).is_ok());
        assert!(validate_held(&[6, 6, 6, 6, 6]).is_ok());
        assert!(validate_held(&[6, 6, 6, 6, 6, 6]).is_err());
        assert!(validate_held(&[0]).is_err());
    }
}
