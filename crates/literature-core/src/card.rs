//! The 54-card Literature deck and its nine six-card sets.
//!
//! Each card is a 3-character id `RST`: rank, suit (or joker color), and the
//! set index baked in as the third character so `set_of` is O(1).

use std::collections::HashSet;

use crate::error::GameError;

pub const NUM_SETS: u8 = 9;
pub const CARDS_PER_SET: usize = 6;
pub const DECK_SIZE: usize = 54;

/// Human-readable names for sets 1..=9, in order.
const SET_NAMES: [&str; 9] = [
    "LOWER_CLUBS",
    "HIGHER_CLUBS",
    "LOWER_DIAMONDS",
    "HIGHER_DIAMONDS",
    "LOWER_HEARTS",
    "HIGHER_HEARTS",
    "LOWER_SPADES",
    "HIGHER_SPADES",
    "SEVENS_AND_JOKERS",
];

const LOWER_CLUBS: [&str; 6] = ["AC1", "2C1", "3C1", "4C1", "5C1", "6C1"];
const HIGHER_CLUBS: [&str; 6] = ["8C2", "9C2", "1C2", "JC2", "QC2", "KC2"];
const LOWER_DIAMONDS: [&str; 6] = ["AD3", "2D3", "3D3", "4D3", "5D3", "6D3"];
const HIGHER_DIAMONDS: [&str; 6] = ["8D4", "9D4", "1D4", "JD4", "QD4", "KD4"];
const LOWER_HEARTS: [&str; 6] = ["AH5", "2H5", "3H5", "4H5", "5H5", "6H5"];
const HIGHER_HEARTS: [&str; 6] = ["8H6", "9H6", "1H6", "JH6", "QH6", "KH6"];
const LOWER_SPADES: [&str; 6] = ["AS7", "2S7", "3S7", "4S7", "5S7", "6S7"];
const HIGHER_SPADES: [&str; 6] = ["8S8", "9S8", "1S8", "JS8", "QS8", "KS8"];
const SEVENS_AND_JOKERS: [&str; 6] = ["7C9", "7D9", "7H9", "7S9", "JR9", "JB9"];

const ALL_SETS: [[&str; 6]; 9] = [
    LOWER_CLUBS,
    HIGHER_CLUBS,
    LOWER_DIAMONDS,
    HIGHER_DIAMONDS,
    LOWER_HEARTS,
    HIGHER_HEARTS,
    LOWER_SPADES,
    HIGHER_SPADES,
    SEVENS_AND_JOKERS,
];

/// Every card in the deck, in no particular order.
pub fn all_cards() -> Vec<String> {
    ALL_SETS
        .iter()
        .flat_map(|set| set.iter().map(|c| c.to_string()))
        .collect()
}

/// The 54-card universe as a set, for membership checks.
pub fn all_cards_set() -> HashSet<String> {
    all_cards().into_iter().collect()
}

/// Returns `true` if `card` is a recognized member of the deck.
pub fn is_valid_card(card: &str) -> bool {
    card.len() == 3 && set_of(card).is_ok_and(|set| cards_in_set(set).unwrap().contains(&card.to_string()))
}

/// The six cards belonging to `set_number` (1..=9).
pub fn cards_in_set(set_number: u8) -> Result<Vec<String>, GameError> {
    if !(1..=NUM_SETS).contains(&set_number) {
        return Err(GameError::invalid_argument(format!(
            "set number must be between 1 and 9, got {set_number}"
        )));
    }
    Ok(ALL_SETS[(set_number - 1) as usize]
        .iter()
        .map(|c| c.to_string())
        .collect())
}

/// The set index (1..=9) a card belongs to, read directly off its third
/// character.
pub fn set_of(card: &str) -> Result<u8, GameError> {
    let digit = card
        .chars()
        .nth(2)
        .ok_or_else(|| GameError::invalid_argument(format!("malformed card id: {card}")))?;
    let set_number = digit
        .to_digit(10)
        .ok_or_else(|| GameError::invalid_argument(format!("malformed card id: {card}")))? as u8;
    if !(1..=NUM_SETS).contains(&set_number) {
        return Err(GameError::invalid_argument(format!(
            "malformed card id: {card}"
        )));
    }
    Ok(set_number)
}

/// The human-readable name of a set, e.g. `"SEVENS_AND_JOKERS"`.
pub fn set_name(set_number: u8) -> Result<&'static str, GameError> {
    if !(1..=NUM_SETS).contains(&set_number) {
        return Err(GameError::invalid_argument(format!(
            "set number must be between 1 and 9, got {set_number}"
        )));
    }
    Ok(SET_NAMES[(set_number - 1) as usize])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deck_has_fifty_four_unique_cards() {
        let cards = all_cards();
        assert_eq!(cards.len(), DECK_SIZE);
        let unique: HashSet<_> = cards.iter().collect();
        assert_eq!(unique.len(), DECK_SIZE);
    }

    #[test]
    fn every_set_has_six_cards() {
        for set_number in 1..=NUM_SETS {
            assert_eq!(cards_in_set(set_number).unwrap().len(), CARDS_PER_SET);
        }
    }

    #[test]
    fn set_of_matches_encoded_digit() {
        assert_eq!(set_of("AC1").unwrap(), 1);
        assert_eq!(set_of("KC2").unwrap(), 2);
        assert_eq!(set_of("7S9").unwrap(), 9);
        assert_eq!(set_of("JR9").unwrap(), 9);
    }

    #[test]
    fn set_of_rejects_malformed_card() {
        assert!(set_of("").is_err());
        assert!(set_of("XX").is_err());
    }

    #[test]
    fn cards_in_set_rejects_out_of_range() {
        assert!(cards_in_set(0).is_err());
        assert!(cards_in_set(10).is_err());
    }

    #[test]
    fn set_name_matches_original_labels() {
        assert_eq!(set_name(1).unwrap(), "LOWER_CLUBS");
        assert_eq!(set_name(9).unwrap(), "SEVENS_AND_JOKERS");
        assert!(set_name(0).is_err());
    }

    #[test]
    fn sevens_and_jokers_contains_both_jokers() {
        let set9 = cards_in_set(9).unwrap();
        assert!(set9.contains(&"JR9".to_string()));
        assert!(set9.contains(&"JB9".to_string()));
    }

    #[test]
    fn is_valid_card_rejects_unknown_ids() {
        assert!(is_valid_card("AC1"));
        assert!(!is_valid_card("ZZ9"));
        assert!(!is_valid_card("AC9"));
    }
}
