//! Player identity and, in-game, team and hand.

use std::collections::HashSet;

use serde::Serialize;

/// One seat at the table.
///
/// `token` is the opaque secret bound at connection time; it is deliberately
/// not `Serialize` so a stray `#[derive(Serialize)]` on a containing struct
/// can never leak it onto the wire.
#[derive(Debug, Clone)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub token: String,
    pub team: u8,
    pub hand: HashSet<String>,
}

impl Player {
    pub fn new(id: impl Into<String>, name: impl Into<String>, token: impl Into<String>, team: u8) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            token: token.into(),
            team,
            hand: HashSet::new(),
        }
    }

    pub fn add_card(&mut self, card: impl Into<String>) {
        self.hand.insert(card.into());
    }

    /// Removes `card` from the hand, reporting whether it was present.
    pub fn remove_card(&mut self, card: &str) -> bool {
        self.hand.remove(card)
    }

    pub fn has_card(&self, card: &str) -> bool {
        self.hand.contains(card)
    }

    /// Renders this player for the wire. The hand is only populated when
    /// `include_hand` is true; `card_count` is always accurate regardless.
    pub fn to_view(&self, include_hand: bool) -> PlayerView {
        PlayerView {
            id: self.id.clone(),
            name: self.name.clone(),
            team: self.team,
            hand: if include_hand {
                self.hand.iter().cloned().collect()
            } else {
                Vec::new()
            },
            card_count: self.hand.len(),
        }
    }
}

/// Serializable, privacy-filtered view of a [`Player`]. Never carries a
/// token.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub id: String,
    pub name: String,
    pub team: u8,
    pub hand: Vec<String>,
    pub card_count: usize,
}
