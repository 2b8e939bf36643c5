//! The rule-enforcing state machine for one Literature game.
//!
//! A [`Game`] owns all in-game state (players, hands, claimed sets, scores,
//! turn) and exposes mutating methods that validate every precondition
//! before touching state. On failure nothing is mutated; on success the
//! returned outcome carries enough detail for the caller to log or relay it.

use std::collections::HashMap;

use rand::rng;
use rand::seq::SliceRandom;
use serde::Serialize;

use crate::card::{self, NUM_SETS};
use crate::error::{GameError, GameResult};
use crate::player::{Player, PlayerView};

const MAX_PLAYERS: usize = 6;
const PLAYERS_PER_TEAM: usize = 3;
const HAND_SIZE: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GameState {
    NotStarted,
    InProgress,
    Ended,
}

/// Record of the most recent `ask_for_card`, kept for client replay/animation.
#[derive(Debug, Clone, Serialize)]
pub struct LastAsk {
    #[serde(rename = "askingPlayerId")]
    pub asking_player_id: String,
    #[serde(rename = "askedPlayerId")]
    pub asked_player_id: String,
    pub card: String,
    pub success: bool,
}

/// Result of a successful `ask_for_card`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AskOutcome {
    pub found: bool,
    pub turn_passed_to: Option<String>,
}

/// Result of a successful `claim_set`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimOutcome {
    pub winning_team: u8,
    pub game_ended: bool,
}

/// Pre-game actions dispatched via [`Game::register_pre_game_action`].
#[derive(Debug, Clone)]
pub enum PreGameAction {
    ChangeTeam { player_id: String, new_team: u8 },
}

/// In-game actions dispatched via [`Game::register_in_game_action`].
#[derive(Debug, Clone)]
pub enum InGameAction {
    AskCard { asked_player_id: String, card: String },
    ClaimSet { set_number: u8 },
    PassTurn { teammate_id: String },
}

/// One Literature game: dealing, asking, claiming, turn passing, and end
/// detection.
#[derive(Debug, Clone)]
pub struct Game {
    pub id: String,
    pub players: HashMap<String, Player>,
    /// Insertion order, so team assignment by parity and `start_game`'s
    /// random pick are reproducible given a seeded RNG.
    player_order: Vec<String>,
    pub current_turn_player_id: Option<String>,
    pub claimed_sets: HashMap<u8, u8>,
    pub scores: HashMap<u8, u8>,
    pub state: GameState,
    pub winning_team: Option<u8>,
    pub last_ask: Option<LastAsk>,
}

impl Game {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            players: HashMap::new(),
            player_order: Vec::new(),
            current_turn_player_id: None,
            claimed_sets: HashMap::new(),
            scores: HashMap::from([(1, 0), (2, 0)]),
            state: GameState::NotStarted,
            winning_team: None,
            last_ask: None,
        }
    }

    pub fn get_player(&self, player_id: &str) -> Option<&Player> {
        self.players.get(player_id)
    }

    pub fn player_by_token(&self, token: &str) -> Option<&Player> {
        self.players.values().find(|p| p.token == token)
    }

    pub fn get_team_players(&self, team: u8) -> Vec<&Player> {
        self.player_order
            .iter()
            .filter_map(|id| self.players.get(id))
            .filter(|p| p.team == team)
            .collect()
    }

    /// Adds a new player. Only permitted before the game starts. Team is
    /// assigned by parity of join order so six sequential adds yield a 3/3
    /// split.
    pub fn add_player(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        token: impl Into<String>,
    ) -> GameResult<()> {
        if self.state != GameState::NotStarted {
            return Err(GameError::illegal_state(
                "cannot add a player after the game has started",
            ));
        }
        if self.players.len() >= MAX_PLAYERS {
            return Err(GameError::precondition_failed(format!(
                "room is full ({MAX_PLAYERS} players)"
            )));
        }
        let id = id.into();
        let team = if self.players.len() % 2 == 0 { 1 } else { 2 };
        self.players
            .insert(id.clone(), Player::new(id.clone(), name, token, team));
        self.player_order.push(id);
        Ok(())
    }

    /// Removes a player. Silently no-ops if the id is absent, matching the
    /// room-level "leaving twice is fine" behavior.
    pub fn remove_player(&mut self, player_id: &str) {
        if self.players.remove(player_id).is_some() {
            self.player_order.retain(|id| id != player_id);
        }
        if self.current_turn_player_id.as_deref() == Some(player_id) {
            self.current_turn_player_id = None;
        }
    }

    /// Transitions NOT_STARTED -> IN_PROGRESS: validates the 3/3 split,
    /// shuffles a fresh deck, deals 9 cards to each player, and picks a
    /// starting player uniformly at random.
    pub fn start_game(&mut self) -> GameResult<()> {
        self.start_game_with_rng(&mut rng())
    }

    fn start_game_with_rng<R: rand::Rng + ?Sized>(&mut self, rng: &mut R) -> GameResult<()> {
        if self.state != GameState::NotStarted {
            return Err(GameError::illegal_state("game has already started"));
        }
        if self.players.len() != MAX_PLAYERS {
            return Err(GameError::precondition_failed(format!(
                "exactly {MAX_PLAYERS} players are required to start, have {}",
                self.players.len()
            )));
        }
        let team1 = self.get_team_players(1).len();
        let team2 = self.get_team_players(2).len();
        if team1 != PLAYERS_PER_TEAM || team2 != PLAYERS_PER_TEAM {
            return Err(GameError::precondition_failed(format!(
                "teams must be {PLAYERS_PER_TEAM}/{PLAYERS_PER_TEAM}, got {team1}/{team2}"
            )));
        }

        let mut deck = card::all_cards();
        deck.shuffle(rng);

        for (i, player_id) in self.player_order.clone().iter().enumerate() {
            let start = i * HAND_SIZE;
            let hand = &deck[start..start + HAND_SIZE];
            let player = self.players.get_mut(player_id).expect("player_order is in sync");
            for card in hand {
                player.add_card(card.clone());
            }
        }

        let starting = self
            .player_order
            .choose(rng)
            .cloned()
            .expect("exactly six players were just validated");
        self.current_turn_player_id = Some(starting);
        self.state = GameState::InProgress;
        Ok(())
    }

    /// The core rule. Preconditions are checked in the order documented on
    /// the type; any violation leaves state untouched.
    pub fn ask_for_card(
        &mut self,
        asking_id: &str,
        asked_id: &str,
        card: &str,
    ) -> GameResult<AskOutcome> {
        self.require_in_progress()?;

        if !card::is_valid_card(card) {
            return Err(GameError::invalid_argument(format!("unknown card: {card}")));
        }
        let asking = self
            .players
            .get(asking_id)
            .ok_or_else(|| GameError::not_found(format!("no such player: {asking_id}")))?;
        if asking.has_card(card) {
            return Err(GameError::rule_violation(
                "cannot ask for a card you already hold",
            ));
        }
        let set_number = card::set_of(card)?;
        if self.claimed_sets.contains_key(&set_number) {
            return Err(GameError::rule_violation(format!(
                "set {set_number} has already been claimed"
            )));
        }
        let holds_from_set = card::cards_in_set(set_number)?
            .iter()
            .any(|c| asking.has_card(c));
        if !holds_from_set {
            return Err(GameError::rule_violation(
                "you must hold at least one card from the set you are asking about",
            ));
        }
        let asked = self
            .players
            .get(asked_id)
            .ok_or_else(|| GameError::not_found(format!("no such player: {asked_id}")))?;
        if asked.team == asking.team {
            return Err(GameError::rule_violation(
                "cannot ask a member of your own team",
            ));
        }
        if asked.hand.is_empty() {
            return Err(GameError::rule_violation(
                "cannot ask a player with an empty hand",
            ));
        }

        let found = asked.has_card(card);
        if found {
            self.players.get_mut(asked_id).unwrap().remove_card(card);
            self.players.get_mut(asking_id).unwrap().add_card(card.to_string());
        } else {
            self.current_turn_player_id = Some(asked_id.to_string());
        }

        self.last_ask = Some(LastAsk {
            asking_player_id: asking_id.to_string(),
            asked_player_id: asked_id.to_string(),
            card: card.to_string(),
            success: found,
        });

        Ok(AskOutcome {
            found,
            turn_passed_to: (!found).then(|| asked_id.to_string()),
        })
    }

    /// Resolves a claim: purges the set's cards from every hand regardless
    /// of outcome, and credits whichever team actually held them all.
    pub fn claim_set(&mut self, set_number: u8, declaring_id: &str) -> GameResult<ClaimOutcome> {
        self.require_in_progress()?;

        if !(1..=NUM_SETS).contains(&set_number) {
            return Err(GameError::invalid_argument(format!(
                "set number must be between 1 and 9, got {set_number}"
            )));
        }
        if self.claimed_sets.contains_key(&set_number) {
            return Err(GameError::rule_violation(format!(
                "set {set_number} has already been claimed"
            )));
        }
        let declarant = self
            .players
            .get(declaring_id)
            .ok_or_else(|| GameError::not_found(format!("no such player: {declaring_id}")))?;
        let team = declarant.team;

        let needed = card::cards_in_set(set_number)?;
        let held_by_team: std::collections::HashSet<&String> = self
            .get_team_players(team)
            .iter()
            .flat_map(|p| p.hand.iter())
            .collect();
        let team_holds_all = needed.iter().all(|c| held_by_team.contains(c));
        let winning_team = if team_holds_all { team } else { 3 - team };

        for card_id in &needed {
            for player in self.players.values_mut() {
                player.remove_card(card_id);
            }
        }

        *self.scores.entry(winning_team).or_insert(0) += 1;
        self.claimed_sets.insert(set_number, winning_team);

        let game_ended = self.claimed_sets.len() as u8 == NUM_SETS;
        if game_ended {
            self.end_game();
        }

        Ok(ClaimOutcome {
            winning_team,
            game_ended,
        })
    }

    fn end_game(&mut self) {
        self.state = GameState::Ended;
        let s1 = *self.scores.get(&1).unwrap_or(&0);
        let s2 = *self.scores.get(&2).unwrap_or(&0);
        self.winning_team = match s1.cmp(&s2) {
            std::cmp::Ordering::Greater => Some(1),
            std::cmp::Ordering::Less => Some(2),
            std::cmp::Ordering::Equal => None,
        };
    }

    /// Passes the turn to a teammate. Requires the passer's hand to be
    /// empty; this is how a turn-holder with nothing left to ask resolves
    /// their turn.
    pub fn pass_turn_to_teammate(&mut self, passer_id: &str, teammate_id: &str) -> GameResult<()> {
        self.require_in_progress()?;

        if passer_id == teammate_id {
            return Err(GameError::rule_violation("cannot pass the turn to yourself"));
        }
        let passer = self
            .players
            .get(passer_id)
            .ok_or_else(|| GameError::not_found(format!("no such player: {passer_id}")))?;
        let teammate = self
            .players
            .get(teammate_id)
            .ok_or_else(|| GameError::not_found(format!("no such player: {teammate_id}")))?;
        if passer.team != teammate.team {
            return Err(GameError::rule_violation(
                "can only pass the turn to a teammate",
            ));
        }
        if !passer.hand.is_empty() {
            return Err(GameError::rule_violation(
                "cannot pass the turn while still holding cards",
            ));
        }

        self.current_turn_player_id = Some(teammate_id.to_string());
        Ok(())
    }

    /// Dispatches a pre-game action. Permitted only in NOT_STARTED.
    pub fn register_pre_game_action(
        &mut self,
        actor_id: &str,
        actor_is_host: bool,
        action: PreGameAction,
    ) -> GameResult<()> {
        if self.state != GameState::NotStarted {
            return Err(GameError::illegal_state(
                "pre-game actions are only valid before the game starts",
            ));
        }
        match action {
            PreGameAction::ChangeTeam { player_id, new_team } => {
                if actor_id != player_id && !actor_is_host {
                    return Err(GameError::rule_violation(
                        "only the player themselves or the host may change a team",
                    ));
                }
                if new_team != 1 && new_team != 2 {
                    return Err(GameError::invalid_argument("team must be 1 or 2"));
                }
                let player = self
                    .players
                    .get_mut(&player_id)
                    .ok_or_else(|| GameError::not_found(format!("no such player: {player_id}")))?;
                player.team = new_team;
                Ok(())
            }
        }
    }

    /// Dispatches an in-game action. Permitted only in IN_PROGRESS and only
    /// for the current turn holder.
    pub fn register_in_game_action(&mut self, actor_id: &str, action: InGameAction) -> GameResult<()> {
        self.require_in_progress()?;
        if self.current_turn_player_id.as_deref() != Some(actor_id) {
            return Err(GameError::rule_violation("it is not your turn"));
        }
        match action {
            InGameAction::AskCard { asked_player_id, card } => {
                self.ask_for_card(actor_id, &asked_player_id, &card).map(|_| ())
            }
            InGameAction::ClaimSet { set_number } => self.claim_set(set_number, actor_id).map(|_| ()),
            InGameAction::PassTurn { teammate_id } => {
                self.pass_turn_to_teammate(actor_id, &teammate_id)
            }
        }
    }

    fn require_in_progress(&self) -> GameResult<()> {
        if self.state != GameState::InProgress {
            return Err(GameError::illegal_state("game is not in progress"));
        }
        Ok(())
    }

    /// Renders the game for the wire. `asker_id` names the recipient whose
    /// own hand, if any, should be revealed; every other hand is emptied.
    pub fn to_view(&self, asker_id: Option<&str>) -> GameView {
        let players = self
            .player_order
            .iter()
            .filter_map(|id| self.players.get(id))
            .map(|p| {
                let include_hand =
                    self.state == GameState::InProgress && asker_id == Some(p.id.as_str());
                p.to_view(include_hand)
            })
            .collect();

        GameView {
            game_id: self.id.clone(),
            players,
            current_player_id: self.current_turn_player_id.clone(),
            claimed_sets: self.claimed_sets.clone(),
            scores: self.scores.clone(),
            state: self.state,
            winning_team: self.winning_team,
            last_ask: self.last_ask.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GameView {
    #[serde(rename = "gameId")]
    pub game_id: String,
    pub players: Vec<PlayerView>,
    #[serde(rename = "currentPlayerId")]
    pub current_player_id: Option<String>,
    #[serde(rename = "claimedSets")]
    pub claimed_sets: HashMap<u8, u8>,
    pub scores: HashMap<u8, u8>,
    pub state: GameState,
    #[serde(rename = "winningTeam")]
    pub winning_team: Option<u8>,
    #[serde(rename = "lastAsk")]
    pub last_ask: Option<LastAsk>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn seeded_rng() -> StdRng {
        StdRng::seed_from_u64(42)
    }

    fn six_players() -> Game {
        let mut game = Game::new("room1");
        for i in 1..=6 {
            game.add_player(format!("p{i}"), format!("Player {i}"), format!("tok{i}"))
                .unwrap();
        }
        game
    }

    #[test]
    fn add_player_assigns_teams_by_parity() {
        let game = six_players();
        assert_eq!(game.get_team_players(1).len(), 3);
        assert_eq!(game.get_team_players(2).len(), 3);
    }

    #[test]
    fn add_player_rejects_seventh() {
        let mut game = six_players();
        assert!(game.add_player("p7", "Extra", "tok7").is_err());
    }

    #[test]
    fn remove_player_silently_no_ops_if_absent() {
        let mut game = six_players();
        game.remove_player("nonexistent");
        assert_eq!(game.players.len(), 6);
    }

    #[test]
    fn start_game_requires_six_players_and_even_split() {
        let mut game = Game::new("r");
        game.add_player("p1", "A", "t1").unwrap();
        assert!(game.start_game().is_err());
    }

    #[test]
    fn start_game_deals_nine_cards_each() {
        let mut game = six_players();
        game.start_game_with_rng(&mut seeded_rng()).unwrap();
        assert_eq!(game.state, GameState::InProgress);
        for player in game.players.values() {
            assert_eq!(player.hand.len(), 9);
        }
        assert!(game.current_turn_player_id.is_some());
    }

    #[test]
    fn ask_for_card_transfers_on_success() {
        let mut game = six_players();
        game.start_game_with_rng(&mut seeded_rng()).unwrap();

        // Find a card the current player does not hold, owned by an
        // opposing-team player, whose set the current player still holds a
        // card from.
        let turn_id = game.current_turn_player_id.clone().unwrap();
        let turn_team = game.players[&turn_id].team;
        let set_in_hand = card::set_of(game.players[&turn_id].hand.iter().next().unwrap()).unwrap();

        let (target_id, card) = game
            .players
            .iter()
            .find_map(|(id, p)| {
                if p.team != turn_team {
                    p.hand
                        .iter()
                        .find(|c| card::set_of(c).unwrap() == set_in_hand)
                        .map(|c| (id.clone(), c.clone()))
                } else {
                    None
                }
            })
            .expect("some opposing player holds a card from this set in a 54-card deal");

        let outcome = game.ask_for_card(&turn_id, &target_id, &card).unwrap();
        assert!(outcome.found);
        assert!(game.players[&turn_id].has_card(&card));
        assert!(!game.players[&target_id].has_card(&card));
        assert_eq!(game.current_turn_player_id.as_deref(), Some(turn_id.as_str()));
    }

    #[test]
    fn ask_for_card_rejects_own_team() {
        let mut game = six_players();
        game.start_game_with_rng(&mut seeded_rng()).unwrap();
        let turn_id = game.current_turn_player_id.clone().unwrap();
        let turn_team = game.players[&turn_id].team;
        let teammate_id = game
            .players
            .iter()
            .find(|(id, p)| id.as_str() != turn_id && p.team == turn_team)
            .map(|(id, _)| id.clone())
            .unwrap();
        let card = game.players[&teammate_id].hand.iter().next().cloned().unwrap();

        let err = game.ask_for_card(&turn_id, &teammate_id, &card).unwrap_err();
        assert_eq!(err.kind(), "RULE_VIOLATION");
    }

    #[test]
    fn ask_for_card_rejects_already_held() {
        let mut game = six_players();
        game.start_game_with_rng(&mut seeded_rng()).unwrap();
        let turn_id = game.current_turn_player_id.clone().unwrap();
        let own_card = game.players[&turn_id].hand.iter().next().cloned().unwrap();
        let other = game
            .players
            .keys()
            .find(|id| id.as_str() != turn_id)
            .cloned()
            .unwrap();
        assert!(game.ask_for_card(&turn_id, &other, &own_card).is_err());
    }

    #[test]
    fn claim_set_correct_credits_declarant_team() {
        let mut game = six_players();
        game.start_game_with_rng(&mut seeded_rng()).unwrap();
        let turn_id = game.current_turn_player_id.clone().unwrap();
        let team = game.players[&turn_id].team;

        // Force the whole set 9 into this team's hands.
        let needed = card::cards_in_set(9).unwrap();
        for player in game.players.values_mut() {
            for c in &needed {
                player.hand.remove(c);
            }
        }
        let mut team_members: Vec<String> = game
            .get_team_players(team)
            .iter()
            .map(|p| p.id.clone())
            .collect();
        team_members.sort();
        for (i, c) in needed.iter().enumerate() {
            let pid = &team_members[i % team_members.len()];
            game.players.get_mut(pid).unwrap().add_card(c.clone());
        }

        let outcome = game.claim_set(9, &turn_id).unwrap();
        assert_eq!(outcome.winning_team, team);
        assert!(!outcome.game_ended);
        assert_eq!(*game.scores.get(&team).unwrap(), 1);
        for player in game.players.values() {
            for c in &needed {
                assert!(!player.has_card(c));
            }
        }
    }

    #[test]
    fn claim_set_incorrect_rewards_opponents_and_still_purges() {
        let mut game = six_players();
        game.start_game_with_rng(&mut seeded_rng()).unwrap();
        let turn_id = game.current_turn_player_id.clone().unwrap();
        let team = game.players[&turn_id].team;

        let needed = card::cards_in_set(9).unwrap();
        for player in game.players.values_mut() {
            for c in &needed {
                player.hand.remove(c);
            }
        }
        // Give exactly one card of the set to the opposing team so the
        // declarant's team does not actually hold it all.
        let opposing = game
            .players
            .values_mut()
            .find(|p| p.team != team)
            .unwrap();
        opposing.add_card(needed[0].clone());

        let outcome = game.claim_set(9, &turn_id).unwrap();
        assert_eq!(outcome.winning_team, 3 - team);
        assert_eq!(*game.scores.get(&(3 - team)).unwrap(), 1);
        for player in game.players.values() {
            for c in &needed {
                assert!(!player.has_card(c));
            }
        }
    }

    #[test]
    fn claim_set_rejects_already_claimed() {
        let mut game = six_players();
        game.start_game_with_rng(&mut seeded_rng()).unwrap();
        let turn_id = game.current_turn_player_id.clone().unwrap();
        game.claim_set(9, &turn_id).unwrap();
        assert!(game.claim_set(9, &turn_id).is_err());
    }

    #[test]
    fn pass_turn_requires_empty_hand() {
        let mut game = six_players();
        game.start_game_with_rng(&mut seeded_rng()).unwrap();
        let turn_id = game.current_turn_player_id.clone().unwrap();
        let team = game.players[&turn_id].team;
        let teammate_id = game
            .players
            .iter()
            .find(|(id, p)| id.as_str() != turn_id && p.team == team)
            .map(|(id, _)| id.clone())
            .unwrap();

        assert!(game.pass_turn_to_teammate(&turn_id, &teammate_id).is_err());

        game.players.get_mut(&turn_id).unwrap().hand.clear();
        game.pass_turn_to_teammate(&turn_id, &teammate_id).unwrap();
        assert_eq!(game.current_turn_player_id.as_deref(), Some(teammate_id.as_str()));
    }

    #[test]
    fn register_in_game_action_enforces_turn() {
        let mut game = six_players();
        game.start_game_with_rng(&mut seeded_rng()).unwrap();
        let turn_id = game.current_turn_player_id.clone().unwrap();
        let not_turn = game
            .players
            .keys()
            .find(|id| id.as_str() != turn_id)
            .cloned()
            .unwrap();

        let err = game
            .register_in_game_action(&not_turn, InGameAction::ClaimSet { set_number: 1 })
            .unwrap_err();
        assert_eq!(err.kind(), "RULE_VIOLATION");
    }

    #[test]
    fn game_ends_after_nine_claims_with_winner_by_score() {
        let mut game = six_players();
        game.start_game_with_rng(&mut seeded_rng()).unwrap();
        for set_number in 1..=9u8 {
            let turn_id = game.current_turn_player_id.clone().unwrap();
            // Force the whole set into the turn holder's team hands so this
            // team wins every claim deterministically.
            let team = game.players[&turn_id].team;
            let needed = card::cards_in_set(set_number).unwrap();
            for player in game.players.values_mut() {
                for c in &needed {
                    player.hand.remove(c);
                }
            }
            let members: Vec<String> = game
                .get_team_players(team)
                .iter()
                .map(|p| p.id.clone())
                .collect();
            for (i, c) in needed.iter().enumerate() {
                let pid = &members[i % members.len()];
                game.players.get_mut(pid).unwrap().add_card(c.clone());
            }
            game.claim_set(set_number, &turn_id).unwrap();
        }
        assert_eq!(game.state, GameState::Ended);
        assert!(game.winning_team.is_some());
        assert_eq!(
            game.scores.values().sum::<u8>(),
            9,
            "every claimed set contributes exactly one point"
        );
    }

    #[test]
    fn pre_game_action_change_team_requires_self_or_host() {
        let mut game = six_players();
        let err = game
            .register_pre_game_action(
                "p2",
                false,
                PreGameAction::ChangeTeam {
                    player_id: "p3".to_string(),
                    new_team: 1,
                },
            )
            .unwrap_err();
        assert_eq!(err.kind(), "RULE_VIOLATION");

        game.register_pre_game_action(
            "p1",
            true,
            PreGameAction::ChangeTeam {
                player_id: "p3".to_string(),
                new_team: 1,
            },
        )
        .unwrap();
        assert_eq!(game.players["p3"].team, 1);
    }

    #[test]
    fn to_view_reveals_only_the_asking_player_hand() {
        let mut game = six_players();
        game.start_game_with_rng(&mut seeded_rng()).unwrap();
        let asker = game.current_turn_player_id.clone().unwrap();

        let view = game.to_view(Some(&asker));
        for p in &view.players {
            if p.id == asker {
                assert_eq!(p.hand.len(), p.card_count);
                assert_eq!(p.card_count, 9);
            } else {
                assert!(p.hand.is_empty());
                assert_eq!(p.card_count, 9);
            }
        }
    }
}
