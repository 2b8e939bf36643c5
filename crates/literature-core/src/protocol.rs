//! Wire message shapes exchanged between a connection and the room it is
//! attached to.
//!
//! Inbound messages are tagged by `type` so they deserialize into one
//! exhaustively-matched enum instead of an untyped JSON map. Outbound
//! messages are either a privacy-filtered room snapshot or an error
//! envelope addressed to a single connection.

use serde::{Deserialize, Serialize};

use crate::game::{GameView, InGameAction, PreGameAction};

/// A message sent by a client over its connection, before the server
/// stamps on `action_token` / `room_id` from the connection itself.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    InGameAction {
        in_game_action: InGameActionPayload,
    },
    PreGameAction {
        pre_game_action: PreGameActionPayload,
    },
    StartGame,
    ChangeHost {
        new_host_id: String,
    },
    RemovePlayer {
        player_id: String,
    },
    ExitRoom,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InGameActionPayload {
    AskCard { asked_player_id: String, card: String },
    ClaimSet { set_number: u8 },
    PassTurn { teammate_id: String },
}

impl From<InGameActionPayload> for InGameAction {
    fn from(payload: InGameActionPayload) -> Self {
        match payload {
            InGameActionPayload::AskCard { asked_player_id, card } => {
                InGameAction::AskCard { asked_player_id, card }
            }
            InGameActionPayload::ClaimSet { set_number } => InGameAction::ClaimSet { set_number },
            InGameActionPayload::PassTurn { teammate_id } => InGameAction::PassTurn { teammate_id },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PreGameActionPayload {
    ChangeTeam { player_id: String, new_team: u8 },
}

impl From<PreGameActionPayload> for PreGameAction {
    fn from(payload: PreGameActionPayload) -> Self {
        match payload {
            PreGameActionPayload::ChangeTeam { player_id, new_team } => {
                PreGameAction::ChangeTeam { player_id, new_team }
            }
        }
    }
}

/// A room-wide action carrying the sender's identity, as produced by the
/// session layer from a [`ClientMessage`] plus the connection's own token
/// and room id.
#[derive(Debug, Clone)]
pub struct RoomAction {
    pub room_id: String,
    pub action_token: String,
    pub kind: RoomActionKind,
}

#[derive(Debug, Clone)]
pub enum RoomActionKind {
    AddPlayer { name: String },
    ExitRoom,
    RemovePlayer { player_id: String },
    ChangeHost { new_host_id: String },
    StartGame,
    PreGameAction(PreGameAction),
    InGameAction(InGameAction),
}

impl From<ClientMessage> for RoomActionKind {
    fn from(msg: ClientMessage) -> Self {
        match msg {
            ClientMessage::InGameAction { in_game_action } => {
                RoomActionKind::InGameAction(in_game_action.into())
            }
            ClientMessage::PreGameAction { pre_game_action } => {
                RoomActionKind::PreGameAction(pre_game_action.into())
            }
            ClientMessage::StartGame => RoomActionKind::StartGame,
            ClientMessage::ChangeHost { new_host_id } => RoomActionKind::ChangeHost { new_host_id },
            ClientMessage::RemovePlayer { player_id } => RoomActionKind::RemovePlayer { player_id },
            ClientMessage::ExitRoom => RoomActionKind::ExitRoom,
        }
    }
}

/// Successful broadcast payload: a privacy-filtered snapshot addressed to
/// one recipient.
#[derive(Debug, Clone, Serialize)]
pub struct RoomSnapshot {
    pub room_id: String,
    #[serde(rename = "type")]
    pub game_type: String,
    #[serde(rename = "hostId")]
    pub host_id: Option<String>,
    #[serde(rename = "receiverId")]
    pub receiver_id: String,
    #[serde(rename = "connectedPlayers")]
    pub connected_players: Vec<String>,
    pub game: GameView,
}

/// Top-level outbound message: either `{success: true, currentState}` or
/// `{success: false, error, disconnect}`.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ServerMessage {
    Snapshot {
        success: bool,
        #[serde(rename = "currentState")]
        current_state: RoomSnapshot,
    },
    Error {
        success: bool,
        error: String,
        disconnect: bool,
    },
}

impl ServerMessage {
    pub fn snapshot(current_state: RoomSnapshot) -> Self {
        Self::Snapshot {
            success: true,
            current_state,
        }
    }

    pub fn error(error: impl Into<String>, disconnect: bool) -> Self {
        Self::Error {
            success: false,
            error: error.into(),
            disconnect,
        }
    }
}

/// Validate a room ID.
///
/// Room IDs must be non-empty, alphanumeric, and fewer than 20 characters.
pub fn validate_room_id(id: &str) -> Result<(), String> {
    if id.is_empty() {
        return Err("Room ID cannot be empty".to_string());
    }
    if id.len() >= 20 {
        return Err("Room ID must be fewer than 20 characters".to_string());
    }
    if !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("Room ID must be alphanumeric".to_string());
    }
    Ok(())
}
