//! Room: the lobby-plus-game container and its process-wide registry.
//!
//! A [`Room`] wraps one [`literature_core::game::Game`] together with the
//! set of currently-live connections. Unlike the poker server this room is
//! modeled after, there is no per-message targeted delivery: every accepted
//! action produces one fresh [`RoomSnapshot`] rendered once per connected
//! token, each with that token's own hand (if any) revealed and everyone
//! else's hidden.

use std::collections::HashMap;
use std::sync::Arc;

use literature_core::error::{GameError, GameResult};
use literature_core::game::Game;
use literature_core::protocol::{
    RoomAction, RoomActionKind, RoomSnapshot, ServerMessage, validate_room_id,
};
use rand::Rng;
use rand::distr::Alphanumeric;
use tokio::sync::{Mutex, RwLock, mpsc};

/// Handle to a connected player's outbound channel. The session task
/// draining the matching receiver forwards each message as a transport
/// frame; this module never touches the transport itself.
pub type PlayerTx = mpsc::UnboundedSender<ServerMessage>;
pub type PlayerRx = mpsc::UnboundedReceiver<ServerMessage>;

const ROOM_ID_LEN: usize = 6;
const ROOM_ID_GENERATION_ATTEMPTS: usize = 100;
const DEFAULT_GAME_TYPE: &str = "literature";

/// One lobby-plus-game container.
pub struct Room {
    pub room_id: String,
    pub game_type: String,
    pub host_token: Option<String>,
    pub game: Game,
    /// Live connections, keyed by the connection's token. A token absent
    /// here but present in `game.players` is a disconnected-but-not-removed
    /// game participant (reconnect is possible via the same token).
    connected: HashMap<String, PlayerTx>,
    /// Pre-seeded public rooms are never reclaimed by [`RoomRegistry::remove_if_empty`]
    /// regardless of connection count, per the reference design (§9).
    protected: bool,
}

impl Room {
    fn new(room_id: impl Into<String>, game_type: impl Into<String>, protected: bool) -> Self {
        let room_id = room_id.into();
        Self {
            game: Game::new(room_id.clone()),
            room_id,
            game_type: game_type.into(),
            host_token: None,
            connected: HashMap::new(),
            protected,
        }
    }

    /// Adds (or reconnects) a player. In `NOT_STARTED` this registers a new
    /// game player; once the game has started, `token` must already
    /// resolve to an existing game player (a reconnect).
    pub fn add_player(&mut self, token: &str, name: &str) -> GameResult<String> {
        let player_id = if let Some(existing) = self.game.player_by_token(token) {
            existing.id.clone()
        } else {
            let player_id = format!("p-{}", short_id());
            self.game.add_player(player_id.clone(), name, token)?;
            player_id
        };

        if self.host_token.is_none() {
            self.host_token = Some(token.to_string());
        }
        Ok(player_id)
    }

    pub fn attach_sender(&mut self, token: &str, tx: PlayerTx) {
        self.connected.insert(token.to_string(), tx);
    }

    /// Reverses [`Room::attach_sender`]. Used when a connect-time action
    /// attached a sender but the action it was meant to accompany was then
    /// rejected, so the connection never becomes live.
    pub fn detach_sender(&mut self, token: &str) {
        self.connected.remove(token);
    }

    /// Removes a connection and, if the game has not started, the
    /// underlying game player too. Reassigns host if the host disconnected
    /// and others remain.
    pub fn remove_player(&mut self, requester_token: &str, player_id: &str) -> GameResult<()> {
        self.authorize_self_or_host(requester_token, player_id)?;

        if let Some(player) = self.game.get_player(player_id) {
            let token = player.token.clone();
            self.connected.remove(&token);
            if matches!(self.game.state, literature_core::game::GameState::NotStarted) {
                self.game.remove_player(player_id);
            }
            if self.host_token.as_deref() == Some(token.as_str()) {
                self.host_token = self.connected.keys().next().cloned();
            }
        }
        Ok(())
    }

    pub fn change_host(&mut self, requester_token: &str, new_host_id: &str) -> GameResult<()> {
        if self.host_token.as_deref() != Some(requester_token) {
            return Err(GameError::rule_violation("only the host may transfer hostship"));
        }
        let new_host = self
            .game
            .get_player(new_host_id)
            .ok_or_else(|| GameError::not_found(format!("no such player: {new_host_id}")))?;
        if new_host.token == requester_token {
            return Err(GameError::rule_violation("cannot transfer hostship to yourself"));
        }
        if !self.connected.contains_key(&new_host.token) {
            return Err(GameError::rule_violation(
                "can only transfer hostship to a connected player",
            ));
        }
        self.host_token = Some(new_host.token.clone());
        Ok(())
    }

    pub fn start_game(&mut self, requester_token: &str) -> GameResult<()> {
        if self.host_token.as_deref() != Some(requester_token) {
            return Err(GameError::rule_violation("only the host may start the game"));
        }
        self.game.start_game()
    }

    fn is_host(&self, token: &str) -> bool {
        self.host_token.as_deref() == Some(token)
    }

    fn authorize_self_or_host(&self, requester_token: &str, player_id: &str) -> GameResult<()> {
        let is_self = self
            .game
            .get_player(player_id)
            .is_some_and(|p| p.token == requester_token);
        if !is_self && !self.is_host(requester_token) {
            return Err(GameError::rule_violation(
                "only the player themselves or the host may do this",
            ));
        }
        Ok(())
    }

    /// Dispatches one action from a connected token. Returns `Ok(())` if the
    /// caller should now broadcast a fresh snapshot to every connection.
    pub fn dispatch(&mut self, token: &str, kind: RoomActionKind) -> GameResult<()> {
        match kind {
            RoomActionKind::AddPlayer { name } => {
                self.add_player(token, &name)?;
                Ok(())
            }
            RoomActionKind::ExitRoom => {
                let player_id = self
                    .game
                    .player_by_token(token)
                    .map(|p| p.id.clone())
                    .ok_or_else(|| GameError::not_found("you are not registered in this room"))?;
                self.remove_player(token, &player_id)
            }
            RoomActionKind::RemovePlayer { player_id } => self.remove_player(token, &player_id),
            RoomActionKind::ChangeHost { new_host_id } => self.change_host(token, &new_host_id),
            RoomActionKind::StartGame => self.start_game(token),
            RoomActionKind::PreGameAction(action) => {
                let actor_id = self
                    .game
                    .player_by_token(token)
                    .map(|p| p.id.clone())
                    .ok_or_else(|| GameError::not_found("you are not registered in this room"))?;
                let is_host = self.is_host(token);
                self.game.register_pre_game_action(&actor_id, is_host, action)
            }
            RoomActionKind::InGameAction(action) => {
                let actor_id = self
                    .game
                    .player_by_token(token)
                    .map(|p| p.id.clone())
                    .ok_or_else(|| GameError::not_found("you are not registered in this room"))?;
                self.game.register_in_game_action(&actor_id, action)
            }
        }
    }

    /// Renders and sends one privacy-filtered snapshot to every connected
    /// token. Sends never block: an unbounded channel backs a disconnected
    /// or slow reader, and a dead sender is simply ignored (the owning
    /// session task will observe its channel closed and exit).
    pub fn broadcast_snapshot(&self) {
        let connected_players: Vec<String> = self
            .connected
            .keys()
            .filter_map(|token| self.game.player_by_token(token))
            .map(|p| p.id.clone())
            .collect();

        for (token, tx) in &self.connected {
            let receiver_id = self
                .game
                .player_by_token(token)
                .map(|p| p.id.clone())
                .unwrap_or_default();
            let snapshot = RoomSnapshot {
                room_id: self.room_id.clone(),
                game_type: self.game_type.clone(),
                host_id: self
                    .host_token
                    .as_deref()
                    .and_then(|t| self.game.player_by_token(t))
                    .map(|p| p.id.clone()),
                receiver_id,
                connected_players: connected_players.clone(),
                game: self.game.to_view(Some(token)),
            };
            let _ = tx.send(ServerMessage::snapshot(snapshot));
        }
    }

    pub fn send_error(&self, token: &str, error: impl Into<String>, disconnect: bool) {
        if let Some(tx) = self.connected.get(token) {
            let _ = tx.send(ServerMessage::error(error, disconnect));
        }
    }

    pub fn is_empty(&self) -> bool {
        self.connected.is_empty()
    }

    /// A room is only eligible for reclamation once it has no live
    /// connections AND the game has ended (§3: "persists until all
    /// connections drop AND the game has ended"). An empty `NOT_STARTED` or
    /// `IN_PROGRESS` room must be kept so a same-token reconnect can still
    /// find its ghost player and hand (§9's ghost-reconnect decision).
    fn is_reclaimable(&self) -> bool {
        self.is_empty()
            && !self.protected
            && self.game.state == literature_core::game::GameState::Ended
    }
}

fn short_id() -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(12)
        .map(char::from)
        .collect()
}

fn generate_room_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";
    (0..ROOM_ID_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Process-wide index from room code to room.
///
/// Thread-safe: the outer `RwLock` allows concurrent reads (lookups) while
/// writes (create/remove) take exclusive access; each room is individually
/// `Mutex`-protected so independent rooms never contend with each other.
pub struct RoomRegistry {
    rooms: RwLock<HashMap<String, Arc<Mutex<Room>>>>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }

    /// Builds a registry pre-seeded with `count` public rooms of
    /// `"literature"` type, discoverable without an explicit create call.
    /// These rooms are marked `protected` so `remove_if_empty` never reaps
    /// them.
    pub async fn with_public_rooms(count: usize) -> Self {
        let registry = Self::new();
        for _ in 0..count {
            let _ = registry.create_room_inner(DEFAULT_GAME_TYPE, None, true).await;
        }
        registry
    }

    /// Creates a fresh room. If `room_id` is absent, a 6-character
    /// uppercase-alphanumeric code is generated, retried on collision.
    pub async fn create_room(
        &self,
        game_type: &str,
        room_id: Option<&str>,
    ) -> GameResult<Arc<Mutex<Room>>> {
        self.create_room_inner(game_type, room_id, false).await
    }

    async fn create_room_inner(
        &self,
        game_type: &str,
        room_id: Option<&str>,
        protected: bool,
    ) -> GameResult<Arc<Mutex<Room>>> {
        let mut rooms = self.rooms.write().await;

        let room_id = match room_id {
            Some(id) => {
                validate_room_id(id)
                    .map_err(GameError::invalid_argument)?;
                if rooms.contains_key(id) {
                    return Err(GameError::invalid_argument(format!(
                        "room '{id}' already exists"
                    )));
                }
                id.to_string()
            }
            None => {
                let mut rng = rand::rng();
                (0..ROOM_ID_GENERATION_ATTEMPTS)
                    .map(|_| generate_room_id(&mut rng))
                    .find(|candidate| !rooms.contains_key(candidate))
                    .ok_or_else(|| {
                        GameError::illegal_state("could not generate a unique room id")
                    })?
            }
        };

        let room = Arc::new(Mutex::new(Room::new(room_id.clone(), game_type, protected)));
        rooms.insert(room_id, room.clone());
        Ok(room)
    }

    pub async fn get_room(&self, room_id: &str) -> Option<Arc<Mutex<Room>>> {
        self.rooms.read().await.get(room_id).cloned()
    }

    /// Convenience wrapper (§4.5): looks up `action.room_id` and delegates
    /// to that room's dispatch, broadcasting a fresh snapshot to every
    /// connection in the room on success. An unknown `room_id` fails with
    /// `GameError::NotFound` (§7), the same kind every other "no such room"
    /// or "no such player" failure in this codebase uses.
    pub async fn register_action(&self, action: RoomAction) -> GameResult<()> {
        let room = self.get_room(&action.room_id).await.ok_or_else(|| {
            GameError::not_found(format!("room '{}' does not exist", action.room_id))
        })?;
        let mut room = room.lock().await;
        room.dispatch(&action.action_token, action.kind)?;
        room.broadcast_snapshot();
        Ok(())
    }

    /// Lightweight descriptors `(room_id, game_type)` of every room.
    pub async fn list_available_rooms(&self) -> Vec<(String, String)> {
        let rooms = self.rooms.read().await;
        let mut out = Vec::with_capacity(rooms.len());
        for room in rooms.values() {
            let room = room.lock().await;
            out.push((room.room_id.clone(), room.game_type.clone()));
        }
        out
    }

    /// Removes a room if it has no live connections AND its game has ended.
    /// Called after a disconnect; protected (pre-seeded public) rooms are
    /// never reclaimed, matching the reference design's "keep public rooms
    /// indefinitely" choice (§9). An empty room whose game is still
    /// `NOT_STARTED` or `IN_PROGRESS` is kept so a same-token reconnect can
    /// find its ghost player (§3, §9).
    pub async fn remove_if_empty(&self, room_id: &str) {
        let should_remove = {
            let rooms = self.rooms.read().await;
            match rooms.get(room_id) {
                Some(room) => room.lock().await.is_reclaimable(),
                None => return,
            }
        };
        if should_remove {
            let mut rooms = self.rooms.write().await;
            if let Some(room) = rooms.get(room_id) {
                let reap = room.lock().await.is_reclaimable();
                if reap {
                    rooms.remove(room_id);
                    tracing::info!(room_id, "removed empty room");
                }
            }
        }
    }
}

impl Default for RoomRegistry {
    fn default() -> Self {
        Self::new()
    }
}
