//! Axum server for the Literature card game.
//!
//! # Routes
//!
//! | Method | Path                                        | Description                     |
//! |--------|---------------------------------------------|----------------------------------|
//! | `GET`  | `/ws/room/:room_id/:user_token/:username`    | WebSocket upgrade, one per connection |
//! | `GET`  | `/api/rooms`                                 | List available rooms (JSON)     |
//!
//! Room creation and authentication are external collaborators (§1): this
//! binary only wires up the in-memory Registry, the Room dispatcher, and the
//! WebSocket Session Consumer described in the design.

mod room;
mod ws_handler;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::ws::WebSocketUpgrade;
use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing_subscriber::EnvFilter;

use room::RoomRegistry;
use ws_handler::ConnectParams;

const DEFAULT_PUBLIC_ROOM_COUNT: usize = 5;

/// Shared application state available to all handlers.
#[derive(Clone)]
struct AppState {
    registry: Arc<RoomRegistry>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let seed_count: usize = std::env::var("PUBLIC_ROOM_SEED_COUNT")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_PUBLIC_ROOM_COUNT);

    let state = AppState {
        registry: Arc::new(RoomRegistry::with_public_rooms(seed_count).await),
    };

    let app = Router::new()
        .route("/ws/room/{room_id}/{user_token}/{username}", get(ws_upgrade))
        .route("/api/rooms", get(rooms_handler))
        .layer(CorsLayer::permissive())
        .with_state(state);

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!(%addr, seed_count, "literature server listening");

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}

/// `GET /ws/room/:room_id/:user_token/:username` — upgrade and hand off to
/// [`ws_handler::handle_socket`]. All three path segments are required by
/// the route pattern itself, so a missing one never reaches the handler.
async fn ws_upgrade(
    Path((room_id, user_token, username)): Path<(String, String, String)>,
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    let params = ConnectParams {
        room_id,
        user_token,
        username,
    };
    ws.on_upgrade(move |socket| ws_handler::handle_socket(socket, params, state.registry))
}

#[derive(Serialize)]
struct RoomDescriptor {
    room_id: String,
    game_type: String,
}

/// `GET /api/rooms` — lightweight descriptors of every known room,
/// realizing §4.5's `list_available_rooms`.
async fn rooms_handler(State(state): State<AppState>) -> Json<Vec<RoomDescriptor>> {
    let rooms = state
        .registry
        .list_available_rooms()
        .await
        .into_iter()
        .map(|(room_id, game_type)| RoomDescriptor { room_id, game_type })
        .collect();
    Json(rooms)
}
