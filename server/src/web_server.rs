use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Path, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

use crate::auth_handler;
use crate::games_handler;
use crate::leaderboard_handler;
use crate::log;
use crate::spectator::SpectatorHub;
use crate::store::{LeaderboardStore, TokenStore, UserStore};
use crate::ws_handler::{handle_play_socket, handle_watch_socket};

/// Injected collaborators shared by every handler. The stores hide
/// behind traits so the web layer never knows what backs them.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub leaderboard: Arc<dyn LeaderboardStore>,
    pub tokens: Arc<TokenStore>,
    pub spectators: Arc<SpectatorHub>,
    pub grid_size: usize,
}

pub async fn run_web_server(state: AppState, bind_address: &str, static_files_path: PathBuf) {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/api/auth/login", post(auth_handler::login))
        .route("/api/auth/register", post(auth_handler::register))
        .route("/api/auth/logout", post(auth_handler::logout))
        .route("/api/auth/me", get(auth_handler::me))
        .route(
            "/api/leaderboard",
            get(leaderboard_handler::get_leaderboard).post(leaderboard_handler::submit_score),
        )
        .route("/api/games/active", get(games_handler::active_games))
        .route("/api/games/{game_id}", get(games_handler::get_game))
        .route("/ws/play", get(play_upgrade_handler))
        .route("/ws/watch/{game_id}", get(watch_upgrade_handler))
        .nest_service("/ui", ServeDir::new(&static_files_path))
        .layer(cors)
        .with_state(state);

    log!("Web server listening on {}", bind_address);

    let listener = tokio::net::TcpListener::bind(bind_address)
        .await
        .expect("Failed to bind web server address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Web server error");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to listen for Ctrl+C");
    log!("Shutdown signal received");
}

async fn play_upgrade_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_play_socket(socket, state))
}

async fn watch_upgrade_handler(
    ws: WebSocketUpgrade,
    Path(game_id): Path<String>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_watch_socket(socket, state, game_id))
}
