use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::spectator::ActiveGameInfo;
use crate::web_server::AppState;

pub async fn active_games(State(state): State<AppState>) -> Json<Vec<ActiveGameInfo>> {
    Json(state.spectators.list())
}

pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<Json<ActiveGameInfo>, StatusCode> {
    state
        .spectators
        .get(&game_id)
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}
