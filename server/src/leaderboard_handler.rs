use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use engine::Mode;
use serde::{Deserialize, Serialize};

use crate::auth_handler::authenticated_user;
use crate::store::{LeaderboardEntry, LeaderboardStore, NewScore, UserStore};
use crate::web_server::AppState;

#[derive(Debug, Deserialize)]
pub struct LeaderboardQuery {
    pub mode: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SubmitScoreRequest {
    pub score: u32,
    pub mode: Mode,
}

#[derive(Debug, Serialize)]
pub struct ScoreResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rank: Option<u32>,
}

pub async fn get_leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<Json<Vec<LeaderboardEntry>>, (StatusCode, String)> {
    let mode = match query.mode.as_deref() {
        None => None,
        Some(name) => Some(Mode::from_name(name).ok_or((
            StatusCode::BAD_REQUEST,
            format!("Unknown mode: {}", name),
        ))?),
    };
    Ok(Json(state.leaderboard.list(mode)))
}

/// Score submission for games played outside a server-driven session
/// (the in-session path reports directly at game over).
pub async fn submit_score(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<SubmitScoreRequest>,
) -> Result<Json<ScoreResponse>, StatusCode> {
    let user = authenticated_user(&state, &headers).ok_or(StatusCode::UNAUTHORIZED)?;

    let rank = state.leaderboard.submit(NewScore {
        username: user.username.clone(),
        score: request.score,
        mode: request.mode,
    });
    state.users.record_game(&user.id, request.score);

    Ok(Json(ScoreResponse {
        success: true,
        rank: Some(rank),
    }))
}
