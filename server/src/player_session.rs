use std::time::Duration;

use engine::{pacing, ControlledGame, GameRng, Mode, Status};
use tokio::sync::mpsc;
use tokio::time::{interval_at, Instant, Interval};

use crate::log;
use crate::messages::{ClientMessage, ServerMessage};
use crate::store::{LeaderboardStore, NewScore, UserId, UserStore};
use crate::web_server::AppState;

/// Drives one controlled game. The session owns the clock and is the
/// only place the engine is touched, so commands apply strictly between
/// ticks: the select loop takes either the next timer tick or the next
/// queued command, never both at once. A snapshot goes out after every
/// state change.
pub async fn run_player_session(
    state: AppState,
    mut commands: mpsc::UnboundedReceiver<ClientMessage>,
    updates: mpsc::Sender<ServerMessage>,
) {
    let mut game = match ControlledGame::new(Mode::Walls, state.grid_size, GameRng::from_random()) {
        Ok(game) => game,
        Err(e) => {
            let _ = updates.send(ServerMessage::Error { message: e }).await;
            return;
        }
    };

    let mut player: Option<UserId> = None;
    let mut tick_every = pacing::tick_interval(game.score());
    let mut ticker = new_ticker(tick_every);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if game.status() != Status::Playing {
                    continue;
                }

                game.tick();
                let snapshot = game.snapshot();
                let game_over = snapshot.status == Status::GameOver;
                let score = snapshot.score;
                let mode = snapshot.mode;

                if updates.send(ServerMessage::State { state: snapshot }).await.is_err() {
                    break;
                }

                if game_over {
                    let report = report_game_over(&state, player.as_ref(), score, mode);
                    if updates.send(report).await.is_err() {
                        break;
                    }
                }

                // The clock speeds up with the score; re-derive the
                // interval after every published snapshot.
                let want = pacing::tick_interval(game.score());
                if want != tick_every {
                    tick_every = want;
                    ticker = new_ticker(want);
                }
            }
            command = commands.recv() => {
                let Some(command) = command else {
                    break;
                };

                match command {
                    ClientMessage::Connect { token } => {
                        player = token.as_deref().and_then(|t| state.tokens.resolve(t));
                        if let Some(id) = &player {
                            log!("Play session authenticated as user {}", id);
                        }
                    }
                    ClientMessage::Start => game.start(),
                    ClientMessage::Pause => game.pause(),
                    ClientMessage::Reset { mode } => {
                        game.reset(mode);
                        let want = pacing::tick_interval(game.score());
                        if want != tick_every {
                            tick_every = want;
                            ticker = new_ticker(want);
                        }
                    }
                    ClientMessage::Turn { direction } => game.set_heading(direction),
                }

                if updates.send(ServerMessage::State { state: game.snapshot() }).await.is_err() {
                    break;
                }
            }
        }
    }
}

fn new_ticker(period: Duration) -> Interval {
    // A fresh interval fires immediately; anchor the first tick one
    // period out so rescheduling never produces a double step.
    interval_at(Instant::now() + period, period)
}

/// Game-over boundary: the engine only exposes the transition; crediting
/// the leaderboard and the high-score comparison happen here, against
/// the stats recorded before this game.
fn report_game_over(
    state: &AppState,
    player: Option<&UserId>,
    score: u32,
    mode: Mode,
) -> ServerMessage {
    let user = player.and_then(|id| state.users.get(id));

    match user {
        Some(user) if score > 0 => {
            let rank = state.leaderboard.submit(NewScore {
                username: user.username.clone(),
                score,
                mode,
            });
            let new_high_score = score > user.high_score;
            state.users.record_game(&user.id, score);
            log!(
                "Game over for {}: {} points in {} mode, rank {}",
                user.username,
                score,
                mode.name(),
                rank
            );
            ServerMessage::GameOver {
                score,
                mode,
                rank: Some(rank),
                new_high_score,
            }
        }
        _ => ServerMessage::GameOver {
            score,
            mode,
            rank: None,
            new_high_score: false,
        },
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::spectator::SpectatorHub;
    use crate::store::{MemoryLeaderboard, MemoryUserStore, TokenStore, UserStore};

    fn test_state() -> AppState {
        AppState {
            users: Arc::new(MemoryUserStore::new()),
            leaderboard: Arc::new(MemoryLeaderboard::new()),
            tokens: Arc::new(TokenStore::new()),
            spectators: Arc::new(SpectatorHub::start(&[], 20).unwrap()),
            grid_size: 20,
        }
    }

    #[tokio::test]
    async fn test_game_over_without_identity_is_not_submitted() {
        let state = test_state();
        let report = report_game_over(&state, None, 50, Mode::Walls);
        assert!(matches!(
            report,
            ServerMessage::GameOver { rank: None, new_high_score: false, .. }
        ));
        assert!(state.leaderboard.list(None).is_empty());
    }

    #[tokio::test]
    async fn test_zero_score_game_is_not_submitted() {
        let state = test_state();
        let user = state.users.register("SnakeMaster", "master@snake.example", "pw123456");
        let report = report_game_over(&state, Some(&user.id), 0, Mode::Walls);
        assert!(matches!(report, ServerMessage::GameOver { rank: None, .. }));
        assert!(state.leaderboard.list(None).is_empty());
    }

    #[tokio::test]
    async fn test_authenticated_game_over_submits_and_flags_high_score() {
        let state = test_state();
        let user = state.users.register("SnakeMaster", "master@snake.example", "pw123456");

        let report = report_game_over(&state, Some(&user.id), 120, Mode::Walls);
        let ServerMessage::GameOver { rank, new_high_score, .. } = report else {
            panic!("expected a game over report");
        };
        assert_eq!(rank, Some(1));
        assert!(new_high_score);

        let updated = state.users.get(&user.id).unwrap();
        assert_eq!(updated.high_score, 120);
        assert_eq!(updated.games_played, 1);

        // A worse follow-up game is ranked but is no new high score.
        let report = report_game_over(&state, Some(&user.id), 30, Mode::Walls);
        let ServerMessage::GameOver { rank, new_high_score, .. } = report else {
            panic!("expected a game over report");
        };
        assert_eq!(rank, Some(2));
        assert!(!new_high_score);
    }
}
