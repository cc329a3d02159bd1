use chrono::{DateTime, Utc};
use engine::{pacing, AutonomousGame, GameRng, GameSnapshot, Mode};
use serde::Serialize;
use tokio::sync::watch;
use tokio::time::interval;

use crate::log;
use crate::server_config::SpectatorGameConfig;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveGameInfo {
    pub id: String,
    pub username: String,
    pub score: u32,
    pub mode: Mode,
    pub started_at: DateTime<Utc>,
}

struct SpectatorSession {
    id: String,
    name: String,
    mode: Mode,
    started_at: DateTime<Utc>,
    state_rx: watch::Receiver<GameSnapshot>,
}

impl SpectatorSession {
    fn info(&self) -> ActiveGameInfo {
        ActiveGameInfo {
            id: self.id.clone(),
            username: self.name.clone(),
            score: self.state_rx.borrow().score,
            mode: self.mode,
            started_at: self.started_at,
        }
    }
}

/// Always-on autonomous games for the "watch others play" page. One
/// task per configured game, started once at boot; watchers subscribe
/// to the latest-state channel and never touch the engine itself.
pub struct SpectatorHub {
    sessions: Vec<SpectatorSession>,
}

impl SpectatorHub {
    pub fn start(configs: &[SpectatorGameConfig], grid_size: usize) -> Result<Self, String> {
        let mut sessions = Vec::new();

        for (index, config) in configs.iter().enumerate() {
            let id = format!("game-{}", index + 1);
            let game = AutonomousGame::new(config.mode, grid_size, GameRng::from_random())?;
            let (state_tx, state_rx) = watch::channel(game.snapshot());
            tokio::spawn(run_spectator_session(game, state_tx));

            log!(
                "Spectator game {} ({}) running in {} mode",
                id,
                config.name,
                config.mode.name()
            );
            sessions.push(SpectatorSession {
                id,
                name: config.name.clone(),
                mode: config.mode,
                started_at: Utc::now(),
                state_rx,
            });
        }

        Ok(Self { sessions })
    }

    pub fn list(&self) -> Vec<ActiveGameInfo> {
        self.sessions.iter().map(|s| s.info()).collect()
    }

    pub fn get(&self, id: &str) -> Option<ActiveGameInfo> {
        self.sessions.iter().find(|s| s.id == id).map(|s| s.info())
    }

    pub fn subscribe(&self, id: &str) -> Option<watch::Receiver<GameSnapshot>> {
        self.sessions
            .iter()
            .find(|s| s.id == id)
            .map(|s| s.state_rx.clone())
    }
}

async fn run_spectator_session(mut game: AutonomousGame, updates: watch::Sender<GameSnapshot>) {
    let mut ticker = interval(pacing::AUTONOMOUS_TICK);
    loop {
        ticker.tick().await;
        game.tick();
        if updates.send(game.snapshot()).is_err() {
            // Hub dropped; the show is over.
            break;
        }
    }
}
