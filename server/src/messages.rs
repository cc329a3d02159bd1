use engine::{Direction, GameSnapshot, Mode};
use serde::{Deserialize, Serialize};

/// Commands a playing client sends over the websocket. `connect`
/// optionally carries a bearer token so a finished game can be credited
/// to an account.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    Connect { token: Option<String> },
    Start,
    Pause,
    Reset { mode: Option<Mode> },
    Turn { direction: Direction },
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerMessage {
    State {
        state: GameSnapshot,
    },
    GameOver {
        score: u32,
        mode: Mode,
        rank: Option<u32>,
        new_high_score: bool,
    },
    Error {
        message: String,
    },
}
