use serde::Serialize;

use crate::snake::SnakeBody;
use crate::types::{Direction, Mode, Point, Status};

/// Immutable view of a game, published after every command and every
/// tick. Consumers never see (or mutate) the live engine state.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub snake: Vec<Point>,
    pub food: Point,
    pub direction: Direction,
    pub score: u32,
    pub status: Status,
    pub mode: Mode,
    pub grid_size: usize,
}

impl GameSnapshot {
    pub(crate) fn capture(
        body: &SnakeBody,
        food: Point,
        direction: Direction,
        score: u32,
        status: Status,
        mode: Mode,
        grid_size: usize,
    ) -> Self {
        Self {
            snake: body.segments().copied().collect(),
            food,
            direction,
            score,
            status,
            mode,
            grid_size,
        }
    }
}
