use crate::rng::GameRng;
use crate::snake::SnakeBody;
use crate::types::Point;

const PLACEMENT_ATTEMPTS: usize = 100;

/// Pick a uniformly random cell not covered by the snake. Rejection
/// sampling first; a long snake falls back to scanning for the first
/// free cell so placement never spins.
pub fn place_food(rng: &mut GameRng, body: &SnakeBody, grid_size: usize) -> Point {
    for _ in 0..PLACEMENT_ATTEMPTS {
        let pos = Point::new(
            rng.random_range(0..grid_size),
            rng.random_range(0..grid_size),
        );
        if !body.contains(pos) {
            return pos;
        }
    }

    for y in 0..grid_size {
        for x in 0..grid_size {
            let pos = Point::new(x, y);
            if !body.contains(pos) {
                return pos;
            }
        }
    }

    // Board completely covered by the snake; nowhere left to place.
    body.tail()
}
