use crate::food::place_food;
use crate::rng::GameRng;
use crate::snake::SnakeBody;
use crate::snapshot::GameSnapshot;
use crate::stepper;
use crate::types::{Direction, Mode, Point, Status, FOOD_SCORE};

/// Chance per tick that the chase heading is recomputed; otherwise the
/// previous heading is reused, which gives the spectator snake its
/// meandering look.
const GREEDY_PROBABILITY: f64 = 0.7;

/// Self-driving engine for spectator display. Same stepping rules as
/// the controlled variant, but the heading comes from a greedy chase
/// policy and a collision silently restarts the run on the same clock —
/// there is no terminal state.
pub struct AutonomousGame {
    snake: SnakeBody,
    food: Point,
    heading: Direction,
    score: u32,
    mode: Mode,
    grid_size: usize,
    rng: GameRng,
}

impl AutonomousGame {
    pub fn new(mode: Mode, grid_size: usize, mut rng: GameRng) -> Result<Self, String> {
        if grid_size == 0 {
            return Err("grid size must be greater than 0".to_string());
        }

        let snake = SnakeBody::starting(grid_size);
        let food = place_food(&mut rng, &snake, grid_size);

        Ok(Self {
            snake,
            food,
            heading: Direction::Right,
            score: 0,
            mode,
            grid_size,
            rng,
        })
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn tick(&mut self) {
        if self.rng.random::<f64>() < GREEDY_PROBABILITY {
            let candidate = greedy_heading(self.snake.head(), self.food);
            // A reversal would be suicide; keep the previous heading.
            if !candidate.is_opposite(&self.heading) {
                self.heading = candidate;
            }
        }

        match stepper::step(&self.snake, self.heading, self.mode, self.grid_size) {
            Err(_) => self.reset_in_place(),
            Ok(result) => {
                let ate = result.new_head == self.food;
                self.snake.advance(result.new_head, ate);
                if ate {
                    self.score += FOOD_SCORE;
                    self.food = place_food(&mut self.rng, &self.snake, self.grid_size);
                }
            }
        }
    }

    fn reset_in_place(&mut self) {
        self.snake = SnakeBody::starting(self.grid_size);
        self.food = place_food(&mut self.rng, &self.snake, self.grid_size);
        self.heading = Direction::Right;
        self.score = 0;
    }

    /// Spectator games are always playing.
    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(
            &self.snake,
            self.food,
            self.heading,
            self.score,
            Status::Playing,
            self.mode,
            self.grid_size,
        )
    }

    #[cfg(test)]
    fn set_food(&mut self, food: Point) {
        self.food = food;
    }
}

/// Chase heading: close the larger of the two axis gaps toward the
/// food, horizontal on ties.
pub fn greedy_heading(head: Point, food: Point) -> Direction {
    let dx = food.x as i64 - head.x as i64;
    let dy = food.y as i64 - head.y as i64;

    if dx.abs() >= dy.abs() {
        if dx > 0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else if dy > 0 {
        Direction::Down
    } else {
        Direction::Up
    }
}
