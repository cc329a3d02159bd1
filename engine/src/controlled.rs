use crate::food::place_food;
use crate::rng::GameRng;
use crate::snake::SnakeBody;
use crate::snapshot::GameSnapshot;
use crate::stepper;
use crate::types::{Direction, Mode, Point, Status, FOOD_SCORE};

/// Player-driven engine. An external clock calls `tick` while the game
/// is playing; direction changes arrive out-of-band through
/// `set_heading` and are applied at the start of the next tick.
pub struct ControlledGame {
    snake: SnakeBody,
    food: Point,
    heading: Direction,
    pending_heading: Option<Direction>,
    score: u32,
    status: Status,
    mode: Mode,
    grid_size: usize,
    rng: GameRng,
}

impl ControlledGame {
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
            pending_heading: None,
            score: 0,
            status: Status::Idle,
            mode,
            grid_size,
            rng,
        })
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn start(&mut self) {
        if matches!(self.status, Status::Idle | Status::GameOver) {
            self.status = Status::Playing;
        }
    }

    /// Toggles between playing and paused; ignored in any other state.
    pub fn pause(&mut self) {
        self.status = match self.status {
            Status::Playing => Status::Paused,
            Status::Paused => Status::Playing,
            other => other,
        };
    }

    /// Back to the starting configuration. The mode argument is honored
    /// only while the game is idle or over; a reset mid-game keeps the
    /// mode the instance was created with.
    pub fn reset(&mut self, mode: Option<Mode>) {
        if let Some(mode) = mode
            && matches!(self.status, Status::Idle | Status::GameOver)
        {
            self.mode = mode;
        }

        self.snake = SnakeBody::starting(self.grid_size);
        self.food = place_food(&mut self.rng, &self.snake, self.grid_size);
        self.heading = Direction::Right;
        self.pending_heading = None;
        self.score = 0;
        self.status = Status::Idle;
    }

    /// Queue a heading for the next tick. Reversals and repeats of the
    /// applied heading are silently ignored; the mailbox holds a single
    /// slot, so the most recent accepted heading wins.
    pub fn set_heading(&mut self, heading: Direction) {
        if heading != self.heading && !heading.is_opposite(&self.heading) {
            self.pending_heading = Some(heading);
        }
    }

    pub fn tick(&mut self) {
        if self.status != Status::Playing {
            return;
        }

        if let Some(heading) = self.pending_heading.take() {
            self.heading = heading;
        }

        match stepper::step(&self.snake, self.heading, self.mode, self.grid_size) {
            Err(_) => {
                // Collisions are a state transition, not a fault; the
                // snake stays where it was.
                self.status = Status::GameOver;
            }
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

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::capture(
            &self.snake,
            self.food,
            self.heading,
            self.score,
            self.status,
            self.mode,
            self.grid_size,
        )
    }

    #[cfg(test)]
    fn set_food(&mut self, food: Point) {
        self.food = food;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn started_game(mode: Mode) -> ControlledGame {
        let mut game = ControlledGame::new(mode, 20, GameRng::new(42)).unwrap();
        game.start();
        // Keep the food out of the snake's path unless a test says so.
        game.set_food(Point::new(0, 0));
        game
    }

    #[test]
    fn test_new_game_is_idle_with_three_segments() {
        let game = ControlledGame::new(Mode::Walls, 20, GameRng::new(1)).unwrap();
        let snap = game.snapshot();
        assert_eq!(snap.status, Status::Idle);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.direction, Direction::Right);
        assert_eq!(snap.snake.len(), 3);
        assert_eq!(snap.snake[0], Point::new(10, 10));
        assert!(!snap.snake.contains(&snap.food));
    }

    #[test]
    fn test_zero_grid_size_is_rejected() {
        assert!(ControlledGame::new(Mode::Walls, 0, GameRng::new(1)).is_err());
    }

    #[test]
    fn test_tick_is_inert_unless_playing() {
        let mut game = ControlledGame::new(Mode::Walls, 20, GameRng::new(1)).unwrap();
        game.tick();
        assert_eq!(game.snapshot().snake[0], Point::new(10, 10));
    }

    #[test]
    fn test_tick_moves_head_along_heading() {
        let mut game = started_game(Mode::Walls);
        game.tick();
        let snap = game.snapshot();
        assert_eq!(snap.snake[0], Point::new(11, 10));
        assert_eq!(snap.snake.len(), 3);
        assert_eq!(snap.score, 0);
    }

    #[test]
    fn test_wall_collision_ends_game_without_moving() {
        // Scenario: head driven to (19,10) heading Right in walls mode.
        let mut game = started_game(Mode::Walls);
        for _ in 0..9 {
            game.tick();
        }
        let before = game.snapshot();
        assert_eq!(before.snake[0], Point::new(19, 10));

        game.tick();
        let after = game.snapshot();
        assert_eq!(after.status, Status::GameOver);
        assert_eq!(after.snake, before.snake);
        assert_eq!(after.score, before.score);
    }

    #[test]
    fn test_passthrough_wraps_instead_of_ending() {
        let mut game = started_game(Mode::Passthrough);
        for _ in 0..10 {
            game.tick();
        }
        let snap = game.snapshot();
        assert_eq!(snap.snake[0], Point::new(0, 10));
        assert_eq!(snap.status, Status::Playing);
        assert_eq!(snap.snake.len(), 3);
    }

    #[test]
    fn test_eating_food_grows_scores_and_replaces() {
        let mut game = started_game(Mode::Walls);
        game.set_food(Point::new(11, 10));
        game.tick();
        let snap = game.snapshot();
        assert_eq!(snap.snake[0], Point::new(11, 10));
        assert_eq!(snap.snake.len(), 4);
        assert_eq!(snap.score, FOOD_SCORE);
        assert!(!snap.snake.contains(&snap.food));
        assert_ne!(snap.food, Point::new(11, 10));
    }

    #[test]
    fn test_reversal_is_rejected() {
        let mut game = started_game(Mode::Walls);
        game.set_heading(Direction::Left);
        game.tick();
        let snap = game.snapshot();
        assert_eq!(snap.direction, Direction::Right);
        assert_eq!(snap.snake[0], Point::new(11, 10));
    }

    #[test]
    fn test_reversal_checked_against_applied_heading_across_ticks() {
        let mut game = started_game(Mode::Walls);
        game.set_heading(Direction::Up);
        game.tick();
        assert_eq!(game.snapshot().direction, Direction::Up);
        // Down would reverse the heading applied on the previous tick.
        game.set_heading(Direction::Down);
        game.tick();
        assert_eq!(game.snapshot().direction, Direction::Up);
    }

    #[test]
    fn test_latest_queued_heading_wins() {
        let mut game = started_game(Mode::Walls);
        game.set_heading(Direction::Up);
        game.set_heading(Direction::Down);
        game.tick();
        assert_eq!(game.snapshot().direction, Direction::Down);
    }

    #[test]
    fn test_rejected_heading_does_not_clobber_queued_one() {
        let mut game = started_game(Mode::Walls);
        game.set_heading(Direction::Up);
        game.set_heading(Direction::Left); // reversal, ignored
        game.tick();
        assert_eq!(game.snapshot().direction, Direction::Up);
    }

    #[test]
    fn test_pause_freezes_position_until_resumed() {
        let mut game = started_game(Mode::Walls);
        game.tick();
        game.pause();
        assert_eq!(game.snapshot().status, Status::Paused);

        let frozen = game.snapshot().snake;
        for _ in 0..5 {
            game.tick();
        }
        assert_eq!(game.snapshot().snake, frozen);

        game.pause();
        assert_eq!(game.snapshot().status, Status::Playing);
        game.tick();
        assert_ne!(game.snapshot().snake, frozen);
    }

    #[test]
    fn test_pause_is_ignored_when_idle_or_over() {
        let mut game = ControlledGame::new(Mode::Walls, 20, GameRng::new(2)).unwrap();
        game.pause();
        assert_eq!(game.snapshot().status, Status::Idle);
    }

    #[test]
    fn test_self_collision_ends_game() {
        let mut game = started_game(Mode::Walls);
        game.set_food(Point::new(11, 10));
        game.tick();
        game.set_food(Point::new(12, 10));
        game.tick(); // length 5
        game.set_food(Point::new(0, 0));
        // Tight turn folds the head back onto the body.
        game.set_heading(Direction::Down);
        game.tick();
        game.set_heading(Direction::Left);
        game.tick();
        game.set_heading(Direction::Up);
        game.tick();
        assert_eq!(game.snapshot().status, Status::GameOver);
    }

    #[test]
    fn test_chasing_the_tail_is_not_a_collision() {
        // A length-4 snake turning in a 2x2 loop enters the cell its
        // tail vacates on every tick; that is legal indefinitely.
        let mut game = started_game(Mode::Walls);
        game.set_food(Point::new(11, 10));
        game.tick(); // length 4
        game.set_food(Point::new(0, 0));
        for heading in [
            Direction::Down,
            Direction::Left,
            Direction::Up,
            Direction::Right,
            Direction::Down,
            Direction::Left,
            Direction::Up,
        ] {
            game.set_heading(heading);
            game.tick();
            assert_eq!(game.snapshot().status, Status::Playing);
        }
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut game = started_game(Mode::Walls);
        game.set_food(Point::new(11, 10));
        game.tick();
        game.reset(None);
        let snap = game.snapshot();
        assert_eq!(snap.status, Status::Idle);
        assert_eq!(snap.score, 0);
        assert_eq!(snap.direction, Direction::Right);
        assert_eq!(snap.snake[0], Point::new(10, 10));
        assert_eq!(snap.snake.len(), 3);
        assert_eq!(snap.mode, Mode::Walls);
    }

    #[test]
    fn test_reset_clears_queued_heading() {
        let mut game = started_game(Mode::Walls);
        game.set_heading(Direction::Up);
        game.reset(None);
        game.start();
        game.tick();
        assert_eq!(game.snapshot().direction, Direction::Right);
    }

    #[test]
    fn test_mode_change_only_while_idle_or_over() {
        let mut game = started_game(Mode::Walls);
        game.reset(Some(Mode::Passthrough));
        // Reset was issued mid-game: position resets, mode does not.
        assert_eq!(game.snapshot().mode, Mode::Walls);

        game.reset(Some(Mode::Passthrough));
        // Now idle, so the mode switch is honored.
        assert_eq!(game.snapshot().mode, Mode::Passthrough);
    }

    #[test]
    fn test_start_resumes_after_game_over() {
        let mut game = started_game(Mode::Walls);
        for _ in 0..10 {
            game.tick();
        }
        assert_eq!(game.snapshot().status, Status::GameOver);
        game.reset(None);
        game.start();
        assert_eq!(game.snapshot().status, Status::Playing);
    }

    #[test]
    fn test_start_does_not_resume_a_paused_game() {
        let mut game = started_game(Mode::Walls);
        game.pause();
        game.start();
        assert_eq!(game.snapshot().status, Status::Paused);
    }

    #[test]
    fn test_score_is_monotonic_within_a_game() {
        // Straight-line passthrough laps with randomly placed food: the
        // snake may eat but can never die, so the score only climbs.
        let mut game = ControlledGame::new(Mode::Passthrough, 20, GameRng::new(7)).unwrap();
        game.start();
        let mut last_score = 0;
        for _ in 0..200 {
            game.tick();
            let snap = game.snapshot();
            assert!(snap.score >= last_score);
            last_score = snap.score;
            for p in &snap.snake {
                assert!(p.x < 20 && p.y < 20);
            }
        }
    }
}
