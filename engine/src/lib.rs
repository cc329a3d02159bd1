pub mod autonomous;
pub mod controlled;
pub mod food;
pub mod pacing;
pub mod rng;
pub mod snake;
pub mod snapshot;
pub mod stepper;
pub mod types;

pub use autonomous::AutonomousGame;
pub use controlled::ControlledGame;
pub use rng::GameRng;
pub use snake::SnakeBody;
pub use snapshot::GameSnapshot;
pub use stepper::{step, Collision, StepResult};
pub use types::{Direction, Mode, Point, Status, DEFAULT_GRID_SIZE, FOOD_SCORE};
