use crate::snake::SnakeBody;
use crate::types::{Direction, Mode, Point};

/// Why a step could not advance the snake.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Collision {
    Wall,
    SelfHit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StepResult {
    pub new_head: Point,
    /// True when either axis wrapped around the grid edge (passthrough).
    pub wrapped: bool,
}

fn wrapping_inc(value: usize, max: usize) -> usize {
    if value + 1 >= max { 0 } else { value + 1 }
}

fn wrapping_dec(value: usize, max: usize) -> usize {
    if value == 0 { max - 1 } else { value - 1 }
}

/// Grid transition function shared by both engine variants: offset the
/// head one cell along `heading` and resolve the boundary rule. Pure —
/// the caller decides growth and food placement.
///
/// Entering the current tail cell is not a self-collision: that cell is
/// vacated on the same tick (the growth case cannot land there because
/// food is never placed on the body).
pub fn step(
    body: &SnakeBody,
    heading: Direction,
    mode: Mode,
    grid_size: usize,
) -> Result<StepResult, Collision> {
    let head = body.head();

    let (new_head, wrapped) = match mode {
        Mode::Walls => {
            let new_head = match heading {
                Direction::Up => {
                    if head.y == 0 {
                        return Err(Collision::Wall);
                    }
                    Point::new(head.x, head.y - 1)
                }
                Direction::Down => {
                    if head.y + 1 >= grid_size {
                        return Err(Collision::Wall);
                    }
                    Point::new(head.x, head.y + 1)
                }
                Direction::Left => {
                    if head.x == 0 {
                        return Err(Collision::Wall);
                    }
                    Point::new(head.x - 1, head.y)
                }
                Direction::Right => {
                    if head.x + 1 >= grid_size {
                        return Err(Collision::Wall);
                    }
                    Point::new(head.x + 1, head.y)
                }
            };
            (new_head, false)
        }
        Mode::Passthrough => match heading {
            Direction::Up => (
                Point::new(head.x, wrapping_dec(head.y, grid_size)),
                head.y == 0,
            ),
            Direction::Down => (
                Point::new(head.x, wrapping_inc(head.y, grid_size)),
                head.y + 1 >= grid_size,
            ),
            Direction::Left => (
                Point::new(wrapping_dec(head.x, grid_size), head.y),
                head.x == 0,
            ),
            Direction::Right => (
                Point::new(wrapping_inc(head.x, grid_size), head.y),
                head.x + 1 >= grid_size,
            ),
        },
    };

    if body.contains(new_head) && new_head != body.tail() {
        return Err(Collision::SelfHit);
    }

    Ok(StepResult { new_head, wrapped })
}
