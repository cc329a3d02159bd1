use std::collections::{HashSet, VecDeque};

use crate::types::Point;

/// Snake body, head first. A `HashSet` mirror of the segments keeps
/// occupancy checks O(1); the two collections are updated together.
#[derive(Clone, Debug)]
pub struct SnakeBody {
    segments: VecDeque<Point>,
    occupied: HashSet<Point>,
}

impl SnakeBody {
    /// The fixed 3-segment starting configuration: head at the grid
    /// center, extending backward along the Right heading. Segment
    /// coordinates wrap so tiny grids still produce a valid body.
    pub fn starting(grid_size: usize) -> Self {
        let center = grid_size / 2;
        let size = grid_size as i32;
        let mut segments = VecDeque::new();
        let mut occupied = HashSet::new();

        let mut x = center as i32;
        for _ in 0..3 {
            let point = Point::new(x as usize, center);
            segments.push_back(point);
            occupied.insert(point);
            x = (x - 1 + size) % size;
        }

        Self { segments, occupied }
    }

    pub fn head(&self) -> Point {
        *self
            .segments
            .front()
            .expect("snake body is never empty")
    }

    pub fn tail(&self) -> Point {
        *self
            .segments
            .back()
            .expect("snake body is never empty")
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn contains(&self, point: Point) -> bool {
        self.occupied.contains(&point)
    }

    pub fn segments(&self) -> impl Iterator<Item = &Point> {
        self.segments.iter()
    }

    /// Move the head to `new_head`. Without growth the tail cell is
    /// vacated in the same operation, keeping the length constant.
    pub fn advance(&mut self, new_head: Point, grow: bool) {
        self.segments.push_front(new_head);
        self.occupied.insert(new_head);

        if !grow {
            let tail = self
                .segments
                .pop_back()
                .expect("snake body is never empty");
            // The popped cell may still be covered by another segment
            // right after a head-onto-tail move.
            if !self.segments.contains(&tail) {
                self.occupied.remove(&tail);
            }
        }
    }
}
