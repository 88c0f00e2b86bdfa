use std::collections::VecDeque;

use crate::canvas::Canvas;
use crate::geometry::{Direction, Point};

/// The player's body. Front of the deque is the tail, back is the head.
///
/// Storage is reserved once for `capacity` cells (maximum length plus one slack slot,
/// so a tick can extend before it decides whether to cut) and never grows past it.
#[derive(Clone, Debug, PartialEq)]
pub struct Snake {
    body: VecDeque<Point>,
    capacity: usize,
}

impl Snake {
    /// Lays out `length` contiguous cells starting at `tail` and running along
    /// `heading`, lighting each one.
    pub fn new(
        tail: Point,
        heading: Direction,
        length: usize,
        capacity: usize,
        canvas: &mut Canvas,
    ) -> Self {
        assert!(length >= 1, "snake needs at least one cell");
        assert!(length <= capacity, "initial length exceeds capacity");

        let mut snake = Snake {
            body: VecDeque::with_capacity(capacity),
            capacity,
        };
        snake.body.push_back(tail);
        canvas.set_pixel(tail, true);
        for _ in 1..length {
            snake.extend(heading, canvas);
        }
        snake
    }

    /// Grows a new head one step along `direction`, wrapping around the grid.
    pub fn extend(&mut self, direction: Direction, canvas: &mut Canvas) {
        assert!(
            self.body.len() < self.capacity,
            "extend called on a full snake (capacity {})",
            self.capacity
        );
        let new_head = self.head().wrapped_add(direction.into(), canvas.size());
        self.body.push_back(new_head);
        canvas.set_pixel(new_head, true);
    }

    /// Drops the tail cell. The pixel stays lit if the head has just moved onto it.
    pub fn cut(&mut self, canvas: &mut Canvas) {
        if self.body.len() <= 1 {
            return;
        }
        if let Some(tail) = self.body.pop_front() {
            if !self.is_occupied(tail) {
                canvas.set_pixel(tail, false);
            }
        }
    }

    pub fn is_occupied(&self, point: Point) -> bool {
        self.body.contains(&point)
    }

    /// Only valid right after a complete move: the head is the only cell that can
    /// have newly landed on another.
    pub fn check_self_collision(&self) -> bool {
        let head = self.head();
        self.body.iter().take(self.body.len() - 1).any(|cell| *cell == head)
    }

    pub fn head(&self) -> Point {
        self.body[self.body.len() - 1]
    }

    pub fn tail(&self) -> Point {
        self.body[0]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Cells from tail to head.
    pub fn cells(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    #[cfg(test)]
    pub(crate) fn from_cells(cells: &[Point], capacity: usize, canvas: &mut Canvas) -> Self {
        assert!(!cells.is_empty() && cells.len() <= capacity);
        let mut body = VecDeque::with_capacity(capacity);
        for cell in cells {
            body.push_back(*cell);
            canvas.set_pixel(*cell, true);
        }
        Snake { body, capacity }
    }
}
