use log::{debug, warn};
use rand::seq::IteratorRandom;
use rand::Rng;

use crate::canvas::Canvas;
use crate::geometry::Point;
use crate::snake::Snake;

/// Rejected samples allowed per grid cell before placement stops guessing and
/// enumerates the free cells instead.
const PLACEMENT_ATTEMPTS_PER_CELL: usize = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefillStrategy {
    /// Top up to the full count whenever anything is missing.
    Immediate,
    /// Wait until every piece is eaten, then refill all at once.
    LazyBatch,
}

impl RefillStrategy {
    /// How many pieces to place given the current and configured counts.
    pub fn shortfall(self, current: usize, capacity: usize) -> usize {
        match self {
            RefillStrategy::Immediate => capacity.saturating_sub(current),
            RefillStrategy::LazyBatch if current == 0 => capacity,
            RefillStrategy::LazyBatch => 0,
        }
    }
}

/// Active food cells, unordered. Never holds more than `capacity` pieces and never
/// overlaps itself or the snake.
#[derive(Clone, Debug, PartialEq)]
pub struct FoodSet {
    cells: Vec<Point>,
    capacity: usize,
}

impl FoodSet {
    pub fn new(capacity: usize) -> Self {
        FoodSet {
            cells: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Places up to `count` pieces on cells free of both the snake and existing food,
    /// returning how many were placed. Fewer than `count` only happens when the grid
    /// (or the set's capacity) runs out of room.
    pub fn place_food(
        &mut self,
        snake: &Snake,
        count: usize,
        canvas: &mut Canvas,
        rng: &mut impl Rng,
    ) -> usize {
        let size = canvas.size();
        let wanted = count.min(self.capacity - self.cells.len());
        let mut attempts_left = PLACEMENT_ATTEMPTS_PER_CELL * size.cells();
        let mut placed = 0;

        while placed < wanted {
            let candidate = if attempts_left > 0 {
                attempts_left -= 1;
                let pos = Point {
                    x: rng.gen_range(0..size.columns),
                    y: rng.gen_range(0..size.rows),
                };
                if self.is_free(snake, pos) {
                    pos
                } else {
                    continue;
                }
            } else {
                match size.points().filter(|p| self.is_free(snake, *p)).choose(rng) {
                    Some(pos) => pos,
                    None => {
                        warn!(
                            "No free cell left for food: placed {} of {} requested",
                            placed, count
                        );
                        break;
                    }
                }
            };

            self.cells.push(candidate);
            canvas.set_pixel(candidate, true);
            placed += 1;
            debug!("Placed food at ({}, {})", candidate.x, candidate.y);
        }

        placed
    }

    fn is_free(&self, snake: &Snake, pos: Point) -> bool {
        !snake.is_occupied(pos) && !self.contains(pos)
    }

    /// Removes the piece at `pos`, if any. Order of the remaining pieces is not kept.
    pub fn try_eat(&mut self, pos: Point) -> bool {
        if let Some(index) = self.cells.iter().position(|cell| *cell == pos) {
            self.cells.swap_remove(index);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, pos: Point) -> bool {
        self.cells.contains(&pos)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> impl Iterator<Item = &Point> {
        self.cells.iter()
    }

    #[cfg(test)]
    pub(crate) fn insert(&mut self, pos: Point, canvas: &mut Canvas) {
        assert!(self.cells.len() < self.capacity && !self.contains(pos));
        self.cells.push(pos);
        canvas.set_pixel(pos, true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{Direction, GridSize};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid(columns: u16, rows: u16) -> Canvas {
        Canvas::new(GridSize { columns, rows })
    }

    #[test]
    fn test_placed_food_never_overlaps() {
        for seed in 0..200 {
            let mut canvas = grid(8, 6);
            let snake = Snake::new(Point::new(0, 2), Direction::Right, 6, 12, &mut canvas);
            let mut food = FoodSet::new(10);
            let mut rng = StdRng::seed_from_u64(seed);

            assert_eq!(food.place_food(&snake, 10, &mut canvas, &mut rng), 10);

            let cells: Vec<_> = food.iter().copied().collect();
            for (i, cell) in cells.iter().enumerate() {
                assert!(!snake.is_occupied(*cell), "seed {seed}: food on snake");
                assert!(!cells[i + 1..].contains(cell), "seed {seed}: duplicate food");
                assert!(canvas.get_pixel(*cell));
            }
        }
    }

    #[test]
    fn test_place_food_fills_nearly_full_grid() {
        // 3x2 grid, snake covers 4 cells: exactly 2 free.
        let mut canvas = grid(3, 2);
        let snake = Snake::from_cells(
            &[
                Point::new(0, 0),
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(2, 1),
            ],
            5,
            &mut canvas,
        );
        let mut food = FoodSet::new(2);
        let mut rng = StdRng::seed_from_u64(7);

        assert_eq!(food.place_food(&snake, 2, &mut canvas, &mut rng), 2);
        assert!(food.contains(Point::new(0, 1)));
        assert!(food.contains(Point::new(1, 1)));
        assert_eq!(canvas.lit_count(), 6);
    }

    #[test]
    fn test_place_food_stops_when_grid_is_full() {
        let mut canvas = grid(2, 2);
        let snake = Snake::from_cells(
            &[Point::new(0, 0), Point::new(1, 0), Point::new(1, 1)],
            4,
            &mut canvas,
        );
        let mut food = FoodSet::new(3);
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(food.place_food(&snake, 3, &mut canvas, &mut rng), 1);
        assert_eq!(food.len(), 1);
        assert!(food.contains(Point::new(0, 1)));
    }

    #[test]
    fn test_place_food_respects_capacity() {
        let mut canvas = grid(10, 10);
        let snake = Snake::new(Point::new(0, 0), Direction::Right, 3, 6, &mut canvas);
        let mut food = FoodSet::new(2);
        let mut rng = StdRng::seed_from_u64(3);

        assert_eq!(food.place_food(&snake, 5, &mut canvas, &mut rng), 2);
        assert_eq!(food.len(), food.capacity());
    }

    #[test]
    fn test_try_eat() {
        let mut canvas = grid(5, 5);
        let mut food = FoodSet::new(3);
        food.insert(Point::new(1, 1), &mut canvas);
        food.insert(Point::new(2, 2), &mut canvas);
        food.insert(Point::new(3, 3), &mut canvas);

        assert!(food.try_eat(Point::new(1, 1)));
        assert_eq!(food.len(), 2);
        assert!(!food.contains(Point::new(1, 1)));
        assert!(food.contains(Point::new(2, 2)));
        assert!(food.contains(Point::new(3, 3)));

        assert!(!food.try_eat(Point::new(1, 1)));
        assert!(!food.try_eat(Point::new(4, 4)));
        assert_eq!(food.len(), 2);
    }

    #[test]
    fn test_refill_shortfall() {
        assert_eq!(RefillStrategy::Immediate.shortfall(3, 3), 0);
        assert_eq!(RefillStrategy::Immediate.shortfall(1, 3), 2);
        assert_eq!(RefillStrategy::Immediate.shortfall(0, 3), 3);

        assert_eq!(RefillStrategy::LazyBatch.shortfall(3, 3), 0);
        assert_eq!(RefillStrategy::LazyBatch.shortfall(1, 3), 0);
        assert_eq!(RefillStrategy::LazyBatch.shortfall(0, 3), 3);
    }
}
