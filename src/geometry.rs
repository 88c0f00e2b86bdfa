use thiserror::Error;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSize {
    pub columns: u16,
    pub rows: u16,
}

impl GridSize {
    pub fn cells(&self) -> usize {
        self.columns as usize * self.rows as usize
    }

    pub fn contains(&self, point: Point) -> bool {
        point.x < self.columns && point.y < self.rows
    }

    /// All grid cells in row-major order.
    pub fn points(&self) -> impl Iterator<Item = Point> {
        let columns = self.columns;
        (0..self.rows).flat_map(move |y| (0..columns).map(move |x| Point { x, y }))
    }
}

/// Cyclic order matters: two directions are perpendicular iff their indices differ by
/// an odd amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left = 0,
    Up = 1,
    Right = 2,
    Down = 3,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DirectionError {
    #[error("direction index {0} is out of range (expected 0..4)")]
    OutOfRange(u8),
}

impl TryFrom<u8> for Direction {
    type Error = DirectionError;

    fn try_from(index: u8) -> Result<Self, Self::Error> {
        match index {
            0 => Ok(Direction::Left),
            1 => Ok(Direction::Up),
            2 => Ok(Direction::Right),
            3 => Ok(Direction::Down),
            other => Err(DirectionError::OutOfRange(other)),
        }
    }
}

impl Direction {
    pub fn index(self) -> u8 {
        self as u8
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Only quarter turns change the heading; keeping course or reversing is ignored.
    pub fn accepts_turn(self, requested: Direction) -> bool {
        (requested.index() + 4 - self.index()) % 4 % 2 == 1
    }

    /// Heading after a turn request.
    pub fn steer(self, requested: Direction) -> Direction {
        if self.accepts_turn(requested) {
            requested
        } else {
            self
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: u16,
    pub y: u16,
}

impl Point {
    pub fn new(x: u16, y: u16) -> Self {
        Point { x, y }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Delta {
    pub x: i32,
    pub y: i32,
}

impl From<Direction> for Delta {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Left => Delta { x: -1, y: 0 },
            Direction::Up => Delta { x: 0, y: -1 },
            Direction::Right => Delta { x: 1, y: 0 },
            Direction::Down => Delta { x: 0, y: 1 },
        }
    }
}

impl Point {
    pub fn wrapped_add(&self, delta: Delta, size: GridSize) -> Point {
        let new_x = (self.x as i32 + delta.x).rem_euclid(size.columns as i32) as u16;
        let new_y = (self.y as i32 + delta.y).rem_euclid(size.rows as i32) as u16;
        Point { x: new_x, y: new_y }
    }
}
