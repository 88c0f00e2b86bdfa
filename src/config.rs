use std::time::Duration;

use thiserror::Error;

use crate::food::RefillStrategy;
use crate::geometry::{Direction, GridSize, Point};

/// Static game configuration, read whenever the game resets.
#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub grid: GridSize,
    pub init_length: usize,
    pub max_length: usize,
    /// Tail cell of a freshly built snake.
    pub start: Point,
    pub initial_heading: Direction,
    pub food_count: usize,
    pub refill: RefillStrategy,
    /// Axis deflection (0.0..1.0) that must be exceeded to count as directional intent.
    pub input_deadzone: f32,
    /// Head blinks per step period.
    pub blink_frequency: u32,
    pub step_period: Duration,
    /// Pause after the win/lose signal, before the sweep animation.
    pub terminal_signal_delay: Duration,
    /// Time each row of the sweep animation stays on screen.
    pub sweep_step: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            grid: GridSize {
                columns: 24,
                rows: 16,
            },
            init_length: 3,
            max_length: 40,
            start: Point::new(2, 8),
            initial_heading: Direction::Right,
            food_count: 3,
            refill: RefillStrategy::Immediate,
            input_deadzone: 0.5,
            blink_frequency: 2,
            step_period: Duration::from_millis(320),
            terminal_signal_delay: Duration::from_millis(600),
            sweep_step: Duration::from_millis(40),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("grid must have at least one row and one column, got {columns}x{rows}")]
    EmptyGrid { columns: u16, rows: u16 },
    #[error("initial snake length must be at least 1")]
    ZeroInitLength,
    #[error("max length {max} must be greater than initial length {init}")]
    MaxNotAboveInit { init: usize, max: usize },
    #[error("a snake of length {needed} does not fit on a grid of {cells} cells")]
    SnakeTooLong { needed: usize, cells: usize },
    #[error("initial snake of length {length} overlaps itself along {heading:?}")]
    InitialSnakeWraps { length: usize, heading: Direction },
    #[error("start point ({}, {}) lies outside the grid", .0.x, .0.y)]
    StartOutsideGrid(Point),
    #[error("food count must be at least 1")]
    NoFood,
    #[error("{food} food pieces do not fit beside the initial snake on {cells} cells")]
    TooMuchFood { food: usize, cells: usize },
    #[error("input deadzone {0} must be within 0.0..1.0")]
    DeadzoneOutOfRange(f32),
    #[error("blink frequency must be at least 1")]
    ZeroBlinkFrequency,
    #[error("step period must be non-zero")]
    ZeroStepPeriod,
}

impl GameConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let GridSize { columns, rows } = self.grid;
        if columns == 0 || rows == 0 {
            return Err(ConfigError::EmptyGrid { columns, rows });
        }
        if self.init_length == 0 {
            return Err(ConfigError::ZeroInitLength);
        }
        if self.max_length <= self.init_length {
            return Err(ConfigError::MaxNotAboveInit {
                init: self.init_length,
                max: self.max_length,
            });
        }
        let cells = self.grid.cells();
        if self.snake_capacity() > cells {
            return Err(ConfigError::SnakeTooLong {
                needed: self.snake_capacity(),
                cells,
            });
        }
        let lane = match self.initial_heading {
            Direction::Left | Direction::Right => columns as usize,
            Direction::Up | Direction::Down => rows as usize,
        };
        if self.init_length > lane {
            return Err(ConfigError::InitialSnakeWraps {
                length: self.init_length,
                heading: self.initial_heading,
            });
        }
        if !self.grid.contains(self.start) {
            return Err(ConfigError::StartOutsideGrid(self.start));
        }
        if self.food_count == 0 {
            return Err(ConfigError::NoFood);
        }
        if self.init_length + self.food_count > cells {
            return Err(ConfigError::TooMuchFood {
                food: self.food_count,
                cells,
            });
        }
        if !(0.0..1.0).contains(&self.input_deadzone) {
            return Err(ConfigError::DeadzoneOutOfRange(self.input_deadzone));
        }
        if self.blink_frequency == 0 {
            return Err(ConfigError::ZeroBlinkFrequency);
        }
        if self.step_period.is_zero() {
            return Err(ConfigError::ZeroStepPeriod);
        }
        Ok(())
    }

    /// Maximum length plus the slack cell used between extend and cut.
    pub fn snake_capacity(&self) -> usize {
        self.max_length + 1
    }

    /// Length of one head-blink half period.
    pub fn blink_interval(&self) -> Duration {
        self.step_period / (2 * self.blink_frequency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.snake_capacity(), 41);
        assert_eq!(config.blink_interval(), Duration::from_millis(80));
    }

    #[test]
    fn test_rejects_empty_grid() {
        let config = GameConfig {
            grid: GridSize {
                columns: 0,
                rows: 4,
            },
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::EmptyGrid {
                columns: 0,
                rows: 4
            })
        );
    }

    #[test]
    fn test_rejects_bad_lengths() {
        let config = GameConfig {
            init_length: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroInitLength));

        let config = GameConfig {
            init_length: 5,
            max_length: 5,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::MaxNotAboveInit { init: 5, max: 5 })
        );

        let config = GameConfig {
            max_length: 24 * 16,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::SnakeTooLong {
                needed: 24 * 16 + 1,
                cells: 24 * 16
            })
        );
    }

    #[test]
    fn test_rejects_initial_snake_longer_than_its_lane() {
        let config = GameConfig {
            grid: GridSize {
                columns: 20,
                rows: 4,
            },
            init_length: 5,
            start: Point::new(0, 0),
            initial_heading: Direction::Down,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InitialSnakeWraps {
                length: 5,
                heading: Direction::Down
            })
        );
    }

    #[test]
    fn test_rejects_start_outside_grid() {
        let config = GameConfig {
            start: Point::new(24, 0),
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::StartOutsideGrid(Point::new(24, 0)))
        );
        assert_eq!(
            config.validate().unwrap_err().to_string(),
            "start point (24, 0) lies outside the grid"
        );
    }

    #[test]
    fn test_rejects_food_and_timing() {
        let config = GameConfig {
            food_count: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::NoFood));

        let config = GameConfig {
            grid: GridSize {
                columns: 4,
                rows: 2,
            },
            init_length: 3,
            max_length: 6,
            start: Point::new(0, 0),
            food_count: 6,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::TooMuchFood { food: 6, cells: 8 })
        );

        let config = GameConfig {
            input_deadzone: 1.5,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::DeadzoneOutOfRange(1.5)));

        let config = GameConfig {
            blink_frequency: 0,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroBlinkFrequency));

        let config = GameConfig {
            step_period: Duration::ZERO,
            ..Default::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroStepPeriod));
    }
}
