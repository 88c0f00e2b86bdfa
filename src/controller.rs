use std::io;

use log::{debug, info, warn};
use rand::Rng;

use crate::canvas::Canvas;
use crate::config::GameConfig;
use crate::food::FoodSet;
use crate::geometry::Direction;
use crate::hal::{DirectionSource, Feedback, Pacer, PixelDisplay, Signal};
use crate::snake::Snake;

/// Everything a reset rebuilds. Replaced as a whole, never patched field by field.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub canvas: Canvas,
    pub snake: Snake,
    pub food: FoodSet,
    pub heading: Direction,
}

impl GameState {
    pub fn new(config: &GameConfig, rng: &mut impl Rng) -> Self {
        let mut canvas = Canvas::new(config.grid);
        let snake = Snake::new(
            config.start,
            config.initial_heading,
            config.init_length,
            config.snake_capacity(),
            &mut canvas,
        );
        let mut food = FoodSet::new(config.food_count);
        food.place_food(&snake, config.food_count, &mut canvas, rng);

        GameState {
            canvas,
            snake,
            food,
            heading: config.initial_heading,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    Running,
    /// The head ran into the body. Carries the final length.
    Lost { length: usize },
    /// The snake reached its maximum length.
    Won { length: usize },
}

/// The devices the controller drives.
pub struct Peripherals<D, I, F, P> {
    pub display: D,
    pub input: I,
    pub feedback: F,
    pub pacer: P,
}

pub struct GameController<D, I, F, P, R> {
    config: GameConfig,
    state: GameState,
    io: Peripherals<D, I, F, P>,
    rng: R,
}

impl<D, I, F, P, R> GameController<D, I, F, P, R>
where
    D: PixelDisplay,
    I: DirectionSource,
    F: Feedback,
    P: Pacer,
    R: Rng,
{
    /// Builds the first game and shows it.
    pub fn new(
        config: GameConfig,
        mut peripherals: Peripherals<D, I, F, P>,
        mut rng: R,
    ) -> io::Result<Self> {
        let state = GameState::new(&config, &mut rng);
        state.canvas.flush(&mut peripherals.display)?;
        info!(
            "New game on {}x{} grid, length {}..{}",
            config.grid.columns, config.grid.rows, config.init_length, config.max_length
        );
        Ok(GameController {
            config,
            state,
            io: peripherals,
            rng,
        })
    }

    /// Runs one full step: move, eat, refill, show, then either blink the head for
    /// the rest of the step period or play out a win/loss and start over.
    pub fn tick(&mut self) -> io::Result<TickOutcome> {
        let requested = self.io.input.read_intent().unwrap_or(self.state.heading);
        self.state.heading = self.state.heading.steer(requested);

        let GameState {
            canvas,
            snake,
            food,
            heading,
        } = &mut self.state;

        snake.extend(*heading, canvas);
        if food.try_eat(snake.head()) {
            debug!("Ate food at {:?}, length {}", snake.head(), snake.len());
            self.io.feedback.signal(Signal::Eat);
        } else {
            snake.cut(canvas);
        }

        let shortfall = self.config.refill.shortfall(food.len(), food.capacity());
        if shortfall > 0 {
            food.place_food(snake, shortfall, canvas, &mut self.rng);
        }

        canvas.flush(&mut self.io.display)?;

        let length = snake.len();
        let outcome = if snake.check_self_collision() {
            TickOutcome::Lost { length }
        } else if length == self.config.max_length {
            TickOutcome::Won { length }
        } else {
            TickOutcome::Running
        };

        match outcome {
            TickOutcome::Running => {
                self.blink_head()?;
                self.io.feedback.silence();
            }
            TickOutcome::Lost { length } => {
                warn!("Snake bit itself at length {}", length);
                self.finish(Signal::Lose)?;
            }
            TickOutcome::Won { length } => {
                info!("Snake reached maximum length {}", length);
                self.finish(Signal::Win)?;
            }
        }

        Ok(outcome)
    }

    fn blink_head(&mut self) -> io::Result<()> {
        let head = self.state.snake.head();
        let interval = self.config.blink_interval();
        let mut lit = true;
        for _ in 0..2 * self.config.blink_frequency {
            lit = !lit;
            self.state.canvas.set_pixel(head, lit);
            self.state.canvas.flush(&mut self.io.display)?;
            self.io.pacer.wait(interval);
        }
        Ok(())
    }

    fn finish(&mut self, signal: Signal) -> io::Result<()> {
        self.io.feedback.signal(signal);
        self.io.pacer.wait(self.config.terminal_signal_delay);
        self.sweep()?;
        self.reset();
        self.state.canvas.flush(&mut self.io.display)?;
        self.io.feedback.silence();
        Ok(())
    }

    /// Lights the screen row by row, then clears it the same way.
    fn sweep(&mut self) -> io::Result<()> {
        for on in [true, false] {
            for row in 0..self.state.canvas.rows() {
                self.state.canvas.fill_row(row, on);
                self.state.canvas.flush(&mut self.io.display)?;
                self.io.pacer.wait(self.config.sweep_step);
            }
        }
        Ok(())
    }

    /// Shows the current canvas again, e.g. after the status text changed.
    pub fn redraw(&mut self) -> io::Result<()> {
        self.state.canvas.flush(&mut self.io.display)
    }

    pub fn reset(&mut self) {
        self.state = GameState::new(&self.config, &mut self.rng);
        info!("Game reset");
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn peripherals(&self) -> &Peripherals<D, I, F, P> {
        &self.io
    }

    pub fn peripherals_mut(&mut self) -> &mut Peripherals<D, I, F, P> {
        &mut self.io
    }

    #[cfg(test)]
    pub(crate) fn replace_state(&mut self, state: GameState) {
        self.state = state;
    }
}
