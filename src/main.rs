use crossterm::{
    cursor::Show,
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info, SetLoggerError};
use ratatui::{backend::CrosstermBackend, Terminal};
use simplelog::{Config, LevelFilter, WriteLogger};
use std::fs::File;
use std::io::{self, Stdout};
use std::thread;
use std::time::Duration;
use thiserror::Error;

use toroid_snake::config::{ConfigError, GameConfig};
use toroid_snake::controller::{GameController, Peripherals, TickOutcome};
use toroid_snake::score::BestLength;
use toroid_snake::terminal::{KeyboardInput, TerminalDisplay, TerminalFeedback, ThreadPacer};

const LOG_FILE: &str = "toroid-snake.log";
const BEST_LENGTH_FILE: &str = ".toroid_snake_best.txt";
const PAUSE_POLL: Duration = Duration::from_millis(50);

#[derive(Debug, Error)]
enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("could not start logger: {0}")]
    Logger(#[from] SetLoggerError),
}

fn main() -> Result<(), AppError> {
    // Set up logging before anything else
    WriteLogger::init(LevelFilter::Info, Config::default(), File::create(LOG_FILE)?)?;

    info!("Starting toroid-snake");

    let config = GameConfig::default();
    config.validate()?;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run(config, terminal);

    // Cleanup terminal, even if the game loop failed
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, Show)?;

    if let Err(e) = &result {
        error!("Game loop failed: {}", e);
    }
    info!("Exiting toroid-snake");
    Ok(result?)
}

fn status_line(best: usize, length: usize, paused: bool) -> String {
    let mut status = format!("SNAKE    Best: {}    Length: {}", best, length);
    if paused {
        status.push_str("    Paused. Press SPACE to continue");
    }
    status
}

fn run(config: GameConfig, terminal: Terminal<CrosstermBackend<Stdout>>) -> io::Result<()> {
    let mut best = BestLength::load(BEST_LENGTH_FILE);

    let mut display = TerminalDisplay::new(terminal);
    display.set_status(status_line(best.get(), config.init_length, false));
    let input = KeyboardInput::new(config.input_deadzone);
    let peripherals = Peripherals {
        display,
        input,
        feedback: TerminalFeedback::new(io::stdout()),
        pacer: ThreadPacer,
    };
    let mut game = GameController::new(config, peripherals, rand::thread_rng())?;

    let mut was_paused = false;
    loop {
        let input = &mut game.peripherals_mut().input;
        input.pump()?;
        if input.quit_requested() {
            break;
        }

        let paused = input.paused();
        if paused {
            if !was_paused {
                let length = game.state().snake.len();
                game.peripherals_mut()
                    .display
                    .set_status(status_line(best.get(), length, true));
                game.redraw()?;
            }
            was_paused = true;
            thread::sleep(PAUSE_POLL);
            continue;
        }
        was_paused = false;

        match game.tick()? {
            TickOutcome::Running => {}
            TickOutcome::Lost { length } | TickOutcome::Won { length } => {
                best.record(length);
            }
        }

        let length = game.state().snake.len();
        game.peripherals_mut()
            .display
            .set_status(status_line(best.get(), length, false));
    }

    Ok(())
}
