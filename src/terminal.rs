//! Runs the game in a terminal: ratatui draws the canvas, crossterm supplies the
//! keyboard, and the terminal bell plays the part of a buzzer.

use std::io::{self, Stdout, Write};
use std::thread;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use log::{debug, error, info};
use ratatui::{
    backend::CrosstermBackend,
    buffer::Buffer,
    layout::{Alignment, Constraint, Layout, Rect},
    style::Color,
    widgets::{Block, Borders, Paragraph, Widget},
    Terminal,
};

use crate::canvas::Canvas;
use crate::geometry::{Direction, Point};
use crate::hal::{DirectionSource, Feedback, Pacer, PixelDisplay, Signal};

/// Terminal columns per grid cell, so cells come out roughly square.
const CELL_WIDTH: u16 = 2;
const PIXEL_SYMBOL: &str = "█";

pub struct TerminalDisplay {
    terminal: Terminal<CrosstermBackend<Stdout>>,
    status: String,
}

impl TerminalDisplay {
    pub fn new(terminal: Terminal<CrosstermBackend<Stdout>>) -> Self {
        TerminalDisplay {
            terminal,
            status: String::new(),
        }
    }

    /// Text for the header; shown from the next flush on.
    pub fn set_status(&mut self, status: String) {
        self.status = status;
    }
}

impl PixelDisplay for TerminalDisplay {
    fn show(&mut self, canvas: &Canvas) -> io::Result<()> {
        let status = self.status.as_str();
        self.terminal.draw(|frame| {
            let layout = Layout::vertical([
                Constraint::Length(3), // Status
                Constraint::Min(0),    // Grid
            ])
            .split(frame.area());

            frame.render_widget(
                Paragraph::new(status)
                    .alignment(Alignment::Left)
                    .block(Block::default().borders(Borders::ALL)),
                layout[0],
            );

            let grid_area = centered(layout[1], canvas);
            let block = Block::default().borders(Borders::ALL);
            let inner_area = block.inner(grid_area);
            frame.render_widget(block, grid_area);
            frame.render_widget(canvas, inner_area);
        })?;
        Ok(())
    }
}

/// Bordered area sized to the canvas, centered in `area` and clipped to it.
fn centered(area: Rect, canvas: &Canvas) -> Rect {
    let width = (canvas.columns() * CELL_WIDTH + 2).min(area.width);
    let height = (canvas.rows() + 2).min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}

impl Widget for &Canvas {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for y in 0..self.rows().min(area.height) {
            for x in 0..self.columns() {
                if !self.get_pixel(Point::new(x, y)) {
                    continue;
                }
                for dx in 0..CELL_WIDTH {
                    let column = x * CELL_WIDTH + dx;
                    if column >= area.width {
                        break;
                    }
                    if let Some(cell) = buf.cell_mut((area.x + column, area.y + y)) {
                        cell.set_symbol(PIXEL_SYMBOL).set_fg(Color::Green);
                    }
                }
            }
        }
    }
}

/// Stick position on both axes, each in -1.0..=1.0. Screen coordinates: negative y
/// is up.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Deflection {
    pub x: f32,
    pub y: f32,
}

impl Deflection {
    pub const NEUTRAL: Deflection = Deflection { x: 0.0, y: 0.0 };

    /// Dominant axis beyond the deadzone. An exact diagonal resolves to the x axis.
    pub fn intent(self, deadzone: f32) -> Option<Direction> {
        let (ax, ay) = (self.x.abs(), self.y.abs());
        if ax.max(ay) <= deadzone {
            return None;
        }
        if ax >= ay {
            Some(if self.x < 0.0 {
                Direction::Left
            } else {
                Direction::Right
            })
        } else {
            Some(if self.y < 0.0 {
                Direction::Up
            } else {
                Direction::Down
            })
        }
    }
}

impl From<Direction> for Deflection {
    fn from(dir: Direction) -> Self {
        match dir {
            Direction::Left => Deflection { x: -1.0, y: 0.0 },
            Direction::Up => Deflection { x: 0.0, y: -1.0 },
            Direction::Right => Deflection { x: 1.0, y: 0.0 },
            Direction::Down => Deflection { x: 0.0, y: 1.0 },
        }
    }
}

/// Keyboard as a joystick: a direction key pushes the stick fully over until the
/// next read, which returns it to neutral.
pub struct KeyboardInput {
    deflection: Deflection,
    deadzone: f32,
    paused: bool,
    quit: bool,
}

impl KeyboardInput {
    pub fn new(deadzone: f32) -> Self {
        KeyboardInput {
            deflection: Deflection::NEUTRAL,
            deadzone,
            paused: false,
            quit: false,
        }
    }

    /// Drains pending terminal events without blocking.
    pub fn pump(&mut self) -> io::Result<()> {
        while event::poll(Duration::ZERO)? {
            if let Event::Key(key) = event::read()? {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                info!("Quit requested");
                self.quit = true;
            }
            KeyCode::Char(' ') => {
                self.paused = !self.paused;
                info!("{}", if self.paused { "Paused" } else { "Resumed" });
            }
            KeyCode::Left | KeyCode::Char('a') => self.deflection = Direction::Left.into(),
            KeyCode::Up | KeyCode::Char('w') => self.deflection = Direction::Up.into(),
            KeyCode::Right | KeyCode::Char('d') => self.deflection = Direction::Right.into(),
            KeyCode::Down | KeyCode::Char('s') => self.deflection = Direction::Down.into(),
            _ => {}
        }
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn quit_requested(&self) -> bool {
        self.quit
    }
}

impl DirectionSource for KeyboardInput {
    fn read_intent(&mut self) -> Option<Direction> {
        if let Err(e) = self.pump() {
            error!("Error reading keyboard: {}", e);
        }
        std::mem::take(&mut self.deflection).intent(self.deadzone)
    }
}

/// Rings the terminal bell: once to eat, once to lose, three times to win.
pub struct TerminalFeedback<W: Write> {
    out: W,
}

impl<W: Write> TerminalFeedback<W> {
    pub fn new(out: W) -> Self {
        TerminalFeedback { out }
    }

    fn ring(&mut self, times: usize) -> io::Result<()> {
        for _ in 0..times {
            self.out.write_all(b"\x07")?;
        }
        self.out.flush()
    }
}

impl<W: Write> Feedback for TerminalFeedback<W> {
    fn signal(&mut self, signal: Signal) {
        debug!("Feedback {:?}", signal);
        let times = match signal {
            Signal::Eat | Signal::Lose => 1,
            Signal::Win => 3,
        };
        if let Err(e) = self.ring(times) {
            error!("Error ringing bell: {}", e);
        }
    }

    // A bell has no sustain to cut short.
    fn silence(&mut self) {}
}

pub struct ThreadPacer;

impl Pacer for ThreadPacer {
    fn wait(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}
