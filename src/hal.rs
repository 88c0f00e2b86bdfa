//! Seams between the game core and whatever it runs on: a pixel display, a
//! directional input, a buzzer-like feedback channel and a blocking timer.

use std::io;
use std::time::Duration;

use crate::canvas::Canvas;
use crate::geometry::Direction;

/// Receives the canvas contents on every flush.
pub trait PixelDisplay {
    fn show(&mut self, canvas: &Canvas) -> io::Result<()>;
}

/// Source of the player's current directional intent. `None` means the stick is
/// neutral (or no key was pressed since the last read).
pub trait DirectionSource {
    fn read_intent(&mut self) -> Option<Direction>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Signal {
    Eat,
    Win,
    Lose,
}

/// Fire-and-forget feedback output.
pub trait Feedback {
    fn signal(&mut self, signal: Signal);
    fn silence(&mut self);
}

pub trait Pacer {
    fn wait(&mut self, duration: Duration);
}
