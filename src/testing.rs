//! In-memory stand-ins for the terminal collaborators.

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crate::canvas::Canvas;
use crate::geometry::Direction;
use crate::hal::{DirectionSource, Feedback, Pacer, PixelDisplay, Signal};

#[derive(Default)]
pub struct RecordingDisplay {
    pub frames: Vec<Canvas>,
}

impl RecordingDisplay {
    pub fn last(&self) -> &Canvas {
        self.frames.last().expect("nothing was flushed")
    }
}

impl PixelDisplay for RecordingDisplay {
    fn show(&mut self, canvas: &Canvas) -> io::Result<()> {
        self.frames.push(canvas.clone());
        Ok(())
    }
}

/// Replays queued intents, then stays neutral.
#[derive(Default)]
pub struct ScriptedInput {
    pub intents: VecDeque<Option<Direction>>,
}

impl ScriptedInput {
    pub fn push(&mut self, intent: Option<Direction>) {
        self.intents.push_back(intent);
    }
}

impl DirectionSource for ScriptedInput {
    fn read_intent(&mut self) -> Option<Direction> {
        self.intents.pop_front().flatten()
    }
}

#[derive(Default)]
pub struct RecordingFeedback {
    pub signals: Vec<Signal>,
    pub silenced: usize,
}

impl Feedback for RecordingFeedback {
    fn signal(&mut self, signal: Signal) {
        self.signals.push(signal);
    }

    fn silence(&mut self) {
        self.silenced += 1;
    }
}

#[derive(Default)]
pub struct RecordingPacer {
    pub waits: Vec<Duration>,
}

impl Pacer for RecordingPacer {
    fn wait(&mut self, duration: Duration) {
        self.waits.push(duration);
    }
}
