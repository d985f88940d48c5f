// Replays a fixed queue of frames and failures

use std::collections::VecDeque;

use anyhow::{anyhow, Result};

use super::types::Frame;
use super::FrameSource;

enum Step {
    Frame(Frame),
    Fail(String),
}

/// Source that yields pre-recorded frames in order, then ends.
///
/// Failures can be queued between frames to exercise the loop's error path.
#[derive(Default)]
pub struct ScriptedSource {
    steps: VecDeque<Step>,
}

impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_frames(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self {
            steps: frames.into_iter().map(Step::Frame).collect(),
        }
    }

    pub fn push_frame(mut self, frame: Frame) -> Self {
        self.steps.push_back(Step::Frame(frame));
        self
    }

    pub fn push_failure(mut self, message: impl Into<String>) -> Self {
        self.steps.push_back(Step::Fail(message.into()));
        self
    }

    pub fn remaining(&self) -> usize {
        self.steps.len()
    }
}

impl FrameSource for ScriptedSource {
    fn next_frame(&mut self) -> Result<Option<Frame>> {
        match self.steps.pop_front() {
            Some(Step::Frame(frame)) => Ok(Some(frame)),
            Some(Step::Fail(message)) => Err(anyhow!(message)),
            None => Ok(None),
        }
    }

    fn describe(&self) -> String {
        format!("scripted ({} steps left)", self.steps.len())
    }
}
