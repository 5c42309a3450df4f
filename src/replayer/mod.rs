//! Playback Driver
//!
//! Reference consumer of a [`StepSequence`]: applies steps one by one to a
//! presentation copy of the original input, tracks which indices have been
//! finalized, and exposes play/pause/stop/seek controls. Pacing is left to
//! the caller, either by calling [`Replayer::tick`] on its own schedule or by
//! feeding wall time through a [`StepClock`].
//!
//! The replayer never looks at a live dataset; it only applies step
//! semantics, so it can run long after (or concurrently with) the sort that
//! produced the trace.

mod step_clock;

pub use step_clock::StepClock;

use crate::runner::SortRun;
use crate::step::{Step, StepSequence};
use crate::Result;
use std::time::Duration;

/// Playback state of a driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlaybackState {
    /// At the beginning, or past the last step
    #[default]
    Stopped,
    /// Consuming steps on every tick
    Playing,
    /// Holding position
    Paused,
}

/// Transport controls shared by playback drivers
pub trait PlaybackController {
    /// Start or resume playback
    fn play(&mut self) -> Result<()>;

    /// Pause playback (keeps position)
    fn pause(&mut self) -> Result<()>;

    /// Stop playback and rewind
    fn stop(&mut self) -> Result<()>;

    /// Get current playback state
    fn state(&self) -> PlaybackState;
}

/// Applies a recorded trace to a presentation copy.
#[derive(Debug, Clone)]
pub struct Replayer {
    initial: Vec<f64>,
    values: Vec<f64>,
    steps: StepSequence,
    cursor: usize,
    finalized: Vec<bool>,
    last: Option<Step>,
    state: PlaybackState,
}

impl Replayer {
    /// Create a stopped replayer positioned before the first step
    pub fn new(initial: Vec<f64>, steps: StepSequence) -> Self {
        let finalized = vec![false; initial.len()];
        Replayer {
            values: initial.clone(),
            initial,
            steps,
            cursor: 0,
            finalized,
            last: None,
            state: PlaybackState::Stopped,
        }
    }

    /// Create a replayer for a recorded run
    pub fn from_run(run: &SortRun) -> Self {
        Self::new(run.input.clone(), run.steps.clone())
    }

    /// Apply the next step if playing.
    ///
    /// Returns the applied step, or `None` when paused, stopped or finished.
    /// Reaching the end switches the state to `Stopped` without rewinding.
    pub fn tick(&mut self) -> Result<Option<Step>> {
        if self.state != PlaybackState::Playing {
            return Ok(None);
        }
        let step = self.step_forward()?;
        if self.is_finished() {
            self.state = PlaybackState::Stopped;
        }
        Ok(step)
    }

    /// Apply up to `count` steps through [`Replayer::tick`]; returns how many were applied.
    pub fn advance(&mut self, count: u32) -> Result<u32> {
        let mut applied = 0;
        while applied < count && self.tick()?.is_some() {
            applied += 1;
        }
        Ok(applied)
    }

    /// Feed wall time through `clock` and apply the steps it releases.
    pub fn advance_by(&mut self, clock: &mut StepClock, elapsed: Duration) -> Result<u32> {
        if self.state != PlaybackState::Playing {
            return Ok(0);
        }
        let due = clock.advance(elapsed);
        self.advance(due)
    }

    /// Apply the next step regardless of state (manual stepping)
    pub fn step_forward(&mut self) -> Result<Option<Step>> {
        let Some(step) = self.steps.get(self.cursor) else {
            return Ok(None);
        };
        step.apply(&mut self.values)?;
        if let Step::MarkFinal(index) = step {
            self.finalized[index] = true;
        }
        self.cursor += 1;
        self.last = Some(step);
        Ok(Some(step))
    }

    /// Jump to `position` (clamped) by replaying from the original input
    pub fn seek(&mut self, position: usize) -> Result<()> {
        self.values.clone_from(&self.initial);
        self.finalized.iter_mut().for_each(|flag| *flag = false);
        self.cursor = 0;
        self.last = None;

        let target = position.min(self.steps.len());
        while self.cursor < target {
            self.step_forward()?;
        }
        Ok(())
    }

    /// Rewind to the original input
    pub fn reset(&mut self) {
        self.values.clone_from(&self.initial);
        self.finalized.iter_mut().for_each(|flag| *flag = false);
        self.cursor = 0;
        self.last = None;
    }

    /// Presentation copy in its current state
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Original input
    pub fn initial(&self) -> &[f64] {
        &self.initial
    }

    /// Trace being played
    pub fn steps(&self) -> &StepSequence {
        &self.steps
    }

    /// Most recently applied step
    pub fn last_step(&self) -> Option<Step> {
        self.last
    }

    /// Whether `index` has received its `MarkFinal`
    pub fn is_finalized(&self, index: usize) -> bool {
        self.finalized.get(index).copied().unwrap_or(false)
    }

    /// Number of steps applied
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Fraction of the trace applied (1.0 for an empty trace)
    pub fn progress(&self) -> f32 {
        if self.steps.is_empty() {
            1.0
        } else {
            self.cursor as f32 / self.steps.len() as f32
        }
    }

    /// True once every step has been applied
    pub fn is_finished(&self) -> bool {
        self.cursor >= self.steps.len()
    }

    /// Per-index display flags for the current position
    #[cfg(feature = "visualization")]
    pub fn bar_states(&self) -> Vec<crate::visualization::BarState> {
        use crate::visualization::BarState;

        let mut states: Vec<BarState> = self
            .finalized
            .iter()
            .map(|&done| {
                if done {
                    BarState::FINAL
                } else {
                    BarState::empty()
                }
            })
            .collect();

        if let Some(step) = self.last {
            crate::visualization::highlight(&mut states, step);
        }
        states
    }
}

impl PlaybackController for Replayer {
    /// Start playback; a finished trace restarts from the beginning
    fn play(&mut self) -> Result<()> {
        if self.is_finished() && !self.steps.is_empty() {
            self.reset();
        }
        self.state = PlaybackState::Playing;
        Ok(())
    }

    fn pause(&mut self) -> Result<()> {
        if self.state == PlaybackState::Playing {
            self.state = PlaybackState::Paused;
        }
        Ok(())
    }

    fn stop(&mut self) -> Result<()> {
        self.state = PlaybackState::Stopped;
        self.reset();
        Ok(())
    }

    fn state(&self) -> PlaybackState {
        self.state
    }
}
