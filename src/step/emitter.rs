//! Step emitters.
//!
//! The reporting channel between an algorithm and whoever observes it.
//! Emission never fails and never touches the dataset.

use super::{Step, StepSequence, StepStats};

/// Receives steps in algorithm order, one call per logical operation.
///
/// Any `FnMut(Step)` closure is an emitter, which is the simplest way to
/// forward steps to a callback-driven presentation layer.
pub trait StepEmitter {
    /// Report one step.
    fn emit(&mut self, step: Step);
}

impl<F: FnMut(Step)> StepEmitter for F {
    fn emit(&mut self, step: Step) {
        self(step)
    }
}

/// Discards every step (pure correctness runs).
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopEmitter;

impl StepEmitter for NoopEmitter {
    #[inline]
    fn emit(&mut self, _step: Step) {}
}

/// Append-only recorder producing a [`StepSequence`].
#[derive(Debug, Clone, Default)]
pub struct StepRecorder {
    steps: Vec<Step>,
}

impl StepRecorder {
    /// Create an empty recorder
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a recorder with room for `capacity` steps
    pub fn with_capacity(capacity: usize) -> Self {
        StepRecorder {
            steps: Vec::with_capacity(capacity),
        }
    }

    /// Steps recorded so far
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True before the first step
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Borrow the recorded steps
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Freeze the recording
    pub fn into_sequence(self) -> StepSequence {
        StepSequence::from(self.steps)
    }
}

impl StepEmitter for StepRecorder {
    #[inline]
    fn emit(&mut self, step: Step) {
        self.steps.push(step);
    }
}

impl StepEmitter for StepStats {
    #[inline]
    fn emit(&mut self, step: Step) {
        self.record(&step);
    }
}

/// Forwards every step to two emitters, first `A` then `B`.
#[derive(Debug, Clone, Default)]
pub struct Tee<A, B> {
    /// First receiver
    pub first: A,
    /// Second receiver
    pub second: B,
}

impl<A: StepEmitter, B: StepEmitter> Tee<A, B> {
    /// Combine two emitters
    pub fn new(first: A, second: B) -> Self {
        Tee { first, second }
    }

    /// Split back into the two emitters
    pub fn into_inner(self) -> (A, B) {
        (self.first, self.second)
    }
}

impl<A: StepEmitter, B: StepEmitter> StepEmitter for Tee<A, B> {
    fn emit(&mut self, step: Step) {
        self.first.emit(step);
        self.second.emit(step);
    }
}
