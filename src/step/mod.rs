//! Step Model
//!
//! A [`Step`] is one atomic, replayable unit of algorithmic work. Algorithms
//! report steps through a [`StepEmitter`] in exactly the order they perform
//! the corresponding operation; a [`StepSequence`] is the frozen result of
//! one run.
//!
//! Replaying a sequence against a fresh copy of the original input (compare
//! and mark-final as no-ops, swap and overwrite as written) reproduces the
//! algorithm's final array bit for bit.

mod emitter;

pub use emitter::{NoopEmitter, StepEmitter, StepRecorder, Tee};

use crate::{Result, SortError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

/// One elementary operation performed by a sorting algorithm.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Step {
    /// Values at the two indices are being compared; no mutation.
    Compare(usize, usize),
    /// Values at the two indices are exchanged.
    Swap(usize, usize),
    /// Slot is replaced by the carried value.
    Overwrite(usize, f64),
    /// Index has reached its permanent sorted position.
    MarkFinal(usize),
}

impl Step {
    /// Indices touched by this step (second entry only for two-index steps).
    pub fn indices(&self) -> (usize, Option<usize>) {
        match *self {
            Step::Compare(i, j) | Step::Swap(i, j) => (i, Some(j)),
            Step::Overwrite(i, _) | Step::MarkFinal(i) => (i, None),
        }
    }

    /// Whether applying the step can change an array.
    pub fn is_mutation(&self) -> bool {
        matches!(self, Step::Swap(..) | Step::Overwrite(..))
    }

    /// Apply the step to a presentation copy.
    ///
    /// Every index is bound-checked, including those of non-mutating steps,
    /// so a trace recorded for a different input length is rejected instead
    /// of silently producing garbage.
    pub fn apply(&self, values: &mut [f64]) -> Result<()> {
        let len = values.len();
        let check = |index: usize| {
            if index < len {
                Ok(())
            } else {
                Err(SortError::IndexOutOfBounds { index, len })
            }
        };

        match *self {
            Step::Compare(i, j) => {
                check(i)?;
                check(j)
            }
            Step::Swap(i, j) => {
                check(i)?;
                check(j)?;
                values.swap(i, j);
                Ok(())
            }
            Step::Overwrite(i, value) => {
                check(i)?;
                values[i] = value;
                Ok(())
            }
            Step::MarkFinal(i) => check(i),
        }
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Compare(i, j) => write!(f, "compare {i} {j}"),
            Step::Swap(i, j) => write!(f, "swap {i} {j}"),
            Step::Overwrite(i, value) => write!(f, "overwrite {i} <- {value}"),
            Step::MarkFinal(i) => write!(f, "final {i}"),
        }
    }
}

/// Immutable, ordered step trace of one run.
///
/// Cloning is cheap (shared storage), so the same trace can be handed to
/// several playback drivers at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<Step>", into = "Vec<Step>")]
pub struct StepSequence {
    steps: Arc<[Step]>,
}

impl StepSequence {
    /// Number of steps
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// True for runs that emitted nothing (empty input)
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Step at `position`
    pub fn get(&self, position: usize) -> Option<Step> {
        self.steps.get(position).copied()
    }

    /// Iterate in emission order
    pub fn iter(&self) -> std::slice::Iter<'_, Step> {
        self.steps.iter()
    }

    /// Borrow the raw steps
    pub fn as_slice(&self) -> &[Step] {
        &self.steps
    }

    /// Count steps per kind
    pub fn stats(&self) -> StepStats {
        let mut stats = StepStats::default();
        for step in self.iter() {
            stats.record(step);
        }
        stats
    }

    /// Replay the whole trace against a copy of `initial`.
    pub fn replay(&self, initial: &[f64]) -> Result<Vec<f64>> {
        self.replay_until(initial, self.len())
    }

    /// Replay the first `position` steps (clamped to the trace length).
    pub fn replay_until(&self, initial: &[f64], position: usize) -> Result<Vec<f64>> {
        let mut values = initial.to_vec();
        for step in self.steps.iter().take(position) {
            step.apply(&mut values)?;
        }
        Ok(values)
    }
}

impl Default for StepSequence {
    fn default() -> Self {
        StepSequence::from(Vec::new())
    }
}

impl From<Vec<Step>> for StepSequence {
    fn from(steps: Vec<Step>) -> Self {
        StepSequence {
            steps: steps.into(),
        }
    }
}

impl From<StepSequence> for Vec<Step> {
    fn from(sequence: StepSequence) -> Self {
        sequence.steps.to_vec()
    }
}

impl<'a> IntoIterator for &'a StepSequence {
    type Item = &'a Step;
    type IntoIter = std::slice::Iter<'a, Step>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Per-kind step counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepStats {
    /// `Compare` steps
    pub compares: usize,
    /// `Swap` steps
    pub swaps: usize,
    /// `Overwrite` steps
    pub overwrites: usize,
    /// `MarkFinal` steps
    pub finals: usize,
}

impl StepStats {
    /// Count one step
    pub fn record(&mut self, step: &Step) {
        match step {
            Step::Compare(..) => self.compares += 1,
            Step::Swap(..) => self.swaps += 1,
            Step::Overwrite(..) => self.overwrites += 1,
            Step::MarkFinal(_) => self.finals += 1,
        }
    }

    /// Total number of steps counted
    pub fn total(&self) -> usize {
        self.compares + self.swaps + self.overwrites + self.finals
    }
}

impl fmt::Display for StepStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} compares, {} swaps, {} overwrites, {} finals",
            self.compares, self.swaps, self.overwrites, self.finals
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_swap_and_overwrite() {
        let mut values = vec![1.0, 2.0, 3.0];
        Step::Swap(0, 2).apply(&mut values).unwrap();
        assert_eq!(values, vec![3.0, 2.0, 1.0]);

        Step::Overwrite(1, 9.0).apply(&mut values).unwrap();
        assert_eq!(values, vec![3.0, 9.0, 1.0]);

        Step::Compare(0, 1).apply(&mut values).unwrap();
        Step::MarkFinal(2).apply(&mut values).unwrap();
        assert_eq!(values, vec![3.0, 9.0, 1.0]);
    }

    #[test]
    fn test_apply_out_of_bounds() {
        let mut values = vec![1.0, 2.0];
        let err = Step::Compare(0, 2).apply(&mut values).unwrap_err();
        assert!(matches!(
            err,
            SortError::IndexOutOfBounds { index: 2, len: 2 }
        ));
        assert!(Step::MarkFinal(5).apply(&mut values).is_err());
        assert_eq!(values, vec![1.0, 2.0]);
    }

    #[test]
    fn test_replay_until_is_clamped() {
        let sequence = StepSequence::from(vec![Step::Swap(0, 1), Step::Overwrite(0, 7.0)]);
        let initial = [1.0, 2.0];
        assert_eq!(sequence.replay_until(&initial, 1).unwrap(), vec![2.0, 1.0]);
        assert_eq!(sequence.replay_until(&initial, 10).unwrap(), vec![7.0, 1.0]);
        // replay never touches the caller's copy
        assert_eq!(initial, [1.0, 2.0]);
    }

    #[test]
    fn test_stats() {
        let sequence = StepSequence::from(vec![
            Step::Compare(0, 1),
            Step::Swap(0, 1),
            Step::Compare(1, 2),
            Step::MarkFinal(2),
        ]);
        let stats = sequence.stats();
        assert_eq!(stats.compares, 2);
        assert_eq!(stats.swaps, 1);
        assert_eq!(stats.overwrites, 0);
        assert_eq!(stats.finals, 1);
        assert_eq!(stats.total(), 4);
    }

    #[test]
    fn test_step_json_shape() {
        let json = serde_json::to_string(&Step::MarkFinal(3)).unwrap();
        assert_eq!(json, r#"{"mark_final":3}"#);

        let sequence = StepSequence::from(vec![Step::Compare(0, 1), Step::Overwrite(1, 2.5)]);
        let json = serde_json::to_string(&sequence).unwrap();
        assert_eq!(json, r#"[{"compare":[0,1]},{"overwrite":[1,2.5]}]"#);

        let back: StepSequence = serde_json::from_str(&json).unwrap();
        assert_eq!(back, sequence);
    }

    #[test]
    fn test_display() {
        assert_eq!(Step::Swap(1, 4).to_string(), "swap 1 4");
        assert_eq!(Step::Overwrite(0, 3.5).to_string(), "overwrite 0 <- 3.5");
    }
}
