//! One-call sort runs.
//!
//! [`run_sort`] is the contract the presentation layer consumes: pick an
//! algorithm by name, hand over the input, get back the sorted values and the
//! full step trace.

use crate::algorithms::{Algorithm, SortOptions};
use crate::dataset::{ensure_finite, CancelToken, Dataset};
use crate::step::{StepRecorder, StepSequence};
use crate::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Outcome of one recorded run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SortRun {
    /// Algorithm that produced the trace
    pub algorithm: Algorithm,
    /// Input as supplied by the caller
    pub input: Vec<f64>,
    /// Final array state
    pub sorted: Vec<f64>,
    /// Emitted steps, in order
    pub steps: StepSequence,
}

impl SortRun {
    /// Split into `(sorted, steps)`
    pub fn into_parts(self) -> (Vec<f64>, StepSequence) {
        (self.sorted, self.steps)
    }
}

/// Run the named algorithm with default options.
///
/// Fails with `UnknownAlgorithm` for an unrecognized name and with
/// `InvalidInput` for non-finite values; in both cases nothing is emitted.
pub fn run_sort(algorithm: &str, values: &[f64]) -> Result<SortRun> {
    run_sort_with(algorithm.parse()?, values, &SortOptions::default())
}

/// Run `algorithm` on a private copy of `values`, recording every step.
pub fn run_sort_with(
    algorithm: Algorithm,
    values: &[f64],
    options: &SortOptions,
) -> Result<SortRun> {
    record(algorithm, values, options, None)
}

/// Like [`run_sort_with`], but stops with `Cancelled` once `token` fires.
pub fn run_sort_cancellable(
    algorithm: Algorithm,
    values: &[f64],
    options: &SortOptions,
    token: CancelToken,
) -> Result<SortRun> {
    record(algorithm, values, options, Some(token))
}

fn record(
    algorithm: Algorithm,
    values: &[f64],
    options: &SortOptions,
    token: Option<CancelToken>,
) -> Result<SortRun> {
    ensure_finite(values)?;

    let mut recorder = StepRecorder::with_capacity(values.len() * 4);
    let sorted = {
        let mut data = Dataset::new(values.to_vec(), &mut recorder)?;
        if let Some(token) = token {
            data = data.with_cancel(token);
        }
        algorithm.run_with(&mut data, options)?;
        data.into_values()
    };
    let steps = recorder.into_sequence();
    debug!(
        algorithm = %algorithm,
        len = values.len(),
        steps = steps.len(),
        "trace recorded"
    );

    Ok(SortRun {
        algorithm,
        input: values.to_vec(),
        sorted,
        steps,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::step::Step;
    use crate::SortError;

    #[test]
    fn test_run_sort_by_name() {
        let run = run_sort("insertion", &[3.0, 1.0, 2.0]).unwrap();
        assert_eq!(run.algorithm, Algorithm::Insertion);
        assert_eq!(run.input, vec![3.0, 1.0, 2.0]);
        assert_eq!(run.sorted, vec![1.0, 2.0, 3.0]);
        assert_eq!(run.steps.replay(&run.input).unwrap(), run.sorted);
    }

    #[test]
    fn test_unknown_algorithm() {
        assert!(matches!(
            run_sort("bogo", &[1.0]),
            Err(SortError::UnknownAlgorithm(_))
        ));
    }

    #[test]
    fn test_invalid_input() {
        assert!(matches!(
            run_sort("merge", &[1.0, f64::INFINITY]),
            Err(SortError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_empty_input() {
        let (sorted, steps) = run_sort("quick", &[]).unwrap().into_parts();
        assert!(sorted.is_empty());
        assert!(steps.is_empty());
    }

    #[test]
    fn test_cancelled_before_start() {
        let token = CancelToken::new();
        token.cancel();
        let result = run_sort_cancellable(
            Algorithm::Bubble,
            &[2.0, 1.0],
            &SortOptions::default(),
            token,
        );
        assert!(matches!(result, Err(SortError::Cancelled)));
    }

    #[test]
    fn test_run_json_shape() {
        let run = run_sort("bubble", &[2.0, 1.0]).unwrap();
        let json = serde_json::to_value(&run).unwrap();
        assert_eq!(json["algorithm"], "bubble");
        assert_eq!(json["steps"][0], serde_json::json!({ "compare": [0, 1] }));
        let back: SortRun = serde_json::from_value(json).unwrap();
        assert_eq!(back.steps.get(1), Some(Step::Swap(0, 1)));
    }
}
