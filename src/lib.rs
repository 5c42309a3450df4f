//! Instrumented Sorting Engine
//!
//! Seven comparison sorts (bubble, selection, insertion, quick, merge, heap,
//! shell) rewritten to report every elementary operation they perform as a
//! [`Step`]. The resulting [`StepSequence`] is deterministic, immutable and can
//! be replayed any number of times against fresh copies of the input, which is
//! what a sort visualizer needs to animate a run at its own pace.
//!
//! # Features
//! - Compare / swap / overwrite / mark-final step trace per algorithm
//! - Pluggable [`StepEmitter`] (recorder, counter, closure, no-op)
//! - Cooperative cancellation at step boundaries
//! - Reference playback driver with pause/seek and wall-clock pacing
//! - Streamed runs on a producer thread with a bounded step queue
//! - CSV and JSON trace export
//!
//! # Crate feature flags
//! - `replayer` (default): Playback driver (`replayer`)
//! - `streaming` (default): Producer thread and step queue (`streaming`)
//! - `visualization` (default): Terminal bar rendering (`visualization`)
//! - `cli` (default): The `sortscope` binary
//!
//! # Quick start
//! ## Record a trace
//! ```
//! use sortscope::{run_sort, Step};
//! let run = run_sort("bubble", &[5.0, 3.0, 8.0, 1.0]).unwrap();
//! assert_eq!(run.sorted, vec![1.0, 3.0, 5.0, 8.0]);
//! assert_eq!(run.steps.get(0), Some(Step::Compare(0, 1)));
//! ```
//!
//! ## Drive an algorithm with your own emitter
//! ```
//! use sortscope::{Algorithm, Dataset, Step};
//! let mut swaps = 0;
//! let mut emitter = |step: Step| {
//!     if matches!(step, Step::Swap(..)) {
//!         swaps += 1;
//!     }
//! };
//! let mut data = Dataset::new(vec![3.0, 2.0, 1.0], &mut emitter).unwrap();
//! Algorithm::Selection.run(&mut data).unwrap();
//! assert_eq!(data.snapshot(), vec![1.0, 2.0, 3.0]);
//! drop(data);
//! assert_eq!(swaps, 1);
//! ```
//!
//! ## Replay
//! ```no_run
//! # #[cfg(feature = "replayer")]
//! # {
//! use sortscope::replayer::{PlaybackController, Replayer};
//! let values = vec![4.0, 1.0, 3.0];
//! let run = sortscope::run_sort("heap", &values).unwrap();
//! let mut player = Replayer::new(values, run.steps.clone());
//! player.play().unwrap();
//! while player.tick().unwrap().is_some() {
//!     // draw player.values() / player.bar_states()
//! }
//! # }
//! ```

#![warn(missing_docs)]

pub mod algorithms; // Instrumented sorting procedures
pub mod config; // Playback and input configuration
pub mod dataset; // Array under sort
pub mod export; // CSV / JSON trace export
#[cfg(feature = "replayer")]
pub mod replayer; // Playback Driver
pub mod runner; // One-call entry points
pub mod step; // Step model and emitters
#[cfg(feature = "streaming")]
pub mod streaming; // Producer thread + step queue
#[cfg(feature = "visualization")]
pub mod visualization; // Terminal bar rendering

/// Error types for sorting engine operations
#[derive(thiserror::Error, Debug)]
pub enum SortError {
    /// Input rejected before any step was emitted
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Algorithm name not recognized
    #[error("Unknown algorithm '{0}' (expected one of: bubble, selection, insertion, quick, merge, heap, shell)")]
    UnknownAlgorithm(String),

    /// Index outside the dataset bounds
    #[error("Index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// Offending index
        index: usize,
        /// Dataset length
        len: usize,
    },

    /// Run stopped through its cancel token
    #[error("Sort run cancelled")]
    Cancelled,

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// IO error while reading configuration or writing traces
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl From<String> for SortError {
    /// Converts a String into `SortError::Other`.
    ///
    /// Prefer the specific variants (`InvalidInput`, `ConfigError`) where the
    /// failure category is known; this conversion loses that information.
    fn from(msg: String) -> Self {
        SortError::Other(msg)
    }
}

impl From<&str> for SortError {
    /// Converts a string slice into `SortError::Other`.
    fn from(msg: &str) -> Self {
        SortError::Other(msg.to_string())
    }
}

/// Result type for sorting engine operations
pub type Result<T> = std::result::Result<T, SortError>;

// Public API exports
pub use algorithms::{Algorithm, MergeFinalization, SortOptions};
pub use config::{ArrayConfig, PlaybackConfig, Settings};
pub use dataset::{CancelToken, Dataset};
pub use runner::{run_sort, run_sort_cancellable, run_sort_with, SortRun};
pub use step::{NoopEmitter, Step, StepEmitter, StepRecorder, StepSequence, StepStats, Tee};

#[cfg(feature = "replayer")]
pub use replayer::{PlaybackController, PlaybackState, Replayer, StepClock};
#[cfg(feature = "streaming")]
pub use streaming::{StepQueue, StepStream, StreamConfig};
#[cfg(feature = "visualization")]
pub use visualization::{render_bars, BarState};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_conversions() {
        let from_str: SortError = "queue closed".into();
        assert!(matches!(from_str, SortError::Other(ref msg) if msg == "queue closed"));

        let from_string: SortError = format!("step {}", 3).into();
        assert_eq!(from_string.to_string(), "step 3");
    }
}
