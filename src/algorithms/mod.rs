//! Algorithm Set
//!
//! Seven comparison sorts, each a function of a [`Dataset`] that leaves it in
//! non-decreasing order and emits exactly one `MarkFinal` per index (with the
//! legacy merge marking as the only opt-in exception).
//!
//! All of them share the strict greater-than tie-break: two equal values are
//! never reordered, so no superfluous write is reported for them.

mod bubble;
mod heap;
mod insertion;
mod merge;
mod quick;
mod selection;
mod shell;

use crate::dataset::Dataset;
use crate::{Result, SortError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Sorting algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    /// Adjacent-pair exchange passes
    Bubble,
    /// Minimum selection per position
    Selection,
    /// Shift-based insertion
    Insertion,
    /// Lomuto partition, last-element pivot
    Quick,
    /// Top-down merge with temporary buffers
    Merge,
    /// In-place max-heap
    Heap,
    /// Gapped insertion, gaps N/2, N/4, ..., 1
    Shell,
}

/// Asymptotic costs of one algorithm as implemented here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Complexity {
    /// Best-case time
    pub best: &'static str,
    /// Average-case time
    pub average: &'static str,
    /// Worst-case time
    pub worst: &'static str,
    /// Auxiliary space
    pub space: &'static str,
}

impl Algorithm {
    /// Every algorithm, in menu order
    pub const ALL: [Algorithm; 7] = [
        Algorithm::Bubble,
        Algorithm::Selection,
        Algorithm::Insertion,
        Algorithm::Quick,
        Algorithm::Merge,
        Algorithm::Heap,
        Algorithm::Shell,
    ];

    /// Lower-case identifier accepted by [`FromStr`]
    pub fn as_str(&self) -> &'static str {
        match self {
            Algorithm::Bubble => "bubble",
            Algorithm::Selection => "selection",
            Algorithm::Insertion => "insertion",
            Algorithm::Quick => "quick",
            Algorithm::Merge => "merge",
            Algorithm::Heap => "heap",
            Algorithm::Shell => "shell",
        }
    }

    /// Human-readable name
    pub fn display_name(&self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Selection => "Selection Sort",
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Quick => "Quick Sort",
            Algorithm::Merge => "Merge Sort",
            Algorithm::Heap => "Heap Sort",
            Algorithm::Shell => "Shell Sort",
        }
    }

    /// Time/space costs of this implementation
    pub fn complexity(&self) -> Complexity {
        let (best, average, worst, space) = match self {
            // no early exit: every pass runs
            Algorithm::Bubble => ("O(n²)", "O(n²)", "O(n²)", "O(1)"),
            Algorithm::Selection => ("O(n²)", "O(n²)", "O(n²)", "O(1)"),
            Algorithm::Insertion => ("O(n)", "O(n²)", "O(n²)", "O(1)"),
            Algorithm::Quick => ("O(n log n)", "O(n log n)", "O(n²)", "O(n)"),
            Algorithm::Merge => ("O(n log n)", "O(n log n)", "O(n log n)", "O(n)"),
            Algorithm::Heap => ("O(n log n)", "O(n log n)", "O(n log n)", "O(1)"),
            Algorithm::Shell => ("O(n log n)", "O(n^1.5)", "O(n²)", "O(1)"),
        };
        Complexity {
            best,
            average,
            worst,
            space,
        }
    }

    /// Sort `data` with default options
    pub fn run(self, data: &mut Dataset<'_>) -> Result<()> {
        self.run_with(data, &SortOptions::default())
    }

    /// Sort `data`, emitting the step trace through its emitter.
    ///
    /// Non-finite values are rejected before the first step is emitted.
    pub fn run_with(self, data: &mut Dataset<'_>, options: &SortOptions) -> Result<()> {
        data.validate()?;
        debug!(algorithm = %self, len = data.len(), "sort run started");

        let result = match self {
            Algorithm::Bubble => bubble::sort(data),
            Algorithm::Selection => selection::sort(data),
            Algorithm::Insertion => insertion::sort(data),
            Algorithm::Quick => quick::sort(data),
            Algorithm::Merge => merge::sort(data, options.merge_finalization),
            Algorithm::Heap => heap::sort(data),
            Algorithm::Shell => shell::sort(data),
        };

        match &result {
            Ok(()) => debug!(algorithm = %self, "sort run finished"),
            Err(SortError::Cancelled) => warn!(algorithm = %self, "sort run cancelled"),
            Err(err) => warn!(algorithm = %self, error = %err, "sort run failed"),
        }
        result
    }
}

impl FromStr for Algorithm {
    type Err = SortError;

    fn from_str(value: &str) -> Result<Self> {
        let wanted = value.trim().to_ascii_lowercase();
        let wanted = wanted.strip_suffix("sort").unwrap_or(&wanted).trim_end();
        Algorithm::ALL
            .into_iter()
            .find(|algorithm| algorithm.as_str() == wanted)
            .ok_or_else(|| SortError::UnknownAlgorithm(value.to_string()))
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// When merge sort reports `MarkFinal` for the slots it writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergeFinalization {
    /// Mark each slot right after the outermost merge writes it.
    /// Every index is marked exactly once.
    #[default]
    Outermost,
    /// Mark each slot right after any merge writes it. Indices are marked
    /// once per merge level, and before their value is globally settled.
    EveryMerge,
}

/// Per-run algorithm options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SortOptions {
    /// Merge sort finalization policy
    pub merge_finalization: MergeFinalization,
}
