//! Dataset
//!
//! The live array under sort. A [`Dataset`] owns the values and borrows the
//! [`StepEmitter`] of the run exclusively, so exactly one algorithm can drive
//! it at a time. Every mutation reports its step immediately after the write
//! lands; comparisons report before the values are read.
//!
//! An optional [`CancelToken`] is polled before each operation. Cancellation
//! therefore always lands on a step boundary and never leaves a half-applied
//! swap behind.

use crate::step::{Step, StepEmitter};
use crate::{Result, SortError};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared flag used to stop a run cooperatively.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a token in the "running" state
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }
}

/// Array of finite values being sorted, plus the run's step emitter.
pub struct Dataset<'e> {
    values: Vec<f64>,
    emitter: &'e mut dyn StepEmitter,
    cancel: Option<CancelToken>,
}

impl<'e> Dataset<'e> {
    /// Create a dataset from caller-supplied values.
    ///
    /// Rejects NaN and infinities with [`SortError::InvalidInput`]; nothing is
    /// emitted in that case.
    pub fn new(values: Vec<f64>, emitter: &'e mut dyn StepEmitter) -> Result<Self> {
        ensure_finite(&values)?;
        Ok(Dataset {
            values,
            emitter,
            cancel: None,
        })
    }

    /// Attach a cancel token polled before every operation
    pub fn with_cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Number of values
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True for an empty dataset
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Read-only copy of the current order
    pub fn snapshot(&self) -> Vec<f64> {
        self.values.clone()
    }

    /// Borrow the current order
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Consume the dataset, returning the values
    pub fn into_values(self) -> Vec<f64> {
        self.values
    }

    /// Re-check the finiteness invariant (values may have been written through `set`)
    pub fn validate(&self) -> Result<()> {
        ensure_finite(&self.values)
    }

    /// Value at `index`
    pub fn get(&self, index: usize) -> Result<f64> {
        self.check(index)?;
        Ok(self.values[index])
    }

    /// Replace the value at `index`, emitting `Overwrite`.
    pub fn set(&mut self, index: usize, value: f64) -> Result<()> {
        self.checkpoint()?;
        self.check(index)?;
        if !value.is_finite() {
            return Err(SortError::InvalidInput(format!(
                "cannot write non-finite value {value} at index {index}"
            )));
        }
        self.values[index] = value;
        self.emitter.emit(Step::Overwrite(index, value));
        Ok(())
    }

    /// Exchange two slots, emitting a single `Swap`.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<()> {
        self.checkpoint()?;
        self.check(i)?;
        self.check(j)?;
        self.values.swap(i, j);
        self.emitter.emit(Step::Swap(i, j));
        Ok(())
    }

    /// Emit `Compare(i, j)` and report whether `a[i] > a[j]`.
    ///
    /// Strict greater-than is the shared "needs reordering" test, so equal
    /// values never trigger a write.
    pub fn greater(&mut self, i: usize, j: usize) -> Result<bool> {
        self.note_compare(i, j)?;
        Ok(self.values[i] > self.values[j])
    }

    /// Emit `Compare(i, j)` and report whether `a[i] < a[j]`.
    pub fn less(&mut self, i: usize, j: usize) -> Result<bool> {
        self.note_compare(i, j)?;
        Ok(self.values[i] < self.values[j])
    }

    /// Emit `Compare(i, j)` without reading the slots.
    ///
    /// Used when one side of the comparison lives outside the array (the held
    /// value of an insertion, the heads of merge buffers).
    pub fn note_compare(&mut self, i: usize, j: usize) -> Result<()> {
        self.checkpoint()?;
        self.check(i)?;
        self.check(j)?;
        self.emitter.emit(Step::Compare(i, j));
        Ok(())
    }

    /// Emit `MarkFinal(index)`
    pub fn mark_final(&mut self, index: usize) -> Result<()> {
        self.checkpoint()?;
        self.check(index)?;
        self.emitter.emit(Step::MarkFinal(index));
        Ok(())
    }

    /// Emit `MarkFinal` for every index in increasing order
    pub fn mark_all_final(&mut self) -> Result<()> {
        for index in 0..self.len() {
            self.mark_final(index)?;
        }
        Ok(())
    }

    fn check(&self, index: usize) -> Result<()> {
        if index < self.values.len() {
            Ok(())
        } else {
            Err(SortError::IndexOutOfBounds {
                index,
                len: self.values.len(),
            })
        }
    }

    fn checkpoint(&self) -> Result<()> {
        match &self.cancel {
            Some(token) if token.is_cancelled() => Err(SortError::Cancelled),
            _ => Ok(()),
        }
    }
}

impl fmt::Debug for Dataset<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dataset")
            .field("values", &self.values)
            .field("cancellable", &self.cancel.is_some())
            .finish()
    }
}

/// Reject NaN and infinities, naming the first offending index.
pub fn ensure_finite(values: &[f64]) -> Result<()> {
    match values.iter().position(|v| !v.is_finite()) {
        Some(index) => Err(SortError::InvalidInput(format!(
            "value {} at index {} is not finite",
            values[index], index
        ))),
        None => Ok(()),
    }
}
