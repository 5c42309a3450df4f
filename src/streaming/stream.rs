//! Producer-thread sort runs

use super::queue::{QueueEmitter, StepQueue};
use super::StreamConfig;
use crate::algorithms::{Algorithm, SortOptions};
use crate::dataset::{ensure_finite, CancelToken, Dataset};
use crate::step::Step;
use crate::{Result, SortError};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use tracing::{debug, warn};

/// A sort running on its own thread, consumed step by step.
pub struct StepStream {
    algorithm: Algorithm,
    queue: Arc<StepQueue>,
    cancel: CancelToken,
    handle: Option<JoinHandle<Result<Vec<f64>>>>,
}

impl StepStream {
    /// Start `algorithm` on a producer thread.
    ///
    /// Input is validated before the thread starts, so `InvalidInput` is
    /// reported here rather than from [`StepStream::join`].
    pub fn spawn(
        algorithm: Algorithm,
        values: Vec<f64>,
        options: SortOptions,
        config: StreamConfig,
    ) -> Result<Self> {
        ensure_finite(&values)?;

        let queue = Arc::new(StepQueue::new(config.queue_capacity));
        let cancel = CancelToken::new();

        let handle = {
            let queue = Arc::clone(&queue);
            let cancel = cancel.clone();
            thread::Builder::new()
                .name(format!("sortscope-{}", algorithm.as_str()))
                .spawn(move || {
                    let result = produce(algorithm, values, &options, &queue, cancel);
                    queue.close();
                    result
                })?
        };

        debug!(
            algorithm = %algorithm,
            capacity = queue.capacity(),
            "step stream started"
        );

        Ok(StepStream {
            algorithm,
            queue,
            cancel,
            handle: Some(handle),
        })
    }

    /// Next step, blocking; `None` once the run has finished and been drained
    pub fn recv(&self) -> Option<Step> {
        self.queue.recv()
    }

    /// Next step if one is buffered
    pub fn try_recv(&self) -> Option<Step> {
        self.queue.try_recv()
    }

    /// Blocking iterator over the remaining steps
    pub fn iter(&self) -> impl Iterator<Item = Step> + '_ {
        std::iter::from_fn(move || self.recv())
    }

    /// Stop the producer at its next step boundary
    pub fn cancel(&self) {
        self.cancel.cancel();
        self.queue.cancel();
    }

    /// Algorithm being run
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Queue shared with the producer
    pub fn queue(&self) -> &StepQueue {
        &self.queue
    }

    /// Wait for the producer and return the sorted values.
    ///
    /// Yields `Cancelled` if [`StepStream::cancel`] landed before the sort
    /// finished. Steps still buffered are discarded.
    pub fn join(mut self) -> Result<Vec<f64>> {
        let handle = self
            .handle
            .take()
            .ok_or_else(|| SortError::Other("step stream already joined".to_string()))?;

        // unread steps would otherwise keep the producer blocked forever
        if !self.queue.is_closed() {
            self.drain_until_closed();
        }

        handle
            .join()
            .map_err(|_| SortError::Other(format!("{} producer thread panicked", self.algorithm)))?
    }

    fn drain_until_closed(&self) {
        while self.queue.recv().is_some() {}
    }
}

impl Drop for StepStream {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            self.cancel();
            if handle.join().is_err() {
                warn!(algorithm = %self.algorithm, "producer thread panicked");
            }
        }
    }
}

impl std::fmt::Debug for StepStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StepStream")
            .field("algorithm", &self.algorithm)
            .field("buffered", &self.queue.len())
            .field("fill", &self.queue.fill_percentage())
            .field("running", &self.handle.is_some())
            .finish()
    }
}

fn produce(
    algorithm: Algorithm,
    values: Vec<f64>,
    options: &SortOptions,
    queue: &Arc<StepQueue>,
    cancel: CancelToken,
) -> Result<Vec<f64>> {
    let mut emitter = QueueEmitter::new(Arc::clone(queue));
    let mut data = Dataset::new(values, &mut emitter)?.with_cancel(cancel);
    algorithm.run_with(&mut data, options)?;
    Ok(data.into_values())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run_sort;

    #[test]
    fn test_stream_matches_recorded_trace() {
        let values = vec![9.0, 4.0, 7.0, 1.0, 4.0, 3.0];
        let recorded = run_sort("quick", &values).unwrap();

        let stream = StepStream::spawn(
            Algorithm::Quick,
            values,
            SortOptions::default(),
            StreamConfig { queue_capacity: 2 },
        )
        .unwrap();
        let streamed: Vec<Step> = stream.iter().collect();
        let sorted = stream.join().unwrap();

        assert_eq!(streamed.as_slice(), recorded.steps.as_slice());
        assert_eq!(sorted, recorded.sorted);
    }

    #[test]
    fn test_cancel_stops_producer() {
        let values: Vec<f64> = (0..200).rev().map(f64::from).collect();
        let stream = StepStream::spawn(
            Algorithm::Bubble,
            values,
            SortOptions::default(),
            StreamConfig { queue_capacity: 1 },
        )
        .unwrap();

        assert!(stream.recv().is_some());
        stream.cancel();
        assert!(matches!(stream.join(), Err(SortError::Cancelled)));
    }

    #[test]
    fn test_drop_releases_blocked_producer() {
        let values: Vec<f64> = (0..200).rev().map(f64::from).collect();
        let stream = StepStream::spawn(
            Algorithm::Bubble,
            values,
            SortOptions::default(),
            StreamConfig { queue_capacity: 1 },
        )
        .unwrap();

        assert!(stream.recv().is_some());
        // wait until the producer is parked on the full queue
        while stream.queue().is_empty() {
            std::thread::yield_now();
        }
        assert!(format!("{stream:?}").contains("running: true"));

        let queue = Arc::clone(&stream.queue);
        drop(stream);
        assert!(queue.is_cancelled());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_invalid_input_rejected_before_spawn() {
        let result = StepStream::spawn(
            Algorithm::Heap,
            vec![1.0, f64::NAN],
            SortOptions::default(),
            StreamConfig::default(),
        );
        assert!(matches!(result, Err(SortError::InvalidInput(_))));
    }

    #[test]
    fn test_join_without_reading() {
        let stream = StepStream::spawn(
            Algorithm::Merge,
            vec![3.0, 1.0, 2.0],
            SortOptions::default(),
            StreamConfig { queue_capacity: 1 },
        )
        .unwrap();
        assert_eq!(stream.join().unwrap(), vec![1.0, 2.0, 3.0]);
    }
}
