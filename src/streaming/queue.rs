//! Bounded step queue between a producer thread and a consumer
//!
//! - Producer: the sort, pushing one step per operation
//! - Consumer: whatever animates or forwards the steps
//!
//! `push` blocks while the queue is full. `close` marks the end of the trace;
//! `cancel` drops whatever is buffered and releases a blocked producer.

use crate::step::{Step, StepEmitter};
use parking_lot::{Condvar, Mutex};
use std::collections::VecDeque;
use std::sync::Arc;

#[derive(Debug, Default)]
struct QueueState {
    steps: VecDeque<Step>,
    closed: bool,
    cancelled: bool,
    pushed: u64,
}

/// Bounded FIFO of steps with blocking backpressure
#[derive(Debug)]
pub struct StepQueue {
    state: Mutex<QueueState>,
    not_empty: Condvar,
    not_full: Condvar,
    capacity: usize,
}

impl StepQueue {
    /// Create a queue holding at most `capacity` steps (at least one)
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        StepQueue {
            state: Mutex::new(QueueState {
                steps: VecDeque::with_capacity(capacity),
                ..QueueState::default()
            }),
            not_empty: Condvar::new(),
            not_full: Condvar::new(),
            capacity,
        }
    }

    /// Append a step, blocking while the queue is full.
    ///
    /// Returns `false` if the queue was cancelled or closed; the step is
    /// dropped in that case.
    pub fn push(&self, step: Step) -> bool {
        let mut state = self.state.lock();
        while state.steps.len() >= self.capacity && !state.cancelled && !state.closed {
            self.not_full.wait(&mut state);
        }
        if state.cancelled || state.closed {
            return false;
        }
        state.steps.push_back(step);
        state.pushed += 1;
        drop(state);

        self.not_empty.notify_one();
        true
    }

    /// Take the next step, blocking until one arrives.
    ///
    /// Returns `None` once the queue is closed and drained, or cancelled.
    pub fn recv(&self) -> Option<Step> {
        let mut state = self.state.lock();
        loop {
            if state.cancelled {
                return None;
            }
            if let Some(step) = state.steps.pop_front() {
                drop(state);
                self.not_full.notify_one();
                return Some(step);
            }
            if state.closed {
                return None;
            }
            self.not_empty.wait(&mut state);
        }
    }

    /// Take the next step without blocking
    pub fn try_recv(&self) -> Option<Step> {
        let mut state = self.state.lock();
        if state.cancelled {
            return None;
        }
        let step = state.steps.pop_front();
        drop(state);
        if step.is_some() {
            self.not_full.notify_one();
        }
        step
    }

    /// Mark the end of the trace; buffered steps stay readable
    pub fn close(&self) {
        self.state.lock().closed = true;
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    /// Drop buffered steps and wake both sides
    pub fn cancel(&self) {
        {
            let mut state = self.state.lock();
            state.cancelled = true;
            state.steps.clear();
        }
        self.not_empty.notify_all();
        self.not_full.notify_all();
    }

    /// Number of buffered steps
    pub fn len(&self) -> usize {
        self.state.lock().steps.len()
    }

    /// True when nothing is buffered
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of buffered steps
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Total steps accepted so far
    pub fn pushed(&self) -> u64 {
        self.state.lock().pushed
    }

    /// Whether the producer has finished
    pub fn is_closed(&self) -> bool {
        self.state.lock().closed
    }

    /// Whether the queue was cancelled
    pub fn is_cancelled(&self) -> bool {
        self.state.lock().cancelled
    }

    /// Get queue fill fraction (0.0 to 1.0)
    pub fn fill_percentage(&self) -> f32 {
        self.len() as f32 / self.capacity as f32
    }
}

/// Emitter that forwards every step into a shared queue
#[derive(Debug, Clone)]
pub(crate) struct QueueEmitter {
    queue: Arc<StepQueue>,
}

impl QueueEmitter {
    pub(crate) fn new(queue: Arc<StepQueue>) -> Self {
        QueueEmitter { queue }
    }
}

impl StepEmitter for QueueEmitter {
    fn emit(&mut self, step: Step) {
        // a refused push means the run is being cancelled; the dataset's
        // cancel token stops the algorithm at its next operation
        let _ = self.queue.push(step);
    }
}
