//! Streamed sort runs
//!
//! Runs a sort on a producer thread and hands its steps to a consumer through
//! a bounded queue. The producer blocks while the queue is full, so a slow
//! consumer (an animation, a network writer) paces the sort itself and memory
//! stays bounded by the queue capacity instead of the trace length.

pub mod queue;
pub mod stream;

pub use queue::StepQueue;
pub use stream::StepStream;

/// Configuration for streamed runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamConfig {
    /// Maximum number of steps buffered between producer and consumer
    /// Smaller queues keep the sort closer to what is on screen
    pub queue_capacity: usize,
}

impl StreamConfig {
    /// Small queue, producer stays a few steps ahead of the consumer
    pub fn low_latency() -> Self {
        StreamConfig { queue_capacity: 64 }
    }

    /// Large queue for consumers that drain in bursts
    pub fn buffered() -> Self {
        StreamConfig {
            queue_capacity: 4096,
        }
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self::buffered()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_config_presets() {
        assert!(StreamConfig::low_latency().queue_capacity < StreamConfig::buffered().queue_capacity);
        assert_eq!(StreamConfig::default(), StreamConfig::buffered());
    }
}
