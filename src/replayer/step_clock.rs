//! Step pacing
//!
//! Converts wall-clock time into a number of steps due, the way a fixed-rate
//! interrupt turns samples into frames. Fractional remainders carry over
//! between ticks so a slow tick rate never loses steps.

use crate::config::PlaybackConfig;
use std::time::Duration;

/// Wall-clock to step-count converter
#[derive(Debug, Clone)]
pub struct StepClock {
    /// Pacing configuration
    config: PlaybackConfig,
    /// Time accumulated towards the next step
    carry: Duration,
    /// Total time fed through `advance`
    elapsed: Duration,
    /// Total steps released
    released: u64,
}

impl StepClock {
    /// Create a new step clock
    pub fn new(config: PlaybackConfig) -> Self {
        StepClock {
            config,
            carry: Duration::ZERO,
            elapsed: Duration::ZERO,
            released: 0,
        }
    }

    /// Feed `elapsed` wall time; returns how many steps are now due.
    ///
    /// Never returns more than `max_steps_per_tick`. Time beyond that cap is
    /// dropped so a stalled driver does not replay a burst afterwards.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.elapsed += elapsed;
        let cap = self.config.max_steps_per_tick.max(1);

        let delay = self.config.step_delay();
        if delay.is_zero() {
            self.released += u64::from(cap);
            return cap;
        }

        self.carry += elapsed;
        let delay_ns = delay.as_nanos();
        let carry_ns = self.carry.as_nanos();
        let due = carry_ns / delay_ns;
        let remainder = carry_ns % delay_ns;
        // remainder < delay_ns, which itself came from a u64 of milliseconds
        self.carry = Duration::from_nanos(remainder as u64);

        let due = u32::try_from(due).unwrap_or(u32::MAX).min(cap);
        self.released += u64::from(due);
        due
    }

    /// Time until the next step is due
    pub fn time_until_next(&self) -> Duration {
        self.config.step_delay().saturating_sub(self.carry)
    }

    /// Total steps released so far
    pub fn get_released(&self) -> u64 {
        self.released
    }

    /// Total wall time fed so far, in seconds
    pub fn get_elapsed_time(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }

    /// Reset the clock
    pub fn reset(&mut self) {
        self.carry = Duration::ZERO;
        self.elapsed = Duration::ZERO;
        self.released = 0;
    }
}

impl Default for StepClock {
    fn default() -> Self {
        Self::new(PlaybackConfig::default())
    }
}
