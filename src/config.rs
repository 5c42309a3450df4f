//! Playback and input configuration.
//!
//! Everything here is plain serde data so a front end can persist it as JSON.
//! The sorting core itself never reads configuration.

use crate::algorithms::SortOptions;
use crate::{Result, SortError};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::trace;

/// Largest array [`ArrayConfig::generate`] will produce.
pub const MAX_GENERATED_SIZE: usize = 10_000;

/// Pacing and layout of a playback driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackConfig {
    /// Delay between two steps in milliseconds.
    /// Zero means "as fast as the driver ticks".
    pub step_delay_ms: u64,
    /// Upper bound of steps released by a single tick
    pub max_steps_per_tick: u32,
    /// Rows used by the terminal bar chart
    pub bar_height: usize,
}

impl PlaybackConfig {
    /// 200 ms per step
    pub fn slow() -> Self {
        PlaybackConfig {
            step_delay_ms: 200,
            ..Self::normal()
        }
    }

    /// 50 ms per step
    pub fn normal() -> Self {
        PlaybackConfig {
            step_delay_ms: 50,
            max_steps_per_tick: 64,
            bar_height: 16,
        }
    }

    /// 5 ms per step
    pub fn fast() -> Self {
        PlaybackConfig {
            step_delay_ms: 5,
            ..Self::normal()
        }
    }

    /// Resolve a preset name (`slow`, `normal`, `fast`)
    pub fn preset(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "slow" => Ok(Self::slow()),
            "normal" => Ok(Self::normal()),
            "fast" => Ok(Self::fast()),
            other => Err(SortError::ConfigError(format!(
                "unknown speed preset '{other}' (expected slow, normal or fast)"
            ))),
        }
    }

    /// Delay between two steps
    pub fn step_delay(&self) -> Duration {
        Duration::from_millis(self.step_delay_ms)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.max_steps_per_tick == 0 {
            return Err(SortError::ConfigError(
                "max_steps_per_tick must be at least 1".into(),
            ));
        }
        if self.bar_height == 0 {
            return Err(SortError::ConfigError("bar_height must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self::normal()
    }
}

/// Shape of randomly generated input arrays.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArrayConfig {
    /// Number of values
    pub size: usize,
    /// Smallest value (inclusive)
    pub min_value: f64,
    /// Largest value (inclusive)
    pub max_value: f64,
}

impl Default for ArrayConfig {
    fn default() -> Self {
        ArrayConfig {
            size: 30,
            min_value: 5.0,
            max_value: 100.0,
        }
    }
}

impl ArrayConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.size > MAX_GENERATED_SIZE {
            return Err(SortError::ConfigError(format!(
                "array size {} exceeds {MAX_GENERATED_SIZE}",
                self.size
            )));
        }
        if !self.min_value.is_finite() || !self.max_value.is_finite() {
            return Err(SortError::ConfigError("value bounds must be finite".into()));
        }
        if self.min_value > self.max_value {
            return Err(SortError::ConfigError(format!(
                "min_value {} is greater than max_value {}",
                self.min_value, self.max_value
            )));
        }
        if !(self.max_value - self.min_value).is_finite() {
            return Err(SortError::ConfigError(format!(
                "value range {}..={} is too wide",
                self.min_value, self.max_value
            )));
        }
        Ok(())
    }

    /// Draw `size` whole-number values in `[min_value, max_value]`.
    pub fn generate<R: Rng>(&self, rng: &mut R) -> Result<Vec<f64>> {
        self.validate()?;
        let values = (0..self.size)
            .map(|_| {
                rng.gen_range(self.min_value..=self.max_value)
                    .round()
                    .clamp(self.min_value, self.max_value)
            })
            .collect();
        Ok(values)
    }
}

/// Front-end settings file: playback, input generation and sort options.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Playback pacing
    pub playback: PlaybackConfig,
    /// Random input shape
    pub array: ArrayConfig,
    /// Algorithm options
    pub sort: SortOptions,
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)
            .map_err(|e| SortError::ConfigError(format!("malformed settings: {e}")))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        trace!(path = %path.display(), "loading settings");
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Serialize as pretty JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self)
            .map_err(|e| SortError::ConfigError(format!("cannot serialize settings: {e}")))
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.playback.validate()?;
        self.array.validate()
    }
}
