//! Terminal Visualization Helpers
//!
//! Text rendering of a presentation copy as a vertical bar chart, one column
//! per value, plus a few status-line helpers. Purely a consumer of replayer
//! state; nothing here feeds back into a run.

use crate::step::{Step, StepStats};
use bitflags::bitflags;

bitflags! {
    /// Display flags for one bar
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct BarState: u8 {
        /// Part of the most recent comparison
        const COMPARED = 0x01;
        /// Part of the most recent swap
        const SWAPPED = 0x02;
        /// Target of the most recent overwrite
        const WRITTEN = 0x04;
        /// In its permanent sorted position
        const FINAL = 0x08;
    }
}

impl BarState {
    /// Glyph used to draw a bar in this state
    pub fn glyph(&self) -> char {
        if self.intersects(BarState::SWAPPED | BarState::WRITTEN) {
            '▓'
        } else if self.contains(BarState::COMPARED) {
            '▒'
        } else if self.contains(BarState::FINAL) {
            '█'
        } else {
            '░'
        }
    }
}

/// Flag the bars touched by `step`.
///
/// Only the transient flags are set; `MarkFinal` leaves `states` untouched
/// since finality is tracked by whoever owns the presentation copy.
pub fn highlight(states: &mut [BarState], step: Step) {
    let flag = match step {
        Step::Compare(..) => BarState::COMPARED,
        Step::Swap(..) => BarState::SWAPPED,
        Step::Overwrite(..) => BarState::WRITTEN,
        Step::MarkFinal(_) => return,
    };
    let (i, j) = step.indices();
    for index in std::iter::once(i).chain(j) {
        if let Some(state) = states.get_mut(index) {
            *state |= flag;
        }
    }
}

/// Render `values` as `height` rows of text, top row first.
///
/// Bars are scaled between the smallest and largest value; the smallest
/// still gets one row so every column stays visible. Missing `states`
/// entries draw as pending.
pub fn render_bars(values: &[f64], states: &[BarState], height: usize) -> Vec<String> {
    if values.is_empty() || height == 0 {
        return Vec::new();
    }

    let (min, max) = values
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let span = max - min;

    let lengths: Vec<usize> = values
        .iter()
        .map(|&v| {
            if span <= 0.0 {
                height
            } else {
                1 + (((v - min) / span) * (height - 1) as f64).round() as usize
            }
        })
        .collect();

    (0..height)
        .map(|row| {
            let level = height - row;
            lengths
                .iter()
                .enumerate()
                .map(|(index, &length)| {
                    if length >= level {
                        states.get(index).copied().unwrap_or_default().glyph()
                    } else {
                        ' '
                    }
                })
                .collect()
        })
        .collect()
}

/// Fixed-width progress bar for a 0.0..=1.0 fraction
pub fn create_progress_bar(progress: f32, max_length: usize) -> String {
    let normalized = progress.clamp(0.0, 1.0);
    let block_count = (normalized * max_length as f32) as usize;
    let blocks = "█".repeat(block_count.min(max_length));
    let spaces = " ".repeat(max_length.saturating_sub(block_count));
    format!("[{}{}]", blocks, spaces)
}

/// One-line status: position, total and per-kind counters
pub fn render_summary(position: usize, total: usize, stats: &StepStats) -> String {
    format!(
        "step {position:>6}/{total:<6} cmp {:>6}  swp {:>6}  wr {:>6}  fin {:>4}",
        stats.compares, stats.swaps, stats.overwrites, stats.finals
    )
}
