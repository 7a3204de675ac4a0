//! Clamped-inclusive stepped ranges
//!
//! Like a float `range()` that always finishes on its upper bound: values
//! `start, start + step, start + 2·step, ...` are produced while they stay
//! below `stop`, then `stop` itself is produced exactly once. Row and depth
//! pass enumeration both go through here, so the last row always lands on
//! the inset edge and the last pass always reaches the total depth.

use std::iter::FusedIterator;

/// Distance below `stop` at which a computed value counts as reaching it.
const STOP_TOLERANCE: f64 = 1e-9;

/// Iterator over `start..=stop` in increments of `step`, always ending on `stop`.
///
/// Each value is computed as `start + k·step` rather than by accumulation.
/// Cloning an unstarted range, or calling [`stepped_range`] again, restarts
/// the sequence from scratch.
#[derive(Debug, Clone)]
pub struct SteppedRange {
    start: f64,
    stop: f64,
    step: f64,
    index: u64,
    finished: bool,
}

impl SteppedRange {
    pub fn new(start: f64, stop: f64, step: f64) -> Self {
        Self {
            start,
            stop,
            step,
            index: 0,
            finished: false,
        }
    }

    fn step_is_usable(&self) -> bool {
        self.step.is_finite() && self.step > 0.0
    }
}

impl Iterator for SteppedRange {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        if self.finished {
            return None;
        }

        // A zero, negative or NaN step would never reach stop
        if self.step_is_usable() {
            let value = self.start + self.index as f64 * self.step;
            if value < self.stop - STOP_TOLERANCE {
                self.index += 1;
                return Some(value);
            }
        }

        self.finished = true;
        Some(self.stop)
    }
}

impl FusedIterator for SteppedRange {}

/// Build a [`SteppedRange`] from `start` up to and including `stop`.
pub fn stepped_range(start: f64, stop: f64, step: f64) -> SteppedRange {
    SteppedRange::new(start, stop, step)
}
