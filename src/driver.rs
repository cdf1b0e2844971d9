//! Fixed-step frame driver
//!
//! Turns variable host frame times into whole simulation steps so a run
//! integrates the same way at 30 Hz and at 144 Hz. Excess time beyond
//! `max_substeps` steps is dropped to avoid a spiral of death.

use crate::sim::{Clock, Engine};

/// Default step: 120 Hz
pub const DEFAULT_STEP_MS: f64 = 1000.0 / 120.0;
/// Maximum substeps per host frame
pub const DEFAULT_MAX_SUBSTEPS: u32 = 8;

#[derive(Debug, Clone)]
pub struct FixedStepDriver {
    step_ms: f64,
    max_substeps: u32,
    accumulator: f64,
    last_host_time: Option<f64>,
}

impl Default for FixedStepDriver {
    fn default() -> Self {
        Self::new(DEFAULT_STEP_MS, DEFAULT_MAX_SUBSTEPS)
    }
}

impl FixedStepDriver {
    pub fn new(step_ms: f64, max_substeps: u32) -> Self {
        Self {
            step_ms,
            max_substeps: max_substeps.max(1),
            accumulator: 0.0,
            last_host_time: None,
        }
    }

    pub fn step_ms(&self) -> f64 {
        self.step_ms
    }

    /// Leftover fraction of a step, for render interpolation (0.0 to 1.0)
    pub fn alpha(&self) -> f64 {
        self.accumulator / self.step_ms
    }

    /// Forget accumulated time, e.g. after the host was suspended
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_host_time = None;
    }

    /// Feed one host frame. Returns the number of simulation steps run.
    pub fn frame<C: Clock>(&mut self, engine: &mut Engine<C>, host_time: f64) -> u32 {
        let delta = match self.last_host_time {
            Some(last) => (host_time - last).max(0.0),
            None => 0.0,
        };
        self.last_host_time = Some(host_time);

        let cap = self.step_ms * self.max_substeps as f64;
        if self.accumulator + delta > cap {
            log::debug!(
                "Dropping {:.1}ms of frame time",
                self.accumulator + delta - cap
            );
        }
        self.accumulator = (self.accumulator + delta).min(cap);

        let mut steps = 0;
        while self.accumulator >= self.step_ms {
            self.accumulator -= self.step_ms;
            // Each step lands on its own timestamp, trailing the host by
            // whatever is still accumulated
            engine.step(host_time - self.accumulator, self.step_ms);
            steps += 1;
        }
        steps
    }
}
