//! SimulationClock - decides, per animation frame, whether to step
//!
//! Elapsed time accumulates; each step consumes one interval. At most one
//! step per frame, and the backlog is capped so a stalled tab does not
//! come back to a burst of catch-up steps.

use crate::core::EngineError;

/// Tolerance for timestamps that land a hair short of an interval boundary
const INTERVAL_EPSILON_MS: f64 = 1e-6;

/// Validated steps-per-second
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StepRate(f64);

impl StepRate {
    pub fn new(hz: f64) -> Result<Self, EngineError> {
        if hz.is_finite() && hz > 0.0 {
            Ok(Self(hz))
        } else {
            Err(EngineError::InvalidRate(hz))
        }
    }

    pub fn hz(self) -> f64 {
        self.0
    }

    pub fn interval_ms(self) -> f64 {
        1000.0 / self.0
    }
}

#[derive(Clone, Debug)]
pub struct SimulationClock {
    last: Option<f64>,
    accumulator: f64,
    max_backlog_steps: u32,
}

impl SimulationClock {
    pub fn new(max_backlog_steps: u32) -> Self {
        Self {
            last: None,
            accumulator: 0.0,
            max_backlog_steps: max_backlog_steps.max(1),
        }
    }

    /// Feed a frame timestamp (ms). Returns true when one step is due.
    ///
    /// The first timestamp only sets the baseline. Timestamps that go
    /// backwards or are not finite add no time.
    pub fn should_step(&mut self, now_ms: f64, rate: StepRate) -> bool {
        if !now_ms.is_finite() {
            return false;
        }
        let Some(last) = self.last.replace(now_ms) else {
            return false;
        };

        self.accumulator += (now_ms - last).max(0.0);

        let interval = rate.interval_ms();
        let cap = interval * self.max_backlog_steps as f64;
        if self.accumulator > cap {
            // drop whole intervals so the phase is kept
            let excess = ((self.accumulator - cap) / interval).ceil();
            self.accumulator -= excess * interval;
        }

        if self.accumulator + INTERVAL_EPSILON_MS >= interval {
            // an early step leaves a debt of at most the epsilon
            self.accumulator -= interval;
            true
        } else {
            false
        }
    }

    /// Track time without accumulating it (paused).
    pub fn observe(&mut self, now_ms: f64) {
        if now_ms.is_finite() {
            self.last = Some(now_ms);
        }
        self.accumulator = 0.0;
    }

    pub fn reset(&mut self) {
        self.last = None;
        self.accumulator = 0.0;
    }

    /// Pending time not yet consumed by a step (ms)
    pub fn backlog_ms(&self) -> f64 {
        self.accumulator.max(0.0)
    }

    pub fn set_max_backlog_steps(&mut self, steps: u32) {
        self.max_backlog_steps = steps.max(1);
    }
}
