//! Fixed timestep accumulator
//!
//! Converts variable real frame deltas into whole simulation steps.

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_BACKLOG, MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

/// Accumulates real time and hands out fixed steps
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct FixedStepper {
    accumulator: f32,
}

impl FixedStepper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time carried over to the next frame
    pub fn backlog(&self) -> f32 {
        self.accumulator
    }

    /// Forget any carried time
    pub fn clear(&mut self) {
        self.accumulator = 0.0;
    }

    /// Add a frame delta and return how many fixed steps to run.
    ///
    /// The delta is clamped to `MAX_FRAME_DT` and the backlog to
    /// `MAX_BACKLOG`. When the step cap is reached the remaining backlog is
    /// dropped instead of carried.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        let dt = if frame_dt.is_finite() {
            frame_dt.clamp(0.0, MAX_FRAME_DT)
        } else {
            0.0
        };
        self.accumulator = (self.accumulator + dt).min(MAX_BACKLOG);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }
        if steps == MAX_SUBSTEPS {
            self.accumulator = 0.0;
        }
        steps
    }
}
