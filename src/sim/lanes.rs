//! Lane model
//!
//! Three fixed lateral tracks. The target lane changes instantly on input;
//! the rendered lateral position eases toward it every tick.

use serde::{Deserialize, Serialize};

use crate::consts::{CENTER_LANE, LANE_COUNT};
use crate::damp;

/// Lateral lane state for the player
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaneModel {
    /// Lateral (z) offset of each lane
    offsets: [f32; LANE_COUNT],
    /// Targeted lane index, always in 0..LANE_COUNT
    target: usize,
    /// Current eased lateral position
    pub z: f32,
}

impl LaneModel {
    pub fn new(offsets: [f32; LANE_COUNT]) -> Self {
        Self {
            offsets,
            target: CENTER_LANE,
            z: offsets[CENTER_LANE],
        }
    }

    /// Targeted lane index
    #[inline]
    pub fn lane(&self) -> usize {
        self.target
    }

    /// Lateral offset of a lane (out-of-range indices clamp to the nearest lane)
    #[inline]
    pub fn offset(&self, lane: usize) -> f32 {
        self.offsets[lane.min(LANE_COUNT - 1)]
    }

    /// Lateral offset of the targeted lane
    #[inline]
    pub fn target_z(&self) -> f32 {
        self.offsets[self.target]
    }

    /// Target a lane, clamping to the valid range
    pub fn set_lane(&mut self, lane: isize) {
        self.target = lane.clamp(0, LANE_COUNT as isize - 1) as usize;
    }

    pub fn move_left(&mut self) {
        self.set_lane(self.target as isize - 1);
    }

    pub fn move_right(&mut self) {
        self.set_lane(self.target as isize + 1);
    }

    /// Ease the lateral position toward the target lane
    pub fn update(&mut self, damping: f32, dt: f32) {
        self.z = damp(self.z, self.target_z(), damping, dt);
    }

    /// Snap back to the center lane
    pub fn recenter(&mut self) {
        self.target = CENTER_LANE;
        self.z = self.offsets[CENTER_LANE];
    }

    /// HUD label for the targeted lane
    pub fn label(&self) -> &'static str {
        match self.target {
            0 => "L",
            1 => "C",
            2 => "R",
            _ => "?",
        }
    }
}
