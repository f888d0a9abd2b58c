//! Physics integration
//!
//! Vertical jump physics with an inelastic ground clamp, plus the longitudinal
//! speed ramp and distance accumulator.

use serde::{Deserialize, Serialize};

use crate::consts::GROUND_EPSILON;

/// Vertical body of the player
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VerticalBody {
    /// Height above ground, never negative
    pub y: f32,
    /// Vertical velocity (positive is up)
    pub vel: f32,
}

impl VerticalBody {
    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.y <= GROUND_EPSILON
    }

    /// Launch upward if grounded. Returns whether the jump happened.
    pub fn try_jump(&mut self, launch_velocity: f32) -> bool {
        if !self.is_grounded() {
            return false;
        }
        self.vel = launch_velocity;
        true
    }

    /// Semi-implicit Euler step under constant gravity.
    ///
    /// Landing is inelastic: the step that would push the body below ground
    /// leaves it at exactly zero height with zero velocity.
    pub fn integrate(&mut self, gravity: f32, dt: f32) {
        self.vel += gravity * dt;
        self.y += self.vel * dt;
        if self.y <= 0.0 && self.vel <= 0.0 {
            self.y = 0.0;
            self.vel = 0.0;
        }
    }

    /// Pin to the ground (idle phases)
    pub fn settle(&mut self) {
        self.y = 0.0;
        self.vel = 0.0;
    }
}

/// Longitudinal motion: scroll speed and travelled distance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scroll {
    pub speed: f32,
    pub distance: f32,
}

impl Scroll {
    pub fn new(speed: f32) -> Self {
        Self {
            speed,
            distance: 0.0,
        }
    }

    /// Ramp speed toward the cap, then accumulate distance at the new speed
    pub fn advance(&mut self, ramp: f32, max_speed: f32, dt: f32) {
        self.speed = (self.speed + ramp * dt).min(max_speed.max(self.speed));
        self.distance += self.speed * dt;
    }
}
