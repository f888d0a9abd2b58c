//! Data-driven game balance
//!
//! Every gameplay number lives here so a host can override balance from JSON
//! without touching the simulation. Missing fields fall back to defaults.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Lanes ===
    /// Lateral (z) offsets of the three lanes
    pub lane_offsets: [f32; 3],
    /// Exponential damping rate for the lane slide (1/s)
    pub lane_damping: f32,

    // === Vertical physics ===
    /// Gravity (units/s², negative is down)
    pub gravity: f32,
    /// Launch velocity applied by a jump
    pub jump_velocity: f32,

    // === Speed ===
    /// Scroll speed at run start
    pub base_speed: f32,
    /// Speed gained per second while running
    pub speed_ramp: f32,
    /// Speed cap
    pub max_speed: f32,
    /// World scroll speed used for decoration while not running
    pub idle_world_speed: f32,

    // === Spawner ===
    /// Telegraph warning duration before an obstacle materializes
    pub telegraph_lead: f32,
    /// X of the line where telegraphs materialize into obstacles
    pub spawn_base_offset: f32,
    /// X position past which obstacles and coins are culled
    pub cull_x: f32,
    /// Delay before the first pattern after a run starts
    pub start_delay: f32,
    /// Speed range mapped onto difficulty [0, 1]
    pub difficulty_range: f32,
    /// Spawn interval at base speed
    pub spawn_interval_max: f32,
    /// Spawn interval floor
    pub spawn_interval_min: f32,
    /// Interval reduction per unit of speed above base
    pub spawn_interval_per_speed: f32,
    /// Random jitter applied to the interval, as (low, high) multipliers
    pub spawn_jitter: (f32, f32),
    /// Extra delay on the second wall of a blockade
    pub blockade_stagger: f32,

    // === Coins ===
    /// Player torso to coin distance that collects a coin
    pub coin_collect_radius: f32,
    /// Resting coin height
    pub coin_height: f32,
    /// X of the first coin in a trail
    pub coin_trail_start: f32,
    /// Random extra start offset for optional trails
    pub coin_trail_jitter: f32,
    /// Spacing between coins in a regular trail
    pub coin_spacing: f32,
    /// Spacing between coins in the blockade reward trail
    pub blockade_coin_spacing: f32,

    // === Obstacles ===
    /// Height of the overhead bar's center
    pub overhead_elevation: f32,

    // === Player pose ===
    /// Scale applied to the player model while ducking
    pub duck_scale: Vec3,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            lane_offsets: [-2.4, 0.0, 2.4],
            lane_damping: 14.0,

            gravity: -22.0,
            jump_velocity: 8.8,

            base_speed: 8.0,
            speed_ramp: 0.18,
            max_speed: 22.0,
            idle_world_speed: 2.0,

            telegraph_lead: 0.7,
            spawn_base_offset: 18.0,
            cull_x: -22.0,
            start_delay: 0.25,
            difficulty_range: 10.0,
            spawn_interval_max: 1.25,
            spawn_interval_min: 0.55,
            spawn_interval_per_speed: 0.045,
            spawn_jitter: (0.8, 1.15),
            blockade_stagger: 0.18,

            coin_collect_radius: 0.75,
            coin_height: 1.05,
            coin_trail_start: 24.0,
            coin_trail_jitter: 2.0,
            coin_spacing: 1.25,
            blockade_coin_spacing: 1.15,

            overhead_elevation: 1.7,

            duck_scale: Vec3::new(1.15, 0.7, 1.15),
        }
    }
}

impl Tuning {
    /// Parse tuning overrides from JSON (unspecified fields keep defaults)
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Normalized difficulty for a given speed
    pub fn difficulty(&self, speed: f32) -> f32 {
        ((speed - self.base_speed) / self.difficulty_range).clamp(0.0, 1.0)
    }

    /// Un-jittered spawn interval for a given speed (shrinks as speed grows)
    pub fn spawn_interval(&self, speed: f32) -> f32 {
        (self.spawn_interval_max - (speed - self.base_speed) * self.spawn_interval_per_speed)
            .clamp(self.spawn_interval_min, self.spawn_interval_max)
    }
}
