//! Collision and collection
//!
//! Obstacles use axis-aligned box overlap; coins use a sphere test around the
//! player's torso. Any obstacle overlap ends the run.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::state::{Coin, Obstacle, Player};
use crate::tuning::Tuning;

/// Player model bounds in model space (feet at the origin, facing +X)
pub const PLAYER_LOCAL_MIN: Vec3 = Vec3::new(-0.55, 0.1, -0.55);
pub const PLAYER_LOCAL_MAX: Vec3 = Vec3::new(1.05, 2.1, 0.55);

/// Height above the feet of the coin pickup point
pub const TORSO_HEIGHT: f32 = 1.05;

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Overlap on all three axes (touching faces count as a hit)
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.cmple(other.max).all() && other.min.cmple(self.max).all()
    }
}

impl Obstacle {
    pub fn aabb(&self) -> Aabb {
        Aabb::from_center_size(self.pos, self.size)
    }
}

/// Player hitbox for the current pose, including duck scaling
pub fn player_hitbox(player: &Player, tuning: &Tuning) -> Aabb {
    let scale = player.scale(tuning);
    let origin = player.position();
    Aabb::new(origin + PLAYER_LOCAL_MIN * scale, origin + PLAYER_LOCAL_MAX * scale)
}

/// Pickup point for coins
pub fn torso_point(player: &Player) -> Vec3 {
    player.position() + Vec3::Y * TORSO_HEIGHT
}

/// First obstacle the hitbox overlaps
pub fn first_hit(hitbox: &Aabb, obstacles: &[Obstacle]) -> Option<u32> {
    obstacles
        .iter()
        .find(|o| hitbox.intersects(&o.aabb()))
        .map(|o| o.id)
}

/// Remove every coin within `radius` of `point`, returning their IDs
pub fn collect_coins(point: Vec3, radius: f32, coins: &mut Vec<Coin>) -> Vec<u32> {
    let r2 = radius * radius;
    let mut collected = Vec::new();
    coins.retain(|c| {
        if c.pos.distance_squared(point) <= r2 {
            collected.push(c.id);
            false
        } else {
            true
        }
    });
    collected
}
