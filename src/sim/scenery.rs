//! Decorative world motion
//!
//! Track dashes and parallax background layers. None of this affects
//! gameplay; it keeps the scene moving while the run is idle.

use std::f32::consts::{PI, TAU};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;

/// Lateral offsets of the two dash rows (between the lanes)
pub const DASH_ROWS: [f32; 2] = [-1.2, 1.2];
pub const DASH_COUNT: usize = 40;
pub const DASH_SPACING: f32 = 1.6;
const DASH_START_X: f32 = -18.0;
const DASH_WRAP_X: f32 = -22.0;

/// Background layer an item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SceneryKind {
    Cloud,
    Mountain,
    Tree,
}

impl SceneryKind {
    /// Fraction of world speed this layer scrolls at
    pub fn parallax(&self) -> f32 {
        match self {
            SceneryKind::Cloud => 0.18,
            SceneryKind::Mountain => 0.06,
            SceneryKind::Tree => 0.28,
        }
    }

    /// (min, max) X; items leaving past min re-enter beyond max
    pub fn wrap(&self) -> (f32, f32) {
        match self {
            SceneryKind::Cloud => (-40.0, 90.0),
            SceneryKind::Mountain => (-55.0, 120.0),
            SceneryKind::Tree => (-35.0, 85.0),
        }
    }
}

/// One background object
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneryItem {
    pub kind: SceneryKind,
    pub pos: Vec3,
    pub scale: Vec3,
    /// Yaw (radians)
    pub rotation: f32,
    /// Resting height for swaying items
    pub base_y: f32,
    /// Sway phase (radians)
    pub phase: f32,
}

/// All decorative world state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenery {
    /// Dash X positions, `DASH_COUNT` per row in `DASH_ROWS` order
    pub dashes: Vec<f32>,
    pub items: Vec<SceneryItem>,
}

impl Scenery {
    pub fn new(rng: &mut dyn RandomSource) -> Self {
        let mut dashes = Vec::with_capacity(DASH_ROWS.len() * DASH_COUNT);
        for _ in DASH_ROWS {
            for i in 0..DASH_COUNT {
                dashes.push(DASH_START_X + i as f32 * DASH_SPACING);
            }
        }

        let mut items = Vec::with_capacity(37);

        for _ in 0..10 {
            let base_y = 8.0 + rng.range(0.0, 6.0);
            items.push(SceneryItem {
                kind: SceneryKind::Cloud,
                pos: Vec3::new(rng.range(-20.0, 70.0), base_y, rng.range(-18.0, 18.0)),
                scale: Vec3::new(rng.range(1.2, 2.4), rng.range(0.7, 1.4), rng.range(0.8, 1.8)),
                rotation: 0.0,
                base_y,
                phase: rng.range(0.0, TAU),
            });
        }

        for _ in 0..9 {
            let side = if rng.chance(0.5) { -1.0 } else { 1.0 };
            let s = rng.range(0.8, 2.4);
            let sy = rng.range(0.7, 2.1);
            // Cone of height 16 resting on the ground
            let y = 16.0 * sy / 2.0 - 0.2;
            items.push(SceneryItem {
                kind: SceneryKind::Mountain,
                pos: Vec3::new(rng.range(-25.0, 95.0), y, side * rng.range(11.0, 18.0)),
                scale: Vec3::new(s, sy, s),
                rotation: rng.range(0.0, PI),
                base_y: y,
                phase: 0.0,
            });
        }

        for _ in 0..18 {
            let side = if rng.chance(0.5) { -1.0 } else { 1.0 };
            let z = side * rng.range(7.2, 10.4);
            items.push(SceneryItem {
                kind: SceneryKind::Tree,
                pos: Vec3::new(rng.range(-10.0, 80.0), 0.0, z),
                scale: Vec3::splat(rng.range(0.9, 1.6)),
                rotation: rng.range(0.0, PI),
                base_y: 0.0,
                phase: 0.0,
            });
        }

        Self { dashes, items }
    }

    /// Scroll everything left at `world_speed`, wrapping as needed
    pub fn update(&mut self, dt: f32, world_speed: f32, time: f32, rng: &mut dyn RandomSource) {
        let wrap_len = DASH_SPACING * DASH_COUNT as f32;
        for x in &mut self.dashes {
            *x -= world_speed * dt;
            if *x < DASH_WRAP_X {
                *x += wrap_len;
            }
        }

        for item in &mut self.items {
            item.pos.x -= world_speed * dt * item.kind.parallax();
            if item.kind == SceneryKind::Cloud {
                item.pos.y = item.base_y + (time * 0.6 + item.phase).sin() * 0.25;
            }
            let (min_x, max_x) = item.kind.wrap();
            if item.pos.x < min_x {
                item.pos.x = max_x + rng.range(0.0, 10.0);
            }
        }
    }

    /// Z offset of the row a dash index belongs to
    pub fn dash_row(index: usize) -> f32 {
        DASH_ROWS[(index / DASH_COUNT).min(DASH_ROWS.len() - 1)]
    }
}
