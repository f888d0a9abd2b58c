//! Badger Run - A three-lane endless runner
//!
//! Core modules:
//! - `sim`: Fixed timestep simulation (physics, spawner, collisions, game state)
//! - `economy`: Coin wallet and skin unlocks
//! - `persistence`: Best-effort storage for the economy record
//! - `assets`: Key-addressed asset cache (absence is never an error)
//! - `tuning`: Data-driven game balance
//! - `game`: Public action/query API wrapping everything above
//! - `snapshot`: Read-only UI and render views
//! - `stepper`, `input`: Host-side helpers (fixed stepping, key/gesture mapping)

pub mod assets;
pub mod economy;
pub mod game;
pub mod input;
pub mod persistence;
pub mod sim;
pub mod snapshot;
pub mod stepper;
pub mod tuning;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use economy::{Economy, EconomyRecord, SkinDefinition};
pub use game::BadgerRun;
pub use snapshot::{MetaState, RenderSnapshot, UiState};
pub use stepper::FixedStepper;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;
    /// Largest real frame delta accepted per frame (tab-switch guard)
    pub const MAX_FRAME_DT: f32 = 0.25;
    /// Accumulated backlog ceiling in seconds
    pub const MAX_BACKLOG: f32 = 0.5;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 15;

    /// Number of lateral lanes
    pub const LANE_COUNT: usize = 3;
    /// Middle lane (start lane, overhead obstacles span from here)
    pub const CENTER_LANE: usize = 1;

    /// Score bonus per collected coin
    pub const COIN_VALUE: u64 = 25;

    /// Vertical position below which the player counts as grounded
    pub const GROUND_EPSILON: f32 = 0.0001;

    /// Storage key for the persisted economy record
    pub const STORAGE_KEY: &str = "badgerRunProgress_v1";
}

/// Frame-rate independent exponential approach of `current` toward `target`.
///
/// `lambda` is the damping rate in 1/s; larger values snap faster.
#[inline]
pub fn damp(current: f32, target: f32, lambda: f32, dt: f32) -> f32 {
    current + (target - current) * (1.0 - (-lambda * dt).exp())
}
