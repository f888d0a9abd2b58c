//! Fixed timestep simulation module
//!
//! All gameplay logic lives here. This module stays free of rendering:
//! - Fixed timestep only
//! - Randomness injected through `RandomSource`
//! - Plain data records, observed by renderers through snapshots

pub mod collision;
pub mod lanes;
pub mod physics;
pub mod rng;
pub mod scenery;
pub mod spawner;
pub mod state;
pub mod tick;

pub use collision::{Aabb, collect_coins, first_hit, player_hitbox, torso_point};
pub use lanes::LaneModel;
pub use physics::{Scroll, VerticalBody};
pub use rng::{AmbientRandom, RandomSource, ScriptedRandom};
pub use scenery::{Scenery, SceneryItem, SceneryKind};
pub use spawner::{Pattern, enqueue_pattern, queue_spawn};
pub use state::{
    Coin, GameEvent, GameState, ModelSet, Obstacle, ObstacleKind, Phase, Player, SpawnEvent,
    UnknownModeError, Visual, VisualMode,
};
pub use tick::tick;
