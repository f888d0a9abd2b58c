//! Game state and core simulation types
//!
//! Plain data only: no render handles. Renderers observe these records
//! through [`crate::snapshot::RenderSnapshot`].

use std::str::FromStr;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::lanes::LaneModel;
use super::physics::{Scroll, VerticalBody};
use super::rng::RandomSource;
use super::scenery::Scenery;
use crate::tuning::Tuning;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    /// Waiting for the primary action
    Ready,
    /// Active run
    Running,
    /// Run ended by a collision
    GameOver,
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Ready => "ready",
            Phase::Running => "running",
            Phase::GameOver => "gameover",
        }
    }
}

/// Visual fidelity. Stored and reported only; it never changes gameplay rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VisualMode {
    #[default]
    Prototype,
    Full,
}

impl VisualMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            VisualMode::Prototype => "prototype",
            VisualMode::Full => "full",
        }
    }
}

/// A visual mode name that is neither prototype nor full
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown visual mode '{0}'")]
pub struct UnknownModeError(pub String);

impl FromStr for VisualMode {
    type Err = UnknownModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "prototype" | "proto" => Ok(VisualMode::Prototype),
            "full" => Ok(VisualMode::Full),
            _ => Err(UnknownModeError(s.to_string())),
        }
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObstacleKind {
    /// Low, small; jump over or change lane
    Hurdle,
    /// Tall, narrow; change lane
    Wall,
    /// Elevated bar across every lane; duck under
    Overhead,
}

impl ObstacleKind {
    /// Asset key of the rich model for this kind
    pub fn model_key(&self) -> &'static str {
        match self {
            ObstacleKind::Hurdle => "hurdle",
            ObstacleKind::Wall => "wall",
            ObstacleKind::Overhead => "overhead",
        }
    }
}

/// A telegraphed obstacle waiting to materialize
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpawnEvent {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Target lane (always the center lane for overhead)
    pub lane: usize,
    /// Seconds until the obstacle becomes solid
    pub countdown: f32,
    /// Total warning duration
    pub lead: f32,
    /// World X, scrolling with the world
    pub x: f32,
    /// Warning-marker opacity (0 while not yet visible)
    pub intensity: f32,
    /// Whether the warning marker is shown
    pub visible: bool,
}

impl SpawnEvent {
    /// Elapsed fraction of the lead time, clamped to [0, 1]
    pub fn lead_fraction(&self) -> f32 {
        if self.lead <= 0.0 {
            return 1.0;
        }
        ((self.lead - self.countdown) / self.lead).clamp(0.0, 1.0)
    }
}

/// How an obstacle or coin is drawn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Visual {
    /// Built-in box/torus primitive
    Primitive,
    /// Loaded model addressed by asset key
    Model,
}

/// A solid obstacle
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub lane: usize,
    /// Center of the bounding box
    pub pos: Vec3,
    /// Full box dimensions (x, y, z)
    pub size: Vec3,
    pub visual: Visual,
}

/// A collectible coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Coin {
    pub id: u32,
    pub lane: usize,
    pub pos: Vec3,
    /// Resting height the bob oscillates around
    pub base_y: f32,
    /// Bob phase offset (radians)
    pub phase: f32,
    /// Spin angle around the vertical axis (radians)
    pub spin: f32,
    pub visual: Visual,
}

/// Sizes of the rich obstacle models that are currently available.
///
/// `None` means the model is absent and the primitive is used.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelSet {
    pub hurdle: Option<Vec3>,
    pub wall: Option<Vec3>,
    pub overhead: Option<Vec3>,
    pub coin: bool,
}

impl ModelSet {
    pub fn for_kind(&self, kind: ObstacleKind) -> Option<Vec3> {
        match kind {
            ObstacleKind::Hurdle => self.hurdle,
            ObstacleKind::Wall => self.wall,
            ObstacleKind::Overhead => self.overhead,
        }
    }
}

/// Player pose and motion
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub lanes: LaneModel,
    pub body: VerticalBody,
    pub ducking: bool,
    /// Grounded body bob added to the rendered height
    pub bob: f32,
    /// Leg swing angle (radians), zero while airborne
    pub leg_swing: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            lanes: LaneModel::new(tuning.lane_offsets),
            body: VerticalBody::default(),
            ducking: false,
            bob: 0.0,
            leg_swing: 0.0,
        }
    }

    /// Rendered world position of the model origin (feet)
    pub fn position(&self) -> Vec3 {
        Vec3::new(0.0, self.body.y + self.bob, self.lanes.z)
    }

    /// Model scale (ducking squashes vertically)
    pub fn scale(&self, tuning: &Tuning) -> Vec3 {
        if self.ducking {
            tuning.duck_scale
        } else {
            Vec3::ONE
        }
    }
}

/// Things that happened during a tick, drained by the owner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// A coin was picked up
    CoinCollected { coin_id: u32 },
    /// A telegraph converted into a solid obstacle
    ObstacleMaterialized { obstacle_id: u32, kind: ObstacleKind },
    /// A pattern was queued at the given difficulty
    PatternQueued { difficulty: f32 },
    /// The player hit an obstacle
    Collision { obstacle_id: u32 },
}

/// Complete game state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub tuning: Tuning,
    pub mode: VisualMode,
    pub phase: Phase,
    /// Simulation clock (seconds), advances in every phase
    pub time: f32,
    pub player: Player,
    pub scroll: Scroll,
    /// Seconds until the next pattern is queued
    pub spawn_timer: f32,
    /// Telegraphs waiting to materialize
    pub pending: Vec<SpawnEvent>,
    pub obstacles: Vec<Obstacle>,
    pub coins: Vec<Coin>,
    /// Coins collected this run
    pub run_coins: u32,
    /// Rich models usable while in full mode
    pub models: ModelSet,
    /// Decorative parallax layers and track dashes
    pub scenery: Scenery,
    /// Ground texture scroll offset (full mode with a ground texture)
    pub ground_offset: f32,
    pub ground_textured: bool,
    /// Events produced since the last drain
    #[serde(skip)]
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    pub fn new(tuning: Tuning, rng: &mut dyn RandomSource) -> Self {
        let player = Player::new(&tuning);
        let scroll = Scroll::new(tuning.base_speed);
        Self {
            mode: VisualMode::Prototype,
            phase: Phase::Ready,
            time: 0.0,
            player,
            scroll,
            spawn_timer: 0.0,
            pending: Vec::new(),
            obstacles: Vec::new(),
            coins: Vec::new(),
            run_coins: 0,
            models: ModelSet::default(),
            scenery: Scenery::new(rng),
            ground_offset: 0.0,
            ground_textured: false,
            events: Vec::new(),
            next_id: 1,
            tuning,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Back to `Ready` with a clean track. Mode, models and scenery survive.
    pub fn reset(&mut self) {
        self.obstacles.clear();
        self.pending.clear();
        self.coins.clear();
        self.run_coins = 0;

        self.phase = Phase::Ready;
        self.player.body.settle();
        self.player.ducking = false;
        self.player.lanes.recenter();
        self.scroll = Scroll::new(self.tuning.base_speed);
        self.spawn_timer = 0.0;
    }

    /// Leave `Ready` and arm the spawner
    pub fn start_run(&mut self) {
        if self.phase != Phase::Ready {
            return;
        }
        self.phase = Phase::Running;
        self.spawn_timer = self.tuning.start_delay;
    }

    /// Distance-based score
    pub fn score(&self) -> u64 {
        self.scroll.distance.max(0.0).floor() as u64
    }

    /// Score including the coin bonus
    pub fn total_score(&self) -> u64 {
        self.score() + u64::from(self.run_coins) * crate::consts::COIN_VALUE
    }

    /// Current normalized difficulty
    pub fn difficulty(&self) -> f32 {
        self.tuning.difficulty(self.scroll.speed)
    }

    /// Take all events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Lane under the player right now
    pub fn player_lane(&self) -> usize {
        self.player.lanes.lane()
    }
}
