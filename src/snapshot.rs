//! Read-only views of the game for UI and renderers
//!
//! Built fresh on request from the simulation records. Nothing here holds a
//! reference back into the game.

use glam::Vec3;
use serde::Serialize;

use crate::consts::{CENTER_LANE, COIN_VALUE};
use crate::economy::{Economy, SKINS, SkinDefinition};
use crate::sim::spawner::OVERHEAD_SPAN;
use crate::sim::{
    GameState, ObstacleKind, Phase, Scenery, SceneryItem, SceneryKind, Visual, VisualMode,
};

/// Lane ring drawn under a hurdle or wall warning
pub const RING_INNER: f32 = 0.55;
pub const RING_OUTER: f32 = 0.85;
/// Width of the strip drawn under an overhead warning
pub const STRIP_WIDTH: f32 = 1.4;
/// Telegraph markers hover just above the track
const TELEGRAPH_Y: f32 = 0.02;

/// Values the HUD shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UiState {
    pub mode: VisualMode,
    pub phase: Phase,
    pub score: u64,
    pub total_score: u64,
    pub run_coins: u32,
    pub bank_coins: u64,
    /// Current speed, 0 unless running
    pub speed: f32,
    /// "L", "C" or "R"
    pub lane_label: &'static str,
    pub is_game_over: bool,
}

impl UiState {
    pub fn capture(state: &GameState, bank_coins: u64) -> Self {
        let score = state.score();
        Self {
            mode: state.mode,
            phase: state.phase,
            score,
            total_score: score + u64::from(state.run_coins) * COIN_VALUE,
            run_coins: state.run_coins,
            bank_coins,
            speed: if state.phase == Phase::Running {
                state.scroll.speed
            } else {
                0.0
            },
            lane_label: state.player.lanes.label(),
            is_game_over: state.phase == Phase::GameOver,
        }
    }
}

/// Values the shop/locker panel shows
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetaState {
    pub bank_coins: u64,
    pub skin_catalog: &'static [SkinDefinition],
    pub owned_skin_ids: Vec<String>,
    pub active_skin_id: String,
}

impl MetaState {
    pub fn capture(economy: &Economy) -> Self {
        Self {
            bank_coins: economy.bank_coins(),
            skin_catalog: &SKINS,
            owned_skin_ids: economy.owned_skins().to_vec(),
            active_skin_id: economy.active_skin_id().to_string(),
        }
    }
}

/// Player pose
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub position: Vec3,
    pub scale: Vec3,
    pub leg_swing: f32,
    pub ducking: bool,
    /// Skin tint (0xRRGGBB) for the current mode
    pub color: u32,
    /// Whether the badger texture is applied
    pub textured: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObstacleView {
    pub id: u32,
    pub kind: ObstacleKind,
    pub position: Vec3,
    pub size: Vec3,
    pub visual: Visual,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinView {
    pub id: u32,
    pub position: Vec3,
    pub spin: f32,
    pub visual: Visual,
}

/// Marker geometry under a warning
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TelegraphShape {
    Ring { inner: f32, outer: f32 },
    Strip { width: f32, depth: f32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TelegraphView {
    pub id: u32,
    pub kind: ObstacleKind,
    pub position: Vec3,
    pub opacity: f32,
    pub shape: TelegraphShape,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneryView {
    pub kind: SceneryKind,
    pub position: Vec3,
    pub scale: Vec3,
    pub rotation: f32,
}

impl From<&SceneryItem> for SceneryView {
    fn from(item: &SceneryItem) -> Self {
        Self {
            kind: item.kind,
            position: item.pos,
            scale: item.scale,
            rotation: item.rotation,
        }
    }
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSnapshot {
    pub mode: VisualMode,
    pub phase: Phase,
    pub player: PlayerView,
    pub obstacles: Vec<ObstacleView>,
    pub coins: Vec<CoinView>,
    /// Only warnings that are currently visible
    pub telegraphs: Vec<TelegraphView>,
    /// Track dash positions
    pub dashes: Vec<Vec3>,
    pub scenery: Vec<SceneryView>,
    /// Ground texture offset; `None` when the ground is untextured
    pub ground_offset: Option<f32>,
}

impl RenderSnapshot {
    pub fn capture(state: &GameState, skin: &SkinDefinition, badger_textured: bool) -> Self {
        let lanes = &state.player.lanes;
        let full = state.mode == VisualMode::Full;

        let player = PlayerView {
            position: state.player.position(),
            scale: state.player.scale(&state.tuning),
            leg_swing: state.player.leg_swing,
            ducking: state.player.ducking,
            color: skin.color(state.mode),
            textured: full && badger_textured,
        };

        let obstacles = state
            .obstacles
            .iter()
            .map(|o| ObstacleView {
                id: o.id,
                kind: o.kind,
                position: o.pos,
                size: o.size,
                visual: o.visual,
            })
            .collect();

        let coins = state
            .coins
            .iter()
            .map(|c| CoinView {
                id: c.id,
                position: c.pos,
                spin: c.spin,
                visual: c.visual,
            })
            .collect();

        let telegraphs = state
            .pending
            .iter()
            .filter(|e| e.visible)
            .map(|e| {
                let (z, shape) = match e.kind {
                    ObstacleKind::Overhead => (
                        lanes.offset(CENTER_LANE),
                        TelegraphShape::Strip {
                            width: STRIP_WIDTH,
                            depth: OVERHEAD_SPAN,
                        },
                    ),
                    _ => (
                        lanes.offset(e.lane),
                        TelegraphShape::Ring {
                            inner: RING_INNER,
                            outer: RING_OUTER,
                        },
                    ),
                };
                TelegraphView {
                    id: e.id,
                    kind: e.kind,
                    position: Vec3::new(e.x, TELEGRAPH_Y, z),
                    opacity: e.intensity,
                    shape,
                }
            })
            .collect();

        let dashes = state
            .scenery
            .dashes
            .iter()
            .enumerate()
            .map(|(i, &x)| Vec3::new(x, 0.0, Scenery::dash_row(i)))
            .collect();

        let scenery = state.scenery.items.iter().map(SceneryView::from).collect();

        Self {
            mode: state.mode,
            phase: state.phase,
            player,
            obstacles,
            coins,
            telegraphs,
            dashes,
            scenery,
            ground_offset: (full && state.ground_textured).then_some(state.ground_offset),
        }
    }
}
