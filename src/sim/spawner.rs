//! Telegraph spawner
//!
//! Decides what to spawn and warns before it becomes solid. Every obstacle
//! starts life as a [`SpawnEvent`] whose warning marker charges up over a fixed
//! lead time; when the countdown expires it converts into an [`Obstacle`].
//!
//! Pattern tiers by difficulty:
//! - `< 0.35`: single hurdle, optional coin trail
//! - `< 0.75`: single hurdle or wall, optional coin trail
//! - `>= 0.75`: overhead bar, single wall/hurdle, or a two-lane blockade

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::rng::RandomSource;
use super::state::{
    Coin, GameEvent, GameState, Obstacle, ObstacleKind, SpawnEvent, Visual, VisualMode,
};
use crate::consts::{CENTER_LANE, LANE_COUNT};

/// Below this difficulty only hurdles spawn
pub const TIER_EASY: f32 = 0.35;
/// Below this difficulty walls join hurdles; above it overheads and blockades unlock
pub const TIER_MEDIUM: f32 = 0.75;

/// Chance a single obstacle targets the player's current lane
const PLAYER_LANE_BIAS: f32 = 0.65;
/// Chance an optional coin trail is spawned
const COIN_TRAIL_CHANCE: f32 = 0.7;
/// Chance an optional trail avoids the player's lane
const COIN_AWAY_BIAS: f32 = 0.75;

/// Warning pulse rate (rad/s) and per-lane phase offset
const PULSE_RATE: f32 = 18.0;
const PULSE_LANE_PHASE: f32 = 2.1;
/// Opacity at the start and the added amount at full charge
const TELEGRAPH_BASE: f32 = 0.12;
const TELEGRAPH_PEAK: f32 = 0.38;

/// Height of the primitive overhead bar
pub const OVERHEAD_THICKNESS: f32 = 0.3;
/// Depth of the overhead bar (spans all three lanes)
pub const OVERHEAD_SPAN: f32 = 7.0;

/// What a call to [`enqueue_pattern`] produced
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Pattern {
    /// One hurdle or wall
    Single { kind: ObstacleKind, lane: usize },
    /// Overhead bar with a center coin trail
    Overhead,
    /// Walls in both lanes except `safe`, which holds a coin trail
    Blockade { safe: usize },
}

/// Queue a telegraphed obstacle.
///
/// The event starts far enough ahead that, scrolling at the current speed, it
/// reaches the materialization line exactly when its countdown hits zero.
pub fn queue_spawn(state: &mut GameState, kind: ObstacleKind, lane: usize, extra_delay: f32) {
    let lead = state.tuning.telegraph_lead;
    let countdown = lead + extra_delay;
    let x = state.tuning.spawn_base_offset + state.scroll.speed * countdown;
    let lane = if kind == ObstacleKind::Overhead {
        CENTER_LANE
    } else {
        lane.min(LANE_COUNT - 1)
    };

    let id = state.next_entity_id();
    state.pending.push(SpawnEvent {
        id,
        kind,
        lane,
        countdown,
        lead,
        x,
        intensity: 0.0,
        visible: false,
    });
}

/// Recompute a telegraph's visibility and opacity
pub fn update_telegraph(event: &mut SpawnEvent, time: f32) {
    let fraction = event.lead_fraction();
    event.visible = fraction > 0.0;
    let pulse = 0.65 + 0.35 * (time * PULSE_RATE + event.lane as f32 * PULSE_LANE_PHASE).sin();
    event.intensity = (TELEGRAPH_BASE + TELEGRAPH_PEAK * fraction) * pulse;
}

/// Count down and scroll every pending event, materializing expired ones.
///
/// Each event converts exactly once and leaves the queue in the same step.
pub fn advance_pending(state: &mut GameState, rng: &mut dyn RandomSource, dt: f32) {
    let speed = state.scroll.speed;
    let time = state.time;
    let mut expired = Vec::new();

    state.pending.retain_mut(|event| {
        event.countdown -= dt;
        event.x -= speed * dt;
        update_telegraph(event, time);
        if event.countdown <= 0.0 {
            expired.push((event.kind, event.lane, event.x));
            false
        } else {
            true
        }
    });

    for (kind, lane, x) in expired {
        let obstacle_id = materialize(state, kind, lane, x, rng);
        state
            .events
            .push(GameEvent::ObstacleMaterialized { obstacle_id, kind });
    }
}

/// Build a solid obstacle at `x`, returning its ID.
///
/// In full mode a loaded model supplies the collider size; otherwise the
/// primitive's randomized dimensions are used.
pub fn materialize(
    state: &mut GameState,
    kind: ObstacleKind,
    lane: usize,
    x: f32,
    rng: &mut dyn RandomSource,
) -> u32 {
    let tuning = &state.tuning;
    let lane_z = tuning.lane_offsets[lane.min(LANE_COUNT - 1)];
    let overhead_bottom = tuning.overhead_elevation - OVERHEAD_THICKNESS / 2.0;

    let model = match state.mode {
        VisualMode::Full => state.models.for_kind(kind),
        VisualMode::Prototype => None,
    };

    let (pos, size, visual) = match model {
        Some(size) => {
            // Keep kind semantics: ground kinds stand on the floor, the
            // overhead bar keeps the same underside clearance as the primitive.
            let (y, z) = match kind {
                ObstacleKind::Overhead => (
                    overhead_bottom + size.y / 2.0,
                    tuning.lane_offsets[CENTER_LANE],
                ),
                _ => (size.y / 2.0, lane_z),
            };
            (Vec3::new(x, y, z), size, Visual::Model)
        }
        None => {
            let size = primitive_size(kind, rng);
            let (y, z) = match kind {
                ObstacleKind::Overhead => {
                    (tuning.overhead_elevation, tuning.lane_offsets[CENTER_LANE])
                }
                _ => (size.y / 2.0, lane_z),
            };
            (Vec3::new(x, y, z), size, Visual::Primitive)
        }
    };

    let lane = if kind == ObstacleKind::Overhead {
        CENTER_LANE
    } else {
        lane
    };
    let id = state.next_entity_id();
    state.obstacles.push(Obstacle {
        id,
        kind,
        lane,
        pos,
        size,
        visual,
    });
    id
}

/// Randomized box dimensions for a primitive obstacle
pub fn primitive_size(kind: ObstacleKind, rng: &mut dyn RandomSource) -> Vec3 {
    match kind {
        ObstacleKind::Wall => Vec3::new(
            rng.range(0.8, 1.2),
            rng.range(2.6, 3.2),
            rng.range(0.7, 1.0),
        ),
        ObstacleKind::Overhead => Vec3::new(rng.range(1.6, 2.2), OVERHEAD_THICKNESS, OVERHEAD_SPAN),
        ObstacleKind::Hurdle => Vec3::new(
            rng.range(0.6, 1.0),
            rng.range(0.8, 1.3),
            rng.range(0.6, 1.0),
        ),
    }
}

/// Spawn `count` coins in a lane, starting at `x_start`
pub fn spawn_coin_trail(
    state: &mut GameState,
    lane: usize,
    count: usize,
    x_start: f32,
    spacing: f32,
    rng: &mut dyn RandomSource,
) {
    let lane = lane.min(LANE_COUNT - 1);
    let z = state.tuning.lane_offsets[lane];
    let base_y = state.tuning.coin_height;
    let visual = if state.mode == VisualMode::Full && state.models.coin {
        Visual::Model
    } else {
        Visual::Primitive
    };

    for i in 0..count {
        let id = state.next_entity_id();
        state.coins.push(Coin {
            id,
            lane,
            pos: Vec3::new(x_start + i as f32 * spacing, base_y, z),
            base_y,
            phase: rng.range(0.0, std::f32::consts::TAU),
            spin: 0.0,
            visual,
        });
    }
}

/// Pick and queue the next pattern for the current difficulty
pub fn enqueue_pattern(state: &mut GameState, rng: &mut dyn RandomSource) -> Pattern {
    let difficulty = state.difficulty();
    let player_lane = state.player_lane();
    state.events.push(GameEvent::PatternQueued { difficulty });

    let r = rng.next_f32();

    let pattern = if difficulty < TIER_EASY {
        let lane = biased_lane(player_lane, rng);
        queue_spawn(state, ObstacleKind::Hurdle, lane, 0.0);
        maybe_coins(state, difficulty, None, rng);
        Pattern::Single {
            kind: ObstacleKind::Hurdle,
            lane,
        }
    } else if difficulty < TIER_MEDIUM {
        let kind = if r < 0.65 {
            ObstacleKind::Hurdle
        } else {
            ObstacleKind::Wall
        };
        let lane = biased_lane(player_lane, rng);
        queue_spawn(state, kind, lane, 0.0);
        maybe_coins(state, difficulty, None, rng);
        Pattern::Single { kind, lane }
    } else if r < 0.15 {
        queue_spawn(state, ObstacleKind::Overhead, CENTER_LANE, 0.0);
        maybe_coins(state, difficulty, Some(CENTER_LANE), rng);
        Pattern::Overhead
    } else if r < 0.65 {
        let lane = biased_lane(player_lane, rng);
        let kind = if rng.chance(0.55) {
            ObstacleKind::Wall
        } else {
            ObstacleKind::Hurdle
        };
        queue_spawn(state, kind, lane, 0.0);
        maybe_coins(state, difficulty, None, rng);
        Pattern::Single { kind, lane }
    } else {
        // Safe lane first; the blocked lanes are its complement
        let safe = rng.index(LANE_COUNT);
        let mut blocked = (0..LANE_COUNT).filter(|&lane| lane != safe);
        if let (Some(first), Some(second)) = (blocked.next(), blocked.next()) {
            let stagger = state.tuning.blockade_stagger;
            queue_spawn(state, ObstacleKind::Wall, first, 0.0);
            queue_spawn(state, ObstacleKind::Wall, second, stagger);
        }
        let start = state.tuning.coin_trail_start;
        let spacing = state.tuning.blockade_coin_spacing;
        spawn_coin_trail(state, safe, 6, start, spacing, rng);
        Pattern::Blockade { safe }
    };

    log::debug!("Queued {:?} at difficulty {:.2}", pattern, difficulty);
    pattern
}

/// The player's lane most of the time, otherwise any lane
fn biased_lane(player_lane: usize, rng: &mut dyn RandomSource) -> usize {
    if rng.chance(PLAYER_LANE_BIAS) {
        player_lane
    } else {
        rng.index(LANE_COUNT)
    }
}

/// A lane adjacent to the player's (never the player's own)
fn lane_beside(player_lane: usize, rng: &mut dyn RandomSource) -> usize {
    let left = rng.chance(0.5);
    match (player_lane, left) {
        (0, _) => 1,
        (p, _) if p >= LANE_COUNT - 1 => LANE_COUNT - 2,
        (p, true) => p - 1,
        (p, false) => p + 1,
    }
}

/// Optional coin trail: 4 coins at lower difficulty, 6 at higher
fn maybe_coins(
    state: &mut GameState,
    difficulty: f32,
    preferred_lane: Option<usize>,
    rng: &mut dyn RandomSource,
) {
    if !rng.chance(COIN_TRAIL_CHANCE) {
        return;
    }
    let player_lane = state.player_lane();
    let lane = match preferred_lane {
        Some(lane) => lane,
        None if rng.chance(COIN_AWAY_BIAS) => lane_beside(player_lane, rng),
        None => rng.index(LANE_COUNT),
    };
    let x_start = state.tuning.coin_trail_start + rng.range(0.0, state.tuning.coin_trail_jitter);
    let count = if difficulty < 0.5 { 4 } else { 6 };
    let spacing = state.tuning.coin_spacing;
    spawn_coin_trail(state, lane, count, x_start, spacing, rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::rng::{AmbientRandom, ScriptedRandom};
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn running_at(speed: f32) -> GameState {
        let mut state = GameState::new(Tuning::default(), &mut ScriptedRandom::constant(0.5));
        state.start_run();
        state.scroll.speed = speed;
        state
    }

    #[test]
    fn test_queue_spawn_places_event_ahead() {
        let mut state = running_at(8.0);
        queue_spawn(&mut state, ObstacleKind::Hurdle, 2, 0.0);
        let ev = &state.pending[0];
        assert_eq!(ev.countdown, 0.7);
        assert_eq!(ev.lead, 0.7);
        assert!((ev.x - (18.0 + 8.0 * 0.7)).abs() < 1e-5);
        assert!(!ev.visible);
        assert_eq!(ev.intensity, 0.0);
    }

    #[test]
    fn test_overhead_always_center() {
        let mut state = running_at(8.0);
        queue_spawn(&mut state, ObstacleKind::Overhead, 0, 0.0);
        assert_eq!(state.pending[0].lane, CENTER_LANE);
    }

    #[test]
    fn test_extra_delay_extends_countdown_not_lead() {
        let mut state = running_at(10.0);
        queue_spawn(&mut state, ObstacleKind::Wall, 0, 0.18);
        let ev = &state.pending[0];
        assert!((ev.countdown - 0.88).abs() < 1e-6);
        assert_eq!(ev.lead, 0.7);
        // Delayed telegraph stays dark until its lead window opens
        let mut ev = ev.clone();
        ev.countdown -= 0.1;
        update_telegraph(&mut ev, 0.0);
        assert!(!ev.visible);
    }

    #[test]
    fn test_telegraph_charges_up() {
        let mut state = running_at(8.0);
        queue_spawn(&mut state, ObstacleKind::Hurdle, 1, 0.0);
        let mut ev = state.pending[0].clone();
        ev.countdown = 0.35;
        update_telegraph(&mut ev, 0.0);
        assert!(ev.visible);
        assert!((ev.lead_fraction() - 0.5).abs() < 1e-6);
        // pulse = 0.65 + 0.35 * sin(2.1)
        let pulse = 0.65 + 0.35 * 2.1f32.sin();
        assert!((ev.intensity - (0.12 + 0.38 * 0.5) * pulse).abs() < 1e-5);
    }

    #[test]
    fn test_event_arrives_at_materialization_line() {
        let mut state = running_at(8.0);
        let mut rng = ScriptedRandom::constant(0.5);
        queue_spawn(&mut state, ObstacleKind::Wall, 1, 0.0);
        let dt = 1.0 / 60.0;
        while state.obstacles.is_empty() {
            advance_pending(&mut state, &mut rng, dt);
        }
        assert!(state.pending.is_empty());
        // Overshoot is at most one step of travel
        assert!((state.obstacles[0].pos.x - 18.0).abs() <= 8.0 * dt + 1e-3);
    }

    #[test]
    fn test_primitive_dimension_ranges() {
        let mut low = ScriptedRandom::constant(0.0);
        let mut high = ScriptedRandom::constant(1.0);
        let wall_lo = primitive_size(ObstacleKind::Wall, &mut low);
        let wall_hi = primitive_size(ObstacleKind::Wall, &mut high);
        assert_eq!(wall_lo, Vec3::new(0.8, 2.6, 0.7));
        assert!(wall_hi.y <= 3.2 && wall_hi.x <= 1.2);
        let hurdle = primitive_size(ObstacleKind::Hurdle, &mut high);
        assert!(hurdle.y <= 1.3);
        let bar = primitive_size(ObstacleKind::Overhead, &mut low);
        assert_eq!(bar.y, OVERHEAD_THICKNESS);
        assert_eq!(bar.z, OVERHEAD_SPAN);
    }

    #[test]
    fn test_full_mode_uses_model_when_present() {
        let mut state = running_at(8.0);
        state.mode = VisualMode::Full;
        state.models.wall = Some(Vec3::new(1.0, 2.8, 1.0));
        let mut rng = ScriptedRandom::constant(0.5);
        materialize(&mut state, ObstacleKind::Wall, 0, 18.0, &mut rng);
        materialize(&mut state, ObstacleKind::Hurdle, 2, 18.0, &mut rng);
        assert_eq!(state.obstacles[0].visual, Visual::Model);
        assert_eq!(state.obstacles[0].pos.y, 1.4);
        // No hurdle model loaded: falls back to the primitive
        assert_eq!(state.obstacles[1].visual, Visual::Primitive);
        assert_eq!(state.obstacles[1].pos.z, 2.4);
    }

    #[test]
    fn test_model_overhead_keeps_clearance() {
        let mut state = running_at(8.0);
        state.mode = VisualMode::Full;
        state.models.overhead = Some(Vec3::new(2.0, 0.8, 7.0));
        let mut rng = ScriptedRandom::constant(0.5);
        materialize(&mut state, ObstacleKind::Overhead, 1, 18.0, &mut rng);
        let bottom = state.obstacles[0].aabb().min.y;
        assert!((bottom - (1.7 - OVERHEAD_THICKNESS / 2.0)).abs() < 1e-5);
    }

    #[test]
    fn test_easy_tier_biased_to_player_lane() {
        let mut state = running_at(8.0);
        state.player.lanes.move_left();
        // r, bias hit, coin roll fails
        let mut rng = ScriptedRandom::new(vec![0.5, 0.1, 0.9]);
        let pattern = enqueue_pattern(&mut state, &mut rng);
        assert_eq!(
            pattern,
            Pattern::Single {
                kind: ObstacleKind::Hurdle,
                lane: 0
            }
        );
        assert!(state.coins.is_empty());
    }

    #[test]
    fn test_easy_tier_coin_trail_avoids_player() {
        let mut state = running_at(8.0);
        // r, bias miss, random lane, coin roll hit, away-bias hit, direction, jitter, 4 phases
        let mut rng = ScriptedRandom::new(vec![
            0.5, 0.9, 0.0, 0.1, 0.1, 0.2, 0.0, 0.5, 0.5, 0.5, 0.5,
        ]);
        let pattern = enqueue_pattern(&mut state, &mut rng);
        assert_eq!(
            pattern,
            Pattern::Single {
                kind: ObstacleKind::Hurdle,
                lane: 0
            }
        );
        assert_eq!(state.coins.len(), 4);
        assert!(state.coins.iter().all(|c| c.lane == 0));
        assert_eq!(state.coins[0].pos.x, 24.0);
        assert!((state.coins[1].pos.x - 25.25).abs() < 1e-5);
    }

    #[test]
    fn test_medium_tier_wall_split() {
        let mut state = running_at(13.0);
        let mut rng = ScriptedRandom::new(vec![0.7, 0.1, 0.9]);
        let pattern = enqueue_pattern(&mut state, &mut rng);
        assert_eq!(
            pattern,
            Pattern::Single {
                kind: ObstacleKind::Wall,
                lane: 1
            }
        );
        let mut rng = ScriptedRandom::new(vec![0.3, 0.1, 0.9]);
        assert!(matches!(
            enqueue_pattern(&mut state, &mut rng),
            Pattern::Single {
                kind: ObstacleKind::Hurdle,
                ..
            }
        ));
    }

    #[test]
    fn test_hard_tier_overhead_with_center_coins() {
        let mut state = running_at(20.0);
        state.player.lanes.move_right();
        let mut rng = ScriptedRandom::new(vec![0.1, 0.1, 0.5]);
        assert_eq!(enqueue_pattern(&mut state, &mut rng), Pattern::Overhead);
        assert_eq!(state.pending[0].kind, ObstacleKind::Overhead);
        assert_eq!(state.coins.len(), 6);
        assert!(state.coins.iter().all(|c| c.lane == CENTER_LANE));
    }

    #[test]
    fn test_blockade_layout() {
        let mut state = running_at(20.0);
        let mut rng = ScriptedRandom::new(vec![0.9, 0.0, 0.5]);
        let pattern = enqueue_pattern(&mut state, &mut rng);
        assert_eq!(pattern, Pattern::Blockade { safe: 0 });
        let lanes: Vec<usize> = state.pending.iter().map(|e| e.lane).collect();
        assert_eq!(lanes, vec![1, 2]);
        assert!(state.pending.iter().all(|e| e.kind == ObstacleKind::Wall));
        // Second wall is staggered
        assert!((state.pending[1].countdown - state.pending[0].countdown - 0.18).abs() < 1e-5);
        assert_eq!(state.coins.len(), 6);
        assert!(state.coins.iter().all(|c| c.lane == 0));
        assert!((state.coins[5].pos.x - (24.0 + 5.0 * 1.15)).abs() < 1e-4);
    }

    #[test]
    fn test_pattern_queued_event() {
        let mut state = running_at(8.0);
        enqueue_pattern(&mut state, &mut ScriptedRandom::constant(0.5));
        assert!(matches!(
            state.drain_events()[0],
            GameEvent::PatternQueued { difficulty } if difficulty == 0.0
        ));
    }

    proptest! {
        #[test]
        fn prop_blockade_leaves_one_safe_lane(samples in proptest::collection::vec(0.0f32..1.0, 1..32)) {
            let mut state = running_at(22.0);
            let mut stream = vec![0.99];
            stream.extend(samples);
            let mut rng = ScriptedRandom::new(stream);
            let Pattern::Blockade { safe } = enqueue_pattern(&mut state, &mut rng) else {
                panic!("expected blockade");
            };

            prop_assert!(safe < LANE_COUNT);
            prop_assert_eq!(state.pending.len(), 2);
            let mut walled = [false; LANE_COUNT];
            for ev in &state.pending {
                prop_assert_eq!(ev.kind, ObstacleKind::Wall);
                walled[ev.lane] = true;
            }
            prop_assert!(!walled[safe]);
            prop_assert_eq!(walled.iter().filter(|w| **w).count(), 2);
            prop_assert!(state.coins.iter().all(|c| c.lane == safe));
        }

        #[test]
        fn prop_each_event_converts_exactly_once(
            seed in any::<u64>(),
            dts in proptest::collection::vec(0.001f32..0.05, 1..400),
        ) {
            let mut state = running_at(20.0);
            let mut rng = AmbientRandom::with_seed(seed);
            for _ in 0..4 {
                enqueue_pattern(&mut state, &mut rng);
            }
            let queued: Vec<u32> = state.pending.iter().map(|e| e.id).collect();
            state.drain_events();

            let mut converted = 0usize;
            for dt in dts {
                let before: Vec<(u32, f32)> = state.pending.iter().map(|e| (e.id, e.countdown)).collect();
                advance_pending(&mut state, &mut rng, dt);
                for ev in &state.pending {
                    let prev = before.iter().find(|(id, _)| *id == ev.id).map(|(_, c)| *c);
                    prop_assert!(prev.is_some_and(|c| ev.countdown < c));
                }
                converted += state
                    .drain_events()
                    .iter()
                    .filter(|e| matches!(e, GameEvent::ObstacleMaterialized { .. }))
                    .count();
            }
            prop_assert_eq!(converted + state.pending.len(), queued.len());
            prop_assert_eq!(state.obstacles.len(), converted);
        }
    }
}
