//! Fixed timestep simulation tick
//!
//! Core game loop that advances the simulation by exactly one step.

use super::collision::{collect_coins, first_hit, player_hitbox, torso_point};
use super::rng::RandomSource;
use super::spawner::{advance_pending, enqueue_pattern};
use super::state::{GameEvent, GameState, Phase};

/// Ground texture scroll per unit of world travel
const GROUND_SCROLL_RATE: f32 = 0.055;
/// Coin spin (rad/s)
const COIN_SPIN_RATE: f32 = 6.5;
/// Coin bob rate (rad/s) and amplitude
const COIN_BOB_RATE: f32 = 6.0;
const COIN_BOB_AMPLITUDE: f32 = 0.08;
/// Grounded body bob amplitude
const BODY_BOB_AMPLITUDE: f32 = 0.05;
/// Leg swing amplitude (radians)
const LEG_SWING_AMPLITUDE: f32 = 0.9;

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, rng: &mut dyn RandomSource, dt: f32) {
    state.time += dt;

    let running = state.phase == Phase::Running;
    // Even idle keeps the world drifting a little
    let world_speed = if running {
        state.scroll.speed
    } else {
        state.tuning.idle_world_speed
    };

    let time = state.time;
    state.scenery.update(dt, world_speed, time, rng);
    state.ground_offset += world_speed * dt * GROUND_SCROLL_RATE;

    if running {
        let tuning = &state.tuning;
        let (ramp, max_speed, gravity) = (tuning.speed_ramp, tuning.max_speed, tuning.gravity);
        state.scroll.advance(ramp, max_speed, dt);
        state.player.body.integrate(gravity, dt);

        advance_pending(state, rng, dt);

        state.spawn_timer -= dt;
        if state.spawn_timer <= 0.0 {
            enqueue_pattern(state, rng);
            let base = state.tuning.spawn_interval(state.scroll.speed);
            let (lo, hi) = state.tuning.spawn_jitter;
            state.spawn_timer = rng.range(base * lo, base * hi);
        }

        advance_obstacles(state, dt);
        advance_coins(state, dt);
    } else {
        state.player.body.settle();
    }

    animate_player(state, dt, running);

    if running {
        resolve_contacts(state);
    }
}

/// Scroll obstacles and drop the ones behind the cutoff
fn advance_obstacles(state: &mut GameState, dt: f32) {
    let speed = state.scroll.speed;
    let cull_x = state.tuning.cull_x;
    for obstacle in &mut state.obstacles {
        obstacle.pos.x -= speed * dt;
    }
    state.obstacles.retain(|o| o.pos.x >= cull_x);
}

/// Scroll, spin and bob coins; drop the ones behind the cutoff
fn advance_coins(state: &mut GameState, dt: f32) {
    let speed = state.scroll.speed;
    let cull_x = state.tuning.cull_x;
    let time = state.time;
    for coin in &mut state.coins {
        coin.pos.x -= speed * dt;
        coin.spin += dt * COIN_SPIN_RATE;
        coin.pos.y = coin.base_y + (time * COIN_BOB_RATE + coin.phase).sin() * COIN_BOB_AMPLITUDE;
    }
    state.coins.retain(|c| c.pos.x >= cull_x);
}

/// Lane slide, body bob and leg swing
fn animate_player(state: &mut GameState, dt: f32, running: bool) {
    let damping = state.tuning.lane_damping;
    let t = state.time;
    let player = &mut state.player;
    player.lanes.update(damping, dt);

    if player.body.is_grounded() {
        let bob_rate = if running { 14.0 } else { 8.0 };
        let swing_rate = if running { 18.0 } else { 10.0 };
        player.bob = (t * bob_rate).sin() * BODY_BOB_AMPLITUDE;
        player.leg_swing = (t * swing_rate).sin() * LEG_SWING_AMPLITUDE;
    } else {
        player.bob = 0.0;
        player.leg_swing = 0.0;
    }
}

/// Coin pickups, then obstacle hits (first hit ends the run)
fn resolve_contacts(state: &mut GameState) {
    let torso = torso_point(&state.player);
    let radius = state.tuning.coin_collect_radius;
    for coin_id in collect_coins(torso, radius, &mut state.coins) {
        state.run_coins += 1;
        state.events.push(GameEvent::CoinCollected { coin_id });
    }

    let hitbox = player_hitbox(&state.player, &state.tuning);
    if let Some(obstacle_id) = first_hit(&hitbox, &state.obstacles) {
        state.phase = Phase::GameOver;
        state.player.ducking = false;
        state.events.push(GameEvent::Collision { obstacle_id });
        log::info!(
            "Run over: score {} (+{} coins) at speed {:.1}",
            state.score(),
            state.run_coins,
            state.scroll.speed
        );
    }
}
