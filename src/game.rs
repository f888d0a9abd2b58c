//! Game facade
//!
//! `BadgerRun` owns the simulation, the economy and the asset cache and
//! exposes the small action and query API hosts talk to. Everything runs on
//! one thread: the host calls actions between frames and `update` once per
//! fixed step (or `frame` with a raw delta).

use crate::assets::{AssetCache, AssetLoader};
use crate::economy::Economy;
use crate::input::{Action, DUCK_PULSE};
use crate::persistence::ProgressStore;
use crate::sim::{AmbientRandom, GameEvent, GameState, Phase, RandomSource, VisualMode, tick};
use crate::snapshot::{MetaState, RenderSnapshot, UiState};
use crate::stepper::FixedStepper;
use crate::tuning::Tuning;

/// The whole game
pub struct BadgerRun {
    state: GameState,
    economy: Economy,
    rng: Box<dyn RandomSource>,
    assets: AssetCache,
    stepper: FixedStepper,
    /// Seconds left on a swipe-triggered duck
    duck_pulse: Option<f32>,
}

impl BadgerRun {
    /// Build a game, reading the economy record once from `store`
    pub fn new(
        tuning: Tuning,
        store: Box<dyn ProgressStore>,
        mut rng: Box<dyn RandomSource>,
    ) -> Self {
        let state = GameState::new(tuning, rng.as_mut());
        let economy = Economy::load(store);
        Self {
            state,
            economy,
            rng,
            assets: AssetCache::new(),
            stepper: FixedStepper::new(),
            duck_pulse: None,
        }
    }

    /// Default tuning with OS-seeded randomness
    pub fn with_store(store: Box<dyn ProgressStore>) -> Self {
        Self::new(Tuning::default(), store, Box::new(AmbientRandom::new()))
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access to the simulation records (tools and tests)
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn economy(&self) -> &Economy {
        &self.economy
    }

    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    // --- Actions ---

    /// Start in `Ready`, reset in `GameOver`, jump while running
    pub fn primary_action(&mut self) {
        match self.state.phase {
            Phase::Ready => {
                self.state.start_run();
                log::info!("Run started");
            }
            Phase::GameOver => self.reset(),
            Phase::Running => {
                self.jump();
            }
        }
    }

    /// Jump if running and grounded. Returns whether the jump happened.
    pub fn jump(&mut self) -> bool {
        if self.state.phase != Phase::Running {
            return false;
        }
        let velocity = self.state.tuning.jump_velocity;
        self.state.player.body.try_jump(velocity)
    }

    /// Duck on or off; ignored unless running
    pub fn set_duck(&mut self, on: bool) {
        if self.state.phase != Phase::Running {
            return;
        }
        self.duck_pulse = None;
        self.state.player.ducking = on;
    }

    /// Duck for a short fixed time
    pub fn duck_pulse(&mut self) {
        if self.state.phase != Phase::Running {
            return;
        }
        self.state.player.ducking = true;
        self.duck_pulse = Some(DUCK_PULSE);
    }

    pub fn move_left(&mut self) {
        self.state.player.lanes.move_left();
    }

    pub fn move_right(&mut self) {
        self.state.player.lanes.move_right();
    }

    /// Back to `Ready` with a clean track. The economy is untouched.
    pub fn reset(&mut self) {
        self.state.reset();
        self.duck_pulse = None;
        self.stepper.clear();
    }

    /// Switch visual fidelity.
    ///
    /// The first switch to full mode attempts every full asset through
    /// `loader`; later switches reuse the cache. Missing assets leave the
    /// primitives in place.
    pub fn set_mode(&mut self, mode: VisualMode, loader: &mut dyn AssetLoader) {
        if mode == VisualMode::Full {
            self.assets.ensure_full_set(loader);
        }
        self.state.mode = mode;
        self.state.models = self.assets.model_set();
        self.state.ground_textured = self.assets.has_texture("ground");
        log::info!("Visual mode: {}", mode.as_str());
    }

    pub fn buy_skin(&mut self, id: &str) -> bool {
        self.economy.buy_skin(id)
    }

    pub fn equip_skin(&mut self, id: &str) -> bool {
        self.economy.equip_skin(id)
    }

    /// Dispatch a mapped input action
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Primary => self.primary_action(),
            Action::Jump => {
                self.jump();
            }
            Action::DuckStart => self.set_duck(true),
            Action::DuckEnd => self.set_duck(false),
            Action::DuckPulse => self.duck_pulse(),
            Action::Left => self.move_left(),
            Action::Right => self.move_right(),
            Action::Reset => self.reset(),
        }
    }

    // --- Stepping ---

    /// Advance the simulation by exactly `dt` and settle its events
    pub fn update(&mut self, dt: f32) {
        if let Some(remaining) = self.duck_pulse.as_mut() {
            *remaining -= dt;
            if *remaining <= 0.0 {
                self.duck_pulse = None;
                self.state.player.ducking = false;
            }
        }

        tick(&mut self.state, self.rng.as_mut(), dt);

        for event in self.state.drain_events() {
            match event {
                GameEvent::CoinCollected { .. } => {
                    self.economy.credit(1);
                }
                GameEvent::Collision { .. } => {
                    self.duck_pulse = None;
                }
                GameEvent::ObstacleMaterialized { .. } | GameEvent::PatternQueued { .. } => {}
            }
        }
    }

    /// Feed a real frame delta through the fixed stepper. Returns steps run.
    pub fn frame(&mut self, frame_dt: f32) -> u32 {
        let steps = self.stepper.advance(frame_dt);
        for _ in 0..steps {
            self.update(crate::consts::SIM_DT);
        }
        steps
    }

    // --- Queries ---

    pub fn ui_state(&self) -> UiState {
        UiState::capture(&self.state, self.economy.bank_coins())
    }

    pub fn meta_state(&self) -> MetaState {
        MetaState::capture(&self.economy)
    }

    pub fn render_snapshot(&self) -> RenderSnapshot {
        let badger_textured = self.assets.has_texture("badger");
        RenderSnapshot::capture(&self.state, self.economy.active_skin(), badger_textured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{NullLoader, PreloadedAssets};
    use crate::persistence::MemoryStore;
    use crate::sim::{Coin, Obstacle, ObstacleKind, ScriptedRandom, Visual};
    use glam::Vec3;

    fn game_with(store: MemoryStore) -> BadgerRun {
        BadgerRun::new(
            Tuning::default(),
            Box::new(store),
            Box::new(ScriptedRandom::constant(0.5)),
        )
    }

    fn game() -> BadgerRun {
        game_with(MemoryStore::new())
    }

    fn place_obstacle(game: &mut BadgerRun, x: f32) {
        let id = game.state_mut().next_entity_id();
        game.state_mut().obstacles.push(Obstacle {
            id,
            kind: ObstacleKind::Wall,
            lane: 1,
            pos: Vec3::new(x, 1.3, 0.0),
            size: Vec3::new(0.8, 2.6, 1.2),
            visual: Visual::Primitive,
        });
    }

    fn place_coin(game: &mut BadgerRun, x: f32) {
        let id = game.state_mut().next_entity_id();
        game.state_mut().coins.push(Coin {
            id,
            lane: 1,
            pos: Vec3::new(x, 1.05, 0.0),
            base_y: 1.05,
            phase: 0.0,
            spin: 0.0,
            visual: Visual::Primitive,
        });
    }

    #[test]
    fn test_primary_action_cycle() {
        let mut game = game();
        assert_eq!(game.phase(), Phase::Ready);
        game.primary_action();
        assert_eq!(game.phase(), Phase::Running);

        game.primary_action();
        assert!(game.state().player.body.vel > 0.0, "primary jumps while running");

        game.state_mut().phase = Phase::GameOver;
        game.primary_action();
        assert_eq!(game.phase(), Phase::Ready);
    }

    #[test]
    fn test_collision_then_primary_resets() {
        let mut game = game();
        game.primary_action();
        for _ in 0..30 {
            game.update(crate::consts::SIM_DT);
        }
        place_obstacle(&mut game, 0.0);
        game.update(crate::consts::SIM_DT);
        assert_eq!(game.phase(), Phase::GameOver);
        assert!(game.ui_state().is_game_over);

        game.primary_action();
        assert_eq!(game.phase(), Phase::Ready);
        assert_eq!(game.state().scroll.distance, 0.0);
        assert_eq!(game.state().scroll.speed, 8.0);
        assert!(game.state().obstacles.is_empty());
    }

    #[test]
    fn test_no_double_jump() {
        let mut game = game();
        game.primary_action();
        assert!(game.jump());
        game.update(crate::consts::SIM_DT);
        assert!(!game.jump());
    }

    #[test]
    fn test_jump_ignored_when_not_running() {
        let mut game = game();
        assert!(!game.jump());
        assert_eq!(game.state().player.body.vel, 0.0);
    }

    #[test]
    fn test_duck_only_while_running() {
        let mut game = game();
        game.set_duck(true);
        assert!(!game.state().player.ducking);
        game.primary_action();
        game.set_duck(true);
        assert!(game.state().player.ducking);
        game.set_duck(false);
        assert!(!game.state().player.ducking);
    }

    #[test]
    fn test_duck_pulse_expires() {
        let mut game = game();
        game.primary_action();
        game.apply(Action::DuckPulse);
        assert!(game.state().player.ducking);
        for _ in 0..14 {
            game.update(crate::consts::SIM_DT);
        }
        assert!(game.state().player.ducking);
        for _ in 0..2 {
            game.update(crate::consts::SIM_DT);
        }
        assert!(!game.state().player.ducking);
    }

    #[test]
    fn test_lane_moves_clamp() {
        let mut game = game();
        for _ in 0..5 {
            game.move_left();
        }
        assert_eq!(game.ui_state().lane_label, "L");
        for _ in 0..5 {
            game.apply(Action::Right);
        }
        assert_eq!(game.ui_state().lane_label, "R");
    }

    #[test]
    fn test_coin_credits_wallet_and_saves() {
        let store = MemoryStore::new();
        let mut game = game_with(store.clone());
        game.primary_action();
        place_coin(&mut game, 0.5);
        game.update(crate::consts::SIM_DT);

        let ui = game.ui_state();
        assert_eq!(ui.run_coins, 1);
        assert_eq!(ui.bank_coins, 1);
        assert_eq!(ui.total_score, ui.score + 25);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_reset_keeps_wallet() {
        let mut game = game_with(MemoryStore::with_data(r#"{"bankCoins":40}"#));
        game.primary_action();
        place_coin(&mut game, 0.5);
        game.update(crate::consts::SIM_DT);
        game.reset();
        assert_eq!(game.ui_state().run_coins, 0);
        assert_eq!(game.ui_state().bank_coins, 41);
    }

    #[test]
    fn test_shop_through_facade() {
        let mut game = game_with(MemoryStore::with_data(r#"{"bankCoins":300}"#));
        assert!(game.buy_skin("midnight"));
        assert!(game.equip_skin("midnight"));
        let meta = game.meta_state();
        assert_eq!(meta.bank_coins, 50);
        assert_eq!(meta.active_skin_id, "midnight");
        assert_eq!(game.render_snapshot().player.color, 0x20252f);
    }

    #[test]
    fn test_set_mode_without_assets() {
        let mut game = game();
        game.set_mode(VisualMode::Full, &mut NullLoader);
        assert_eq!(game.ui_state().mode, VisualMode::Full);
        assert!(game.state().models.wall.is_none());
        assert!(game.render_snapshot().ground_offset.is_none());
    }

    #[test]
    fn test_set_mode_loads_once() {
        let mut game = game();
        let mut loader = PreloadedAssets::everything(Vec3::new(1.0, 2.0, 1.0));
        game.set_mode(VisualMode::Full, &mut loader);
        game.set_mode(VisualMode::Prototype, &mut loader);
        game.set_mode(VisualMode::Full, &mut loader);
        assert_eq!(loader.requests(), 6);
        assert!(game.state().models.coin);
        assert!(game.render_snapshot().player.textured);
        assert!(game.render_snapshot().ground_offset.is_some());
    }

    #[test]
    fn test_frame_runs_fixed_steps() {
        let mut game = game();
        game.primary_action();
        let steps = game.frame(0.11);
        assert_eq!(steps, 6);
        assert!((game.state().time - 6.0 * crate::consts::SIM_DT).abs() < 1e-5);
    }

    #[test]
    fn test_idle_world_keeps_moving() {
        let mut game = game();
        let before = game.render_snapshot().dashes[0].x;
        game.update(0.1);
        assert_eq!(game.phase(), Phase::Ready);
        assert_eq!(game.ui_state().speed, 0.0);
        assert!(game.render_snapshot().dashes[0].x < before);
    }
}
