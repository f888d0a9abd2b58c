//! Badger Run entry point
//!
//! The browser build is driven from JavaScript through `badger_run::web`.
//! Natively this runs a headless autopilot session against the real
//! simulation and economy, saving progress to a JSON file.

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::env;
    use std::fs;

    use badger_run::assets::NullLoader;
    use badger_run::consts::SIM_DT;
    use badger_run::persistence::FileStore;
    use badger_run::sim::{AmbientRandom, GameState, ObstacleKind, Phase, VisualMode};
    use badger_run::{BadgerRun, Tuning};

    const DEFAULT_SAVE_PATH: &str = "badger_run_progress.json";
    /// Simulated seconds before the session stops on its own
    const MAX_SESSION_SECS: f32 = 120.0;
    /// How far ahead (world units) the autopilot reacts
    const LOOKAHEAD: f32 = 6.0;

    fn load_tuning() -> Tuning {
        let Ok(path) = env::var("BADGER_RUN_TUNING") else {
            return Tuning::default();
        };
        match fs::read_to_string(&path) {
            Ok(json) => match Tuning::from_json(&json) {
                Ok(tuning) => {
                    log::info!("Loaded tuning from {}", path);
                    tuning
                }
                Err(e) => {
                    log::warn!("Invalid tuning file {}: {}", path, e);
                    Tuning::default()
                }
            },
            Err(e) => {
                log::warn!("Failed to read tuning file {}: {}", path, e);
                Tuning::default()
            }
        }
    }

    /// Lanes holding a solid obstacle within reach
    fn blocked_lanes(state: &GameState) -> [bool; 3] {
        let mut blocked = [false; 3];
        for obstacle in &state.obstacles {
            let near = obstacle.pos.x > -1.0 && obstacle.pos.x < LOOKAHEAD;
            if near && obstacle.kind == ObstacleKind::Wall {
                blocked[obstacle.lane.min(2)] = true;
            }
        }
        blocked
    }

    /// Pick actions for the next step from what is directly ahead
    fn autopilot(game: &mut BadgerRun) {
        let state = game.state();
        let lane = state.player_lane();
        let ahead = |kind: ObstacleKind| {
            state.obstacles.iter().any(|o| {
                o.kind == kind
                    && (kind == ObstacleKind::Overhead || o.lane == lane)
                    && o.pos.x > 0.0
                    && o.pos.x < LOOKAHEAD * 0.5
            })
        };
        let overhead = ahead(ObstacleKind::Overhead);
        let hurdle = ahead(ObstacleKind::Hurdle);
        let blocked = blocked_lanes(state);

        if blocked[lane] {
            if let Some(free) = (0..3)
                .filter(|&l| !blocked[l])
                .min_by_key(|&l| l.abs_diff(lane))
            {
                if free < lane {
                    game.move_left();
                } else {
                    game.move_right();
                }
            }
        }
        game.set_duck(overhead);
        if hurdle && !overhead {
            game.jump();
        }
    }

    pub fn run() {
        env_logger::init();
        log::info!("Badger Run (native) starting...");

        let save_path = env::var("BADGER_RUN_SAVE").unwrap_or_else(|_| DEFAULT_SAVE_PATH.into());
        let mut game = BadgerRun::new(
            load_tuning(),
            Box::new(FileStore::new(&save_path)),
            Box::new(AmbientRandom::new()),
        );
        game.set_mode(VisualMode::Prototype, &mut NullLoader);

        let bank_before = game.economy().bank_coins();
        game.primary_action();

        let mut elapsed = 0.0;
        while game.phase() == Phase::Running && elapsed < MAX_SESSION_SECS {
            autopilot(&mut game);
            game.update(SIM_DT);
            elapsed += SIM_DT;
        }

        let ui = game.ui_state();
        println!("Badger Run headless session");
        println!("  outcome:     {}", ui.phase.as_str());
        println!("  time:        {:.1}s", elapsed);
        println!("  distance:    {}", ui.score);
        println!("  coins:       {}", ui.run_coins);
        println!("  total score: {}", ui.total_score);
        println!("  bank:        {} -> {}", bank_before, ui.bank_coins);
        println!("  saved to:    {}", save_path);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is badger_run::web::start, this is just to satisfy the compiler
}
