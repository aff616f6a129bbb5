//! Neon Invaders entry point
//!
//! Native builds run a headless autoplay demo: a scripted pilot plays one
//! game and the final score and lifetime statistics are printed. The web
//! build initialises logging and panic reporting; DOM and canvas wiring live
//! with the host page, outside this crate.

#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use std::cell::Cell;
    use std::rc::Rc;

    use neon_invaders::consts::*;
    use neon_invaders::difficulty::{Difficulty, NORMAL};
    use neon_invaders::game::Game;
    use neon_invaders::platform::Clock;
    use neon_invaders::sim::{GameEvent, GamePhase, TickInput};

    /// Clock the demo advances in lockstep with the simulation
    #[derive(Clone)]
    struct ScriptedClock(Rc<Cell<f64>>);

    impl Clock for ScriptedClock {
        fn now_ms(&self) -> f64 {
            self.0.get()
        }
    }

    /// Steer toward the most threatening enemy and fire on a short cadence.
    fn pilot(game: &Game<ScriptedClock>, frame: u64) -> TickInput {
        let state = game.state();
        let player_center = state.player.pos.x + PLAYER_WIDTH / 2.0;

        // Chase whichever enemy has descended furthest
        let target = state
            .enemies
            .iter()
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))
            .map(|e| e.pos.x + ENEMY_WIDTH / 2.0)
            .unwrap_or(GAME_WIDTH / 2.0);

        TickInput {
            move_left: target < player_center - PLAYER_SPEED,
            move_right: target > player_center + PLAYER_SPEED,
            fire: frame.is_multiple_of(10),
            pause: false,
        }
    }

    pub fn run() {
        env_logger::init();

        let mut args = std::env::args().skip(1);
        let difficulty = args
            .next()
            .map(|name| {
                Difficulty::from_name(&name).unwrap_or_else(|| {
                    log::warn!("Unknown difficulty '{name}', using Normal");
                    NORMAL
                })
            })
            .unwrap_or(NORMAL);
        let seed = args
            .next()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| {
                use std::time::{SystemTime, UNIX_EPOCH};
                SystemTime::now()
                    .duration_since(UNIX_EPOCH)
                    .map(|d| d.as_millis() as u64)
                    .unwrap_or(1)
            });

        log::info!(
            "Autoplay demo: {} difficulty, seed {seed}",
            difficulty.name
        );

        let time = Rc::new(Cell::new(0.0));
        let mut game = Game::new(seed, difficulty, ScriptedClock(time.clone()));

        // Cap the demo at five simulated minutes
        let max_frames = 5 * 60 * TICKS_PER_SECOND as u64;
        for frame in 0..max_frames {
            let input = pilot(&game, frame);
            game.frame(SIM_DT, &input);
            time.set(time.get() + 1000.0 / TICKS_PER_SECOND as f64);

            for event in game.drain_events() {
                match event {
                    GameEvent::WaveComplete => {
                        log::debug!("Wave {} underway", game.state().wave)
                    }
                    GameEvent::BonusLife => log::debug!("Bonus life earned"),
                    GameEvent::TierUnlocked(tier) => {
                        log::debug!("Bullet tier {tier} unlocked")
                    }
                    _ => {}
                }
            }

            if game.state().phase == GamePhase::GameOver {
                break;
            }
        }

        let state = game.state();
        println!("=== Game over ===");
        println!("Difficulty:     {}", state.difficulty.name);
        println!("Score:          {}", state.score);
        println!("Wave reached:   {}", state.wave);
        println!("Enemies killed: {}", state.enemies_killed);
        println!("Bullets fired:  {}", state.bullets_fired);
        println!(
            "Accuracy:       {}%",
            game.statistics().accuracy_percent()
        );

        if game.is_high_score() {
            if let Some(rank) = game.submit_high_score("DEMO") {
                println!("High score! Rank #{rank}");
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    autoplay::run();
}

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("Neon Invaders simulation core loaded");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
