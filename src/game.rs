//! Game session lifecycle
//!
//! Glue between the pure simulation and the outside world: owns the state,
//! the wall clock, the fixed-step scheduler, and the persistence collaborators.
//! Store failures never reach the tick; persistence is fire-and-forget.

use crate::difficulty::Difficulty;
use crate::highscores::HighScores;
use crate::platform::{Clock, FixedStep};
use crate::sim::{GameEvent, GamePhase, GameState, TickInput, tick};
use crate::stats::{GameSummary, Statistics};

/// One play session plus its ambient collaborators
pub struct Game<C: Clock> {
    clock: C,
    state: GameState,
    scheduler: FixedStep,
    high_scores: HighScores,
    statistics: Statistics,
    /// Events drained from the state, buffered for the driver
    events: Vec<GameEvent>,
    /// A finished game is recorded into statistics exactly once
    recorded: bool,
}

impl<C: Clock> Game<C> {
    /// Start a session: load persisted collaborators and spawn wave 1.
    pub fn new(seed: u64, difficulty: Difficulty, clock: C) -> Self {
        let now = clock.now_ms();
        Self {
            clock,
            state: GameState::new(seed, difficulty, now),
            scheduler: FixedStep::new(),
            high_scores: HighScores::load(),
            statistics: Statistics::load(),
            events: Vec::new(),
            recorded: false,
        }
    }

    /// Advance the session by one host frame of `dt` seconds.
    ///
    /// Runs zero or more fixed ticks depending on the accumulator. Edge
    /// inputs (fire, pause) are applied on the first tick only; held
    /// movement applies to every tick of the frame.
    pub fn frame(&mut self, dt: f32, input: &TickInput) {
        let substeps = self.scheduler.advance(dt);
        for i in 0..substeps {
            let tick_input = if i == 0 {
                *input
            } else {
                TickInput {
                    move_left: input.move_left,
                    move_right: input.move_right,
                    fire: false,
                    pause: false,
                }
            };
            tick(&mut self.state, &tick_input, self.clock.now_ms());
        }
        self.events.append(&mut self.state.events);

        if self.state.phase == GamePhase::GameOver && !self.recorded {
            self.record_game_end();
        }
    }

    /// Events emitted since the last drain, in emission order.
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Whether the finished score would make the leaderboard.
    pub fn is_high_score(&self) -> bool {
        self.high_scores.is_high_score(self.state.score)
    }

    /// Submit the finished score under `name`. Returns the rank achieved.
    pub fn submit_high_score(&mut self, name: &str) -> Option<usize> {
        if self.state.phase != GamePhase::GameOver {
            return None;
        }
        let rank = self.high_scores.add_score(
            name,
            self.state.score,
            self.state.wave,
            self.clock.now_ms(),
        );
        if rank.is_some() {
            self.high_scores.save();
        }
        rank
    }

    /// Throw away the current run and start fresh.
    pub fn restart(&mut self, seed: u64, difficulty: Difficulty) {
        self.state = GameState::new(seed, difficulty, self.clock.now_ms());
        self.scheduler.reset();
        self.events.clear();
        self.recorded = false;
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn high_scores(&self) -> &HighScores {
        &self.high_scores
    }

    pub fn statistics(&self) -> &Statistics {
        &self.statistics
    }

    fn record_game_end(&mut self) {
        self.recorded = true;
        let elapsed_ms = self.clock.now_ms() - self.state.started_at_ms;
        let summary = GameSummary {
            score: self.state.score,
            wave: self.state.wave,
            powerups_collected: self.state.powerups_collected,
            playtime_seconds: (elapsed_ms / 1000.0).round().max(0.0) as u64,
            bullets_fired: self.state.bullets_fired,
            enemies_killed: self.state.enemies_killed,
            difficulty_name: self.state.difficulty.name.to_string(),
        };
        log::info!(
            "Recording game: {} points over {}s",
            summary.score,
            summary.playtime_seconds
        );
        self.statistics.record_game_end(summary);
        self.statistics.save();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::difficulty::NORMAL;
    use crate::platform::ManualClock;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Shared-handle clock so tests can move time while the game owns it
    #[derive(Clone)]
    struct SharedClock(Rc<Cell<f64>>);

    impl Clock for SharedClock {
        fn now_ms(&self) -> f64 {
            self.0.get()
        }
    }

    fn force_game_over(game: &mut Game<SharedClock>) {
        game.state.lives = 1;
        let center = game.state.player.rect().center();
        game.state.enemy_bullets.push(crate::sim::EnemyBullet::new(
            center.x,
            center.y - 4.0 - crate::consts::BULLET_HEIGHT / 2.0,
            4.0,
        ));
        game.frame(SIM_DT, &TickInput::default());
    }

    #[test]
    fn test_frame_runs_fixed_ticks() {
        let clock = SharedClock(Rc::new(Cell::new(0.0)));
        let mut game = Game::new(5, NORMAL, clock);

        game.frame(SIM_DT * 3.5, &TickInput::default());
        assert_eq!(game.state().game_ticks, 3);

        // A sub-tick frame banks time instead of ticking
        game.frame(SIM_DT * 0.25, &TickInput::default());
        assert_eq!(game.state().game_ticks, 3);
    }

    #[test]
    fn test_edge_input_applies_once_per_frame() {
        let clock = SharedClock(Rc::new(Cell::new(0.0)));
        let mut game = Game::new(5, NORMAL, clock);

        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        game.frame(SIM_DT * 4.5, &input);
        // One shot, not four
        assert_eq!(game.state().bullets_fired, 1);
    }

    #[test]
    fn test_drain_events_empties_buffer() {
        let clock = SharedClock(Rc::new(Cell::new(0.0)));
        let mut game = Game::new(5, NORMAL, clock);

        let input = TickInput {
            fire: true,
            ..Default::default()
        };
        game.frame(SIM_DT, &input);

        let events = game.drain_events();
        assert!(events.contains(&GameEvent::Shoot));
        assert!(game.drain_events().is_empty());
    }

    #[test]
    fn test_game_over_recorded_exactly_once() {
        let time = Rc::new(Cell::new(0.0));
        let mut game = Game::new(5, NORMAL, SharedClock(time.clone()));
        time.set(90_000.0);
        force_game_over(&mut game);

        assert_eq!(game.state().phase, GamePhase::GameOver);
        assert_eq!(game.statistics().games_played, 1);
        let last = game.statistics().last_game.as_ref().unwrap();
        assert_eq!(last.playtime_seconds, 90);
        assert_eq!(last.difficulty_name, "Normal");

        // Further frames after game over record nothing more
        game.frame(SIM_DT, &TickInput::default());
        game.frame(SIM_DT, &TickInput::default());
        assert_eq!(game.statistics().games_played, 1);
    }

    #[test]
    fn test_high_score_submission_requires_game_over() {
        let clock = SharedClock(Rc::new(Cell::new(0.0)));
        let mut game = Game::new(5, NORMAL, clock);

        game.state.score = 500;
        assert_eq!(game.submit_high_score("ACE"), None);

        force_game_over(&mut game);
        assert!(game.is_high_score());
        assert_eq!(game.submit_high_score("ACE"), Some(1));
        assert_eq!(game.high_scores().top_score(), Some(500));
    }

    #[test]
    fn test_restart_resets_run_but_keeps_stats() {
        let time = Rc::new(Cell::new(0.0));
        let mut game = Game::new(5, NORMAL, SharedClock(time.clone()));
        force_game_over(&mut game);
        assert_eq!(game.statistics().games_played, 1);

        game.restart(99, NORMAL);
        assert_eq!(game.state().phase, GamePhase::Playing);
        assert_eq!(game.state().game_ticks, 0);
        assert_eq!(game.state().lives, 3);
        assert_eq!(game.statistics().games_played, 1);

        // The new run can finish and be recorded again
        force_game_over(&mut game);
        assert_eq!(game.statistics().games_played, 2);
    }

    #[test]
    fn test_manual_clock_is_a_clock() {
        let clock = ManualClock::new(42.0);
        assert_eq!(clock.now_ms(), 42.0);
    }
}
