//! Neon Invaders - a retro single-screen arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, waves, game state)
//! - `game`: Session wrapper wiring the sim to stores and the scheduler
//! - `platform`: Clock and fixed-step scheduling abstraction
//! - `highscores` / `stats`: persisted leaderboard and lifetime statistics
//! - `difficulty`: data-driven difficulty presets

pub mod difficulty;
pub mod game;
pub mod highscores;
pub mod platform;
pub mod sim;
pub mod stats;

pub use difficulty::Difficulty;
pub use game::Game;
pub use highscores::HighScores;
pub use stats::Statistics;

/// Game configuration constants
pub mod consts {
    /// Nominal simulation rate (one tick per rendered frame in the original)
    pub const TICKS_PER_SECOND: u32 = 60;
    /// Fixed simulation timestep in seconds
    pub const SIM_DT: f32 = 1.0 / TICKS_PER_SECOND as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Playfield dimensions
    pub const GAME_WIDTH: f32 = 800.0;
    pub const GAME_HEIGHT: f32 = 600.0;

    /// Player ship
    pub const PLAYER_WIDTH: f32 = 40.0;
    pub const PLAYER_HEIGHT: f32 = 30.0;
    /// Horizontal player speed, pixels per tick
    pub const PLAYER_SPEED: f32 = 5.0;

    /// Enemies
    pub const ENEMY_WIDTH: f32 = 35.0;
    pub const ENEMY_HEIGHT: f32 = 25.0;
    /// Vertical step when an enemy bounces off a side wall
    pub const ENEMY_DESCENT_STEP: f32 = 20.0;
    /// Enemies reaching this close to the bottom end the game
    pub const ENEMY_LOSS_MARGIN: f32 = 50.0;

    /// Bullets
    pub const BULLET_WIDTH: f32 = 5.0;
    pub const BULLET_HEIGHT: f32 = 15.0;
    /// Player bullet vertical speed, pixels per tick (upward)
    pub const BULLET_SPEED: f32 = 7.0;
    /// Enemy bullet base vertical speed, pixels per tick (downward)
    pub const ENEMY_BULLET_SPEED: f32 = 4.0;

    /// Power-up items
    pub const POWERUP_SIZE: f32 = 30.0;
    /// Falling speed of a dropped power-up, pixels per tick
    pub const POWERUP_FALL_SPEED: f32 = 1.5;
    /// Chance that an enemy kill drops a power-up
    pub const POWERUP_DROP_CHANCE: f64 = 0.2;
    /// Cap on power-up drops within a single wave
    pub const MAX_DROPS_PER_WAVE: u32 = 4;
    /// Cap on power-up items simultaneously on screen
    pub const MAX_POWERUPS_ON_SCREEN: usize = 4;

    /// Shield bubble radius around the player centre
    pub const SHIELD_RADIUS: f32 = (PLAYER_WIDTH + 20.0) / 2.0;
    /// Extra shield duration granted per pickup beyond the first, ms
    pub const SHIELD_STACK_BONUS_MS: f64 = 2000.0;
    /// Auto-fire interval while RapidFire is active, wall-clock ms
    pub const RAPID_FIRE_INTERVAL_MS: f64 = 100.0;

    /// Maximum particles kept alive at once (oldest evicted)
    pub const MAX_PARTICLES: usize = 256;
}
