//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order
//! - No rendering or platform dependencies
//!
//! Time is split in two: gameplay pacing counts ticks, while power-up expiry
//! and the RapidFire auto-trigger run on wall-clock milliseconds injected by
//! the driver.

pub mod collision;
pub mod powerups;
pub mod state;
pub mod tick;
pub mod waves;

pub use collision::{Rect, overlaps, past_loss_line, shield_absorbs};
pub use powerups::{PowerUpKind, PowerUpLedger};
pub use state::{
    Bullet, Enemy, EnemyBullet, FireworkColor, GameEvent, GamePhase, GameState, Particle,
    ParticleStyle, Player, PowerUpItem,
};
pub use tick::{TickInput, tick};
pub use waves::{kill_score, spawn_wave};
