//! Game state and core simulation types
//!
//! Everything the tick mutates lives here. Entity lists are plain vectors;
//! removal during a pass is done by marking and compacting afterwards, never
//! by splicing mid-iteration.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::collision::Rect;
use super::powerups::{PowerUpKind, PowerUpLedger};
use crate::consts::*;
use crate::difficulty::Difficulty;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    /// Active gameplay
    Playing,
    /// Wave just cleared; transient, resolved within the same tick
    WaveComplete,
    /// Update suspended, render continues
    Paused,
    /// Run ended (terminal)
    GameOver,
}

/// Events emitted by the simulation for audio/UI collaborators.
///
/// Fire-and-forget: the sim pushes them during a tick and the driver drains
/// them afterwards. Nothing feeds back into the simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    Shoot,
    EnemyDeath,
    WaveComplete,
    GameOver,
    BonusLife,
    PowerUpCollected(PowerUpKind),
    TierUnlocked(u8),
    PlayerHit,
}

/// The player's ship
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
}

impl Player {
    pub fn new() -> Self {
        Self {
            pos: Vec2::new(GAME_WIDTH / 2.0 - PLAYER_WIDTH / 2.0, GAME_HEIGHT - 50.0),
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    /// Fire according to the current bullet pattern.
    ///
    /// The pattern is keyed on `(tier, multishot)`: an active MultiShot buff
    /// overrides the tier with a triple shot; tier 3 fires a wave-widened
    /// spread pair; tier 2 a tight pair; tier 1 a single centred bullet.
    /// Returns the number of bullets created, for statistics.
    pub fn shoot(&self, bullets: &mut Vec<Bullet>, wave: u32, tier: u8, multishot: bool) -> u32 {
        let center_gun_x = self.pos.x + PLAYER_WIDTH / 2.0 - BULLET_WIDTH / 2.0;
        let muzzle_y = self.pos.y - BULLET_HEIGHT;
        let spread_vel = 2.0;

        if multishot {
            // Triple shot from guns at 25% / 50% / 75% of the ship width
            let left_gun_x = self.pos.x + 0.25 * PLAYER_WIDTH - BULLET_WIDTH / 2.0;
            let right_gun_x = self.pos.x + 0.75 * PLAYER_WIDTH - BULLET_WIDTH / 2.0;
            bullets.push(Bullet::new(left_gun_x, muzzle_y, -spread_vel));
            bullets.push(Bullet::new(center_gun_x, muzzle_y, 0.0));
            bullets.push(Bullet::new(right_gun_x, muzzle_y, spread_vel));
            3
        } else if tier >= 3 {
            // Wide spread pair; guns move outward as waves progress
            let wave_spread = (0.25 - (wave.saturating_sub(2)) as f32 * 0.05).max(0.1);
            let left_gun_x = self.pos.x + wave_spread * PLAYER_WIDTH - BULLET_WIDTH / 2.0;
            let right_gun_x = self.pos.x + (1.0 - wave_spread) * PLAYER_WIDTH - BULLET_WIDTH / 2.0;
            bullets.push(Bullet::new(left_gun_x, muzzle_y, -spread_vel));
            bullets.push(Bullet::new(right_gun_x, muzzle_y, spread_vel));
            2
        } else if tier == 2 {
            // Tight pair around the centre gun
            let offset = 8.0;
            bullets.push(Bullet::new(center_gun_x - offset, muzzle_y, -spread_vel * 0.5));
            bullets.push(Bullet::new(center_gun_x + offset, muzzle_y, spread_vel * 0.5));
            2
        } else {
            bullets.push(Bullet::new(center_gun_x, muzzle_y, 0.0));
            1
        }
    }
}

impl Default for Player {
    fn default() -> Self {
        Self::new()
    }
}

/// An enemy invader
#[derive(Debug, Clone)]
pub struct Enemy {
    pub pos: Vec2,
    /// Horizontal speed, already scaled by wave and difficulty
    pub speed: f32,
    /// +1 moving right, -1 moving left
    pub direction: f32,
    /// Points awarded on kill, before the difficulty multiplier
    pub points: u32,
}

impl Enemy {
    pub fn new(x: f32, y: f32, wave: u32, difficulty: &Difficulty) -> Self {
        let base_speed = 1.0 + wave as f32 * 0.5;
        Self {
            pos: Vec2::new(x, y),
            speed: base_speed * difficulty.enemy_speed_multiplier,
            direction: 1.0,
            points: 10 + wave * 5,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, ENEMY_WIDTH, ENEMY_HEIGHT)
    }

    /// Advance one tick: march horizontally, then bounce and descend if a
    /// wall was crossed. Each enemy tests its own bounds independently; the
    /// formation is not synchronized.
    pub fn advance(&mut self) {
        self.pos.x += self.speed * self.direction;
        if self.pos.x <= 0.0 || self.pos.x + ENEMY_WIDTH >= GAME_WIDTH {
            self.direction = -self.direction;
            self.pos.y += ENEMY_DESCENT_STEP;
        }
    }
}

/// A player bullet travelling upward
#[derive(Debug, Clone)]
pub struct Bullet {
    pub pos: Vec2,
    /// Horizontal spread velocity, pixels per tick
    pub drift: f32,
}

impl Bullet {
    pub fn new(x: f32, y: f32, drift: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            drift,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BULLET_WIDTH, BULLET_HEIGHT)
    }

    pub fn advance(&mut self) {
        self.pos.y -= BULLET_SPEED;
        self.pos.x += self.drift;
    }

    pub fn off_top(&self) -> bool {
        self.pos.y < 0.0
    }
}

/// An enemy bullet travelling downward
#[derive(Debug, Clone)]
pub struct EnemyBullet {
    pub pos: Vec2,
    /// Fall speed, pixels per tick, already scaled by difficulty
    pub speed: f32,
}

impl EnemyBullet {
    pub fn new(x: f32, y: f32, speed: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            speed,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, BULLET_WIDTH, BULLET_HEIGHT)
    }

    pub fn center(&self) -> Vec2 {
        self.rect().center()
    }

    pub fn advance(&mut self) {
        self.pos.y += self.speed;
    }

    pub fn off_bottom(&self) -> bool {
        self.pos.y > GAME_HEIGHT
    }
}

/// A falling power-up item waiting to be collected
#[derive(Debug, Clone)]
pub struct PowerUpItem {
    pub pos: Vec2,
    pub kind: PowerUpKind,
    /// Horizontal drift, reflects off the side walls
    pub vx: f32,
}

impl PowerUpItem {
    pub fn new(x: f32, y: f32, kind: PowerUpKind, vx: f32) -> Self {
        Self {
            pos: Vec2::new(x, y),
            kind,
            vx,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, POWERUP_SIZE, POWERUP_SIZE)
    }

    pub fn advance(&mut self) {
        self.pos.y += POWERUP_FALL_SPEED;
        self.pos.x += self.vx;
        if self.pos.x < 0.0 || self.pos.x + POWERUP_SIZE > GAME_WIDTH {
            self.vx = -self.vx;
        }
    }

    pub fn off_bottom(&self) -> bool {
        self.pos.y > GAME_HEIGHT
    }
}

/// Firework colours for celebration bursts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FireworkColor {
    Gold,
    Silver,
    Cyan,
}

/// Cosmetic particle styles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleStyle {
    /// Simple explosion debris: gravity only
    Explosion,
    /// Firework streak: gravity plus horizontal air resistance
    Firework(FireworkColor),
}

/// A cosmetic particle; never affects gameplay
#[derive(Debug, Clone)]
pub struct Particle {
    pub pos: Vec2,
    pub vel: Vec2,
    pub life: u32,
    pub max_life: u32,
    pub style: ParticleStyle,
}

impl Particle {
    pub fn explosion(pos: Vec2, vel: Vec2) -> Self {
        Self {
            pos,
            vel,
            life: 30,
            max_life: 30,
            style: ParticleStyle::Explosion,
        }
    }

    pub fn firework(pos: Vec2, vel: Vec2, color: FireworkColor) -> Self {
        Self {
            pos,
            vel,
            life: 50,
            max_life: 50,
            style: ParticleStyle::Firework(color),
        }
    }

    pub fn advance(&mut self) {
        self.pos += self.vel;
        match self.style {
            ParticleStyle::Explosion => {
                self.vel.y += 0.2;
            }
            ParticleStyle::Firework(_) => {
                self.vel.y += 0.25;
                self.vel.x *= 0.98;
            }
        }
        self.life = self.life.saturating_sub(1);
    }
}

/// Complete simulation state for one game
#[derive(Debug, Clone)]
pub struct GameState {
    pub seed: u64,
    pub difficulty: Difficulty,
    pub phase: GamePhase,
    pub score: u64,
    pub lives: u32,
    /// Current wave number, 1-based
    pub wave: u32,
    /// Simulation tick counter; gameplay pacing runs on this
    pub game_ticks: u64,
    /// Bullet pattern tier (1..=3), monotonic non-decreasing within a game
    pub bullet_tier: u8,
    /// Highest bonus-life threshold already granted
    pub bonus_life_watermark: u64,

    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    pub enemy_bullets: Vec<EnemyBullet>,
    pub powerups: Vec<PowerUpItem>,
    pub particles: Vec<Particle>,
    pub ledger: PowerUpLedger,

    /// Power-up drops so far in the current wave
    pub drops_this_wave: u32,
    /// Per-game statistics
    pub powerups_collected: u32,
    pub bullets_fired: u64,
    pub enemies_killed: u64,

    /// Wall-clock ms when the game started (playtime statistics)
    pub started_at_ms: f64,
    /// Wall-clock ms of the last RapidFire auto-shot
    pub last_rapid_fire_ms: f64,

    /// Events emitted this tick, drained by the driver
    pub events: Vec<GameEvent>,

    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a fresh game at wave 1 with the first formation spawned.
    pub fn new(seed: u64, difficulty: Difficulty, now_ms: f64) -> Self {
        let mut state = Self {
            seed,
            difficulty,
            phase: GamePhase::Playing,
            score: 0,
            lives: 3,
            wave: 1,
            game_ticks: 0,
            bullet_tier: 1,
            bonus_life_watermark: 0,
            player: Player::new(),
            enemies: Vec::new(),
            bullets: Vec::new(),
            enemy_bullets: Vec::new(),
            powerups: Vec::new(),
            particles: Vec::new(),
            ledger: PowerUpLedger::new(),
            drops_this_wave: 0,
            powerups_collected: 0,
            bullets_fired: 0,
            enemies_killed: 0,
            started_at_ms: now_ms,
            last_rapid_fire_ms: now_ms,
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
        };
        state.enemies = super::waves::spawn_wave(state.wave, &state.difficulty);
        state.events.push(GameEvent::WaveComplete);
        state
    }

    /// Push a particle, evicting the oldest if the cap is reached.
    pub fn push_particle(&mut self, particle: Particle) {
        if self.particles.len() >= MAX_PARTICLES {
            self.particles.remove(0);
        }
        self.particles.push(particle);
    }

    /// Ring of explosion debris at a kill site
    pub fn spawn_explosion(&mut self, center: Vec2) {
        for i in 0..8 {
            let angle = (i as f32 / 8.0) * std::f32::consts::TAU;
            let vel = Vec2::new(angle.cos() * 3.0, angle.sin() * 3.0);
            self.push_particle(Particle::explosion(center, vel));
        }
    }

    /// Sparkle burst when a power-up is collected
    pub fn spawn_collect_burst(&mut self, center: Vec2) {
        for i in 0..16 {
            let angle = (i as f32 / 16.0) * std::f32::consts::TAU;
            let vel = Vec2::new(angle.cos() * 4.0, angle.sin() * 4.0);
            self.push_particle(Particle::firework(center, vel, FireworkColor::Cyan));
        }
    }

    /// Gold burst at screen centre for a bullet-tier unlock
    pub fn spawn_upgrade_burst(&mut self) {
        let center = Vec2::new(GAME_WIDTH / 2.0, GAME_HEIGHT / 2.0);
        for i in 0..32 {
            let angle = (i as f32 / 32.0) * std::f32::consts::TAU;
            let vel = Vec2::new(angle.cos() * 5.0, angle.sin() * 5.0);
            self.push_particle(Particle::firework(center, vel, FireworkColor::Gold));
        }
    }

    /// Triple firework display for a bonus life
    pub fn spawn_life_reward_burst(&mut self) {
        let center = Vec2::new(GAME_WIDTH / 2.0, GAME_HEIGHT / 2.0);
        for i in 0..24 {
            let angle = (i as f32 / 24.0) * std::f32::consts::TAU;
            let vel = Vec2::new(angle.cos() * 5.0, angle.sin() * 5.0);
            self.push_particle(Particle::firework(center, vel, FireworkColor::Gold));
        }
        for (burst_x, drift, color) in [
            (center.x - 150.0, 1.0, FireworkColor::Silver),
            (center.x + 150.0, -1.0, FireworkColor::Cyan),
        ] {
            let origin = Vec2::new(burst_x, center.y - 100.0);
            for i in 0..20 {
                let angle = (i as f32 / 20.0) * std::f32::consts::TAU;
                let vel = Vec2::new(angle.cos() * 4.5 + drift, angle.sin() * 4.5);
                self.push_particle(Particle::firework(origin, vel, color));
            }
        }
    }
}
