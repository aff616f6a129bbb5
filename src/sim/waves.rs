//! Wave spawning and difficulty progression
//!
//! Waves are deterministic 3x6 grids; only enemy speed and point value depend
//! on the wave number and difficulty. Enemy fire is the one random element,
//! paced in ticks and drawn from the state-owned RNG.

use rand::Rng;

use super::powerups::PowerUpKind;
use super::state::{Enemy, EnemyBullet, GameEvent, GameState};
use crate::consts::*;
use crate::difficulty::Difficulty;

/// Formation layout: 3 rows by 6 columns, fixed spacing
const FORMATION_ROWS: u32 = 3;
const FORMATION_COLS: u32 = 6;
const FORMATION_SPACING: f32 = 90.0;
const FORMATION_ORIGIN_X: f32 = 50.0;
const FORMATION_ORIGIN_Y: f32 = 30.0;

/// Bullet tier unlocked when a given wave begins
const DUAL_SHOT_WAVE: u32 = 2;
const SPREAD_SHOT_WAVE: u32 = 5;

/// Spawn the enemy formation for a wave.
///
/// Deterministic: position depends only on grid slot; speed and points depend
/// only on the wave number and difficulty.
pub fn spawn_wave(wave: u32, difficulty: &Difficulty) -> Vec<Enemy> {
    let mut enemies = Vec::with_capacity((FORMATION_ROWS * FORMATION_COLS) as usize);
    for row in 0..FORMATION_ROWS {
        for col in 0..FORMATION_COLS {
            let x = FORMATION_ORIGIN_X + col as f32 * FORMATION_SPACING;
            let y = FORMATION_ORIGIN_Y + row as f32 * FORMATION_SPACING;
            enemies.push(Enemy::new(x, y, wave, difficulty));
        }
    }
    enemies
}

/// Advance to the next wave after a clear.
///
/// Increments the wave counter, resets the per-wave drop budget, applies
/// bullet-tier unlocks (each at most once per game, with a celebration burst),
/// and spawns the next formation. The caller handles the phase transition.
pub fn advance_wave(state: &mut GameState) {
    state.wave += 1;
    state.drops_this_wave = 0;

    if state.wave == DUAL_SHOT_WAVE && state.bullet_tier < 2 {
        state.bullet_tier = 2;
        state.spawn_upgrade_burst();
        state.events.push(GameEvent::TierUnlocked(2));
    } else if state.wave == SPREAD_SHOT_WAVE && state.bullet_tier < 3 {
        state.bullet_tier = 3;
        state.spawn_upgrade_burst();
        state.events.push(GameEvent::TierUnlocked(3));
    }

    log::info!("Wave {} begins ({} difficulty)", state.wave, state.difficulty.name);
    state.events.push(GameEvent::WaveComplete);
    state.enemies = spawn_wave(state.wave, &state.difficulty);
}

/// Fire an enemy bullet if this tick is on the difficulty's firing cadence.
///
/// Every `enemy_fire_interval_ticks` ticks one enemy, chosen uniformly at
/// random, shoots from its bottom centre.
pub fn maybe_fire_enemy_bullet(state: &mut GameState) {
    if state.enemies.is_empty() {
        return;
    }
    if !state
        .game_ticks
        .is_multiple_of(state.difficulty.enemy_fire_interval_ticks)
    {
        return;
    }

    let idx = state.rng.random_range(0..state.enemies.len());
    let enemy = &state.enemies[idx];
    let speed = ENEMY_BULLET_SPEED * state.difficulty.enemy_bullet_speed_multiplier;
    state.enemy_bullets.push(EnemyBullet::new(
        enemy.pos.x + ENEMY_WIDTH / 2.0 - BULLET_WIDTH / 2.0,
        enemy.pos.y + ENEMY_HEIGHT,
        speed,
    ));
}

/// Points for killing an enemy worth `base_points` at this difficulty.
pub fn kill_score(base_points: u32, difficulty: &Difficulty) -> u64 {
    (base_points as f32 * difficulty.score_multiplier).ceil() as u64
}

/// Roll a power-up drop for a kill at the given position.
///
/// Fixed 20% chance, capped both per wave and by concurrent on-screen items.
pub fn maybe_drop_powerup(state: &mut GameState, x: f32, y: f32) {
    if state.drops_this_wave >= MAX_DROPS_PER_WAVE
        || state.powerups.len() >= MAX_POWERUPS_ON_SCREEN
    {
        return;
    }
    if !state.rng.random_bool(POWERUP_DROP_CHANCE) {
        return;
    }

    let kind = match state.rng.random_range(0..PowerUpKind::ALL.len()) {
        0 => PowerUpKind::Shield,
        1 => PowerUpKind::RapidFire,
        _ => PowerUpKind::MultiShot,
    };
    let vx = state.rng.random_range(-1.0..1.0);
    state
        .powerups
        .push(super::state::PowerUpItem::new(x, y, kind, vx));
    state.drops_this_wave += 1;
}

/// Grant bonus lives for every difficulty interval the score has crossed.
///
/// The watermark only moves forward, so several crossings in one tick each
/// grant a life.
pub fn grant_bonus_lives(state: &mut GameState) {
    let interval = state.difficulty.bonus_life_interval;
    while state.score >= state.bonus_life_watermark + interval {
        state.bonus_life_watermark += interval;
        state.lives += 1;
        state.spawn_life_reward_burst();
        state.events.push(GameEvent::BonusLife);
        log::info!("Bonus life at {} points", state.bonus_life_watermark);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::difficulty::{EASY, HARD, NORMAL};

    #[test]
    fn test_spawn_wave_grid() {
        let enemies = spawn_wave(1, &NORMAL);
        assert_eq!(enemies.len(), 18);

        // First enemy at the grid origin, last at the far corner
        assert_eq!(enemies[0].pos.x, 50.0);
        assert_eq!(enemies[0].pos.y, 30.0);
        let last = enemies.last().unwrap();
        assert_eq!(last.pos.x, 50.0 + 5.0 * 90.0);
        assert_eq!(last.pos.y, 30.0 + 2.0 * 90.0);
    }

    #[test]
    fn test_spawn_wave_deterministic() {
        let a = spawn_wave(3, &HARD);
        let b = spawn_wave(3, &HARD);
        for (x, y) in a.iter().zip(b.iter()) {
            assert_eq!(x.pos, y.pos);
            assert_eq!(x.speed, y.speed);
            assert_eq!(x.points, y.points);
        }
    }

    #[test]
    fn test_enemy_scaling() {
        let wave1 = spawn_wave(1, &NORMAL);
        let wave4 = spawn_wave(4, &NORMAL);
        assert_eq!(wave1[0].points, 15);
        assert_eq!(wave4[0].points, 30);
        assert_eq!(wave1[0].speed, 1.5);
        assert_eq!(wave4[0].speed, 3.0);

        let easy = spawn_wave(1, &EASY);
        assert!((easy[0].speed - 1.5 * 0.6).abs() < 1e-6);
    }

    #[test]
    fn test_kill_score_rounds_up() {
        assert_eq!(kill_score(15, &NORMAL), 15);
        assert_eq!(kill_score(15, &EASY), 8); // ceil(7.5)
        assert_eq!(kill_score(15, &HARD), 23); // ceil(22.5)
    }

    #[test]
    fn test_advance_wave_unlocks_tiers_once() {
        let mut state = GameState::new(1, NORMAL, 0.0);
        state.events.clear();

        state.enemies.clear();
        advance_wave(&mut state);
        assert_eq!(state.wave, 2);
        assert_eq!(state.bullet_tier, 2);
        let unlocks = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::TierUnlocked(_)))
            .count();
        assert_eq!(unlocks, 1);

        // Waves 3 and 4: no further unlock
        advance_wave(&mut state);
        advance_wave(&mut state);
        assert_eq!(state.bullet_tier, 2);

        // Wave 5 unlocks tier 3
        advance_wave(&mut state);
        assert_eq!(state.wave, 5);
        assert_eq!(state.bullet_tier, 3);
    }

    #[test]
    fn test_advance_wave_resets_drop_budget() {
        let mut state = GameState::new(1, NORMAL, 0.0);
        state.drops_this_wave = 4;
        advance_wave(&mut state);
        assert_eq!(state.drops_this_wave, 0);
        assert_eq!(state.enemies.len(), 18);
    }

    #[test]
    fn test_drop_caps_hold_for_any_seed() {
        for seed in 0..50u64 {
            let mut state = GameState::new(seed, NORMAL, 0.0);
            for _ in 0..1000 {
                maybe_drop_powerup(&mut state, 100.0, 100.0);
                assert!(state.drops_this_wave <= MAX_DROPS_PER_WAVE);
                assert!(state.powerups.len() <= MAX_POWERUPS_ON_SCREEN);
            }
        }
    }

    #[test]
    fn test_enemy_fire_cadence() {
        let mut state = GameState::new(9, NORMAL, 0.0);

        // Off-cadence tick: nothing fires
        state.game_ticks = 31;
        maybe_fire_enemy_bullet(&mut state);
        assert!(state.enemy_bullets.is_empty());

        // On-cadence tick: exactly one bullet from some enemy's bottom centre
        state.game_ticks = 60;
        maybe_fire_enemy_bullet(&mut state);
        assert_eq!(state.enemy_bullets.len(), 1);
        assert_eq!(state.enemy_bullets[0].speed, ENEMY_BULLET_SPEED);
    }

    #[test]
    fn test_bonus_life_multiple_crossings() {
        let mut state = GameState::new(2, NORMAL, 0.0);
        state.events.clear();

        // Jump straight past two thresholds (2000-point interval)
        state.score = 4100;
        grant_bonus_lives(&mut state);
        assert_eq!(state.lives, 5);
        assert_eq!(state.bonus_life_watermark, 4000);
        let grants = state
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::BonusLife))
            .count();
        assert_eq!(grants, 2);

        // Re-running at the same score grants nothing further
        grant_bonus_lives(&mut state);
        assert_eq!(state.lives, 5);
    }
}
