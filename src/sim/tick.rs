//! Fixed-order simulation tick
//!
//! One call advances the game by exactly one tick. The order of operations is
//! fixed and load-bearing: gameplay pacing (enemy fire cadence, wave checks)
//! counts ticks, while power-up expiry and auto-fire run on the wall-clock
//! milliseconds passed in by the driver.

use super::collision::{overlaps, past_loss_line, shield_absorbs};
use super::powerups::PowerUpKind;
use super::state::{GameEvent, GamePhase, GameState};
use super::waves;
use crate::consts::*;

/// Input sampled once per tick (deterministic)
#[derive(Debug, Clone, Copy, Default)]
pub struct TickInput {
    /// Move left is held
    pub move_left: bool,
    /// Move right is held
    pub move_right: bool,
    /// Fire trigger pressed this tick
    pub fire: bool,
    /// Pause toggle pressed this tick
    pub pause: bool,
}

/// Advance the game state by one tick.
///
/// `now_ms` is the current wall-clock time; power-up timers keep counting
/// against it even while paused, matching the original behaviour.
pub fn tick(state: &mut GameState, input: &TickInput, now_ms: f64) {
    // Pause toggle
    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.phase = GamePhase::Paused;
                return;
            }
            GamePhase::Paused => {
                state.phase = GamePhase::Playing;
            }
            _ => {}
        }
    }

    match state.phase {
        GamePhase::Paused | GamePhase::GameOver => return,
        _ => {}
    }

    state.game_ticks += 1;

    // Player movement from held input
    if input.move_left && state.player.pos.x > 0.0 {
        state.player.pos.x -= PLAYER_SPEED;
    }
    if input.move_right && state.player.pos.x + PLAYER_WIDTH < GAME_WIDTH {
        state.player.pos.x += PLAYER_SPEED;
    }

    // Prune expired buffs before anything reads the ledger this tick; an
    // expired MultiShot or RapidFire must not influence this tick's shots
    state.ledger.purge_expired(now_ms);

    // Manual fire, plus the RapidFire auto-trigger (wall-clock paced,
    // independent of the manual trigger)
    if input.fire {
        fire(state);
    }
    if state.ledger.is_active(PowerUpKind::RapidFire)
        && now_ms - state.last_rapid_fire_ms >= RAPID_FIRE_INTERVAL_MS
    {
        state.last_rapid_fire_ms = now_ms;
        fire(state);
    }

    update_powerup_items(state, now_ms);
    update_bullets(state);
    let enemies_reached_bottom = update_enemies(state);
    waves::grant_bonus_lives(state);
    update_enemy_bullets(state);

    for particle in state.particles.iter_mut() {
        particle.advance();
    }
    state.particles.retain(|p| p.life > 0);

    waves::maybe_fire_enemy_bullet(state);

    // Wave cleared: transient phase, resolved within this same tick
    if state.enemies.is_empty() {
        state.phase = GamePhase::WaveComplete;
        waves::advance_wave(state);
        state.phase = GamePhase::Playing;
    }

    // An enemy reaching the bottom ends the game outright; zeroing lives
    // here keeps a same-tick bonus life from rescuing a lost game
    if enemies_reached_bottom {
        state.lives = 0;
    }

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        state.events.push(GameEvent::GameOver);
        log::info!(
            "Game over: score {}, wave {}, {} enemies killed",
            state.score,
            state.wave,
            state.enemies_killed
        );
    }
}

fn fire(state: &mut GameState) {
    let multishot = state.ledger.is_active(PowerUpKind::MultiShot);
    let count = state.player.shoot(
        &mut state.bullets,
        state.wave,
        state.bullet_tier,
        multishot,
    );
    state.bullets_fired += count as u64;
    state.events.push(GameEvent::Shoot);
}

/// Falling power-up items: advance, cull off-screen, collect on contact.
fn update_powerup_items(state: &mut GameState, now_ms: f64) {
    let player_rect = state.player.rect();
    let mut collected = Vec::new();

    let mut dead = vec![false; state.powerups.len()];
    for (i, item) in state.powerups.iter_mut().enumerate() {
        item.advance();
        if item.off_bottom() {
            dead[i] = true;
        } else if overlaps(&item.rect(), &player_rect) {
            collected.push((item.kind, item.rect().center()));
            dead[i] = true;
        }
    }
    compact(&mut state.powerups, &dead);

    for (kind, center) in collected {
        state.ledger.activate(kind, now_ms);
        state.powerups_collected += 1;
        state.spawn_collect_burst(center);
        state.events.push(GameEvent::PowerUpCollected(kind));
        log::debug!("Collected {}", kind.name());
    }
}

/// Player bullets: advance and cull those leaving the top of the field.
fn update_bullets(state: &mut GameState) {
    for bullet in state.bullets.iter_mut() {
        bullet.advance();
    }
    state.bullets.retain(|b| !b.off_top());
}

/// Enemies: march, test the loss line, then resolve bullet hits.
///
/// Each bullet kills at most one enemy (first overlap in iteration order
/// wins) and is consumed doing so. Both lists are compacted only after the
/// whole pass, so iteration never observes a half-removed entity.
///
/// Returns whether any enemy crossed the loss line. Kills in that same tick
/// are still scored; the caller ends the game afterwards.
fn update_enemies(state: &mut GameState) -> bool {
    for enemy in state.enemies.iter_mut() {
        enemy.advance();
    }

    let reached_bottom = state.enemies.iter().any(|e| past_loss_line(&e.rect()));

    let mut bullet_dead = vec![false; state.bullets.len()];
    let mut enemy_dead = vec![false; state.enemies.len()];
    let mut kills = Vec::new();

    for (bi, bullet) in state.bullets.iter().enumerate() {
        let bullet_rect = bullet.rect();
        for (ei, enemy) in state.enemies.iter().enumerate() {
            if enemy_dead[ei] {
                continue;
            }
            if overlaps(&bullet_rect, &enemy.rect()) {
                bullet_dead[bi] = true;
                enemy_dead[ei] = true;
                kills.push(ei);
                break;
            }
        }
    }

    for &ei in &kills {
        let enemy = &state.enemies[ei];
        let points = waves::kill_score(enemy.points, &state.difficulty);
        let center = enemy.rect().center();
        let (drop_x, drop_y) = (enemy.pos.x + ENEMY_WIDTH / 2.0, enemy.pos.y);

        state.score += points;
        state.enemies_killed += 1;
        state.events.push(GameEvent::EnemyDeath);
        state.spawn_explosion(center);
        waves::maybe_drop_powerup(state, drop_x, drop_y);
    }

    compact(&mut state.bullets, &bullet_dead);
    compact(&mut state.enemies, &enemy_dead);

    reached_bottom
}

/// Enemy bullets: advance, cull, shield absorption, player hits.
fn update_enemy_bullets(state: &mut GameState) {
    let player_rect = state.player.rect();
    let shield_up = state.ledger.is_active(PowerUpKind::Shield);

    let mut dead = vec![false; state.enemy_bullets.len()];
    let mut absorbed = Vec::new();
    let mut hits = 0u32;

    for (i, bullet) in state.enemy_bullets.iter_mut().enumerate() {
        bullet.advance();
        if bullet.off_bottom() {
            dead[i] = true;
            continue;
        }
        if shield_up && shield_absorbs(&player_rect, bullet.center()) {
            dead[i] = true;
            absorbed.push(bullet.center());
            continue;
        }
        if overlaps(&bullet.rect(), &player_rect) {
            dead[i] = true;
            hits += 1;
        }
    }
    compact(&mut state.enemy_bullets, &dead);

    for center in absorbed {
        state.spawn_explosion(center);
    }
    for _ in 0..hits {
        state.lives = state.lives.saturating_sub(1);
        state.events.push(GameEvent::PlayerHit);
        state.spawn_explosion(player_rect.center());
    }
}

/// Drop entries whose flag is set, preserving order of the rest.
fn compact<T>(items: &mut Vec<T>, dead: &[bool]) {
    let mut i = 0;
    items.retain(|_| {
        let keep = !dead[i];
        i += 1;
        keep
    });
}
