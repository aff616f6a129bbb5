//! Lifetime gameplay statistics
//!
//! Aggregates finished games into persistent totals, plus a snapshot of the
//! most recent game. Persisted to LocalStorage like the high scores; corrupt
//! or missing data degrades to zeroed defaults.

use serde::{Deserialize, Serialize};

/// Per-game summary handed to the store when a run ends
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSummary {
    pub score: u64,
    pub wave: u32,
    pub powerups_collected: u32,
    /// Wall-clock seconds from game start to game over
    pub playtime_seconds: u64,
    pub bullets_fired: u64,
    pub enemies_killed: u64,
    pub difficulty_name: String,
}

/// Lifetime totals across all finished games
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Statistics {
    pub games_played: u64,
    pub best_wave: u32,
    pub total_score: u64,
    pub total_powerups_collected: u64,
    pub total_playtime_seconds: u64,
    pub total_bullets_fired: u64,
    pub total_enemies_killed: u64,
    /// Snapshot of the most recent game, if any
    pub last_game: Option<GameSummary>,
}

impl Statistics {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "neon_invaders_stats";

    pub fn new() -> Self {
        Self::default()
    }

    /// Merge a finished game into the lifetime totals.
    pub fn record_game_end(&mut self, summary: GameSummary) {
        self.games_played += 1;
        self.best_wave = self.best_wave.max(summary.wave);
        self.total_score += summary.score;
        self.total_powerups_collected += summary.powerups_collected as u64;
        self.total_playtime_seconds += summary.playtime_seconds;
        self.total_bullets_fired += summary.bullets_fired;
        self.total_enemies_killed += summary.enemies_killed;
        self.last_game = Some(summary);
    }

    /// Mean score per game, rounded; 0 before the first game.
    pub fn average_score(&self) -> u64 {
        if self.games_played == 0 {
            return 0;
        }
        (self.total_score as f64 / self.games_played as f64).round() as u64
    }

    /// Lifetime hit rate as a whole percentage; 0 before the first shot.
    pub fn accuracy_percent(&self) -> u32 {
        if self.total_bullets_fired == 0 {
            return 0;
        }
        let ratio = self.total_enemies_killed as f64 / self.total_bullets_fired as f64;
        (ratio * 100.0).round() as u32
    }

    /// Mean playtime per game in seconds, rounded.
    pub fn average_playtime_seconds(&self) -> u64 {
        if self.games_played == 0 {
            return 0;
        }
        (self.total_playtime_seconds as f64 / self.games_played as f64).round() as u64
    }

    /// Wipe everything back to defaults.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Load statistics from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(stats) = serde_json::from_str::<Statistics>(&json) {
                    return stats;
                }
                log::warn!("Corrupt statistics data, starting fresh");
            }
        }

        Self::new()
    }

    /// Save statistics to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                let _ = storage.set_item(Self::STORAGE_KEY, &json);
                log::info!("Statistics saved ({} games)", self.games_played);
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(score: u64, wave: u32) -> GameSummary {
        GameSummary {
            score,
            wave,
            powerups_collected: 2,
            playtime_seconds: 90,
            bullets_fired: 100,
            enemies_killed: 40,
            difficulty_name: "Normal".to_string(),
        }
    }

    #[test]
    fn test_record_merges_totals() {
        let mut stats = Statistics::new();
        stats.record_game_end(summary(500, 3));
        stats.record_game_end(summary(1500, 7));

        assert_eq!(stats.games_played, 2);
        assert_eq!(stats.best_wave, 7);
        assert_eq!(stats.total_score, 2000);
        assert_eq!(stats.total_powerups_collected, 4);
        assert_eq!(stats.total_playtime_seconds, 180);
        assert_eq!(stats.total_bullets_fired, 200);
        assert_eq!(stats.total_enemies_killed, 80);
        assert_eq!(stats.last_game.as_ref().unwrap().score, 1500);
    }

    #[test]
    fn test_best_wave_never_regresses() {
        let mut stats = Statistics::new();
        stats.record_game_end(summary(100, 9));
        stats.record_game_end(summary(100, 2));
        assert_eq!(stats.best_wave, 9);
    }

    #[test]
    fn test_averages_guard_against_empty() {
        let stats = Statistics::new();
        assert_eq!(stats.average_score(), 0);
        assert_eq!(stats.accuracy_percent(), 0);
        assert_eq!(stats.average_playtime_seconds(), 0);
    }

    #[test]
    fn test_derived_averages() {
        let mut stats = Statistics::new();
        stats.record_game_end(summary(100, 1));
        stats.record_game_end(summary(201, 1));

        assert_eq!(stats.average_score(), 151); // round(150.5)
        assert_eq!(stats.accuracy_percent(), 40); // 80 kills / 200 shots
        assert_eq!(stats.average_playtime_seconds(), 90);
    }

    #[test]
    fn test_reset() {
        let mut stats = Statistics::new();
        stats.record_game_end(summary(100, 5));
        stats.reset();
        assert_eq!(stats.games_played, 0);
        assert!(stats.last_game.is_none());
    }

    #[test]
    fn test_corrupt_json_degrades_to_default() {
        let restored = serde_json::from_str::<Statistics>("not json").unwrap_or_default();
        assert_eq!(restored.games_played, 0);
    }

    #[test]
    fn test_json_round_trip() {
        let mut stats = Statistics::new();
        stats.record_game_end(summary(777, 4));

        let json = serde_json::to_string(&stats).unwrap();
        let restored: Statistics = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.total_score, 777);
        assert_eq!(restored.last_game, stats.last_game);
    }
}
