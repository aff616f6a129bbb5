//! Data-driven difficulty presets
//!
//! Pure configuration consumed by the simulation; no logic beyond lookup.

/// A named difficulty preset (persisted records store only the name)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Difficulty {
    pub name: &'static str,
    /// Scales every enemy's horizontal speed
    pub enemy_speed_multiplier: f32,
    /// Ticks between enemy shots
    pub enemy_fire_interval_ticks: u64,
    /// Scales enemy bullet fall speed
    pub enemy_bullet_speed_multiplier: f32,
    /// Scales points awarded per kill
    pub score_multiplier: f32,
    /// Points between bonus life grants
    pub bonus_life_interval: u64,
}

pub const EASY: Difficulty = Difficulty {
    name: "Easy",
    enemy_speed_multiplier: 0.6,
    enemy_fire_interval_ticks: 45,
    enemy_bullet_speed_multiplier: 0.7,
    score_multiplier: 0.5,
    bonus_life_interval: 3000,
};

pub const NORMAL: Difficulty = Difficulty {
    name: "Normal",
    enemy_speed_multiplier: 1.0,
    enemy_fire_interval_ticks: 30,
    enemy_bullet_speed_multiplier: 1.0,
    score_multiplier: 1.0,
    bonus_life_interval: 2000,
};

pub const HARD: Difficulty = Difficulty {
    name: "Hard",
    enemy_speed_multiplier: 1.5,
    enemy_fire_interval_ticks: 20,
    enemy_bullet_speed_multiplier: 1.3,
    score_multiplier: 1.5,
    bonus_life_interval: 1500,
};

pub const INSANE: Difficulty = Difficulty {
    name: "Insane",
    enemy_speed_multiplier: 2.0,
    enemy_fire_interval_ticks: 15,
    enemy_bullet_speed_multiplier: 1.8,
    score_multiplier: 2.0,
    bonus_life_interval: 1000,
};

impl Default for Difficulty {
    fn default() -> Self {
        NORMAL
    }
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [EASY, NORMAL, HARD, INSANE];

    /// Look up a preset by (case-insensitive) name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|d| d.name.eq_ignore_ascii_case(name))
    }
}
