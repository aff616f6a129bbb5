//! Active power-up bookkeeping
//!
//! Tracks which buffs are live on the player and how long each has left.
//! Expiry runs on wall-clock milliseconds, independent of the tick counter.
//! Re-activating a buff before it expires restarts the full duration rather
//! than stacking a second timer. Shield is the exception: every Shield pickup
//! permanently lengthens its duration for the rest of the game, and the
//! pickup count survives expiry.

use crate::consts::SHIELD_STACK_BONUS_MS;

/// The closed set of power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerUpKind {
    Shield,
    RapidFire,
    MultiShot,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 3] = [
        PowerUpKind::Shield,
        PowerUpKind::RapidFire,
        PowerUpKind::MultiShot,
    ];

    /// Base buff duration in milliseconds
    pub fn base_duration_ms(&self) -> f64 {
        match self {
            PowerUpKind::Shield => 8000.0,
            PowerUpKind::RapidFire => 6000.0,
            PowerUpKind::MultiShot => 7000.0,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            PowerUpKind::Shield => "Shield",
            PowerUpKind::RapidFire => "Rapid Fire",
            PowerUpKind::MultiShot => "Multi-Shot",
        }
    }

    fn index(&self) -> usize {
        match self {
            PowerUpKind::Shield => 0,
            PowerUpKind::RapidFire => 1,
            PowerUpKind::MultiShot => 2,
        }
    }
}

/// Ledger of active power-up effects on the player
#[derive(Debug, Clone, Default)]
pub struct PowerUpLedger {
    /// Activation timestamp (wall-clock ms) per kind, None when inactive
    started_at_ms: [Option<f64>; 3],
    /// Cumulative Shield pickups this game; never reset by expiry
    shield_pickups: u32,
}

impl PowerUpLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Activate a buff, restarting its timer if already active.
    pub fn activate(&mut self, kind: PowerUpKind, now_ms: f64) {
        if kind == PowerUpKind::Shield {
            self.shield_pickups += 1;
        }
        self.started_at_ms[kind.index()] = Some(now_ms);
    }

    pub fn is_active(&self, kind: PowerUpKind) -> bool {
        self.started_at_ms[kind.index()].is_some()
    }

    /// Effective duration for a kind, including the Shield stacking bonus.
    pub fn duration_ms(&self, kind: PowerUpKind) -> f64 {
        let base = kind.base_duration_ms();
        if kind == PowerUpKind::Shield && self.shield_pickups > 1 {
            base + (self.shield_pickups - 1) as f64 * SHIELD_STACK_BONUS_MS
        } else {
            base
        }
    }

    /// Remaining time for an active buff; 0 when inactive. Never negative.
    pub fn remaining_ms(&self, kind: PowerUpKind, now_ms: f64) -> f64 {
        match self.started_at_ms[kind.index()] {
            Some(start) => (self.duration_ms(kind) - (now_ms - start)).max(0.0),
            None => 0.0,
        }
    }

    /// Drop entries whose elapsed time exceeds their duration.
    pub fn purge_expired(&mut self, now_ms: f64) {
        for kind in PowerUpKind::ALL {
            if let Some(start) = self.started_at_ms[kind.index()] {
                if now_ms - start > self.duration_ms(kind) {
                    self.started_at_ms[kind.index()] = None;
                }
            }
        }
    }

    /// Deactivate everything. The shield pickup count is kept: it tracks
    /// pickups for the whole game, not for one activation.
    pub fn clear(&mut self) {
        self.started_at_ms = [None; 3];
    }

    pub fn shield_pickups(&self) -> u32 {
        self.shield_pickups
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_activate_and_expire() {
        let mut ledger = PowerUpLedger::new();
        ledger.activate(PowerUpKind::RapidFire, 1000.0);
        assert!(ledger.is_active(PowerUpKind::RapidFire));
        assert_eq!(ledger.remaining_ms(PowerUpKind::RapidFire, 1000.0), 6000.0);

        // Exactly at the duration boundary the buff is still live
        ledger.purge_expired(7000.0);
        assert!(ledger.is_active(PowerUpKind::RapidFire));

        ledger.purge_expired(7000.1);
        assert!(!ledger.is_active(PowerUpKind::RapidFire));
        assert_eq!(ledger.remaining_ms(PowerUpKind::RapidFire, 7000.1), 0.0);
    }

    #[test]
    fn test_reactivation_restarts_duration() {
        let mut ledger = PowerUpLedger::new();
        ledger.activate(PowerUpKind::MultiShot, 0.0);
        ledger.activate(PowerUpKind::MultiShot, 5000.0);

        // Timer restarted at 5000, so the full 7000 remains
        assert_eq!(ledger.remaining_ms(PowerUpKind::MultiShot, 5000.0), 7000.0);
        ledger.purge_expired(8000.0);
        assert!(ledger.is_active(PowerUpKind::MultiShot));
    }

    #[test]
    fn test_shield_stacking() {
        let mut ledger = PowerUpLedger::new();
        ledger.activate(PowerUpKind::Shield, 0.0);
        assert_eq!(ledger.duration_ms(PowerUpKind::Shield), 8000.0);

        // Second pickup before expiry: base + 2000, from the second pickup
        ledger.activate(PowerUpKind::Shield, 3000.0);
        assert_eq!(ledger.duration_ms(PowerUpKind::Shield), 10000.0);
        assert_eq!(ledger.remaining_ms(PowerUpKind::Shield, 3000.0), 10000.0);
    }

    #[test]
    fn test_shield_pickup_count_survives_expiry() {
        let mut ledger = PowerUpLedger::new();
        ledger.activate(PowerUpKind::Shield, 0.0);
        ledger.purge_expired(20000.0);
        assert!(!ledger.is_active(PowerUpKind::Shield));

        // Third pickup overall grows to base + 2*2000 even though the
        // previous shield already expired
        ledger.activate(PowerUpKind::Shield, 30000.0);
        ledger.activate(PowerUpKind::Shield, 31000.0);
        assert_eq!(ledger.shield_pickups(), 3);
        assert_eq!(ledger.duration_ms(PowerUpKind::Shield), 12000.0);
    }

    #[test]
    fn test_clear_keeps_shield_count() {
        let mut ledger = PowerUpLedger::new();
        ledger.activate(PowerUpKind::Shield, 0.0);
        ledger.activate(PowerUpKind::RapidFire, 0.0);
        ledger.clear();

        assert!(!ledger.is_active(PowerUpKind::Shield));
        assert!(!ledger.is_active(PowerUpKind::RapidFire));
        assert_eq!(ledger.shield_pickups(), 1);
    }

    #[test]
    fn test_independent_types() {
        let mut ledger = PowerUpLedger::new();
        ledger.activate(PowerUpKind::Shield, 0.0);
        ledger.activate(PowerUpKind::RapidFire, 4000.0);

        // RapidFire (6s base) outlives the first shield window here
        ledger.purge_expired(8500.0);
        assert!(!ledger.is_active(PowerUpKind::Shield));
        assert!(ledger.is_active(PowerUpKind::RapidFire));
    }

    proptest! {
        /// Nth shield pickup duration is base + (N-1) * 2000, cumulative
        /// across the whole game
        #[test]
        fn shield_duration_formula(n in 1u32..50) {
            let mut ledger = PowerUpLedger::new();
            for i in 0..n {
                ledger.activate(PowerUpKind::Shield, i as f64 * 100.0);
            }
            let expected = 8000.0 + (n - 1) as f64 * 2000.0;
            prop_assert_eq!(ledger.duration_ms(PowerUpKind::Shield), expected);
        }

        /// Remaining time is never negative, at any probe time
        #[test]
        fn remaining_never_negative(start in 0.0f64..1e9, probe in 0.0f64..1e9) {
            let mut ledger = PowerUpLedger::new();
            ledger.activate(PowerUpKind::MultiShot, start);
            prop_assert!(ledger.remaining_ms(PowerUpKind::MultiShot, probe) >= 0.0);
        }
    }
}
