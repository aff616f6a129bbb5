//! Platform abstraction layer
//!
//! Handles browser/native differences for wall-clock time, and hosts the
//! fixed-timestep scheduler that converts irregular frame times into whole
//! simulation ticks.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Source of wall-clock milliseconds.
///
/// The simulation never reads time itself; drivers inject it through this
/// trait so tests can run on a manual clock.
pub trait Clock {
    /// Current wall-clock time in milliseconds
    fn now_ms(&self) -> f64;
}

/// Real time: `Date.now()` on the web, `SystemTime` natively
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[cfg(target_arch = "wasm32")]
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn now_ms(&self) -> f64 {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }
}

/// Hand-cranked clock for tests
#[derive(Debug, Clone, Copy, Default)]
pub struct ManualClock {
    pub now_ms: f64,
}

impl ManualClock {
    pub fn new(now_ms: f64) -> Self {
        Self { now_ms }
    }

    pub fn advance(&mut self, ms: f64) {
        self.now_ms += ms;
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> f64 {
        self.now_ms
    }
}

/// Fixed-timestep accumulator.
///
/// Frames arrive at whatever rate the host runs; the accumulator banks the
/// elapsed time and pays it out in whole `SIM_DT` ticks, at most
/// `MAX_SUBSTEPS` per frame so a long stall cannot trigger a catch-up spiral.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bank `dt` seconds and return how many ticks to run this frame.
    pub fn advance(&mut self, dt: f32) -> u32 {
        // Clamp pathological frame gaps (tab switch, debugger pause)
        let dt = dt.min(0.1);
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        if substeps == MAX_SUBSTEPS {
            // Drop the backlog rather than chase it
            self.accumulator = 0.0;
        }
        substeps
    }

    /// Discard any banked time (used when resuming from pause)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_frame_yields_one_tick() {
        let mut step = FixedStep::new();
        assert_eq!(step.advance(SIM_DT), 1);
        assert_eq!(step.advance(SIM_DT), 1);
    }

    #[test]
    fn test_short_frames_accumulate() {
        let mut step = FixedStep::new();
        assert_eq!(step.advance(SIM_DT * 0.5), 0);
        assert_eq!(step.advance(SIM_DT * 0.6), 1);
    }

    #[test]
    fn test_long_frame_is_clamped() {
        let mut step = FixedStep::new();
        // A 10s stall is clamped to 0.1s of banked time
        let ticks = step.advance(10.0);
        assert!(ticks <= MAX_SUBSTEPS);
        // The next normal frame pays out normally
        assert_eq!(step.advance(SIM_DT), 1);
    }

    #[test]
    fn test_sixty_fps_averages_sixty_tps() {
        let mut step = FixedStep::new();
        let mut ticks = 0;
        for _ in 0..600 {
            ticks += step.advance(1.0 / 60.0);
        }
        // Floating point banking may be one tick shy
        assert!((599..=601).contains(&ticks), "got {ticks}");
    }

    #[test]
    fn test_manual_clock() {
        let mut clock = ManualClock::new(100.0);
        clock.advance(50.0);
        assert_eq!(clock.now_ms(), 150.0);
    }
}
