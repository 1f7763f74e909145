//! Fixed-step simulation clock, decoupled from the render rate.

use crate::lander::types::TICKS_PER_SECOND;
use std::time::Duration;

/// Most ticks run for a single frame; longer stalls are dropped.
pub const MAX_CATCH_UP_TICKS: u32 = 5;

#[derive(Debug, Clone)]
pub struct FixedStep {
    tick: Duration,
    pending: Duration,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(Duration::from_micros(1_000_000 / u64::from(TICKS_PER_SECOND)))
    }
}

impl FixedStep {
    pub fn new(tick: Duration) -> Self {
        Self {
            tick,
            pending: Duration::ZERO,
        }
    }

    pub fn tick_duration(&self) -> Duration {
        self.tick
    }

    /// Add wall time and return how many simulation ticks are due.
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        if self.tick.is_zero() {
            return 0;
        }
        self.pending += elapsed;
        let due = (self.pending.as_nanos() / self.tick.as_nanos()) as u64;
        if due > u64::from(MAX_CATCH_UP_TICKS) {
            self.pending = Duration::ZERO;
            return MAX_CATCH_UP_TICKS;
        }
        let due = due as u32;
        self.pending -= self.tick * due;
        due
    }

    /// Forget accumulated time, e.g. after a deliberate pause.
    pub fn reset(&mut self) {
        self.pending = Duration::ZERO;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    #[test]
    fn test_default_runs_sixty_ticks_per_second() {
        let mut clock = FixedStep::default();
        let mut ticks = 0;
        // 30 fps render rate still yields 60 simulation ticks per second
        for _ in 0..30 {
            ticks += clock.advance(Duration::from_micros(33_334));
        }
        assert_eq!(ticks, 60);
    }

    #[test]
    fn test_remainder_carries_over() {
        let mut clock = FixedStep::new(ms(10));
        assert_eq!(clock.advance(ms(6)), 0);
        assert_eq!(clock.advance(ms(6)), 1);
        assert_eq!(clock.advance(ms(8)), 1);
    }

    #[test]
    fn test_long_stall_is_capped_and_dropped() {
        let mut clock = FixedStep::new(ms(10));
        assert_eq!(clock.advance(ms(2000)), MAX_CATCH_UP_TICKS);
        assert_eq!(clock.advance(ms(5)), 0, "stalled time must not carry over");
    }

    #[test]
    fn test_reset_discards_pending_time() {
        let mut clock = FixedStep::new(ms(10));
        clock.advance(ms(9));
        clock.reset();
        assert_eq!(clock.advance(ms(2)), 0);
    }

    #[test]
    fn test_zero_tick_never_fires() {
        let mut clock = FixedStep::new(Duration::ZERO);
        assert_eq!(clock.advance(ms(100)), 0);
    }
}
