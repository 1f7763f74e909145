//! One play-through: difficulty parameters, terrain, craft and outcome.

use crate::lander::types::ANGLE_PENALTY_PER_RADIAN;
use crate::lander::{
    evaluate, step, Contact, ControlInput, Craft, Difficulty, Outcome, PhysicsParams, Terrain,
    ThrustConvention, MAX_FUEL,
};
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Inclusive numeric range used for spawn randomization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f64,
    pub max: f64,
}

impl Span {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn sample<R: Rng>(&self, rng: &mut R) -> f64 {
        if self.max <= self.min {
            self.min
        } else {
            rng.gen_range(self.min..=self.max)
        }
    }

    pub fn contains(&self, v: f64) -> bool {
        v >= self.min && v <= self.max
    }
}

/// Bounds the craft's starting position and attitude are drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnBounds {
    pub x: Span,
    pub y: Span,
    pub angle: Span,
}

impl Default for SpawnBounds {
    fn default() -> Self {
        Self {
            x: Span::new(300.0, 500.0),
            y: Span::new(80.0, 120.0),
            angle: Span::new(-0.05, 0.05),
        }
    }
}

/// Per-session settings that do not depend on difficulty.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub max_fuel: u32,
    pub spawn: SpawnBounds,
    pub convention: ThrustConvention,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_fuel: MAX_FUEL,
            spawn: SpawnBounds::default(),
            convention: ThrustConvention::default(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    pub difficulty: Difficulty,
    pub params: PhysicsParams,
    pub angle_tolerance: f64,
    pub terrain: Terrain,
    pub craft: Craft,
    pub max_fuel: u32,
    pub tick_count: u64,
    pub outcome: Option<Outcome>,
}

impl Session {
    /// Start a session with a craft spawned inside `config.spawn`.
    pub fn new<R: Rng>(difficulty: Difficulty, config: &SessionConfig, rng: &mut R) -> Self {
        let craft = Craft::new(
            config.spawn.x.sample(rng),
            config.spawn.y.sample(rng),
            config.spawn.angle.sample(rng),
            config.max_fuel,
        );
        Self::with_craft(difficulty, config, craft)
    }

    pub fn with_craft(difficulty: Difficulty, config: &SessionConfig, craft: Craft) -> Self {
        Self {
            difficulty,
            params: PhysicsParams::for_difficulty(difficulty, config.convention),
            angle_tolerance: difficulty.angle_tolerance(),
            terrain: Terrain::for_difficulty(difficulty),
            craft,
            max_fuel: config.max_fuel,
            tick_count: 0,
            outcome: None,
        }
    }

    /// Integrate one tick and classify the result.
    ///
    /// Once an outcome is recorded the session is frozen and every call
    /// returns `Contact::None`.
    pub fn tick(&mut self, input: ControlInput) -> Contact {
        if self.outcome.is_some() {
            return Contact::None;
        }

        self.craft = step(&self.craft, input, &self.params);
        self.tick_count += 1;

        let contact = evaluate(&self.craft, &self.terrain, self.angle_tolerance);
        match contact {
            Contact::Landed => self.outcome = Some(Outcome::Landed),
            Contact::Crashed => self.outcome = Some(Outcome::Crashed),
            Contact::None => {}
        }
        contact
    }

    /// Record a quit. No-op once an outcome exists.
    pub fn abort(&mut self) {
        if self.outcome.is_none() {
            self.outcome = Some(Outcome::Quit);
            self.craft.thrusting = false;
        }
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    pub fn score(&self) -> u32 {
        match self.outcome {
            Some(outcome) => score(outcome, self.difficulty, self.craft.fuel, self.craft.angle),
            None => 0,
        }
    }

    /// Distance from the landing legs to the surface below, if any.
    pub fn altitude(&self) -> Option<f64> {
        self.terrain
            .height_at(self.craft.x)
            .map(|h| (h - self.craft.lower_edge()).max(0.0))
    }

    pub fn over_pad(&self) -> bool {
        self.terrain.pad_at(self.craft.x).is_some()
    }

    pub fn fuel_fraction(&self) -> f64 {
        if self.max_fuel == 0 {
            0.0
        } else {
            f64::from(self.craft.fuel) / f64::from(self.max_fuel)
        }
    }
}

/// Landed: fuel × difficulty multiplier minus a tilt penalty, floored at 0.
/// Crashed and Quit score nothing.
pub fn score(outcome: Outcome, difficulty: Difficulty, fuel: u32, angle: f64) -> u32 {
    match outcome {
        Outcome::Landed => {
            let base = fuel.saturating_mul(difficulty.score_multiplier());
            let penalty = (angle.abs() * ANGLE_PENALTY_PER_RADIAN).round() as u32;
            base.saturating_sub(penalty)
        }
        Outcome::Crashed | Outcome::Quit => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lander::types::CRAFT_HEIGHT;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(7)
    }

    #[test]
    fn test_new_session_spawns_inside_bounds() {
        let config = SessionConfig::default();
        let mut rng = rng();
        for diff in &Difficulty::ALL {
            for _ in 0..20 {
                let session = Session::new(*diff, &config, &mut rng);
                assert!(config.spawn.x.contains(session.craft.x));
                assert!(config.spawn.y.contains(session.craft.y));
                assert!(config.spawn.angle.contains(session.craft.angle));
                assert_eq!(session.craft.fuel, MAX_FUEL);
                assert!(session.outcome.is_none());
                assert_eq!(session.tick_count, 0);
            }
        }
    }

    #[test]
    fn test_session_uses_difficulty_constants() {
        let session = Session::new(Difficulty::Hard, &SessionConfig::default(), &mut rng());
        assert!((session.params.gravity - 0.07).abs() < f64::EPSILON);
        assert!((session.params.thrust - 0.1).abs() < f64::EPSILON);
        assert!((session.angle_tolerance - Difficulty::Hard.angle_tolerance()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_degenerate_span_returns_min() {
        let span = Span::new(5.0, 5.0);
        assert!((span.sample(&mut rng()) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_free_fall_eventually_crashes_off_pad() {
        let config = SessionConfig::default();
        let craft = Craft::new(100.0, 100.0, 0.0, MAX_FUEL);
        let mut session = Session::with_craft(Difficulty::Easy, &config, craft);
        let mut contact = Contact::None;
        for _ in 0..10_000 {
            contact = session.tick(ControlInput::IDLE);
            if contact != Contact::None {
                break;
            }
        }
        assert_eq!(contact, Contact::Crashed);
        assert_eq!(session.outcome, Some(Outcome::Crashed));
        assert_eq!(session.score(), 0);
    }

    #[test]
    fn test_soft_drop_onto_pad_lands() {
        let config = SessionConfig::default();
        // Legs 0.2 above the pad, drifting down slowly
        let mut craft = Craft::new(400.0, 550.0 - CRAFT_HEIGHT / 2.0 - 0.2, 0.0, 500);
        craft.vy = 0.3;
        let mut session = Session::with_craft(Difficulty::Easy, &config, craft);
        assert_eq!(session.tick(ControlInput::IDLE), Contact::Landed);
        assert_eq!(session.outcome, Some(Outcome::Landed));
        assert_eq!(session.score(), 500);
    }

    #[test]
    fn test_session_freezes_after_outcome() {
        let config = SessionConfig::default();
        let craft = Craft::new(100.0, 540.0, 0.0, MAX_FUEL);
        let mut session = Session::with_craft(Difficulty::Easy, &config, craft);
        assert_eq!(session.tick(ControlInput::IDLE), Contact::Crashed);
        let frozen = session.craft.clone();
        let ticks = session.tick_count;
        assert_eq!(session.tick(ControlInput::thrust()), Contact::None);
        assert_eq!(session.craft, frozen);
        assert_eq!(session.tick_count, ticks);
    }

    #[test]
    fn test_abort_records_quit_once() {
        let config = SessionConfig::default();
        let mut session = Session::new(Difficulty::Medium, &config, &mut rng());
        session.abort();
        assert_eq!(session.outcome, Some(Outcome::Quit));
        assert_eq!(session.score(), 0);

        let craft = Craft::new(100.0, 540.0, 0.0, MAX_FUEL);
        let mut crashed = Session::with_craft(Difficulty::Easy, &config, craft);
        crashed.tick(ControlInput::IDLE);
        crashed.abort();
        assert_eq!(crashed.outcome, Some(Outcome::Crashed));
    }

    #[test]
    fn test_score_scales_with_difficulty() {
        assert_eq!(score(Outcome::Landed, Difficulty::Easy, 400, 0.0), 400);
        assert_eq!(score(Outcome::Landed, Difficulty::Medium, 400, 0.0), 800);
        assert_eq!(score(Outcome::Landed, Difficulty::Hard, 400, 0.0), 1200);
    }

    #[test]
    fn test_score_penalizes_tilt() {
        assert_eq!(score(Outcome::Landed, Difficulty::Easy, 400, 0.05), 350);
        assert_eq!(score(Outcome::Landed, Difficulty::Easy, 400, -0.05), 350);
        assert_eq!(score(Outcome::Landed, Difficulty::Easy, 10, 0.09), 0);
    }

    #[test]
    fn test_failed_sessions_score_zero() {
        assert_eq!(score(Outcome::Crashed, Difficulty::Hard, 900, 0.0), 0);
        assert_eq!(score(Outcome::Quit, Difficulty::Hard, 900, 0.0), 0);
    }

    #[test]
    fn test_altitude_and_over_pad() {
        let config = SessionConfig::default();
        let craft = Craft::new(400.0, 100.0, 0.0, MAX_FUEL);
        let session = Session::with_craft(Difficulty::Easy, &config, craft);
        assert!((session.altitude().unwrap() - 430.0).abs() < 1e-9);
        assert!(session.over_pad());
    }

    #[test]
    fn test_fuel_fraction() {
        let config = SessionConfig {
            max_fuel: 200,
            ..SessionConfig::default()
        };
        let craft = Craft::new(400.0, 100.0, 0.0, 50);
        let session = Session::with_craft(Difficulty::Easy, &config, craft);
        assert!((session.fuel_fraction() - 0.25).abs() < f64::EPSILON);
    }
}
