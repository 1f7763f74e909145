//! Property tests for the integrator and the landing evaluator.

use lunar_lander::lander::types::{MAX_LANDING_VX, MAX_LANDING_VY, ROTATION_SPEED};
use lunar_lander::lander::{
    evaluate, is_safe_landing, step, ControlInput, Craft, Difficulty, PhysicsParams, Terrain,
    ThrustConvention,
};
use proptest::prelude::*;

fn difficulty() -> impl Strategy<Value = Difficulty> {
    prop_oneof![
        Just(Difficulty::Easy),
        Just(Difficulty::Medium),
        Just(Difficulty::Hard),
    ]
}

fn convention() -> impl Strategy<Value = ThrustConvention> {
    prop_oneof![
        Just(ThrustConvention::Standard),
        Just(ThrustConvention::Inverted),
    ]
}

fn craft() -> impl Strategy<Value = Craft> {
    (
        0.0..800.0f64,
        0.0..600.0f64,
        -5.0..5.0f64,
        -5.0..5.0f64,
        -3.2..3.2f64,
        0u32..2000,
    )
        .prop_map(|(x, y, vx, vy, angle, fuel)| Craft {
            vx,
            vy,
            ..Craft::new(x, y, angle, fuel)
        })
}

fn input() -> impl Strategy<Value = ControlInput> {
    (-1i8..=1, any::<bool>()).prop_map(|(rotation, thrust)| ControlInput { rotation, thrust })
}

proptest! {
    #[test]
    fn coasting_adds_exactly_gravity(c in craft(), d in difficulty(), conv in convention()) {
        let params = PhysicsParams::for_difficulty(d, conv);
        let next = step(&c, ControlInput::IDLE, &params);
        prop_assert_eq!(next.vx, c.vx);
        prop_assert!((next.vy - (c.vy + d.gravity())).abs() < 1e-12);
        prop_assert_eq!(next.fuel, c.fuel);
        prop_assert!(!next.thrusting);
        prop_assert!((next.x - (c.x + next.vx)).abs() < 1e-12);
        prop_assert!((next.y - (c.y + next.vy)).abs() < 1e-12);
    }

    #[test]
    fn thrust_burns_one_unit_when_fueled(c in craft(), d in difficulty(), conv in convention()) {
        let params = PhysicsParams::for_difficulty(d, conv);
        let next = step(&c, ControlInput::thrust(), &params);
        if c.fuel > 0 {
            prop_assert_eq!(next.fuel, c.fuel - 1);
            prop_assert!(next.thrusting);
            let dv = ((next.vx - c.vx).powi(2) + (next.vy - c.vy - d.gravity()).powi(2)).sqrt();
            prop_assert!((dv - d.thrust()).abs() < 1e-9, "thrust impulse {} != {}", dv, d.thrust());
        } else {
            prop_assert_eq!(next.fuel, 0);
            prop_assert!(!next.thrusting);
            prop_assert_eq!(next.vx, c.vx);
        }
    }

    #[test]
    fn rotation_moves_exactly_one_step(c in craft(), dir in -1i8..=1) {
        let params = PhysicsParams::for_difficulty(Difficulty::Medium, ThrustConvention::Standard);
        let next = step(&c, ControlInput::rotate(dir), &params);
        let expected = c.angle + f64::from(dir) * ROTATION_SPEED;
        prop_assert!((next.angle - expected).abs() < 1e-12);
    }

    #[test]
    fn fuel_never_increases(c in craft(), inputs in prop::collection::vec(input(), 1..200)) {
        let params = PhysicsParams::for_difficulty(Difficulty::Hard, ThrustConvention::Standard);
        let mut craft = c;
        for i in inputs {
            let next = step(&craft, i, &params);
            prop_assert!(next.fuel <= craft.fuel);
            prop_assert!(craft.fuel - next.fuel <= 1);
            craft = next;
        }
    }

    #[test]
    fn evaluation_is_pure(c in craft(), d in difficulty()) {
        let terrain = Terrain::for_difficulty(d);
        let first = evaluate(&c, &terrain, d.angle_tolerance());
        let second = evaluate(&c, &terrain, d.angle_tolerance());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn safe_landing_is_componentwise(
        vx in -2.0..2.0f64,
        vy in -2.0..2.0f64,
        angle in -1.0..1.0f64,
        d in difficulty(),
    ) {
        let tol = d.angle_tolerance();
        let expected = vx.abs() < MAX_LANDING_VX && vy.abs() < MAX_LANDING_VY && angle.abs() < tol;
        prop_assert_eq!(is_safe_landing(vx, vy, angle, tol), expected);
    }
}

#[test]
fn test_safe_landing_bounds_are_exclusive() {
    let tol = Difficulty::Medium.angle_tolerance();
    assert!(!is_safe_landing(MAX_LANDING_VX, 0.0, 0.0, tol));
    assert!(!is_safe_landing(0.0, MAX_LANDING_VY, 0.0, tol));
    assert!(!is_safe_landing(0.0, 0.0, tol, tol));
    assert!(!is_safe_landing(-MAX_LANDING_VX, 0.0, 0.0, tol));
    assert!(is_safe_landing(0.49, -0.99, -tol * 0.9, tol));
}
