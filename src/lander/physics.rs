//! Fixed-timestep craft integration.

use super::types::{ControlInput, Craft, PhysicsParams};

/// Advance the craft by one tick.
///
/// Order: rotation, thrust, gravity, then position (explicit Euler, so the
/// position update sees this tick's velocity).
pub fn step(craft: &Craft, input: ControlInput, params: &PhysicsParams) -> Craft {
    let mut next = craft.clone();

    next.angle += f64::from(input.rotation.signum()) * params.rotation_speed;

    if input.thrust && next.fuel > 0 {
        let (dx, dy) = params.convention.direction(next.angle);
        next.vx += dx * params.thrust;
        next.vy += dy * params.thrust;
        next.fuel -= 1;
        next.thrusting = true;
    } else {
        next.thrusting = false;
    }

    next.vy += params.gravity;

    next.x += next.vx;
    next.y += next.vy;

    next
}
