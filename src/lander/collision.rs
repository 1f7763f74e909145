//! Touchdown classification against terrain and the safe-landing envelope.

use super::terrain::{interpolate, segment_covers, Terrain};
use super::types::{Contact, Craft, FIELD_HEIGHT, MAX_LANDING_VX, MAX_LANDING_VY};

/// Safe-landing envelope. All bounds are exclusive.
pub fn is_safe_landing(vx: f64, vy: f64, angle: f64, angle_tolerance: f64) -> bool {
    vx.abs() < MAX_LANDING_VX && vy.abs() < MAX_LANDING_VY && angle.abs() < angle_tolerance
}

/// True if the craft's lower edge has reached the surface under it.
///
/// Off the modeled extent the bottom of the field acts as the floor.
pub fn touches_ground(craft: &Craft, terrain: &Terrain) -> bool {
    let lower = craft.lower_edge();
    let mut covered = false;
    for (a, b) in terrain.segments() {
        if !segment_covers(a, b, craft.x) {
            continue;
        }
        covered = true;
        if lower >= interpolate(a, b, craft.x) {
            return true;
        }
    }
    !covered && lower >= FIELD_HEIGHT
}

/// Classify the craft's end-of-tick position.
///
/// Pure: evaluating the same state twice yields the same contact.
pub fn evaluate(craft: &Craft, terrain: &Terrain, angle_tolerance: f64) -> Contact {
    if !touches_ground(craft, terrain) {
        return Contact::None;
    }

    let on_pad = terrain.pad_at(craft.x).is_some();
    if on_pad && is_safe_landing(craft.vx, craft.vy, craft.angle, angle_tolerance) {
        Contact::Landed
    } else {
        Contact::Crashed
    }
}
