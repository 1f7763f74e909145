pub mod collision;
pub mod physics;
pub mod terrain;
pub mod types;

pub use collision::{evaluate, is_safe_landing};
pub use physics::step;
pub use terrain::{LandingPad, Point, Terrain};
pub use types::{
    Contact, ControlInput, Craft, Difficulty, Outcome, PhysicsParams, SpriteAngle,
    ThrustConvention, FIELD_HEIGHT, FIELD_WIDTH, MAX_FUEL,
};
