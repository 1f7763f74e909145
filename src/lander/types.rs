//! Lunar Lander data structures.
//!
//! The player lands a spacecraft on a pad by controlling rotation and thrust
//! against gravity, with a limited integer fuel supply.

use serde::{Deserialize, Serialize};

/// Playfield dimensions. Screen coordinates: y grows downward.
pub const FIELD_WIDTH: f64 = 800.0;
pub const FIELD_HEIGHT: f64 = 600.0;

/// Craft sprite height. Collision uses the lower edge (y + half-height).
pub const CRAFT_HEIGHT: f64 = 40.0;

/// Rotation speed in radians per tick.
pub const ROTATION_SPEED: f64 = 0.1;

/// Starting fuel. One unit burns per thrust tick.
pub const MAX_FUEL: u32 = 1000;

/// Simulation ticks per second.
pub const TICKS_PER_SECOND: u32 = 60;

/// Touchdown must be strictly slower than these to count as safe.
pub const MAX_LANDING_VX: f64 = 0.5;
pub const MAX_LANDING_VY: f64 = 1.0;

/// Score penalty per radian of tilt at touchdown.
pub const ANGLE_PENALTY_PER_RADIAN: f64 = 1000.0;

/// Difficulty levels. Each selects physics constants and a terrain dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub const ALL: [Difficulty; 3] = [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard];

    /// Map a title-screen choice (1-based) to a difficulty.
    pub fn from_choice(choice: u8) -> Option<Self> {
        match choice {
            1 => Some(Self::Easy),
            2 => Some(Self::Medium),
            3 => Some(Self::Hard),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Easy => "Easy",
            Self::Medium => "Medium",
            Self::Hard => "Hard",
        }
    }

    /// Downward velocity added every tick.
    pub fn gravity(&self) -> f64 {
        match self {
            Self::Easy => 0.03,
            Self::Medium => 0.05,
            Self::Hard => 0.07,
        }
    }

    /// Velocity change per thrust tick.
    pub fn thrust(&self) -> f64 {
        match self {
            Self::Easy => 0.2,
            Self::Medium => 0.15,
            Self::Hard => 0.1,
        }
    }

    /// Maximum |angle| (exclusive) for a safe touchdown. Tightest on Easy.
    pub fn angle_tolerance(&self) -> f64 {
        match self {
            Self::Easy => 0.10,
            Self::Medium => 0.15,
            Self::Hard => 0.20,
        }
    }

    /// Multiplier applied to remaining fuel on a successful landing.
    pub fn score_multiplier(&self) -> u32 {
        match self {
            Self::Easy => 1,
            Self::Medium => 2,
            Self::Hard => 3,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Easy => "Low gravity, strong engine, flat ground",
            Self::Medium => "Rolling hills, two pads",
            Self::Hard => "High gravity, weak engine, narrow pad",
        }
    }
}

/// Sign convention for the thrust vector.
///
/// `Standard` pushes along (sin θ, -cos θ): at θ = 0 thrust points up the
/// screen, positive θ pushes right. `Inverted` negates both components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThrustConvention {
    #[default]
    Standard,
    Inverted,
}

impl ThrustConvention {
    /// Unit thrust direction for the given orientation.
    pub fn direction(&self, angle: f64) -> (f64, f64) {
        let (sin, cos) = angle.sin_cos();
        match self {
            Self::Standard => (sin, -cos),
            Self::Inverted => (-sin, cos),
        }
    }
}

/// Physics constants for one session.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsParams {
    pub gravity: f64,
    pub thrust: f64,
    pub rotation_speed: f64,
    pub convention: ThrustConvention,
}

impl PhysicsParams {
    pub fn for_difficulty(difficulty: Difficulty, convention: ThrustConvention) -> Self {
        Self {
            gravity: difficulty.gravity(),
            thrust: difficulty.thrust(),
            rotation_speed: ROTATION_SPEED,
            convention,
        }
    }
}

/// The player-controlled lander.
#[derive(Debug, Clone, PartialEq)]
pub struct Craft {
    /// Horizontal position of the sprite center.
    pub x: f64,
    /// Vertical position of the sprite center (0 = top of the field).
    pub y: f64,
    /// Horizontal velocity per tick (positive = rightward).
    pub vx: f64,
    /// Vertical velocity per tick (positive = downward).
    pub vy: f64,
    /// Orientation in radians. 0 = upright. Never normalized.
    pub angle: f64,
    pub fuel: u32,
    /// Set by the integrator when thrust was applied this tick.
    pub thrusting: bool,
}

impl Craft {
    pub fn new(x: f64, y: f64, angle: f64, fuel: u32) -> Self {
        Self {
            x,
            y,
            vx: 0.0,
            vy: 0.0,
            angle,
            fuel,
            thrusting: false,
        }
    }

    /// Y coordinate of the landing legs.
    pub fn lower_edge(&self) -> f64 {
        self.y + CRAFT_HEIGHT / 2.0
    }
}

/// Per-tick control snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ControlInput {
    /// -1 = counter-clockwise, 0 = none, +1 = clockwise.
    pub rotation: i8,
    pub thrust: bool,
}

impl ControlInput {
    pub const IDLE: ControlInput = ControlInput {
        rotation: 0,
        thrust: false,
    };

    pub fn thrust() -> Self {
        Self {
            rotation: 0,
            thrust: true,
        }
    }

    pub fn rotate(direction: i8) -> Self {
        Self {
            rotation: direction.signum(),
            thrust: false,
        }
    }
}

/// Per-tick result of the collision evaluator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    None,
    Landed,
    Crashed,
}

/// Final result of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Landed,
    Crashed,
    Quit,
}

impl Outcome {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Landed => "You landed safely!",
            Self::Crashed => "You crashed!",
            Self::Quit => "Mission aborted.",
        }
    }
}

/// Sprite orientation buckets for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpriteAngle {
    HardLeft,
    Left,
    Straight,
    Right,
    HardRight,
}

impl SpriteAngle {
    /// Bucket an arbitrary angle, wrapping it into (-π, π] first.
    pub fn from_radians(angle: f64) -> Self {
        use std::f64::consts::{PI, TAU};
        let mut a = angle % TAU;
        if a > PI {
            a -= TAU;
        } else if a <= -PI {
            a += TAU;
        }
        if a < -0.39 {
            Self::HardLeft
        } else if a < -0.13 {
            Self::Left
        } else if a < 0.13 {
            Self::Straight
        } else if a < 0.39 {
            Self::Right
        } else {
            Self::HardRight
        }
    }
}
