//! Key events to per-tick control snapshots.
//!
//! Most terminals only deliver key presses and auto-repeats, never
//! releases. A press therefore holds its control for `INPUT_HOLD_TICKS`
//! ticks, which bridges the gap between repeat events so a held key feels
//! continuous. Terminals with enhanced keyboard reporting do send releases;
//! once one is seen, presses latch until their release arrives.

use crate::lander::ControlInput;

/// Ticks to hold a control after a press (~200ms at 60 Hz).
pub const INPUT_HOLD_TICKS: u32 = 12;

/// Controls that map to continuous input during play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKey {
    RotateLeft,
    RotateRight,
    Thrust,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum Hold {
    #[default]
    Idle,
    Ticks(u32),
    Latched,
}

impl Hold {
    fn active(self) -> bool {
        !matches!(self, Hold::Idle)
    }

    fn decay(self) -> Hold {
        match self {
            Hold::Ticks(n) if n > 1 => Hold::Ticks(n - 1),
            Hold::Ticks(_) => Hold::Idle,
            other => other,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ControlState {
    rotate_left: Hold,
    rotate_right: Hold,
    thrust: Hold,
    releases_reported: bool,
}

impl ControlState {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, key: ControlKey) -> &mut Hold {
        match key {
            ControlKey::RotateLeft => &mut self.rotate_left,
            ControlKey::RotateRight => &mut self.rotate_right,
            ControlKey::Thrust => &mut self.thrust,
        }
    }

    /// Register a press or auto-repeat.
    pub fn press(&mut self, key: ControlKey) {
        let hold = if self.releases_reported {
            Hold::Latched
        } else {
            Hold::Ticks(INPUT_HOLD_TICKS)
        };
        *self.slot(key) = hold;
    }

    /// Register a release. Switches the state into latched mode.
    pub fn release(&mut self, key: ControlKey) {
        self.releases_reported = true;
        *self.slot(key) = Hold::Idle;
    }

    /// Control input for the current tick.
    pub fn snapshot(&self) -> ControlInput {
        let left = i8::from(self.rotate_left.active());
        let right = i8::from(self.rotate_right.active());
        ControlInput {
            rotation: right - left,
            thrust: self.thrust.active(),
        }
    }

    /// Decay hold timers by one tick.
    pub fn advance(&mut self) {
        self.rotate_left = self.rotate_left.decay();
        self.rotate_right = self.rotate_right.decay();
        self.thrust = self.thrust.decay();
    }

    /// Drop all held controls, e.g. on scene change.
    pub fn clear(&mut self) {
        self.rotate_left = Hold::Idle;
        self.rotate_right = Hold::Idle;
        self.thrust = Hold::Idle;
    }
}
