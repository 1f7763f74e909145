//! Lunar Lander - Terminal Landing Game Library
//!
//! Physics, terrain, landing evaluation and scene flow, independent of the
//! terminal front end so they can be tested headless.

pub mod audio;
pub mod clock;
pub mod controls;
pub mod error;
pub mod lander;
pub mod scene;
pub mod session;
pub mod settings;

pub use error::{Error, Result};
pub use scene::{GameContext, MenuKey, Scene, SceneEvent, SceneMachine};
pub use session::{Session, SessionConfig};
pub use settings::Settings;
