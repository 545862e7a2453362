//! Controller configuration.
//!
//! [`ControllerConfig`] groups one sub-config per concern. Every field is a
//! plain number or flag; [`ControllerConfig::validated`] clamps values into
//! their legal ranges and is applied by the controller every tick.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

mod crouch;
mod fov;
mod head_bob;
mod look;
mod movement;
mod sensors;
mod tilt;

pub use crouch::CrouchConfig;
pub use fov::FovConfig;
pub use head_bob::HeadBobConfig;
pub use look::LookConfig;
pub use movement::MovementConfig;
pub use sensors::SensorConfig;
pub use tilt::TiltConfig;

/// Configuration parameters for a first-person controller.
#[derive(Component, Reflect, Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct ControllerConfig {
    pub movement: MovementConfig,
    pub look: LookConfig,
    pub crouch: CrouchConfig,
    pub tilt: TiltConfig,
    pub fov: FovConfig,
    pub head_bob: HeadBobConfig,
    pub sensors: SensorConfig,
}

impl ControllerConfig {
    /// Preset tuned for a player-controlled character with every effect on.
    pub fn player() -> Self {
        Self::default()
    }

    /// Preset with tilt, FOV changes and head bob disabled.
    ///
    /// Useful for spectators, cutscenes and tests that only care about
    /// locomotion.
    pub fn without_effects() -> Self {
        let mut config = Self::default();
        config.tilt.enabled = false;
        config.fov.enabled = false;
        config.head_bob.enabled = false;
        config
    }

    /// Return a copy with every value clamped into its legal range.
    pub fn validated(&self) -> Self {
        Self {
            movement: self.movement.validated(),
            look: self.look.validated(),
            crouch: self.crouch.validated(),
            tilt: self.tilt.validated(),
            fov: self.fov.validated(),
            head_bob: self.head_bob.validated(),
            sensors: self.sensors.validated(),
        }
    }
}
