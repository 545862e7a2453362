//! Configuration for procedural camera roll.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for procedural camera roll.
///
/// Strafing and turning roll the camera away from the motion. Angles are in
/// radians.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltConfig {
    /// Whether tilt is applied at all.
    pub enabled: bool,

    /// Roll per unit of strafe input.
    pub tilt_amount: f32,

    /// Rate at which the current tilt follows its target.
    pub smoothness: f32,

    /// Multiplier applied while running.
    pub run_multiplier: f32,

    /// Multiplier applied while crouching.
    pub crouch_multiplier: f32,

    /// Roll per unit of smoothed horizontal look input.
    pub turn_tilt_amount: f32,

    /// Upper bound on the roll magnitude.
    pub max_total_tilt: f32,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            tilt_amount: 2f32.to_radians(),
            smoothness: 8.0,
            run_multiplier: 1.5,
            crouch_multiplier: 0.5,
            turn_tilt_amount: 0.0015,
            max_total_tilt: 5f32.to_radians(),
        }
    }
}

impl TiltConfig {
    pub(crate) fn validated(self) -> Self {
        Self {
            tilt_amount: self.tilt_amount.max(0.0),
            smoothness: self.smoothness.max(0.0),
            run_multiplier: self.run_multiplier.max(0.0),
            crouch_multiplier: self.crouch_multiplier.max(0.0),
            turn_tilt_amount: self.turn_tilt_amount.max(0.0),
            max_total_tilt: self.max_total_tilt.clamp(0.0, std::f32::consts::FRAC_PI_2),
            ..self
        }
    }
}
