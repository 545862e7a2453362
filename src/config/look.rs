//! Configuration for mouse look.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for mouse look.
///
/// Angles are in radians. Positive pitch looks up.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LookConfig {
    /// Radians of rotation per unit of look input.
    pub sensitivity: f32,

    /// Highest pitch the camera may reach (radians, >= 0).
    pub max_look_up: f32,

    /// Lowest pitch the camera may reach (radians, <= 0).
    pub max_look_down: f32,

    /// Rate at which the current yaw/pitch follow their targets.
    pub camera_weight: f32,

    /// Rate at which the smoothed horizontal look input follows the raw input.
    pub mouse_smoothing: f32,
}

impl Default for LookConfig {
    fn default() -> Self {
        Self {
            sensitivity: 0.003,
            max_look_up: 85f32.to_radians(),
            max_look_down: -85f32.to_radians(),
            camera_weight: 25.0,
            mouse_smoothing: 10.0,
        }
    }
}

impl LookConfig {
    /// Clamp a pitch angle into the configured range.
    #[inline]
    pub fn clamp_pitch(&self, pitch: f32) -> f32 {
        pitch.clamp(self.max_look_down, self.max_look_up)
    }

    pub(crate) fn validated(self) -> Self {
        use std::f32::consts::FRAC_PI_2;
        Self {
            sensitivity: self.sensitivity.max(0.0),
            max_look_up: self.max_look_up.clamp(0.0, FRAC_PI_2),
            max_look_down: self.max_look_down.clamp(-FRAC_PI_2, 0.0),
            camera_weight: self.camera_weight.max(0.0),
            mouse_smoothing: self.mouse_smoothing.max(0.0),
        }
    }
}
