//! Configuration for head bob.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for head bob.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeadBobConfig {
    /// Whether the camera bobs while moving.
    pub enabled: bool,

    /// Phase speed while walking (radians/second).
    pub walk_frequency: f32,

    /// Phase speed while running (radians/second).
    pub run_frequency: f32,

    /// Phase speed while crouching (radians/second).
    pub crouch_frequency: f32,

    /// Sideways sway amplitude (units).
    pub amplitude_x: f32,

    /// Vertical bob amplitude (units).
    pub amplitude_y: f32,

    /// Rate at which the camera follows the bob target.
    pub smoothness: f32,
}

impl Default for HeadBobConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            walk_frequency: 10.0,
            run_frequency: 14.0,
            crouch_frequency: 6.0,
            amplitude_x: 0.05,
            amplitude_y: 0.08,
            smoothness: 10.0,
        }
    }
}

impl HeadBobConfig {
    pub(crate) fn validated(self) -> Self {
        Self {
            walk_frequency: self.walk_frequency.max(0.0),
            run_frequency: self.run_frequency.max(0.0),
            crouch_frequency: self.crouch_frequency.max(0.0),
            amplitude_x: self.amplitude_x.max(0.0),
            amplitude_y: self.amplitude_y.max(0.0),
            smoothness: self.smoothness.max(0.0),
            ..self
        }
    }
}
