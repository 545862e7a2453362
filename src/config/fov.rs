//! Configuration for field-of-view changes.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

const MIN_FOV: f32 = 1.0 * std::f32::consts::PI / 180.0;
const MAX_FOV: f32 = 179.0 * std::f32::consts::PI / 180.0;

/// Configuration for field-of-view changes (vertical FOV, radians).
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FovConfig {
    /// Whether the FOV follows the running state.
    pub enabled: bool,

    /// FOV while not running.
    pub normal_fov: f32,

    /// FOV while running.
    pub run_fov: f32,

    /// Rate at which the current FOV follows its target.
    pub change_speed: f32,
}

impl Default for FovConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            normal_fov: 70f32.to_radians(),
            run_fov: 80f32.to_radians(),
            change_speed: 8.0,
        }
    }
}

impl FovConfig {
    pub(crate) fn validated(self) -> Self {
        Self {
            normal_fov: self.normal_fov.clamp(MIN_FOV, MAX_FOV),
            run_fov: self.run_fov.clamp(MIN_FOV, MAX_FOV),
            change_speed: self.change_speed.max(0.0),
            ..self
        }
    }
}
