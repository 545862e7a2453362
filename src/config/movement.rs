//! Configuration for ground movement and jumping.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Configuration for ground movement and jumping.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// Horizontal speed while walking (units/second).
    pub walk_speed: f32,

    /// Horizontal speed while running (units/second).
    pub run_speed: f32,

    /// Fraction of `walk_speed` used while crouching.
    pub crouch_speed_multiplier: f32,

    /// Apex height of a jump (units).
    pub jump_height: f32,

    /// Vertical acceleration (units/second^2). Negative pulls down.
    pub gravity: f32,

    /// Vertical velocity the character is pinned to while grounded.
    /// Slightly negative keeps the body pressed into slopes and stairs.
    pub grounded_velocity: f32,

    /// Axis magnitude below which movement input is treated as idle.
    pub input_deadzone: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            walk_speed: 5.0,
            run_speed: 9.0,
            crouch_speed_multiplier: 0.5,
            jump_height: 1.2,
            gravity: -25.0,
            grounded_velocity: -5.0,
            input_deadzone: 0.1,
        }
    }
}

impl MovementConfig {
    /// Initial vertical velocity that reaches `jump_height` under `gravity`.
    pub fn jump_velocity(&self) -> f32 {
        (self.jump_height * -2.0 * self.gravity).max(0.0).sqrt()
    }

    /// Horizontal speed while crouched.
    pub fn crouch_speed(&self) -> f32 {
        self.walk_speed * self.crouch_speed_multiplier
    }

    pub(crate) fn validated(self) -> Self {
        Self {
            walk_speed: self.walk_speed.max(0.0),
            run_speed: self.run_speed.max(0.0),
            crouch_speed_multiplier: self.crouch_speed_multiplier.max(0.0),
            jump_height: self.jump_height.max(0.0),
            gravity: self.gravity.min(0.0),
            grounded_velocity: self.grounded_velocity.min(0.0),
            input_deadzone: self.input_deadzone.clamp(0.0, 0.99),
        }
    }
}
