//! Configuration for crouching.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Smallest accepted smoothing time, avoids dividing by zero.
const MIN_SMOOTH_TIME: f32 = 0.001;

/// Configuration for crouching.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CrouchConfig {
    /// Capsule height while crouched (units).
    pub crouch_height: f32,

    /// Time constant for the height transition (seconds).
    pub smooth_time: f32,
}

impl Default for CrouchConfig {
    fn default() -> Self {
        Self {
            crouch_height: 1.0,
            smooth_time: 0.1,
        }
    }
}

impl CrouchConfig {
    /// Smoothing rate derived from `smooth_time`.
    #[inline]
    pub fn rate(&self) -> f32 {
        1.0 / self.smooth_time.max(MIN_SMOOTH_TIME)
    }

    pub(crate) fn validated(self) -> Self {
        Self {
            crouch_height: self.crouch_height.max(0.01),
            smooth_time: self.smooth_time.max(MIN_SMOOTH_TIME),
        }
    }
}
