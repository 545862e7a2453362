//! Controller state blocks.
//!
//! All continuous values that survive from one tick to the next live here.
//! Each block is owned by exactly one controller and mutated only by the
//! sub-update that is responsible for it.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Discrete movement state, re-derived every tick.
#[derive(Reflect, Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocomotionState {
    #[default]
    Walking,
    Running,
    Crouching,
    /// Airborne, whether from a jump or from walking off a ledge.
    Jumping,
}

/// Vertical motion and capsule sizing of the character.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CharacterKinematics {
    /// Vertical velocity (units/second, positive is up).
    pub vertical_velocity: f32,
    /// Whether the character is on the ground this tick.
    pub is_grounded: bool,
    /// Set by a jump, cleared on landing.
    pub has_jumped: bool,
    /// Capsule radius captured at initialization.
    pub radius: f32,
    /// Current capsule height.
    pub current_height: f32,
    /// Standing capsule height captured at initialization.
    pub original_height: f32,
    /// Height the capsule is moving toward.
    pub target_height: f32,
}

impl Default for CharacterKinematics {
    fn default() -> Self {
        Self::new(0.5, 2.0)
    }
}

impl CharacterKinematics {
    /// Create kinematics for a standing capsule of the given size.
    pub fn new(radius: f32, height: f32) -> Self {
        Self {
            vertical_velocity: 0.0,
            is_grounded: false,
            has_jumped: false,
            radius,
            current_height: height,
            original_height: height,
            target_height: height,
        }
    }

    /// Current height as a fraction of the standing height.
    pub fn height_ratio(&self) -> f32 {
        if self.original_height > 0.0 {
            self.current_height / self.original_height
        } else {
            1.0
        }
    }
}

/// Smoothed camera orientation and effect state.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraOrientation {
    /// Yaw accumulated from raw input (radians, unbounded).
    pub target_yaw: f32,
    /// Pitch accumulated from raw input, clamped to the look limits.
    pub target_pitch: f32,
    /// Yaw applied to the body.
    pub current_yaw: f32,
    /// Pitch applied to the camera.
    pub current_pitch: f32,
    /// Low-passed horizontal look input, drives turn tilt.
    pub smoothed_mouse_x: f32,
    /// Roll applied to the camera.
    pub current_tilt: f32,
    /// Vertical FOV, `None` when the camera has no perspective projection.
    pub current_fov: Option<f32>,
    /// Head bob phase accumulator.
    pub bob_phase: f32,
    /// Camera translation relative to the body.
    pub camera_offset: Vec3,
    /// Standing eye height captured at initialization.
    pub base_camera_height: f32,
    /// Eye height for the current capsule height.
    pub rest_height: f32,
}

impl Default for CameraOrientation {
    fn default() -> Self {
        Self::new(0.0, 1.6, None)
    }
}

impl CameraOrientation {
    /// Create an orientation looking level along `yaw` at the given eye height.
    pub fn new(yaw: f32, camera_height: f32, fov: Option<f32>) -> Self {
        Self {
            target_yaw: yaw,
            target_pitch: 0.0,
            current_yaw: yaw,
            current_pitch: 0.0,
            smoothed_mouse_x: 0.0,
            current_tilt: 0.0,
            current_fov: fov,
            bob_phase: 0.0,
            camera_offset: Vec3::new(0.0, camera_height, 0.0),
            base_camera_height: camera_height,
            rest_height: camera_height,
        }
    }

    /// Rotation of the body node (yaw only).
    pub fn body_rotation(&self) -> Quat {
        Quat::from_rotation_y(self.current_yaw)
    }

    /// Rotation of the camera node relative to the body (pitch, then roll).
    pub fn camera_rotation(&self) -> Quat {
        Quat::from_rotation_x(self.current_pitch) * Quat::from_rotation_z(self.current_tilt)
    }
}

/// Point above the character used only to test standing clearance.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StandingClearanceMarker {
    /// Fixed height above the character origin.
    pub offset: f32,
}

impl StandingClearanceMarker {
    pub fn new(offset: f32) -> Self {
        Self { offset }
    }

    /// World position of the marker for a character at `origin`.
    pub fn position(&self, origin: Vec3) -> Vec3 {
        origin + Vec3::Y * self.offset
    }
}
