//! Camera rig: look, tilt, field of view and head bob.
//!
//! The four sub-behaviors are independent but share the tick's `dt` and the
//! current locomotion state. Each owns a disjoint part of
//! [`CameraOrientation`] and smooths it with [`smooth`](crate::math::smooth).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::state::CameraOrientation;

mod fov;
mod head_bob;
mod look;
mod tilt;

pub use fov::update_fov;
pub use head_bob::{bob_frequency, reconcile_rest_height, update_head_bob};
pub use look::update_look;
pub use tilt::{target_tilt, update_tilt};

/// Observable camera pose after a tick.
#[derive(Reflect, Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraPose {
    /// Rotation of the body node (yaw only).
    pub body_rotation: Quat,
    /// Rotation of the camera node relative to the body (pitch and roll).
    pub camera_rotation: Quat,
    /// Camera translation above the character origin (the feet).
    pub camera_offset: Vec3,
    /// Vertical FOV to apply, `None` when FOV is not driven.
    pub fov: Option<f32>,
}

impl Default for CameraPose {
    fn default() -> Self {
        Self::from(&CameraOrientation::default())
    }
}

impl From<&CameraOrientation> for CameraPose {
    fn from(camera: &CameraOrientation) -> Self {
        Self {
            body_rotation: camera.body_rotation(),
            camera_rotation: camera.camera_rotation(),
            camera_offset: camera.camera_offset,
            fov: camera.current_fov,
        }
    }
}
