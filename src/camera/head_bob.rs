use bevy::prelude::*;

use crate::config::HeadBobConfig;
use crate::math::smooth_vec3;
use crate::state::{CameraOrientation, CharacterKinematics, LocomotionState};

/// Scale the eye height with the capsule so crouching lowers the camera.
pub fn reconcile_rest_height(camera: &mut CameraOrientation, kinematics: &CharacterKinematics) {
    camera.rest_height = camera.base_camera_height * kinematics.height_ratio();
}

/// Phase speed of the bob for a locomotion state.
pub fn bob_frequency(state: LocomotionState, config: &HeadBobConfig) -> f32 {
    match state {
        LocomotionState::Running => config.run_frequency,
        LocomotionState::Crouching => config.crouch_frequency,
        LocomotionState::Walking | LocomotionState::Jumping => config.walk_frequency,
    }
}

/// Advance the head bob and ease the camera toward it.
///
/// Airborne or idle characters reset the phase and ease back to the rest
/// position. Moving characters trace a figure-eight around the rest position.
/// The camera is never snapped.
pub fn update_head_bob(
    camera: &mut CameraOrientation,
    grounded: bool,
    moving: bool,
    state: LocomotionState,
    config: &HeadBobConfig,
    dt: f32,
) {
    let rest = Vec3::new(0.0, camera.rest_height, 0.0);

    let target = if !grounded || !moving {
        camera.bob_phase = 0.0;
        rest
    } else {
        camera.bob_phase += dt * bob_frequency(state, config);
        rest + Vec3::new(
            (camera.bob_phase * 0.5).cos() * config.amplitude_x,
            camera.bob_phase.sin() * config.amplitude_y,
            0.0,
        )
    };

    camera.camera_offset = smooth_vec3(camera.camera_offset, target, dt, config.smoothness);
}
