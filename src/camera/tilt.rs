use crate::config::TiltConfig;
use crate::math::smooth;
use crate::state::{CameraOrientation, LocomotionState};

/// Roll the camera should settle at for the given strafe input and state.
///
/// Strafing and turning both roll away from the motion. The result is scaled
/// by the running or crouching multiplier and clamped to `max_total_tilt`.
pub fn target_tilt(strafe: f32, smoothed_mouse_x: f32, state: LocomotionState, config: &TiltConfig) -> f32 {
    let mut target = -strafe * config.tilt_amount - smoothed_mouse_x * config.turn_tilt_amount;
    match state {
        LocomotionState::Running => target *= config.run_multiplier,
        LocomotionState::Crouching => target *= config.crouch_multiplier,
        LocomotionState::Walking | LocomotionState::Jumping => {}
    }
    target.clamp(-config.max_total_tilt, config.max_total_tilt)
}

/// Smooth the camera roll toward [`target_tilt`]. Disabled tilt holds at zero.
pub fn update_tilt(
    camera: &mut CameraOrientation,
    strafe: f32,
    state: LocomotionState,
    config: &TiltConfig,
    dt: f32,
) {
    if !config.enabled {
        camera.current_tilt = 0.0;
        return;
    }

    let target = target_tilt(strafe, camera.smoothed_mouse_x, state, config);
    camera.current_tilt = smooth(camera.current_tilt, target, dt, config.smoothness)
        .clamp(-config.max_total_tilt, config.max_total_tilt);
}
