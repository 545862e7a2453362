use std::f32::consts::TAU;

use bevy::prelude::*;

use crate::config::LookConfig;
use crate::math::smooth;
use crate::state::CameraOrientation;

/// Accumulate look input and smooth the current yaw/pitch toward it.
///
/// Positive `look.x` turns right, positive `look.y` looks up. Yaw is
/// unbounded; pitch is clamped to the configured limits on both the target
/// and the current value.
pub fn update_look(camera: &mut CameraOrientation, look: Vec2, config: &LookConfig, dt: f32) {
    camera.target_yaw -= look.x * config.sensitivity;
    camera.target_pitch = config.clamp_pitch(camera.target_pitch + look.y * config.sensitivity);

    camera.smoothed_mouse_x = smooth(camera.smoothed_mouse_x, look.x, dt, config.mouse_smoothing);

    camera.current_yaw = smooth(camera.current_yaw, camera.target_yaw, dt, config.camera_weight);
    camera.current_pitch = config.clamp_pitch(smooth(
        camera.current_pitch,
        camera.target_pitch,
        dt,
        config.camera_weight,
    ));

    wrap_yaw(camera);
}

/// Shift both yaw values by whole turns once the target drifts past one turn,
/// keeping float precision without changing the smoothing distance.
fn wrap_yaw(camera: &mut CameraOrientation) {
    if camera.target_yaw.abs() > TAU {
        let turns = (camera.target_yaw / TAU).trunc() * TAU;
        camera.target_yaw -= turns;
        camera.current_yaw -= turns;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    #[test]
    fn turning_right_decreases_yaw() {
        let mut cam = CameraOrientation::default();
        let config = LookConfig::default();
        update_look(&mut cam, Vec2::new(100.0, 0.0), &config, DT);

        assert!(cam.target_yaw < 0.0);
        assert!(cam.current_yaw < 0.0);
        assert!(cam.current_yaw > cam.target_yaw, "current lags behind target");
        assert!(cam.smoothed_mouse_x > 0.0);
    }

    #[test]
    fn yaw_converges_to_target() {
        let mut cam = CameraOrientation::default();
        let config = LookConfig::default();
        update_look(&mut cam, Vec2::new(200.0, 0.0), &config, DT);
        for _ in 0..120 {
            update_look(&mut cam, Vec2::ZERO, &config, DT);
        }
        assert!((cam.current_yaw - cam.target_yaw).abs() < 1e-4);
        assert!(cam.smoothed_mouse_x.abs() < 1e-3);
    }

    #[test]
    fn pitch_never_leaves_limits() {
        let mut cam = CameraOrientation::default();
        let config = LookConfig::default();
        let inputs = [5000.0, -3.0, 12000.0, -90000.0, 40.0, -1.0, 7777.0];
        for (i, y) in inputs.iter().cycle().take(300).enumerate() {
            let dt = if i % 7 == 0 { 1.0 } else { DT };
            update_look(&mut cam, Vec2::new(0.0, *y), &config, dt);
            assert!(cam.target_pitch <= config.max_look_up && cam.target_pitch >= config.max_look_down);
            assert!(cam.current_pitch <= config.max_look_up && cam.current_pitch >= config.max_look_down);
        }
    }

    #[test]
    fn shrinking_limits_clamp_current_pitch() {
        let mut cam = CameraOrientation::default();
        let mut config = LookConfig::default();
        cam.target_pitch = 1.2;
        cam.current_pitch = 1.2;

        config.max_look_up = 0.5;
        update_look(&mut cam, Vec2::ZERO, &config, DT);
        assert!(cam.current_pitch <= 0.5);
    }

    #[test]
    fn yaw_wraps_without_jumping() {
        let mut cam = CameraOrientation::default();
        let config = LookConfig::default();
        let mut last_forward = cam.body_rotation() * Vec3::NEG_Z;
        for _ in 0..2000 {
            update_look(&mut cam, Vec2::new(50.0, 0.0), &config, DT);
            let forward = cam.body_rotation() * Vec3::NEG_Z;
            assert!(forward.angle_between(last_forward) < 0.5);
            last_forward = forward;
        }
        assert!(cam.target_yaw.abs() <= TAU);
    }
}
