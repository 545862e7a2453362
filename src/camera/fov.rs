use crate::config::FovConfig;
use crate::math::smooth;
use crate::state::CameraOrientation;

/// Smooth the field of view toward the running or normal value.
///
/// Does nothing when the feature is disabled or the camera has no
/// perspective FOV. `running` must come from
/// [`TickInput::wants_to_run`](crate::intent::TickInput::wants_to_run), the
/// same predicate that picks the locomotion speed.
pub fn update_fov(camera: &mut CameraOrientation, running: bool, config: &FovConfig, dt: f32) {
    if !config.enabled {
        return;
    }
    let Some(current) = camera.current_fov else {
        return;
    };

    let target = if running {
        config.run_fov
    } else {
        config.normal_fov
    };
    camera.current_fov = Some(smooth(current, target, dt, config.change_speed));
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 60.0;

    fn camera(fov: Option<f32>) -> CameraOrientation {
        CameraOrientation::new(0.0, 1.6, fov)
    }

    #[test]
    fn running_widens_fov() {
        let config = FovConfig::default();
        let mut cam = camera(Some(config.normal_fov));
        update_fov(&mut cam, true, &config, DT);
        let fov = cam.current_fov.unwrap();
        assert!(fov > config.normal_fov && fov < config.run_fov);

        for _ in 0..200 {
            update_fov(&mut cam, true, &config, DT);
        }
        assert!((cam.current_fov.unwrap() - config.run_fov).abs() < 1e-4);

        for _ in 0..200 {
            update_fov(&mut cam, false, &config, DT);
        }
        assert!((cam.current_fov.unwrap() - config.normal_fov).abs() < 1e-4);
    }

    #[test]
    fn missing_projection_disables_fov() {
        let mut cam = camera(None);
        update_fov(&mut cam, true, &FovConfig::default(), DT);
        assert_eq!(cam.current_fov, None);
    }

    #[test]
    fn disabled_fov_is_left_alone() {
        let config = FovConfig {
            enabled: false,
            ..FovConfig::default()
        };
        let mut cam = camera(Some(1.0));
        update_fov(&mut cam, true, &config, DT);
        assert_eq!(cam.current_fov, Some(1.0));
    }
}
